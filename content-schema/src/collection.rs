//! Registry of content collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::SchemaVariant;

/// A collection name outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown content collection '{name}'")]
pub struct UnknownCollection {
    /// The name that failed to resolve.
    pub name: String,
}

/// A named bucket of content entries sharing one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Blog,
    News,
    Resources,
    PressReleases,
    Tools,
    Insights,
    Campaigns,
    Team,
    Training,
    Values,
    Organisations,
}

impl Collection {
    /// Every registered collection.
    pub const ALL: [Self; 11] = [
        Self::Blog,
        Self::News,
        Self::Resources,
        Self::PressReleases,
        Self::Tools,
        Self::Insights,
        Self::Campaigns,
        Self::Team,
        Self::Training,
        Self::Values,
        Self::Organisations,
    ];

    /// Directory name of the collection.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::News => "news",
            Self::Resources => "resources",
            Self::PressReleases => "press-releases",
            Self::Tools => "tools",
            Self::Insights => "insights",
            Self::Campaigns => "campaigns",
            Self::Team => "team",
            Self::Training => "training",
            Self::Values => "values",
            Self::Organisations => "organisations",
        }
    }

    /// Schema applied to entries of this collection.
    #[must_use]
    pub fn schema(self) -> SchemaVariant {
        match self {
            Self::Blog
            | Self::News
            | Self::Resources
            | Self::PressReleases
            | Self::Tools
            | Self::Insights
            | Self::Campaigns
            | Self::Team
            | Self::Training
            | Self::Values
            | Self::Organisations => SchemaVariant::Base,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCollection { name: s.to_owned() })
    }
}
