//! The normalized content record and its enumerated field types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Fallback image used when an entry declares no `featuredImage`.
pub const DEFAULT_FEATURED_IMAGE: &str = "/images/default-featured.jpg";

/// A closed set of string labels accepted by an enumerated field.
pub trait Choice: Copy + Sized + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];
    /// Every label, in the same order as [`Choice::ALL`].
    const LABELS: &'static [&'static str];

    /// The serialized label of this variant.
    fn as_str(self) -> &'static str;

    /// Look up a variant by its exact label.
    #[must_use]
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == label)
    }
}

/// Market category of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Products built for space missions.
    #[serde(rename = "for space")]
    ForSpace,
    /// Services using data from orbit.
    #[serde(rename = "from space")]
    FromSpace,
    /// Operations carried out in orbit.
    #[serde(rename = "in space")]
    InSpace,
    /// Online retail.
    #[serde(rename = "e-commerce")]
    ECommerce,
    /// Hosted software.
    #[serde(rename = "SaaS")]
    SaaS,
    /// Health and medicine.
    #[serde(rename = "Healthcare")]
    Healthcare,
}

impl Choice for Category {
    const ALL: &'static [Self] = &[
        Self::ForSpace,
        Self::FromSpace,
        Self::InSpace,
        Self::ECommerce,
        Self::SaaS,
        Self::Healthcare,
    ];
    const LABELS: &'static [&'static str] = &[
        "for space",
        "from space",
        "in space",
        "e-commerce",
        "SaaS",
        "Healthcare",
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::ForSpace => "for space",
            Self::FromSpace => "from space",
            Self::InSpace => "in space",
            Self::ECommerce => "e-commerce",
            Self::SaaS => "SaaS",
            Self::Healthcare => "Healthcare",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sustainability theme an entry focuses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SustainableFocus {
    /// Clean or efficient energy.
    Energy,
    /// Emission reduction.
    Emissions,
    /// Sustainable materials and recycling.
    Materials,
    /// Debris mitigation and removal (`space-debris`).
    SpaceDebris,
    /// Outreach and training.
    Education,
    /// Regulation and governance.
    Policy,
}

impl Choice for SustainableFocus {
    const ALL: &'static [Self] = &[
        Self::Energy,
        Self::Emissions,
        Self::Materials,
        Self::SpaceDebris,
        Self::Education,
        Self::Policy,
    ];
    const LABELS: &'static [&'static str] = &[
        "energy",
        "emissions",
        "materials",
        "space-debris",
        "education",
        "policy",
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Emissions => "emissions",
            Self::Materials => "materials",
            Self::SpaceDebris => "space-debris",
            Self::Education => "education",
            Self::Policy => "policy",
        }
    }
}

impl fmt::Display for SustainableFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated content entry with every declared default applied.
///
/// Serialized keys match the front-matter keys authors write, so the
/// serialized form validates back to an identical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ContentRecord {
    pub title: String,
    pub description: String,
    pub summary: String,
    /// Stored exactly as written; never normalized to a date type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub author: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub notion_page_id: String,
    pub exported_at: String,
    #[serde(rename = "featuredImage")]
    pub featured_image: String,
    #[serde(rename = "seoTitle")]
    pub seo_title: String,
    #[serde(rename = "seoDescription")]
    pub seo_description: String,
    /// `None` means unset, which is distinct from `Some(false)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(
        rename = "sustainableFocus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sustainable_focus: Option<SustainableFocus>,
    pub pledges: Vec<String>,
    pub organisations: Vec<String>,
    #[serde(rename = "SDGs")]
    pub sdgs: Vec<Number>,
    /// Only populated by the case-study schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
}

impl ContentRecord {
    /// A record carrying `title` and every base-schema default.
    #[must_use]
    pub fn with_defaults(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            summary: String::new(),
            pubdate: None,
            slug: None,
            author: String::new(),
            tags: Vec::new(),
            category: None,
            url: None,
            notion_page_id: String::new(),
            exported_at: String::new(),
            featured_image: DEFAULT_FEATURED_IMAGE.to_owned(),
            seo_title: String::new(),
            seo_description: String::new(),
            featured: None,
            sustainable_focus: None,
            pledges: Vec::new(),
            organisations: Vec::new(),
            sdgs: Vec::new(),
            metrics: None,
        }
    }
}
