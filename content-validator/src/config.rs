//! Configuration types for content validation.
//!
//! Split into core validation config (how entries are routed to schemas) and
//! source-specific config (how content is discovered on disk).

use std::path::PathBuf;

use content_schema::{Collection, SchemaVariant};

/// What to do with entries whose collection directory is not registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnknownCollectionPolicy {
    /// Skip the file and log a warning (default).
    #[default]
    Skip,
    /// Report the file as a scan error.
    Error,
}

/// Core validation config, independent of where content comes from.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Handling of directories that match no collection.
    pub unknown_collection: UnknownCollectionPolicy,
    /// Directory names validated with the case-study schema (base fields plus
    /// `metrics`). Takes precedence over the registry.
    pub case_study_collections: Vec<String>,
}

impl ValidationConfig {
    /// Schema for a collection directory name, or `None` if the name is unknown.
    #[must_use]
    pub fn schema_for(&self, collection: &str) -> Option<SchemaVariant> {
        if self.case_study_collections.iter().any(|c| c == collection) {
            return Some(SchemaVariant::CaseStudy);
        }
        collection.parse::<Collection>().ok().map(Collection::schema)
    }
}

/// Filesystem-specific source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ContentSourceConfig {
    /// Content roots, collection directories or single files. Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format).
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum total number of files to read (default: `100_000`).
    pub max_files: usize,
    /// Maximum total bytes to read across all files (default: 512 MB).
    pub max_total_bytes: u64,
}

impl Default for ContentSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
            max_total_bytes: 536_870_912,
        }
    }
}
