//! Format-specific record extractors.
//!
//! Each sub-module turns file content into the raw record handed to the
//! schema validator:
//! - `markdown`: YAML front matter of `.md`/`.mdx` entries
//! - `json`: whole-file JSON data entries
//! - `yaml`: whole-file YAML data entries (also parses front matter)

pub mod json;
pub mod markdown;
pub mod yaml;

use std::path::Path;

use serde_json::Value;

use crate::error::ScanError;
use crate::strategy::ContentFormat;

/// Extract the raw record of one entry.
///
/// # Errors
///
/// Returns a scan error if the content cannot be parsed in its format.
pub fn extract_record(format: ContentFormat, content: &str, path: &Path) -> Result<Value, ScanError> {
    match format {
        ContentFormat::Markdown => markdown::extract_markdown_record(content, path),
        ContentFormat::Json => json::extract_json_record(content, path),
        ContentFormat::Yaml => yaml::extract_yaml_record(content, path),
    }
}
