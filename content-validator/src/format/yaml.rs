//! YAML data entries.
//!
//! YAML is deserialized into `serde_json::Value` so every format feeds the
//! same validator input.

use std::path::Path;

use serde_json::Value;

use crate::error::{ScanError, ScanErrorKind};

/// Parse a single YAML document into a JSON value.
///
/// # Errors
///
/// Returns the parser message if `content` is not a single valid YAML document.
pub fn parse_yaml_value(content: &str) -> Result<Value, String> {
    serde_saphyr::from_str::<Value>(content).map_err(|e| e.to_string())
}

/// Extract the raw record from a `.yaml`/`.yml` data entry.
///
/// # Errors
///
/// Returns a `YamlParseError` scan error if the content is not valid YAML.
pub fn extract_yaml_record(content: &str, path: &Path) -> Result<Value, ScanError> {
    parse_yaml_value(content).map_err(|e| {
        ScanError::new(
            path,
            ScanErrorKind::YamlParseError,
            format!("YAML parse error: {e}"),
        )
    })
}
