//! JSON data entries.

use std::path::Path;

use serde_json::Value;

use crate::error::{ScanError, ScanErrorKind};

/// Extract the raw record from a `.json` data entry.
///
/// # Errors
///
/// Returns a `JsonParseError` scan error if the content is not valid JSON.
/// Invalid JSON is a scan failure, never silently ignored.
pub fn extract_json_record(content: &str, path: &Path) -> Result<Value, ScanError> {
    serde_json::from_str(content).map_err(|e| {
        ScanError::new(
            path,
            ScanErrorKind::JsonParseError,
            format!("JSON parse error: {e}"),
        )
    })
}
