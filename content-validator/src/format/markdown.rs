//! Markdown front matter extraction.
//!
//! An entry's record is the YAML block between a leading `---` line and the
//! next `---` line. A file without that block has an empty record.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ScanError, ScanErrorKind};
use crate::format::yaml::parse_yaml_value;

const FENCE: &str = "---";

/// A split markdown document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Raw YAML between the fences.
    pub yaml: &'a str,
    /// Everything after the closing fence.
    pub body: &'a str,
}

/// Split `content` into front matter and body.
///
/// Returns `Ok(None)` when the document does not open with a `---` line.
///
/// # Errors
///
/// Returns a message if the opening fence is never closed.
pub fn split_front_matter(content: &str) -> Result<Option<FrontMatter<'_>>, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if first.trim_end() != FENCE {
        return Ok(None);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FENCE {
            return Ok(Some(FrontMatter {
                yaml: &content[start..offset],
                body: &content[offset + line.len()..],
            }));
        }
        offset += line.len();
    }

    Err(format!("Front matter opened with '{FENCE}' is never closed"))
}

/// Extract the raw record from markdown content.
///
/// # Errors
///
/// Returns a `FrontMatterError` scan error if the block is unterminated or
/// not valid YAML.
pub fn extract_markdown_record(content: &str, path: &Path) -> Result<Value, ScanError> {
    let front_matter = split_front_matter(content)
        .map_err(|message| ScanError::new(path, ScanErrorKind::FrontMatterError, message))?;

    let Some(front_matter) = front_matter else {
        return Ok(Value::Object(Map::new()));
    };
    if front_matter.yaml.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match parse_yaml_value(front_matter.yaml) {
        Ok(Value::Null) => Ok(Value::Object(Map::new())),
        Ok(value) => Ok(value),
        Err(e) => Err(ScanError::new(
            path,
            ScanErrorKind::FrontMatterError,
            format!("Invalid YAML in front matter: {e}"),
        )),
    }
}
