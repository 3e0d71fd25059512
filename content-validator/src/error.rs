//! Error types for content validation.

use std::path::PathBuf;

use content_schema::{ErrorKind, FieldError};
use serde::Serialize;

/// The kind of scan-level failure that prevented a file from being validated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The markdown front matter block is malformed or not valid YAML.
    FrontMatterError,
    /// The file content could not be parsed as valid JSON.
    JsonParseError,
    /// The file content could not be parsed as valid YAML.
    YamlParseError,
    /// The file lives in a directory that matches no collection.
    UnknownCollection,
    /// The resolved path is outside the content root (symlink escape).
    OutsideRepository,
    /// A resource limit (`max_files` or `max_total_bytes`) was reached, truncating the scan.
    LimitExceeded,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A scan-level error: a file that could not be validated at all.
///
/// Distinct from [`ValidationError`], which means an entry was read and
/// failed its schema.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The file path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    pub(crate) fn new(file: impl Into<PathBuf>, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [scan error] {}", self.file.display(), self.message)
    }
}

/// A schema violation found in one content entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationError {
    /// File the entry was read from.
    pub file: PathBuf,
    /// Collection directory the entry belongs to.
    pub collection: String,
    /// Offending field path (`title`, `tags[2]`, `$` for the whole record).
    pub field: String,
    /// Error class.
    pub kind: ErrorKind,
    /// Human-readable error description.
    pub error: String,
}

impl ValidationError {
    pub(crate) fn new(
        file: impl Into<PathBuf>,
        collection: &str,
        field: &str,
        kind: ErrorKind,
        error: String,
    ) -> Self {
        Self {
            file: file.into(),
            collection: collection.to_owned(),
            field: field.to_owned(),
            kind,
            error,
        }
    }

    pub(crate) fn from_field_error(
        file: impl Into<PathBuf>,
        collection: &str,
        field_error: FieldError,
    ) -> Self {
        Self {
            file: file.into(),
            collection: collection.to_owned(),
            field: field_error.field,
            kind: field_error.kind,
            error: field_error.message,
        }
    }

    /// Format the error for human-readable output.
    ///
    /// `{file}: [{collection}] {field}: {error} ({kind})`
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!(
            "{}: [{}] {}: {} ({})",
            self.file.display(),
            self.collection,
            self.field,
            self.error,
            self.kind
        )
    }
}
