//! Validation report types.

use std::path::PathBuf;

use content_schema::{ContentRecord, SchemaVariant};
use serde::Serialize;

use crate::error::{ScanError, ValidationError};

/// Result of a validation run.
///
/// CI pipelines must check both `validation_errors` and `scan_errors`.
/// A non-empty `scan_errors` means some files were never validated.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of files successfully read and parsed.
    pub scanned_files: usize,
    /// Number of files that could not be scanned (read/parse failures).
    pub failed_files: usize,
    /// Number of entries that passed their schema.
    pub valid_entries: usize,
    /// Whether every scanned entry passed AND no scan errors occurred.
    pub ok: bool,
    /// Schema violations found in scanned entries.
    pub validation_errors: Vec<ValidationError>,
    /// Files that could not be read or parsed.
    pub scan_errors: Vec<ScanError>,
}

impl ValidationReport {
    /// Total number of files attempted (scanned + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.scanned_files + self.failed_files
    }

    /// Number of validation errors found.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.validation_errors.len()
    }

    /// Number of entries that failed their schema.
    #[must_use]
    pub fn invalid_entries(&self) -> usize {
        self.scanned_files.saturating_sub(self.valid_entries)
    }
}

/// A normalized entry ready for the rendering pipeline.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ContentEntry {
    /// Collection directory name.
    pub collection: String,
    /// Schema the entry was validated with.
    pub schema: SchemaVariant,
    /// Entry id: the record slug if set, otherwise derived from the file path.
    pub id: String,
    /// Source file.
    pub file: PathBuf,
    /// Validated record.
    pub record: ContentRecord,
}

/// Report plus every entry that passed validation.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct LoadedContent {
    pub report: ValidationReport,
    pub entries: Vec<ContentEntry>,
}

impl LoadedContent {
    /// Entries of one collection, in discovery order.
    pub fn collection<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ContentEntry> + 'a {
        self.entries.iter().filter(move |e| e.collection == name)
    }
}
