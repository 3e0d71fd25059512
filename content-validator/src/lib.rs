//! # content-validator
//!
//! Validates static-site content collections on disk.
//!
//! The crate separates the **schema core** (`content-schema`, pure record
//! validation) from the **filesystem source** that discovers entries, pulls
//! their records out of front matter or data files, and routes each one to
//! its collection's schema.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use content_validator::{ContentSourceConfig, ValidationConfig, validate_fs};
//!
//! let mut source = ContentSourceConfig::default();
//! source.paths = vec![PathBuf::from("src/content")];
//! source.exclude = vec!["drafts/*".to_owned()];
//!
//! let mut config = ValidationConfig::default();
//! config.case_study_collections = vec!["case-studies".to_owned()];
//!
//! let report = validate_fs(&source, &config).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("Validation errors: {}", report.errors_count());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
mod format;
pub mod output;
mod report;
mod strategy;

pub use config::{ContentSourceConfig, UnknownCollectionPolicy, ValidationConfig};
pub use error::{ScanError, ScanErrorKind, ValidationError};
pub use format::markdown::{FrontMatter, split_front_matter};
pub use report::{ContentEntry, LoadedContent, ValidationReport};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use content_schema::slug::{is_slug, slugify};
use content_schema::{ErrorKind, SchemaVariant};
use serde_json::Value;
use tracing::{debug, info, warn};

use strategy::fs::{
    ContentFile, EntryLocation, ScanResult, content_format_for, find_files, locate_entry,
    read_file_bounded,
};

/// Validate every content entry found on disk.
///
/// # Errors
///
/// Returns an error if `source.paths` is empty or if any provided path does
/// not exist. Per-file failures are reported in `report.scan_errors` and
/// never silently discarded.
pub fn validate_fs(
    source: &ContentSourceConfig,
    config: &ValidationConfig,
) -> anyhow::Result<ValidationReport> {
    Ok(scan(source, config, false)?.report)
}

/// Validate every content entry found on disk and keep the normalized records.
///
/// # Errors
///
/// Same conditions as [`validate_fs`].
pub fn load_fs(
    source: &ContentSourceConfig,
    config: &ValidationConfig,
) -> anyhow::Result<LoadedContent> {
    scan(source, config, true)
}

/// Running totals for one scan.
#[derive(Default)]
struct ScanState {
    scanned_files: usize,
    failed_files: usize,
    total_bytes: u64,
    validation_errors: Vec<ValidationError>,
    scan_errors: Vec<ScanError>,
    entries: Vec<ContentEntry>,
    valid_entries: usize,
    /// First file that claimed each `(collection, id)`.
    ids: HashMap<(String, String), PathBuf>,
}

impl ScanState {
    fn fail(&mut self, error: ScanError) {
        self.scan_errors.push(error);
        self.failed_files += 1;
    }
}

fn scan(
    source: &ContentSourceConfig,
    config: &ValidationConfig,
    collect: bool,
) -> anyhow::Result<LoadedContent> {
    if source.paths.is_empty() {
        anyhow::bail!("No paths provided for validation");
    }

    for path in &source.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let (files, discovery_errors) = find_files(source);
    debug!(files = files.len(), "discovered content files");

    let mut state = ScanState {
        // Discovery-stage failures count as failed files upfront.
        failed_files: discovery_errors.len(),
        scan_errors: discovery_errors,
        ..ScanState::default()
    };

    for file in &files {
        if state.scanned_files + state.failed_files >= source.max_files {
            state.fail(ScanError::new(
                file.path.clone(),
                ScanErrorKind::LimitExceeded,
                format!(
                    "Scan aborted: max_files limit ({}) reached; remaining files not scanned",
                    source.max_files
                ),
            ));
            break;
        }

        if !process_file(file, source, config, collect, &mut state) {
            break;
        }
    }

    let ok = state.validation_errors.is_empty() && state.scan_errors.is_empty();
    info!(
        scanned = state.scanned_files,
        failed = state.failed_files,
        valid = state.valid_entries,
        errors = state.validation_errors.len(),
        "content validation finished"
    );

    Ok(LoadedContent {
        report: ValidationReport {
            scanned_files: state.scanned_files,
            failed_files: state.failed_files,
            valid_entries: state.valid_entries,
            ok,
            validation_errors: state.validation_errors,
            scan_errors: state.scan_errors,
        },
        entries: state.entries,
    })
}

/// Validate one file into `state`. Returns `false` when the scan must stop.
fn process_file(
    file: &ContentFile,
    source: &ContentSourceConfig,
    config: &ValidationConfig,
    collect: bool,
    state: &mut ScanState,
) -> bool {
    let path = file.path.as_path();
    let Some(content_format) = content_format_for(path) else {
        return true;
    };

    let location = locate_entry(file, |name| config.schema_for(name).is_some());
    let Some(schema) = config.schema_for(&location.collection) else {
        match config.unknown_collection {
            UnknownCollectionPolicy::Skip => {
                warn!(
                    file = %path.display(),
                    collection = %location.collection,
                    "skipping entry outside any known collection"
                );
            }
            UnknownCollectionPolicy::Error => state.fail(ScanError::new(
                path,
                ScanErrorKind::UnknownCollection,
                format!("'{}' is not a known content collection", location.collection),
            )),
        }
        return true;
    };

    let content = match read_file_bounded(path, source.max_file_size) {
        ScanResult::Ok(c) => c,
        ScanResult::Err(e) => {
            state.fail(e);
            return true;
        }
    };

    let file_bytes = content.len() as u64;
    if state.total_bytes.saturating_add(file_bytes) > source.max_total_bytes {
        state.fail(ScanError::new(
            path,
            ScanErrorKind::LimitExceeded,
            format!(
                "Scan aborted: max_total_bytes limit ({}) reached; remaining files not scanned",
                source.max_total_bytes
            ),
        ));
        return false;
    }
    state.total_bytes = state.total_bytes.saturating_add(file_bytes);

    let raw = match format::extract_record(content_format, &content, path) {
        Ok(raw) => raw,
        Err(e) => {
            state.fail(e);
            return true;
        }
    };
    state.scanned_files += 1;

    validate_entry(file, location, schema, &raw, collect, state);
    true
}

fn validate_entry(
    file: &ContentFile,
    location: EntryLocation,
    schema: SchemaVariant,
    raw: &Value,
    collect: bool,
    state: &mut ScanState,
) {
    let path = file.path.as_path();

    let dropped = schema.undeclared_keys(raw);
    if !dropped.is_empty() {
        debug!(file = %path.display(), keys = ?dropped, "ignoring undeclared fields");
    }

    let record = match schema.validate(raw) {
        Ok(record) => record,
        Err(errors) => {
            debug!(file = %path.display(), errors = errors.errors().len(), "entry is invalid");
            state.validation_errors.extend(errors.into_iter().map(|e| {
                ValidationError::from_field_error(path, &location.collection, e)
            }));
            return;
        }
    };

    if let Some(slug) = &record.slug
        && !is_slug(slug)
    {
        warn!(file = %path.display(), slug = %slug, "slug is not lowercase kebab-case");
    }

    let id = record
        .slug
        .clone()
        .unwrap_or_else(|| entry_id(&location.relative));
    if let Some(error) = claim_id(state, path, &location.collection, &id) {
        state.validation_errors.push(error);
        return;
    }

    debug!(file = %path.display(), collection = %location.collection, id = %id, "entry is valid");
    state.valid_entries += 1;
    if collect {
        state.entries.push(ContentEntry {
            collection: location.collection,
            schema,
            id,
            file: file.path.clone(),
            record,
        });
    }
}

/// Register `id` for `path`, or describe why it cannot be used.
fn claim_id(
    state: &mut ScanState,
    path: &Path,
    collection: &str,
    id: &str,
) -> Option<ValidationError> {
    if id.is_empty() {
        return Some(ValidationError::new(
            path,
            collection,
            "slug",
            ErrorKind::ConstraintViolation,
            "Entry id is empty; set a slug or rename the file".to_owned(),
        ));
    }

    let key = (collection.to_owned(), id.to_owned());
    if let Some(owner) = state.ids.get(&key) {
        return Some(ValidationError::new(
            path,
            collection,
            "slug",
            ErrorKind::ConstraintViolation,
            format!("Entry id '{id}' is already used by {}", owner.display()),
        ));
    }
    state.ids.insert(key, path.to_path_buf());
    None
}

/// Entry id derived from its path inside the collection directory: each
/// component slugified, extension dropped, joined with `/`.
fn entry_id(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    without_ext
        .components()
        .map(|c| slugify(&c.as_os_str().to_string_lossy()))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_from_relative_path() {
        assert_eq!(entry_id(Path::new("Launch Day.md")), "launch-day");
        assert_eq!(
            entry_id(&PathBuf::from("2024").join("Q1 Review.mdx")),
            "2024/q1-review"
        );
        assert_eq!(entry_id(Path::new("values.json")), "values");
        assert_eq!(entry_id(Path::new("\u{65e5}\u{672c}.md")), "\u{65e5}\u{672c}");
        assert_eq!(entry_id(Path::new("!!!.md")), "");
    }
}
