//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport` and a JSON
//! writer for exported entries. Color/terminal formatting belongs to the CLI.

use std::collections::BTreeMap;
use std::io::Write;

use content_schema::ErrorKind;

use crate::report::{ContentEntry, ValidationReport};

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write normalized entries as a pretty JSON array.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_entries_json(entries: &[ContentEntry], writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  CONTENT COLLECTION VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files scanned:  {}", report.scanned_files)?;
    writeln!(writer, "  Files failed:   {}", report.failed_files)?;
    writeln!(writer, "  Valid entries:  {}", report.valid_entries)?;
    writeln!(writer, "  Errors found:   {}", report.errors_count())?;
    writeln!(writer)?;

    if !report.scan_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  SCAN ERRORS (files that could not be validated)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for scan_err in &report.scan_errors {
            writeln!(writer, "{}", scan_err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.validation_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  VALIDATION ERRORS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for error in &report.validation_errors {
            writeln!(writer, "{}", error.format_human_readable())?;
        }
        writeln!(writer)?;

        let mut by_collection: BTreeMap<&str, usize> = BTreeMap::new();
        for error in &report.validation_errors {
            *by_collection.entry(error.collection.as_str()).or_default() += 1;
        }
        writeln!(writer, "  Errors by collection:")?;
        for (collection, count) in by_collection {
            writeln!(writer, "    {collection:<20} {count}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} entries passed validation",
            report.scanned_files
        )?;
    } else {
        write_failure_hints(report, writer)?;
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

fn write_failure_hints(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    if !report.scan_errors.is_empty() {
        writeln!(
            writer,
            "\u{2717} {} file(s) could not be scanned; CI must treat this as a failure",
            report.failed_files
        )?;
    }
    if report.validation_errors.is_empty() {
        return Ok(());
    }

    writeln!(
        writer,
        "\u{2717} {} field error(s) in {} entr(y/ies)",
        report.errors_count(),
        report.invalid_entries()
    )?;
    writeln!(writer)?;
    writeln!(writer, "  To fix:")?;

    let has_kind = |kind: ErrorKind| report.validation_errors.iter().any(|e| e.kind == kind);

    if has_kind(ErrorKind::RequiredFieldMissing) {
        writeln!(writer, "    - Every entry needs a title of at least 4 characters")?;
    }
    if has_kind(ErrorKind::TypeMismatch) {
        writeln!(
            writer,
            "    - Quote string values and use YAML lists for tags, pledges, organisations and SDGs"
        )?;
    }
    if has_kind(ErrorKind::ConstraintViolation) {
        writeln!(
            writer,
            "    - Dates must be ISO 8601 (e.g., 2024-01-31), URLs must be absolute http(s)"
        )?;
        writeln!(
            writer,
            "    - featuredImage must be a full URL or a path starting with /"
        )?;
    }

    Ok(())
}
