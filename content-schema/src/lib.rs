//! # content-schema
//!
//! Schema validation for static-site content collections.
//!
//! Each content entry arrives as an untyped mapping (usually parsed front
//! matter). [`validate`] checks it against the schema of its collection and
//! returns either a normalized [`ContentRecord`] with every declared default
//! applied, or every violation found in one pass.
//!
//! Validation is a pure function: no I/O, no logging, no shared state beyond
//! the static rule table.
//!
//! ## Quick Start
//!
//! ```rust
//! use content_schema::{Collection, ErrorKind, validate};
//! use serde_json::json;
//!
//! let record = validate(Collection::Blog, &json!({"title": "Launch"})).unwrap();
//! assert_eq!(record.featured_image, "/images/default-featured.jpg");
//!
//! let errors = validate(Collection::News, &json!({"title": "Go"})).unwrap_err();
//! assert_eq!(errors.errors()[0].kind, ErrorKind::ConstraintViolation);
//! ```

mod collection;
mod error;
mod record;
mod rules;
mod schema;
pub mod slug;

pub use collection::{Collection, UnknownCollection};
pub use error::{Constraint, ErrorKind, FieldError, ValidationErrors, ValueKind};
pub use record::{Category, Choice, ContentRecord, DEFAULT_FEATURED_IMAGE, SustainableFocus};
pub use schema::{BASE_FIELDS, CASE_STUDY_FIELDS, ROOT_FIELD, SchemaVariant};

use serde_json::Value;

/// Validate a raw entry against the schema of `collection`.
///
/// # Errors
///
/// Returns every field violation found in `raw`. See [`SchemaVariant::validate`].
pub fn validate(collection: Collection, raw: &Value) -> Result<ContentRecord, ValidationErrors> {
    collection.schema().validate(raw)
}

/// Look up a collection by name and validate a raw entry against its schema.
///
/// # Errors
///
/// Returns [`UnknownCollection`] wrapped in the outer `Err` if `name` is not
/// registered. Field violations are returned in the inner `Result`.
pub fn validate_named(
    name: &str,
    raw: &Value,
) -> Result<Result<ContentRecord, ValidationErrors>, UnknownCollection> {
    let collection: Collection = name.parse()?;
    Ok(validate(collection, raw))
}
