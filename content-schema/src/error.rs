//! Field-level validation errors.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Coarse classification of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A required field is absent.
    RequiredFieldMissing,
    /// The value is present but has the wrong shape.
    TypeMismatch,
    /// The value is correctly typed but fails a length, format, enum or date rule.
    ConstraintViolation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RequiredFieldMissing => "required field missing",
            Self::TypeMismatch => "type mismatch",
            Self::ConstraintViolation => "constraint violation",
        };
        f.write_str(label)
    }
}

/// JSON shape of a raw value, used in type-mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// JSON `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Integer or float.
    Number,
    /// Text.
    String,
    /// Sequence.
    Array,
    /// Mapping.
    Object,
}

impl ValueKind {
    /// Classify a raw value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(label)
    }
}

/// The rule a field value violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    /// The field must be present.
    Required,
    /// The value must have the `expected` shape.
    Type { expected: ValueKind, found: ValueKind },
    /// The string must contain at least `min` UTF-16 code units.
    MinLength { min: usize, actual: usize },
    /// The string must contain at most `max` UTF-16 code units.
    MaxLength { max: usize, actual: usize },
    /// The string must be one of a closed set of labels.
    OneOf { allowed: &'static [&'static str] },
    /// The string must match a regular expression.
    Pattern { pattern: &'static str },
    /// The string must be an absolute http(s) URL.
    Url,
    /// The string must parse as an ISO 8601 compatible date.
    Date,
}

impl Constraint {
    /// The error class this constraint belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Required => ErrorKind::RequiredFieldMissing,
            Self::Type { .. } => ErrorKind::TypeMismatch,
            Self::MinLength { .. }
            | Self::MaxLength { .. }
            | Self::OneOf { .. }
            | Self::Pattern { .. }
            | Self::Url
            | Self::Date => ErrorKind::ConstraintViolation,
        }
    }

    fn default_message(&self) -> String {
        match self {
            Self::Required => "Required field is missing".to_owned(),
            Self::Type { expected, found } => format!("Expected {expected}, found {found}"),
            Self::MinLength { min, actual } => {
                format!("Must contain at least {min} character(s), found {actual}")
            }
            Self::MaxLength { max, actual } => {
                format!("Must contain at most {max} character(s), found {actual}")
            }
            Self::OneOf { allowed } => {
                let labels: Vec<String> = allowed.iter().map(|l| format!("'{l}'")).collect();
                format!("Must be one of {}", labels.join(", "))
            }
            Self::Pattern { pattern } => format!("Must match pattern {pattern}"),
            Self::Url => "Must be a valid http(s) URL".to_owned(),
            Self::Date => "Must be a valid ISO 8601 date string".to_owned(),
        }
    }
}

/// A single violation found in a raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
#[non_exhaustive]
pub struct FieldError {
    /// Field path: the key name, `key[index]` for sequence elements, or `$` for the record itself.
    pub field: String,
    /// Error class, derived from `constraint`.
    pub kind: ErrorKind,
    /// The violated rule.
    pub constraint: Constraint,
    /// Human-readable description.
    pub message: String,
}

impl FieldError {
    /// Build an error with the constraint's standard message.
    #[must_use]
    pub fn new(field: impl Into<String>, constraint: Constraint) -> Self {
        let message = constraint.default_message();
        Self::with_message(field, constraint, message)
    }

    /// Build an error with a field-specific message.
    #[must_use]
    pub fn with_message(
        field: impl Into<String>,
        constraint: Constraint,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: constraint.kind(),
            constraint,
            message: message.into(),
        }
    }
}

/// Every violation found in one record, in schema declaration order.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("record failed validation with {} error(s): {}", .0.len(), summarize(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Wrap a list of field errors. Returns `None` when the list is empty.
    #[must_use]
    pub fn new(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// All field errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Errors reported for one field path.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.0.iter().filter(move |e| e.field == field)
    }

    /// Consume into the underlying list.
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
