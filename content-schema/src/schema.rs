//! Schema variants and the record validation pass.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{Constraint, FieldError, ValidationErrors, ValueKind};
use crate::record::{Category, Choice, ContentRecord, SustainableFocus};
use crate::rules::{self, TextFormat, TextRule};

/// Fields of the base schema, in declaration order.
pub const BASE_FIELDS: &[&str] = &[
    "title",
    "description",
    "summary",
    "pubdate",
    "slug",
    "author",
    "tags",
    "category",
    "url",
    "notion_page_id",
    "exported_at",
    "featuredImage",
    "seoTitle",
    "seoDescription",
    "featured",
    "sustainableFocus",
    "pledges",
    "organisations",
    "SDGs",
];

/// Fields of the case-study schema: the base fields plus `metrics`.
pub const CASE_STUDY_FIELDS: &[&str] = &[
    "title",
    "description",
    "summary",
    "pubdate",
    "slug",
    "author",
    "tags",
    "category",
    "url",
    "notion_page_id",
    "exported_at",
    "featuredImage",
    "seoTitle",
    "seoDescription",
    "featured",
    "sustainableFocus",
    "pledges",
    "organisations",
    "SDGs",
    "metrics",
];

/// Path used for errors about the record as a whole.
pub const ROOT_FIELD: &str = "$";

/// A field schema that raw records are validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaVariant {
    /// Shared by every registered collection.
    Base,
    /// Base fields plus `metrics`. Not attached to any registered collection.
    CaseStudy,
}

impl SchemaVariant {
    /// Declared field names, in validation order.
    #[must_use]
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Base => BASE_FIELDS,
            Self::CaseStudy => CASE_STUDY_FIELDS,
        }
    }

    /// Keys of `raw` that this schema does not declare and would drop.
    #[must_use]
    pub fn undeclared_keys(self, raw: &Value) -> Vec<String> {
        let Value::Object(map) = raw else {
            return Vec::new();
        };
        let declared = self.fields();
        map.keys()
            .filter(|key| !declared.contains(&key.as_str()))
            .cloned()
            .collect()
    }

    /// Validate a raw record and normalize it.
    ///
    /// Every field is checked; all violations are returned together.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when `raw` is not a mapping, a required
    /// field is missing, or any present field has the wrong type or breaks a
    /// length, format or enum rule.
    pub fn validate(self, raw: &Value) -> Result<ContentRecord, ValidationErrors> {
        let Value::Object(map) = raw else {
            let err = FieldError::new(
                ROOT_FIELD,
                Constraint::Type {
                    expected: ValueKind::Object,
                    found: ValueKind::of(raw),
                },
            );
            return Err(err.into());
        };

        let mut reader = FieldReader::new(map);

        let title = reader.text("title", &rules::TITLE);
        let description = reader.text("description", &rules::DESCRIPTION);
        let summary = reader.text("summary", &rules::SUMMARY);
        let pubdate = reader.text("pubdate", &rules::PUBDATE);
        let slug = reader.text("slug", &rules::SLUG);
        let author = reader.text("author", &rules::AUTHOR);
        let tags = reader.text_list("tags");
        let category = reader.choice::<Category>("category");
        let url = reader.text("url", &rules::URL);
        let notion_page_id = reader.text("notion_page_id", &rules::NOTION_PAGE_ID);
        let exported_at = reader.text("exported_at", &rules::EXPORTED_AT);
        let featured_image = reader.text("featuredImage", &rules::FEATURED_IMAGE);
        let seo_title = reader.text("seoTitle", &rules::SEO_TITLE);
        let seo_description = reader.text("seoDescription", &rules::SEO_DESCRIPTION);
        let featured = reader.flag("featured");
        let sustainable_focus = reader.choice::<SustainableFocus>("sustainableFocus");
        let pledges = reader.text_list("pledges");
        let organisations = reader.text_list("organisations");
        let sdgs = reader.number_list("SDGs");
        let metrics = match self {
            Self::Base => None,
            Self::CaseStudy => Some(reader.text_list("metrics")),
        };

        if let Some(errors) = ValidationErrors::new(reader.errors) {
            return Err(errors);
        }

        // Every defaulted field is populated at this point; `title` is present
        // because a missing or invalid title was reported above.
        Ok(ContentRecord {
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            summary: summary.unwrap_or_default(),
            pubdate,
            slug,
            author: author.unwrap_or_default(),
            tags,
            category,
            url,
            notion_page_id: notion_page_id.unwrap_or_default(),
            exported_at: exported_at.unwrap_or_default(),
            featured_image: featured_image.unwrap_or_default(),
            seo_title: seo_title.unwrap_or_default(),
            seo_description: seo_description.unwrap_or_default(),
            featured,
            sustainable_focus,
            pledges,
            organisations,
            sdgs,
            metrics,
        })
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::CaseStudy => f.write_str("case-study"),
        }
    }
}

/// Reads typed fields out of a raw mapping, accumulating errors instead of
/// stopping at the first one.
struct FieldReader<'a> {
    raw: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a Map<String, Value>) -> Self {
        Self {
            raw,
            errors: Vec::new(),
        }
    }

    fn type_mismatch(&mut self, field: impl Into<String>, expected: ValueKind, found: &Value) {
        self.errors.push(FieldError::new(
            field,
            Constraint::Type {
                expected,
                found: ValueKind::of(found),
            },
        ));
    }

    /// Returns the validated value, the default when absent, or `None` when
    /// absent without a default or invalid.
    fn text(&mut self, name: &'static str, rule: &TextRule) -> Option<String> {
        let value = match self.raw.get(name) {
            None if rule.required => {
                self.errors.push(FieldError::new(name, Constraint::Required));
                return None;
            }
            None => return rule.default.map(ToOwned::to_owned),
            Some(Value::Null) if rule.nullable => return None,
            Some(Value::String(s)) => s,
            Some(other) => {
                self.type_mismatch(name, ValueKind::String, other);
                return None;
            }
        };

        let before = self.errors.len();
        // UTF-16 code units, the unit authoring tools report.
        let length = value.encode_utf16().count();

        if let Some(min) = rule.min_len
            && length < min
        {
            self.errors.push(FieldError::new(
                name,
                Constraint::MinLength {
                    min,
                    actual: length,
                },
            ));
        }

        if let Some(max) = rule.max_len
            && length > max
        {
            self.errors.push(FieldError::new(
                name,
                Constraint::MaxLength {
                    max,
                    actual: length,
                },
            ));
        }

        match rule.format {
            Some(TextFormat::Url) if !rules::is_http_url(value) => {
                self.errors.push(FieldError::new(name, Constraint::Url));
            }
            Some(TextFormat::Date) if !rules::is_date(value) => {
                self.errors.push(FieldError::new(name, Constraint::Date));
            }
            Some(TextFormat::ImageRef) if !rules::is_image_ref(value) => {
                self.errors.push(FieldError::with_message(
                    name,
                    Constraint::Pattern {
                        pattern: rules::IMAGE_REF_PATTERN,
                    },
                    rules::IMAGE_REF_MESSAGE,
                ));
            }
            _ => {}
        }

        (self.errors.len() == before).then(|| value.clone())
    }

    /// Absent means an empty sequence.
    fn text_list(&mut self, name: &'static str) -> Vec<String> {
        let Some(value) = self.raw.get(name) else {
            return Vec::new();
        };
        let Value::Array(items) = value else {
            self.type_mismatch(name, ValueKind::Array, value);
            return Vec::new();
        };

        let mut out = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => self.type_mismatch(format!("{name}[{idx}]"), ValueKind::String, other),
            }
        }
        out
    }

    /// Absent means an empty sequence.
    fn number_list(&mut self, name: &'static str) -> Vec<Number> {
        let Some(value) = self.raw.get(name) else {
            return Vec::new();
        };
        let Value::Array(items) = value else {
            self.type_mismatch(name, ValueKind::Array, value);
            return Vec::new();
        };

        let mut out = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match item {
                Value::Number(n) => out.push(n.clone()),
                other => self.type_mismatch(format!("{name}[{idx}]"), ValueKind::Number, other),
            }
        }
        out
    }

    fn flag(&mut self, name: &'static str) -> Option<bool> {
        match self.raw.get(name)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.type_mismatch(name, ValueKind::Boolean, other);
                None
            }
        }
    }

    fn choice<T: Choice>(&mut self, name: &'static str) -> Option<T> {
        let label = match self.raw.get(name)? {
            Value::String(s) => s,
            other => {
                self.type_mismatch(name, ValueKind::String, other);
                return None;
            }
        };
        let choice = T::from_label(label);
        if choice.is_none() {
            self.errors
                .push(FieldError::new(name, Constraint::OneOf { allowed: T::LABELS }));
        }
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::record::DEFAULT_FEATURED_IMAGE;
    use serde_json::json;

    fn only_error(raw: &Value) -> FieldError {
        let errors = SchemaVariant::Base.validate(raw).unwrap_err();
        assert_eq!(errors.errors().len(), 1, "expected one error, got: {errors:?}");
        errors.into_vec().remove(0)
    }

    #[test]
    fn test_minimal_record_gets_all_defaults() {
        let record = SchemaVariant::Base.validate(&json!({"title": "Launch"})).unwrap();
        assert_eq!(record, ContentRecord::with_defaults("Launch"));
        assert_eq!(record.featured_image, DEFAULT_FEATURED_IMAGE);
        assert_eq!(record.metrics, None);
    }

    #[test]
    fn test_short_title_is_constraint_violation() {
        let err = only_error(&json!({"title": "Go"}));
        assert_eq!(err.field, "title");
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);
        assert_eq!(err.constraint, Constraint::MinLength { min: 4, actual: 2 });
    }

    #[test]
    fn test_missing_title_is_required() {
        let err = only_error(&json!({"description": "No title here"}));
        assert_eq!(err.field, "title");
        assert_eq!(err.kind, ErrorKind::RequiredFieldMissing);
    }

    #[test]
    fn test_null_title_is_type_mismatch_not_missing() {
        let err = only_error(&json!({"title": null}));
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_lengths_count_utf16_units() {
        // Four code units, eight bytes.
        let record = SchemaVariant::Base
            .validate(&json!({"title": "\u{00e9}t\u{00e9}s"}))
            .unwrap();
        assert_eq!(record.title, "\u{00e9}t\u{00e9}s");

        // Two astral-plane characters are four code units.
        let rockets = "\u{1f680}".repeat(2);
        assert!(SchemaVariant::Base.validate(&json!({"title": rockets})).is_ok());

        let err = only_error(&json!({"title": "Launch", "seoTitle": "\u{1f680}".repeat(36)}));
        assert_eq!(err.field, "seoTitle");
        assert_eq!(err.constraint, Constraint::MaxLength { max: 70, actual: 72 });

        let err = only_error(&json!({"title": "\u{1f680}a"}));
        assert_eq!(err.constraint, Constraint::MinLength { min: 4, actual: 3 });
    }

    #[test]
    fn test_pubdate_rules() {
        let err = only_error(&json!({"title": "Launch", "pubdate": "not-a-date"}));
        assert_eq!(err.field, "pubdate");
        assert_eq!(err.constraint, Constraint::Date);

        let record = SchemaVariant::Base
            .validate(&json!({"title": "Launch", "pubdate": "2024-01-01"}))
            .unwrap();
        assert_eq!(record.pubdate.as_deref(), Some("2024-01-01"));

        let record = SchemaVariant::Base
            .validate(&json!({"title": "Launch", "pubdate": ""}))
            .unwrap();
        assert_eq!(record.pubdate.as_deref(), Some(""));

        let err = only_error(&json!({"title": "Launch", "pubdate": "   "}));
        assert_eq!(err.constraint, Constraint::Date, "blank is not an empty date");
    }

    #[test]
    fn test_url_rules() {
        for bad in ["ftp://x", "not a url", "www.example.com"] {
            let err = only_error(&json!({"title": "Launch", "url": bad}));
            assert_eq!(err.field, "url");
            assert_eq!(err.constraint, Constraint::Url, "for {bad}");
        }

        let record = SchemaVariant::Base.validate(&json!({"title": "Launch"})).unwrap();
        assert_eq!(record.url, None);

        let record = SchemaVariant::Base
            .validate(&json!({"title": "Launch", "url": null}))
            .unwrap();
        assert_eq!(record.url, None);

        let record = SchemaVariant::Base
            .validate(&json!({"title": "Launch", "url": "https://example.com/a?b=c"}))
            .unwrap();
        assert_eq!(record.url.as_deref(), Some("https://example.com/a?b=c"));
    }

    #[test]
    fn test_category_rules() {
        let err = only_error(&json!({"title": "Launch", "category": "invalid-label"}));
        assert_eq!(err.field, "category");
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);

        let record = SchemaVariant::Base.validate(&json!({"title": "Launch"})).unwrap();
        assert_eq!(record.category, None);

        let record = SchemaVariant::Base
            .validate(&json!({"title": "Launch", "category": "in space"}))
            .unwrap();
        assert_eq!(record.category, Some(Category::InSpace));
    }

    #[test]
    fn test_featured_image_pattern() {
        let err = only_error(&json!({"title": "Launch", "featuredImage": "images/a.png"}));
        assert_eq!(err.field, "featuredImage");
        assert_eq!(err.message, rules::IMAGE_REF_MESSAGE);

        let record = SchemaVariant::Base
            .validate(&json!({"title": "Launch", "featuredImage": "/img/a.png"}))
            .unwrap();
        assert_eq!(record.featured_image, "/img/a.png");
    }

    #[test]
    fn test_featured_is_tri_state() {
        let unset = SchemaVariant::Base.validate(&json!({"title": "Launch"})).unwrap();
        let off = SchemaVariant::Base
            .validate(&json!({"title": "Launch", "featured": false}))
            .unwrap();
        assert_eq!(unset.featured, None);
        assert_eq!(off.featured, Some(false));
    }

    #[test]
    fn test_sequence_element_errors_name_the_index() {
        let errors = SchemaVariant::Base
            .validate(&json!({"title": "Launch", "tags": ["ok", 3], "SDGs": [7, "13"]}))
            .unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["tags[1]", "SDGs[1]"]);
        assert!(errors.errors().iter().all(|e| e.kind == ErrorKind::TypeMismatch));
    }

    #[test]
    fn test_all_violations_collected_in_declaration_order() {
        let raw = json!({
            "title": "Go",
            "description": "d".repeat(301),
            "tags": "not-a-list",
            "url": "ftp://x",
            "seoTitle": "t".repeat(71),
            "featured": "yes",
            "sustainableFocus": "oceans",
        });
        let errors = SchemaVariant::Base.validate(&raw).unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "title",
                "description",
                "tags",
                "url",
                "seoTitle",
                "featured",
                "sustainableFocus"
            ]
        );
    }

    #[test]
    fn test_non_object_record() {
        let err = only_error(&json!(["title"]));
        assert_eq!(err.field, ROOT_FIELD);
        assert_eq!(
            err.constraint,
            Constraint::Type {
                expected: ValueKind::Object,
                found: ValueKind::Array,
            }
        );
    }

    #[test]
    fn test_undeclared_keys_are_dropped() {
        let raw = json!({"title": "Launch", "layout": "post", "metrics": ["x"]});
        let record = SchemaVariant::Base.validate(&raw).unwrap();
        assert_eq!(record.metrics, None);
        let mut extra = SchemaVariant::Base.undeclared_keys(&raw);
        extra.sort();
        assert_eq!(extra, vec!["layout", "metrics"]);
        assert_eq!(SchemaVariant::CaseStudy.undeclared_keys(&raw), vec!["layout"]);
    }

    #[test]
    fn test_case_study_metrics() {
        let record = SchemaVariant::CaseStudy
            .validate(&json!({"title": "Orbit Labs"}))
            .unwrap();
        assert_eq!(record.metrics, Some(vec![]));

        let record = SchemaVariant::CaseStudy
            .validate(&json!({"title": "Orbit Labs", "metrics": ["40% less fuel"]}))
            .unwrap();
        assert_eq!(record.metrics, Some(vec!["40% less fuel".to_owned()]));

        let errors = SchemaVariant::CaseStudy
            .validate(&json!({"title": "Orbit Labs", "metrics": [1]}))
            .unwrap_err();
        assert_eq!(errors.errors()[0].field, "metrics[0]");
    }

    #[test]
    fn test_field_tables_line_up() {
        assert_eq!(CASE_STUDY_FIELDS.len(), BASE_FIELDS.len() + 1);
        assert_eq!(&CASE_STUDY_FIELDS[..BASE_FIELDS.len()], BASE_FIELDS);
        assert_eq!(CASE_STUDY_FIELDS.last(), Some(&"metrics"));
    }
}
