//! Integration tests for `content_schema::validate`.

use content_schema::{
    Category, Collection, Constraint, ContentRecord, DEFAULT_FEATURED_IMAGE, ErrorKind,
    SchemaVariant, SustainableFocus, validate, validate_named,
};
use serde_json::{Value, json};

fn full_record() -> Value {
    json!({
        "title": "Orbital Recycling Pilot",
        "description": "A pilot programme for in-orbit recycling.",
        "summary": "Short summary.",
        "pubdate": "2024-03-14T09:00:00Z",
        "slug": "orbital-recycling-pilot",
        "author": "Mission Team",
        "tags": ["recycling", "orbit"],
        "category": "in space",
        "url": "https://example.org/orbital-recycling",
        "notion_page_id": "abc123",
        "exported_at": "2024-03-15T10:00:00Z",
        "featuredImage": "https://cdn.example.org/recycling.jpg",
        "seoTitle": "Orbital Recycling Pilot",
        "seoDescription": "How we recycle in orbit.",
        "featured": true,
        "sustainableFocus": "space-debris",
        "pledges": ["zero-debris"],
        "organisations": ["Orbit Labs"],
        "SDGs": [9, 12, 13.5],
        "layout": "../layouts/Post.astro"
    })
}

#[test]
fn test_minimal_record_equals_defaults_plus_title() {
    let record = validate(Collection::Blog, &json!({"title": "Launch"})).unwrap();
    assert_eq!(record, ContentRecord::with_defaults("Launch"));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        json!({
            "title": "Launch",
            "description": "",
            "summary": "",
            "author": "",
            "tags": [],
            "notion_page_id": "",
            "exported_at": "",
            "featuredImage": DEFAULT_FEATURED_IMAGE,
            "seoTitle": "",
            "seoDescription": "",
            "pledges": [],
            "organisations": [],
            "SDGs": []
        })
    );
}

#[test]
fn test_full_record_is_preserved() {
    let record = validate(Collection::Resources, &full_record()).unwrap();
    assert_eq!(record.title, "Orbital Recycling Pilot");
    assert_eq!(record.pubdate.as_deref(), Some("2024-03-14T09:00:00Z"));
    assert_eq!(record.category, Some(Category::InSpace));
    assert_eq!(record.sustainable_focus, Some(SustainableFocus::SpaceDebris));
    assert_eq!(record.featured, Some(true));
    assert_eq!(record.sdgs.len(), 3);
    assert_eq!(record.tags, vec!["recycling", "orbit"]);
}

#[test]
fn test_short_title_fails() {
    let errors = validate(Collection::News, &json!({"title": "Go"})).unwrap_err();
    let err = &errors.errors()[0];
    assert_eq!(err.field, "title");
    assert_eq!(err.kind, ErrorKind::ConstraintViolation);
}

#[test]
fn test_pubdate_validation() {
    assert!(validate(Collection::Blog, &json!({"title": "Launch", "pubdate": "not-a-date"})).is_err());

    let record =
        validate(Collection::Blog, &json!({"title": "Launch", "pubdate": "2024-01-01"})).unwrap();
    assert_eq!(record.pubdate.as_deref(), Some("2024-01-01"));
}

#[test]
fn test_featured_image_fallback() {
    let record = validate(Collection::Tools, &json!({"title": "Launch"})).unwrap();
    assert_eq!(record.featured_image, "/images/default-featured.jpg");
}

#[test]
fn test_url_validation() {
    for bad in ["ftp://x", "just words"] {
        let errors =
            validate(Collection::Insights, &json!({"title": "Launch", "url": bad})).unwrap_err();
        assert_eq!(errors.errors()[0].field, "url", "for {bad}");
        assert_eq!(errors.errors()[0].constraint, Constraint::Url);
    }

    let record = validate(Collection::Insights, &json!({"title": "Launch"})).unwrap();
    assert!(record.url.is_none(), "omitted url must not be defaulted");
}

#[test]
fn test_category_validation() {
    let errors = validate(
        Collection::Campaigns,
        &json!({"title": "Launch", "category": "invalid-label"}),
    )
    .unwrap_err();
    assert_eq!(errors.errors()[0].kind, ErrorKind::ConstraintViolation);

    let record = validate(Collection::Campaigns, &json!({"title": "Launch"})).unwrap();
    assert!(record.category.is_none());
    let json = serde_json::to_value(&record).unwrap();
    assert!(json.get("category").is_none(), "no category key expected: {json}");
}

#[test]
fn test_revalidating_output_is_idempotent() {
    for (variant, raw) in [
        (SchemaVariant::Base, json!({"title": "Launch"})),
        (SchemaVariant::Base, full_record()),
        (SchemaVariant::Base, json!({"title": "Launch", "url": null, "featured": false})),
        (SchemaVariant::CaseStudy, full_record()),
        (
            SchemaVariant::CaseStudy,
            json!({"title": "Orbit Labs", "metrics": ["3x throughput"]}),
        ),
    ] {
        let first = variant.validate(&raw).unwrap();
        let serialized = serde_json::to_value(&first).unwrap();
        let second = variant.validate(&serialized).unwrap();
        assert_eq!(first, second, "validation is not idempotent for {raw}");
        assert_eq!(serde_json::to_value(&second).unwrap(), serialized);
    }
}

#[test]
fn test_serialized_record_deserializes_back() {
    let record = validate(Collection::Team, &full_record()).unwrap();
    let json = serde_json::to_string(&record).unwrap();
    let parsed: ContentRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn test_errors_are_aggregated() {
    let errors = validate(
        Collection::Values,
        &json!({
            "summary": 42,
            "pubdate": "someday",
            "featuredImage": "cover.png",
            "seoDescription": "x".repeat(161),
            "SDGs": "13",
        }),
    )
    .unwrap_err();

    let kinds: Vec<(&str, ErrorKind)> = errors
        .errors()
        .iter()
        .map(|e| (e.field.as_str(), e.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("title", ErrorKind::RequiredFieldMissing),
            ("summary", ErrorKind::TypeMismatch),
            ("pubdate", ErrorKind::ConstraintViolation),
            ("featuredImage", ErrorKind::ConstraintViolation),
            ("seoDescription", ErrorKind::ConstraintViolation),
            ("SDGs", ErrorKind::TypeMismatch),
        ]
    );
}

#[test]
fn test_case_study_schema_is_separately_invocable() {
    let raw = json!({"title": "Orbit Labs", "metrics": ["40% less fuel"]});

    let base = validate(Collection::Organisations, &raw).unwrap();
    assert_eq!(base.metrics, None, "registered collections drop metrics");

    let case_study = SchemaVariant::CaseStudy.validate(&raw).unwrap();
    assert_eq!(case_study.metrics, Some(vec!["40% less fuel".to_owned()]));
}

#[test]
fn test_validate_named() {
    let record = validate_named("press-releases", &json!({"title": "Launch"}))
        .unwrap()
        .unwrap();
    assert_eq!(record.title, "Launch");

    let unknown = validate_named("case-studies", &json!({"title": "Launch"}));
    assert!(unknown.is_err());
}

#[test]
fn test_validation_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentRecord>();
    assert_send_sync::<content_schema::ValidationErrors>();

    let handles: Vec<_> = Collection::ALL
        .into_iter()
        .map(|collection| {
            std::thread::spawn(move || {
                validate(collection, &json!({"title": collection.as_str().repeat(4)}))
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}
