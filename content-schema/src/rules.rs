//! Per-field rule table and the format checks it refers to.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use url::Url;

use crate::record::DEFAULT_FEATURED_IMAGE;

/// Value format a string field must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// Absolute `http`/`https` URL with a host.
    Url,
    /// ISO 8601 compatible date; the empty string means "no date".
    Date,
    /// Absolute URL or site-rooted path.
    ImageRef,
}

/// Constraints and default for a single string field.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub format: Option<TextFormat>,
    pub default: Option<&'static str>,
    pub required: bool,
    /// `null` is accepted and treated as absent.
    pub nullable: bool,
}

impl TextRule {
    const fn new() -> Self {
        Self {
            min_len: None,
            max_len: None,
            format: None,
            default: None,
            required: false,
            nullable: false,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn min(mut self, len: usize) -> Self {
        self.min_len = Some(len);
        self
    }

    const fn max(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    const fn format(mut self, format: TextFormat) -> Self {
        self.format = Some(format);
        self
    }

    const fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

pub const TITLE: TextRule = TextRule::new().required().min(4);
pub const DESCRIPTION: TextRule = TextRule::new().max(300).default("");
pub const SUMMARY: TextRule = TextRule::new().max(300).default("");
pub const PUBDATE: TextRule = TextRule::new().format(TextFormat::Date);
pub const SLUG: TextRule = TextRule::new();
pub const AUTHOR: TextRule = TextRule::new().default("");
pub const URL: TextRule = TextRule::new().format(TextFormat::Url).nullable();
pub const NOTION_PAGE_ID: TextRule = TextRule::new().default("");
pub const EXPORTED_AT: TextRule = TextRule::new().default("");
pub const FEATURED_IMAGE: TextRule = TextRule::new()
    .format(TextFormat::ImageRef)
    .default(DEFAULT_FEATURED_IMAGE);
pub const SEO_TITLE: TextRule = TextRule::new().max(70).default("");
pub const SEO_DESCRIPTION: TextRule = TextRule::new().max(160).default("");

pub const IMAGE_REF_PATTERN: &str = r"^(https?://|/)";
pub const IMAGE_REF_MESSAGE: &str = "featuredImage must be a full URL or start with /";

static IMAGE_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| match Regex::new(IMAGE_REF_PATTERN) {
    Ok(regex) => regex,
    Err(err) => panic!("Invalid image reference regex: {err}"),
});

/// Partial calendar dates (`YYYY` or `YYYY-MM`) that full-date parsers reject.
static PARTIAL_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^(\d{4})(?:-(\d{2}))?$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid partial date regex: {err}"),
    });

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn is_image_ref(value: &str) -> bool {
    IMAGE_REF_REGEX.is_match(value)
}

pub fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Accepts RFC 3339, RFC 2822, calendar dates, local date-times and partial dates.
/// Only the literal empty string is accepted as "no date"; blank input is not.
pub fn is_date(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    if DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
    {
        return true;
    }

    if NAIVE_DATE_TIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
    {
        return true;
    }

    PARTIAL_DATE_REGEX.captures(value).is_some_and(|caps| {
        let month = caps.get(2).map_or("01", |m| m.as_str());
        NaiveDate::parse_from_str(&format!("{}-{month}-01", &caps[1]), "%Y-%m-%d").is_ok()
    })
}
