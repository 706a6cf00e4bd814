/*!
 * Post metadata extraction.
 *
 * A post can describe itself in two places: the frontmatter block and an
 * embedded `export const metadata = { ... }` literal. Both are read, the
 * literal wins field by field, and anything that fails to parse simply
 * counts as absent.
 */

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::frontmatter::{Frontmatter, parse_frontmatter};
use super::literal::parse_literal;
use super::scanner::find_object_literal;

/// Declaration that introduces the embedded metadata literal
pub const METADATA_MARKER: &str = "export const metadata";

/// Keys holding the original-language title, in lookup order
pub const LOCALIZED_TITLE_KEYS: &[&str] = &["localizedTitle", "zhTitle"];

/// Metadata recovered from a single document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub title: Option<String>,
    pub localized_title: Option<String>,
    pub published_at: Option<String>,
}

impl ExtractedMetadata {
    /// Fill fields missing here from `fallback`
    fn or(self, fallback: ExtractedMetadata) -> ExtractedMetadata {
        ExtractedMetadata {
            title: self.title.or(fallback.title),
            localized_title: self.localized_title.or(fallback.localized_title),
            published_at: self.published_at.or(fallback.published_at),
        }
    }
}

/// Listing entry derived from a document that has a title and a valid date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMetadata {
    /// Slug directory name
    pub id: String,
    pub title: String,
    pub localized_title: String,
    /// Human readable date, e.g. "January 5, 2024"
    pub date: String,
    #[serde(skip)]
    pub published_at: NaiveDateTime,
}

impl PostMetadata {
    /// Build a listing entry, or `None` when the title or date is unusable
    pub fn from_document(id: &str, document_text: &str) -> Option<Self> {
        let extracted = extract_post_metadata(document_text);

        let title = extracted.title.filter(|t| !t.is_empty())?;
        let raw_date = extracted.published_at?;
        let Some(published_at) = parse_published_at(&raw_date) else {
            debug!("Skipping post '{}': unparsable date '{}'", id, raw_date);
            return None;
        };

        Some(Self {
            id: id.to_string(),
            localized_title: extracted.localized_title.unwrap_or_else(|| title.clone()),
            title,
            date: format_post_date(&published_at),
            published_at,
        })
    }
}

/// Extract title, localized title and publish date from a document.
///
/// Never fails: missing or malformed sources leave fields as `None`.
pub fn extract_post_metadata(document_text: &str) -> ExtractedMetadata {
    let from_literal = extract_from_literal(document_text);
    let from_frontmatter = extract_from_frontmatter(&parse_frontmatter(document_text));

    let mut merged = from_literal.or(from_frontmatter);
    if merged.localized_title.is_none() {
        merged.localized_title = merged.title.clone();
    }
    merged
}

/// Locate and safely parse the embedded metadata literal, if any
pub fn find_metadata_literal(document_text: &str) -> Option<Value> {
    let index = document_text.find(METADATA_MARKER)?;
    let literal = find_object_literal(document_text, index)?;

    match parse_literal(literal) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => None,
        Err(e) => {
            debug!("Ignoring unparsable metadata literal: {}", e);
            None
        }
    }
}

/// Normalize a `title` that is either a string or `{ default: "..." }`
pub fn title_value(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("default").and_then(Value::as_str),
        _ => None,
    }
}

/// First string value among the localized-title keys of a literal
pub fn literal_localized_title(record: &Value) -> Option<&str> {
    LOCALIZED_TITLE_KEYS
        .iter()
        .find_map(|key| record.get(key).and_then(Value::as_str))
}

/// First value among the localized-title keys of a frontmatter record
pub fn frontmatter_localized_title(record: &Frontmatter) -> Option<&str> {
    LOCALIZED_TITLE_KEYS.iter().find_map(|key| record.get(key))
}

fn extract_from_literal(document_text: &str) -> ExtractedMetadata {
    let Some(record) = find_metadata_literal(document_text) else {
        return ExtractedMetadata::default();
    };

    ExtractedMetadata {
        title: record.get("title").and_then(title_value).map(str::to_string),
        localized_title: literal_localized_title(&record).map(str::to_string),
        published_at: record
            .get("publishedAt")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn extract_from_frontmatter(record: &Frontmatter) -> ExtractedMetadata {
    ExtractedMetadata {
        title: record.get("title").map(str::to_string),
        localized_title: frontmatter_localized_title(record).map(str::to_string),
        published_at: record.get("publishedAt").map(str::to_string),
    }
}

/// Parse the date formats found in post metadata
pub fn parse_published_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Render a date the way the post list shows it ("January 5, 2024")
pub fn format_post_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}
