/*!
 * Frontmatter parsing and formatting.
 *
 * Only the narrow `key: value` dialect used by the post corpus is understood:
 * one field per line, optional single or double quotes around the value.
 * Anything else inside the block is skipped rather than reported.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Leading `---` delimited block, capturing the interior lines.
static FRONTMATTER_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A---\r?\n((?s).*?)\r?\n---(?:\r?\n)?").unwrap()
});

/// Ordered `key: value` record parsed from a frontmatter block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert a value, replacing an existing key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Frontmatter::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Split a document into its frontmatter interior and the remaining text.
///
/// Returns `None` when the document does not start with a frontmatter block.
pub fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let captures = FRONTMATTER_BLOCK.captures(text)?;
    let whole = captures.get(0)?;
    let body = captures.get(1)?;
    Some((body.as_str(), &text[whole.end()..]))
}

/// Parse the leading frontmatter block of a document.
///
/// Documents without a block yield an empty record.
pub fn parse_frontmatter(text: &str) -> Frontmatter {
    match split_frontmatter(text) {
        Some((body, _)) => parse_frontmatter_body(body),
        None => Frontmatter::new(),
    }
}

/// Parse the interior lines of a frontmatter block
pub fn parse_frontmatter_body(body: &str) -> Frontmatter {
    let mut record = Frontmatter::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        record.insert(key, strip_matching_quotes(value.trim()));
    }

    record
}

/// Render a record as a `---` delimited block followed by a blank line.
///
/// Values are always double quoted. An empty record renders as nothing.
pub fn format_frontmatter(record: &Frontmatter) -> String {
    if record.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = record
        .iter()
        .map(|(key, value)| format!("{}: {}", key, quote_value(value)))
        .collect();

    format!("---\n{}\n---\n\n", lines.join("\n"))
}

fn quote_value(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// Strip one layer of matching quotes, undoing `quote_value` for double quotes
fn strip_matching_quotes(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last {
            let interior = &value[1..value.len() - 1];
            match first {
                b'"' if interior.contains("\\\"") => return Cow::Owned(interior.replace("\\\"", "\"")),
                b'"' | b'\'' => return Cow::Borrowed(interior),
                _ => {}
            }
        }
    }
    Cow::Borrowed(value)
}
