/*!
 * Whole-document translation of a post.
 *
 * A post is translated in three independent stages that are concatenated
 * back together:
 * - the frontmatter block, where only an allow-list of keys is translated
 * - the `export const metadata` literal, parsed as data and re-serialized
 * - the body, line by line, leaving code, markup, tables and links intact
 *
 * The original-language title is always preserved under the source-title
 * key so listings can still show it.
 */

use futures::stream::{self, StreamExt};
use log::debug;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::document::body::{LineAction, classify_body};
use crate::document::frontmatter::{Frontmatter, format_frontmatter, parse_frontmatter_body, split_frontmatter};
use crate::document::literal::{parse_literal, to_object_literal};
use crate::document::metadata::{LOCALIZED_TITLE_KEYS, title_value};

use super::Translator;

pub mod assembly;

pub use self::assembly::{MetadataSplit, assemble_document, split_metadata_block};

/// Frontmatter keys whose values are natural language
pub const FRONTMATTER_TRANSLATABLE_KEYS: &[&str] = &["title", "description", "summary", "excerpt", "subtitle"];

/// Metadata literal keys translated besides `title`
pub const METADATA_TRANSLATABLE_KEYS: &[&str] = &["description", "summary"];

/// Titles carried from the frontmatter stage to the metadata stage
#[derive(Debug, Default, Clone)]
struct TitleContext {
    source_title: Option<String>,
    translated_title: Option<String>,
}

/// Translates complete post documents through an injected `Translator`
#[derive(Clone)]
pub struct DocumentTranslator {
    translator: Arc<dyn Translator>,
    /// `None` lets the provider detect the language
    source_language: Option<String>,
    source_title_key: String,
    max_concurrent_requests: usize,
}

impl DocumentTranslator {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            source_language: None,
            source_title_key: LOCALIZED_TITLE_KEYS[0].to_string(),
            max_concurrent_requests: 4,
        }
    }

    pub fn with_source_language(mut self, source_language: Option<String>) -> Self {
        self.source_language = source_language;
        self
    }

    pub fn with_source_title_key(mut self, key: impl Into<String>) -> Self {
        self.source_title_key = key.into();
        self
    }

    pub fn with_max_concurrent_requests(mut self, max_concurrent_requests: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests.max(1);
        self
    }

    pub fn source_title_key(&self) -> &str {
        &self.source_title_key
    }

    /// Translate a full post document into `target_language`.
    ///
    /// Never fails; text that cannot be translated is kept as is.
    pub async fn translate_document(&self, text: &str, target_language: &str) -> String {
        let mut context = TitleContext::default();

        let (frontmatter_block, rest) = match split_frontmatter(text) {
            Some((interior, rest)) => (
                self.translate_frontmatter(interior, target_language, &mut context).await,
                rest,
            ),
            None => (String::new(), text),
        };

        let split = split_metadata_block(rest);
        let metadata_block = match split.literal {
            Some(literal) => {
                self.translate_metadata(split.declaration, literal, target_language, &mut context)
                    .await
            }
            None => String::new(),
        };

        let body = self.translate_body(split.body, target_language).await;

        assemble_document(&frontmatter_block, split.prefix, &metadata_block, &body)
    }

    /// Translate the interior of a frontmatter block and render it again
    pub async fn translate_frontmatter_block(&self, interior: &str, target_language: &str) -> String {
        self.translate_frontmatter(interior, target_language, &mut TitleContext::default())
            .await
    }

    /// Translate the lines of a document body, preserving line order
    pub async fn translate_body(&self, body: &str, target_language: &str) -> String {
        let lines = classify_body(body);

        let spans: Vec<&str> = lines
            .iter()
            .filter_map(|line| match line.action {
                LineAction::Translate { text, .. } => Some(text),
                LineAction::Verbatim => None,
            })
            .collect();

        let mut translations = stream::iter(spans)
            .map(|text| self.translate(text, target_language))
            .buffered(self.max_concurrent_requests)
            .collect::<Vec<String>>()
            .await
            .into_iter();

        let rebuilt: Vec<String> = lines
            .iter()
            .map(|line| match line.action {
                LineAction::Verbatim => line.line.to_string(),
                LineAction::Translate { prefix, text, suffix } => {
                    let translated = translations.next().unwrap_or_else(|| text.to_string());
                    format!("{}{}{}", prefix, translated, suffix)
                }
            })
            .collect();

        rebuilt.join("\n")
    }

    async fn translate(&self, text: &str, target_language: &str) -> String {
        self.translator
            .translate(text, target_language, self.source_language.as_deref())
            .await
    }

    /// Keys that may hold the original-language title, configured key first
    fn source_title_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.source_title_key.as_str()).chain(
            LOCALIZED_TITLE_KEYS
                .iter()
                .copied()
                .filter(move |key| *key != self.source_title_key),
        )
    }

    async fn translate_frontmatter(&self, interior: &str, target_language: &str, context: &mut TitleContext) -> String {
        let data = parse_frontmatter_body(interior);
        if data.is_empty() {
            return format!("---\n{}\n---\n\n", interior);
        }

        let source_title = self
            .source_title_keys()
            .find_map(|key| data.get(key))
            .or_else(|| data.get("title"))
            .map(str::to_string)
            .or_else(|| context.source_title.clone());

        let mut translated_title = context.translated_title.clone();
        if let Some(title) = data.get("title") {
            translated_title = Some(self.translate(title, target_language).await);
        } else if let (Some(source), None) = (&source_title, &translated_title) {
            translated_title = Some(self.translate(source, target_language).await);
        }

        let mut translated = Frontmatter::new();
        for (key, value) in data.iter() {
            if key == "title" {
                if let Some(title) = &translated_title {
                    translated.insert(key, title.as_str());
                    continue;
                }
            }

            if self.source_title_keys().any(|k| k == key) {
                translated.insert(key, value);
            } else if FRONTMATTER_TRANSLATABLE_KEYS.contains(&key) {
                translated.insert(key, self.translate(value, target_language).await);
            } else {
                translated.insert(key, value);
            }
        }

        if let Some(source) = &source_title {
            if !self.source_title_keys().any(|k| translated.contains_key(k)) {
                translated.insert(self.source_title_key.as_str(), source.as_str());
            }
        }
        if let Some(title) = &translated_title {
            if !translated.contains_key("title") {
                translated.insert("title", title.as_str());
            }
        }

        context.source_title = source_title;
        context.translated_title = translated_title;

        format_frontmatter(&translated)
    }

    async fn translate_metadata(
        &self,
        declaration: &str,
        literal: &str,
        target_language: &str,
        context: &mut TitleContext,
    ) -> String {
        let mut record: Map<String, Value> = match parse_literal(literal) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return format!("{}{};\n", declaration, literal),
            Err(e) => {
                debug!("Keeping metadata literal verbatim: {}", e);
                return format!("{}{};\n", declaration, literal);
            }
        };

        let found = self.source_title_keys().find_map(|key| {
            record
                .get(key)
                .and_then(Value::as_str)
                .map(|value| (key.to_string(), value.to_string()))
        });
        let (source_key, literal_source_title) = match found {
            Some((key, value)) => (key, Some(value)),
            None => (self.source_title_key.clone(), None),
        };
        let source_title = literal_source_title.or_else(|| context.source_title.clone());

        let title_source = source_title
            .clone()
            .or_else(|| record.get("title").and_then(title_value).map(str::to_string));

        let mut translated_title = context.translated_title.clone();
        if let Some(source) = &title_source {
            translated_title = Some(self.translate(source, target_language).await);
        }

        if let Some(source) = &source_title {
            record.insert(source_key, Value::String(source.clone()));
        }

        if let Some(title) = &translated_title {
            match record.get_mut("title") {
                Some(Value::Object(title_object)) => {
                    title_object.insert("default".to_string(), Value::String(title.clone()));
                }
                _ => {
                    record.insert("title".to_string(), Value::String(title.clone()));
                }
            }
        }

        for key in METADATA_TRANSLATABLE_KEYS {
            if let Some(Value::String(value)) = record.get(*key).cloned() {
                let translated = self.translate(&value, target_language).await;
                record.insert(key.to_string(), Value::String(translated));
            }
        }

        context.source_title = source_title;
        context.translated_title = translated_title;

        format!("{}{};\n", declaration, to_object_literal(&Value::Object(record)))
    }
}
