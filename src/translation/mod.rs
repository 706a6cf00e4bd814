/*!
 * Translation of post documents.
 *
 * - `core`: the provider-backed `TranslationService` with retry and timeout
 * - `cache`: per-run cache of successful translations
 * - `document`: frontmatter, metadata literal and body translation of a whole post
 */

use async_trait::async_trait;
use std::sync::Arc;

// Re-export main types for easier usage
pub use self::cache::{CacheStats, TranslationCache};
pub use self::core::{TranslationOptions, TranslationService};
pub use self::document::DocumentTranslator;

// Submodules
pub mod cache;
pub mod core;
pub mod document;

/// Text translation capability consumed by the document translator.
///
/// Implementations never fail: when a translation cannot be produced the
/// original text is returned.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`; `None` source means auto-detect
    async fn translate(&self, text: &str, target_language: &str, source_language: Option<&str>) -> String;
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Arc<T> {
    async fn translate(&self, text: &str, target_language: &str, source_language: Option<&str>) -> String {
        (**self).translate(text, target_language, source_language).await
    }
}
