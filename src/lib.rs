/*!
 * # postmill - bilingual post tooling
 *
 * A Rust library for reading the metadata of MDX blog posts and producing
 * machine-translated mirrors of them in another locale.
 *
 * ## Features
 *
 * - Recover title, localized title and publish date from frontmatter or an
 *   embedded `export const metadata = { ... }` literal
 * - Parse metadata literals as data only, never evaluating code
 * - Translate posts while keeping code blocks, markup, tables and links intact
 * - Cache, retry and time-bound calls to the translation provider
 * - List posts newest first with view counts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `document`: plain-text parsing of post documents:
 *   - `document::scanner`: object literal boundary detection
 *   - `document::frontmatter`: frontmatter parsing and formatting
 *   - `document::literal`: safe object literal parser and serializer
 *   - `document::metadata`: post metadata extraction
 *   - `document::body`: body line classification
 * - `translation`: translation services:
 *   - `translation::core`: provider-backed service with retry and timeout
 *   - `translation::cache`: caching of successful translations
 *   - `translation::document`: whole-document translation
 * - `providers`: Google Translate client and a mock provider
 * - `posts`: post listing
 * - `app_config`: Configuration management
 * - `app_controller`: Mirrors a post tree into another locale
 * - `file_utils`: File system operations
 * - `language_utils`: Locale code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod posts;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOptions, RunSummary};
pub use document::{ExtractedMetadata, PostMetadata, extract_post_metadata, find_object_literal};
pub use errors::{AppError, ProviderError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use posts::{Post, load_posts};
pub use translation::{DocumentTranslator, TranslationService, Translator};
