/*!
 * Plain-text document processing for post sources.
 *
 * - `scanner`: string-aware object literal boundary detection
 * - `frontmatter`: `---` block parsing and formatting
 * - `literal`: safe, data-only object literal parser and serializer
 * - `metadata`: post metadata extraction and listing entries
 * - `body`: ordered line classification rules for translation
 */

pub mod body;
pub mod frontmatter;
pub mod literal;
pub mod metadata;
pub mod scanner;

pub use self::body::{ClassifiedLine, LineAction, LineClassifier, LineRule, classify_body};
pub use self::frontmatter::{Frontmatter, format_frontmatter, parse_frontmatter, split_frontmatter};
pub use self::literal::{LiteralError, parse_literal, to_object_literal};
pub use self::metadata::{ExtractedMetadata, PostMetadata, extract_post_metadata};
pub use self::scanner::find_object_literal;
