/*!
 * Splitting a post around its metadata declaration and putting the
 * translated parts back together.
 */

use crate::document::metadata::METADATA_MARKER;
use crate::document::scanner::find_object_literal_span;

/// A document remainder (frontmatter removed) cut around `export const metadata`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataSplit<'a> {
    /// Text before the declaration, kept verbatim
    pub prefix: &'a str,
    /// Declaration text up to the opening brace, e.g. `export const metadata = `
    pub declaration: &'a str,
    /// The object literal, braces included
    pub literal: Option<&'a str>,
    /// Everything after the literal and its optional `;`
    pub body: &'a str,
}

/// Locate the metadata literal in `source`.
///
/// Without a declaration, or when its literal never closes, the whole
/// source is body.
pub fn split_metadata_block(source: &str) -> MetadataSplit<'_> {
    let whole_body = MetadataSplit {
        prefix: "",
        declaration: "",
        literal: None,
        body: source,
    };

    let Some(index) = source.find(METADATA_MARKER) else {
        return whole_body;
    };
    let Some(span) = find_object_literal_span(source, index) else {
        return whole_body;
    };

    let after = &source[span.end..];
    let after = after.trim_start();
    let after = after.strip_prefix(';').unwrap_or(after);

    MetadataSplit {
        prefix: &source[..index],
        declaration: &source[index..span.start],
        literal: Some(&source[span.clone()]),
        body: after,
    }
}

/// Concatenate the translated parts of a document.
///
/// The frontmatter block is followed by a blank line, the metadata block
/// starts on its own line and the result always ends with a newline.
pub fn assemble_document(frontmatter_block: &str, prefix: &str, metadata_block: &str, body: &str) -> String {
    let mut output = String::new();

    if !frontmatter_block.is_empty() {
        output.push_str(&ensure_trailing_double_newline(frontmatter_block));
    }

    output.push_str(prefix);

    if !metadata_block.is_empty() {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&ensure_trailing_newline(metadata_block));
    }

    if !output.is_empty() && !output.ends_with('\n') && !body.is_empty() {
        output.push('\n');
    }

    output.push_str(body);

    if !output.ends_with('\n') {
        output.push('\n');
    }

    output
}

pub fn ensure_trailing_newline(value: &str) -> String {
    if value.ends_with('\n') {
        value.to_string()
    } else {
        format!("{}\n", value)
    }
}

pub fn ensure_trailing_double_newline(value: &str) -> String {
    let with_newline = ensure_trailing_newline(value);
    if with_newline.ends_with("\n\n") {
        with_newline
    } else {
        with_newline + "\n"
    }
}
