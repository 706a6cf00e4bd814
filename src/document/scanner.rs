/*!
 * Object literal scanner.
 *
 * Locates the brace-delimited object literal that follows a known marker in
 * document source text. The scan is string aware: braces inside `'`, `"` or
 * backtick strings are ignored and backslash escapes are honoured, so titles
 * full of punctuation never shift the closing boundary.
 */

use std::ops::Range;

/// Find the object literal starting at the first `{` at or after `from_index`.
///
/// Returns the literal text from the opening brace through the brace that
/// brings the nesting depth back to zero, or `None` when there is no opening
/// brace or the literal is unterminated.
pub fn find_object_literal(text: &str, from_index: usize) -> Option<&str> {
    find_object_literal_span(text, from_index).map(|span| &text[span])
}

/// Byte range variant of [`find_object_literal`].
pub fn find_object_literal_span(text: &str, from_index: usize) -> Option<Range<usize>> {
    let start = char_boundary_at_or_after(text, from_index)?;
    let brace_start = start + text[start..].find('{')?;

    let mut depth: usize = 0;
    let mut in_string: Option<u8> = None;
    let mut escaped = false;

    // All delimiters are ASCII, so scanning bytes is safe for UTF-8 input:
    // continuation bytes never collide with them.
    for (offset, &byte) in text.as_bytes()[brace_start..].iter().enumerate() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == quote {
                in_string = None;
            }
            continue;
        }

        match byte {
            b'\'' | b'"' | b'`' => in_string = Some(byte),
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = brace_start + offset + 1;
                    return Some(brace_start..end);
                }
            }
            _ => {}
        }
    }

    None
}

fn char_boundary_at_or_after(text: &str, index: usize) -> Option<usize> {
    if index > text.len() {
        return None;
    }
    (index..=text.len()).find(|&i| text.is_char_boundary(i))
}
