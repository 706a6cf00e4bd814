/*!
 * Safe object literal parsing.
 *
 * Metadata blocks are written as JavaScript object literals. Instead of
 * evaluating them, this module parses a restricted data-only grammar
 * (objects, arrays, strings, numbers, booleans, null) into a
 * `serde_json::Value`. Any construct that would need evaluation, such as
 * identifiers used as values, calls, spreads or template interpolation, is
 * rejected with a `LiteralError`.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Deepest object or array nesting accepted before giving up
pub const MAX_NESTING_DEPTH: usize = 128;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Errors raised while parsing an object literal
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    /// Input ended before the literal was complete
    #[error("Unexpected end of literal")]
    UnexpectedEnd,

    /// A character that is not valid at this position
    #[error("Unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    /// An identifier used where a value was expected
    #[error("Unsupported expression '{0}'; only data literals are allowed")]
    UnsupportedExpression(String),

    /// Template strings with `${...}` interpolation
    #[error("Template interpolation is not allowed at offset {0}")]
    TemplateInterpolation(usize),

    /// Malformed or non-finite number
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// Malformed escape sequence inside a string
    #[error("Invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    /// Text left over after the literal
    #[error("Trailing content after literal at offset {0}")]
    TrailingContent(usize),

    /// Objects and arrays nested deeper than the limit
    #[error("Literal nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Parse object literal text into a structured value
pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    let mut parser = LiteralParser::new(text);
    parser.skip_trivia()?;
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.pos < parser.chars.len() {
        return Err(LiteralError::TrailingContent(parser.pos));
    }
    Ok(value)
}

/// Serialize a value as a pretty object literal with unquoted keys
pub fn to_object_literal(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl LiteralParser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn next(&mut self) -> Result<char, LiteralError> {
        let c = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(c)
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        let offset = self.pos;
        let found = self.next()?;
        if found != expected {
            return Err(LiteralError::UnexpectedChar { found, offset });
        }
        Ok(())
    }

    fn unexpected(&self) -> LiteralError {
        match self.peek() {
            Some(found) => LiteralError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => LiteralError::UnexpectedEnd,
        }
    }

    /// Skip whitespace and `//` or `/* */` comments
    fn skip_trivia(&mut self) -> Result<(), LiteralError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => self.pos += 1,
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                (Some('/'), Some('*')) => {
                    self.pos += 2;
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some('*'), Some('/')) => {
                                self.pos += 2;
                                break;
                            }
                            (Some(_), _) => self.pos += 1,
                            (None, _) => return Err(LiteralError::UnexpectedEnd),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        match self.peek() {
            Some('{') => self.parse_nested(Self::parse_object),
            Some('[') => self.parse_nested(Self::parse_array),
            Some(q @ ('"' | '\'' | '`')) => self.parse_string(q).map(Value::String),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            Some(c) if is_identifier_start(c) => {
                let word = self.parse_identifier();
                match word.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    _ => Err(LiteralError::UnsupportedExpression(word)),
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_nested(&mut self, parse: fn(&mut Self) -> Result<Value, LiteralError>) -> Result<Value, LiteralError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(LiteralError::TooDeep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();

        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }

            let key = self.parse_key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {}
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, LiteralError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.parse_string(q),
            Some(c) if is_identifier_start(c) => Ok(self.parse_identifier()),
            Some(c) if c.is_ascii_digit() => match self.parse_number()? {
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(self.unexpected()),
            },
            _ => Err(self.unexpected()),
        }
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {}
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn parse_string(&mut self, quote: char) -> Result<String, LiteralError> {
        self.expect(quote)?;
        let mut out = String::new();

        loop {
            let offset = self.pos;
            let c = self.next()?;
            match c {
                _ if c == quote => return Ok(out),
                '\\' => {
                    if let Some(escaped) = self.parse_escape(offset)? {
                        out.push(escaped);
                    }
                }
                '$' if quote == '`' && self.peek() == Some('{') => {
                    return Err(LiteralError::TemplateInterpolation(offset));
                }
                '\n' if quote != '`' => {
                    return Err(LiteralError::UnexpectedChar { found: c, offset });
                }
                _ => out.push(c),
            }
        }
    }

    /// Decode one escape; `None` for a line continuation
    fn parse_escape(&mut self, offset: usize) -> Result<Option<char>, LiteralError> {
        let c = self.next()?;
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            'x' => self.parse_hex_digits(2, offset)?,
            'u' => {
                if self.peek() == Some('{') {
                    self.pos += 1;
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != '}') {
                        self.pos += 1;
                    }
                    let digits: String = self.chars[start..self.pos].iter().collect();
                    self.expect('}')?;
                    u32::from_str_radix(&digits, 16)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or(LiteralError::InvalidEscape(offset))?
                } else {
                    self.parse_unicode_unit(offset)?
                }
            }
            '\n' => return Ok(None),
            '\r' => {
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
                return Ok(None);
            }
            other => other,
        };
        Ok(Some(decoded))
    }

    /// `\uXXXX`, combining a following low surrogate when present
    fn parse_unicode_unit(&mut self, offset: usize) -> Result<char, LiteralError> {
        let high = self.read_hex(4, offset)?;
        if (0xD800..0xDC00).contains(&high)
            && self.peek() == Some('\\')
            && self.peek_at(1) == Some('u')
        {
            self.pos += 2;
            let low = self.read_hex(4, offset)?;
            if (0xDC00..0xE000).contains(&low) {
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(combined).ok_or(LiteralError::InvalidEscape(offset));
            }
            return Err(LiteralError::InvalidEscape(offset));
        }
        char::from_u32(high).ok_or(LiteralError::InvalidEscape(offset))
    }

    fn parse_hex_digits(&mut self, count: usize, offset: usize) -> Result<char, LiteralError> {
        let code = self.read_hex(count, offset)?;
        char::from_u32(code).ok_or(LiteralError::InvalidEscape(offset))
    }

    fn read_hex(&mut self, count: usize, offset: usize) -> Result<u32, LiteralError> {
        if self.pos + count > self.chars.len() {
            return Err(LiteralError::UnexpectedEnd);
        }
        let digits: String = self.chars[self.pos..self.pos + count].iter().collect();
        self.pos += count;
        u32::from_str_radix(&digits, 16).map_err(|_| LiteralError::InvalidEscape(offset))
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let mut negative = false;
        if let Some(sign @ ('-' | '+')) = self.peek() {
            negative = sign == '-';
            self.pos += 1;
        }

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            let digits: String = self.chars[digits_start..self.pos].iter().collect();
            let raw: String = self.chars[start..self.pos].iter().collect();
            let magnitude =
                i64::from_str_radix(&digits, 16).map_err(|_| LiteralError::InvalidNumber(raw))?;
            let value = if negative { -magnitude } else { magnitude };
            return Ok(Value::Number(Number::from(value)));
        }

        let digits_start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_'))
            || (matches!(self.peek(), Some('-' | '+'))
                && matches!(self.chars.get(self.pos.wrapping_sub(1)), Some('e' | 'E')))
        {
            self.pos += 1;
        }

        let raw: String = self.chars[start..self.pos].iter().collect();
        let cleaned: String = self.chars[digits_start..self.pos]
            .iter()
            .filter(|&&c| c != '_')
            .collect();
        if cleaned.is_empty() {
            return Err(LiteralError::InvalidNumber(raw));
        }

        let signed = if negative {
            format!("-{}", cleaned)
        } else {
            cleaned.clone()
        };

        let is_integer = !cleaned.contains(['.', 'e', 'E']);
        if is_integer {
            if let Ok(i) = signed.parse::<i64>() {
                return Ok(Value::Number(Number::from(i)));
            }
            if let Ok(u) = signed.parse::<u64>() {
                return Ok(Value::Number(Number::from(u)));
            }
        }

        let float: f64 = signed
            .parse()
            .map_err(|_| LiteralError::InvalidNumber(raw.clone()))?;
        Number::from_f64(float)
            .map(Value::Number)
            .ok_or(LiteralError::InvalidNumber(raw))
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            let last = map.len() - 1;
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(out, indent + 1);
                out.push_str(&format_key(key));
                out.push_str(": ");
                write_value(out, item, indent + 1);
                if i != last {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, indent);
            out.push('}');
        }
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            let last = items.len() - 1;
            for (i, item) in items.iter().enumerate() {
                push_indent(out, indent + 1);
                write_value(out, item, indent + 1);
                if i != last {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, indent);
            out.push(']');
        }
        // Strings, numbers, booleans and null share JSON's spelling.
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn format_key(key: &str) -> String {
    if IDENTIFIER.is_match(key) {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}
