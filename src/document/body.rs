/*!
 * Body line classification.
 *
 * Each body line is matched against an ordered list of rules; the first rule
 * that applies decides whether the line is copied verbatim or which span of
 * it is natural language. The only state carried between lines is whether
 * the classifier is inside a fenced code block.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*#{1,6}\s+)(.*)$").unwrap());
static UNORDERED_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*[-*+]\s+)(.*)$").unwrap());
static ORDERED_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*\d+\.\s+)(.*)$").unwrap());
static BLOCK_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*>\s?)(.*)$").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*!\[)(.*?)(\]\(.*\))$").unwrap());

const FENCE_MARKERS: &[&str] = &["```", "~~~"];

const DECLARATION_PREFIXES: &[&str] = &[
    "import ",
    "export ",
    "const ",
    "let ",
    "function ",
    "type ",
    "interface ",
];

/// What to do with a single body line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction<'a> {
    /// Copy the line unchanged
    Verbatim,
    /// Translate `text` and re-attach `prefix` and `suffix` unchanged
    Translate {
        prefix: &'a str,
        text: &'a str,
        suffix: &'a str,
    },
}

/// Body classification rules, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRule {
    FenceMarker,
    InsideFence,
    Blank,
    Declaration,
    Markup,
    Table,
    InlineCode,
    Image,
    Link,
    Heading,
    UnorderedList,
    OrderedList,
    BlockQuote,
    FullLine,
}

/// Rules evaluated top to bottom; `FullLine` always matches
pub const BODY_RULES: &[LineRule] = &[
    LineRule::FenceMarker,
    LineRule::InsideFence,
    LineRule::Blank,
    LineRule::Declaration,
    LineRule::Markup,
    LineRule::Table,
    LineRule::InlineCode,
    LineRule::Image,
    LineRule::Link,
    LineRule::Heading,
    LineRule::UnorderedList,
    LineRule::OrderedList,
    LineRule::BlockQuote,
    LineRule::FullLine,
];

impl LineRule {
    /// Apply this rule to a line, returning an action when it matches
    pub fn apply<'a>(&self, line: &'a str, in_fence: bool) -> Option<LineAction<'a>> {
        let trimmed = line.trim();
        match self {
            Self::FenceMarker => FENCE_MARKERS
                .iter()
                .any(|marker| trimmed.starts_with(marker))
                .then_some(LineAction::Verbatim),
            Self::InsideFence => in_fence.then_some(LineAction::Verbatim),
            Self::Blank => trimmed.is_empty().then_some(LineAction::Verbatim),
            Self::Declaration => DECLARATION_PREFIXES
                .iter()
                .any(|prefix| trimmed.starts_with(prefix))
                .then_some(LineAction::Verbatim),
            Self::Markup => (trimmed.starts_with('<') || trimmed.starts_with('{'))
                .then_some(LineAction::Verbatim),
            Self::Table => trimmed.contains('|').then_some(LineAction::Verbatim),
            Self::InlineCode => line.contains('`').then_some(LineAction::Verbatim),
            Self::Image => IMAGE.captures(line).map(|caps| LineAction::Translate {
                prefix: caps.get(1).map_or("", |m| m.as_str()),
                text: caps.get(2).map_or("", |m| m.as_str()),
                suffix: caps.get(3).map_or("", |m| m.as_str()),
            }),
            Self::Link => line.contains('[').then_some(LineAction::Verbatim),
            Self::Heading => prefixed_span(&HEADING, line),
            Self::UnorderedList => prefixed_span(&UNORDERED_LIST, line),
            Self::OrderedList => prefixed_span(&ORDERED_LIST, line),
            Self::BlockQuote => prefixed_span(&BLOCK_QUOTE, line),
            Self::FullLine => {
                let leading_len = line.len() - line.trim_start().len();
                Some(LineAction::Translate {
                    prefix: &line[..leading_len],
                    text: trimmed,
                    suffix: "",
                })
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FenceMarker => "fence-marker",
            Self::InsideFence => "inside-fence",
            Self::Blank => "blank",
            Self::Declaration => "declaration",
            Self::Markup => "markup",
            Self::Table => "table",
            Self::InlineCode => "inline-code",
            Self::Image => "image",
            Self::Link => "link",
            Self::Heading => "heading",
            Self::UnorderedList => "unordered-list",
            Self::OrderedList => "ordered-list",
            Self::BlockQuote => "block-quote",
            Self::FullLine => "full-line",
        }
    }
}

fn prefixed_span<'a>(pattern: &Regex, line: &'a str) -> Option<LineAction<'a>> {
    let caps = pattern.captures(line)?;
    Some(LineAction::Translate {
        prefix: caps.get(1)?.as_str(),
        text: caps.get(2).map_or("", |m| m.as_str()),
        suffix: "",
    })
}

/// A line together with the rule that classified it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub line: &'a str,
    pub rule: LineRule,
    pub action: LineAction<'a>,
}

/// Stateful classifier tracking fenced code blocks
#[derive(Debug, Default)]
pub struct LineClassifier {
    in_fence: bool,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_fence(&self) -> bool {
        self.in_fence
    }

    /// Classify the next line of the body
    pub fn classify<'a>(&mut self, line: &'a str) -> ClassifiedLine<'a> {
        for rule in BODY_RULES {
            if let Some(action) = rule.apply(line, self.in_fence) {
                if *rule == LineRule::FenceMarker {
                    self.in_fence = !self.in_fence;
                }
                return ClassifiedLine {
                    line,
                    rule: *rule,
                    action,
                };
            }
        }

        // FullLine always matches; this is only reached if the table is edited.
        ClassifiedLine {
            line,
            rule: LineRule::FullLine,
            action: LineAction::Verbatim,
        }
    }
}

/// Split a body into lines (accepting `\r\n`) and classify each one
pub fn classify_body(body: &str) -> Vec<ClassifiedLine<'_>> {
    let mut classifier = LineClassifier::new();
    body.split('\n')
        .map(|line| classifier.classify(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}
