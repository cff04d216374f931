/// Brace splitter
///
/// Markup is split into literal runs and the `{`/`}` delimiters between
/// them. There is no token stream beyond that: command recognition happens
/// on the literal runs while the tree is built.
use once_cell::sync::Lazy;
use regex::Regex;

/// `\{` and `\}` are escapes and stay inside the surrounding literal
static BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[{}]|[{}]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'src> {
    /// Raw literal text, escapes untouched
    Literal(&'src str),
    Open,
    Close,
}

impl<'src> Segment<'src> {
    /// Source text of the segment
    pub fn as_str(&self) -> &'src str {
        match self {
            Segment::Literal(text) => text,
            Segment::Open => "{",
            Segment::Close => "}",
        }
    }
}

/// Split markup on unescaped braces. Empty literals are not emitted, so a
/// `}` directly followed by `{` yields adjacent `Close`, `Open` segments.
pub fn split(source: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in BRACE.find_iter(source) {
        if m.as_str().len() > 1 {
            continue;
        }
        if m.start() > last {
            segments.push(Segment::Literal(&source[last..m.start()]));
        }
        segments.push(if m.as_str() == "{" {
            Segment::Open
        } else {
            Segment::Close
        });
        last = m.end();
    }

    if last < source.len() {
        segments.push(Segment::Literal(&source[last..]));
    }

    segments
}

/// Re-join segments into the text they were split from
pub fn join(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::as_str).collect()
}

/// Resolve brace escapes in a literal run
pub fn unescape_braces(text: &str) -> String {
    text.replace("\\{", "{").replace("\\}", "}")
}
