/// Function-header parsing
///
/// Recognizes `\name[options]` commands inside a literal run and parses the
/// option list. Text around the commands is returned as separate pieces.
use crate::ast::OrderedOption;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\([A-Za-z0-9]+)(?:\[((?:[^\]\\]|\\.)*)\])?").unwrap()
});

/// One piece of a literal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<'src> {
    Text(&'src str),
    Command {
        name: &'src str,
        options: Vec<OrderedOption>,
    },
}

/// Result of scanning a literal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'src> {
    pub pieces: Vec<Piece<'src>>,
    /// The run ends in a command (trailing whitespace allowed), so a
    /// following `{` opens that command's body
    pub opens_body: bool,
}

pub fn parse_header(fragment: &str) -> Header<'_> {
    let mut pieces = Vec::new();
    let mut last = 0;
    let mut ends_with_command = false;

    for caps in COMMAND.captures_iter(fragment) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            pieces.push(Piece::Text(&fragment[last..whole.start()]));
        }
        let name = caps.get(1).map_or("", |m| m.as_str());
        let options = caps
            .get(2)
            .map(|m| parse_options(m.as_str()))
            .unwrap_or_default();
        pieces.push(Piece::Command { name, options });
        last = whole.end();
        ends_with_command = true;
    }

    if last < fragment.len() {
        let rest = &fragment[last..];
        pieces.push(Piece::Text(rest));
        ends_with_command = ends_with_command && rest.trim().is_empty();
    }

    Header {
        pieces,
        opens_body: ends_with_command,
    }
}

/// Parse the body of `[...]` into ordered options.
///
/// Entries are comma separated; `\,` is a literal comma. An entry whose text
/// before the first unescaped `:` is an alphanumeric word is keyed by it,
/// anything else is a bare value. Keys and values are trimmed and blank
/// entries are skipped.
pub fn parse_options(body: &str) -> Vec<OrderedOption> {
    split_unescaped(body, ',')
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| parse_entry(&entry))
        .collect()
}

fn parse_entry(entry: &str) -> OrderedOption {
    if let Some(colon) = find_unescaped(entry, ':') {
        let key = entry[..colon].trim();
        if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return OrderedOption::keyed(key, unescape_option(entry[colon + 1..].trim()));
        }
    }
    OrderedOption::bare(unescape_option(entry.trim()))
}

fn find_unescaped(text: &str, needle: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            c if c == needle => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_unescaped(text: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            current.push('\\');
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if escaped {
        current.push('\\');
    }
    parts.push(current);
    parts
}

fn unescape_option(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(&next)) if matches!(next, ',' | ':' | '[' | ']') => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}
