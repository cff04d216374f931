/// Variable binding and substitution.
///
/// `\set{name}{value}` declarations at the top level of a field bind
/// `name` for that field's variables-key. `$name` references are then
/// replaced textually before the tree is built, so a variable may expand to
/// markup.
use crate::error::{ParseError, ParseResult};
use crate::splitter::{join, Segment};
use codex_common::{Metadata, VariableMap};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\\)?\$([A-Za-z0-9]+)").unwrap());

/// Scan top-level `\set` declarations into `variables`. Returns how many
/// were bound. Malformed declarations are left alone.
pub fn bind_variables(segments: &[Segment<'_>], variables: &mut VariableMap) -> usize {
    let mut bound = 0;
    let mut depth = 0usize;
    let mut i = 0;

    while i < segments.len() {
        match segments[i] {
            Segment::Open => depth += 1,
            Segment::Close => depth = depth.saturating_sub(1),
            Segment::Literal(text) if depth == 0 && text.trim_end().ends_with("\\set") => {
                if let Some((name, value, next)) = read_declaration(segments, i + 1) {
                    trace!(name = %name, "Bound variable");
                    variables.insert(name, value);
                    bound += 1;
                    i = next;
                    continue;
                }
            }
            Segment::Literal(_) => {}
        }
        i += 1;
    }

    bound
}

/// `{name}{value}` starting at `start`; returns the binding and the index
/// after the closing brace of the value
fn read_declaration(segments: &[Segment<'_>], start: usize) -> Option<(String, String, usize)> {
    let (name, after_name) = read_body(segments, start)?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let (value, after_value) = read_body(segments, after_name)?;
    Some((name.to_string(), value, after_value))
}

/// Verbatim text of a braced body starting at `start`, nested braces kept
pub(crate) fn read_body(segments: &[Segment<'_>], start: usize) -> Option<(String, usize)> {
    if segments.get(start) != Some(&Segment::Open) {
        return None;
    }
    let mut depth = 0usize;
    for (offset, segment) in segments[start..].iter().enumerate() {
        match segment {
            Segment::Open => depth += 1,
            Segment::Close => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset;
                    return Some((join(&segments[start + 1..end]), end + 1));
                }
            }
            Segment::Literal(_) => {}
        }
    }
    None
}

/// Replace every `$name` in `source`. Bound variables of `variables_key`
/// win over flat metadata fields; `\$name` yields a literal `$name`.
pub fn substitute(source: &str, variables_key: &str, metadata: &Metadata) -> ParseResult<String> {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in REFERENCE.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&source[last..whole.start()]);
        let name = caps.get(2).map_or("", |m| m.as_str());

        if caps.get(1).is_some() {
            out.push('$');
            out.push_str(name);
        } else {
            let value = metadata
                .resolve_variable(variables_key, name)
                .ok_or_else(|| ParseError::unset_variable(name))?;
            out.push_str(&value);
        }
        last = whole.end();
    }

    out.push_str(&source[last..]);
    Ok(out)
}
