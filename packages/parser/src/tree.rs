/// Tree builder
///
/// Consumes split segments with a node stack. A command recognized in a
/// literal run becomes the last child of the stack top and is "pending":
/// the next `{` opens its body. `\set` is the only command with two bodies,
/// and both are kept as raw text rather than parsed.
use crate::ast::{ElementKind, ParseNode};
use crate::error::{ParseError, ParseResult};
use crate::header::{parse_header, Piece};
use crate::splitter::{unescape_braces, Segment};
use crate::variables::read_body;

const SET_BODIES: usize = 2;

pub fn build_tree(segments: &[Segment<'_>]) -> ParseResult<ParseNode> {
    let mut stack = vec![ParseNode::root()];
    let mut pending = false;
    let mut i = 0;

    while i < segments.len() {
        match segments[i] {
            Segment::Literal(text) => {
                let header = parse_header(text);
                let last = header.pieces.len().saturating_sub(1);
                let top = current(&mut stack);

                for (n, piece) in header.pieces.into_iter().enumerate() {
                    match piece {
                        // whitespace between a command and its body
                        Piece::Text(_) if n == last && header.opens_body => {}
                        Piece::Text(text) => top.content.push(ParseNode::text(unescape_braces(text))),
                        Piece::Command { name, options } => {
                            let kind = ElementKind::from_command(name)
                                .ok_or_else(|| ParseError::unknown_command(name))?;
                            top.content.push(ParseNode::new(kind, options));
                        }
                    }
                }
                pending = header.opens_body;
            }
            Segment::Open => {
                if !pending {
                    return Err(ParseError::UnexpectedContentStart);
                }
                let command = current(&mut stack)
                    .content
                    .pop()
                    .ok_or(ParseError::UnexpectedContentStart)?;

                if command.kind == ElementKind::Set {
                    let (raw, next) = read_body(segments, i).ok_or_else(|| ParseError::UnclosedContent {
                        command: command.kind.name().to_string(),
                    })?;
                    let mut set = command;
                    set.content.push(ParseNode::text(raw));
                    pending = set.content.len() < SET_BODIES;
                    current(&mut stack).content.push(set);
                    i = next;
                    continue;
                }

                stack.push(command);
                pending = false;
            }
            Segment::Close => {
                if stack.len() <= 1 {
                    return Err(ParseError::UnexpectedContentEnd);
                }
                if let Some(closed) = stack.pop() {
                    current(&mut stack).content.push(closed);
                }
                pending = false;
            }
        }
        i += 1;
    }

    if stack.len() > 1 {
        let command = current(&mut stack).kind.name().to_string();
        return Err(ParseError::UnclosedContent { command });
    }

    stack.pop().ok_or(ParseError::UnexpectedContentEnd)
}

fn current(stack: &mut [ParseNode]) -> &mut ParseNode {
    // the root sentinel is never popped while segments remain
    let last = stack.len() - 1;
    &mut stack[last]
}
