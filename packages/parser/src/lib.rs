//! # Codex markup parser
//!
//! Turns markup text into a [`ParseNode`] tree:
//!
//! 1. split the text on braces ([`splitter`])
//! 2. bind top-level `\set{name}{value}` declarations for the active
//!    variables-key ([`variables`])
//! 3. substitute `$name` references
//! 4. re-split the substituted text and build the tree ([`tree`]),
//!    recognizing `\name[options]` headers on the way ([`header`])
//!
//! Validation, cross-document queries and rendering live in
//! `codex-evaluator`.

pub mod ast;
pub mod error;
pub mod header;
pub mod splitter;
pub mod tree;
pub mod variables;


pub use ast::{ElementKind, OrderedOption, ParseNode};
pub use error::{ParseError, ParseResult};
pub use splitter::{split, Segment};
pub use tree::build_tree;

use codex_common::Metadata;
use tracing::{debug, instrument};

/// Parse one markup field.
///
/// Bindings found by the variable pass are written into
/// `metadata.variables[variables_key]`, so later parses under the same key
/// (toggle content, for example) see them.
#[instrument(skip(source, metadata), fields(len = source.len()))]
pub fn parse(source: &str, variables_key: &str, metadata: &mut Metadata) -> ParseResult<ParseNode> {
    let bound = variables::bind_variables(&split(source), metadata.variables_mut(variables_key));
    debug!(bound, "Variable pass complete");

    let expanded = variables::substitute(source, variables_key, metadata)?;
    let root = build_tree(&split(&expanded))?;
    debug!(children = root.content.len(), "Tree built");
    Ok(root)
}
