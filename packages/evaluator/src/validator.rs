/// Option binding and semantic validation of a parse tree
use crate::elements;
use crate::query::{merge_queries, Queries};
use crate::registry::{registry, ElementDescriptor};
use codex_parser::{ElementKind, OrderedOption, ParseError, ParseNode, ParseResult};
use std::collections::HashMap;
use tracing::instrument;

/// Bind a node's options to keys. A bare option binds to the element's
/// default key.
pub fn bind_options(
    descriptor: &ElementDescriptor,
    options: &[OrderedOption],
) -> ParseResult<HashMap<String, String>> {
    let element = descriptor.name();
    let mut bound = HashMap::new();

    for option in options {
        let key = match &option.key {
            Some(key) if descriptor.accepts(key) => key.as_str(),
            Some(key) => return Err(ParseError::invalid_option_key(element, key)),
            None => descriptor.default_key.ok_or_else(|| ParseError::MissingDefaultKey {
                element: element.to_string(),
                value: option.value.clone(),
            })?,
        };

        if bound.insert(key.to_string(), option.value.clone()).is_some() {
            return Err(ParseError::DuplicateOption {
                element: element.to_string(),
                key: key.to_string(),
            });
        }
    }

    Ok(bound)
}

/// Bind options and validate every node, returning the merged queries of
/// the whole tree. Bodies of `set` are never validated.
#[instrument(skip_all, fields(kind = %node.kind))]
pub fn validate_tree(node: &mut ParseNode) -> ParseResult<Queries> {
    let descriptor = registry().descriptor(node.kind)?;
    if descriptor.valid_options.is_some() {
        node.variables = bind_options(descriptor, &node.options)?;
    }

    let mut queries = elements::validate(node)?;
    if node.kind == ElementKind::Set {
        return Ok(queries);
    }

    for child in &mut node.content {
        merge_queries(&mut queries, validate_tree(child)?);
    }
    Ok(queries)
}
