use super::RenderProps;
use crate::options::OptionReader;
use crate::query::Queries;
use crate::vdom::VNode;
use codex_parser::{ParseError, ParseNode, ParseResult};

pub fn validate(node: &ParseNode) -> ParseResult<Queries> {
    OptionReader::new(node).required("content")?;
    Ok(Queries::new())
}

/// Both faces of a toggle stay unparsed until the host shows them
pub fn render(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let options = props.options();
    let variables_key = props.variables_key();

    let resolve = |name: &str| {
        props
            .metadata()
            .resolve_variable(variables_key, name)
            .ok_or_else(|| ParseError::unset_variable(name))
    };

    let content = resolve(options.required("content")?)?;
    let mut node = VNode::element("span")
        .with_class("toggle")
        .with_attr("data-state", "content")
        .with_child(VNode::deferred(content, variables_key));

    if let Some(alt) = options.str("alt") {
        node = node.with_child(VNode::deferred(resolve(alt)?, variables_key));
    }
    Ok(Some(node))
}
