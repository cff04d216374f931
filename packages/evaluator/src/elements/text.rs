use super::RenderProps;
use crate::options::OptionReader;
use crate::query::Queries;
use crate::vdom::VNode;
use codex_parser::{ParseNode, ParseResult};

pub fn validate_header(node: &ParseNode) -> ParseResult<Queries> {
    OptionReader::new(node).int_in("size", 1, 4)?;
    Ok(Queries::new())
}

pub fn render_root(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    Ok(Some(VNode::element("div").with_class("markup").with_children(props.children)))
}

pub fn render_text(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    Ok(props.node.text_value().map(VNode::text))
}

pub fn render_bold(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    Ok(Some(VNode::element("strong").with_children(props.children)))
}

pub fn render_header(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let size = props.options().int_in("size", 1, 4)?.unwrap_or(1);
    Ok(Some(
        VNode::element(format!("h{}", size))
            .with_class("header")
            .with_children(props.children),
    ))
}
