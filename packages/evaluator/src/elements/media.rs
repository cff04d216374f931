use super::RenderProps;
use crate::options::OptionReader;
use crate::query::Queries;
use crate::vdom::VNode;
use codex_parser::{ParseNode, ParseResult};

pub fn validate_icon(node: &ParseNode) -> ParseResult<Queries> {
    let options = OptionReader::new(node);
    let icon = options.required("icon")?;
    if !icon.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(options.invalid("icon", icon, "expected letters, digits and dashes"));
    }
    options.positive_float("size")?;
    Ok(Queries::new())
}

pub fn render_icon(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let options = props.options();
    let icon = options.required("icon")?;

    let mut node = VNode::element("i")
        .with_class("icon")
        .with_class(format!("icon-{}", icon));
    if let Some(size) = options.positive_float("size")? {
        node = node.with_style("font-size", format!("{}em", size));
    }
    if let Some(tooltip) = options.str("tooltip") {
        node = node.with_attr("title", tooltip);
    }
    Ok(Some(node))
}

pub fn validate_image(node: &ParseNode) -> ParseResult<Queries> {
    let options = OptionReader::new(node);
    options.required("href")?;
    options.positive_float("width")?;
    options.positive_float("height")?;
    options.bool("border")?;
    Ok(Queries::new())
}

pub fn render_image(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let options = props.options();

    let mut node = VNode::element("img")
        .with_class("image")
        .with_attr("src", options.required("href")?);
    if let Some(width) = options.positive_float("width")? {
        node = node.with_style("width", format!("{}px", width));
    }
    if let Some(height) = options.positive_float("height")? {
        node = node.with_style("height", format!("{}px", height));
    }
    if options.bool("border")?.unwrap_or(false) {
        node = node.with_style("border", "1px solid currentColor");
    }
    Ok(Some(node))
}
