use super::RenderProps;
use crate::options::OptionReader;
use crate::query::Queries;
use crate::vdom::VNode;
use codex_parser::{ParseNode, ParseResult};

/// Direction letters: horizontal, vertical, centered
const DIRECTIONS: [char; 3] = ['h', 'v', 'c'];

const MARGIN_SIDES: [&str; 4] = ["top", "bottom", "left", "right"];

pub fn validate_align(node: &ParseNode) -> ParseResult<Queries> {
    let options = OptionReader::new(node);
    if let Some(direction) = options.str("direction") {
        check_direction(&options, direction)?;
    }
    options.float("weight")?;
    Ok(Queries::new())
}

/// A non-empty arrangement of distinct direction letters
fn check_direction(options: &OptionReader<'_>, direction: &str) -> ParseResult<()> {
    if direction.is_empty() {
        return Err(options.invalid("direction", direction, "expected some of h, v, c"));
    }
    let mut seen = Vec::with_capacity(DIRECTIONS.len());
    for c in direction.chars() {
        if !DIRECTIONS.contains(&c) {
            return Err(options.invalid(
                "direction",
                direction,
                &format!("'{}' is not one of h, v, c", c),
            ));
        }
        if seen.contains(&c) {
            return Err(options.invalid("direction", direction, &format!("'{}' is repeated", c)));
        }
        seen.push(c);
    }
    Ok(())
}

pub fn render_align(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let options = props.options();
    let direction = options.str("direction").unwrap_or("v");
    let primary = direction.chars().find(|c| *c == 'h' || *c == 'v').unwrap_or('v');

    let mut node = VNode::element("div")
        .with_class("align")
        .with_style("display", "flex")
        .with_style("flex-direction", if primary == 'h' { "row" } else { "column" });

    if direction.contains('h') && direction.contains('v') {
        node = node.with_style("flex-wrap", "wrap");
    }
    if direction.contains('c') {
        node = node
            .with_style("align-items", "center")
            .with_style("justify-content", "center");
    }
    if let Some(weight) = options.float("weight")? {
        node = node.with_style("flex", weight.to_string());
    }

    Ok(Some(node.with_children(props.children)))
}

pub fn render_block(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    Ok(Some(
        VNode::element("div")
            .with_class("block")
            .with_style("display", "block")
            .with_style("width", "100%")
            .with_children(props.children),
    ))
}

pub fn validate_box(node: &ParseNode) -> ParseResult<Queries> {
    OptionReader::new(node).bool("border")?;
    Ok(Queries::new())
}

pub fn render_box(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let border = props.options().bool("border")?.unwrap_or(true);
    let mut node = VNode::element("div").with_class("box");
    if border {
        node = node.with_style("border", "1px solid currentColor");
    }
    Ok(Some(node.with_children(props.children)))
}

pub fn validate_line(node: &ParseNode) -> ParseResult<Queries> {
    OptionReader::new(node).int_at_least("width", 1)?;
    Ok(Queries::new())
}

pub fn render_line(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let width = props.options().int_at_least("width", 1)?.unwrap_or(1);
    Ok(Some(
        VNode::element("hr")
            .with_class("line")
            .with_style("border-top-width", format!("{}px", width)),
    ))
}

pub fn validate_margin(node: &ParseNode) -> ParseResult<Queries> {
    let options = OptionReader::new(node);
    options.non_negative_float("margin")?;
    for side in MARGIN_SIDES {
        options.non_negative_float(side)?;
    }
    Ok(Queries::new())
}

pub fn render_margin(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let options = props.options();
    let mut node = VNode::element("div").with_class("margin");
    if let Some(all) = options.non_negative_float("margin")? {
        node = node.with_style("margin", format!("{}px", all));
    }
    for side in MARGIN_SIDES {
        if let Some(value) = options.non_negative_float(side)? {
            node = node.with_style(format!("margin-{}", side), format!("{}px", value));
        }
    }
    Ok(Some(node.with_children(props.children)))
}

pub fn render_row(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    Ok(Some(
        VNode::element("div")
            .with_class("row")
            .with_style("display", "flex")
            .with_style("flex-direction", "row")
            .with_children(props.children),
    ))
}
