use super::RenderProps;
use crate::options::OptionReader;
use crate::query::Queries;
use crate::vdom::VNode;
use codex_parser::{ElementKind, ParseError, ParseNode, ParseResult};

/// Tables may only directly contain headers, cells and (blank) text
pub fn check_table_content(table: &ParseNode) -> ParseResult<()> {
    for child in &table.content {
        match child.kind {
            ElementKind::TableHeader | ElementKind::TableCell | ElementKind::Text => {}
            other => {
                return Err(ParseError::InvalidTableContent {
                    found: other.name().to_string(),
                })
            }
        }
    }
    Ok(())
}

pub fn validate_table(node: &ParseNode) -> ParseResult<Queries> {
    check_table_content(node)?;
    let options = OptionReader::new(node);
    options.bool("border")?;
    options.int_at_least("columns", 1)?;
    Ok(Queries::new())
}

pub fn validate_cell(node: &ParseNode) -> ParseResult<Queries> {
    OptionReader::new(node).int_at_least("span", 1)?;
    Ok(Queries::new())
}

pub fn render_table(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let table = props.node;
    check_table_content(table)?;

    let options = props.options();
    let border = options.bool("border")?.unwrap_or(false);

    let mut headers = Vec::new();
    let mut cells = Vec::new();
    for child in &table.content {
        let target = match child.kind {
            ElementKind::TableHeader => &mut headers,
            ElementKind::TableCell => &mut cells,
            _ => continue,
        };
        if let Some(built) = props.builder.build(child, Some(table))? {
            target.push(built);
        }
    }

    let columns = match options.int_at_least("columns", 1)? {
        Some(n) => n as usize,
        None if !headers.is_empty() => headers.len(),
        None => 1,
    };

    let mut node = VNode::element("table").with_class("table");
    if border {
        node = node.with_class("table-bordered");
    }
    if !headers.is_empty() {
        node = node.with_child(VNode::element("thead").with_child(VNode::element("tr").with_children(headers)));
    }

    let mut rows = Vec::new();
    let mut cells = cells.into_iter().peekable();
    while cells.peek().is_some() {
        let row: Vec<VNode> = cells.by_ref().take(columns).collect();
        rows.push(VNode::element("tr").with_children(row));
    }
    Ok(Some(node.with_child(VNode::element("tbody").with_children(rows))))
}

pub fn render_cell(props: RenderProps<'_>, tag: &str) -> ParseResult<Option<VNode>> {
    let mut node = VNode::element(tag);
    if let Some(span) = props.options().int_at_least("span", 1)? {
        node = node.with_attr("colspan", span.to_string());
    }
    Ok(Some(node.with_children(props.children)))
}
