use super::RenderProps;
use crate::options::OptionReader;
use crate::query::{single_query, Queries, QueryKind};
use crate::vdom::VNode;
use codex_common::{DocumentRecord, DocumentType};
use codex_parser::{ParseNode, ParseResult};

pub fn validate_link(node: &ParseNode) -> ParseResult<Queries> {
    let options = OptionReader::new(node);
    options.required("href")?;
    options.bool("newTab")?;
    Ok(Queries::new())
}

pub fn render_link(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let options = props.options();

    let mut node = VNode::element("a")
        .with_class("link")
        .with_attr("href", options.required("href")?);
    if options.bool("newTab")?.unwrap_or(false) {
        node = node
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener noreferrer");
    }
    Ok(Some(node.with_children(props.children)))
}

pub fn validate_link_title(node: &ParseNode) -> ParseResult<Queries> {
    let file_id = OptionReader::new(node).required("fileId")?;
    Ok(single_query(file_id, QueryKind::Title))
}

pub fn validate_link_content(node: &ParseNode) -> ParseResult<Queries> {
    let options = OptionReader::new(node);
    let file_id = options.required("fileId")?;
    options.bool("border")?;
    Ok(single_query(file_id, QueryKind::Content))
}

pub fn render_link_title(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let file_id = props.options().required("fileId")?;

    let Some(record) = props.metadata().query(file_id) else {
        return Ok(Some(link_error(file_id, "Linked document not found")));
    };
    let label = record.name().unwrap_or(&record.id);

    Ok(Some(
        VNode::element("a")
            .with_class("link-title")
            .with_attr("href", document_href(record))
            .with_child(VNode::text(label)),
    ))
}

pub fn render_link_content(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    let options = props.options();
    let file_id = options.required("fileId")?;
    let border = options.bool("border")?.unwrap_or(false);

    let Some(record) = props.metadata().query(file_id) else {
        return Ok(Some(link_error(file_id, "Linked document not found")));
    };
    let Some(doc_type) = record.document_type() else {
        return Ok(Some(link_error(
            file_id,
            &format!("Cannot display documents of type '{}'", record.doc_type),
        )));
    };

    let mut node = VNode::element("div")
        .with_class("link-content")
        .with_class(format!("link-content-{}", doc_type))
        .with_attr("data-file-id", file_id.to_string());
    if border {
        node = node.with_style("border", "1px solid currentColor");
    }

    let title = VNode::element("a")
        .with_class("link-content-title")
        .with_attr("href", document_href(record))
        .with_child(VNode::text(record.name().unwrap_or(&record.id)));
    node = node.with_child(title);

    let details = detail_fields(doc_type)
        .iter()
        .filter_map(|(key, label)| {
            record.text_field(key).map(|value| {
                VNode::element("div")
                    .with_class("link-content-field")
                    .with_attr("data-field", *key)
                    .with_child(VNode::element("strong").with_child(VNode::text(format!("{}: ", label))))
                    .with_child(VNode::text(value))
            })
        })
        .collect::<Vec<_>>();
    if !details.is_empty() {
        node = node.with_child(VNode::element("div").with_class("link-content-details").with_children(details));
    }

    if let Some(description) = record.text_field("description") {
        node = node.with_child(
            VNode::deferred(description, format!("{}.description", record.id)).with_document(&record.id),
        );
    }

    Ok(Some(node))
}

/// Summary fields shown for each document type, as (metadata key, label)
fn detail_fields(doc_type: DocumentType) -> &'static [(&'static str, &'static str)] {
    match doc_type {
        DocumentType::Ability => &[("type", "Type"), ("cost", "Cost")],
        DocumentType::Creature => &[
            ("size", "Size"),
            ("type", "Type"),
            ("alignment", "Alignment"),
            ("challenge", "Challenge"),
        ],
        DocumentType::Character => &[("race", "Race"), ("class", "Class"), ("level", "Level")],
        DocumentType::Spell => &[
            ("level", "Level"),
            ("school", "School"),
            ("time", "Casting Time"),
            ("range", "Range"),
        ],
        DocumentType::Encounter => &[("challenge", "Challenge")],
        DocumentType::Document => &[],
    }
}

fn document_href(record: &DocumentRecord) -> String {
    format!("/document/{}", record.id)
}

fn link_error(file_id: &str, message: &str) -> VNode {
    VNode::element("span")
        .with_class("link-error")
        .with_attr("data-file-id", file_id)
        .with_child(VNode::text(message))
}
