//! Element behaviors.
//!
//! Each element contributes a validation function (semantic checks on its
//! bound options, returning the documents it references) and a render
//! function. Dispatch is an exhaustive match on [`ElementKind`], so adding a
//! kind without behavior does not compile.

mod layout;
mod link;
mod media;
mod roll;
mod save;
mod table;
mod text;
mod toggle;

pub use roll::{Roll, RollMode};
pub use table::check_table_content;

use crate::builder::ComponentBuilder;
use crate::options::OptionReader;
use crate::query::Queries;
use crate::vdom::VNode;
use codex_common::Metadata;
use codex_parser::{ElementKind, ParseNode, ParseResult};

/// Everything an element needs to render itself
pub struct RenderProps<'a> {
    pub node: &'a ParseNode,
    /// Rendered children, empty for elements that do not build children
    pub children: Vec<VNode>,
    pub builder: &'a ComponentBuilder<'a>,
}

impl<'a> RenderProps<'a> {
    pub fn options(&self) -> OptionReader<'a> {
        OptionReader::new(self.node)
    }

    pub fn metadata(&self) -> &'a Metadata {
        self.builder.metadata()
    }

    pub fn variables_key(&self) -> &'a str {
        self.builder.variables_key()
    }
}

pub fn validate(node: &ParseNode) -> ParseResult<Queries> {
    match node.kind {
        ElementKind::Align => layout::validate_align(node),
        ElementKind::Box => layout::validate_box(node),
        ElementKind::Line => layout::validate_line(node),
        ElementKind::Margin => layout::validate_margin(node),
        ElementKind::Header => text::validate_header(node),
        ElementKind::Icon => media::validate_icon(node),
        ElementKind::Image => media::validate_image(node),
        ElementKind::Link => link::validate_link(node),
        ElementKind::LinkContent => link::validate_link_content(node),
        ElementKind::LinkTitle => link::validate_link_title(node),
        ElementKind::Roll => roll::validate(node),
        ElementKind::Save => save::validate(node),
        ElementKind::Table => table::validate_table(node),
        ElementKind::TableCell | ElementKind::TableHeader => table::validate_cell(node),
        ElementKind::Toggle => toggle::validate(node),
        ElementKind::Root
        | ElementKind::Text
        | ElementKind::Block
        | ElementKind::Bold
        | ElementKind::Row
        | ElementKind::Set => Ok(Queries::new()),
    }
}

pub fn render(props: RenderProps<'_>) -> ParseResult<Option<VNode>> {
    match props.node.kind {
        ElementKind::Root => text::render_root(props),
        ElementKind::Text => text::render_text(props),
        ElementKind::Bold => text::render_bold(props),
        ElementKind::Header => text::render_header(props),
        ElementKind::Align => layout::render_align(props),
        ElementKind::Block => layout::render_block(props),
        ElementKind::Box => layout::render_box(props),
        ElementKind::Line => layout::render_line(props),
        ElementKind::Margin => layout::render_margin(props),
        ElementKind::Row => layout::render_row(props),
        ElementKind::Icon => media::render_icon(props),
        ElementKind::Image => media::render_image(props),
        ElementKind::Link => link::render_link(props),
        ElementKind::LinkContent => link::render_link_content(props),
        ElementKind::LinkTitle => link::render_link_title(props),
        ElementKind::Roll => roll::render(props),
        ElementKind::Save => save::render(props),
        ElementKind::Table => table::render_table(props),
        ElementKind::TableCell => table::render_cell(props, "td"),
        ElementKind::TableHeader => table::render_cell(props, "th"),
        ElementKind::Toggle => toggle::render(props),
        ElementKind::Set => Ok(None),
    }
}
