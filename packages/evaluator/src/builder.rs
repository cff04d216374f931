/// Turns a validated parse tree into a [`VNode`] tree
use crate::elements::{self, RenderProps};
use crate::registry::registry;
use crate::vdom::VNode;
use codex_common::Metadata;
use codex_parser::{ElementKind, ParseError, ParseNode, ParseResult};
use tracing::{instrument, trace};

/// Builds components for one parse. Holds the per-parse metadata (with the
/// resolved query collection) and the active variables-key.
pub struct ComponentBuilder<'a> {
    metadata: &'a Metadata,
    variables_key: &'a str,
}

impl<'a> ComponentBuilder<'a> {
    pub fn new(metadata: &'a Metadata, variables_key: &'a str) -> Self {
        Self {
            metadata,
            variables_key,
        }
    }

    pub fn metadata(&self) -> &'a Metadata {
        self.metadata
    }

    pub fn variables_key(&self) -> &'a str {
        self.variables_key
    }

    /// Build one node. `None` means the node renders nothing (a `set`, or
    /// blank text).
    #[instrument(level = "trace", skip_all, fields(kind = %node.kind))]
    pub fn build(&self, node: &ParseNode, parent: Option<&ParseNode>) -> ParseResult<Option<VNode>> {
        match node.kind {
            ElementKind::Set => return Ok(None),
            ElementKind::Text if node.plain_text().trim().is_empty() => return Ok(None),
            ElementKind::TableCell | ElementKind::TableHeader => {
                let parent_kind = parent.map(|p| p.kind);
                if parent_kind != Some(ElementKind::Table) {
                    return Err(ParseError::MisplacedElement {
                        element: node.kind.name().to_string(),
                        parent: parent_kind.map(|k| k.name()).unwrap_or("nothing").to_string(),
                    });
                }
            }
            _ => {}
        }

        let descriptor = registry().descriptor(node.kind)?;
        let children = if descriptor.build_children {
            self.build_children(node)?
        } else {
            Vec::new()
        };
        trace!(children = children.len(), "Rendering element");

        elements::render(RenderProps {
            node,
            children,
            builder: self,
        })
    }

    pub fn build_children(&self, node: &ParseNode) -> ParseResult<Vec<VNode>> {
        let mut built = Vec::with_capacity(node.content.len());
        for child in &node.content {
            if let Some(vnode) = self.build(child, Some(node))? {
                built.push(vnode);
            }
        }
        Ok(built)
    }
}
