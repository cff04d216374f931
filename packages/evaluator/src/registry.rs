/// Element registry
///
/// One descriptor per [`ElementKind`], built once on first use. Command
/// names (aliases included) are resolved by [`ElementKind::from_command`];
/// behavior is dispatched by `match` in [`crate::elements`].
use codex_parser::{ElementKind, ParseError, ParseResult};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::builtin);

/// Static description of one markup element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    pub kind: ElementKind,
    /// Key that a bare (unkeyed) option binds to
    pub default_key: Option<&'static str>,
    /// Whether the builder renders children before the element sees them
    pub build_children: bool,
    /// Accepted option keys; `None` means options are not bound at all
    pub valid_options: Option<&'static [&'static str]>,
}

impl ElementDescriptor {
    const fn new(
        kind: ElementKind,
        default_key: Option<&'static str>,
        build_children: bool,
        valid_options: Option<&'static [&'static str]>,
    ) -> Self {
        Self {
            kind,
            default_key,
            build_children,
            valid_options,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn accepts(&self, key: &str) -> bool {
        self.valid_options
            .map(|keys| keys.contains(&key))
            .unwrap_or(false)
    }
}

fn descriptor_for(kind: ElementKind) -> ElementDescriptor {
    use ElementKind as K;

    match kind {
        K::Root => ElementDescriptor::new(kind, None, true, Some(&[])),
        K::Text => ElementDescriptor::new(kind, None, false, None),
        K::Align => ElementDescriptor::new(kind, Some("direction"), true, Some(&["direction", "weight"])),
        K::Block => ElementDescriptor::new(kind, None, true, Some(&[])),
        K::Bold => ElementDescriptor::new(kind, None, true, Some(&[])),
        K::Box => ElementDescriptor::new(kind, Some("border"), true, Some(&["border"])),
        K::Header => ElementDescriptor::new(kind, Some("size"), true, Some(&["size"])),
        K::Icon => ElementDescriptor::new(kind, Some("icon"), false, Some(&["icon", "size", "tooltip"])),
        K::Image => ElementDescriptor::new(
            kind,
            Some("href"),
            false,
            Some(&["href", "width", "height", "border"]),
        ),
        K::Line => ElementDescriptor::new(kind, Some("width"), false, Some(&["width"])),
        K::Link => ElementDescriptor::new(kind, Some("href"), true, Some(&["href", "newTab"])),
        K::LinkContent => ElementDescriptor::new(kind, Some("fileId"), false, Some(&["fileId", "border"])),
        K::LinkTitle => ElementDescriptor::new(kind, Some("fileId"), false, Some(&["fileId"])),
        K::Margin => ElementDescriptor::new(
            kind,
            Some("margin"),
            true,
            Some(&["margin", "top", "bottom", "left", "right"]),
        ),
        K::Roll => ElementDescriptor::new(
            kind,
            Some("dice"),
            false,
            Some(&["dice", "num", "mod", "mode", "type", "desc", "critRange"]),
        ),
        K::Row => ElementDescriptor::new(kind, None, true, Some(&[])),
        K::Save => ElementDescriptor::new(kind, Some("value"), false, Some(&["value", "type", "tooltip"])),
        K::Set => ElementDescriptor::new(kind, None, false, Some(&[])),
        K::Table => ElementDescriptor::new(kind, None, false, Some(&["border", "columns"])),
        K::TableCell => ElementDescriptor::new(kind, Some("span"), true, Some(&["span"])),
        K::TableHeader => ElementDescriptor::new(kind, Some("span"), true, Some(&["span"])),
        K::Toggle => ElementDescriptor::new(kind, Some("content"), false, Some(&["content", "alt"])),
    }
}

/// Descriptors for every element kind
#[derive(Debug)]
pub struct Registry {
    descriptors: HashMap<ElementKind, ElementDescriptor>,
}

impl Registry {
    /// Registry with every built-in element
    pub fn builtin() -> Self {
        Self {
            descriptors: ElementKind::ALL
                .into_iter()
                .map(|kind| (kind, descriptor_for(kind)))
                .collect(),
        }
    }

    pub fn descriptor(&self, kind: ElementKind) -> ParseResult<&ElementDescriptor> {
        self.descriptors
            .get(&kind)
            .ok_or_else(|| ParseError::unknown_command(kind.name()))
    }

    /// Descriptor for a command name as written in markup
    pub fn lookup(&self, command: &str) -> Option<&ElementDescriptor> {
        ElementKind::from_command(command).and_then(|kind| self.descriptors.get(&kind))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// The process-wide registry
pub fn registry() -> &'static Registry {
    &REGISTRY
}
