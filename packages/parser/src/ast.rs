use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Every node kind the markup knows about, including the two structural
/// kinds (`Root`, `Text`) that cannot be written as commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Root,
    Text,
    Align,
    Block,
    Bold,
    Box,
    Header,
    Icon,
    Image,
    Line,
    Link,
    LinkContent,
    LinkTitle,
    Margin,
    Roll,
    Row,
    Save,
    Set,
    Table,
    TableCell,
    TableHeader,
    Toggle,
}

impl ElementKind {
    pub const ALL: [ElementKind; 22] = [
        ElementKind::Root,
        ElementKind::Text,
        ElementKind::Align,
        ElementKind::Block,
        ElementKind::Bold,
        ElementKind::Box,
        ElementKind::Header,
        ElementKind::Icon,
        ElementKind::Image,
        ElementKind::Line,
        ElementKind::Link,
        ElementKind::LinkContent,
        ElementKind::LinkTitle,
        ElementKind::Margin,
        ElementKind::Roll,
        ElementKind::Row,
        ElementKind::Save,
        ElementKind::Set,
        ElementKind::Table,
        ElementKind::TableCell,
        ElementKind::TableHeader,
        ElementKind::Toggle,
    ];

    /// Canonical name, as used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Root => "root",
            ElementKind::Text => "text",
            ElementKind::Align => "align",
            ElementKind::Block => "block",
            ElementKind::Bold => "bold",
            ElementKind::Box => "box",
            ElementKind::Header => "header",
            ElementKind::Icon => "icon",
            ElementKind::Image => "image",
            ElementKind::Line => "line",
            ElementKind::Link => "link",
            ElementKind::LinkContent => "linkContent",
            ElementKind::LinkTitle => "linkTitle",
            ElementKind::Margin => "margin",
            ElementKind::Roll => "roll",
            ElementKind::Row => "row",
            ElementKind::Save => "save",
            ElementKind::Set => "set",
            ElementKind::Table => "table",
            ElementKind::TableCell => "tableCell",
            ElementKind::TableHeader => "tableHeader",
            ElementKind::Toggle => "toggle",
        }
    }

    /// Resolve a command name as written after `\`, aliases included
    pub fn from_command(name: &str) -> Option<Self> {
        let kind = match name {
            "align" => ElementKind::Align,
            "block" => ElementKind::Block,
            "bold" | "b" => ElementKind::Bold,
            "box" => ElementKind::Box,
            "header" | "h" => ElementKind::Header,
            "icon" => ElementKind::Icon,
            "image" => ElementKind::Image,
            "line" => ElementKind::Line,
            "link" => ElementKind::Link,
            "linkContent" => ElementKind::LinkContent,
            "linkTitle" => ElementKind::LinkTitle,
            "margin" => ElementKind::Margin,
            "roll" => ElementKind::Roll,
            "row" => ElementKind::Row,
            "save" => ElementKind::Save,
            "set" => ElementKind::Set,
            "table" => ElementKind::Table,
            "tableCell" | "td" => ElementKind::TableCell,
            "tableHeader" | "th" => ElementKind::TableHeader,
            "toggle" => ElementKind::Toggle,
            _ => return None,
        };
        Some(kind)
    }

    /// Command names that resolve to this kind
    pub fn command_names(&self) -> &'static [&'static str] {
        match self {
            ElementKind::Root | ElementKind::Text => &[],
            ElementKind::Bold => &["bold", "b"],
            ElementKind::Header => &["header", "h"],
            ElementKind::TableCell => &["tableCell", "td"],
            ElementKind::TableHeader => &["tableHeader", "th"],
            ElementKind::Align => &["align"],
            ElementKind::Block => &["block"],
            ElementKind::Box => &["box"],
            ElementKind::Icon => &["icon"],
            ElementKind::Image => &["image"],
            ElementKind::Line => &["line"],
            ElementKind::Link => &["link"],
            ElementKind::LinkContent => &["linkContent"],
            ElementKind::LinkTitle => &["linkTitle"],
            ElementKind::Margin => &["margin"],
            ElementKind::Roll => &["roll"],
            ElementKind::Row => &["row"],
            ElementKind::Save => &["save"],
            ElementKind::Set => &["set"],
            ElementKind::Table => &["table"],
            ElementKind::Toggle => &["toggle"],
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `key:value` (or bare `value`) entry of a command's option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl OrderedOption {
    pub fn keyed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }

    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }
}

/// Syntax tree node.
///
/// Text nodes carry their literal run as a single bare option and never
/// have children. `variables` is empty until validation binds the options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseNode {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub content: Vec<ParseNode>,
    pub options: Vec<OrderedOption>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub variables: HashMap<String, String>,
}

impl ParseNode {
    pub fn new(kind: ElementKind, options: Vec<OrderedOption>) -> Self {
        Self {
            kind,
            content: Vec::new(),
            options,
            variables: HashMap::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(ElementKind::Root, Vec::new())
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Text, vec![OrderedOption::bare(content)])
    }

    pub fn with_child(mut self, child: ParseNode) -> Self {
        self.content.push(child);
        self
    }

    /// Literal run of a text node
    pub fn text_value(&self) -> Option<&str> {
        match self.kind {
            ElementKind::Text => self.options.first().map(|o| o.value.as_str()),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    /// A bound option value, available after validation
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Concatenated text of every text descendant, in order
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = self.text_value() {
            out.push_str(text);
        }
        for child in &self.content {
            child.collect_text(out);
        }
    }
}
