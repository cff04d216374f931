use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rendered component tree handed to the host UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML-like element
    Element {
        tag: String,
        attributes: HashMap<String, String>,
        styles: HashMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Inline error placeholder (replaces a whole field that failed to parse)
    Error { message: String },

    /// Markup that is parsed only when the host asks for it (toggle
    /// alternates, descriptions of linked documents). `document` names the
    /// linked document whose fields the sub-parse reads, if any.
    Deferred {
        source: String,
        #[serde(rename = "variablesKey")]
        variables_key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        document: Option<String>,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: HashMap::new(),
            styles: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        VNode::Error {
            message: message.into(),
        }
    }

    pub fn deferred(source: impl Into<String>, variables_key: impl Into<String>) -> Self {
        VNode::Deferred {
            source: source.into(),
            variables_key: variables_key.into(),
            document: None,
        }
    }

    pub fn with_document(mut self, id: impl Into<String>) -> Self {
        if let VNode::Deferred {
            ref mut document, ..
        } = self
        {
            *document = Some(id.into());
        }
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Append a class name to the `class` attribute
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            let entry = attributes.entry("class".to_string()).or_default();
            if !entry.is_empty() {
                entry.push(' ');
            }
            entry.push_str(class.as_ref());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, VNode::Error { .. })
    }

    /// Visible text of this subtree, in document order
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
            VNode::Error { message } => message.clone(),
            VNode::Deferred { .. } => String::new(),
        }
    }

    /// Depth-first search for the first node matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&VNode) -> bool) -> Option<&VNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(predicate))
    }
}
