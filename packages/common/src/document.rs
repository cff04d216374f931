use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Kinds of campaign documents a markup link can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    Ability,
    Creature,
    Character,
    Spell,
    Encounter,
    Document,
}

impl DocumentType {
    pub const ALL: [DocumentType; 6] = [
        DocumentType::Ability,
        DocumentType::Creature,
        DocumentType::Character,
        DocumentType::Spell,
        DocumentType::Encounter,
        DocumentType::Document,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Ability => "ability",
            DocumentType::Creature => "creature",
            DocumentType::Character => "character",
            DocumentType::Spell => "spell",
            DocumentType::Encounter => "encounter",
            DocumentType::Document => "document",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("Unknown document type '{}'", s))
    }
}

/// A single record returned by the metadata lookup service.
///
/// `doc_type` is kept as the raw string the service sent so that records of
/// types this crate does not know about still round-trip; use
/// [`DocumentRecord::document_type`] to get the typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl DocumentRecord {
    pub fn new(id: impl Into<String>, doc_type: DocumentType) -> Self {
        Self {
            id: id.into(),
            doc_type: doc_type.as_str().to_string(),
            metadata: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn document_type(&self) -> Option<DocumentType> {
        self.doc_type.parse().ok()
    }

    /// Display name of the document, if it carries one
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }

    /// A metadata field rendered as plain text (strings, numbers, booleans)
    pub fn text_field(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
