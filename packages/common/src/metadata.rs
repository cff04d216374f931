use crate::document::DocumentRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Variable name -> literal text, for one variables-key
pub type VariableMap = HashMap<String, String>;

/// Variables-key -> bound variables. Two fields of the same document parse
/// under different keys so their `\set` declarations never collide.
pub type VariablesCollection = HashMap<String, VariableMap>;

/// Document id -> resolved record, for one parse
pub type QueryCollection = HashMap<String, DocumentRecord>;

/// Host metadata object handed to every parse.
///
/// `fields` holds the document's own data; the flat ones (strings, numbers,
/// booleans) are readable from markup as `$fieldName`. `variables` and
/// `queries` are side channels owned by the markup pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "$vars", default)]
    pub variables: VariablesCollection,
    #[serde(rename = "$queries", default)]
    pub queries: QueryCollection,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_variable(
        mut self,
        variables_key: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.variables_mut(&variables_key.into())
            .insert(name.into(), value.into());
        self
    }

    /// A document field usable as an implicit variable. Objects, arrays and
    /// nulls are not flat and never substitute.
    pub fn flat_field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn variables_for(&self, variables_key: &str) -> Option<&VariableMap> {
        self.variables.get(variables_key)
    }

    pub fn variables_mut(&mut self, variables_key: &str) -> &mut VariableMap {
        self.variables
            .entry(variables_key.to_string())
            .or_default()
    }

    /// Resolve `$name` the way markup does: bound variable first, then flat field
    pub fn resolve_variable(&self, variables_key: &str, name: &str) -> Option<String> {
        self.variables_for(variables_key)
            .and_then(|vars| vars.get(name).cloned())
            .or_else(|| self.flat_field(name))
    }

    pub fn query(&self, id: &str) -> Option<&DocumentRecord> {
        self.queries.get(id)
    }
}
