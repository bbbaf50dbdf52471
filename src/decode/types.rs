//! Dynamic value tree produced by the document decoder

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

/// A decoded document, mapping field names to values.
///
/// Backed by a `BTreeMap` so iteration order is always lexicographic and
/// never depends on the order keys appeared on the wire.
pub type FieldMap = BTreeMap<String, DynamicValue>;

/// One decoded field value
///
/// Every wire type lands on exactly one variant. `Map` is the only nested
/// shape the flattener expands; `List` and `Opaque` pass through whole and
/// stringify verbatim downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Nested document; eliminated by flattening
    Map(FieldMap),
    /// Arrays are never flattened and render as JSON text
    List(Vec<DynamicValue>),
    /// Wire types with no scalar equivalent, pre-rendered to text
    Opaque(String),
}

impl DynamicValue {
    /// True for the nested-document variant
    pub fn is_map(&self) -> bool {
        matches!(self, DynamicValue::Map(_))
    }

    /// Canonical text form, one rule per variant.
    ///
    /// Null renders empty rather than as a sentinel word, matching the
    /// padding value for absent columns. Nested shapes render as compact
    /// JSON.
    pub fn to_text(&self) -> String {
        match self {
            DynamicValue::Null => String::new(),
            DynamicValue::Bool(b) => b.to_string(),
            DynamicValue::Int(i) => i.to_string(),
            DynamicValue::Float(f) => f.to_string(),
            DynamicValue::Text(s) | DynamicValue::Opaque(s) => s.clone(),
            DynamicValue::Map(_) | DynamicValue::List(_) => self.to_json().to_string(),
        }
    }

    /// JSON rendering, used by `to_text` for nested shapes and by the
    /// document viewer for display. Non-finite floats become JSON null.
    pub fn to_json(&self) -> JsonValue {
        match self {
            DynamicValue::Null => JsonValue::Null,
            DynamicValue::Bool(b) => JsonValue::Bool(*b),
            DynamicValue::Int(i) => JsonValue::from(*i),
            DynamicValue::Float(f) => JsonValue::from(*f),
            DynamicValue::Text(s) | DynamicValue::Opaque(s) => JsonValue::String(s.clone()),
            DynamicValue::List(items) => {
                JsonValue::Array(items.iter().map(DynamicValue::to_json).collect())
            }
            DynamicValue::Map(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Render a whole field map as JSON, preserving lexicographic key order
pub fn fields_to_json(fields: &FieldMap) -> JsonValue {
    JsonValue::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}
