//! Nested-map flattener
//!
//! # Overview
//!
//! Collapses nested maps into a single-level map with dotted keys:
//! `{a: {b: 1}}` becomes `{"a.b": 1}`. Each sweep expands map values by
//! exactly one level and sweeps repeat until no map values remain, so any
//! nesting depth reduces without recursion. Lists and scalars pass through
//! unchanged; a map inside a list stays inside the list.
//!
//! If two expansions produce the same dotted key, the insertion
//! encountered later in the (lexicographic) sweep wins. The backing map
//! makes that outcome deterministic for a given document no matter how its
//! keys were ordered on the wire.

use crate::decode::{DynamicValue, FieldMap};

/// Flatten nested maps into dotted keys until none remain.
///
/// Idempotent: an already-flat map comes back unchanged.
pub fn flatten(mut fields: FieldMap) -> FieldMap {
    while fields.values().any(DynamicValue::is_map) {
        fields = expand_one_level(fields);
    }
    fields
}

/// Expand every top-level map value by one level
fn expand_one_level(fields: FieldMap) -> FieldMap {
    let mut expanded = FieldMap::new();
    for (key, value) in fields {
        match value {
            DynamicValue::Map(inner) => {
                for (inner_key, inner_value) in inner {
                    expanded.insert(format!("{key}.{inner_key}"), inner_value);
                }
            }
            other => {
                expanded.insert(key, other);
            }
        }
    }
    expanded
}
