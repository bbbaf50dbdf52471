//! Binary document decoder
//!
//! # Overview
//!
//! The decode module turns one raw record into a `DynamicValue` tree rooted
//! at a map. The wire format is self-describing (every field carries its own
//! type tag and length), so parsing is delegated to the `bson` crate; this
//! module owns the mapping from wire types onto the eight `DynamicValue`
//! variants and the text renderings of types with no scalar equivalent.

mod types;

pub use types::{fields_to_json, DynamicValue, FieldMap};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bson::{Bson, Document};

use crate::error::{Error, Result};
use crate::reader::RawRecord;

/// Decode one raw record into its top-level field map.
///
/// The record bytes include the 4-byte length prefix; the wire format
/// embeds its own length in the same position, so the bytes parse as-is.
/// Failures are stamped with the record's index and byte offset.
pub fn decode_record(record: &RawRecord) -> Result<FieldMap> {
    let document = Document::from_reader(record.bytes.as_slice())
        .map_err(|e| Error::decode(record.index, record.offset, e.to_string()))?;
    Ok(document_to_fields(document))
}

fn document_to_fields(document: Document) -> FieldMap {
    document
        .into_iter()
        .map(|(key, value)| (key, from_bson(value)))
        .collect()
}

/// Map one wire value onto a `DynamicValue`
fn from_bson(value: Bson) -> DynamicValue {
    match value {
        Bson::Double(f) => DynamicValue::Float(f),
        Bson::String(s) | Bson::Symbol(s) => DynamicValue::Text(s),
        Bson::Array(items) => DynamicValue::List(items.into_iter().map(from_bson).collect()),
        Bson::Document(doc) => DynamicValue::Map(document_to_fields(doc)),
        Bson::Boolean(b) => DynamicValue::Bool(b),
        Bson::Null | Bson::Undefined => DynamicValue::Null,
        Bson::Int32(i) => DynamicValue::Int(i64::from(i)),
        Bson::Int64(i) => DynamicValue::Int(i),
        Bson::ObjectId(oid) => DynamicValue::Opaque(oid.to_hex()),
        Bson::DateTime(dt) => DynamicValue::Opaque(dt.to_chrono().to_rfc3339()),
        Bson::Binary(bin) => DynamicValue::Opaque(BASE64.encode(&bin.bytes)),
        Bson::Timestamp(ts) => DynamicValue::Opaque(format!("{}:{}", ts.time, ts.increment)),
        Bson::Decimal128(d) => DynamicValue::Opaque(d.to_string()),
        Bson::RegularExpression(re) => {
            DynamicValue::Opaque(format!("/{}/{}", re.pattern, re.options))
        }
        Bson::JavaScriptCode(code) => DynamicValue::Opaque(code),
        Bson::JavaScriptCodeWithScope(js) => DynamicValue::Opaque(js.code),
        other => DynamicValue::Opaque(other.into_relaxed_extjson().to_string()),
    }
}
