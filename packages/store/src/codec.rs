//! # Firestore typed-value codec
//!
//! The Firestore REST API wraps every value in a single-key object naming its
//! type (`{"stringValue": "x"}`, `{"integerValue": "42"}`, ...). Application
//! code works with plain JSON, so this module converts in both directions.
//!
//! | JSON | Firestore |
//! |------|-----------|
//! | `null` | `nullValue` |
//! | `true` / `false` | `booleanValue` |
//! | integer | `integerValue` (decimal string, 64-bit) |
//! | float | `doubleValue` |
//! | string | `stringValue` |
//! | array | `arrayValue.values` |
//! | object | `mapValue.fields` |
//!
//! Decoding also accepts the types JSON cannot produce: `timestampValue`,
//! `referenceValue` and `bytesValue` become strings, `geoPointValue` becomes
//! a `{latitude, longitude}` object.

use serde_json::{json, Map, Number, Value};

use crate::document::{Document, Fields};
use crate::StoreError;

/// Encode a plain JSON value as a Firestore value.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or_default() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            if values.is_empty() {
                json!({ "arrayValue": {} })
            } else {
                json!({ "arrayValue": { "values": values } })
            }
        }
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Encode a document body as a Firestore `fields` map.
pub fn encode_fields(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), encode_value(v)))
            .collect(),
    )
}

/// Decode a Firestore value into plain JSON.
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(StoreError::Decode(format!("not a typed value: {value}")));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| StoreError::Decode(format!("bad booleanValue: {inner}"))),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(Value::from)
                .ok_or_else(|| StoreError::Decode(format!("bad integerValue: {inner}")))
        }
        // Non-finite doubles arrive as strings ("NaN", "Infinity"); JSON has no
        // representation for them.
        "doubleValue" => Ok(inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| StoreError::Decode(format!("bad {kind}: {inner}"))),
        "geoPointValue" => Ok(json!({
            "latitude": inner.get("latitude").cloned().unwrap_or(Value::from(0.0)),
            "longitude": inner.get("longitude").cloned().unwrap_or(Value::from(0.0)),
        })),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(values)) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(fields) => decode_fields(fields)?,
                None => Map::new(),
            };
            Ok(Value::Object(fields))
        }
        other => Err(StoreError::Decode(format!("unknown value type {other}"))),
    }
}

/// Decode a Firestore `fields` map into a document body.
pub fn decode_fields(fields: &Value) -> Result<Fields, StoreError> {
    let Some(fields) = fields.as_object() else {
        return Err(StoreError::Decode(format!("fields is not a map: {fields}")));
    };
    fields
        .iter()
        .map(|(k, v)| decode_value(v).map(|v| (k.clone(), v)))
        .collect()
}

/// Decode a REST document resource (`{"name": ".../documents/clubs/abc", "fields": {...}}`).
pub fn decode_document(raw: &Value) -> Result<Document, StoreError> {
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode("document without a name".to_string()))?;
    let id = name.rsplit('/').next().unwrap_or(name);
    let fields = match raw.get("fields") {
        Some(fields) => decode_fields(fields)?,
        None => Map::new(),
    };
    Ok(Document::new(id, fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_value(&json!(null)), json!({ "nullValue": null }));
        assert_eq!(encode_value(&json!(true)), json!({ "booleanValue": true }));
        assert_eq!(encode_value(&json!(120)), json!({ "integerValue": "120" }));
        assert_eq!(encode_value(&json!(-3)), json!({ "integerValue": "-3" }));
        assert_eq!(encode_value(&json!(0.5)), json!({ "doubleValue": 0.5 }));
        assert_eq!(encode_value(&json!("Tech")), json!({ "stringValue": "Tech" }));
    }

    #[test]
    fn test_encode_nested() {
        let club = json!({ "grad": ["#7c3aed", "#4f46e5"], "meta": { "open": true }, "tags": [] });
        let encoded = encode_fields(club.as_object().unwrap());
        assert_eq!(
            encoded,
            json!({
                "grad": { "arrayValue": { "values": [
                    { "stringValue": "#7c3aed" },
                    { "stringValue": "#4f46e5" },
                ] } },
                "meta": { "mapValue": { "fields": { "open": { "booleanValue": true } } } },
                "tags": { "arrayValue": {} },
            })
        );
    }

    #[test]
    fn test_decode_rest_document() {
        let raw = json!({
            "name": "projects/p/databases/(default)/documents/clubs/c42",
            "fields": {
                "name": { "stringValue": "AI & ML Club" },
                "members": { "integerValue": "120" },
                "createdAt": { "timestampValue": "2024-03-01T10:00:00.123Z" },
                "grad": { "arrayValue": { "values": [
                    { "stringValue": "#7c3aed" },
                    { "stringValue": "#4f46e5" }
                ] } },
                "empty": { "arrayValue": {} },
                "where": { "geoPointValue": { "latitude": 1.5, "longitude": 2.5 } },
            },
            "createTime": "2024-03-01T10:00:00.123Z",
        });

        let doc = decode_document(&raw).unwrap();
        assert_eq!(doc.id, "c42");
        assert_eq!(doc.fields["name"], json!("AI & ML Club"));
        assert_eq!(doc.fields["members"], json!(120));
        assert_eq!(doc.fields["createdAt"], json!("2024-03-01T10:00:00.123Z"));
        assert_eq!(doc.fields["grad"], json!(["#7c3aed", "#4f46e5"]));
        assert_eq!(doc.fields["empty"], json!([]));
        assert_eq!(doc.fields["where"], json!({ "latitude": 1.5, "longitude": 2.5 }));
    }

    #[test]
    fn test_decode_document_without_fields() {
        let doc = decode_document(&json!({
            "name": "projects/p/databases/(default)/documents/users/u1"
        }))
        .unwrap();
        assert_eq!(doc.id, "u1");
        assert!(doc.fields.is_empty());
    }

    #[test]
    fn test_decode_non_finite_double_is_null() {
        assert_eq!(decode_value(&json!({ "doubleValue": "NaN" })).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_rejects_untyped_values() {
        assert!(decode_value(&json!("plain")).is_err());
        assert!(decode_value(&json!({ "integerValue": "twelve" })).is_err());
        assert!(decode_value(&json!({ "mysteryValue": 1 })).is_err());
    }
}
