//! Firestore typed-value envelope decoding.
//!
//! The REST API wraps every field in a type tag
//! (`{"stringValue": "x"}`, `{"integerValue": "42"}`, ...). Decoding
//! flattens the envelope into plain JSON so documents look the same whether
//! they arrived as a change payload or through a backfill read.

use serde_json::{Map, Value};

/// Decode a document's `fields` map into a plain JSON object.
pub fn decode_document_fields(fields: &Map<String, Value>) -> Value {
    let mut out = Map::with_capacity(fields.len());
    for (key, value) in fields {
        out.insert(key.clone(), decode_value(value));
    }
    Value::Object(out)
}

/// Decode one typed value envelope.
pub fn decode_value(value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return Value::Null;
    };

    if let Some(s) = map.get("stringValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(v) = map.get("integerValue") {
        // Integers arrive as strings to survive 64-bit precision.
        let parsed = match v {
            Value::String(s) => s.parse::<i64>().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        };
        return parsed.map(Value::from).unwrap_or(Value::Null);
    }
    if let Some(v) = map.get("doubleValue").and_then(Value::as_f64) {
        return serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Some(v) = map.get("booleanValue").and_then(Value::as_bool) {
        return Value::Bool(v);
    }
    if let Some(s) = map.get("timestampValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if map.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(items) = map
        .get("arrayValue")
        .and_then(|a| a.get("values"))
        .and_then(Value::as_array)
    {
        return Value::Array(items.iter().map(decode_value).collect());
    }
    if map.contains_key("arrayValue") {
        // An empty array omits "values" entirely.
        return Value::Array(Vec::new());
    }
    if let Some(fields) = map
        .get("mapValue")
        .and_then(|m| m.get("fields"))
        .and_then(Value::as_object)
    {
        return decode_document_fields(fields);
    }
    if map.contains_key("mapValue") {
        return Value::Object(Map::new());
    }
    if let Some(s) = map.get("referenceValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }

    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_scalars() {
        assert_eq!(decode_value(&json!({"stringValue": "Ana"})), json!("Ana"));
        assert_eq!(decode_value(&json!({"integerValue": "38"})), json!(38));
        assert_eq!(decode_value(&json!({"doubleValue": 0.35})), json!(0.35));
        assert_eq!(decode_value(&json!({"booleanValue": true})), json!(true));
        assert_eq!(decode_value(&json!({"nullValue": null})), Value::Null);
        assert_eq!(
            decode_value(&json!({"timestampValue": "2026-03-01T10:30:00Z"})),
            json!("2026-03-01T10:30:00Z")
        );
    }

    #[test]
    fn test_decode_nested_document() {
        let fields = json!({
            "name": {"stringValue": "The Riveras"},
            "familyMembers": {"arrayValue": {"values": [
                {"mapValue": {"fields": {
                    "userId": {"stringValue": "rivera_mama"},
                    "isParent": {"booleanValue": true},
                    "age": {"integerValue": "38"}
                }}}
            ]}}
        });
        let decoded = decode_document_fields(fields.as_object().unwrap());
        assert_eq!(
            decoded,
            json!({
                "name": "The Riveras",
                "familyMembers": [
                    {"userId": "rivera_mama", "isParent": true, "age": 38}
                ]
            })
        );
    }

    #[test]
    fn test_empty_array_and_map() {
        assert_eq!(decode_value(&json!({"arrayValue": {}})), json!([]));
        assert_eq!(decode_value(&json!({"mapValue": {}})), json!({}));
    }

    #[test]
    fn test_unknown_envelope_decodes_to_null() {
        assert_eq!(decode_value(&json!({"geoPointValue": {"latitude": 1.0}})), Value::Null);
        assert_eq!(decode_value(&json!("bare")), Value::Null);
    }
}
