//! Conversion between decoded documents and overwrite values

use crate::{Mapping, Shape, Value};

use super::CliError;

/// Convert serde_json::Value to a dynamic Value
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::dynamic_array(arr.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(obj) => {
            let mut map = Mapping::new(Shape::Any);
            for (k, v) in obj {
                map.insert(k, json_to_value(v));
            }
            Value::Object(map)
        }
    }
}

/// Convert a Value to serde_json::Value
///
/// Records become objects, pointers collapse to their target or `null`.
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(seq) => {
            serde_json::Value::Array(seq.items().iter().map(value_to_json).collect())
        }
        Value::FixedArray(arr) => {
            serde_json::Value::Array(arr.items().iter().map(value_to_json).collect())
        }
        Value::Object(map) => serde_json::Value::Object(
            map.entries()
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::Record(record) => serde_json::Value::Object(
            record
                .iter()
                .map(|(k, v)| (k.to_string(), value_to_json(v)))
                .collect(),
        ),
        Value::Pointer(pointer) => pointer
            .get()
            .map(value_to_json)
            .unwrap_or(serde_json::Value::Null),
    }
}

/// Decode a YAML document into a dynamic Value
pub fn yaml_to_value(text: &str) -> Result<Value, CliError> {
    let doc: serde_json::Value = serde_yaml::from_str(text)?;
    Ok(json_to_value(doc))
}

/// Render a Value as a YAML document
pub fn to_yaml(v: &Value) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(&value_to_json(v))?)
}

/// Merge a decoded document onto `root`.
///
/// When both are mappings the document's top-level keys replace same-named
/// keys of `root` and the rest of `root` is kept. Otherwise the document
/// replaces `root`.
pub fn merge_onto(root: &mut Value, doc: Value) {
    match (root, doc) {
        (Value::Object(target), Value::Object(source)) => {
            for (k, v) in source.entries {
                target.entries.insert(k, v);
            }
        }
        (root, doc) => *root = doc,
    }
}
