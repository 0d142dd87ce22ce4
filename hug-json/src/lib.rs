//! Hug JSON - serde_json interop for hug value graphs
//!
//! Builds [`hug_core::Value`] graphs from [`serde_json::Value`] documents
//! and dumps them back. Dumping follows `JSON.stringify`-style rules:
//!
//! - function-valued object attributes are dropped
//! - bare function values (top level or inside arrays) become null
//! - non-finite floats become null
//! - prototype attributes are not serialized (own attributes only)
//!
//! Circular value graphs are reported as [`JsonError::CircularReference`]
//! instead of recursing without bound.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::rc::Rc;
use thiserror::Error;

use hug_core::{wrap, Hug, ObjectData, Value};

/// JSON interop error types
#[derive(Debug, Error)]
pub enum JsonError {
    /// The value graph references itself
    #[error("Circular reference in value graph")]
    CircularReference,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JsonError>;

/// Build a value graph from a JSON document.
///
/// Integers that fit `i64` become [`Value::Int`]; other numbers become
/// [`Value::Float`]. Objects and arrays get fresh references with no
/// prototype link.
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::array(items.iter().map(from_json).collect()),
        serde_json::Value::Object(map) => {
            let mut obj = ObjectData::new();
            for (key, value) in map {
                obj.set(key.clone(), from_json(value));
            }
            obj.into()
        }
    }
}

/// Wrap a JSON document directly
pub fn wrap_json(json: &serde_json::Value) -> Hug {
    wrap(from_json(json))
}

/// Dump a value graph to a JSON document
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    let mut visiting = Vec::new();
    dump(value, &mut visiting)
}

fn dump(value: &Value, visiting: &mut Vec<*const ()>) -> Result<serde_json::Value> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok((*b).into()),
        Value::Int(i) => Ok((*i).into()),
        Value::Float(f) => Ok(serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)),
        Value::Str(s) => Ok(s.as_str().into()),
        // bare functions have no JSON form
        Value::Function(_) => Ok(serde_json::Value::Null),
        Value::Array(arr) => {
            let ptr = Rc::as_ptr(arr) as *const ();
            if visiting.contains(&ptr) {
                return Err(JsonError::CircularReference);
            }
            visiting.push(ptr);
            let mut items = Vec::new();
            for item in arr.borrow().iter() {
                items.push(dump(item, visiting)?);
            }
            visiting.pop();
            Ok(serde_json::Value::Array(items))
        }
        Value::Object(obj) => {
            let ptr = Rc::as_ptr(obj) as *const ();
            if visiting.contains(&ptr) {
                return Err(JsonError::CircularReference);
            }
            visiting.push(ptr);
            let mut map = serde_json::Map::new();
            for (key, attr) in obj.borrow().entries() {
                // function-valued attributes are dropped, not nulled
                if matches!(attr, Value::Function(_)) {
                    continue;
                }
                map.insert(key.clone(), dump(attr, visiting)?);
            }
            visiting.pop();
            Ok(serde_json::Value::Object(map))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hug_core::ValueKind;
    use serde_json::json;

    #[test]
    fn test_from_json_shapes() {
        assert_eq!(from_json(&json!(null)), Value::Null);
        assert_eq!(from_json(&json!(true)), Value::Bool(true));
        assert_eq!(from_json(&json!(3)), Value::Int(3));
        assert_eq!(from_json(&json!(2.5)), Value::Float(2.5));
        assert_eq!(from_json(&json!("s")), Value::Str("s".to_string()));
        // u64 beyond i64 range falls back to float
        assert_eq!(from_json(&json!(u64::MAX)).kind(), ValueKind::Float);

        let doc = from_json(&json!({"a": 1, "items": [1, "two", null]}));
        let obj = doc.as_object().expect("object").borrow();
        assert_eq!(obj.get("a"), Some(Value::Int(1)));
        assert_eq!(obj.get("items").expect("items").kind(), ValueKind::Array);
    }

    #[test]
    fn test_to_json_mixed_document() {
        let doc = from_json(&json!({
            "name": "hug",
            "version": 1,
            "tags": ["a", "b"],
            "meta": {"active": true, "score": 0.5}
        }));
        let back = to_json(&doc).expect("no cycles");
        assert_eq!(
            back,
            json!({
                "name": "hug",
                "version": 1,
                "tags": ["a", "b"],
                "meta": {"active": true, "score": 0.5}
            })
        );
    }

    #[test]
    fn test_to_json_drops_function_attributes() {
        let mut obj = ObjectData::new();
        obj.set("keep", 1);
        obj.set("fun", Value::function(|_, _, _| Value::Null));
        let dumped = to_json(&obj.into()).expect("no cycles");
        assert_eq!(dumped, json!({"keep": 1}));
    }

    #[test]
    fn test_to_json_functions_in_arrays_become_null() {
        let arr = Value::array(vec![
            Value::Int(1),
            Value::function(|_, _, _| Value::Null),
        ]);
        assert_eq!(to_json(&arr).expect("no cycles"), json!([1, null]));
        // bare functions too
        assert_eq!(
            to_json(&Value::function(|_, _, _| Value::Null)).expect("no cycles"),
            json!(null)
        );
    }

    #[test]
    fn test_to_json_non_finite_floats_become_null() {
        assert_eq!(to_json(&Value::Float(f64::NAN)).unwrap(), json!(null));
        assert_eq!(to_json(&Value::Float(f64::INFINITY)).unwrap(), json!(null));
        assert_eq!(to_json(&Value::Float(1.5)).unwrap(), json!(1.5));
    }

    #[test]
    fn test_to_json_skips_prototype_attributes() {
        let proto = ObjectData::from_entries([("inherited", Value::Int(1))]).into_ref();
        let mut obj = ObjectData::with_proto(proto);
        obj.set("own", 2);
        assert_eq!(to_json(&obj.into()).unwrap(), json!({"own": 2}));
    }

    #[test]
    fn test_to_json_detects_cycles() {
        let obj = ObjectData::new().into_ref();
        obj.borrow_mut().set("me", obj.clone());
        let err = to_json(&Value::Object(obj)).expect_err("cycle");
        assert!(matches!(err, JsonError::CircularReference));
    }

    #[test]
    fn test_shared_subtrees_are_not_cycles() {
        let shared = ObjectData::from_entries([("n", Value::Int(1))]).into_ref();
        let mut obj = ObjectData::new();
        obj.set("left", shared.clone());
        obj.set("right", shared);
        assert_eq!(
            to_json(&obj.into()).expect("diamond, not a cycle"),
            json!({"left": {"n": 1}, "right": {"n": 1}})
        );
    }

    #[test]
    fn test_wrap_json_chain() {
        let hug = wrap_json(&json!({"a": 1, "b": {"c": 2}}));

        let c = hug
            .invoke("b", &[])
            .expect("descend")
            .invoke("c", &[])
            .expect("read")
            .into_value()
            .expect("chain ends");
        assert_eq!(c, Value::Int(2));
    }
}
