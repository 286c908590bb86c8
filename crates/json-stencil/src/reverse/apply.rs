use json_stencil_pointer::{child_pointer, get_by_pointer};
use serde_json::{Map, Value};

use crate::error::StencilError;

/// Rebuilds a context from `reverse` and a forward `result`.
///
/// The root must be an object; `null` is accepted as the empty reverse
/// template. Objects are mirrored key by key and every string leaf is a
/// pointer looked up in `result`. Any other leaf, a malformed pointer, or a
/// pointer missing from `result` fails the whole call.
pub fn reconstruct(reverse: &Value, result: &Value) -> Result<Value, StencilError> {
    match reverse {
        Value::Object(map) => mirror_object(map, result, ""),
        Value::Null => Ok(Value::Object(Map::new())),
        other => Err(StencilError::Malformed {
            location: String::new(),
            reason: format!("root must be an object, found {}", type_name(other)),
        }),
    }
}

fn mirror_object(
    map: &Map<String, Value>,
    result: &Value,
    location: &str,
) -> Result<Value, StencilError> {
    let mut out = Map::with_capacity(map.len());
    for (key, node) in map {
        let here = child_pointer(location, key);
        out.insert(key.clone(), mirror(node, result, &here)?);
    }
    Ok(Value::Object(out))
}

fn mirror(node: &Value, result: &Value, location: &str) -> Result<Value, StencilError> {
    match node {
        Value::Object(map) => mirror_object(map, result, location),
        Value::String(pointer) => match get_by_pointer(result, pointer) {
            Ok(Some(found)) => Ok(found.clone()),
            Ok(None) => Err(StencilError::UnresolvedPointer {
                pointer: pointer.clone(),
                location: location.to_string(),
            }),
            Err(err) => Err(StencilError::Malformed {
                location: location.to_string(),
                reason: err.to_string(),
            }),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => {
            Err(StencilError::Malformed {
                location: location.to_string(),
                reason: format!(
                    "expected an object or a pointer string, found {}",
                    type_name(node)
                ),
            })
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
