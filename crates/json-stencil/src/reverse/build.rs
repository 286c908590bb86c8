use json_stencil_pointer::{child_pointer, parse_json_pointer, Path};
use serde_json::{Map, Value};

use crate::options::Options;
use crate::placeholder::PlaceholderParser;

/// Builds the reverse template for `template`.
///
/// `options` must already be validated and have interpolation disabled.
pub fn reverse_template(template: &Value, options: &Options) -> Value {
    let parser = PlaceholderParser::new(&options.start_marker, &options.end_marker);
    let mut reverse = Map::new();
    walk(template, String::new(), &parser, &mut reverse);
    Value::Object(reverse)
}

/// Visits `node`, which a forward pass would place at `result_pointer`.
fn walk(
    node: &Value,
    result_pointer: String,
    parser: &PlaceholderParser<'_>,
    out: &mut Map<String, Value>,
) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                walk(value, child_pointer(&result_pointer, key), parser, out);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, child_pointer(&result_pointer, &index.to_string()), parser, out);
            }
        }
        Value::String(text) => {
            let Some(placeholder) = parser.exact(text) else {
                return;
            };
            match context_path(placeholder.path) {
                Some(steps) => insert(out, &steps, result_pointer),
                None => tracing::trace!(
                    path = placeholder.path,
                    "skipping placeholder without a usable context path"
                ),
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// The context path of an exact placeholder, or `None` when it cannot name a
/// location below the context root.
fn context_path(path: &str) -> Option<Path> {
    let steps = parse_json_pointer(path).ok()?;
    if steps.is_empty() {
        return None;
    }
    Some(steps)
}

fn insert(node: &mut Map<String, Value>, steps: &[String], result_pointer: String) {
    match steps {
        [] => {}
        [last] => match node.get(last) {
            Some(Value::Object(_)) => {
                tracing::trace!(
                    key = last.as_str(),
                    pointer = result_pointer.as_str(),
                    "keeping deeper mapping over leaf"
                );
            }
            _ => {
                node.insert(last.clone(), Value::String(result_pointer));
            }
        },
        [head, rest @ ..] => {
            let slot = node
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = slot {
                insert(child, rest, result_pointer);
            } else {
                tracing::trace!(key = head.as_str(), "replacing leaf with deeper mapping");
                let mut child = Map::new();
                insert(&mut child, rest, result_pointer);
                *slot = Value::Object(child);
            }
        }
    }
}
