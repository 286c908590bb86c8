//! JSON Pointer (RFC 6901) utilities.
//!
//! Strict helpers for [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! used by the template engine to address both context and result documents.
//!
//! # Example
//!
//! ```
//! use json_stencil_pointer::{format_json_pointer, get, parse_json_pointer};
//!
//! let path = parse_json_pointer("/foo/bar").unwrap();
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//!
//! assert_eq!(format_json_pointer(&path), "/foo/bar");
//!
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(42)));
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer `{0}` must be empty or start with '/'")]
    MissingSlash(String),
    #[error("invalid escape sequence in pointer component `{0}`")]
    InvalidEscape(String),
}

/// Unescapes a JSON Pointer path component.
///
/// `~1` becomes `/` and `~0` becomes `~`. A `~` followed by anything else,
/// or a trailing `~`, is rejected.
///
/// # Example
///
/// ```
/// use json_stencil_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b").unwrap(), "a~b");
/// assert_eq!(unescape_component("c~1d").unwrap(), "c/d");
/// assert!(unescape_component("bad~2").is_err());
/// ```
pub fn unescape_component(component: &str) -> Result<String, PointerError> {
    if !component.contains('~') {
        return Ok(component.to_string());
    }
    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(PointerError::InvalidEscape(component.to_string())),
        }
    }
    Ok(out)
}

/// Escapes a JSON Pointer path component.
///
/// # Example
///
/// ```
/// use json_stencil_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("~1"), "~01");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into unescaped path components.
///
/// - Empty string is the root (empty path)
/// - Anything else must start with `/`
/// - `"/"` addresses the empty key
///
/// # Example
///
/// ```
/// use json_stencil_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/").unwrap(), vec![""]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d").unwrap(), vec!["a~b", "c/d"]);
/// assert!(parse_json_pointer("foo").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Path, PointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(PointerError::MissingSlash(pointer.to_string()));
    };
    rest.split('/').map(unescape_component).collect()
}

/// Format path components into a JSON Pointer string.
///
/// Returns an empty string for the root path.
pub fn format_json_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Extends `parent` by one component, escaping it.
///
/// # Example
///
/// ```
/// use json_stencil_pointer::child_pointer;
///
/// assert_eq!(child_pointer("", "a/b"), "/a~1b");
/// assert_eq!(child_pointer("/list", "0"), "/list/0");
/// ```
pub fn child_pointer(parent: &str, component: &str) -> String {
    let escaped = escape_component(component);
    let mut out = String::with_capacity(parent.len() + escaped.len() + 1);
    out.push_str(parent);
    out.push('/');
    out.push_str(&escaped);
    out
}

/// Check if a string represents a valid non-negative integer array index.
///
/// # Example
///
/// ```
/// use json_stencil_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Get a value from a JSON document by path.
///
/// Returns `None` when a key is missing, an array index is invalid or out of
/// range, or a scalar is reached before the path is exhausted.
///
/// # Example
///
/// ```
/// use json_stencil_pointer::get;
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": 42}});
/// assert_eq!(get(&doc, &["foo".to_string(), "bar".to_string()]), Some(&json!(42)));
/// assert_eq!(get(&doc, &["missing".to_string()]), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for path_step in path {
        match current {
            Value::Array(arr) => {
                if !is_valid_index(path_step) {
                    return None;
                }
                let idx: usize = path_step.parse().ok()?;
                current = arr.get(idx)?;
            }
            Value::Object(map) => {
                current = map.get(path_step)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Parse `pointer` and look it up in `val` in one step.
///
/// A malformed pointer is reported as an error, a well-formed pointer that
/// does not exist in the document as `Ok(None)`.
pub fn get_by_pointer<'a>(
    val: &'a Value,
    pointer: &str,
) -> Result<Option<&'a Value>, PointerError> {
    let path = parse_json_pointer(pointer)?;
    Ok(get(val, &path))
}
