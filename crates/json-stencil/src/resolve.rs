//! Path lookup in the context document.

use json_stencil_pointer::{get, parse_json_pointer};
use serde_json::Value;

use crate::error::StencilError;
use crate::options::MissingKeyPolicy;

/// Resolves a pointer-style `path` against `root`.
///
/// Every kind of failure (malformed pointer, missing key, bad or
/// out-of-range index, descending into a scalar) is the same "not found".
/// Under [`MissingKeyPolicy::Error`] it is raised as
/// [`StencilError::MissingKey`]; otherwise it is `Ok(None)`.
pub fn resolve<'a>(
    root: &'a Value,
    path: &str,
    policy: MissingKeyPolicy,
) -> Result<Option<&'a Value>, StencilError> {
    match lookup(root, path) {
        Some(found) => Ok(Some(found)),
        None if policy == MissingKeyPolicy::Error => Err(StencilError::MissingKey {
            path: path.to_string(),
        }),
        None => Ok(None),
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let steps = parse_json_pointer(path).ok()?;
    get(root, &steps)
}
