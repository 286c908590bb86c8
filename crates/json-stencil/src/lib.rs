//! JSON template substitution with a reverse mapping.
//!
//! # Overview
//!
//! A template is any JSON document whose strings may hold placeholders such
//! as `"${/user/name}"`, each naming a JSON Pointer into a separate context
//! document. [`apply`] produces a new document with the placeholders
//! replaced; [`build_reverse`] and [`apply_reverse`] run the mapping the
//! other way, recovering the context values from a result.
//!
//! A string that is exactly one placeholder is replaced by the referenced
//! value with its JSON type intact. Placeholders embedded in longer strings
//! are only substituted (as text) when interpolation is enabled.
//!
//! # Example
//!
//! ```
//! use json_stencil::{apply, apply_reverse, build_reverse, Options};
//! use serde_json::json;
//!
//! let template = json!({"name": "${/user/name}", "age": "${/user/age}"});
//! let context = json!({"user": {"name": "Ann", "age": 41}});
//! let options = Options::default();
//!
//! let result = apply(&template, &context, &options).unwrap();
//! assert_eq!(result, json!({"name": "Ann", "age": 41}));
//!
//! let reverse = build_reverse(&template, &options).unwrap();
//! assert_eq!(apply_reverse(&reverse, &result).unwrap(), context);
//! ```

pub mod cli;
pub mod cycle;
pub mod error;
pub mod forward;
pub mod options;
pub mod placeholder;
pub mod resolve;
pub mod reverse;

pub use error::{ErrorKind, StencilError};
pub use options::{MissingKeyPolicy, Options};
pub use placeholder::{Placeholder, PlaceholderParser};

use serde_json::Value;

/// Substitutes the placeholders of `template` with values from `context`.
///
/// # Errors
///
/// - [`StencilError::Configuration`] for invalid `options`, or the remove
///   policy with a template that is itself a single placeholder
/// - [`StencilError::MissingKey`] for an unresolved path under the error policy
/// - [`StencilError::Cycle`] when a placeholder chain revisits a path
/// - [`StencilError::RecursionLimit`] when nesting or chaining exceeds
///   `max_recursion_depth`
pub fn apply(template: &Value, context: &Value, options: &Options) -> Result<Value, StencilError> {
    options.validate()?;
    if options.on_missing_key == MissingKeyPolicy::Remove {
        if let Value::String(text) = template {
            let parser = PlaceholderParser::new(&options.start_marker, &options.end_marker);
            if parser.exact(text).is_some() {
                return Err(StencilError::configuration(
                    "the remove missing-key policy cannot be used with a root-level placeholder",
                ));
            }
        }
    }
    tracing::debug!(
        interpolation = options.enable_interpolation,
        policy = %options.on_missing_key,
        max_depth = options.max_recursion_depth,
        "applying template"
    );
    forward::process(template, context, options)
}

/// Derives the reverse template of `template`: an object shaped like the
/// context whose leaves are JSON Pointers into a result of [`apply`].
///
/// # Errors
///
/// [`StencilError::Configuration`] for invalid `options`, including
/// interpolation being enabled.
pub fn build_reverse(template: &Value, options: &Options) -> Result<Value, StencilError> {
    options.validate()?;
    if options.enable_interpolation {
        return Err(StencilError::configuration(
            "a reverse template cannot be built with interpolation enabled",
        ));
    }
    tracing::debug!("building reverse template");
    Ok(reverse::reverse_template(template, options))
}

/// Reconstructs the context from a reverse template and a result.
///
/// # Errors
///
/// [`StencilError::Malformed`] when the reverse template is not an object of
/// objects and pointer strings or holds an invalid pointer, and
/// [`StencilError::UnresolvedPointer`] when a pointer is absent from `result`.
pub fn apply_reverse(reverse_template: &Value, result: &Value) -> Result<Value, StencilError> {
    tracing::debug!("applying reverse template");
    reverse::reconstruct(reverse_template, result)
}
