//! Template → result substitution.
//!
//! Depth accounting: the template root is depth 0, every object value or
//! array element is one deeper than its container, and resolving a
//! placeholder is one deeper than the string that holds it. A resolved
//! string is re-processed at the depth of its resolution, so each hop of a
//! placeholder chain costs exactly one level.

use serde_json::{Map, Value};

use crate::cycle::ActivePaths;
use crate::error::StencilError;
use crate::options::{MissingKeyPolicy, Options};
use crate::placeholder::PlaceholderParser;
use crate::resolve::resolve;

/// Walks `template` and substitutes placeholders from `context`.
///
/// `options` must already be validated.
pub fn process(
    template: &Value,
    context: &Value,
    options: &Options,
) -> Result<Value, StencilError> {
    let processor = Processor::new(options, context);
    let mut active = ActivePaths::new();
    processor
        .process_node(template, &mut active, 0)?
        .ok_or_else(|| {
            StencilError::configuration(
                "the remove missing-key policy cannot drop the template root",
            )
        })
}

/// Renders a resolved value for splicing into a larger string.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

struct Processor<'a> {
    options: &'a Options,
    context: &'a Value,
    parser: PlaceholderParser<'a>,
}

impl<'a> Processor<'a> {
    fn new(options: &'a Options, context: &'a Value) -> Self {
        Processor {
            options,
            context,
            parser: PlaceholderParser::new(&options.start_marker, &options.end_marker),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), StencilError> {
        if depth > self.options.max_recursion_depth {
            return Err(StencilError::RecursionLimit {
                depth,
                limit: self.options.max_recursion_depth,
            });
        }
        Ok(())
    }

    /// `Ok(None)` means the node is to be dropped from its container.
    fn process_node(
        &self,
        node: &Value,
        active: &mut ActivePaths,
        depth: usize,
    ) -> Result<Option<Value>, StencilError> {
        self.check_depth(depth)?;
        match node {
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    // Keys are never scanned for placeholders.
                    if let Some(processed) = self.process_node(value, active, depth + 1)? {
                        out.insert(key.clone(), processed);
                    }
                }
                Ok(Some(Value::Object(out)))
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(processed) = self.process_node(item, active, depth + 1)? {
                        out.push(processed);
                    }
                }
                Ok(Some(Value::Array(out)))
            }
            Value::String(text) => self.process_string(text, active, depth),
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(Some(node.clone())),
        }
    }

    fn process_string(
        &self,
        text: &str,
        active: &mut ActivePaths,
        depth: usize,
    ) -> Result<Option<Value>, StencilError> {
        if !self.parser.may_contain_placeholder(text) {
            return Ok(Some(Value::String(text.to_string())));
        }

        if let Some(placeholder) = self.parser.exact(text) {
            return match self.resolve_placeholder(placeholder.path, active, depth + 1)? {
                Some(value) => Ok(Some(value)),
                None if self.options.on_missing_key == MissingKeyPolicy::Remove => Ok(None),
                None => Ok(Some(Value::String(text.to_string()))),
            };
        }

        if !self.options.enable_interpolation {
            return Ok(Some(Value::String(text.to_string())));
        }
        self.interpolate(text, active, depth).map(Some)
    }

    fn interpolate(
        &self,
        text: &str,
        active: &mut ActivePaths,
        depth: usize,
    ) -> Result<Value, StencilError> {
        let placeholders = self.parser.find_all(text);
        if placeholders.is_empty() {
            return Ok(Value::String(text.to_string()));
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for placeholder in placeholders {
            out.push_str(&text[last..placeholder.start_offset]);
            match self.resolve_placeholder(placeholder.path, active, depth + 1)? {
                Some(value) => out.push_str(&stringify(&value)),
                None => out.push_str(placeholder.full_text),
            }
            last = placeholder.end_offset;
        }
        out.push_str(&text[last..]);
        Ok(Value::String(out))
    }

    /// Looks `path` up and, if it names a string, processes that string too.
    /// `Ok(None)` is an unresolved path under a non-raising policy.
    fn resolve_placeholder(
        &self,
        path: &str,
        active: &mut ActivePaths,
        depth: usize,
    ) -> Result<Option<Value>, StencilError> {
        self.check_depth(depth)?;
        let mut guard = active.enter(path)?;

        let Some(found) = resolve(self.context, path, self.options.on_missing_key)? else {
            tracing::trace!(path, depth, "placeholder not found in context");
            return Ok(None);
        };
        tracing::trace!(path, depth, "placeholder resolved");

        match found {
            Value::String(chained) => self.process_string(chained, &mut guard, depth),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Array(_)
            | Value::Object(_) => Ok(Some(found.clone())),
        }
    }
}
