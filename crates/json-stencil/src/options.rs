//! Per-call configuration for the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StencilError;

pub const DEFAULT_START_MARKER: &str = "${";
pub const DEFAULT_END_MARKER: &str = "}";
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 64;

/// What to do when a placeholder path does not resolve in the context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// Leave the placeholder text in place.
    #[default]
    Ignore,
    /// Fail the whole call with [`StencilError::MissingKey`].
    Error,
    /// Drop the object entry or array element holding the placeholder.
    Remove,
}

impl fmt::Display for MissingKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingKeyPolicy::Ignore => "ignore",
            MissingKeyPolicy::Error => "error",
            MissingKeyPolicy::Remove => "remove",
        };
        f.write_str(name)
    }
}

impl FromStr for MissingKeyPolicy {
    type Err = StencilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(MissingKeyPolicy::Ignore),
            "error" => Ok(MissingKeyPolicy::Error),
            "remove" => Ok(MissingKeyPolicy::Remove),
            other => Err(StencilError::configuration(format!(
                "unknown missing-key policy `{other}` (expected ignore, error or remove)"
            ))),
        }
    }
}

/// Engine options. Immutable for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    pub start_marker: String,
    pub end_marker: String,
    pub enable_interpolation: bool,
    pub on_missing_key: MissingKeyPolicy,
    pub max_recursion_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            enable_interpolation: false,
            on_missing_key: MissingKeyPolicy::Ignore,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markers(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_marker = start.into();
        self.end_marker = end.into();
        self
    }

    pub fn with_interpolation(mut self, enable: bool) -> Self {
        self.enable_interpolation = enable;
        self
    }

    pub fn with_missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.on_missing_key = policy;
        self
    }

    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Checks the options on their own, independent of any template.
    pub fn validate(&self) -> Result<(), StencilError> {
        if self.start_marker.is_empty() {
            return Err(StencilError::configuration("start marker cannot be empty"));
        }
        if self.end_marker.is_empty() {
            return Err(StencilError::configuration("end marker cannot be empty"));
        }
        if self.start_marker == self.end_marker {
            return Err(StencilError::configuration(
                "start and end markers must be different",
            ));
        }
        if self.max_recursion_depth == 0 {
            return Err(StencilError::configuration(
                "max recursion depth must be at least 1",
            ));
        }
        if self.enable_interpolation && self.on_missing_key == MissingKeyPolicy::Remove {
            return Err(StencilError::configuration(
                "the remove missing-key policy cannot be combined with interpolation",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.start_marker, "${");
        assert_eq!(opts.end_marker, "}");
        assert!(!opts.enable_interpolation);
        assert_eq!(opts.on_missing_key, MissingKeyPolicy::Ignore);
        assert_eq!(opts.max_recursion_depth, 64);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_bad_markers() {
        assert!(Options::new().with_markers("", "}").validate().is_err());
        assert!(Options::new().with_markers("{{", "").validate().is_err());
        assert!(Options::new().with_markers("%", "%").validate().is_err());
        assert!(Options::new().with_markers("<<", ">>").validate().is_ok());
    }

    #[test]
    fn rejects_zero_depth() {
        let err = Options::new().with_max_recursion_depth(0).validate().unwrap_err();
        assert!(matches!(err, StencilError::Configuration(_)));
    }

    #[test]
    fn rejects_remove_with_interpolation() {
        let opts = Options::new()
            .with_interpolation(true)
            .with_missing_key(MissingKeyPolicy::Remove);
        assert!(opts.validate().is_err());
    }

    #[test]
    fn policy_round_trips_through_text() {
        for policy in [
            MissingKeyPolicy::Ignore,
            MissingKeyPolicy::Error,
            MissingKeyPolicy::Remove,
        ] {
            assert_eq!(policy.to_string().parse::<MissingKeyPolicy>(), Ok(policy));
        }
        assert!("drop".parse::<MissingKeyPolicy>().is_err());
    }

    #[test]
    fn deserializes_partial_config() {
        let opts: Options = serde_json::from_str(
            r#"{"enableInterpolation": true, "onMissingKey": "error", "startMarker": "{{", "endMarker": "}}"}"#,
        )
        .unwrap();
        assert!(opts.enable_interpolation);
        assert_eq!(opts.on_missing_key, MissingKeyPolicy::Error);
        assert_eq!(opts.start_marker, "{{");
        assert_eq!(opts.max_recursion_depth, 64);
    }

    #[test]
    fn rejects_unknown_config_fields() {
        assert!(serde_json::from_str::<Options>(r#"{"maxDepth": 3}"#).is_err());
    }
}
