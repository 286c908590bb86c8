use thiserror::Error;

/// Coarse classification of [`StencilError`], for hosts that map failures
/// onto exit codes or status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    MissingKey,
    Cycle,
    RecursionLimit,
    Malformed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StencilError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("missing key: `{path}` not found in context")]
    MissingKey { path: String },

    #[error("cycle detected: `{path}` is already being resolved ({})", render_cycle(.stack, .path))]
    Cycle { path: String, stack: Vec<String> },

    #[error("recursion depth {depth} exceeds the limit of {limit}")]
    RecursionLimit { depth: usize, limit: usize },

    #[error("malformed reverse template at `{location}`: {reason}")]
    Malformed { location: String, reason: String },

    #[error("reverse template at `{location}` points to `{pointer}`, which is not in the result")]
    UnresolvedPointer { pointer: String, location: String },
}

impl StencilError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StencilError::Configuration(_) => ErrorKind::Configuration,
            StencilError::MissingKey { .. } => ErrorKind::MissingKey,
            StencilError::Cycle { .. } => ErrorKind::Cycle,
            StencilError::RecursionLimit { .. } => ErrorKind::RecursionLimit,
            StencilError::Malformed { .. } | StencilError::UnresolvedPointer { .. } => {
                ErrorKind::Malformed
            }
        }
    }

    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        StencilError::Configuration(reason.into())
    }
}

fn render_cycle(stack: &[String], path: &str) -> String {
    let mut out = String::new();
    for entry in stack {
        out.push_str(entry);
        out.push_str(" -> ");
    }
    out.push_str(path);
    out
}
