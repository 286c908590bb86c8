//! Command line front end: file loading, option flags and output rendering
//! around the engine. Used by the `json-stencil` binary.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::{apply, apply_reverse, build_reverse, MissingKeyPolicy, Options, StencilError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("a context or result document is required unless --emit-reverse-template is given")]
    MissingData,

    #[error("cannot render output: {0}")]
    Render(serde_json::Error),

    #[error(transparent)]
    Engine(#[from] StencilError),
}

/// Substitute placeholders in a JSON template, or recover the context from a
/// result produced earlier.
#[derive(Debug, Parser)]
#[command(name = "json-stencil", version)]
pub struct Args {
    /// Template document.
    pub template: PathBuf,

    /// Context document, or with --reverse a previously produced result.
    pub data: Option<PathBuf>,

    /// Reconstruct the context from a result instead of applying the template.
    #[arg(long)]
    pub reverse: bool,

    /// Print the reverse template derived from TEMPLATE and stop.
    #[arg(long, conflicts_with = "reverse")]
    pub emit_reverse_template: bool,

    /// Substitute placeholders embedded in longer strings.
    #[arg(long, overrides_with = "no_interpolation")]
    pub interpolation: bool,

    /// Only substitute strings that are exactly one placeholder (default).
    #[arg(long, overrides_with = "interpolation")]
    pub no_interpolation: bool,

    /// Behavior for unresolved paths: ignore, error or remove.
    #[arg(long, value_name = "POLICY")]
    pub missing_key: Option<MissingKeyPolicy>,

    /// Placeholder start marker (default `${`).
    #[arg(long, value_name = "MARKER", allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Placeholder end marker (default `}`).
    #[arg(long, value_name = "MARKER", allow_hyphen_values = true)]
    pub end: Option<String>,

    /// Maximum nesting and placeholder-chain depth (default 64).
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// JSON file with engine options; flags given here take precedence.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the output on a single line.
    #[arg(long)]
    pub compact: bool,

    /// Log engine activity to stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Engine options from the config file (if any) with flags applied on top.
    pub fn options(&self) -> Result<Options, CliError> {
        let mut options = match &self.config {
            Some(path) => {
                let text = read_to_string(path)?;
                serde_json::from_str(&text).map_err(|source| CliError::Config {
                    path: path.clone(),
                    source,
                })?
            }
            None => Options::default(),
        };
        if self.interpolation {
            options.enable_interpolation = true;
        }
        if self.no_interpolation {
            options.enable_interpolation = false;
        }
        if let Some(policy) = self.missing_key {
            options.on_missing_key = policy;
        }
        if let Some(start) = &self.start {
            options.start_marker = start.clone();
        }
        if let Some(end) = &self.end {
            options.end_marker = end.clone();
        }
        if let Some(depth) = self.max_depth {
            options.max_recursion_depth = depth;
        }
        Ok(options)
    }
}

/// Runs the requested operation and returns the document to print.
pub fn run(args: &Args) -> Result<Value, CliError> {
    let options = args.options()?;
    let template = read_json(&args.template)?;

    if args.emit_reverse_template {
        return Ok(build_reverse(&template, &options)?);
    }

    let data_path = args.data.as_deref().ok_or(CliError::MissingData)?;
    let data = read_json(data_path)?;

    if args.reverse {
        let reverse = build_reverse(&template, &options)?;
        Ok(apply_reverse(&reverse, &data)?)
    } else {
        Ok(apply(&template, &data, &options)?)
    }
}

/// Serializes `value`, pretty-printed with two-space indentation unless
/// `compact` is set.
pub fn render(value: &Value, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    out.map_err(CliError::Render)
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_to_string(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("json-stencil").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn flags_map_onto_options() {
        let args = parse(&[
            "t.json",
            "c.json",
            "--interpolation",
            "--missing-key",
            "error",
            "--start",
            "{{",
            "--end",
            "}}",
            "--max-depth",
            "8",
        ]);
        let options = args.options().unwrap();
        assert!(options.enable_interpolation);
        assert_eq!(options.on_missing_key, MissingKeyPolicy::Error);
        assert_eq!(options.start_marker, "{{");
        assert_eq!(options.end_marker, "}}");
        assert_eq!(options.max_recursion_depth, 8);
    }

    #[test]
    fn last_interpolation_flag_wins() {
        let args = parse(&["t.json", "--interpolation", "--no-interpolation"]);
        assert!(!args.options().unwrap().enable_interpolation);
        let args = parse(&["t.json", "--no-interpolation", "--interpolation"]);
        assert!(args.options().unwrap().enable_interpolation);
    }

    #[test]
    fn rejects_unknown_policy() {
        let argv = ["json-stencil", "t.json", "--missing-key", "skip"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn reverse_conflicts_with_emit() {
        let argv = ["json-stencil", "t.json", "--reverse", "--emit-reverse-template"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn render_modes() {
        let value = serde_json::json!({"a": [1]});
        assert_eq!(render(&value, true).unwrap(), r#"{"a":[1]}"#);
        assert_eq!(render(&value, false).unwrap(), "{\n  \"a\": [\n    1\n  ]\n}");
    }
}
