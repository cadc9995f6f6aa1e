//! CLI support for overwrite
//!
//! Builds a value from a sequence of command-line arguments: documents are
//! decoded and merged onto the value, `KEY=VALUE` assignments overwrite the
//! slot addressed by `KEY`. Exposed as a library so other tools can embed the
//! same argument handling.

mod build;
mod convert;

pub use build::{BuildOptions, execute_build, process_arg};
pub use convert::{json_to_value, merge_onto, to_yaml, value_to_json, yaml_to_value};

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Compiling or applying a key failed
    #[error(transparent)]
    Overwrite(#[from] crate::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A `--KEY` argument without `=VALUE`
    #[error("value for {0:?} must be in the form of \"{0}=VALUE\"")]
    MissingValue(String),

    #[error("don't know what to do with {0:?}")]
    UnknownArgument(String),
}
