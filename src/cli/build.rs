//! Build a value from command-line arguments

use std::{fs, path::Path};

use tracing::debug;

use super::{CliError, json_to_value, merge_onto, yaml_to_value};
use crate::{Value, overwrite};

/// Options for the build command
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Assignments and document paths, applied in order
    pub args: Vec<String>,
    /// JSON document merged onto the value before any argument
    pub stdin: Option<String>,
}

/// Build a value starting from an empty dynamic mapping
pub fn execute_build(options: &BuildOptions) -> Result<Value, CliError> {
    let mut root = Value::dynamic_object();

    if let Some(input) = options.stdin.as_deref().filter(|s| !s.trim().is_empty()) {
        debug!("merging document from stdin");
        let doc: serde_json::Value = serde_json::from_str(input)?;
        merge_onto(&mut root, json_to_value(doc));
    }

    for arg in &options.args {
        process_arg(&mut root, arg)?;
    }

    Ok(root)
}

/// Apply one argument to `root`.
///
/// - `--KEY=VALUE` and `KEY=VALUE` overwrite the slot at `KEY` (split at the
///   first `=`).
/// - `FILE.json`, `FILE.yaml` and `FILE.yml` are decoded and merged.
pub fn process_arg(root: &mut Value, arg: &str) -> Result<(), CliError> {
    if let Some(keyval) = arg.strip_prefix("--") {
        let (key, value) = keyval
            .split_once('=')
            .ok_or_else(|| CliError::MissingValue(arg.to_string()))?;
        overwrite(root, key, value)?;
        return Ok(());
    }

    if let Some((key, value)) = arg.split_once('=') {
        overwrite(root, key, value)?;
        return Ok(());
    }

    let lower = arg.to_lowercase();
    if lower.ends_with(".json") {
        let text = read_document(arg)?;
        let doc: serde_json::Value = serde_json::from_str(&text)?;
        merge_onto(root, json_to_value(doc));
        return Ok(());
    }
    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        let text = read_document(arg)?;
        merge_onto(root, yaml_to_value(&text)?);
        return Ok(());
    }

    Err(CliError::UnknownArgument(arg.to_string()))
}

fn read_document(path: &str) -> Result<String, CliError> {
    debug!(path, "reading document");
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: Path::new(path).to_path_buf(),
        source,
    })
}
