//! Extracting the project version from `package.json`.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::AssembleError;

/// Parse manifest JSON and return its `version` string.
///
/// `path` is only used in error messages. A missing or `null` version is
/// [`AssembleError::MissingVersion`]; any other non-string value is
/// [`AssembleError::InvalidVersion`].
pub fn extract_version(raw: &str, path: &Path) -> Result<String> {
    let manifest: Value =
        serde_json::from_str(raw).with_context(|| format!("parse {}", path.display()))?;
    match manifest.get("version") {
        Some(Value::String(version)) => Ok(version.clone()),
        None | Some(Value::Null) => Err(AssembleError::MissingVersion {
            path: path.to_path_buf(),
        }
        .into()),
        Some(other) => Err(AssembleError::InvalidVersion {
            path: path.to_path_buf(),
            found: other.to_string(),
        }
        .into()),
    }
}
