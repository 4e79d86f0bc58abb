//! Reading the project manifest.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::manifest::extract_version;

/// Read `path` and return the manifest's `version` string.
pub fn read_version(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    extract_version(&raw, path)
}
