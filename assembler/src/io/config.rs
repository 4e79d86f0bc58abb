//! Assembler configuration stored in `<playground>/assembler.toml`.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::process::{DEFAULT_COMMAND_TIMEOUT, DEFAULT_OUTPUT_LIMIT_BYTES, ProcessLimits};
use crate::core::layout::DirNames;

/// File name looked up in the playground root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "assembler.toml";

static SHELL_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Assembler configuration (TOML).
///
/// Every field is optional in the file; the defaults describe the standard
/// esy-built playground checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Package manager executable name, looked up on `PATH`.
    pub package_manager: String,

    /// Environment variable (inside the package manager's shell) naming the
    /// build output directory.
    pub artifact_env_var: String,

    /// Abbreviation length for the stamped commit. Unset uses git's default.
    pub commit_hash_len: Option<usize>,

    /// Wall-clock limit for each external command, in seconds.
    pub command_timeout_secs: u64,

    /// Stdout/stderr kept in memory per command; the rest is discarded.
    pub output_limit_bytes: usize,

    pub dirs: DirNames,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            package_manager: "esy".to_string(),
            artifact_env_var: "cur__bin".to_string(),
            commit_hash_len: None,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT.as_secs(),
            output_limit_bytes: DEFAULT_OUTPUT_LIMIT_BYTES,
            dirs: DirNames::default(),
        }
    }
}

impl AssemblerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.package_manager.trim().is_empty() {
            return Err(anyhow!("package_manager must not be empty"));
        }
        if !SHELL_IDENTIFIER.is_match(&self.artifact_env_var) {
            return Err(anyhow!(
                "artifact_env_var must be a shell identifier (got '{}')",
                self.artifact_env_var
            ));
        }
        if self.commit_hash_len == Some(0) {
            return Err(anyhow!("commit_hash_len must be > 0"));
        }
        if self.command_timeout_secs == 0 {
            return Err(anyhow!("command_timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        for (key, name) in self.dirs.entries() {
            if name.trim().is_empty() {
                return Err(anyhow!("dirs.{key} must not be empty"));
            }
            if Path::new(name).is_absolute() {
                return Err(anyhow!("dirs.{key} must be relative (got '{name}')"));
            }
        }
        Ok(())
    }

    pub fn process_limits(&self) -> ProcessLimits {
        ProcessLimits {
            timeout: Duration::from_secs(self.command_timeout_secs),
            output_limit_bytes: self.output_limit_bytes,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AssemblerConfig::default()`.
pub fn load_config(path: &Path) -> Result<AssemblerConfig> {
    if !path.exists() {
        let cfg = AssemblerConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AssemblerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, AssemblerConfig::default());
        assert_eq!(cfg.package_manager, "esy");
        assert_eq!(cfg.artifact_env_var, "cur__bin");
        assert_eq!(cfg.dirs.staging, "_build");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "commit_hash_len = 8\ncommand_timeout_secs = 30\n\n[dirs]\nstaging = \"dist\"\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.commit_hash_len, Some(8));
        assert_eq!(cfg.command_timeout_secs, 30);
        assert_eq!(cfg.dirs.staging, "dist");
        assert_eq!(cfg.dirs.sources, "src");
        assert_eq!(cfg.package_manager, "esy");
        assert_eq!(cfg.process_limits().timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = AssemblerConfig {
            command_timeout_secs: 0,
            ..AssemblerConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("command_timeout_secs"));
    }

    #[test]
    fn rejects_non_identifier_env_var() {
        let cfg = AssemblerConfig {
            artifact_env_var: "cur__bin; rm -rf /".to_string(),
            ..AssemblerConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("shell identifier"));
    }

    #[test]
    fn rejects_empty_and_absolute_dir_names() {
        let mut cfg = AssemblerConfig::default();
        cfg.dirs.deps = " ".to_string();
        assert!(
            cfg.validate()
                .unwrap_err()
                .to_string()
                .contains("dirs.deps")
        );

        let mut cfg = AssemblerConfig::default();
        cfg.dirs.staging = std::env::temp_dir().display().to_string();
        assert!(
            cfg.validate()
                .unwrap_err()
                .to_string()
                .contains("must be relative")
        );
    }

    #[test]
    fn invalid_file_names_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "package_manager = \"\"\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
        assert!(format!("{err:#}").contains("package_manager must not be empty"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "command_timeout_secs = \"soon\"\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().starts_with("parse "));
    }
}
