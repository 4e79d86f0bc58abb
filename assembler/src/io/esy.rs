//! Asking the package manager where the native build put its output.
//!
//! esy exposes build locations to commands run through it as `cur__*`
//! environment variables, so the artifact folder is whatever
//! `esy bash -c 'echo $cur__bin'` prints from the project root.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use super::process::{ProcessLimits, run_checked_bytes};
use crate::core::shell_output::artifact_folder;

/// Resolves the directory holding the compiled playground host.
pub trait ArtifactLocator {
    fn artifact_folder(&self, executable: &Path, project_root: &Path) -> Result<PathBuf>;
}

/// Runs `<executable> bash -c "echo $<var>"` in the project root.
#[derive(Debug, Clone)]
pub struct EsyShell {
    env_var: String,
    limits: ProcessLimits,
}

impl EsyShell {
    pub fn new(env_var: impl Into<String>, limits: ProcessLimits) -> Self {
        Self {
            env_var: env_var.into(),
            limits,
        }
    }

    fn command(&self, executable: &Path, project_root: &Path) -> Command {
        let mut cmd = Command::new(executable);
        cmd.arg("bash")
            .arg("-c")
            .arg(format!("echo ${}", self.env_var))
            .current_dir(project_root);
        cmd
    }
}

impl ArtifactLocator for EsyShell {
    #[instrument(skip_all, fields(executable = %executable.display(), var = %self.env_var))]
    fn artifact_folder(&self, executable: &Path, project_root: &Path) -> Result<PathBuf> {
        let stdout = run_checked_bytes(self.command(executable, project_root), self.limits)
            .with_context(|| format!("query ${} in {}", self.env_var, project_root.display()))?;
        let folder = artifact_folder(&stdout, &self.env_var)?;
        debug!(folder = %folder.display(), "artifact folder resolved");
        Ok(folder)
    }
}
