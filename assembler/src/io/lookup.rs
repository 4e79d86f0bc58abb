//! Locating the package manager executable on `PATH`.

use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;
use tracing::{debug, instrument};

use super::process::{ProcessLimits, run_command_with_timeout};
use crate::core::shell_output::last_candidate;
use crate::error::AssembleError;

/// Resolves an executable name to a path.
pub trait ExecutableLocator {
    fn locate(&self, name: &str) -> Result<PathBuf>;
}

/// Looks executables up with the platform tool: `where` on Windows,
/// `which -a` elsewhere.
#[derive(Debug, Clone, Default)]
pub struct PathLookup {
    limits: ProcessLimits,
}

impl PathLookup {
    pub fn new(limits: ProcessLimits) -> Self {
        Self { limits }
    }
}

impl ExecutableLocator for PathLookup {
    #[instrument(skip(self))]
    fn locate(&self, name: &str) -> Result<PathBuf> {
        let output = run_command_with_timeout(lookup_command(name), self.limits)?;
        if output.timed_out || !output.status.success() {
            debug!(exit_code = ?output.status.code(), timed_out = output.timed_out, "lookup failed");
            return Err(not_found(name));
        }
        let stdout = output.stdout_lossy();
        let path = last_candidate(&stdout).ok_or_else(|| not_found(name))?;
        debug!(path, "executable located");
        Ok(PathBuf::from(path))
    }
}

fn lookup_command(name: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("where");
        cmd.arg(name);
        cmd
    } else {
        let mut cmd = Command::new("which");
        cmd.arg("-a").arg(name);
        cmd
    }
}

fn not_found(name: &str) -> anyhow::Error {
    AssembleError::ExecutableNotFound {
        name: name.to_string(),
    }
    .into()
}
