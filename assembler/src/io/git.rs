//! Git adapter used to stamp the playground with the current commit.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use super::process::{ProcessLimits, run_checked};

/// Source of the commit id stamped into `index.html`.
pub trait CommitSource {
    /// Abbreviated hash of `HEAD`, trimmed.
    fn short_commit(&self) -> Result<String>;
}

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
    hash_len: Option<usize>,
    limits: ProcessLimits,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>, limits: ProcessLimits) -> Self {
        Self {
            workdir: workdir.into(),
            hash_len: None,
            limits,
        }
    }

    /// Request a fixed abbreviation length instead of git's default.
    pub fn with_hash_len(mut self, hash_len: Option<usize>) -> Self {
        self.hash_len = hash_len;
        self
    }

    fn run_capture(&self, args: &[String]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.workdir);
        run_checked(cmd, self.limits).with_context(|| format!("git {}", args.join(" ")))
    }
}

impl CommitSource for Git {
    #[instrument(skip_all, fields(workdir = %self.workdir.display()))]
    fn short_commit(&self) -> Result<String> {
        let out = self.run_capture(&rev_parse_short_args(self.hash_len))?;
        let sha = out.trim().to_string();
        debug!(sha = %sha, "resolved HEAD");
        Ok(sha)
    }
}

fn rev_parse_short_args(hash_len: Option<usize>) -> Vec<String> {
    let short = match hash_len {
        Some(len) => format!("--short={len}"),
        None => "--short".to_string(),
    };
    vec!["rev-parse".to_string(), short, "HEAD".to_string()]
}
