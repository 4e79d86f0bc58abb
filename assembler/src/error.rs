//! Failure conditions callers need to tell apart.
//!
//! Everything else is reported as an `anyhow` context chain. These variants
//! travel inside that chain and can be recovered with
//! `anyhow::Error::downcast_ref::<AssembleError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("executable '{name}' not found on PATH")]
    ExecutableNotFound { name: String },

    #[error("manifest {} has no `version` field", .path.display())]
    MissingVersion { path: PathBuf },

    #[error("manifest {} has a non-string `version` field: {found}", .path.display())]
    InvalidVersion { path: PathBuf, found: String },

    /// The package manager printed nothing for the artifact variable, which
    /// usually means the native build environment is not set up.
    #[error("artifact folder is empty (is `${var}` defined in the build environment?)")]
    EmptyArtifactFolder { var: String },

    #[error("artifact folder printed by `${var}` is not valid UTF-8")]
    NonUtf8ArtifactFolder { var: String },

    #[error("copy source not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("cannot copy {} into its own subdirectory {}", .src.display(), .dst.display())]
    CopyIntoSelf { src: PathBuf, dst: PathBuf },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` timed out after {timeout_secs}s")]
    CommandTimedOut { command: String, timeout_secs: u64 },
}
