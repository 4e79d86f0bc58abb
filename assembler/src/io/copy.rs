//! Recursive directory copy into the staging tree.
//!
//! Copies merge into the destination: missing directories are created,
//! existing files are overwritten, and destination entries absent from the
//! source are left alone. Symlinks are recreated rather than followed so
//! `node_modules/.bin` survives.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::AssembleError;

/// What a copy wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopySummary {
    pub files: usize,
    pub dirs: usize,
    pub links: usize,
}

/// Copy `src` (a directory or a single file) to `dst`.
///
/// Fails with [`AssembleError::SourceNotFound`] if `src` does not exist and
/// with [`AssembleError::CopyIntoSelf`] if `dst` is `src` or lies inside it.
/// Both checks happen before anything is written.
#[instrument(skip_all, fields(src = %src.display(), dst = %dst.display()))]
pub fn copy_tree(src: &Path, dst: &Path) -> Result<CopySummary> {
    let metadata = match fs::metadata(src) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(AssembleError::SourceNotFound {
                path: src.to_path_buf(),
            }
            .into());
        }
        Err(err) => return Err(err).with_context(|| format!("stat {}", src.display())),
    };
    ensure_not_nested(src, dst)?;

    let mut summary = CopySummary::default();
    if !metadata.is_dir() {
        if let Some(parent) = dst.parent() {
            create_dir(parent)?;
        }
        copy_file(src, dst)?;
        summary.files += 1;
        return Ok(summary);
    }

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("relativize {}", entry.path().display()))?;
        let target = dst.join(rel);
        let file_type = entry.file_type();
        if entry.depth() > 0 && file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            summary.links += 1;
        } else if file_type.is_dir() || entry.depth() == 0 {
            // `create_dir_all` would follow a stale link and fill its target.
            if is_symlink(&target) {
                remove_entry(&target)?;
            }
            create_dir(&target)?;
            summary.dirs += 1;
        } else {
            copy_file(entry.path(), &target)?;
            summary.files += 1;
        }
    }

    debug!(
        files = summary.files,
        dirs = summary.dirs,
        links = summary.links,
        "copy finished"
    );
    Ok(summary)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    // Unlink first: a stale link would redirect the write, and a read-only
    // copy from a previous run cannot be opened for writing.
    if let Ok(existing) = fs::symlink_metadata(to) {
        if existing.is_dir() {
            return Err(anyhow!(
                "cannot overwrite directory {} with file {}",
                to.display(),
                from.display()
            ));
        }
        remove_entry(to)?;
    }
    fs::copy(from, to)
        .map(|_| ())
        .with_context(|| format!("copy {} to {}", from.display(), to.display()))
}

fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    let link_target =
        fs::read_link(from).with_context(|| format!("read link {}", from.display()))?;
    if fs::symlink_metadata(to).is_ok() {
        remove_entry(to)?;
    }
    create_symlink(from, &link_target, to)
        .with_context(|| format!("link {} -> {}", to.display(), link_target.display()))
}

#[cfg(unix)]
fn create_symlink(_from: &Path, link_target: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(link_target, to)
}

#[cfg(windows)]
fn create_symlink(from: &Path, link_target: &Path, to: &Path) -> io::Result<()> {
    if fs::metadata(from).map(|m| m.is_dir()).unwrap_or(false) {
        std::os::windows::fs::symlink_dir(link_target, to)
    } else {
        std::os::windows::fs::symlink_file(link_target, to)
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

fn remove_entry(path: &Path) -> Result<()> {
    let metadata =
        fs::symlink_metadata(path).with_context(|| format!("stat {}", path.display()))?;
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.with_context(|| format!("remove {}", path.display()))
}

fn ensure_not_nested(src: &Path, dst: &Path) -> Result<()> {
    let src = resolve(src)?;
    let dst = resolve(dst)?;
    if dst.starts_with(&src) {
        return Err(AssembleError::CopyIntoSelf { src, dst }.into());
    }
    Ok(())
}

/// Absolute path with symlinks resolved for the longest existing prefix.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute =
        std::path::absolute(path).with_context(|| format!("absolutize {}", path.display()))?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }
    let mut resolved = existing
        .canonicalize()
        .unwrap_or_else(|_| existing.to_path_buf());
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}
