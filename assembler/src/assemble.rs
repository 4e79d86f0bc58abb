//! The assembly pipeline.
//!
//! Steps run strictly in order and stop at the first failure. Nothing is
//! rolled back: a failed copy leaves whatever earlier steps already wrote in
//! the staging directory. Progress lines go to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::layout::PlaygroundLayout;
use crate::core::template::{Stamp, apply_stamp};
use crate::io::config::AssemblerConfig;
use crate::io::copy::copy_tree;
use crate::io::esy::ArtifactLocator;
use crate::io::git::CommitSource;
use crate::io::lookup::ExecutableLocator;
use crate::io::manifest::read_version;

/// Values resolved while assembling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOutcome {
    pub executable: PathBuf,
    pub artifact_folder: PathBuf,
    pub stamp: Stamp,
}

/// Assemble the playground described by `layout` into its staging directory.
///
/// 1. Locate the package manager, resolve the commit id and the manifest version.
/// 2. Ask the package manager for the artifact folder.
/// 3. Copy sources, examples, artifacts and dependencies into staging.
/// 4. Stamp the staged `index.html` with version and commit.
pub fn assemble<L, C, A>(
    layout: &PlaygroundLayout,
    config: &AssemblerConfig,
    locator: &L,
    commits: &C,
    artifacts: &A,
) -> Result<AssembleOutcome>
where
    L: ExecutableLocator,
    C: CommitSource,
    A: ArtifactLocator,
{
    debug!(root = %layout.playground_root.display(), "assembling playground");

    let executable = locator
        .locate(&config.package_manager)
        .with_context(|| format!("locate {}", config.package_manager))?;
    let commit = commits.short_commit().context("resolve commit id")?;
    let version = read_version(&layout.manifest).context("resolve project version")?;
    println!("{} path: {}", config.package_manager, executable.display());
    println!("Commit id: {commit}");
    println!("Version: {version}");
    info!(executable = %executable.display(), commit = %commit, version = %version, "resolved");

    let artifact_folder = artifacts
        .artifact_folder(&executable, &layout.project_root)
        .context("resolve artifact folder")?;
    let artifact_folder = layout.project_root.join(artifact_folder);
    println!("Artifact folder: {}", artifact_folder.display());

    copy_step("sources", &layout.sources_dir, &layout.staging_dir)?;
    copy_step("examples", &layout.examples_dir, &layout.staged_examples_dir)?;
    copy_step("artifacts", &artifact_folder, &layout.staged_artifacts_dir)?;
    copy_step("dependencies", &layout.deps_dir, &layout.staged_deps_dir)?;

    let stamp = Stamp { version, commit };
    println!("Stamping {}...", layout.index_html.display());
    stamp_file(&layout.index_html, &stamp)?;
    println!("Done!");

    Ok(AssembleOutcome {
        executable,
        artifact_folder,
        stamp,
    })
}

fn copy_step(label: &str, src: &Path, dst: &Path) -> Result<()> {
    println!("Copying {label} from {} to {}...", src.display(), dst.display());
    let summary = copy_tree(src, dst).with_context(|| format!("copy {label}"))?;
    info!(
        label,
        files = summary.files,
        dirs = summary.dirs,
        links = summary.links,
        "copied"
    );
    println!("Copied {label}.");
    Ok(())
}

/// Rewrite `path` in place with the placeholders replaced.
///
/// The page is decoded lossily: invalid UTF-8 becomes U+FFFD instead of
/// failing the run.
pub fn stamp_file(path: &Path, stamp: &Stamp) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    fs::write(path, apply_stamp(&text, stamp))
        .with_context(|| format!("write {}", path.display()))
}
