//! Test-only fakes and fixture trees.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::core::layout::{DirNames, PlaygroundLayout};
use crate::core::shell_output::artifact_folder;
use crate::error::AssembleError;
use crate::io::esy::ArtifactLocator;
use crate::io::git::CommitSource;
use crate::io::lookup::ExecutableLocator;
use crate::io::process::{ProcessLimits, run_checked};

/// `index.html` written into fixture playground sources.
pub const INDEX_HTML: &str = "<!doctype html>\n\
<html>\n\
<head><title>Revery Playground {#VERSION}</title></head>\n\
<body>\n\
<footer>Revery {#VERSION} ({#COMMIT}) <a href=\"https://github.com/revery-ui/revery/commit/{#COMMIT}\">source</a></footer>\n\
</body>\n\
</html>\n";

pub const FIXTURE_VERSION: &str = "0.28.1";

/// Locator that returns a fixed path, or fails as not found.
#[derive(Debug, Default)]
pub struct FakeLocator {
    path: Option<PathBuf>,
    pub calls: Cell<usize>,
}

impl FakeLocator {
    pub fn found(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            calls: Cell::new(0),
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }
}

impl ExecutableLocator for FakeLocator {
    fn locate(&self, name: &str) -> Result<PathBuf> {
        self.calls.set(self.calls.get() + 1);
        self.path.clone().ok_or_else(|| {
            AssembleError::ExecutableNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }
}

/// Commit source returning a canned id.
#[derive(Debug)]
pub struct FakeCommit {
    commit: String,
    pub calls: Cell<usize>,
}

impl FakeCommit {
    pub fn new(commit: &str) -> Self {
        Self {
            commit: commit.to_string(),
            calls: Cell::new(0),
        }
    }
}

impl CommitSource for FakeCommit {
    fn short_commit(&self) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.commit.trim().to_string())
    }
}

/// Artifact locator that interprets canned shell output the way the real one does.
#[derive(Debug)]
pub struct FakeArtifacts {
    stdout: String,
    pub calls: Cell<usize>,
}

impl FakeArtifacts {
    /// `stdout` is what `echo $cur__bin` would have printed.
    pub fn printing(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            calls: Cell::new(0),
        }
    }
}

impl ArtifactLocator for FakeArtifacts {
    fn artifact_folder(&self, _executable: &Path, _project_root: &Path) -> Result<PathBuf> {
        self.calls.set(self.calls.get() + 1);
        Ok(artifact_folder(self.stdout.as_bytes(), "cur__bin")?)
    }
}

/// Write `(relative path, contents)` pairs under `root`, creating parents.
pub fn write_files(root: &Path, files: &[(&str, &str)]) -> Result<()> {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

/// One entry of a [`snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Dir,
    File(Vec<u8>),
    Link(PathBuf),
}

/// Every entry below `root`, keyed by `/`-separated relative path.
pub fn snapshot(root: &Path) -> Result<BTreeMap<String, Entry>> {
    let mut entries = BTreeMap::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        let rel = entry
            .path()
            .strip_prefix(root)
            .context("strip snapshot root")?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let file_type = entry.file_type();
        let value = if file_type.is_symlink() {
            Entry::Link(fs::read_link(entry.path())?)
        } else if file_type.is_dir() {
            Entry::Dir
        } else {
            Entry::File(fs::read(entry.path())?)
        };
        entries.insert(rel, value);
    }
    Ok(entries)
}

/// Initialize a git repository at `root` with one empty commit.
pub fn init_git_repo(root: &Path) -> Result<()> {
    let git = |args: &[&str]| -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(root);
        run_checked(cmd, ProcessLimits::default())
    };
    git(&["init", "--quiet"])?;
    git(&["config", "user.name", "Assembler Test"])?;
    git(&["config", "user.email", "assembler-test@local.invalid"])?;
    git(&["config", "commit.gpgsign", "false"])?;
    git(&["commit", "--quiet", "--allow-empty", "-m", "chore: init"])?;
    Ok(())
}

/// A temporary project checkout with a playground, examples, dependencies,
/// and a separate native build output directory.
///
/// ```text
/// <temp>/revery/package.json
/// <temp>/revery/examples/...
/// <temp>/revery/playground/src/...
/// <temp>/revery/playground/node_modules/...
/// <temp>/esy-store/revery-bin/...
/// ```
pub struct PlaygroundFixture {
    _temp: TempDir,
    pub project_root: PathBuf,
    pub playground_root: PathBuf,
    pub artifacts_dir: PathBuf,
}

impl PlaygroundFixture {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let base = temp
            .path()
            .canonicalize()
            .context("canonicalize tempdir")?;
        let project_root = base.join("revery");
        let playground_root = project_root.join("playground");
        let artifacts_dir = base.join("esy-store").join("revery-bin");

        write_files(
            &project_root,
            &[
                (
                    "package.json",
                    r#"{"name": "revery", "version": "0.28.1", "esy": {"build": "dune build"}}"#,
                ),
                ("examples/Hello.re", "let () = print_endline(\"hello\");\n"),
                (
                    "examples/components/Button.re",
                    "module Button = { let make = () => (); };\n",
                ),
            ],
        )?;
        fs::create_dir_all(project_root.join("examples/assets/empty"))
            .context("create empty examples dir")?;

        write_files(
            &playground_root,
            &[
                ("src/index.html", INDEX_HTML),
                ("src/js/playground.js", "window.playground = {};\n"),
                ("src/css/playground.css", "body { margin: 0; }\n"),
                (
                    "node_modules/monaco-editor/package.json",
                    r#"{"name": "monaco-editor"}"#,
                ),
                (
                    "node_modules/monaco-editor/min/vs/loader.js",
                    "var require;\n",
                ),
            ],
        )?;

        write_files(
            &artifacts_dir,
            &[
                ("PlaygroundWorker.js", "self.onmessage = () => {};\n"),
                ("PlaygroundHost.js", "// compiled host\n"),
            ],
        )?;

        Ok(Self {
            _temp: temp,
            project_root,
            playground_root,
            artifacts_dir,
        })
    }

    pub fn layout(&self) -> PlaygroundLayout {
        PlaygroundLayout::new(&self.playground_root, &DirNames::default())
    }

    /// Shell output naming the fixture's artifact directory.
    pub fn artifact_stdout(&self) -> String {
        format!("{}\n", self.artifacts_dir.display())
    }
}
