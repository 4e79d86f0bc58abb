//! Canonical paths for a playground checkout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory and file names that make up a playground checkout.
///
/// `sources`, `deps` and `staging` are relative to the playground root;
/// `examples` and `manifest` to the project root (the playground's parent);
/// the `staged_*` names and `index_html` to the staging directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DirNames {
    pub sources: String,
    pub examples: String,
    pub deps: String,
    pub staging: String,
    pub staged_examples: String,
    pub staged_artifacts: String,
    pub index_html: String,
    pub manifest: String,
}

impl Default for DirNames {
    fn default() -> Self {
        Self {
            sources: "src".to_string(),
            examples: "examples".to_string(),
            deps: "node_modules".to_string(),
            staging: "_build".to_string(),
            staged_examples: "sources".to_string(),
            staged_artifacts: "host".to_string(),
            index_html: "index.html".to_string(),
            manifest: "package.json".to_string(),
        }
    }
}

impl DirNames {
    /// `(key, value)` pairs, for validation messages.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("sources", self.sources.as_str()),
            ("examples", self.examples.as_str()),
            ("deps", self.deps.as_str()),
            ("staging", self.staging.as_str()),
            ("staged_examples", self.staged_examples.as_str()),
            ("staged_artifacts", self.staged_artifacts.as_str()),
            ("index_html", self.index_html.as_str()),
            ("manifest", self.manifest.as_str()),
        ]
    }
}

/// All paths the assembler reads or writes, derived once from the playground root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundLayout {
    pub playground_root: PathBuf,
    pub project_root: PathBuf,
    pub sources_dir: PathBuf,
    pub examples_dir: PathBuf,
    pub deps_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub staged_examples_dir: PathBuf,
    pub staged_artifacts_dir: PathBuf,
    pub staged_deps_dir: PathBuf,
    pub index_html: PathBuf,
    pub manifest: PathBuf,
}

impl PlaygroundLayout {
    pub fn new(playground_root: impl Into<PathBuf>, names: &DirNames) -> Self {
        let playground_root = playground_root.into();
        let project_root = project_root_of(&playground_root);
        let staging_dir = playground_root.join(&names.staging);
        Self {
            sources_dir: playground_root.join(&names.sources),
            examples_dir: project_root.join(&names.examples),
            deps_dir: playground_root.join(&names.deps),
            staged_examples_dir: staging_dir.join(&names.staged_examples),
            staged_artifacts_dir: staging_dir.join(&names.staged_artifacts),
            staged_deps_dir: staging_dir.join(&names.deps),
            index_html: staging_dir.join(&names.index_html),
            manifest: project_root.join(&names.manifest),
            staging_dir,
            project_root,
            playground_root,
        }
    }
}

fn project_root_of(playground_root: &Path) -> PathBuf {
    match playground_root.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => playground_root.join(".."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_playground_checkout() {
        let layout = PlaygroundLayout::new("/work/revery/playground", &DirNames::default());
        assert_eq!(layout.project_root, PathBuf::from("/work/revery"));
        assert_eq!(layout.sources_dir, PathBuf::from("/work/revery/playground/src"));
        assert_eq!(layout.examples_dir, PathBuf::from("/work/revery/examples"));
        assert_eq!(
            layout.deps_dir,
            PathBuf::from("/work/revery/playground/node_modules")
        );
        assert_eq!(layout.staging_dir, PathBuf::from("/work/revery/playground/_build"));
        assert_eq!(
            layout.staged_examples_dir,
            PathBuf::from("/work/revery/playground/_build/sources")
        );
        assert_eq!(
            layout.staged_artifacts_dir,
            PathBuf::from("/work/revery/playground/_build/host")
        );
        assert_eq!(
            layout.staged_deps_dir,
            PathBuf::from("/work/revery/playground/_build/node_modules")
        );
        assert_eq!(
            layout.index_html,
            PathBuf::from("/work/revery/playground/_build/index.html")
        );
        assert_eq!(layout.manifest, PathBuf::from("/work/revery/package.json"));
    }

    #[test]
    fn custom_names_are_joined() {
        let names = DirNames {
            staging: "dist".to_string(),
            staged_artifacts: "bin".to_string(),
            ..DirNames::default()
        };
        let layout = PlaygroundLayout::new("/p/web", &names);
        assert_eq!(layout.staged_artifacts_dir, PathBuf::from("/p/web/dist/bin"));
        assert_eq!(layout.index_html, PathBuf::from("/p/web/dist/index.html"));
    }

    #[test]
    fn relative_root_without_parent_climbs_up() {
        let layout = PlaygroundLayout::new("playground", &DirNames::default());
        assert_eq!(layout.project_root, PathBuf::from("playground/.."));
    }
}
