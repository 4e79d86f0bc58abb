//! Assemble the browser playground's `_build/` staging directory.
//!
//! Run from the playground directory (or pass `--root`). The project root is
//! the playground's parent; it must be a git checkout with a `package.json`
//! and a native build reachable through `esy`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use assembler::assemble::assemble;
use assembler::core::layout::PlaygroundLayout;
use assembler::io::config::{CONFIG_FILE_NAME, load_config};
use assembler::io::esy::EsyShell;
use assembler::io::git::Git;
use assembler::io::lookup::PathLookup;
use assembler::logging;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "assembler",
    version,
    about = "Assemble the browser playground from native build output"
)]
struct Cli {
    /// Playground directory (holds `src/`, `node_modules/` and `_build/`).
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Config file. Defaults to `assembler.toml` in the playground root;
    /// a missing file means defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("resolve playground root {}", cli.root.display()))?;
    let config_path = cli.config.unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
    let config = load_config(&config_path)?;

    let layout = PlaygroundLayout::new(root, &config.dirs);
    let limits = config.process_limits();
    let locator = PathLookup::new(limits);
    let git = Git::new(&layout.project_root, limits).with_hash_len(config.commit_hash_len);
    let esy = EsyShell::new(config.artifact_env_var.as_str(), limits);

    assemble(&layout, &config, &locator, &git, &esy)?;
    Ok(())
}
