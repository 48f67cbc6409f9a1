use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "modelboard maintainer tasks")]
struct Cli {
    #[command(subcommand)]
    command: Option<CommandName>,
}

#[derive(Debug, Default, Subcommand)]
enum CommandName {
    /// Update default_config.toml by running `modelboard config generate`.
    #[default]
    UpdateDefaultConfig,
    /// Replace the CLI test fixture with a live `modelboard models snapshot`.
    UpdateFixture,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        CommandName::UpdateDefaultConfig => update_default_config(),
        CommandName::UpdateFixture => update_fixture(),
    }
}

fn update_default_config() -> Result<()> {
    let root = project_root()?;
    let dest = root
        .join("crates")
        .join("modelboard-core")
        .join("default_config.toml");

    let output = modelboard(&root)
        .arg("config")
        .arg("generate")
        .output()
        .context("run `cargo run -p modelboard -- config generate`")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("config generate failed: {}", stderr);
    }

    fs::write(&dest, &output.stdout)
        .with_context(|| format!("write config to {}", dest.display()))?;

    println!("Updated {}", dest.display());
    Ok(())
}

/// Fetches the live catalog into a temp file, then replaces the fixture.
///
/// Only runs when asked for by name. The CLI tests assert exact counts
/// against this fixture.
fn update_fixture() -> Result<()> {
    let root = project_root()?;
    let temp_dir = tempfile::tempdir().context("create temp dir for MODELBOARD_HOME")?;
    let snapshot_path = temp_dir.path().join("catalog.json");

    let status = modelboard(&root)
        .env("MODELBOARD_HOME", temp_dir.path())
        .arg("models")
        .arg("snapshot")
        .arg(&snapshot_path)
        .status()
        .context("run `cargo run -p modelboard -- models snapshot`")?;

    if !status.success() {
        bail!("models snapshot failed with status {status}");
    }

    if !snapshot_path.exists() {
        bail!("models snapshot did not produce {}", snapshot_path.display());
    }

    let dest = root
        .join("crates")
        .join("modelboard-cli")
        .join("tests")
        .join("fixtures")
        .join("catalog.json");
    fs::copy(&snapshot_path, &dest)
        .with_context(|| format!("copy {} to {}", snapshot_path.display(), dest.display()))?;

    println!("Updated {}", dest.display());
    Ok(())
}

fn modelboard(root: &Path) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.current_dir(root)
        .arg("run")
        .arg("--quiet")
        .arg("-p")
        .arg("modelboard")
        .arg("--");
    cmd
}

fn project_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .ancestors()
        .nth(2)
        .context("locate workspace root from CARGO_MANIFEST_DIR")?;
    Ok(root.to_path_buf())
}
