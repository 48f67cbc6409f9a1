//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Path to the checked-in catalog snapshot (8 valid models, 5 providers).
pub fn catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("catalog.json")
}

pub fn catalog_json() -> serde_json::Value {
    let raw = std::fs::read_to_string(catalog_path()).expect("read fixture");
    serde_json::from_str(&raw).expect("parse fixture")
}

/// Creates a temp MODELBOARD_HOME directory for test isolation.
pub fn temp_home() -> TempDir {
    TempDir::new().expect("create temp modelboard home")
}

/// `modelboard` isolated from the user's config and locale.
pub fn modelboard(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("modelboard");
    cmd.env("MODELBOARD_HOME", home.path())
        .env_remove("MODELBOARD_LOCALE")
        .env_remove("MODELBOARD_API_URL")
        .env_remove("MODELBOARD_LOG");
    cmd
}

/// Like [`modelboard`], reading the fixture snapshot.
pub fn modelboard_offline(home: &TempDir) -> Command {
    let mut cmd = modelboard(home);
    cmd.arg("--catalog").arg(catalog_path());
    cmd
}
