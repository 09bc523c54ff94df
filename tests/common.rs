#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use opsboard::models::Op;

/// Binary under test, isolated in its own configuration directory.
pub fn ob(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("opsboard");
    cmd.env("OPSBOARD_HOME", home.path());
    cmd.env_remove("OPSBOARD_LOG");
    cmd
}

pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("ops.json")
}

pub fn fixture_ops() -> Vec<Op> {
    let content = fs::read_to_string(fixture_path()).expect("read fixture");
    serde_json::from_str(&content).expect("parse fixture")
}

pub fn find_op<'a>(ops: &'a [Op], title: &str) -> &'a Op {
    ops.iter()
        .find(|op| op.op_title == title)
        .expect("op present in fixture")
}

/// Fresh home with `init` already run.
pub fn initialized_home() -> TempDir {
    let home = tempfile::tempdir().expect("tempdir");
    ob(&home).arg("init").assert().success();
    home
}
