//! Shared helpers for the integration test suite.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Build a `spdxheader` command running in the given directory.
pub fn spdxheader(dir: &Path) -> Command {
  let mut cmd = Command::cargo_bin("spdxheader").expect("spdxheader binary builds");
  cmd.current_dir(dir);
  cmd
}

/// Write a file below `root`, creating parent directories as needed.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("create parent dirs");
  }
  fs::write(&path, content).expect("write file");
  path
}

/// Read a file to a string.
pub fn read_file(path: &Path) -> String {
  fs::read_to_string(path).expect("read file")
}
