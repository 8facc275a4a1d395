//! # Diff Module
//!
//! This module contains functionality for creating and rendering diffs
//! between original and rewritten content. It is used to show what would
//! change when adding or updating license headers.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for header changes.
///
/// If `show_diff` is enabled, diffs are written to stderr. If
/// `save_diff_path` is set, diffs from all files are appended to that file,
/// producing one consolidated diff.
pub struct DiffManager {
  /// Whether to show diffs on stderr
  pub show_diff: bool,

  /// Path to save the consolidated diff to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Remove a stale diff file from a previous run so appends start clean.
  pub fn init(&self) -> Result<()> {
    if let Some(path) = &self.save_diff_path
      && path.exists()
    {
      fs::remove_file(path)?;
    }
    Ok(())
  }

  /// Display and/or save a diff between the original and new content.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if self.show_diff {
      eprintln!("Diff for {}:", path.display());
    }

    let diff = TextDiff::from_lines(original, new);

    let mut diff_content = String::new();
    diff_content.push_str(&format!("Diff for {}:\n", path.display()));

    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };

      if self.show_diff {
        eprint!("{}{}", sign, change);
      }
      diff_content.push_str(&format!("{}{}", sign, change));
    }

    if self.show_diff {
      eprintln!();
    }
    diff_content.push('\n');

    if let Some(diff_path) = &self.save_diff_path {
      match OpenOptions::new().create(true).append(true).open(diff_path) {
        Ok(mut file) => {
          if let Err(e) = file.write_all(diff_content.as_bytes()) {
            eprintln!("Error writing to diff file: {}", e);
          }
        }
        Err(e) => {
          eprintln!("Error opening diff file: {}", e);
        }
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_saved_diff_accumulates_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff_path = dir.path().join("changes.diff");
    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager.init().expect("init");

    manager
      .display_diff(Path::new("a.py"), "old\n", "new\n")
      .expect("diff a");
    manager
      .display_diff(Path::new("b.py"), "x\n", "x\ny\n")
      .expect("diff b");

    let saved = fs::read_to_string(&diff_path).expect("read");
    assert!(saved.contains("Diff for a.py:"));
    assert!(saved.contains("-old"));
    assert!(saved.contains("+new"));
    assert!(saved.contains("Diff for b.py:"));
    assert!(saved.contains("+y"));
  }

  #[test]
  fn test_init_truncates_previous_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff_path = dir.path().join("changes.diff");
    fs::write(&diff_path, "stale content\n").expect("write");

    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager.init().expect("init");
    assert!(!diff_path.exists());
  }
}
