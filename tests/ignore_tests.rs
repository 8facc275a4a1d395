//! Tests for ignore-rule sourcing and evaluation through the CLI.

mod common;

use common::{read_file, spdxheader, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_licenseignore_negation_reincludes_files() {
  let dir = tempdir().expect("tempdir");
  write_file(dir.path(), ".licenseignore", "*.py\n!keep.py\n");
  write_file(dir.path(), "keep.py", "x = 1\n");
  write_file(dir.path(), "other.py", "x = 1\n");

  spdxheader(dir.path())
    .args(["MIT", "Test Author", "--check", "--year", "2025"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Total files processed: 1"))
    .stdout(predicate::str::contains("keep.py"));
}

#[test]
fn test_explicit_ignore_file_wins_over_defaults() {
  let dir = tempdir().expect("tempdir");
  // The default would skip everything; the explicit file skips nothing.
  write_file(dir.path(), ".licenseignore", "*.py\n");
  write_file(dir.path(), "rules.ignore", "*.rs\n");
  write_file(dir.path(), "a.py", "x = 1\n");

  // The explicit rules file itself is still walked (and reported as an
  // unsupported type), so assert on the update count rather than the total.
  spdxheader(dir.path())
    .args([
      "MIT",
      "Test Author",
      "--check",
      "--year",
      "2025",
      "--ignore-file",
      "rules.ignore",
    ])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Files needing update: 1"))
    .stdout(predicate::str::contains("a.py"));
}

#[test]
fn test_gitignore_is_the_fallback_source() {
  let dir = tempdir().expect("tempdir");
  write_file(dir.path(), ".gitignore", "skip_me.py\n");
  write_file(dir.path(), "skip_me.py", "x = 1\n");
  write_file(dir.path(), "a.py", "x = 1\n");

  spdxheader(dir.path())
    .args(["MIT", "Test Author", "--check", "--year", "2025"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Total files processed: 1"));
}

#[test]
fn test_dependency_and_vcs_directories_are_skipped() {
  let dir = tempdir().expect("tempdir");
  write_file(dir.path(), "node_modules/pkg/index.js", "module.exports = 1;\n");
  write_file(dir.path(), "vendor/lib.go", "package lib\n");
  write_file(dir.path(), "src/app.js", "let x = 1;\n");

  spdxheader(dir.path())
    .args(["MIT", "Test Author", "--check", "--year", "2025"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Total files processed: 1"));
}

#[test]
fn test_builtin_filename_patterns_are_skipped() {
  let dir = tempdir().expect("tempdir");
  write_file(dir.path(), "app.min.js", "var x=1;\n");
  write_file(dir.path(), "settings.json", "{}\n");
  write_file(dir.path(), "notes.md", "# notes\n");
  write_file(dir.path(), "app.js", "let x = 1;\n");

  spdxheader(dir.path())
    .args(["MIT", "Test Author", "--check", "--year", "2025"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Total files processed: 1"));
}

#[test]
fn test_directory_rule_skips_contents() {
  let dir = tempdir().expect("tempdir");
  write_file(dir.path(), ".licenseignore", "generated/\n");
  let skipped = write_file(dir.path(), "generated/model.py", "x = 1\n");
  write_file(dir.path(), "a.py", "x = 1\n");

  spdxheader(dir.path())
    .args(["MIT", "Test Author", "--fix", "--year", "2025"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Total files processed: 1"));

  assert!(!read_file(&skipped).contains("SPDX-License-Identifier"));
}
