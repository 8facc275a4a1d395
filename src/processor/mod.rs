//! # Processor Module
//!
//! The orchestrator: iterates candidate files, applies the ignore
//! evaluator, resolves each file's comment style, invokes the header
//! rewriter, and aggregates the per-file outcomes into run totals.
//!
//! Processing is single-threaded and sequential; each file is read fully,
//! transformed in memory, and (in fix mode) written back fully. Per-file
//! errors are recorded and never abort the run.

mod file_io;
mod walker;

use std::path::{Path, PathBuf};

pub use file_io::FileIO;
use tracing::{debug, trace};
pub use walker::collect_files;

use crate::diff::DiffManager;
use crate::header::HeaderRewriter;
use crate::ignore::IgnoreEvaluator;
use crate::output;
use crate::report::{FileStatus, RunTotals};
use crate::styles::StyleResolver;

/// Configuration for creating a [`Processor`].
pub struct ProcessorConfig {
  pub rewriter: HeaderRewriter,
  pub resolver: Box<dyn StyleResolver>,
  pub ignore: IgnoreEvaluator,

  /// Rewrite files in place instead of only reporting
  pub fix: bool,

  /// Optional diff rendering of would-be changes
  pub diff_manager: Option<DiffManager>,
}

/// Processor for header operations across a set of files.
pub struct Processor {
  rewriter: HeaderRewriter,
  resolver: Box<dyn StyleResolver>,
  ignore: IgnoreEvaluator,
  fix: bool,
  diff_manager: DiffManager,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      rewriter: config.rewriter,
      resolver: config.resolver,
      ignore: config.ignore,
      fix: config.fix,
      diff_manager: config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None)),
    }
  }

  /// Process an explicit file list, or walk `dir` when the list is empty.
  ///
  /// Prints a status line per notable file and returns the aggregated
  /// totals; the caller decides the exit code from them.
  pub fn run(&self, files: &[PathBuf], dir: &Path, recursive: bool) -> RunTotals {
    let candidates: Vec<PathBuf> = if files.is_empty() {
      collect_files(dir, recursive)
    } else {
      files.to_vec()
    };

    let mut totals = RunTotals::default();

    for path in &candidates {
      if self.ignore.should_skip(path) {
        trace!("Skipping: {} (ignored)", path.display());
        continue;
      }

      let status = self.process_file(path);
      totals.record(&status);
      output::print_file_status(path, &status);
    }

    debug!(
      "Processed {} files ({} to update, {} errors)",
      totals.total, totals.updated, totals.errors
    );
    totals
  }

  /// Process a single file and classify the outcome.
  fn process_file(&self, path: &Path) -> FileStatus {
    let Some(style) = self.resolver.resolve(path) else {
      return FileStatus::Unsupported;
    };

    let content = match FileIO::read_content(path) {
      Ok(content) => content,
      Err(e) => return FileStatus::ReadError(root_cause(&e)),
    };

    if content.is_empty() {
      return FileStatus::Empty;
    }

    let outcome = self.rewriter.process(&content, &style);
    if !outcome.needs_update {
      return FileStatus::Ok;
    }

    // needs_update guarantees rewritten content.
    let Some(rewritten) = outcome.rewritten else {
      return FileStatus::Ok;
    };

    if self.diff_manager.is_active()
      && let Err(e) = self.diff_manager.display_diff(path, &content, &rewritten)
    {
      eprintln!("Warning: Failed to display diff for {}: {}", path.display(), e);
    }

    if !self.fix {
      return FileStatus::NeedsUpdate;
    }

    match FileIO::write_content(path, &rewritten) {
      Ok(()) => FileStatus::Updated,
      Err(e) => FileStatus::WriteError(root_cause(&e)),
    }
  }
}

/// The innermost cause of an error, for compact per-file status lines.
fn root_cause(error: &anyhow::Error) -> String {
  error.root_cause().to_string()
}

#[cfg(test)]
mod tests {
  use std::fs;
  use std::path::PathBuf;

  use super::*;
  use crate::header::HeaderTarget;
  use crate::ignore::IgnoreRule;
  use crate::styles::BuiltinResolver;

  fn target() -> HeaderTarget {
    HeaderTarget {
      license_id: "MIT".to_string(),
      author: "Test Author".to_string(),
      year: "2025".to_string(),
      notice_lines: Vec::new(),
    }
  }

  fn processor(fix: bool, rules: &[IgnoreRule], base: PathBuf) -> Processor {
    Processor::new(ProcessorConfig {
      rewriter: HeaderRewriter::new(target()),
      resolver: Box::new(BuiltinResolver),
      ignore: IgnoreEvaluator::new(rules, base),
      fix,
      diff_manager: None,
    })
  }

  #[test]
  fn test_check_mode_reports_without_modifying() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("plain.py");
    fs::write(&file, "x = 1\n").expect("write");

    let totals = processor(false, &[], dir.path().to_path_buf()).run(&[], dir.path(), true);

    assert_eq!(totals.total, 1);
    assert_eq!(totals.updated, 1);
    assert_eq!(totals.errors, 0);
    assert_eq!(fs::read_to_string(&file).expect("read"), "x = 1\n");
  }

  #[test]
  fn test_fix_mode_rewrites_in_place() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("plain.py");
    fs::write(&file, "x = 1\n").expect("write");

    let totals = processor(true, &[], dir.path().to_path_buf()).run(&[], dir.path(), true);

    assert_eq!(totals.updated, 1);
    let content = fs::read_to_string(&file).expect("read");
    assert!(content.starts_with("# SPDX-License-Identifier: MIT\n# Copyright (C) 2025  Test Author\n"));
    assert!(content.ends_with("x = 1\n"));
  }

  #[test]
  fn test_second_fix_pass_is_a_no_op() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("plain.py");
    fs::write(&file, "x = 1\n").expect("write");

    let p = processor(true, &[], dir.path().to_path_buf());
    p.run(&[], dir.path(), true);
    let after_first = fs::read_to_string(&file).expect("read");

    let totals = p.run(&[], dir.path(), true);
    assert_eq!(totals.updated, 0);
    assert_eq!(fs::read_to_string(&file).expect("read"), after_first);
  }

  #[test]
  fn test_unsupported_and_empty_are_not_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("data.bin"), "payload\n").expect("write");
    fs::write(dir.path().join("empty.py"), "").expect("write");

    let totals = processor(false, &[], dir.path().to_path_buf()).run(&[], dir.path(), true);

    assert_eq!(totals.total, 2);
    assert_eq!(totals.updated, 0);
    assert_eq!(totals.errors, 0);
  }

  #[test]
  fn test_ignore_rules_filter_candidates() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("skip.py"), "x = 1\n").expect("write");
    fs::write(dir.path().join("keep.py"), "x = 1\n").expect("write");

    let rules = vec![
      IgnoreRule {
        pattern: "*.py".to_string(),
        negate: false,
        dir_only: false,
      },
      IgnoreRule {
        pattern: "keep.py".to_string(),
        negate: true,
        dir_only: false,
      },
    ];

    let totals = processor(false, &rules, dir.path().to_path_buf()).run(&[], dir.path(), true);
    assert_eq!(totals.total, 1);
  }

  #[test]
  fn test_explicit_file_list_overrides_walk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let listed = dir.path().join("listed.py");
    fs::write(&listed, "x = 1\n").expect("write");
    fs::write(dir.path().join("unlisted.py"), "x = 1\n").expect("write");

    let totals = processor(false, &[], dir.path().to_path_buf()).run(&[listed], dir.path(), true);
    assert_eq!(totals.total, 1);
  }

  #[test]
  fn test_read_error_is_recorded_and_processing_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("gone.py");
    let present = dir.path().join("here.py");
    fs::write(&present, "x = 1\n").expect("write");

    let totals = processor(false, &[], dir.path().to_path_buf()).run(&[missing, present], dir.path(), true);

    assert_eq!(totals.total, 2);
    assert_eq!(totals.errors, 1);
    assert_eq!(totals.updated, 1);
  }
}
