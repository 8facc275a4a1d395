//! # Walker Module
//!
//! Directory traversal for candidate file collection. Directories from the
//! static exclusion set are pruned during the walk rather than filtered
//! afterwards, so large dependency trees are never descended into.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::ignore::is_excluded_dir;

/// Collect candidate files under `dir`.
///
/// The walk is recursive by default; with `recursive` false only the
/// immediate children are considered. Symlinks are not followed. Unreadable
/// entries are logged and skipped. Results are sorted for deterministic
/// processing order.
pub fn collect_files(dir: &Path, recursive: bool) -> Vec<PathBuf> {
  let max_depth = if recursive { usize::MAX } else { 1 };

  let mut files: Vec<PathBuf> = WalkDir::new(dir)
    .max_depth(max_depth)
    .into_iter()
    .filter_entry(|entry| {
      let excluded = entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(is_excluded_dir);
      if excluded {
        trace!("Pruning directory: {}", entry.path().display());
      }
      !excluded
    })
    .filter_map(|entry| match entry {
      Ok(entry) => Some(entry),
      Err(e) => {
        debug!("Skipping unreadable entry: {}", e);
        None
      }
    })
    .filter(|entry| entry.file_type().is_file())
    .map(|entry| entry.into_path())
    .collect();

  files.sort();
  debug!("Collected {} candidate files under {}", files.len(), dir.display());
  files
}
