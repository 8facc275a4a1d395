//! # Output Module
//!
//! This module centralizes all user-facing output: per-file status lines,
//! the summary block, and the fix-mode hint. Formatting and colors live
//! here so the processor stays free of presentation concerns.
//!
//! ## Design Goals
//!
//! - **Scannable**: one status line per notable file, stable prefixes
//! - **Progressive**: every file with `-v`, nothing but errors with `-q`
//! - **Scriptable**: stdout stays predictable for piping/automation

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileStatus, RunTotals};

/// Width of the separator line above the summary.
const SEPARATOR_WIDTH: usize = 60;

/// Print the status line for one processed file.
///
/// Notable statuses (changed files and errors) always print; the rest only
/// print in verbose mode. Errors go to stderr and survive quiet mode.
pub fn print_file_status(path: &Path, status: &FileStatus) {
  if status.is_error() {
    let message = match status {
      FileStatus::ReadError(detail) => format!("Error reading {}: {}", display_path(path), detail),
      FileStatus::WriteError(detail) => format!("Error writing {}: {}", display_path(path), detail),
      _ => unreachable!("is_error covers exactly the error variants"),
    };
    eprintln!("{}", message.if_supports_color(Stream::Stderr, |m| m.red()));
    return;
  }

  if is_quiet() || (!is_verbose() && !status.is_notable()) {
    return;
  }

  let path = display_path(path);
  match status {
    FileStatus::Ok => println!("{}: {}", "OK".if_supports_color(Stream::Stdout, |s| s.green()), path),
    FileStatus::NeedsUpdate => println!(
      "{}: {}",
      "Needs update".if_supports_color(Stream::Stdout, |s| s.yellow()),
      path
    ),
    FileStatus::Updated => println!(
      "{}: {}",
      "Updated".if_supports_color(Stream::Stdout, |s| s.yellow()),
      path
    ),
    FileStatus::Unsupported => println!(
      "{}: {}",
      "Unsupported file type".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      path
    ),
    FileStatus::Empty => println!(
      "{}: {}",
      "Empty file".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      path
    ),
    FileStatus::ReadError(_) | FileStatus::WriteError(_) => {}
  }
}

/// Print the summary block: separator, totals, and the error tally.
pub fn print_summary(totals: &RunTotals, check_only: bool) {
  if !is_quiet() {
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
    println!("Total files processed: {}", totals.total);
    if check_only {
      println!("Files needing update: {}", totals.updated);
    } else {
      println!("Files updated: {}", totals.updated);
    }
  }
  if totals.errors > 0 {
    eprintln!(
      "{}",
      format!("Errors: {}", totals.errors).if_supports_color(Stream::Stderr, |m| m.red())
    );
  }
}

/// Print the hint shown when check mode found files needing an update.
pub fn print_hint() {
  if !is_quiet() {
    println!(
      "{}",
      "Run with --fix to update headers".if_supports_color(Stream::Stdout, |m| m.cyan())
    );
  }
}

/// Render a path relative to the working directory when it lies beneath it.
fn display_path(path: &Path) -> String {
  let relative = std::env::current_dir()
    .ok()
    .and_then(|cwd| {
      if path.is_absolute() {
        pathdiff::diff_paths(path, &cwd)
      } else {
        None
      }
    })
    .unwrap_or_else(|| path.to_path_buf());
  relative.display().to_string()
}
