//! # File I/O Module
//!
//! File reading and writing utilities for the processor. All operations are
//! synchronous whole-file reads and writes; rewritten content is built fully
//! in memory before the write, so a failed write never leaves a partial
//! file behind.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Read the complete file content.
  ///
  /// Invalid UTF-8 sequences are replaced rather than treated as a read
  /// error, so files with stray bytes outside the header region can still
  /// be processed.
  pub fn read_content(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
  }

  /// Write file content in a single operation.
  pub fn write_content(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
