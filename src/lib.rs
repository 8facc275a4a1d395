//! # spdxheader
//!
//! A tool that adds and updates SPDX license identifiers and copyright
//! notices in source files.
//!
//! `spdxheader` scans a directory tree (or an explicit file list), detects
//! each file's comment syntax, and inserts or updates an SPDX header at the
//! top of each file. It is designed to run as a pre-commit check (non-zero
//! exit when files are non-compliant) or as a fixer that rewrites files in
//! place.
//!
//! ## Features
//!
//! * Per-extension comment-style mapping, special filenames, shebang
//!   sniffing
//! * Copyright year updates: a stale `2020` becomes `2020-<current year>`
//! * `.gitignore`-style ignore rules plus builtin exclusion lists
//! * Optional free-text notice block appended after the copyright line
//! * Check-only mode for CI and pre-commit hooks
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use spdxheader::header::{HeaderRewriter, HeaderTarget};
//! use spdxheader::ignore::IgnoreEvaluator;
//! use spdxheader::processor::{Processor, ProcessorConfig};
//! use spdxheader::styles::BuiltinResolver;
//!
//! fn main() -> anyhow::Result<()> {
//!   let rewriter = HeaderRewriter::new(HeaderTarget {
//!     license_id: "Apache-2.0".to_string(),
//!     author: "ACME Corp".to_string(),
//!     year: "2025".to_string(),
//!     notice_lines: Vec::new(),
//!   });
//!
//!   let processor = Processor::new(ProcessorConfig {
//!     rewriter,
//!     resolver: Box::new(BuiltinResolver),
//!     ignore: IgnoreEvaluator::new(&[], std::env::current_dir()?),
//!     fix: false, // check-only
//!     diff_manager: None,
//!   });
//!
//!   let totals = processor.run(&[], Path::new("src"), true);
//!   if totals.updated > 0 {
//!     println!("{} files need a header update", totals.updated);
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - Core header detection and rewriting
//! * [`styles`] - Comment style tables and resolution
//! * [`ignore`] - Exclusion lists and ignore-rule evaluation
//! * [`processor`] - File iteration and orchestration
//!
//! [`header`]: crate::header
//! [`styles`]: crate::styles
//! [`ignore`]: crate::ignore
//! [`processor`]: crate::processor

// Re-export modules for public API
pub mod config;
pub mod diff;
pub mod header;
pub mod ignore;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod styles;
