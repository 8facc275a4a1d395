//! # Check Command
//!
//! This module implements the check/fix run for license headers: it wires
//! the configuration, ignore rules, notice template, and diff options into
//! a [`Processor`], runs it, and turns the totals into the exit code.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::header::{HeaderRewriter, HeaderTarget};
use crate::ignore::{self, IgnoreEvaluator};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output;
use crate::processor::{Processor, ProcessorConfig};
use crate::styles::create_resolver;

/// Arguments for the check/fix run
#[derive(Args, Debug)]
pub struct CheckArgs {
  /// SPDX license identifier (e.g., GPL-2.0-or-later)
  pub license: String,

  /// Copyright holder name
  pub author: String,

  /// Specific files to process (overrides --dir)
  #[arg(value_name = "FILE")]
  pub files: Vec<PathBuf>,

  /// Check files without modifying (default)
  #[arg(long, group = "mode")]
  pub check: bool,

  /// Fix files by adding/updating headers
  #[arg(long, group = "mode")]
  pub fix: bool,

  /// Root directory to process; ignored when FILE arguments are given
  #[arg(long, value_name = "PATH", default_value = ".")]
  pub dir: PathBuf,

  /// Copyright year (default: current year)
  #[arg(long, value_name = "YYYY")]
  pub year: Option<String>,

  /// Don't process subdirectories
  #[arg(long)]
  pub no_recursive: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Path to ignore file (default: .licenseignore, then .gitignore)
  #[arg(long, value_name = "PATH")]
  pub ignore_file: Option<PathBuf>,

  /// Path to a notice template appended after the copyright line in new
  /// headers (silently ignored if missing)
  #[arg(long, value_name = "PATH")]
  pub notice_template: Option<PathBuf>,

  /// Path to config file (default: .spdxheader.toml in the working
  /// directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Show diff of changes on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save diff of changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the check/fix command with the given arguments
pub fn run_check(args: CheckArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set output mode for status formatting and the info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let cwd = std::env::current_dir().context("Failed to get working directory")?;

  // --check is the default; the clap group keeps the flags mutually exclusive
  let fix = args.fix;

  let year = args.year.unwrap_or_else(|| chrono::Local::now().year().to_string());

  // Load configuration file if present
  let config = load_config(args.config.as_deref(), &cwd, args.no_config)?;
  if config.is_some() {
    debug!("Using configuration file for comment style overrides");
  }
  let resolver = create_resolver(config);

  let notice_lines = load_notice_lines(args.notice_template.as_deref());

  let ignore_source = ignore::resolve_ignore_source(args.ignore_file.as_deref(), &cwd);
  if let Some(source) = &ignore_source {
    debug!("Using ignore rules from {}", source.display());
  }
  let rules = ignore::load_rules(ignore_source.as_deref());
  let evaluator = IgnoreEvaluator::new(&rules, cwd);

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let rewriter = HeaderRewriter::new(HeaderTarget {
    license_id: args.license.clone(),
    author: args.author.clone(),
    year,
    notice_lines,
  });

  let processor = Processor::new(ProcessorConfig {
    rewriter,
    resolver,
    ignore: evaluator,
    fix,
    diff_manager: Some(diff_manager),
  });

  let totals = processor.run(&args.files, &args.dir, !args.no_recursive);

  output::print_summary(&totals, !fix);
  if !fix && totals.updated > 0 {
    output::print_hint();
  }

  // Non-zero exit when check mode found work or any file errored
  if (!fix && totals.updated > 0) || totals.errors > 0 {
    process::exit(1);
  }

  Ok(())
}

/// Load the notice template, if one is configured and readable.
///
/// Trailing blank lines are trimmed; interior blank lines are kept so the
/// block's paragraph structure survives formatting.
fn load_notice_lines(path: Option<&Path>) -> Vec<String> {
  let Some(path) = path else {
    return Vec::new();
  };
  match std::fs::read_to_string(path) {
    Ok(content) => content.trim_end().lines().map(str::to_string).collect(),
    Err(e) => {
      debug!("Ignoring notice template {}: {}", path.display(), e);
      Vec::new()
    }
  }
}
