//! # spdxheader
//!
//! A tool that adds and updates SPDX license identifiers and copyright
//! notices in source files.

mod cli;
mod config;
mod diff;
mod header;
mod ignore;
mod logging;
mod output;
mod processor;
mod report;
mod styles;

use anyhow::Result;

use crate::cli::{Cli, run_check};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_check(cli.check_args)
}
