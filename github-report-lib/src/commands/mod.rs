//! Command-line interface and orchestration for github-report
//!
//! This module parses the command line and drives the other modules to turn a
//! repository query into a report.
//!
//! # Execution Flow
//!
//! The `run` function parses command-line arguments using clap and hands them to
//! the report command, which:
//!
//! 1. Sets up logging and loads the configuration file
//! 2. Validates the user, organization, and repository options into a query
//! 3. Fetches the repository records from the GitHub API
//! 4. Optionally measures Git LFS usage of each repository
//! 5. Sorts, selects fields, projects, and totals the records
//! 6. Renders the report in the requested format to the host's output
//!
//! Configuration is read from `github-report.toml` (or `--config`) and fills in
//! whatever the command line leaves unspecified.

mod common;
mod config;
mod host;
mod report;
mod run;

const LOG_TARGET: &str = "  commands";

#[cfg(debug_assertions)]
pub use config::Config;

pub use common::{ColorMode, console_level, init_logging};
pub use host::Host;
pub use report::{ReportOptions, build_report, process_report};
pub use run::{ReportArgs, run};
