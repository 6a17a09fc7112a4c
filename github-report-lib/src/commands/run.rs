//! Command-line parsing and dispatch for github-report

use super::common::ColorMode;
use super::process_report;
use crate::fields::{Field, OutputFormat, SortSpec};
use crate::{Host, Result};
use camino::Utf8PathBuf;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{ArgAction, Parser};
use url::Url;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments of the report command. `-h` is taken by `--humanize`, so help is `--help` only.
#[derive(Parser, Debug)]
#[command(name = "github-report", version, author, disable_help_flag = true)]
#[command(about = "Generate a report of metadata about the repositories of a GitHub user or organization")]
#[command(styles = CLAP_STYLES)]
#[expect(clippy::struct_excessive_bools, reason = "Each bool is an independent command-line switch")]
pub struct ReportArgs {
    /// Report the repositories of this user
    #[arg(short, long, value_name = "USER")]
    pub user: Option<String>,

    /// Report the repositories of this organization
    #[arg(short, long, value_name = "ORG")]
    pub organization: Option<String>,

    /// Report a single repository, as `owner/name` or just `name`
    #[arg(short, long, value_name = "REPO")]
    pub repo: Option<String>,

    /// GitHub personal access token
    #[arg(short, long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File to read the access token from when no token is given (default is `.token`)
    #[arg(long, value_name = "PATH")]
    pub token_file: Option<Utf8PathBuf>,

    /// Measure the Git LFS storage used by each repository
    #[arg(long)]
    pub lfs: bool,

    /// Field to sort by, prefixed with `-` for descending order (default is `full_name`)
    #[arg(short, long, value_name = "FIELD", allow_hyphen_values = true)]
    pub sort: Option<SortSpec>,

    /// Comma-separated fields to report; nested fields are joined with `__`
    #[arg(long, value_name = "FIELDS", value_delimiter = ',')]
    pub fields: Vec<Field>,

    /// Show sizes, counts, and dates in a human-friendly form
    #[arg(short = 'h', long)]
    pub humanize: bool,

    /// Append a row with the sum of each numeric field
    #[arg(long)]
    pub totals: bool,

    /// Output format
    #[arg(
        short,
        long,
        value_name = "FORMAT",
        default_value_t = OutputFormat::List,
        overrides_with_all = ["csv", "json"],
        help_heading = "Report Output"
    )]
    pub format: OutputFormat,

    /// Output as CSV (same as `--format csv`)
    #[arg(short, long, overrides_with_all = ["format", "json"], help_heading = "Report Output")]
    pub csv: bool,

    /// Output as JSON (same as `--format json`)
    #[arg(short, long, overrides_with_all = ["format", "csv"], help_heading = "Report Output")]
    pub json: bool,

    /// Also write debug logging to this file
    #[arg(short, long, value_name = "PATH")]
    pub log: Option<Utf8PathBuf>,

    /// Log more detail; repeat for even more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log less detail; repeat for even less
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Path to configuration file (default is `github-report.toml`)
    #[arg(long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Base URL of the GitHub API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<Url>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl ReportArgs {
    /// The output format; among `--format`, `--csv`, and `--json` the last one given wins.
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.csv {
            OutputFormat::Csv
        } else if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }

    /// The fields named on the command line, if any.
    #[must_use]
    pub fn explicit_fields(&self) -> Option<Vec<Field>> {
        (!self.fields.is_empty()).then(|| self.fields.clone())
    }
}

/// Parse command-line arguments and produce the report
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the arguments are contradictory or if producing the report fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let args = ReportArgs::parse_from(args);
    process_report(host, &args).await
}
