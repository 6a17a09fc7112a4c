//! Git LFS usage of a repository
//!
//! Sizes are found by bare-cloning the repository into a temporary directory and asking
//! `git lfs` about every LFS object referenced by any ref, including deleted files.

use super::LOG_TARGET;
use crate::Result;
use crate::fields::{ENRICHMENT_FIELD, Record, Value};
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, bail};
use regex::Regex;
use std::process::{Output, Stdio};
use std::sync::LazyLock;
use tokio::process::Command;

/// How long a single git invocation may take unless configured otherwise.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_mins(5);

static SIZE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*size:\s*(\d+)\s*$").expect("LFS size regex must compile"));

/// Adds one computed field to a repository record.
pub trait Enrichment {
    /// Compute the LFS size, in bytes, of the repository `record` describes.
    fn lfs_size(&self, record: &Record) -> impl Future<Output = Result<i64>> + Send;
}

/// Computes LFS sizes with the `git` command line.
#[derive(Debug, Clone)]
pub struct GitLfs {
    timeout: Duration,
}

impl GitLfs {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn run_git(&self, dir: &str, args: &[&str]) -> Result<Output> {
        let child = Command::new("git")
            .current_dir(dir)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .into_app_err("could not spawn git command")?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(e).into_app_err_with(|| format!("'git {}' failed to run", args.join(" "))),
            Err(_) => bail!("'git {}' timed out after {} seconds", args.join(" "), self.timeout.as_secs()),
        };

        check_git_output(&output, &format!("git {}", args.first().copied().unwrap_or_default()))?;
        Ok(output)
    }
}

impl Default for GitLfs {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_TIMEOUT)
    }
}

impl Enrichment for GitLfs {
    async fn lfs_size(&self, record: &Record) -> Result<i64> {
        let clone_url = record
            .get("clone_url")
            .and_then(Value::as_str)
            .into_app_err("the repository has no clone URL")?;

        let tempdir = tempfile::tempdir().into_app_err("could not create a temporary directory")?;
        let dir = tempdir.path().to_str().into_app_err("invalid UTF-8 in temporary directory path")?;

        log::info!(target: LOG_TARGET, "Cloning '{clone_url}'");
        let _ = self.run_git(dir, &["clone", "--bare", "--quiet", clone_url, "."]).await?;

        log::debug!(target: LOG_TARGET, "Summing LFS file sizes");
        let output = self.run_git(dir, &["lfs", "ls-files", "--all", "--deleted", "--debug"]).await?;

        sum_lfs_sizes(&String::from_utf8_lossy(&output.stdout))
    }
}

fn check_git_output(output: &Output, operation: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{operation} failed: {}", stderr.trim());
    }
    Ok(())
}

/// Add up the `size:` lines of `git lfs ls-files --debug` output.
pub fn sum_lfs_sizes(listing: &str) -> Result<i64> {
    SIZE_LINE.captures_iter(listing).try_fold(0_i64, |total, captures| {
        let size = captures[1].parse::<i64>().into_app_err_with(|| format!("invalid LFS object size '{}'", &captures[1]))?;
        total.checked_add(size).into_app_err("LFS sizes overflowed")
    })
}

/// Attach the LFS size to every record, one repository at a time, returning how many failed.
///
/// A failure only affects its own record, which is left without the field.
pub async fn enrich(records: &mut [Record], enrichment: &impl Enrichment) -> usize {
    let mut failures = 0_usize;
    for record in records.iter_mut() {
        match enrichment.lfs_size(record).await {
            Ok(size) => {
                let _ = record.insert(ENRICHMENT_FIELD.to_string(), Value::Int(size));
            }
            Err(e) => {
                let e = e.enrich_with(|| format!("could not get LFS usage for {}", display_name(record)));
                log::error!(target: LOG_TARGET, "{e:#}");
                failures += 1;
            }
        }
    }

    failures
}

fn display_name(record: &Record) -> String {
    match record.get("full_name").or_else(|| record.get("name")).and_then(Value::as_str) {
        Some(name) => format!("'{name}'"),
        None => "a repository without a name".to_string(),
    }
}
