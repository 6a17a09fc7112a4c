//! Repository data collection
//!
//! This module gathers the raw repository records a report is built from.
//!
//! # Implementation Model
//!
//! A [`RepoQuery`] captures which repositories the user asked about: a user's, an
//! organization's, the authenticated user's, or a single repository. A [`RecordSource`] turns
//! a query into raw records; [`GitHubSource`] does so through the GitHub REST API using a
//! [`Client`], which classifies responses into success, rate limiting, not found, and failure.
//! Requests are made one at a time and are never retried.
//!
//! Records can then be enriched with the size of their Git LFS objects. An [`Enrichment`]
//! computes the size of one repository, and [`GitLfs`] does so by bare-cloning it into a
//! temporary directory. [`enrich`] applies an enrichment to a whole record set, logging
//! failures and moving on.

mod client;
mod lfs;
mod repo_query;
mod source;

const LOG_TARGET: &str = "    github";

pub use client::{ApiResult, Client, RateLimitInfo};
pub use lfs::{DEFAULT_GIT_TIMEOUT, Enrichment, GitLfs, enrich, sum_lfs_sizes};
pub use repo_query::RepoQuery;
pub use source::{GitHubSource, RecordSource};
