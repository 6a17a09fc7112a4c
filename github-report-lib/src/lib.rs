#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for github-report
//!
//! This library holds all functionality of the github-report tool, which produces
//! reports of metadata about the repositories of a GitHub user or organization.
//!
//! # Module Organization
//!
//! - [`fields`]: Field resolution, selection, humanization, totals, and sorting
//! - [`facts`]: Repository records from the GitHub API and Git LFS measurement
//! - [`reports`]: Rendering as lists, tables, CSV, and JSON
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod fields;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod facts;
#[cfg(not(any(debug_assertions, test)))]
mod facts;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
