//! Report rendering
//!
//! This module turns projected rows into the text of a report. Values arrive already
//! humanized and coerced, so renderers only deal with layout.
//!
//! # Implementation Model
//!
//! A [`Report`] holds the rows, the column list (absent when each row brings its own keys),
//! and the name of the column identifying each repository. [`generate`] writes it in one of
//! four layouts:
//! - **List**: bare ids, `id value` pairs, or a block per repository
//! - **Table**: aligned columns with a bold header when colors are enabled
//! - **CSV**: RFC 4180 records with CRLF line endings
//! - **JSON**: a pretty-printed array of objects
//!
//! `null` values show as empty text in every layout except JSON.

mod common;
mod csv;
mod json;
mod list;
mod report;
mod table;

use crate::Result;
use crate::fields::OutputFormat;
use core::fmt::Write;

pub use report::Report;

/// Render `report` in `format`.
pub fn generate<W: Write>(report: &Report, format: OutputFormat, use_colors: bool, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::List => list::generate(report, writer),
        OutputFormat::Table => table::generate(report, use_colors, writer),
        OutputFormat::Csv => csv::generate(report, writer),
        OutputFormat::Json => json::generate(report, writer),
    }
}
