//! Field resolution and projection
//!
//! This module turns raw repository records into the flat rows a report shows. It knows
//! nothing about where records come from or how rows are printed.
//!
//! # Implementation Model
//!
//! A [`Record`] is an ordered tree of [`Value`]s decoded from the hosting API. Callers name
//! the data they want with [`FieldPath`]s, either a single key or nested keys joined by `__`
//! (`owner__login`). A few friendly names are aliases for canonical paths (`stars` is
//! `stargazers_count`, `owner` is `owner__login`). An alias only kicks in when the record
//! lacks the key, or holds a nested record there that the output format cannot show.
//!
//! Building a report goes through these steps:
//! - [`SortSpec`] reorders the raw records
//! - [`select_fields`] picks the field list, once for the whole record set
//! - [`Projector`] resolves every field of each record, optionally passing the value through
//!   the [`Humanizer`] and coercing it to text for CSV
//! - [`Totals`] sums numeric values along the way and yields a final synthetic row
//!
//! Resolution never fails: anything missing along a path projects as `null`.

mod aliases;
mod diagnostics;
mod field_path;
mod humanizer;
mod output_format;
mod projector;
mod resolver;
mod selector;
mod sort;
mod totals;
mod value;

const LOG_TARGET: &str = "    fields";

pub use aliases::canonical_name;
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use field_path::{FieldPath, PATH_SEPARATOR};
pub use humanizer::Humanizer;
pub use output_format::OutputFormat;
pub use projector::{Projection, Projector};
pub use resolver::{Resolved, expand, resolve};
pub use selector::{ENRICHMENT_FIELD, Field, FieldSelection, has_multiple_owners, parse_field_list, select_fields};
pub use sort::SortSpec;
pub use totals::{TOTALS_LABEL, Totals};
pub use value::{Record, Value, record_from_json};
