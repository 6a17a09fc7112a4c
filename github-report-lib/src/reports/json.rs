use super::Report;
use crate::Result;
use core::fmt::Write;

/// A pretty-printed array with one object per row, keys in field order.
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(report.rows())?)?;
    Ok(())
}
