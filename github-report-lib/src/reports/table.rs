use super::Report;
use super::common::{cell_text, display_width, is_numeric_column, pad};
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;

const COLUMN_GAP: &str = "  ";

/// Aligned columns under a header and a dashed rule. Numeric columns are right-aligned.
pub fn generate<W: Write>(report: &Report, use_colors: bool, writer: &mut W) -> Result<()> {
    let columns = report.columns();
    if columns.is_empty() {
        return Ok(());
    }

    let cells: Vec<Vec<_>> = report
        .rows()
        .iter()
        .map(|row| columns.iter().map(|column| cell_text(row.get(column))).collect())
        .collect();

    let layout: Vec<(usize, bool)> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let widest_cell = cells.iter().map(|row| display_width(&row[index])).max().unwrap_or_default();
            (display_width(column).max(widest_cell), is_numeric_column(report.rows(), column))
        })
        .collect();

    let header = format_line(columns.iter().copied(), &layout);
    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    let rule = layout.iter().map(|(width, _)| "-".repeat(*width)).collect::<Vec<_>>().join(COLUMN_GAP);
    writeln!(writer, "{rule}")?;

    for row in &cells {
        writeln!(writer, "{}", format_line(row.iter().map(|cell| &**cell), &layout))?;
    }

    Ok(())
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, layout: &[(usize, bool)]) -> String {
    let padded: Vec<String> = cells.zip(layout).map(|(cell, (width, right_align))| pad(cell, *width, *right_align)).collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}
