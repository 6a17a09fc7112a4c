use super::Report;
use super::common::cell_text;
use crate::Result;
use core::fmt::Write;
use csv::{Terminator, WriterBuilder};
use ohno::IntoAppError;

/// A header row plus one record per row, with CRLF line endings.
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let columns = report.columns();
    let mut buffer = Vec::new();

    {
        let mut csv_writer = WriterBuilder::new().terminator(Terminator::CRLF).from_writer(&mut buffer);
        csv_writer.write_record(&columns)?;
        for row in report.rows() {
            csv_writer.write_record(columns.iter().map(|column| cell_text(row.get(column)).into_owned()))?;
        }
        csv_writer.flush()?;
    }

    let text = String::from_utf8(buffer).into_app_err("CSV output is not valid UTF-8")?;
    writer.write_str(&text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Projection, Value};

    fn row(values: &[(&str, &str)]) -> Projection {
        values.iter().map(|(k, v)| (*k, Value::from(*v))).collect()
    }

    fn render(report: &Report) -> String {
        let mut output = String::new();
        generate(report, &mut output).unwrap();
        output
    }

    #[test]
    fn test_csv_rows() {
        let rows = vec![
            row(&[("owner", "alice"), ("name", "widget"), ("description", "")]),
            row(&[("owner", "bob"), ("name", "gizmo"), ("description", "Small, but \"useful\"")]),
        ];
        let report = Report::new(rows, Some(vec!["owner".into(), "name".into(), "description".into()]), "name");

        assert_eq!(
            render(&report),
            "owner,name,description\r\nalice,widget,\r\nbob,gizmo,\"Small, but \"\"useful\"\"\"\r\n"
        );
    }

    #[test]
    fn test_multiline_values_are_quoted() {
        let rows = vec![row(&[("name", "a"), ("description", "line one\nline two")])];
        let report = Report::new(rows, Some(vec!["name".into(), "description".into()]), "name");
        assert_eq!(render(&report), "name,description\r\na,\"line one\nline two\"\r\n");
    }

    #[test]
    fn test_missing_cells_are_empty() {
        let rows = vec![row(&[("name", "a")])];
        let report = Report::new(rows, Some(vec!["name".into(), "lfs".into()]), "name");
        assert_eq!(render(&report), "name,lfs\r\na,\r\n");
    }

    #[test]
    fn test_header_only() {
        let report = Report::new(Vec::new(), Some(vec!["name".into(), "size".into()]), "name");
        insta::assert_snapshot!(render(&report), @"name,size");
    }
}
