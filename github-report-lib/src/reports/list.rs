use super::Report;
use super::common::{cell_text, display_width};
use crate::Result;
use core::fmt::Write;

/// Plain listing: bare ids, `id value` pairs, or a block of ` - field: value` lines per repository.
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let id_field = report.id_field();
    let columns = report.columns();
    let others: Vec<&str> = columns.into_iter().filter(|column| *column != id_field).collect();

    match others.as_slice() {
        [] => {
            for row in report.rows() {
                writeln!(writer, "{}", cell_text(row.get(id_field)))?;
            }
        }
        [only] => {
            let widest_id = report
                .rows()
                .iter()
                .map(|row| display_width(&cell_text(row.get(id_field))))
                .max()
                .unwrap_or_default();

            for row in report.rows() {
                let id = cell_text(row.get(id_field));
                writeln!(writer, "{id:<widest_id$} {}", cell_text(row.get(only)))?;
            }
        }
        _ => {
            let widest_field = others.iter().map(|field| display_width(field)).max().unwrap_or_default();

            for row in report.rows() {
                writeln!(writer, "{}", cell_text(row.get(id_field)))?;
                for field in &others {
                    writeln!(writer, " - {field:>widest_field$}: {}", cell_text(row.get(field)))?;
                }
                writeln!(writer)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Projection, Value};

    fn row(values: &[(&str, Value)]) -> Projection {
        values.iter().cloned().collect()
    }

    fn render(report: &Report) -> String {
        let mut output = String::new();
        generate(report, &mut output).unwrap();
        output
    }

    #[test]
    fn test_ids_only() {
        let rows = vec![row(&[("name", Value::from("alpha"))]), row(&[("name", Value::from("beta"))])];
        let report = Report::new(rows, Some(vec!["name".into()]), "name");
        assert_eq!(render(&report), "alpha\nbeta\n");
    }

    #[test]
    fn test_single_column_pads_ids() {
        let rows = vec![
            row(&[("name", Value::from("widget")), ("size", Value::from("1.00 KiB"))]),
            row(&[("name", Value::from("gizmo-pro")), ("size", Value::Int(12))]),
            row(&[("name", Value::from("Totals")), ("size", Value::Int(13))]),
        ];
        let report = Report::new(rows, Some(vec!["name".into(), "size".into()]), "name");

        insta::assert_snapshot!(render(&report), @r"
        widget    1.00 KiB
        gizmo-pro 12
        Totals    13
        ");
    }

    #[test]
    fn test_blocks() {
        let rows = vec![
            row(&[("full_name", Value::from("alice/widget")), ("size", Value::Int(4)), ("stars", Value::Int(10))]),
            row(&[("full_name", Value::from("bob/gizmo")), ("size", Value::Int(2048)), ("stars", Value::Null)]),
        ];
        let report = Report::new(rows, Some(vec!["full_name".into(), "size".into(), "stars".into()]), "full_name");

        assert_eq!(
            render(&report),
            "alice/widget\n -  size: 4\n - stars: 10\n\nbob/gizmo\n -  size: 2048\n - stars: \n\n"
        );
    }

    #[test]
    fn test_id_column_need_not_be_first() {
        let rows = vec![row(&[("size", Value::Int(1)), ("name", Value::from("x"))])];
        let report = Report::new(rows, Some(vec!["size".into(), "name".into()]), "name");
        assert_eq!(render(&report), "x 1\n");
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new(Vec::new(), Some(vec!["name".into(), "size".into()]), "name");
        assert_eq!(render(&report), "");
    }
}
