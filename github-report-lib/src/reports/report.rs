use crate::fields::Projection;

/// Everything a renderer needs: the rows, their columns, and which column names a repository.
#[derive(Debug, Clone)]
pub struct Report {
    rows: Vec<Projection>,
    columns: Option<Vec<String>>,
    id_field: String,
}

impl Report {
    /// Create a report. Without `columns`, each row brings its own keys.
    #[must_use]
    pub fn new(rows: Vec<Projection>, columns: Option<Vec<String>>, id_field: impl Into<String>) -> Self {
        Self {
            rows,
            columns,
            id_field: id_field.into(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Projection] {
        &self.rows
    }

    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// The report's columns; when none were fixed, every key seen in any row, in order of appearance.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        if let Some(columns) = &self.columns {
            return columns.iter().map(String::as_str).collect();
        }

        let mut columns: Vec<&str> = Vec::new();
        for key in self.rows.iter().flat_map(Projection::keys) {
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Value;

    #[test]
    fn test_fixed_columns() {
        let report = Report::new(Vec::new(), Some(vec!["name".into(), "size".into()]), "name");
        assert_eq!(report.columns(), ["name", "size"]);
        assert_eq!(report.id_field(), "name");
    }

    #[test]
    fn test_columns_from_rows() {
        let rows = vec![
            [("name", Value::from("a")), ("size", Value::Int(1))].into_iter().collect(),
            [("name", Value::from("b")), ("fork", Value::Bool(false))].into_iter().collect(),
        ];
        let report = Report::new(rows, None, "name");
        assert_eq!(report.columns(), ["name", "size", "fork"]);
    }
}
