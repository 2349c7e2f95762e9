//! Flat tabular query results.

use serde::Serialize;
use serde_json::Value;

/// Rows of flattened records sharing one ordered column set.
///
/// Cells missing from a record are `Value::Null`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Flatten a response `data` payload into a table.
    pub fn from_records(data: &Value) -> Table {
        crate::processing::json_normalize(data)
    }

    /// True when the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }
}

/// Render a cell for text output: strings unquoted, null as empty, everything else as JSON.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_lookup() {
        let table = Table {
            columns: vec!["name".to_string(), "tags.env".to_string()],
            rows: vec![vec![json!("vm-01"), json!("prod")]],
        };
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert_eq!(table.column_index("tags.env"), Some(1));
        assert_eq!(table.get(0, "name"), Some(&json!("vm-01")));
        assert_eq!(table.get(1, "name"), None);
        assert_eq!(table.get(0, "missing"), None);
    }

    #[test]
    fn test_rows_without_columns_are_empty() {
        let table = Table {
            columns: vec![],
            rows: vec![vec![]],
        };
        assert!(table.is_empty());
        assert!(Table::default().is_empty());
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Value::Null), "");
        assert_eq!(cell_to_string(&json!("text")), "text");
        assert_eq!(cell_to_string(&json!(42)), "42");
        assert_eq!(cell_to_string(&json!(["10.0.0.0/16"])), r#"["10.0.0.0/16"]"#);
    }
}
