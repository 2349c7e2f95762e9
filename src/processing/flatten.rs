//! JSON-to-table flattening of Resource Graph rows.

use crate::models::Table;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Separator between path segments in flattened column names.
pub const SEPARATOR: char = '.';

/// Column used for array elements that are not JSON objects.
///
/// Object-array responses never contain these; pandas rejects them, here
/// they are kept as a single unnamed column instead.
const SCALAR_COLUMN: &str = "0";

/// Flatten records into a [`Table`].
///
/// Each element of a top level array is one row. Nested object leaves
/// become columns named by their dotted path, while arrays and scalars stay
/// as cell values. Columns appear in first-seen order across all rows.
pub fn json_normalize(data: &Value) -> Table {
    let records: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    };

    let mut columns: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut flat_records = Vec::with_capacity(records.len());

    for record in records {
        let mut fields = Vec::new();
        match record {
            Value::Object(map) => flatten_record(map, None, &mut fields),
            other => fields.push((SCALAR_COLUMN.to_string(), other.clone())),
        }
        for (name, _) in &fields {
            if !index.contains_key(name) {
                index.insert(name.clone(), columns.len());
                columns.push(name.clone());
            }
        }
        flat_records.push(fields);
    }

    let rows: Vec<Vec<Value>> = flat_records
        .into_iter()
        .map(|fields| {
            let mut row = vec![Value::Null; columns.len()];
            for (name, value) in fields {
                row[index[&name]] = value;
            }
            row
        })
        .collect();

    log::trace!(
        "json_normalize() => {} columns, {} rows",
        columns.len(),
        rows.len()
    );
    Table { columns, rows }
}

/// Append the leaf fields of `map` to `out`, prefixing names with `prefix`.
/// Empty nested objects contribute nothing.
fn flatten_record(map: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let name = match prefix {
            Some(prefix) => format!("{prefix}{SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_record(nested, Some(&name), out),
            leaf => out.push((name, leaf.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_tags() {
        let table = json_normalize(&json!([{"id": "a", "tags": {"env": "prod"}}]));
        assert_eq!(table.columns, vec!["id", "tags.env"]);
        assert_eq!(table.rows, vec![vec![json!("a"), json!("prod")]]);
    }

    #[test]
    fn test_missing_columns_are_null() {
        let table = json_normalize(&json!([
            {"name": "vm-01", "sku": {"name": "B1s"}},
            {"name": "st-01", "kind": "StorageV2"}
        ]));
        assert_eq!(table.columns, vec!["name", "sku.name", "kind"]);
        assert_eq!(table.get(0, "kind"), Some(&Value::Null));
        assert_eq!(table.get(1, "sku.name"), Some(&Value::Null));
        assert_eq!(table.get(1, "kind"), Some(&json!("StorageV2")));
    }

    #[test]
    fn test_deep_nesting_and_arrays() {
        let table = json_normalize(&json!([{
            "properties": {
                "addressSpace": {"addressPrefixes": ["10.0.0.0/16", "10.1.0.0/16"]},
                "dhcpOptions": null
            }
        }]));
        assert_eq!(
            table.columns,
            vec![
                "properties.addressSpace.addressPrefixes",
                "properties.dhcpOptions"
            ]
        );
        assert_eq!(
            table.rows[0][0],
            json!(["10.0.0.0/16", "10.1.0.0/16"])
        );
        assert_eq!(table.rows[0][1], Value::Null);
    }

    #[test]
    fn test_empty_object_adds_no_column() {
        let table = json_normalize(&json!([{"name": "st", "tags": {}}]));
        assert_eq!(table.columns, vec!["name"]);
    }

    #[test]
    fn test_empty_and_null_data() {
        assert!(json_normalize(&json!([])).is_empty());
        assert!(json_normalize(&Value::Null).is_empty());
        assert!(json_normalize(&json!([{}])).is_empty());
    }

    #[test]
    fn test_single_object_is_one_row() {
        let table = json_normalize(&json!({"count_": 12}));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "count_"), Some(&json!(12)));
    }

    #[test]
    fn test_scalar_rows() {
        let table = json_normalize(&json!(["a", 2]));
        assert_eq!(table.columns, vec!["0"]);
        assert_eq!(table.rows, vec![vec![json!("a")], vec![json!(2)]]);
    }

    #[test]
    fn test_response_file_01() {
        let json = std::fs::read_to_string("src/tests/test_data/resources_response_01.json")
            .expect("Error reading test response");
        let response: crate::models::QueryResponse =
            serde_json::from_str(&json).expect("Error parsing json");
        let table = json_normalize(&response.data);
        assert_eq!(table.len(), 3);
        assert_eq!(
            &table.columns[..6],
            &["id", "name", "type", "location", "tags.env", "tags.owner"]
        );
        assert_eq!(table.get(1, "tags.owner"), Some(&Value::Null));
        assert_eq!(
            table.get(1, "properties.hardwareProfile.vmSize"),
            Some(&json!("Standard_D2s_v5"))
        );
        assert_eq!(table.get(2, "sku.tier"), Some(&json!("Standard")));
    }
}
