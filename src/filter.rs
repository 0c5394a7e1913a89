//! Filter/Search Engine
//!
//! Stateless filtering over serialized dataset rows for table display. Works
//! on `serde_json::Value` objects so one implementation serves the master
//! table, every auxiliary table, and the plan - whatever the dashboard is
//! currently rendering.
//!
//! Predicates are ANDed: a row survives only if it passes the free-text
//! search and every active per-field filter. Input rows are never mutated
//! and original relative order is preserved.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Sentinel filter value meaning "no filtering on this field".
///
/// The dashboard's dropdowns send `"all"` for an unselected filter.
pub const FILTER_ALL: &str = "all";

/// Serialize a record slice into filterable rows.
///
/// Records whose serialization fails (never the case for the crate's own
/// types) are dropped rather than aborting the whole view.
pub fn to_rows<T: Serialize>(records: &[T]) -> Vec<Value> {
    records
        .iter()
        .filter_map(|record| serde_json::to_value(record).ok())
        .collect()
}

/// Apply per-field filters and a free-text search term to a set of rows.
///
/// - `search`: case-insensitive substring match against the string form of
///   *any* field value; an empty term matches everything.
/// - `field_filters`: field name -> required value. An entry of `"all"` is a
///   no-op. String fields match by case-insensitive substring, non-string
///   fields by exact string-form equality. A row missing a filtered field
///   fails that filter.
pub fn filter_rows(
    rows: &[Value],
    field_filters: &BTreeMap<String, String>,
    search: &str,
) -> Vec<Value> {
    rows.iter()
        .filter(|row| matches_search(row, search) && matches_filters(row, field_filters))
        .cloned()
        .collect()
}

/// Sorted, deduplicated, non-empty string forms of one field across all rows.
///
/// Used to populate the dashboard's filter dropdowns. Null and empty values
/// are skipped.
pub fn unique_values(rows: &[Value], field: &str) -> Vec<String> {
    let mut values: Vec<String> = rows
        .iter()
        .filter_map(|row| row.get(field))
        .filter_map(value_text)
        .filter(|text| !text.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

/// String form of a scalar JSON value; `None` for null (and for the nested
/// arrays/objects a tabular row should not contain).
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn matches_search(row: &Value, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    match row {
        Value::Object(fields) => fields
            .values()
            .filter_map(value_text)
            .any(|text| text.to_lowercase().contains(&needle)),
        _ => false,
    }
}

fn matches_filters(row: &Value, field_filters: &BTreeMap<String, String>) -> bool {
    field_filters.iter().all(|(field, wanted)| {
        if wanted == FILTER_ALL {
            return true;
        }
        match row.get(field) {
            Some(Value::String(s)) => s.to_lowercase().contains(&wanted.to_lowercase()),
            Some(value) => value_text(value).is_some_and(|text| text == *wanted),
            None => false,
        }
    })
}
