//! Column-to-JSON-path mapping and per-row value extraction
//!
//! A [`FieldPathTable`] is the immutable half of an inference result: one
//! entry per output column, each holding a JSON pointer into a result row.
//! The table is built once per query, then shared read-only by every
//! parallel row-reading task; extraction takes `&self` and performs no I/O,
//! so no synchronization is ever needed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How to pull one column's value out of a result row.
///
/// The path is a JSON pointer; the empty pointer selects the whole row
/// (used by the unknown-shape schema to surface raw JSON). When the pointer
/// misses and `recursive` is set, the entry falls back to a depth-first
/// search of the row for the first value keyed by the column name, which
/// accommodates queries whose literal output nesting does not match the
/// declared column names exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPathEntry {
    name: String,
    path: String,
    recursive: bool,
}

impl FieldPathEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, recursive: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            recursive,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Resolve this entry against one result row.
    ///
    /// A scalar row is returned unchanged regardless of the path, which
    /// handles degenerate single-value rows. Otherwise the pointer is
    /// followed; a miss returns `None` for non-recursive entries and falls
    /// back to the by-name tree search for recursive ones.
    pub fn resolve<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        if !matches!(row, Value::Object(_) | Value::Array(_)) {
            return Some(row);
        }
        match row.pointer(&self.path) {
            Some(target) => Some(target),
            None if self.recursive => find_by_key(row, &self.name),
            None => None,
        }
    }
}

/// Depth-first search for the first value stored under `key` anywhere in
/// the tree. Objects are scanned field by field, checking the field name
/// before descending into its value; arrays descend into each element. The
/// traversal is bounded by the row's own (finite) nesting depth.
fn find_by_key<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(fields) => fields
            .iter()
            .find_map(|(name, value)| {
                if name == key {
                    Some(value)
                } else {
                    find_by_key(value, key)
                }
            }),
        Value::Array(items) => items.iter().find_map(|item| find_by_key(item, key)),
        _ => None,
    }
}

/// Ordered field path entries, aligned 1:1 with the tabular schema columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPathTable {
    entries: Vec<FieldPathEntry>,
}

impl FieldPathTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, path: impl Into<String>, recursive: bool) {
        self.entries.push(FieldPathEntry::new(name, path, recursive));
    }

    pub fn entries(&self) -> &[FieldPathEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extract the ordered column values for one row.
    ///
    /// One value per entry, in table order; `None` marks a column absent
    /// from this row. No type coercion happens here: coercion into the
    /// final column type is the table-materialization boundary's job.
    pub fn extract_row<'a>(&self, row: &'a Value) -> Vec<Option<&'a Value>> {
        self.entries.iter().map(|entry| entry.resolve(row)).collect()
    }
}
