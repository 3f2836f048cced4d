//! Tabular schema handed to the host table engine
//!
//! An ordered (name, type) column list. Column order is significant: it is
//! aligned 1:1 with the field path table built alongside it, so the two are
//! always constructed in lockstep.

use serde::{Deserialize, Serialize};

use super::column_type::ColumnType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: ColumnType,
}

/// Ordered column list declaring the shape of the output table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularSchema {
    columns: Vec<ColumnSchema>,
}

impl TabularSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style.
    pub fn with_column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.push(name, column_type);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, column_type: ColumnType) {
        self.columns.push(ColumnSchema {
            name: name.into(),
            column_type,
        });
    }

    /// Append all columns of `other` after the existing ones (fixed columns
    /// followed by attribute columns, for example).
    pub fn merge(mut self, other: TabularSchema) -> Self {
        self.columns.extend(other.columns);
        self
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
