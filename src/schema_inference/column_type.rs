//! Column type mapping from graph-native attribute types
//!
//! Graph engines declare attribute types with their own names (`INT`,
//! `UINT`, `FIXED_BINARY`, accumulator signatures, ...). This module maps
//! those names onto the small set of column types the tabular engine
//! understands. The mapping is total: anything unrecognized, including
//! complex container types, becomes `String` so that a query never fails
//! over an unmapped type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column type of the output table.
///
/// `Decimal` covers both signed and unsigned graph integers: a 64-bit
/// unsigned value does not fit an `i64`, so integers are widened to an
/// arbitrary-precision decimal instead of risking silent overflow or sign
/// ambiguity at materialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Decimal { precision: u8, scale: u8 },
    Float32,
    Float64,
    Boolean,
    Binary,
    String,
}

impl ColumnType {
    /// The decimal shape used for graph `INT`/`UINT` attributes.
    pub const fn integer_decimal() -> Self {
        ColumnType::Decimal {
            precision: 38,
            scale: 0,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Decimal { precision, scale } => {
                write!(f, "decimal({},{})", precision, scale)
            }
            ColumnType::Float32 => write!(f, "float32"),
            ColumnType::Float64 => write!(f, "float64"),
            ColumnType::Boolean => write!(f, "boolean"),
            ColumnType::Binary => write!(f, "binary"),
            ColumnType::String => write!(f, "string"),
        }
    }
}

/// Map a graph-native type name to a tabular column type.
///
/// Case-insensitive and total: empty or unrecognized names map to
/// [`ColumnType::String`], never an error.
///
/// # Example
///
/// ```ignore
/// assert_eq!(map_graph_type("INT"), ColumnType::integer_decimal());
/// assert_eq!(map_graph_type("double"), ColumnType::Float64);
/// assert_eq!(map_graph_type("LIST<INT>"), ColumnType::String);
/// ```
pub fn map_graph_type(graph_type: &str) -> ColumnType {
    match graph_type.trim().to_lowercase().as_str() {
        "int" | "uint" => ColumnType::integer_decimal(),
        "float" => ColumnType::Float32,
        "double" => ColumnType::Float64,
        "bool" | "boolean" => ColumnType::Boolean,
        "fixed_binary" => ColumnType::Binary,
        _ => ColumnType::String,
    }
}
