//! Error types for schema inference
//!
//! Only the extraction directive can fail schema resolution; every other
//! ambiguous or unrecognized result shape degrades to the unknown-shape
//! schema instead of erroring. A directive error aborts resolution for the
//! one query being configured and leaves concurrent queries untouched.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaInferenceError {
    #[error("The row number and object key should be separated by a colon, got `{spec}`")]
    MissingSeparator { spec: String },

    #[error("Failed to parse row number from `{spec}`: {source}")]
    InvalidRowNumber {
        spec: String,
        source: std::num::ParseIntError,
    },
}

pub type Result<T> = std::result::Result<T, SchemaInferenceError>;
