//! Extraction directive parsing
//!
//! A directive `"N:key"` pins schema inference to one nested object inside
//! multi-statement query output: statement `N`, printed object `key`. The
//! same directive is carried on the accessor so that row extraction pulls
//! the object from the identical location inference looked at.

use serde::{Deserialize, Serialize};

use super::errors::{Result, SchemaInferenceError};

/// Parsed `"row:key"` extraction directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractSpec {
    pub row_number: usize,
    pub obj_key: String,
}

impl ExtractSpec {
    /// The implicit directive for single-statement, single-object output:
    /// first object of the first print statement. The empty key means
    /// "whichever object the statement printed".
    pub(crate) fn first_object() -> Self {
        Self {
            row_number: 0,
            obj_key: String::new(),
        }
    }

    /// Parse an optional directive string.
    ///
    /// Empty or absent input means inference proceeds unconstrained. A
    /// non-empty string must be `<non-negative integer>:<key>`; a missing
    /// colon or an unparsable row number fails this query's schema
    /// resolution with the offending literal echoed back.
    pub fn parse(spec: Option<&str>) -> Result<Option<Self>> {
        let spec = match spec {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(None),
        };
        let Some((row, key)) = spec.split_once(':') else {
            return Err(SchemaInferenceError::MissingSeparator {
                spec: spec.to_string(),
            });
        };
        let row_number =
            row.parse::<usize>()
                .map_err(|source| SchemaInferenceError::InvalidRowNumber {
                    spec: spec.to_string(),
                    source,
                })?;
        Ok(Some(Self {
            row_number,
            obj_key: key.to_string(),
        }))
    }
}
