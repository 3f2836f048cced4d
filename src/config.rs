use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Read-side connector options consumed by schema inference.
///
/// This is the small slice of connector configuration this subsystem needs:
/// which graph the queries target, the optional `"row:key"` extraction
/// directive, and the optional attribute allow-set for column pruning.
/// Transport, auth, and loading options live with their own collaborators.
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Graph the queries run against
    #[validate(length(min = 1, message = "Graph name cannot be empty"))]
    pub graph: String,

    /// Optional "row:key" directive pinning schema inference to one
    /// printed object of multi-statement query output
    #[serde(default)]
    pub results_extract: Option<String>,

    /// Optional attribute allow-set; when present, only these attributes
    /// become columns when reading vertex/edge types
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl ReadOptions {
    pub fn new(graph: impl Into<String>) -> Self {
        Self {
            graph: graph.into(),
            results_extract: None,
            columns: None,
        }
    }

    pub fn with_results_extract(mut self, spec: impl Into<String>) -> Self {
        self.results_extract = Some(spec.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Create options from environment variables with validation.
    ///
    /// `GRAPHTABLE_COLUMNS` is a comma-separated list.
    pub fn from_env() -> Result<Self, ConfigError> {
        let options = Self {
            graph: env::var("GRAPHTABLE_GRAPH").unwrap_or_default(),
            results_extract: env::var("GRAPHTABLE_RESULTS_EXTRACT").ok(),
            columns: env::var("GRAPHTABLE_COLUMNS").ok().map(|raw| {
                raw.split(',')
                    .map(|column| column.trim().to_string())
                    .filter(|column| !column.is_empty())
                    .collect()
            }),
        };

        options.validate()?;
        Ok(options)
    }

    /// Create options from a YAML file with validation.
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let options: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        options.validate()?;
        Ok(options)
    }

    /// The attribute allow-set in the form the schema classifiers take.
    pub fn column_prune(&self) -> Option<HashSet<String>> {
        self.columns
            .as_ref()
            .map(|columns| columns.iter().cloned().collect())
    }
}
