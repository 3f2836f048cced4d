pub mod accessor;
pub mod column_type;
pub mod errors;
pub mod extract_spec;
pub mod field_path;
pub mod tabular_schema;

// Re-export commonly used types
pub use accessor::ResultAccessor;
pub use column_type::{map_graph_type, ColumnType};
pub use errors::SchemaInferenceError;
pub use extract_spec::ExtractSpec;
pub use field_path::{FieldPathEntry, FieldPathTable};
pub use tabular_schema::{ColumnSchema, TabularSchema};
