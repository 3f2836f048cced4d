//! Result-shape classification and accessor construction
//!
//! Graph queries return semi-structured JSON whose shape varies with the
//! query signature: single or multi print statements, vertex sets, edge
//! sets, accumulator types. A [`ResultAccessor`] recovers a static tabular
//! schema from the query's output-shape *metadata* (never from sampled
//! rows, keeping inference independent of result-set size) and records,
//! per column, the JSON path to read the value from each row.
//!
//! Classification never fails: any shape that cannot be statically
//! decomposed degrades to the single-column `results STRING` schema with a
//! warning, so one odd query cannot abort a batch job. The only error path
//! is a malformed extraction directive.

use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    column_type::{map_graph_type, ColumnType},
    errors::Result,
    extract_spec::ExtractSpec,
    field_path::FieldPathTable,
    tabular_schema::TabularSchema,
};

/// Declared type to assume when the metadata omits or mangles one.
const DEFAULT_TYPE: &str = "STRING";

/// Accumulator tags with no structural decomposition; queries printing
/// these read as the unknown shape.
const NON_MAP_ACCUM_TYPES: [&str; 15] = [
    "SumAccum",
    "MinAccum",
    "MaxAccum",
    "AvgAccum",
    "PercentileContAccum",
    "AndAccum",
    "OrAccum",
    "BitwiseAndAccum",
    "BitwiseOrAccum",
    "ListAccum",
    "SetAccum",
    "BagAccum",
    "ArrayAccum",
    "HeapAccum",
    "GroupByAccum",
];

const MAP_ACCUM_TYPE: &str = "MapAccum";

/// Inferred column schema plus per-column JSON access paths for one query.
///
/// Built once per query (or once per vertex/edge type when built from graph
/// schema metadata), then held for the lifetime of that query's read tasks.
/// The accessor is immutable after construction and serializable, so it can
/// be shared by reference or broadcast by value to any number of concurrent
/// row readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultAccessor {
    schema: TabularSchema,
    field_paths: FieldPathTable,
    extract: Option<ExtractSpec>,
}

impl ResultAccessor {
    /// Build an accessor from a caller-supplied schema, bypassing inference.
    ///
    /// Each column is looked up at the top level of the row first and then,
    /// because query output nesting rarely matches the declared column
    /// names exactly, searched for anywhere in the row by name.
    pub fn from_external_schema(
        schema: TabularSchema,
        results_extract: Option<&str>,
    ) -> Result<Self> {
        let extract = ExtractSpec::parse(results_extract)?;
        let mut field_paths = FieldPathTable::new();
        for column in schema.columns() {
            field_paths.push(column.name.clone(), format!("/{}", column.name), true);
        }
        Ok(Self {
            schema,
            field_paths,
            extract,
        })
    }

    /// Build an accessor from one vertex type's schema metadata.
    ///
    /// Input shape: `{Config, Attributes[], PrimaryId{AttributeType{Name}},
    /// Name}` as served by the graph engine's schema endpoint. The parsed
    /// schema is `v_id | attribute 1 | ... | attribute n`; `column_prune`
    /// optionally restricts which attributes become columns.
    pub fn from_vertex_meta(meta: &Value, column_prune: Option<&HashSet<String>>) -> Self {
        let mut schema = TabularSchema::new();
        let mut field_paths = FieldPathTable::new();

        let v_id_type = declared_type_at(meta, "/PrimaryId/AttributeType/Name");
        schema.push("v_id", map_graph_type(v_id_type));
        field_paths.push("v_id", "/v_id", false);

        push_attribute_columns(meta, column_prune, &mut schema, &mut field_paths);
        Self {
            schema,
            field_paths,
            extract: None,
        }
    }

    /// Build an accessor from one edge type's schema metadata.
    ///
    /// Input shape: `{IsDirected, ToVertexTypeName, Attributes[],
    /// FromVertexTypeName, Name}`. The parsed schema is `from_type |
    /// from_id | to_type | to_id | attribute 1 | ... | attribute n`.
    pub fn from_edge_meta(meta: &Value, column_prune: Option<&HashSet<String>>) -> Self {
        let mut schema = TabularSchema::new();
        let mut field_paths = FieldPathTable::new();

        for column in ["from_type", "from_id", "to_type", "to_id"] {
            schema.push(column, ColumnType::String);
            field_paths.push(column, format!("/{}", column), false);
        }

        push_attribute_columns(meta, column_prune, &mut schema, &mut field_paths);
        Self {
            schema,
            field_paths,
            extract: None,
        }
    }

    /// Infer an accessor from query-output metadata.
    ///
    /// The metadata is a small JSON array describing each print statement's
    /// emitted objects. Recognized shapes:
    ///
    /// 1. multi-print query: each print is a row
    /// 2. vertex expression set: each vertex is a row
    /// 3. map accumulator: two columns, key and value
    /// 4. non-map accumulator: no decomposition yet, unknown shape
    /// 5. unknown or hard-to-determine schema: the entire JSON object is
    ///    one `results` column
    ///
    /// `results_extract` (`"row:key"`) pins inference to one printed object
    /// of a multi-statement query; when the output is a single statement
    /// printing a single object, that object is picked implicitly.
    pub fn from_query_meta(meta: &Value, results_extract: Option<&str>) -> Result<Self> {
        let mut extract = ExtractSpec::parse(results_extract)?;

        let candidate = if let Some(spec) = &extract {
            match meta
                .get(spec.row_number)
                .and_then(|row| row.get(spec.obj_key.as_str()))
            {
                Some(target) => Some(target),
                // The directive points at nothing; fall back rather than fail
                None => return Ok(Self::from_unknown_meta(extract)),
            }
        } else if let Some(sole) = sole_printed_object(meta) {
            extract = Some(ExtractSpec::first_object());
            Some(sole)
        } else {
            None
        };

        let accessor = match candidate {
            Some(Value::String(signature)) => {
                if NON_MAP_ACCUM_TYPES
                    .iter()
                    .any(|tag| signature.starts_with(tag))
                {
                    Self::from_non_map_accum_meta(signature, extract)
                } else if signature.starts_with(MAP_ACCUM_TYPE) {
                    Self::from_map_accum_meta(signature, extract)
                } else {
                    debug!("Unrecognized output type signature `{}`", signature);
                    Self::from_unknown_meta(extract)
                }
            }
            Some(array @ Value::Array(elements)) => {
                if let [element] = elements.as_slice() {
                    if is_vertex_record(element) {
                        return Ok(Self::from_vertex_set_meta(element, extract));
                    }
                }
                Self::from_uniform_meta(array, extract)
            }
            _ => Self::from_unknown_meta(extract),
        };
        Ok(accessor)
    }

    /// The universal safety net: a single `results STRING` column holding
    /// each row's entire JSON, used when no structure can be recovered.
    ///
    /// E.g. `[{"a":123},{"b":456,"c":789}]` reads as two rows,
    /// `{"a":123}` and `{"b":456,"c":789}`.
    pub fn from_unknown_meta(extract: Option<ExtractSpec>) -> Self {
        warn!(
            "Failed to infer schema, using default schema `results STRING`. \
             A custom schema can be set manually based on the output JSON keys."
        );
        Self {
            schema: TabularSchema::new().with_column("results", ColumnType::String),
            field_paths: {
                let mut field_paths = FieldPathTable::new();
                field_paths.push("results", "", false);
                field_paths
            },
            extract,
        }
    }

    /// Flatten a vertex expression set: the statement's sole element is one
    /// vertex record whose `attributes` are lifted to the top level.
    fn from_vertex_set_meta(meta: &Value, extract: Option<ExtractSpec>) -> Self {
        let Some(fields) = meta.as_object() else {
            return Self::from_unknown_meta(extract);
        };
        let mut schema = TabularSchema::new();
        let mut field_paths = FieldPathTable::new();
        let mut attribute_fields = None;

        for (key, value) in fields {
            if key == "attributes" {
                attribute_fields = value.as_object();
                continue;
            }
            // The engine reports an unreliable declared type for v_id in
            // this shape; force STRING to avoid numeric-parse failures.
            let declared = if key == "v_id" {
                DEFAULT_TYPE
            } else {
                declared_type(value)
            };
            schema.push(key.clone(), map_graph_type(declared));
            field_paths.push(key.clone(), format!("/{}", key), false);
        }
        if let Some(attributes) = attribute_fields {
            for (key, value) in attributes {
                schema.push(key.clone(), map_graph_type(declared_type(value)));
                field_paths.push(key.clone(), format!("/attributes/{}", key), false);
            }
        }
        Self {
            schema,
            field_paths,
            extract,
        }
    }

    /// Flatten a print statement whose elements all share one structural
    /// shape (field names and declared types, compared irrespective of
    /// field order). Heterogeneous, empty, or non-object shapes degrade to
    /// the unknown schema instead.
    fn from_uniform_meta(meta: &Value, extract: Option<ExtractSpec>) -> Self {
        let elements = match meta.as_array() {
            Some(elements) if !elements.is_empty() => elements,
            _ => return Self::from_unknown_meta(extract),
        };
        // serde_json object equality is field-order-insensitive
        let first = &elements[0];
        if elements[1..].iter().any(|element| element != first) {
            return Self::from_unknown_meta(extract);
        }
        let Some(fields) = first.as_object() else {
            return Self::from_unknown_meta(extract);
        };

        let mut schema = TabularSchema::new();
        let mut field_paths = FieldPathTable::new();
        for (key, value) in fields {
            schema.push(key.clone(), map_graph_type(declared_type(value)));
            field_paths.push(key.clone(), format!("/{}", key), false);
        }
        Self {
            schema,
            field_paths,
            extract,
        }
    }

    /// Map accumulator output: both key and value are meaningful, and map
    /// values can themselves be arbitrarily nested, so neither column is
    /// typed beyond STRING.
    fn from_map_accum_meta(_signature: &str, extract: Option<ExtractSpec>) -> Self {
        let mut field_paths = FieldPathTable::new();
        field_paths.push("key", "/key", false);
        field_paths.push("value", "/value", false);
        Self {
            schema: TabularSchema::new()
                .with_column("key", ColumnType::String)
                .with_column("value", ColumnType::String),
            field_paths,
            extract,
        }
    }

    /// Non-map accumulators have no structural decomposition yet.
    // TODO: decompose the signature into element types, e.g.
    // MapAccum<vertex, ListAccum<vertex>> => [vertex, ListAccum<vertex>]
    fn from_non_map_accum_meta(signature: &str, extract: Option<ExtractSpec>) -> Self {
        debug!(
            "No structural decomposition for accumulator `{}`",
            signature
        );
        Self::from_unknown_meta(extract)
    }

    pub fn schema(&self) -> &TabularSchema {
        &self.schema
    }

    pub fn field_paths(&self) -> &FieldPathTable {
        &self.field_paths
    }

    /// Where row extraction should pull each row's object from, when the
    /// query output is multi-statement. `None` means rows arrive as-is.
    pub fn extract_spec(&self) -> Option<&ExtractSpec> {
        self.extract.as_ref()
    }

    /// Extract the ordered column values for one result row.
    pub fn extract_row<'a>(&self, row: &'a Value) -> Vec<Option<&'a Value>> {
        self.field_paths.extract_row(row)
    }
}

/// A metadata array with exactly one statement that printed exactly one
/// object yields that object as the classification candidate.
fn sole_printed_object(meta: &Value) -> Option<&Value> {
    let statements = meta.as_array()?;
    if statements.len() != 1 {
        return None;
    }
    match &statements[0] {
        Value::Object(fields) if fields.len() == 1 => fields.values().next(),
        Value::Array(items) if items.len() == 1 => items.first(),
        _ => None,
    }
}

/// A vertex record carries both `v_id` and `attributes`.
fn is_vertex_record(element: &Value) -> bool {
    element.get("v_id").is_some() && element.get("attributes").is_some()
}

/// Declared type of a metadata value, defaulting to STRING when it is
/// missing or not textual.
fn declared_type(value: &Value) -> &str {
    value.as_str().unwrap_or(DEFAULT_TYPE)
}

fn declared_type_at<'a>(meta: &'a Value, pointer: &str) -> &'a str {
    meta.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TYPE)
}

/// Append one column per declared attribute, honoring the optional
/// allow-set. Attributes with a missing or empty name are skipped.
fn push_attribute_columns(
    meta: &Value,
    column_prune: Option<&HashSet<String>>,
    schema: &mut TabularSchema,
    field_paths: &mut FieldPathTable,
) {
    let attributes = match meta.get("Attributes") {
        Some(Value::Array(attributes)) => attributes.as_slice(),
        _ => &[],
    };
    for attribute in attributes {
        let name = attribute
            .get("AttributeName")
            .and_then(Value::as_str)
            .unwrap_or("");
        if name.is_empty() {
            continue;
        }
        if let Some(keep) = column_prune {
            if !keep.contains(name) {
                continue;
            }
        }
        let attribute_type = declared_type_at(attribute, "/AttributeType/Name");
        schema.push(name, map_graph_type(attribute_type));
        field_paths.push(name, format!("/attributes/{}", name), false);
    }
}
