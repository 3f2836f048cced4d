//! Graphtable - schema inference and field extraction for graph query results
//!
//! This crate is the schema-inference layer of a connector that moves graph
//! query results into a tabular execution engine. It provides:
//! - Output-shape classification over query metadata
//! - Vertex/edge schema metadata mapping to tabular columns
//! - Per-row column value extraction via JSON pointers
//!
//! Inference runs once per query; the resulting accessor is immutable and
//! serializable, shared read-only by every parallel row reader.

pub mod config;
pub mod schema_inference;
