//! End-to-end inference → extraction scenarios over realistic query output.

use graphtable::config::ReadOptions;
use graphtable::schema_inference::{ColumnType, ResultAccessor, TabularSchema};
use serde_json::{json, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn owned_row(accessor: &ResultAccessor, row: &Value) -> Vec<Value> {
    accessor
        .extract_row(row)
        .into_iter()
        .map(|v| v.cloned().unwrap_or(Value::Null))
        .collect()
}

#[test]
fn vertex_type_read_round_trip() {
    init_logging();
    // Schema metadata for one vertex type, as served by the schema endpoint
    let meta = json!({
        "Config": {},
        "Name": "person",
        "PrimaryId": {"AttributeName": "id", "AttributeType": {"Name": "STRING"}},
        "Attributes": [
            {"AttributeName": "age", "AttributeType": {"Name": "INT"}},
            {"AttributeName": "score", "AttributeType": {"Name": "DOUBLE"}},
            {"AttributeName": "active", "AttributeType": {"Name": "BOOL"}}
        ]
    });
    let options = ReadOptions::new("social");
    let accessor = ResultAccessor::from_vertex_meta(&meta, options.column_prune().as_ref());

    let rows = [
        json!({"v_id": "p1", "v_type": "person",
               "attributes": {"age": 40, "score": 1.5, "active": true}}),
        json!({"v_id": "p2", "v_type": "person",
               "attributes": {"age": 7, "score": 0.25, "active": false}}),
    ];
    let extracted: Vec<Vec<Value>> = rows.iter().map(|r| owned_row(&accessor, r)).collect();
    assert_eq!(
        extracted[0],
        vec![json!("p1"), json!(40), json!(1.5), json!(true)]
    );
    assert_eq!(
        extracted[1],
        vec![json!("p2"), json!(7), json!(0.25), json!(false)]
    );
}

#[test]
fn vertex_type_read_with_column_pruning() {
    init_logging();
    let meta = json!({
        "Name": "person",
        "PrimaryId": {"AttributeType": {"Name": "INT"}},
        "Attributes": [
            {"AttributeName": "age", "AttributeType": {"Name": "INT"}},
            {"AttributeName": "name", "AttributeType": {"Name": "STRING"}}
        ]
    });
    let options = ReadOptions::new("social").with_columns(vec!["name".to_string()]);
    let accessor = ResultAccessor::from_vertex_meta(&meta, options.column_prune().as_ref());
    let names: Vec<&str> = accessor.schema().column_names().collect();
    assert_eq!(names, vec!["v_id", "name"]);

    let row = json!({"v_id": 3, "attributes": {"age": 40, "name": "alice"}});
    assert_eq!(owned_row(&accessor, &row), vec![json!(3), json!("alice")]);
}

#[test]
fn edge_type_read_round_trip() {
    init_logging();
    let meta = json!({
        "IsDirected": true,
        "FromVertexTypeName": "person",
        "ToVertexTypeName": "company",
        "Name": "worksFor",
        "Attributes": [
            {"AttributeName": "weight", "AttributeType": {"Name": "FLOAT"}}
        ]
    });
    let accessor = ResultAccessor::from_edge_meta(&meta, None);

    let row = json!({
        "e_type": "worksFor",
        "from_type": "person", "from_id": "p1",
        "to_type": "company", "to_id": "c9",
        "attributes": {"weight": 0.5}
    });
    assert_eq!(
        owned_row(&accessor, &row),
        vec![
            json!("person"),
            json!("p1"),
            json!("company"),
            json!("c9"),
            json!(0.5)
        ]
    );
}

#[test]
fn vertex_expression_set_query_round_trip() {
    init_logging();
    // Single print statement emitting a vertex set; the declared v_id type
    // is wrong on purpose and must not leak into the schema
    let meta = json!([
        {"Result": [
            {"v_id": "INT", "v_type": "STRING", "attributes": {"age": "INT"}}
        ]}
    ]);
    let accessor = ResultAccessor::from_query_meta(&meta, None).unwrap();
    let id_column = &accessor.schema().columns()[0];
    assert_eq!(id_column.name, "v_id");
    assert_eq!(id_column.column_type, ColumnType::String);

    let row = json!({"v_id": "42", "v_type": "person", "attributes": {"age": 29}});
    assert_eq!(
        owned_row(&accessor, &row),
        vec![json!("42"), json!("person"), json!(29)]
    );
}

#[test]
fn extraction_directive_pins_one_statement() -> anyhow::Result<()> {
    init_logging();
    let meta = json!([
        {"@@total": "SumAccum<int>"},
        {"Top": [{"name": "string", "rank": "int"}]}
    ]);
    let accessor = ResultAccessor::from_query_meta(&meta, Some("1:Top"))?;
    let names: Vec<&str> = accessor.schema().column_names().collect();
    assert_eq!(names, vec!["name", "rank"]);

    let row = json!({"name": "alice", "rank": 1});
    assert_eq!(owned_row(&accessor, &row), vec![json!("alice"), json!(1)]);
    Ok(())
}

#[test]
fn map_accum_query_round_trip() {
    init_logging();
    let meta = json!([{"@@counts": "MapAccum<string, int>"}]);
    let accessor = ResultAccessor::from_query_meta(&meta, None).unwrap();

    let row = json!({"key": "alice", "value": 3});
    assert_eq!(owned_row(&accessor, &row), vec![json!("alice"), json!(3)]);
}

#[test]
fn external_schema_searches_nested_output() {
    init_logging();
    let schema = TabularSchema::new()
        .with_column("name", ColumnType::String)
        .with_column("age", ColumnType::integer_decimal());
    let accessor = ResultAccessor::from_external_schema(schema, None).unwrap();

    // Neither column sits at the top level; the recursive fallback finds both
    let row = json!({"vertices": [{"attributes": {"name": "bob", "age": 61}}]});
    assert_eq!(owned_row(&accessor, &row), vec![json!("bob"), json!(61)]);
}

#[test]
fn unknown_schema_preserves_raw_rows() {
    init_logging();
    // Heterogeneous output cannot be flattened; each row surfaces as-is
    let meta = json!([{"out": [{"a": "int"}, {"b": "int", "c": "int"}]}]);
    let accessor = ResultAccessor::from_query_meta(&meta, None).unwrap();
    let names: Vec<&str> = accessor.schema().column_names().collect();
    assert_eq!(names, vec!["results"]);

    let row = json!({"b": 456, "c": 789});
    let values = owned_row(&accessor, &row);
    assert_eq!(values, vec![row.clone()]);
    // Re-serializing the single column reproduces the original row text
    assert_eq!(
        serde_json::to_string(&values[0]).unwrap(),
        serde_json::to_string(&row).unwrap()
    );
}

#[test]
fn resolver_never_fails_on_malformed_metadata() {
    init_logging();
    let junk = [
        json!(null),
        json!(true),
        json!(12.5),
        json!(""),
        json!({}),
        json!([]),
        json!([null]),
        json!([[{"deep": []}]]),
        json!([{"a": {"b": {"c": "d"}}}]),
        json!([{"sole": "NotAnAccumulator<int>"}]),
    ];
    for meta in &junk {
        let accessor = ResultAccessor::from_query_meta(meta, None).unwrap();
        assert_eq!(accessor.schema().len(), 1);
        // The degraded accessor still extracts something from any row
        let row = json!({"anything": [1, 2, 3]});
        assert_eq!(accessor.extract_row(&row).len(), 1);
    }
}
