//! An inference result is broadcast once and consumed by many concurrent
//! row readers; these tests exercise the serialize/share/extract cycle.

use std::sync::Arc;
use std::thread;

use graphtable::schema_inference::ResultAccessor;
use serde_json::{json, Value};

#[test]
fn accessor_survives_serde_broadcast() {
    let meta = json!({
        "Name": "person",
        "PrimaryId": {"AttributeType": {"Name": "INT"}},
        "Attributes": [
            {"AttributeName": "name", "AttributeType": {"Name": "STRING"}}
        ]
    });
    let accessor = ResultAccessor::from_vertex_meta(&meta, None);

    // Simulate shipping the accessor to a remote reader task
    let wire = serde_json::to_vec(&accessor).unwrap();
    let received: ResultAccessor = serde_json::from_slice(&wire).unwrap();
    assert_eq!(received, accessor);

    let row = json!({"v_id": 1, "attributes": {"name": "alice"}});
    assert_eq!(received.extract_row(&row), accessor.extract_row(&row));
}

#[test]
fn shared_accessor_extracts_rows_concurrently() {
    let meta = json!([
        {"out": [
            {"user": "string", "hits": "int"},
            {"hits": "int", "user": "string"}
        ]}
    ]);
    let accessor =
        Arc::new(ResultAccessor::from_query_meta(&meta, None).expect("inference failed"));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let accessor = Arc::clone(&accessor);
            thread::spawn(move || {
                for i in 0..200 {
                    let row = json!({"user": format!("u{}-{}", worker, i), "hits": i});
                    let values: Vec<Value> = accessor
                        .extract_row(&row)
                        .into_iter()
                        .map(|v| v.cloned().unwrap_or(Value::Null))
                        .collect();
                    assert_eq!(values[0], json!(format!("u{}-{}", worker, i)));
                    assert_eq!(values[1], json!(i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("reader thread panicked");
    }
}
