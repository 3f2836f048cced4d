//! Integration tests - schema inference driven end to end, from query/schema
//! metadata through row extraction.

mod broadcast_test;
mod inference_roundtrip_test;
