#![cfg(feature = "json")]
use flatcsv::{Options, encode_json};
use serde_json::json;

fn shallow() -> Options {
    Options::default().with_flatten(false)
}

#[test]
fn nested_values_are_written_as_json() {
    let v = json!([{"id": 1, "meta": {"k": "v"}, "list": [1, 2]}]);
    assert_eq!(
        encode_json(&v, &shallow()),
        "id,meta,list\n1,\"{\"\"k\"\":\"\"v\"\"}\",\"[1,2]\""
    );
}

#[test]
fn json_cells_are_quoted_only_when_needed() {
    let v = json!([{"list": [1, 2]}]);
    let opts = shallow().with_delimiter(';');
    assert_eq!(encode_json(&v, &opts), "list\n[1,2]");
}

#[test]
fn primitives_and_arrays_are_wrapped_under_value() {
    let v = json!([7, [1, 2]]);
    assert_eq!(encode_json(&v, &shallow()), "value\n7\n\"[1,2]\"");
}

#[test]
fn empty_containers_keep_their_column() {
    let v = json!([{"a": [], "b": {}}]);
    assert_eq!(encode_json(&v, &shallow()), "a,b\n[],{}");
}

#[test]
fn single_object_is_one_row() {
    let v = json!({"a": {"b": 1}});
    assert_eq!(encode_json(&v, &shallow()), "a\n\"{\"\"b\"\":1}\"");
}
