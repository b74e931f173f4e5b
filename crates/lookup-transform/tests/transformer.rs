//! Tests for record enrichment in each strategy.

use std::sync::Arc;

use lookup_model::{Dictionary, FieldPath, Record};
use lookup_transform::FieldTransformer;
use proptest::prelude::*;
use serde_json::{Value, json};

fn dictionary() -> Arc<Dictionary> {
    Arc::new(
        [
            ("foo", "bar"),
            ("nicolas", "cage"),
            ("input", "output"),
            ("1", "one"),
            ("two", "2"),
        ]
        .into_iter()
        .collect(),
    )
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn self_assign(field: &str) -> FieldTransformer {
    FieldTransformer::new(dictionary(), FieldPath::parse(field), None, false)
}

fn copy(field: &str, output: &str) -> FieldTransformer {
    FieldTransformer::new(
        dictionary(),
        FieldPath::parse(field),
        Some(FieldPath::parse(output)),
        false,
    )
}

fn rename(field: &str) -> FieldTransformer {
    FieldTransformer::new(dictionary(), FieldPath::parse(field), None, true)
}

fn apply(transformer: &FieldTransformer, value: Value) -> Value {
    let mut record = record(value);
    transformer.transform(&mut record);
    Value::Object(record)
}

#[test]
fn self_assign_replaces_value() {
    let out = apply(&self_assign("key1"), json!({"key1": "nicolas", "foo": "bar"}));
    assert_eq!(out, json!({"key1": "cage", "foo": "bar"}));
}

#[test]
fn self_assign_without_match_leaves_record() {
    let out = apply(&self_assign("key1"), json!({"key1": "myvalue", "foo": "bar"}));
    assert_eq!(out, json!({"key1": "myvalue", "foo": "bar"}));
}

#[test]
fn self_assign_nested() {
    let out = apply(
        &self_assign("nested.key1"),
        json!({"nested": {"key1": "nicolas"}}),
    );
    assert_eq!(out, json!({"nested": {"key1": "cage"}}));
}

#[test]
fn self_assign_ignores_non_string_values() {
    let out = apply(&self_assign("key1"), json!({"key1": 1}));
    assert_eq!(out, json!({"key1": 1}));
}

#[test]
fn lookup_is_case_sensitive() {
    let out = apply(&self_assign("key1"), json!({"key1": "Nicolas"}));
    assert_eq!(out, json!({"key1": "Nicolas"}));
}

#[test]
fn copy_writes_output_field() {
    let out = apply(&copy("key1", "key2"), json!({"key1": "nicolas", "foo": "bar"}));
    assert_eq!(out, json!({"key1": "nicolas", "foo": "bar", "key2": "cage"}));
}

#[test]
fn copy_without_match_passes_value_through() {
    let out = apply(&copy("key1", "key2"), json!({"key1": "myvalue", "foo": "bar"}));
    assert_eq!(out, json!({"key1": "myvalue", "foo": "bar", "key2": "myvalue"}));
}

#[test]
fn copy_creates_nested_output() {
    let out = apply(
        &copy("nested.key1", "new.foo"),
        json!({"nested": {"key1": "nicolas"}}),
    );
    assert_eq!(
        out,
        json!({"nested": {"key1": "nicolas"}, "new": {"foo": "cage"}})
    );
}

#[test]
fn copy_into_existing_nested_map() {
    let out = apply(
        &copy("key1", "nested.key2"),
        json!({"key1": "nicolas", "nested": {"keep": true}}),
    );
    assert_eq!(
        out,
        json!({"key1": "nicolas", "nested": {"keep": true, "key2": "cage"}})
    );
}

#[test]
fn copy_with_missing_input_changes_nothing() {
    let out = apply(&copy("nested.key1", "new.foo"), json!({"foo": "bar"}));
    assert_eq!(out, json!({"foo": "bar"}));
}

#[test]
fn copy_through_scalar_is_not_found() {
    let out = apply(
        &copy("nested.key1", "new.foo"),
        json!({"nested": "nicolas"}),
    );
    assert_eq!(out, json!({"nested": "nicolas"}));
}

#[test]
fn copy_does_not_overwrite_scalar_parent() {
    let out = apply(
        &copy("key1", "new.foo"),
        json!({"key1": "nicolas", "new": "scalar"}),
    );
    assert_eq!(out, json!({"key1": "nicolas", "new": "scalar"}));
}

#[test]
fn rename_key() {
    let out = apply(&rename("nicolas"), json!({"nicolas": "bar"}));
    assert_eq!(out, json!({"cage": "bar"}));
}

#[test]
fn rename_overwrites_existing_target() {
    let out = apply(&rename("nicolas"), json!({"nicolas": "bar", "cage": "old"}));
    assert_eq!(out, json!({"cage": "bar"}));
}

#[test]
fn rename_without_entry_is_noop() {
    let out = apply(&rename("dummy"), json!({"nicolas": "bar"}));
    assert_eq!(out, json!({"nicolas": "bar"}));
}

#[test]
fn rename_of_absent_key_is_noop() {
    let out = apply(&rename("foo"), json!({"nicolas": "bar"}));
    assert_eq!(out, json!({"nicolas": "bar"}));
}

#[test]
fn rename_stays_in_containing_map() {
    let out = apply(
        &rename("nested.nicolas"),
        json!({"nested": {"nicolas": {"deep": 1}}, "other": 2}),
    );
    assert_eq!(out, json!({"nested": {"cage": {"deep": 1}}, "other": 2}));
}

#[test]
fn rename_ignores_output_field() {
    let transformer = FieldTransformer::new(
        dictionary(),
        FieldPath::parse("nicolas"),
        Some(FieldPath::parse("key2")),
        true,
    );
    assert!(matches!(
        transformer.strategy(),
        lookup_transform::Strategy::Rename
    ));
    let out = apply(&transformer, json!({"nicolas": "bar"}));
    assert_eq!(out, json!({"cage": "bar"}));
}

#[test]
fn empty_dictionary_always_misses() {
    let transformer = FieldTransformer::new(
        Arc::new(Dictionary::default()),
        FieldPath::parse("key1"),
        None,
        false,
    );
    let out = apply(&transformer, json!({"key1": "nicolas"}));
    assert_eq!(out, json!({"key1": "nicolas"}));
}

#[test]
fn transform_returns_same_record() {
    let transformer = self_assign("key1");
    let mut record = record(json!({"key1": "nicolas"}));
    let returned = transformer.transform(&mut record);
    returned.insert("seen".to_string(), json!(true));
    assert_eq!(record["seen"], json!(true));
    assert_eq!(record["key1"], json!("cage"));
}

#[test]
fn shared_dictionary_across_threads() {
    let transformer = copy("key1", "key2");
    let inputs = ["nicolas", "foo", "input", "myvalue"];
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let transformer = &transformer;
                scope.spawn(move || apply(transformer, json!({"key1": input}))["key2"].clone())
            })
            .collect();
        let results: Vec<Value> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(
            results,
            vec![json!("cage"), json!("bar"), json!("output"), json!("myvalue")]
        );
    });
}

fn leaf_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("nicolas".to_string()),
        Just("input".to_string()),
        Just("1".to_string()),
        "[a-z]{1,6}",
    ]
}

proptest! {
    // "foo" maps to "bar" and "two" to "2"; neither result is itself a key,
    // so a second pass can never change the record again.
    #[test]
    fn self_assign_is_idempotent(value in leaf_value()) {
        let transformer = self_assign("nested.key1");
        let once = apply(&transformer, json!({"nested": {"key1": value}}));
        let twice = apply(&transformer, once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn copy_is_idempotent(value in leaf_value()) {
        let transformer = copy("key1", "out.key2");
        let once = apply(&transformer, json!({"key1": value}));
        let twice = apply(&transformer, once.clone());
        prop_assert_eq!(once, twice);
    }
}
