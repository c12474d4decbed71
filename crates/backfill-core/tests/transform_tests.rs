//! Eager transform tests
//!
//! Scenario and property tests for the depth-bounded copy-and-substitute.

use backfill_core::{
    default_palette, should_replace, transform, Key, KeyPath, Palette, TransformOptions,
    Transformer, Value,
};
use backfill_test_utils::{
    complex_document, falsy_document, large_document, nested_mapping, nested_sequence,
    opaque_document, seeded_rng,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn path(text: &str) -> KeyPath {
    text.parse().unwrap()
}

/// Structure and untouched leaves match; missing input leaves may differ
fn same_shape(input: &Value, output: &Value) -> bool {
    match (input, output) {
        (Value::Sequence(a), Value::Sequence(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
        }
        (Value::Mapping(a), Value::Mapping(b)) => {
            a.keys().eq(b.keys()) && a.values().zip(b.values()).all(|(x, y)| same_shape(x, y))
        }
        (missing, _) if missing.is_missing() => true,
        (a, b) => a == b,
    }
}

fn contains_missing(value: &Value) -> bool {
    match value {
        Value::Sequence(items) => items.iter().any(contains_missing),
        Value::Mapping(map) => map.values().any(contains_missing),
        other => other.is_missing(),
    }
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn arb_present_scalar() -> impl Strategy<Value = Value> {
    arb_scalar().prop_filter("present", |v| !v.is_missing())
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Sequence),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..5)
                .prop_map(|entries| entries.into_iter().collect::<Value>()),
        ]
    })
}

#[test]
fn custom_substitute_is_deterministic() {
    let input = Value::from(json!({"a": null, "b": [null, 1]}));
    let options = TransformOptions::new().with_substitute(|_| Value::from("X"));

    let output = transform(&input, &options);
    assert_eq!(output, Value::from(json!({"a": "X", "b": ["X", 1]})));
}

#[test]
fn replace_falsy_substitutes_all_four() {
    let options = TransformOptions::new()
        .with_replace_falsy(true)
        .with_substitute(|_| Value::from("X"));

    let output = transform(&falsy_document(), &options);
    assert_eq!(
        output,
        Value::from(json!({"empty": "X", "zero": "X", "flag": "X", "n": "X"}))
    );
}

#[test]
fn strict_mode_substitutes_only_null() {
    let options = TransformOptions::new().with_substitute(|_| Value::from("X"));

    let output = transform(&falsy_document(), &options);
    assert_eq!(
        output,
        Value::from(json!({"empty": "", "zero": 0, "flag": false, "n": "X"}))
    );
}

#[test]
fn complex_document_is_fully_filled() {
    let input = complex_document();
    let report = Transformer::default().transform_report(&input);

    assert!(report.is_complete());
    // user, name, contacts[0], phone, theme, content, posts[1], title, comments[0]
    assert_eq!(report.substitutions, 9);
    assert!(same_shape(&input, &report.value));
    assert!(!contains_missing(&report.value));

    let palette = default_palette();
    for text in [
        "user",
        "profile.name",
        "profile.contacts[0]",
        "profile.contacts[1].phone",
        "profile.settings.theme",
        "posts[0].content",
        "posts[1]",
        "posts[2].title",
        "posts[2].comments[0]",
    ] {
        let value = report.value.get_path(&path(text)).unwrap();
        assert!(palette.contains(value), "{text} -> {value:?}");
    }

    assert_eq!(
        report.value.get_path(&path("profile.settings.notifications")),
        Some(&Value::from("enabled"))
    );
    assert_eq!(
        report.value.get_path(&path("posts[0].title")),
        Some(&Value::from("Hello"))
    );
}

#[test]
fn input_is_left_unchanged() {
    let input = complex_document();
    let before = input.clone();
    let _ = transform(&input, &TransformOptions::new());
    assert_eq!(input, before);
}

#[test]
fn mapping_order_is_preserved() {
    let input = Value::from(json!({"z": null, "a": 1, "m": null, "b": 2}));
    let output = transform(&input, &TransformOptions::new());

    let keys: Vec<_> = output.as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m", "b"]);
}

#[test]
fn opaque_values_keep_identity() {
    let input = opaque_document();
    let output = transform(&input, &TransformOptions::new());

    for key in ["joined", "rule", "job", "account"] {
        let before = input.get(&Key::from(key)).unwrap().as_opaque().unwrap();
        let after = output.get(&Key::from(key)).unwrap().as_opaque().unwrap();
        assert!(Arc::ptr_eq(before, after), "{key} was copied");
    }
    assert!(default_palette().contains(output.get(&Key::from("missing")).unwrap()));
}

#[test]
fn opaque_record_is_not_descended() {
    let input = opaque_document();
    let output = transform(&input, &TransformOptions::new());

    let account = output.get(&Key::from("account")).unwrap().as_opaque().unwrap();
    let backfill_core::OpaqueValue::Record(record) = account.as_ref() else {
        panic!("account should stay a record");
    };
    assert_eq!(record.fields().get("nickname"), Some(&Value::Null));
}

#[test]
fn predicate_still_applies_at_opaque_node() {
    let input = opaque_document();
    let options = TransformOptions::new()
        .with_predicate(|v| v.as_opaque().is_some_and(|o| o.type_name() == "date"))
        .with_substitute(|_| Value::from("when?"));

    let output = transform(&input, &options);
    assert_eq!(output.get(&Key::from("joined")), Some(&Value::from("when?")));
    // The custom predicate replaces absence detection entirely
    assert_eq!(output.get(&Key::from("missing")), Some(&Value::Null));
}

#[test]
fn substitute_receives_original_value() {
    let input = Value::from(vec![Value::Null, Value::Undefined]);
    let options = TransformOptions::new().with_substitute(|v| Value::from(v.kind().to_string()));

    assert_eq!(
        transform(&input, &options),
        Value::from(vec!["null", "undefined"])
    );
}

#[test]
#[should_panic(expected = "predicate hook failed")]
fn predicate_panic_reaches_caller() {
    let options = TransformOptions::new().with_predicate(|_| panic!("predicate hook failed"));
    let _ = transform(&complex_document(), &options);
}

#[test]
#[should_panic(expected = "substitute hook failed")]
fn substitute_panic_reaches_caller() {
    let options = TransformOptions::new().with_substitute(|_| panic!("substitute hook failed"));
    let _ = transform(&complex_document(), &options);
}

#[test]
fn deep_mapping_is_cut_at_max_depth() {
    let input = nested_mapping(15, Value::Null);
    let report = Transformer::new(TransformOptions::new()).transform_report(&input);

    assert_eq!(report.value, input);
    assert_eq!(report.substitutions, 0);
    assert_eq!(report.depth_limited.len(), 1);

    let cut = &report.depth_limited[0];
    assert_eq!(cut.depth, 11);
    assert_eq!(cut.path.len(), 11);
}

#[test]
fn raising_max_depth_reaches_deep_leaves() {
    let input = nested_mapping(15, Value::Null);
    let report =
        Transformer::new(TransformOptions::new().with_max_depth(15)).transform_report(&input);

    assert!(report.is_complete());
    assert_eq!(report.substitutions, 1);
}

#[test]
fn seeded_transforms_are_reproducible() {
    let input = large_document(200);
    let transformer = Transformer::default();

    let a = transformer.transform_with_rng(&input, &mut seeded_rng(11));
    let b = transformer.transform_with_rng(&input, &mut seeded_rng(11));
    assert_eq!(a, b);
}

#[test]
fn large_document_counts() {
    let input = large_document(1000);
    let report = Transformer::default().transform_report(&input);

    // 200 null entries; of the remaining 800, those with i % 3 == 0 carry undefined
    let undefined = (0..1000).filter(|i| i % 5 != 0 && i % 3 == 0).count();
    assert_eq!(report.substitutions, 200 + undefined);
    assert!(!contains_missing(&report.value));
}

#[test]
fn custom_palette_is_used() {
    let palette = Palette::from_strings(["a", "b"]).unwrap();
    let options = TransformOptions::new().with_palette(palette.clone());

    let output = transform(&large_document(50), &options);
    for item in output.as_sequence().unwrap().iter().step_by(5) {
        assert!(palette.contains(item));
    }
}

proptest! {
    #[test]
    fn prop_present_scalars_are_identity(value in arb_present_scalar()) {
        let options = TransformOptions::new();
        prop_assert_eq!(transform(&value, &options), value);
    }

    #[test]
    fn prop_missing_becomes_palette_member(missing in prop_oneof![Just(Value::Null), Just(Value::Undefined)]) {
        let output = transform(&missing, &TransformOptions::new());
        prop_assert!(default_palette().contains(&output));
    }

    #[test]
    fn prop_shape_is_preserved(value in arb_value()) {
        let output = transform(&value, &TransformOptions::new());
        prop_assert!(same_shape(&value, &output));
        prop_assert!(!contains_missing(&output));
    }

    #[test]
    fn prop_predicate_is_deterministic(value in arb_value(), replace_falsy in any::<bool>()) {
        let options = TransformOptions::new().with_replace_falsy(replace_falsy);
        prop_assert_eq!(should_replace(&value, &options), should_replace(&value, &options));
    }

    #[test]
    fn prop_subtrees_past_limit_are_identical(
        levels in 1usize..12,
        max_depth in 0usize..10,
        leaf in arb_scalar(),
    ) {
        let input = nested_sequence(levels, leaf);
        let options = TransformOptions::new().with_max_depth(max_depth);
        let output = transform(&input, &options);

        if levels > max_depth {
            // The node at depth max_depth + 1 must equal the input there
            let cut = KeyPath::new(vec![Key::Index(0); max_depth + 1]);
            prop_assert_eq!(output.get_path(&cut), input.get_path(&cut));
        } else {
            prop_assert!(same_shape(&input, &output));
        }
    }
}
