//! Testing utilities for the backfill workspace
//!
//! Shared fixtures, generators and documents.

#![allow(missing_docs)]

use backfill_value::{Mapping, PendingValue, Record, Value};
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use serde_json::json;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Nested user/profile/posts document with absence at several depths
pub fn complex_document() -> Value {
    let mut doc = Value::from(json!({
        "user": null,
        "profile": {
            "name": null,
            "contacts": [null, { "phone": null }],
            "settings": { "theme": null, "notifications": "enabled" }
        },
        "posts": [
            { "title": "Hello", "content": null },
            null,
            { "title": null, "comments": [null] }
        ]
    }));

    // JSON has no undefined: mark the never-assigned fields explicitly
    let profile = doc.as_mapping_mut().unwrap()["profile"].as_mapping_mut().unwrap();
    profile["name"] = Value::Undefined;
    profile["contacts"].as_sequence_mut().unwrap()[1]
        .as_mapping_mut()
        .unwrap()["phone"] = Value::Undefined;
    doc
}

/// Every falsy scalar plus one explicit null
pub fn falsy_document() -> Value {
    Value::from(json!({ "empty": "", "zero": 0, "flag": false, "n": null }))
}

/// Document mixing opaque values with absent fields
pub fn opaque_document() -> Value {
    let joined = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let mut fields = Mapping::new();
    fields.insert("nickname".to_string(), Value::Null);

    [
        ("joined", Value::from(joined)),
        ("rule", Value::from(Regex::new("^[a-z]+$").unwrap())),
        ("job", Value::from(PendingValue::new())),
        ("account", Value::from(Record::new("Account", fields))),
        ("missing", Value::Null),
    ]
    .into_iter()
    .collect()
}

/// Sequence of `len` entries: every fifth null, the rest small records
pub fn large_document(len: usize) -> Value {
    Value::Sequence(
        (0..len)
            .map(|i| {
                if i % 5 == 0 {
                    Value::Null
                } else {
                    let nested = if i % 3 == 0 {
                        Value::Undefined
                    } else {
                        Value::from(i64::try_from(i).unwrap())
                    };
                    [
                        ("value", Value::from(i64::try_from(i).unwrap())),
                        ("nested", nested),
                    ]
                    .into_iter()
                    .collect()
                }
            })
            .collect(),
    )
}

/// `levels` single-element sequences wrapped around `leaf`
pub fn nested_sequence(levels: usize, leaf: Value) -> Value {
    (0..levels).fold(leaf, |inner, _| Value::Sequence(vec![inner]))
}

/// `levels` single-key mappings (`"next"`) wrapped around `leaf`
pub fn nested_mapping(levels: usize, leaf: Value) -> Value {
    (0..levels).fold(leaf, |inner, _| [("next", inner)].into_iter().collect())
}
