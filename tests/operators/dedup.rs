//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use serde_json::json;
use zi_food::operators::dedup::{dedup_completeness_factory, identifier_require_factory};
use zi_food::{
    dedupe_by_completeness, ZiDedupCompleteness, ZiDictionaryRegistry, ZiIdentifierRequire,
    ZiOperator, ZiRecord, ZiRecordBatch,
};

fn products() -> ZiRecordBatch {
    vec![
        ZiRecord::new(None, json!({"code": "100", "product_name": null, "packaging": null})),
        ZiRecord::new(None, json!({"code": "200", "product_name": "Thé", "packaging": "carton"})),
        ZiRecord::new(None, json!({"code": "100", "product_name": "Riz", "packaging": "sachet"})),
        ZiRecord::new(None, json!({"code": "100", "product_name": "Riz", "packaging": null})),
        ZiRecord::new(None, json!({"code": "300", "product_name": null, "packaging": null})),
    ]
}

#[test]
fn one_record_per_identifier_survives() {
    let out = dedupe_by_completeness(products(), Some("code"), &[]);
    let codes: Vec<_> = out.iter().map(|r| r.payload["code"].clone()).collect();
    assert_eq!(codes, vec![json!("200"), json!("100"), json!("300")]);
    assert_eq!(out[1].payload["packaging"], json!("sachet"));
}

#[test]
fn deduplication_is_idempotent() {
    let once = dedupe_by_completeness(products(), Some("code"), &[]);
    let twice = dedupe_by_completeness(once.clone(), Some("code"), &[]);
    assert_eq!(once, twice);
}

#[test]
fn operator_keys_on_record_ids_after_identifier_cleanup() {
    let require = ZiIdentifierRequire::new("code");
    let dedup = ZiDedupCompleteness::new(None, Vec::new());
    let out = dedup.apply(require.apply(products()).unwrap()).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|r| r.id.is_some()));
}

#[test]
fn keyless_records_pass_through() {
    let batch = vec![
        ZiRecord::new(None, json!({"a": 1})),
        ZiRecord::new(None, json!({"a": 2})),
    ];
    let out = ZiDedupCompleteness::new(None, Vec::new()).apply(batch).unwrap();
    assert_eq!(out.len(), 2);
}

#[test]
fn missing_identifier_column_is_fatal() {
    let registry = ZiDictionaryRegistry::builtin().unwrap();
    let op = identifier_require_factory(&json!({"column": "ean"}), &registry).unwrap();
    let err = op.apply(products()).unwrap_err();
    assert!(err.is_schema());
    assert!(identifier_require_factory(&json!({"column": ""}), &registry).is_err());
}

#[test]
fn factories_default_to_code_and_record_id() {
    let registry = ZiDictionaryRegistry::builtin().unwrap();
    let require = identifier_require_factory(&json!({}), &registry).unwrap();
    let dedup = dedup_completeness_factory(&json!({}), &registry).unwrap();
    let mut batch = products();
    batch.push(ZiRecord::new(None, json!({"code": null, "product_name": "x"})));
    let out = dedup.apply(require.apply(batch).unwrap()).unwrap();
    assert_eq!(out.len(), 3);
}

fn placeholders() -> Vec<String> {
    vec!["nan".to_string(), "missing".to_string()]
}

#[test]
fn placeholder_rows_lose_to_informative_duplicates() {
    let batch = vec![
        ZiRecord::new(
            None,
            json!({"code": "1", "packaging": "nan", "origins": "NaN", "labels_fr": "missing"}),
        ),
        ZiRecord::new(
            None,
            json!({"code": "1", "packaging": "Bocal en verre", "origins": "Espagne", "labels_fr": null}),
        ),
    ];
    let out = dedupe_by_completeness(batch.clone(), Some("code"), &placeholders());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].payload["packaging"], json!("Bocal en verre"));

    let registry = ZiDictionaryRegistry::builtin().unwrap();
    let op = dedup_completeness_factory(&json!({"key": "code"}), &registry).unwrap();
    let out = op.apply(batch).unwrap();
    assert_eq!(out[0].payload["origins"], json!("Espagne"));
}

#[test]
fn blank_text_counts_as_missing_even_without_placeholders() {
    let batch = vec![
        ZiRecord::new(None, json!({"code": "1", "product_name": "   "})),
        ZiRecord::new(None, json!({"code": "1", "product_name": "Riz"})),
    ];
    let out = dedupe_by_completeness(batch, Some("code"), &[]);
    assert_eq!(out[0].payload["product_name"], json!("Riz"));
}

#[test]
fn integral_float_codes_match_their_string_form() {
    let out = ZiIdentifierRequire::new("code")
        .apply(vec![
            ZiRecord::new(None, json!({"code": 3017620422003.0, "product_name": null})),
            ZiRecord::new(None, json!({"code": "3017620422003", "product_name": "Pâte"})),
            ZiRecord::new(None, json!({"code": 12.5})),
        ])
        .unwrap();
    let ids: Vec<_> = out.iter().map(|r| r.id.clone().unwrap()).collect();
    assert_eq!(ids, vec!["3017620422003", "3017620422003", "12.5"]);

    let out = ZiDedupCompleteness::new(None, placeholders()).apply(out).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].payload["product_name"], json!("Pâte"));
}
