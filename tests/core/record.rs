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
use zi_food::operator::{execute_operator, for_each_record, ZiOperator};
use zi_food::record::{batch_columns, ZiRecord, ZiRecordBatch};
use zi_food::{Result, ZiError};

#[test]
fn absent_and_null_cells_are_both_missing() {
    let record = ZiRecord::new(None, json!({"code": "1", "packaging": null, "origins": ""}));
    assert!(record.is_null("packaging"));
    assert!(record.is_null("labels_fr"));
    assert!(!record.is_null("origins"));
    assert_eq!(record.field("code"), Some(&json!("1")));
}

#[test]
fn completeness_is_computed_over_the_batch_columns() {
    let batch = vec![
        ZiRecord::new(None, json!({"code": "1", "a": 1})),
        ZiRecord::new(None, json!({"code": "2", "b": 2, "c": null})),
    ];
    let columns = batch_columns(&batch);
    assert_eq!(columns, vec!["code", "a", "b", "c"]);
    assert!((batch[0].completeness(&columns) - 0.5).abs() < 1e-9);
    assert!((batch[1].missing_ratio(&columns) - 0.5).abs() < 1e-9);
    assert_eq!(batch[0].missing_ratio(&[]), 0.0);
}

#[test]
fn set_field_appends_derived_columns() {
    let mut record = ZiRecord::new(None, json!({"packaging": "verre"}));
    record.set_field("pack_verre", json!(1));
    assert_eq!(record.payload, json!({"packaging": "verre", "pack_verre": 1}));

    let mut scalar = ZiRecord::new(None, json!("raw"));
    scalar.set_field("x", json!(true));
    assert_eq!(scalar.payload, json!({"x": true}));
}

#[test]
fn metadata_is_created_on_demand() {
    let mut record = ZiRecord::new(Some("1".to_string()), json!({}));
    assert!(record.metadata.is_none());
    record.metadata_mut().insert("malformed_additives".into(), json!(2));
    assert_eq!(record.metadata.as_ref().unwrap()["malformed_additives"], json!(2));
}

#[derive(Debug)]
struct Schema;

impl ZiOperator for Schema {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn apply(&self, _batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        Err(ZiError::schema("no identifier"))
    }
}

#[test]
fn execute_operator_keeps_schema_errors_recognizable() {
    let err = execute_operator(&Schema, Vec::new()).unwrap_err();
    assert!(err.is_schema());
}

#[test]
fn for_each_record_preserves_order() {
    let mut batch: ZiRecordBatch = (0..64)
        .map(|i| ZiRecord::new(None, json!({"n": i})))
        .collect();
    for_each_record(&mut batch, |record| {
        let n = record.payload["n"].as_i64().unwrap_or_default();
        record.set_field("double", json!(n * 2));
    });
    for (i, record) in batch.iter().enumerate() {
        assert_eq!(record.payload["double"], json!(i as i64 * 2));
    }
}
