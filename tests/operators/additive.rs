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

use std::sync::Arc;

use serde_json::{json, Value};
use zi_food::operators::additive::{additive_risk_factory, MALFORMED_METADATA_KEY};
use zi_food::{ZiAdditiveScorer, ZiDictionaryRegistry, ZiOperator, ZiRecord, ZiSeverityTable};

fn small_table() -> ZiSeverityTable {
    ZiSeverityTable::from_pairs([("e250", 2), ("e501", 0)]).unwrap()
}

#[test]
fn risk_is_the_highest_listed_severity() {
    let scorer = ZiAdditiveScorer::new(Arc::new(small_table())).unwrap();
    let score = scorer
        .score(Some("e250 - nitrite de sodium, e501 - carbonates de potassium"))
        .unwrap();
    assert_eq!(score.level, 2);
}

#[test]
fn unknown_codes_count_as_harmless() {
    let scorer = ZiAdditiveScorer::new(Arc::new(small_table())).unwrap();
    let score = scorer.score(Some("e330 - acide citrique")).unwrap();
    assert_eq!(score.level, 0);
    assert_eq!(score.codes, vec!["e330"]);
}

#[test]
fn bundled_table_flags_nitrites() {
    let table = ZiSeverityTable::builtin().unwrap();
    assert_eq!(table.level("e250"), 3);
    assert!(table.level("E250") <= 3);
    assert!(ZiSeverityTable::from_pairs([("e100", 4)]).is_err());
    assert!(ZiSeverityTable::from_pairs([(" ", 1)]).is_err());
}

#[test]
fn operator_writes_level_and_codes_and_counts_malformed_entries() {
    let registry = ZiDictionaryRegistry::builtin()
        .unwrap()
        .with_severity(small_table());
    let op = additive_risk_factory(&json!({}), &registry).unwrap();
    let out = op
        .apply(vec![
            ZiRecord::new(None, json!({"additives_fr": "E250 - Nitrite de sodium"})),
            ZiRecord::new(None, json!({"additives_fr": null})),
            ZiRecord::new(None, json!({"additives_fr": "missing"})),
            ZiRecord::new(None, json!({"additives_fr": "e501 - carbonates, arôme"})),
        ])
        .unwrap();

    assert_eq!(out[0].payload["additive_danger_level"], json!(2));
    assert_eq!(out[0].payload["additive_codes"], json!(["e250"]));
    assert!(out[0].metadata.is_none());

    for record in &out[1..3] {
        assert_eq!(record.payload["additive_danger_level"], Value::Null);
        assert_eq!(record.payload["additive_codes"], Value::Null);
    }

    assert_eq!(out[3].payload["additive_danger_level"], json!(0));
    assert_eq!(out[3].payload["additive_codes"], json!(["e501", "arôme"]));
    let metadata = out[3].metadata.as_ref().unwrap();
    assert_eq!(metadata[MALFORMED_METADATA_KEY], json!(1));
}

#[test]
fn factory_honours_custom_columns() {
    let registry = ZiDictionaryRegistry::builtin().unwrap();
    let op = additive_risk_factory(
        &json!({"source": "additifs", "level_column": "risque", "codes_column": "codes"}),
        &registry,
    )
    .unwrap();
    let out = op
        .apply(vec![ZiRecord::new(None, json!({"additifs": "e250 - nitrite"}))])
        .unwrap();
    assert_eq!(out[0].payload["risque"], json!(3));
    assert_eq!(out[0].payload["codes"], json!(["e250"]));
    assert!(additive_risk_factory(&json!({"source": 3}), &registry).is_err());
}
