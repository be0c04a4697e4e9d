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

use serde_json::{json, Value};
use zi_food::{
    ZiCleaningConfig, ZiDictionaryRegistry, ZiDomain, ZiFoodPipeline, ZiPipelineBuilder, ZiRecord,
    ZiRecordBatch,
};

fn products() -> ZiRecordBatch {
    vec![
        ZiRecord::new(
            None,
            json!({
                "code": "3017620422003",
                "product_name": "Pâte à tartiner",
                "packaging": "Pot en verre, film plastique",
                "traces_fr": "Lait",
                "allergens": null,
                "labels_fr": null,
                "origins": "Espagne",
                "manufacturing_places": "France",
                "categories_fr": "Snacks sucrés,Chocolats,Chocolats au lait",
                "additives_fr": "E250 - Nitrite de sodium",
                "alcohol_100g": 0,
                "ingredients_text": "Sucre, huile de palme, noisettes",
                "fat_100g": 120
            }),
        ),
        ZiRecord::new(
            None,
            json!({"code": "3017620422003", "product_name": "Pâte à tartiner"}),
        ),
        ZiRecord::new(None, json!({"code": "  ", "product_name": "Sans code"})),
        ZiRecord::new(
            None,
            json!({"code": 42, "product_name": "Eau", "packaging": "nan", "origins": "Lisboa"}),
        ),
    ]
}

#[test]
fn canonical_run_derives_every_output() {
    let pipeline = ZiFoodPipeline::builtin(ZiCleaningConfig::default()).unwrap();
    let (out, report) = pipeline.run(products()).unwrap();

    assert_eq!(out.len(), 2);
    let first = &out[0].payload;
    assert_eq!(out[0].id.as_deref(), Some("3017620422003"));
    assert_eq!(first["pack_verre"], json!(1));
    assert_eq!(first["pack_plastique"], json!(1));
    assert_eq!(first["pack_carton"], json!(0));
    assert_eq!(first["allergen_lait"], json!(1));
    assert_eq!(first["label_halal"], Value::Null);
    assert_eq!(first["origin_country"], json!("espagne"));
    assert_eq!(first["origin_continent"], json!("europe"));
    assert_eq!(first["manufacturing_country"], json!("france"));
    assert_eq!(first["manufacturing_continent"], Value::Null);
    assert_eq!(first["categories_level_1"], json!("snacks sucrés"));
    assert_eq!(first["categories_level_3"], json!("chocolats au lait"));
    assert_eq!(first["additive_danger_level"], json!(3));
    assert_eq!(first["alcool"], json!(0));
    assert_eq!(first["viande"], json!(0));
    assert_eq!(first["ingredients_n"], json!(3));
    assert_eq!(first["fat_100g"], json!(100.0));

    let second = &out[1].payload;
    assert_eq!(out[1].id.as_deref(), Some("42"));
    assert_eq!(second["pack_verre"], Value::Null);
    assert_eq!(second["origin_country"], json!("lisboa"));
    assert_eq!(second["origin_continent"], json!("inconnue"));
    assert_eq!(second["additive_danger_level"], Value::Null);
    assert_eq!(second["alcool"], Value::Null);

    assert_eq!(report.rejected_identifiers(), 1);
    assert_eq!(report.duplicates_removed(), 1);
    assert_eq!(report.coverage.total_records, 2);

    let packaging = report.coverage.domain(ZiDomain::Packaging).unwrap();
    assert_eq!(packaging.observed, 1);
    assert_eq!(packaging.null, 1);
    assert_eq!(packaging.unmatched, 0);
    assert_eq!(packaging.category_hits.get("verre"), Some(&1));

    let origins = report.coverage.geo("origins").unwrap();
    assert_eq!(origins.by_continent.get("europe"), Some(&1));
    assert_eq!(origins.unresolved, 1);
    let manufacturing = report.coverage.geo("manufacturing_places").unwrap();
    assert_eq!(manufacturing.domestic, 1);
    assert_eq!(manufacturing.null, 1);

    assert_eq!(report.coverage.additives.observed, 1);
    assert_eq!(report.coverage.as_json()["total_records"], json!(2));
}

#[test]
fn extra_alias_resolves_previously_unknown_origins() {
    let config = ZiCleaningConfig::from_yaml_str(
        "geo:\n  extra_aliases:\n    - [lisboa, portugal]\n",
    )
    .unwrap();
    let pipeline = ZiFoodPipeline::builtin(config).unwrap();
    let (out, report) = pipeline.run(products()).unwrap();
    assert_eq!(out[1].payload["origin_country"], json!("portugal"));
    assert_eq!(out[1].payload["origin_continent"], json!("europe"));
    assert_eq!(report.coverage.geo("origins").unwrap().unresolved, 0);
}

#[test]
fn revised_dictionary_never_raises_unmatched_count() {
    let batch = vec![
        ZiRecord::new(None, json!({"code": "1", "packaging": "Emballage Eurofeuille"})),
        ZiRecord::new(None, json!({"code": "2", "packaging": "bocal"})),
    ];
    let registry = ZiDictionaryRegistry::builtin().unwrap();
    let before = ZiFoodPipeline::from_config(ZiCleaningConfig::default(), registry.clone())
        .unwrap()
        .run(batch.clone())
        .unwrap()
        .1;

    let revised = registry
        .domain(ZiDomain::Packaging)
        .revise("carton", &["eurofeuille"])
        .unwrap();
    let registry = registry.with_domain(ZiDomain::Packaging, revised);
    let after = ZiFoodPipeline::from_config(ZiCleaningConfig::default(), registry)
        .unwrap()
        .run(batch)
        .unwrap()
        .1;

    let unmatched = |report: &zi_food::ZiRunReport| {
        report.coverage.domain(ZiDomain::Packaging).unwrap().unmatched
    };
    assert!(unmatched(&after) <= unmatched(&before));
    assert_eq!(
        after.coverage.domain(ZiDomain::Packaging).unwrap().dictionary_version,
        before.coverage.domain(ZiDomain::Packaging).unwrap().dictionary_version + 1
    );
}

#[test]
fn missing_identifier_column_fails_the_run() {
    let pipeline = ZiFoodPipeline::builtin(ZiCleaningConfig::default()).unwrap();
    let err = pipeline
        .run(vec![ZiRecord::new(None, json!({"product_name": "x"}))])
        .unwrap_err();
    assert!(err.is_schema());
}

#[test]
fn yaml_steps_build_a_custom_pipeline() {
    let builder = ZiPipelineBuilder::with_defaults().unwrap();
    let pipeline = builder
        .build_from_yaml(
            r#"
steps:
  - operator: classify.multilabel
    config:
      domain: packaging
  - operator: count.ingredients
"#,
        )
        .unwrap();
    assert_eq!(pipeline.stage_names(), vec!["classify.multilabel", "count.ingredients"]);

    let out = pipeline
        .run(vec![ZiRecord::new(
            None,
            json!({"packaging": "Bouteille en verre", "ingredients_text": "eau"}),
        )])
        .unwrap();
    assert_eq!(out[0].payload["pack_verre"], json!(1));
    assert_eq!(out[0].payload["ingredients_n"], json!(1));

    assert!(builder.build_from_yaml("steps: 3").is_err());
    assert!(builder
        .build_from_yaml("- operator: does.not.exist")
        .is_err());
}

#[test]
fn invalid_configuration_is_rejected_before_running() {
    let mut config = ZiCleaningConfig::default();
    config.hierarchy.levels = 0;
    assert!(ZiFoodPipeline::builtin(config).is_err());
}

#[test]
fn canonical_run_keeps_the_informative_duplicate() {
    let pipeline = ZiFoodPipeline::builtin(ZiCleaningConfig::default()).unwrap();
    let (out, report) = pipeline
        .run(vec![
            ZiRecord::new(
                None,
                json!({"code": "1", "packaging": "nan", "origins": "nan", "labels_fr": "nan"}),
            ),
            ZiRecord::new(
                None,
                json!({"code": "1", "packaging": "Bocal en verre", "origins": "Espagne", "labels_fr": null}),
            ),
        ])
        .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].payload["pack_verre"], json!(1));
    assert_eq!(out[0].payload["origin_continent"], json!("europe"));
    assert_eq!(report.duplicates_removed(), 1);
}
