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
use zi_food::operators::geo::geo_resolve_factory;
use zi_food::{
    ZiContinent, ZiDictionaryRegistry, ZiGeoResolver, ZiGeoStage, ZiGeoTables, ZiOperator, ZiRecord,
};

fn resolver() -> ZiGeoResolver {
    ZiGeoResolver::new(Arc::new(ZiGeoTables::builtin().unwrap()))
}

fn origin_step(extra: Value) -> Value {
    let mut config = json!({
        "source": "origins",
        "country_column": "origin_country",
        "continent_column": "origin_continent"
    });
    if let (Some(base), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    config
}

#[test]
fn spain_is_european() {
    let location = resolver().resolve(Some("espagne")).unwrap();
    assert_eq!(location.country, "espagne");
    assert_eq!(location.continent, Some(ZiContinent::Europe));
}

#[test]
fn anything_mentioning_france_collapses_to_the_domestic_market() {
    for text in ["made in france", "Chine, France", "FRANCE"] {
        let location = resolver().resolve(Some(text)).unwrap();
        assert_eq!(location.country, "france");
        assert_eq!(location.continent, None);
        assert_eq!(location.stage, ZiGeoStage::Domestic);
    }
}

#[test]
fn aliases_cover_spellings_cities_and_regions() {
    let r = resolver();
    let amsterdam = r.resolve(Some("Amsterdam")).unwrap();
    assert_eq!(amsterdam.country, "pays-bas");
    assert_eq!(amsterdam.continent, Some(ZiContinent::Europe));
    assert_eq!(amsterdam.stage, ZiGeoStage::AliasMatched);

    let usa = r.resolve(Some("USA")).unwrap();
    assert_eq!(usa.country, "états-unis");
    assert_eq!(usa.continent, Some(ZiContinent::Amerique));

    let region = r.resolve(Some("Bretagne")).unwrap();
    assert_eq!(region.country, "france");
    assert_eq!(region.continent, None);
}

#[test]
fn unresolved_values_pass_through_as_unknown() {
    let location = resolver().resolve(Some("  Lisboa ")).unwrap();
    assert_eq!(location.country, "lisboa");
    assert_eq!(location.continent, Some(ZiContinent::Inconnue));
    assert_eq!(location.stage, ZiGeoStage::Unresolved);
    assert_eq!(resolver().resolve(Some("   ")), None);
}

#[test]
fn longer_country_names_win_over_contained_ones() {
    let r = resolver();
    assert_eq!(r.resolve(Some("niger")).unwrap().country, "niger");
    assert_eq!(r.resolve(Some("nigeria")).unwrap().country, "nigeria");
    assert_eq!(r.resolve(Some("guinée-bissau")).unwrap().country, "guinée-bissau");
}

#[test]
fn resolution_is_deterministic() {
    let r = resolver();
    for text in ["espagne", "Italy", "lisboa", "made in france", "amsterdam"] {
        assert_eq!(r.resolve(Some(text)), r.resolve(Some(text)));
    }
}

#[test]
fn operator_honours_border_bucket_and_extra_aliases() {
    let registry = ZiDictionaryRegistry::builtin().unwrap();
    let op = geo_resolve_factory(
        &origin_step(json!({"border_bucket": true, "aliases": [["lisboa", "portugal"]]})),
        &registry,
    )
    .unwrap();
    let out = op
        .apply(vec![
            ZiRecord::new(None, json!({"origins": "Espagne"})),
            ZiRecord::new(None, json!({"origins": "Lisboa"})),
            ZiRecord::new(None, json!({"origins": "missing"})),
        ])
        .unwrap();
    assert_eq!(out[0].payload["origin_continent"], json!("voisin"));
    assert_eq!(out[1].payload["origin_country"], json!("portugal"));
    assert_eq!(out[1].payload["origin_continent"], json!("europe"));
    assert_eq!(out[2].payload["origin_country"], Value::Null);
    assert_eq!(out[2].payload["origin_continent"], Value::Null);
    assert_eq!(registry.geography().continent_of("espagne"), Some(ZiContinent::Europe));
}

#[test]
fn factory_requires_column_names() {
    let registry = ZiDictionaryRegistry::builtin().unwrap();
    assert!(geo_resolve_factory(&json!({"source": "origins"}), &registry).is_err());
    assert!(geo_resolve_factory(&origin_step(json!({"aliases": [["x"]]})), &registry).is_err());
}
