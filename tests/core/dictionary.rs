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

use zi_food::dictionary::{allergen, label, packaging};
use zi_food::{
    ZiAliasTable, ZiCategoryDictionary, ZiContinent, ZiDictionaryRegistry, ZiDomain, ZiGeoTables,
    ZiSeverityTable,
};

#[test]
fn builtin_registry_serves_every_domain() {
    let registry = ZiDictionaryRegistry::builtin().unwrap();
    assert_eq!(registry.domain(ZiDomain::Packaging).len(), 10);
    assert_eq!(registry.domain(ZiDomain::Allergen).len(), 15);
    assert_eq!(registry.domain(ZiDomain::Label).len(), 13);
    assert_eq!(registry.domain(ZiDomain::Allergen).version(), 2);
    assert!(registry.severity().len() > 0);
    assert!(registry.geography().countries().len() > 150);
}

#[test]
fn keywords_may_repeat_across_categories() {
    let dict = packaging::dictionary().unwrap();
    let plastique = dict.get("plastique").unwrap();
    let metal = dict.get("metal").unwrap();
    assert!(plastique.keywords.contains(&"blister".to_string()));
    assert!(metal.keywords.contains(&"blister".to_string()));
}

#[test]
fn revisions_are_new_values() {
    let v1 = label::dictionary().unwrap();
    let v2 = v1.revise("bio_europe", &["Eurofeuille"]).unwrap();
    assert_eq!(v1.version(), 1);
    assert_eq!(v2.version(), 2);
    assert!(!v1.get("bio_europe").unwrap().matches("logo eurofeuille"));
    assert!(v2.get("bio_europe").unwrap().matches("logo eurofeuille"));

    let v3 = v2.with_category("nutriscore", &["nutriscore", "nutri-score"]).unwrap();
    assert_eq!(v3.version(), 3);
    assert_eq!(v3.len(), 14);
    assert!(v2.with_category("halal", &["halal"]).is_err());
}

#[test]
fn registry_swaps_one_domain_without_touching_others() {
    let registry = ZiDictionaryRegistry::builtin().unwrap();
    let initial = allergen::initial_dictionary().unwrap();
    let swapped = registry.with_domain(ZiDomain::Allergen, initial);
    assert_eq!(swapped.domain(ZiDomain::Allergen).version(), 1);
    assert_eq!(registry.domain(ZiDomain::Allergen).version(), 2);
    assert_eq!(
        swapped.domain(ZiDomain::Packaging).version(),
        registry.domain(ZiDomain::Packaging).version()
    );
}

#[test]
fn invalid_dictionaries_are_rejected() {
    assert!(ZiCategoryDictionary::from_static("d", &[("", &["x"])]).is_err());
    assert!(ZiCategoryDictionary::from_static("d", &[("a", &["  "])]).is_err());
    assert!(ZiCategoryDictionary::from_static("", &[("a", &["x"])]).is_err());
}

#[test]
fn domestic_country_is_in_no_bucket() {
    let tables = ZiGeoTables::builtin().unwrap();
    for continent in ZiContinent::ALL {
        assert!(!tables.bucket(continent).contains(&"france"));
    }
    let split = tables.with_border_bucket();
    for continent in ZiContinent::ALL {
        assert!(!split.bucket(continent).contains(&"france"));
    }
    assert_eq!(split.bucket(ZiContinent::Voisin).len(), 8);
}

#[test]
fn country_names_are_cleaned_and_continents_collapsed() {
    let tables = ZiGeoTables::builtin().unwrap();
    assert_eq!(tables.continent_of("birmanie"), Some(ZiContinent::Asie));
    assert_eq!(tables.continent_of("mexique"), Some(ZiContinent::Amerique));
    assert_eq!(tables.continent_of("brésil"), Some(ZiContinent::Amerique));
    assert!(tables.countries().iter().all(|c| !c.name.contains('(')));
}

#[test]
fn alias_table_keeps_first_definition() {
    let aliases = ZiAliasTable::new(vec![
        ("uk".into(), "royaume-uni".into()),
        ("UK".into(), "ukraine".into()),
    ])
    .unwrap();
    assert_eq!(aliases.len(), 1);
    assert_eq!(aliases.lookup("made in uk"), Some("royaume-uni"));
    assert!(ZiAliasTable::new(vec![("".into(), "x".into())]).is_err());
}

#[test]
fn severity_table_loads_from_delimited_text() {
    let table = ZiSeverityTable::from_csv_reader("Id_additif;Niveau_danger\nE250;2\ne330;0\n".as_bytes()).unwrap();
    assert_eq!(table.level("e250"), 2);
    assert_eq!(table.level("e330"), 0);
    assert!(table.contains("e330"));
    assert!(ZiSeverityTable::from_csv_reader("Id_additif;Niveau_danger\nE250;x\n".as_bytes()).is_err());
}
