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
use zi_food::operators::flags::{
    count_ingredients_factory, flag_alcohol_factory, flag_meat_factory, nutrient_clamp_factory,
};
use zi_food::{ZiDictionaryRegistry, ZiFlag, ZiIngredientCount, ZiMeatFlags, ZiOperator, ZiRecord};

fn registry() -> ZiDictionaryRegistry {
    ZiDictionaryRegistry::builtin().unwrap()
}

#[test]
fn meat_flags_follow_category_keywords() {
    assert_eq!(
        ZiMeatFlags::flags(Some("plats préparés,viandes"), Some("Hachis parmentier")),
        (ZiFlag::Yes, ZiFlag::No)
    );
    assert_eq!(
        ZiMeatFlags::flags(Some("charcuteries,jambons de porc"), None),
        (ZiFlag::Yes, ZiFlag::Yes)
    );
    assert_eq!(
        ZiMeatFlags::flags(Some("desserts"), None),
        (ZiFlag::No, ZiFlag::No)
    );
}

#[test]
fn gelatine_products_are_not_meat() {
    assert_eq!(
        ZiMeatFlags::flags(Some("viandes"), Some("Feuilles de gélatine")),
        (ZiFlag::No, ZiFlag::No)
    );
}

#[test]
fn meat_operator_treats_placeholders_as_null() {
    let op = flag_meat_factory(&json!({}), &registry()).unwrap();
    let out = op
        .apply(vec![
            ZiRecord::new(None, json!({"categories_fr": "Viandes", "product_name": "Steak"})),
            ZiRecord::new(None, json!({"categories_fr": "nan", "product_name": "Steak"})),
            ZiRecord::new(None, json!({"product_name": "Steak"})),
        ])
        .unwrap();
    assert_eq!(out[0].payload["viande"], json!(1));
    assert_eq!(out[0].payload["porc"], json!(0));
    for record in &out[1..] {
        assert_eq!(record.payload["viande"], Value::Null);
        assert_eq!(record.payload["porc"], Value::Null);
    }
}

#[test]
fn alcohol_flag_is_positive_volume() {
    let op = flag_alcohol_factory(&json!({"column": "has_alcohol"}), &registry()).unwrap();
    let out = op
        .apply(vec![
            ZiRecord::new(None, json!({"alcohol_100g": 4.5})),
            ZiRecord::new(None, json!({"alcohol_100g": 0})),
            ZiRecord::new(None, json!({})),
        ])
        .unwrap();
    assert_eq!(out[0].payload["has_alcohol"], json!(1));
    assert_eq!(out[1].payload["has_alcohol"], json!(0));
    assert_eq!(out[2].payload["has_alcohol"], Value::Null);
}

#[test]
fn ingredient_count_counts_comma_separated_pieces() {
    assert_eq!(ZiIngredientCount::count(Some("farine de blé")), Some(1));
    assert_eq!(ZiIngredientCount::count(Some("eau, sel,")), Some(3));

    let op = count_ingredients_factory(&json!({}), &registry()).unwrap();
    let out = op
        .apply(vec![
            ZiRecord::new(None, json!({"ingredients_text": "Sucre, huile de palme, noisettes"})),
            ZiRecord::new(None, json!({"ingredients_text": "missing"})),
        ])
        .unwrap();
    assert_eq!(out[0].payload["ingredients_n"], json!(3));
    assert_eq!(out[1].payload["ingredients_n"], Value::Null);
}

#[test]
fn nutrient_clamp_bounds_per_100g_values() {
    let op = nutrient_clamp_factory(&json!({}), &registry()).unwrap();
    let out = op
        .apply(vec![ZiRecord::new(
            None,
            json!({"sugars_100g": -3, "fat_100g": "250", "salt_100g": null, "energy_100g": 2000}),
        )])
        .unwrap();
    assert_eq!(out[0].payload["sugars_100g"], json!(0.0));
    assert_eq!(out[0].payload["fat_100g"], json!(100.0));
    assert_eq!(out[0].payload["salt_100g"], Value::Null);
    assert_eq!(out[0].payload["energy_100g"], json!(2000));

    let narrow = nutrient_clamp_factory(
        &json!({"columns": ["energy_100g"], "min": 0, "max": 1000}),
        &registry(),
    )
    .unwrap();
    let out = narrow.apply(out).unwrap();
    assert_eq!(out[0].payload["energy_100g"], json!(1000.0));
    assert!(nutrient_clamp_factory(&json!({"min": 10, "max": 1}), &registry()).is_err());
    assert!(nutrient_clamp_factory(&json!({"max": "100"}), &registry()).is_err());
    assert!(nutrient_clamp_factory(&json!({"min": true}), &registry()).is_err());
}
