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

//! Label and certification categories for the `labels_fr` field.

use crate::errors::Result;

use super::ZiCategoryDictionary;

pub const DOMAIN: &str = "label";

pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("bio_europe", &["ecocert", "fr-bio", "agriculture biologique", "agriculture-biologique"]),
    ("label_qualité", &["aop", "igp", "stg", "aoc", "label rouge", "label-rouge"]),
    (
        "gestion_durable",
        &["fsc", "rainforest", "utz", "msc", "point vert", "point-vert", "eco emballage", "eco-emballage"],
    ),
    ("commerce_équitable", &["fairtrade", "havelaar"]),
    ("halal", &["halal"]),
    ("kascher", &["kascher", "kosher", "cacher"]),
    ("ogm", &["sans ogm", "sans-ogm", "non-ogm"]),
    ("végétariens", &["végétarien", "vegetar"]),
    ("végétaliens", &["vegan", "végétalien"]),
    ("sel_réduit", &["sel"]),
    ("sucres_réduits", &["sucre"]),
    ("femmes_enceintes", &["enceinte"]),
    ("catégories_personnes", &["personne"]),
];

pub fn dictionary() -> Result<ZiCategoryDictionary> {
    ZiCategoryDictionary::from_static(DOMAIN, CATEGORIES)
}
