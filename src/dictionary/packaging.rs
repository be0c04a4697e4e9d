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

//! Packaging material and packaging-practice categories.

use crate::errors::Result;

use super::ZiCategoryDictionary;

pub const DOMAIN: &str = "packaging";

/// Curated keyword sets, including frequent misspellings and foreign forms
/// observed in the `packaging` field.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "carton",
        &[
            "carto", "papie", "paper", "bri", "tetra", "cartón", "tétra", "doypack", "briquette",
            "boîte à œufs", "karton", "cellulose", "21", "caton", "papel", "cartão", "craton",
            "cartion", "doyapck", "wellpappe", "carrton", "boîte à oeufs", "cardboard",
        ],
    ),
    (
        "plastique",
        &[
            "plast", "film", "paquet", "tetra", "vide", "protect", "tétra", "pet", "doypack",
            "bac", "cellophane", "blister", "fraîcheur", "plásti", "sachet", "pp5", "polyprop",
            "пластиковый", "sélophane", "polyéthylène", "plstique", "pebd", "poliprop", "pvc",
            "ldpe", "polystyr", "poliestireno", "gaz", "souple", "céllophane", "plastqiue",
            "plastiqe", "aérosol", "pe-hd", "5-pp", "pp-5", "plastc", "pp 5", "5 pp", "pastic",
            "doyapck", "pete 1", "pp", "5 opp", "zellophan", "atmos", "kunststoff", "filet",
            "plasitque", "platique", "ficellle", "barquette", "hdpe", "pastique", "palstique",
            "plasique", "plaqtique",
        ],
    ),
    (
        "metal",
        &[
            "alu", "métal", "metal", "acier", "conserve", "tetra", "tétra", "tin", "fût", "can",
            "konserve", "blister", "fer", "40 fe", "aérosol", "torebki foliowej", "bidon", "bombe",
            "allu", "alimunium",
        ],
    ),
    (
        "verre",
        &[
            "verre", "bocal", "glas", "glass", "vidrio", "vetro", "glaß", "verrre", "vidro",
            "szklana",
        ],
    ),
    (
        "non_recyclable",
        &[
            "jeter", "sulfurisé", "cellophane", "blister", "cuisson", "ldpe", "non recyclable",
            "céllophane", "zellophan", "filet", "ficelle", "barquette",
        ],
    ),
    (
        "recyclable",
        &[
            "bois", "recycle", "recycla", "tetra", "tétra", "cellulose", "pp5", "polyprop",
            "pulpe", "compost", "biodégra", "cagette", "pehd", "polyéthylène", "wood", "pebd",
            "polietile", "pet", "aérosol", "pe-hd", "pp", "hdpe",
        ],
    ),
    (
        "pack_recycl",
        &[
            "recyclé", "consigne",
        ],
    ),
    (
        "pas_demballage",
        &[
            "sans conditionnement", "aucun", "vrac", "rien", "sans emballage",
        ],
    ),
    (
        "emball_intell",
        &[
            "consign", "sans suremballage", "pefc", "staitiegeld", "caution", "statiegeld",
            "réutilisable", "mehrwegpfand",
        ],
    ),
    (
        "suremballage",
        &[
            "indiv", "suremballage", "dose",
        ],
    ),
];

pub fn dictionary() -> Result<ZiCategoryDictionary> {
    ZiCategoryDictionary::from_static(DOMAIN, CATEGORIES)
}
