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

//! Allergen families observed in the combined traces/allergens text.
//!
//! The first curated release spelled celery only with accent variants
//! (`céléri`, `celerie`, ...) and missed the plain `céleri` form; the
//! bundled dictionary is the revised release that adds it.

use crate::errors::Result;

use super::ZiCategoryDictionary;

pub const DOMAIN: &str = "allergen";

pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "gluten",
        &[
            "gluten", "glurent", "glutn", "glúten",
        ],
    ),
    (
        "oeuf",
        &[
            "hühnerei-trockeneiweiß", "uovo", "hühnervolleipulver", "hühnerei", "eigelb", "huevo",
            "oeuf", "œufs", "egg", "eggs",
        ],
    ),
    (
        "fruits_coque",
        &[
            "coque", "pistache", "amande", "noisette", "noix", "guscio", "nusse", "pistachio",
            "haselnuss", "secos", "nut", "cashewnusse", "pekannusse", "amendoa", "casca", "cajou",
            "pécan", "pin", "pignon", "mandeln", "pecan", "haselnüsse", "amandons",
            "haselnussmasse", "noisettes", "haselnuskern", "haselnussmark", "cashewkerne",
            "almendras", "almonds", "hazelnut", "avelãs", "cashews", "amendes", "nuts",
        ],
    ),
    (
        "lupin",
        &[
            "lupin", "lupino",
        ],
    ),
    (
        "lait",
        &[
            "lait", "lactiques", "lactosérum", "milk", "lactose", "creme", "beurre", "laitier",
            "laiit", "lactoserum", "comté", "milch", "vollmilchpulver", "butterreinfett",
            "magermilchpulver", "fromage", "emmental", "lctosa", "laitière", "roquefort",
            "pecorino", "parmigiano", "milchzucker", "milcheiweißhydrolysat", "gouda", "edam",
            "actosérum", "mozzarella", "raclette", "ricotta", "tome", "cheddar", "milchschokolade",
            "crème", "molkenpulver", "parmesan", "maroilles", "sahnepulver", "butter",
            "magermilchjoghurtpulver", "leite", "iactose", "beaufort", "yaourt", "magermilch",
            "yaourts", "édam", "présure", "mascarpone", "latte", "feta", "mimolette", "laktose",
            "iait", "milchserum", "reblochon", "eiweißpulver", "milcheiweiß",
            "magermilchkonzentrat", "milchserumkonzentrat", "whey", "cantal", "leche", "lactosa",
            "mantequilla", "kuhmilch", "weichkäse", "süßmlkenpulver", "molke", "magermllchpulver",
            "gorgonzola", "laitiers", "iactosèrum", "emmenthal", "cream", "lactate", "beure",
            "magemilchpulver", "bleu", "kondensmagermilch", "caséinate", "écrémé", "schlagsahne",
            "milcheiweißpulver", "vollfett-frischkäse", "ziegenmilch", "tomme", "laitiére",
            "laitiéres", "ialt", "lactique", "iactoserum", "ferments", "ferment", "lacto",
            "caséinates",
        ],
    ),
    (
        "sulfites",
        &[
            "schwefeldioxid", "sulfates", "sulfito", "disulfite", "sulfites", "sulfureux",
        ],
    ),
    (
        "poissons",
        &[
            "poisson", "fish", "sardines", "thon", "crevettes", "fisch", "pesce", "cabillaud",
            "saumon", "maquereau", "colin", "brochet", "écrevisses", "limande", "poissons",
            "truite", "lieu", "anchois", "homard", "maquereaux", "langoustines", "morue",
            "esturgeon", "mer", "merlu", "gambas", "merlan", "bar", "rouget", "barbet",
            "langoustine", "harengs", "hareng", "sardine",
        ],
    ),
    (
        "mollusques",
        &[
            "mollusques", "molluschi", "jacques", "pulpe", "poulpe", "encornet", "calamars",
            "calmars", "seiche", "encornets", "seiches",
        ],
    ),
    (
        "crustaces",
        &[
            "crustacés,", "crustaces", "surimi", "crabe", "crustacei", "curstaces", "crustacee",
            "crustacees", "drustace", "huitre", "clams", "coquillages", "huître", "tourteau",
            "crustace", "moule", "bulots",
        ],
    ),
    (
        "soja",
        &[
            "soybeans", "lécithine", "lecithin", "sojalecithin", "sojakerne", "sojalecithine",
            "soia", "lécithine de soja", "sojasoßenpulver", "sojabohnen", "tofu", "mungo", "soya",
            "soy", "soja", "sija",
        ],
    ),
    (
        "cereales",
        &[
            "blé", "wheat", "gluten", "orge", "cereales", "epautre", "cereals", "glurent",
            "avoine", "seigle", "épeautre", "son", "glutn", "barley", "gerstenmalzextrakt",
            "froment", "weizenmehl", "weizenstärke", "weizen-reis-extrudat", "weizenvollkornmehl",
            "segale", "orzo", "avena", "weizeneiweiß", "frumento", "vollkornhaferflocken",
            "volkornweizenflocken", "vollkorngerstenflocken", "cebada", "gerste",
            "weichweizenmehl", "hartweizengrieß", "roggenmehl", "trigo", "gerstenflocken",
            "weizen", "gerstenmalz", "weizenflocken", "couscous", "gerstenmalzmehl",
            "weizenmalzmehl", "blés", "boulghour", "gerstenvollkornmehl", "hafervollkornmehl",
            "dinkelvollkornmehl", "roggenvollkornmehl", "hafervollkornflocken",
            "weizenvollkornflocken", "weizenkleber", "millet", "siegle", "malté", "weizengluten",
            "amidon", "glúten",
        ],
    ),
    (
        "arachides",
        &[
            "arachide", "arachides", "cacahuètes", "cacahetes", "cacahouètes", "erdnüsse",
            "cacahuète", "peanuts",
        ],
    ),
    (
        "celeri",
        &[
            "céléri", "celeria", "czeleri", "selleri", "celerie", "céleris", "țelină",
        ],
    ),
    (
        "sesame",
        &[
            "sesame", "sésame", "susam", "cesame", "sesamo", "sesamöl",
        ],
    ),
    (
        "moutarde",
        &[
            "moutarde", "mustard", "mouarde", "moutrde", "senf", "moutard",
        ],
    ),
];

/// Keywords added by the first revision.
pub const CELERY_REVISION: &[&str] = &["céleri", "celeri"];

/// First curated release, kept for coverage comparisons.
pub fn initial_dictionary() -> Result<ZiCategoryDictionary> {
    ZiCategoryDictionary::from_static(DOMAIN, CATEGORIES)
}

pub fn dictionary() -> Result<ZiCategoryDictionary> {
    initial_dictionary()?.revise("celeri", CELERY_REVISION)
}
