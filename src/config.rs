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

//! # Cleaning Configuration
//!
//! Names every column the engine reads or writes, grouped by domain, so a
//! pipeline never depends on column positions. Every field has a default
//! matching the Open Food Facts French export; a YAML or JSON document only
//! needs to list what differs.
//!
//! ```yaml
//! identifier: code
//! fields:
//!   origin: origins
//! hierarchy:
//!   levels: 4
//! geo:
//!   border_bucket: true
//! ```

use serde::{Deserialize, Serialize};

use crate::dictionary::ZiDomain;
use crate::errors::{Result, ZiError};
use crate::operators::classify::{default_prefix, default_sources};
use crate::operators::flags::{CLAMP_MAX, CLAMP_MIN, DEFAULT_CLAMP_COLUMNS};
use crate::operators::hierarchy::{DEFAULT_LEVELS, DEFAULT_LEVEL_PREFIX, DEFAULT_STOPLIST};
use crate::operators::transform::default_placeholders;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Source columns per domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiFieldGroups {
    pub packaging: Vec<String>,
    /// Joined with `,` into one allergen source.
    pub allergen: Vec<String>,
    pub label: Vec<String>,
    pub categories: String,
    pub origin: String,
    pub manufacturing_place: String,
    pub additives: String,
    pub product_name: String,
    pub ingredients: String,
    pub alcohol: String,
}

impl Default for ZiFieldGroups {
    fn default() -> Self {
        Self {
            packaging: default_sources(ZiDomain::Packaging),
            allergen: default_sources(ZiDomain::Allergen),
            label: default_sources(ZiDomain::Label),
            categories: "categories_fr".into(),
            origin: "origins".into(),
            manufacturing_place: "manufacturing_places".into(),
            additives: "additives_fr".into(),
            product_name: "product_name".into(),
            ingredients: "ingredients_text".into(),
            alcohol: "alcohol_100g".into(),
        }
    }
}

impl ZiFieldGroups {
    pub fn domain_sources(&self, domain: ZiDomain) -> &[String] {
        match domain {
            ZiDomain::Packaging => &self.packaging,
            ZiDomain::Allergen => &self.allergen,
            ZiDomain::Label => &self.label,
        }
    }

    /// Every free-text column, deduplicated, in declaration order.
    pub fn text_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        let singles = [
            &self.categories,
            &self.origin,
            &self.manufacturing_place,
            &self.additives,
            &self.product_name,
            &self.ingredients,
        ];
        for column in self
            .packaging
            .iter()
            .chain(&self.allergen)
            .chain(&self.label)
            .chain(singles)
        {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        columns
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiHierarchyConfig {
    pub levels: usize,
    pub stoplist: Vec<String>,
    pub prefix: String,
}

impl Default for ZiHierarchyConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            stoplist: strings(DEFAULT_STOPLIST),
            prefix: DEFAULT_LEVEL_PREFIX.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiGeoConfig {
    /// Move bordering countries from `europe` into `voisin`.
    pub border_bucket: bool,
    /// `[key, country]` pairs appended after the bundled aliases.
    pub extra_aliases: Vec<(String, String)>,
}

/// Names of derived columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiOutputColumns {
    pub packaging_prefix: String,
    pub allergen_prefix: String,
    pub label_prefix: String,
    pub origin_country: String,
    pub origin_continent: String,
    pub manufacturing_country: String,
    pub manufacturing_continent: String,
    pub meat: String,
    pub pork: String,
    pub additive_level: String,
    pub additive_codes: String,
    pub alcohol: String,
    pub ingredient_count: String,
}

impl Default for ZiOutputColumns {
    fn default() -> Self {
        Self {
            packaging_prefix: default_prefix(ZiDomain::Packaging).into(),
            allergen_prefix: default_prefix(ZiDomain::Allergen).into(),
            label_prefix: default_prefix(ZiDomain::Label).into(),
            origin_country: "origin_country".into(),
            origin_continent: "origin_continent".into(),
            manufacturing_country: "manufacturing_country".into(),
            manufacturing_continent: "manufacturing_continent".into(),
            meat: "viande".into(),
            pork: "porc".into(),
            additive_level: "additive_danger_level".into(),
            additive_codes: "additive_codes".into(),
            alcohol: "alcool".into(),
            ingredient_count: "ingredients_n".into(),
        }
    }
}

impl ZiOutputColumns {
    pub fn domain_prefix(&self, domain: ZiDomain) -> &str {
        match domain {
            ZiDomain::Packaging => &self.packaging_prefix,
            ZiDomain::Allergen => &self.allergen_prefix,
            ZiDomain::Label => &self.label_prefix,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiClampConfig {
    pub columns: Vec<String>,
    pub min: f64,
    pub max: f64,
}

impl Default for ZiClampConfig {
    fn default() -> Self {
        Self {
            columns: strings(DEFAULT_CLAMP_COLUMNS),
            min: CLAMP_MIN,
            max: CLAMP_MAX,
        }
    }
}

/// Complete configuration of one cleaning run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiCleaningConfig {
    pub identifier: String,
    pub fields: ZiFieldGroups,
    pub placeholders: Vec<String>,
    pub hierarchy: ZiHierarchyConfig,
    pub geo: ZiGeoConfig,
    pub outputs: ZiOutputColumns,
    pub clamp: ZiClampConfig,
}

impl Default for ZiCleaningConfig {
    fn default() -> Self {
        Self {
            identifier: "code".into(),
            fields: ZiFieldGroups::default(),
            placeholders: default_placeholders(),
            hierarchy: ZiHierarchyConfig::default(),
            geo: ZiGeoConfig::default(),
            outputs: ZiOutputColumns::default(),
            clamp: ZiClampConfig::default(),
        }
    }
}

impl ZiCleaningConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(ZiError::validation("identifier column may not be empty"));
        }
        if self.hierarchy.levels == 0 {
            return Err(ZiError::validation("hierarchy.levels must be at least 1"));
        }
        for domain in ZiDomain::ALL {
            let sources = self.fields.domain_sources(domain);
            if sources.is_empty() || sources.iter().any(|s| s.trim().is_empty()) {
                return Err(ZiError::validation(format!(
                    "fields.{domain} must list at least one non-empty column"
                )));
            }
        }
        let singles = [
            ("fields.categories", &self.fields.categories),
            ("fields.origin", &self.fields.origin),
            ("fields.manufacturing_place", &self.fields.manufacturing_place),
            ("fields.additives", &self.fields.additives),
            ("fields.product_name", &self.fields.product_name),
            ("fields.ingredients", &self.fields.ingredients),
            ("fields.alcohol", &self.fields.alcohol),
        ];
        for (name, column) in singles {
            if column.trim().is_empty() {
                return Err(ZiError::validation(format!("{name} may not be empty")));
            }
        }
        if !(self.clamp.min.is_finite() && self.clamp.max.is_finite()) || self.clamp.min > self.clamp.max {
            return Err(ZiError::validation(format!(
                "clamp bounds [{}, {}] are invalid",
                self.clamp.min, self.clamp.max
            )));
        }
        Ok(())
    }
}
