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

//! # Geography Resolution
//!
//! Collapses a free-text location into a canonical country and a continent
//! bucket. Resolution runs through ordered stages and stops at the first
//! that applies:
//!
//! 1. **Domestic**: the text mentions the domestic market; country is
//!    `france`, no continent
//! 2. **CountryMatched**: a canonical country name occurs in the text
//!    (first in table order)
//! 3. **AliasMatched**: an alias key occurs in the text (first in alias
//!    order)
//! 4. **Unresolved**: the text is kept and the continent is `inconnue`
//!
//! Null input stays null in both output columns.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dictionary::geography::{ZiAliasTable, ZiContinent, ZiGeoTables};
use crate::dictionary::ZiDictionaryRegistry;
use crate::errors::{Result, ZiError};
use crate::operator::{for_each_record, ZiBoxedOperator, ZiOperator};
use crate::operators::transform::ZiTextCell;
use crate::operators::{config_object, optional_bool, placeholders, required_str};
use crate::record::ZiRecordBatch;

/// Stage at which a location was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiGeoStage {
    Domestic,
    CountryMatched,
    AliasMatched,
    Unresolved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiLocation {
    pub country: String,
    /// `None` for the domestic market.
    pub continent: Option<ZiContinent>,
    pub stage: ZiGeoStage,
}

/// Pure resolver over shared, read-only tables.
#[derive(Clone, Debug)]
pub struct ZiGeoResolver {
    tables: Arc<ZiGeoTables>,
}

impl ZiGeoResolver {
    pub fn new(tables: Arc<ZiGeoTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ZiGeoTables {
        &self.tables
    }

    /// Resolves one location. Null or blank input yields `None`.
    pub fn resolve(&self, value: Option<&str>) -> Option<ZiLocation> {
        let normalized = value?.to_lowercase();
        let text = normalized.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.resolve_normalized(text))
    }

    fn resolve_normalized(&self, text: &str) -> ZiLocation {
        let domestic = self.tables.domestic();
        if text.contains(domestic) {
            return ZiLocation {
                country: domestic.to_string(),
                continent: None,
                stage: ZiGeoStage::Domestic,
            };
        }
        if let Some(country) = self.tables.find_country(text) {
            return ZiLocation {
                country: country.name.clone(),
                continent: Some(country.continent),
                stage: ZiGeoStage::CountryMatched,
            };
        }
        if let Some(country) = self.tables.aliases().lookup(text) {
            let continent = if country == domestic {
                None
            } else {
                Some(
                    self.tables
                        .continent_of(country)
                        .unwrap_or(ZiContinent::Inconnue),
                )
            };
            return ZiLocation {
                country: country.to_string(),
                continent,
                stage: ZiGeoStage::AliasMatched,
            };
        }
        ZiLocation {
            country: text.to_string(),
            continent: Some(ZiContinent::Inconnue),
            stage: ZiGeoStage::Unresolved,
        }
    }
}

/// Writes the resolved country and continent of one location column.
#[derive(Debug)]
pub struct ZiGeoResolve {
    source: String,
    country_column: String,
    continent_column: String,
    placeholders: Vec<String>,
    resolver: ZiGeoResolver,
}

impl ZiGeoResolve {
    pub fn new(
        source: impl Into<String>,
        country_column: impl Into<String>,
        continent_column: impl Into<String>,
        placeholders: Vec<String>,
        resolver: ZiGeoResolver,
    ) -> Self {
        Self {
            source: source.into(),
            country_column: country_column.into(),
            continent_column: continent_column.into(),
            placeholders,
            resolver,
        }
    }

    pub fn continent_column(&self) -> &str {
        &self.continent_column
    }
}

impl ZiOperator for ZiGeoResolve {
    fn name(&self) -> &'static str {
        "geo.resolve"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            let cell = ZiTextCell::read(record, &self.source, &self.placeholders);
            let location = self.resolver.resolve(cell.as_text());
            let (country, continent) = match location {
                Some(location) => (
                    Value::String(location.country),
                    location
                        .continent
                        .map(|c| Value::String(c.as_str().to_string()))
                        .unwrap_or(Value::Null),
                ),
                None => (Value::Null, Value::Null),
            };
            record.set_field(self.country_column.as_str(), country);
            record.set_field(self.continent_column.as_str(), continent);
        });
        Ok(batch)
    }
}

/// Builds a resolver stage from
/// `{source, country_column, continent_column, border_bucket?, aliases?, placeholders?}`.
///
/// `aliases` is an array of `[key, country]` pairs appended after the
/// registry aliases.
pub fn geo_resolve_factory(config: &Value, registry: &ZiDictionaryRegistry) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "geo.resolve")?;
    let source = required_str(obj, "source", "geo.resolve")?;
    let country_column = required_str(obj, "country_column", "geo.resolve")?;
    let continent_column = required_str(obj, "continent_column", "geo.resolve")?;

    let mut tables = (*registry.geography()).clone();
    if let Some(extra) = obj.get("aliases").filter(|v| !v.is_null()) {
        let pairs = parse_alias_pairs(extra)?;
        let borrowed: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let aliases: ZiAliasTable = tables.aliases().extended(&borrowed)?;
        tables = tables.with_aliases(aliases);
    }
    if optional_bool(obj, "border_bucket", "geo.resolve")?.unwrap_or(false) {
        tables = tables.with_border_bucket();
    }

    Ok(Box::new(ZiGeoResolve::new(
        source,
        country_column,
        continent_column,
        placeholders(obj, "geo.resolve")?,
        ZiGeoResolver::new(Arc::new(tables)),
    )))
}

fn parse_alias_pairs(value: &Value) -> Result<Vec<(String, String)>> {
    let items = value
        .as_array()
        .ok_or_else(|| ZiError::validation("geo.resolve 'aliases' must be an array"))?;
    items
        .iter()
        .map(|item| match item.as_array().map(Vec::as_slice) {
            Some([Value::String(key), Value::String(country)]) => Ok((key.clone(), country.clone())),
            _ => Err(ZiError::validation(
                "geo.resolve aliases must be [key, country] string pairs",
            )),
        })
        .collect()
}
