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

//! Derived flags and numeric transforms: meat/pork, alcohol presence,
//! ingredient count and per-100g nutrient clamping.

use serde_json::{json, Value};

use crate::dictionary::ZiDictionaryRegistry;
use crate::errors::{Result, ZiError};
use crate::operator::{for_each_record, ZiBoxedOperator, ZiOperator};
use crate::operators::classify::ZiFlag;
use crate::operators::transform::ZiTextCell;
use crate::operators::{config_object, optional_f64, optional_str, placeholders, string_list};
use crate::record::{ZiRecord, ZiRecordBatch};

/// Per-100g columns clipped to `[0, 100]` by default.
pub const DEFAULT_CLAMP_COLUMNS: &[&str] = &[
    "fat_100g",
    "saturated-fat_100g",
    "carbohydrates_100g",
    "sugars_100g",
    "fiber_100g",
    "proteins_100g",
    "salt_100g",
    "sodium_100g",
];

pub const CLAMP_MIN: f64 = 0.0;
pub const CLAMP_MAX: f64 = 100.0;

/// Reads a numeric cell; numeric strings are accepted.
pub fn numeric_value(record: &ZiRecord, column: &str) -> Option<f64> {
    match record.field(column)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// `viande`/`porc` flags from the category text.
///
/// Pork implies meat; a product name mentioning gelatine clears the meat
/// flag. Both flags are null when the category text is null.
#[derive(Debug)]
pub struct ZiMeatFlags {
    source: String,
    product_name: String,
    meat_column: String,
    pork_column: String,
    placeholders: Vec<String>,
}

impl ZiMeatFlags {
    pub fn new(
        source: impl Into<String>,
        product_name: impl Into<String>,
        meat_column: impl Into<String>,
        pork_column: impl Into<String>,
        placeholders: Vec<String>,
    ) -> Self {
        Self {
            source: source.into(),
            product_name: product_name.into(),
            meat_column: meat_column.into(),
            pork_column: pork_column.into(),
            placeholders,
        }
    }

    /// Returns `(meat, pork)`.
    pub fn flags(categories: Option<&str>, product_name: Option<&str>) -> (ZiFlag, ZiFlag) {
        let Some(categories) = categories else {
            return (ZiFlag::Null, ZiFlag::Null);
        };
        let categories = categories.to_lowercase();
        let pork = categories.contains("porc");
        let mut meat = categories.contains("viande") || pork;
        if product_name.is_some_and(|name| name.to_lowercase().contains("gélatine")) {
            meat = false;
        }
        (ZiFlag::from_bool(meat), ZiFlag::from_bool(pork))
    }
}

impl ZiOperator for ZiMeatFlags {
    fn name(&self) -> &'static str {
        "flag.meat"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            let categories = ZiTextCell::read(record, &self.source, &self.placeholders);
            let name = ZiTextCell::read(record, &self.product_name, &self.placeholders);
            let (meat, pork) = Self::flags(categories.as_text(), name.as_text());
            record.set_field(self.meat_column.as_str(), meat.to_value());
            record.set_field(self.pork_column.as_str(), pork.to_value());
        });
        Ok(batch)
    }
}

pub fn flag_meat_factory(config: &Value, _registry: &ZiDictionaryRegistry) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "flag.meat")?;
    let source = optional_str(obj, "source", "flag.meat")?.unwrap_or_else(|| "categories_fr".into());
    let product_name =
        optional_str(obj, "product_name", "flag.meat")?.unwrap_or_else(|| "product_name".into());
    let meat_column = optional_str(obj, "meat_column", "flag.meat")?.unwrap_or_else(|| "viande".into());
    let pork_column = optional_str(obj, "pork_column", "flag.meat")?.unwrap_or_else(|| "porc".into());
    Ok(Box::new(ZiMeatFlags::new(
        source,
        product_name,
        meat_column,
        pork_column,
        placeholders(obj, "flag.meat")?,
    )))
}

/// `1` when alcohol per 100g is positive, `0` when it is a number `<= 0`,
/// null when absent or not numeric.
#[derive(Debug)]
pub struct ZiAlcoholFlag {
    source: String,
    column: String,
}

impl ZiAlcoholFlag {
    pub fn new(source: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            column: column.into(),
        }
    }
}

impl ZiOperator for ZiAlcoholFlag {
    fn name(&self) -> &'static str {
        "flag.alcohol"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            let flag = match numeric_value(record, &self.source) {
                Some(value) => ZiFlag::from_bool(value > 0.0),
                None => ZiFlag::Null,
            };
            record.set_field(self.column.as_str(), flag.to_value());
        });
        Ok(batch)
    }
}

pub fn flag_alcohol_factory(config: &Value, _registry: &ZiDictionaryRegistry) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "flag.alcohol")?;
    let source =
        optional_str(obj, "source", "flag.alcohol")?.unwrap_or_else(|| "alcohol_100g".into());
    let column = optional_str(obj, "column", "flag.alcohol")?.unwrap_or_else(|| "alcool".into());
    Ok(Box::new(ZiAlcoholFlag::new(source, column)))
}

/// Number of comma-separated entries of the ingredient text.
#[derive(Debug)]
pub struct ZiIngredientCount {
    source: String,
    column: String,
    placeholders: Vec<String>,
}

impl ZiIngredientCount {
    pub fn new(source: impl Into<String>, column: impl Into<String>, placeholders: Vec<String>) -> Self {
        Self {
            source: source.into(),
            column: column.into(),
            placeholders,
        }
    }

    pub fn count(text: Option<&str>) -> Option<usize> {
        text.map(|t| t.split(',').count())
    }
}

impl ZiOperator for ZiIngredientCount {
    fn name(&self) -> &'static str {
        "count.ingredients"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            let cell = ZiTextCell::read(record, &self.source, &self.placeholders);
            let value = Self::count(cell.as_text()).map(|n| json!(n)).unwrap_or(Value::Null);
            record.set_field(self.column.as_str(), value);
        });
        Ok(batch)
    }
}

pub fn count_ingredients_factory(
    config: &Value,
    _registry: &ZiDictionaryRegistry,
) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "count.ingredients")?;
    let source = optional_str(obj, "source", "count.ingredients")?
        .unwrap_or_else(|| "ingredients_text".into());
    let column =
        optional_str(obj, "column", "count.ingredients")?.unwrap_or_else(|| "ingredients_n".into());
    Ok(Box::new(ZiIngredientCount::new(
        source,
        column,
        placeholders(obj, "count.ingredients")?,
    )))
}

/// Clips numeric columns into `[min, max]`; nulls and non-numeric cells are
/// left as they are.
#[derive(Debug)]
pub struct ZiNutrientClamp {
    columns: Vec<String>,
    min: f64,
    max: f64,
}

impl ZiNutrientClamp {
    pub fn new(columns: Vec<String>, min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(ZiError::validation(format!(
                "nutrient.clamp bounds [{min}, {max}] are invalid"
            )));
        }
        Ok(Self { columns, min, max })
    }
}

impl ZiOperator for ZiNutrientClamp {
    fn name(&self) -> &'static str {
        "nutrient.clamp"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            for column in &self.columns {
                let Some(value) = numeric_value(record, column) else {
                    continue;
                };
                if value < self.min || value > self.max {
                    record.set_field(column.as_str(), json!(value.clamp(self.min, self.max)));
                }
            }
        });
        Ok(batch)
    }
}

/// `{columns?, min?, max?}`.
pub fn nutrient_clamp_factory(config: &Value, _registry: &ZiDictionaryRegistry) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "nutrient.clamp")?;
    let columns = string_list(obj, "columns", "nutrient.clamp")?
        .unwrap_or_else(|| DEFAULT_CLAMP_COLUMNS.iter().map(|c| c.to_string()).collect());
    let min = optional_f64(obj, "min", "nutrient.clamp")?.unwrap_or(CLAMP_MIN);
    let max = optional_f64(obj, "max", "nutrient.clamp")?.unwrap_or(CLAMP_MAX);
    Ok(Box::new(ZiNutrientClamp::new(columns, min, max)?))
}
