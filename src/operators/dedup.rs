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

use std::collections::HashMap;

use serde_json::Value;

use crate::dictionary::ZiDictionaryRegistry;
use crate::errors::{Result, ZiError};
use crate::operator::{ZiBoxedOperator, ZiOperator};
use crate::operators::{config_object, optional_str, placeholders};
use crate::record::{batch_columns, ZiRecord, ZiRecordBatch};

pub const DEFAULT_IDENTIFIER: &str = "code";

/// Copies the identifier column into `ZiRecord::id` and drops records
/// without one.
///
/// A non-empty batch in which no record carries the column at all is a
/// schema error: such a table cannot be deduplicated or joined.
#[derive(Debug)]
pub struct ZiIdentifierRequire {
    column: String,
}

impl ZiIdentifierRequire {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

fn identifier_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number_text(number)),
        _ => None,
    }
}

impl ZiOperator for ZiIdentifierRequire {
    fn name(&self) -> &'static str {
        "identifier.require"
    }

    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        if !batch.is_empty() && batch.iter().all(|r| r.payload.get(&self.column).is_none()) {
            return Err(ZiError::schema(format!(
                "identifier column '{}' is missing from every record",
                self.column
            )));
        }
        let total = batch.len();
        let out: ZiRecordBatch = batch
            .into_iter()
            .filter_map(|mut record| {
                let id = identifier_text(record.field(&self.column))?;
                record.id = Some(id);
                Some(record)
            })
            .collect();
        let rejected = total - out.len();
        if rejected > 0 {
            log::warn!(
                "identifier.require rejected {rejected} of {total} records without '{}'",
                self.column
            );
        }
        Ok(out)
    }
}

/// Integral floats lose their fractional part so `3017620422003.0` and
/// `"3017620422003"` share one key.
fn number_text(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value)
            if number.is_f64() && value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 =>
        {
            format!("{value:.0}")
        }
        _ => number.to_string(),
    }
}

pub fn identifier_require_factory(
    config: &Value,
    _registry: &ZiDictionaryRegistry,
) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "identifier.require")?;
    let column = optional_str(obj, "column", "identifier.require")?
        .unwrap_or_else(|| DEFAULT_IDENTIFIER.to_string());
    if column.trim().is_empty() {
        return Err(ZiError::validation("identifier.require 'column' may not be empty"));
    }
    Ok(Box::new(ZiIdentifierRequire::new(column)))
}

/// Keeps one record per key: the one with the lowest missing ratio.
///
/// The ratio is taken over every column seen in the batch; placeholder text
/// counts as missing, like a null cell. Ties keep the
/// earliest record, and survivors stay in input order. Records without a
/// key are passed through untouched.
pub fn dedupe_by_completeness(
    batch: ZiRecordBatch,
    key: Option<&str>,
    placeholders: &[String],
) -> ZiRecordBatch {
    let columns = batch_columns(&batch);
    let keys: Vec<Option<String>> = batch.iter().map(|r| record_key(r, key)).collect();

    let mut best: HashMap<&str, (usize, f64)> = HashMap::new();
    for (index, (record, record_key)) in batch.iter().zip(&keys).enumerate() {
        let Some(record_key) = record_key else {
            continue;
        };
        let ratio = record.missing_ratio_with(&columns, placeholders);
        best.entry(record_key.as_str())
            .and_modify(|slot| {
                if ratio < slot.1 {
                    *slot = (index, ratio);
                }
            })
            .or_insert((index, ratio));
    }

    let mut keep = vec![false; batch.len()];
    for (index, record_key) in keys.iter().enumerate() {
        if record_key.is_none() {
            keep[index] = true;
        }
    }
    for (index, _) in best.values() {
        keep[*index] = true;
    }

    batch
        .into_iter()
        .zip(keep)
        .filter_map(|(record, kept)| kept.then_some(record))
        .collect()
}

fn record_key(record: &ZiRecord, key: Option<&str>) -> Option<String> {
    match key {
        Some(column) => identifier_text(record.field(column)),
        None => record.id.clone(),
    }
}

/// Completeness deduplication keyed on `ZiRecord::id` or on a column.
#[derive(Debug)]
pub struct ZiDedupCompleteness {
    key: Option<String>,
    placeholders: Vec<String>,
}

impl ZiDedupCompleteness {
    pub fn new(key: Option<String>, placeholders: Vec<String>) -> Self {
        Self { key, placeholders }
    }
}

impl ZiOperator for ZiDedupCompleteness {
    fn name(&self) -> &'static str {
        "dedup.completeness"
    }

    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        let keyless = batch
            .iter()
            .filter(|r| record_key(r, self.key.as_deref()).is_none())
            .count();
        if keyless > 0 {
            log::warn!("dedup.completeness passed through {keyless} records without a key");
        }
        let total = batch.len();
        let out = dedupe_by_completeness(batch, self.key.as_deref(), &self.placeholders);
        log::info!(
            "dedup.completeness removed {} duplicates, {} records remain",
            total - out.len(),
            out.len()
        );
        Ok(out)
    }
}

/// `{key?, placeholders?}`: `key` is a payload column and defaults to the
/// record identifier.
pub fn dedup_completeness_factory(
    config: &Value,
    _registry: &ZiDictionaryRegistry,
) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "dedup.completeness")?;
    let key = optional_str(obj, "key", "dedup.completeness")?;
    Ok(Box::new(ZiDedupCompleteness::new(
        key,
        placeholders(obj, "dedup.completeness")?,
    )))
}
