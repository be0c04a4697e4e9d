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

//! Additive risk scoring.
//!
//! An additive cell lists entries such as
//! `"e250 - nitrite de sodium, e501 - carbonates de potassium"`. The code is
//! the part of each entry before the first `" -"`; the record's risk level
//! is the highest severity among its codes, codes missing from the table
//! counting as 0.

use std::sync::Arc;

use regex::Regex;
use serde_json::{json, Value};

use crate::dictionary::additives::ZiSeverityTable;
use crate::dictionary::ZiDictionaryRegistry;
use crate::errors::{Result, ZiError};
use crate::operator::{for_each_record, ZiBoxedOperator, ZiOperator};
use crate::operators::transform::ZiTextCell;
use crate::operators::{config_object, optional_str, placeholders};
use crate::record::ZiRecordBatch;

/// Metadata key holding the number of malformed entries of a record.
pub const MALFORMED_METADATA_KEY: &str = "malformed_additives";

const CODE_PATTERN: &str = r"^e\d{3,4}[a-z]?$";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZiAdditiveScore {
    pub level: u8,
    pub codes: Vec<String>,
    /// Entries with an empty code or a code outside the `eNNN[N][x]` shape.
    pub malformed: usize,
}

#[derive(Clone, Debug)]
pub struct ZiAdditiveScorer {
    table: Arc<ZiSeverityTable>,
    code_pattern: Regex,
}

impl ZiAdditiveScorer {
    pub fn new(table: Arc<ZiSeverityTable>) -> Result<Self> {
        let code_pattern = Regex::new(CODE_PATTERN)
            .map_err(|err| ZiError::internal(format!("invalid additive code pattern: {err}")))?;
        Ok(Self {
            table,
            code_pattern,
        })
    }

    /// Null input yields `None`.
    pub fn score(&self, raw: Option<&str>) -> Option<ZiAdditiveScore> {
        let lowered = raw?.to_lowercase();
        let mut level = 0;
        let mut codes = Vec::new();
        let mut malformed = 0;
        for entry in lowered.split(',') {
            let code = entry.split(" -").next().unwrap_or_default().trim();
            if code.is_empty() {
                malformed += 1;
                continue;
            }
            if !self.code_pattern.is_match(code) {
                malformed += 1;
            }
            level = level.max(self.table.level(code));
            codes.push(code.to_string());
        }
        Some(ZiAdditiveScore {
            level,
            codes,
            malformed,
        })
    }
}

/// Writes the risk level and the extracted code list.
#[derive(Debug)]
pub struct ZiAdditiveRisk {
    source: String,
    level_column: String,
    codes_column: String,
    placeholders: Vec<String>,
    scorer: ZiAdditiveScorer,
}

impl ZiAdditiveRisk {
    pub fn new(
        source: impl Into<String>,
        level_column: impl Into<String>,
        codes_column: impl Into<String>,
        placeholders: Vec<String>,
        scorer: ZiAdditiveScorer,
    ) -> Self {
        Self {
            source: source.into(),
            level_column: level_column.into(),
            codes_column: codes_column.into(),
            placeholders,
            scorer,
        }
    }
}

impl ZiOperator for ZiAdditiveRisk {
    fn name(&self) -> &'static str {
        "additive.risk"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            let cell = ZiTextCell::read(record, &self.source, &self.placeholders);
            match self.scorer.score(cell.as_text()) {
                Some(score) => {
                    record.set_field(self.level_column.as_str(), json!(score.level));
                    record.set_field(self.codes_column.as_str(), json!(score.codes));
                    if score.malformed > 0 {
                        record
                            .metadata_mut()
                            .insert(MALFORMED_METADATA_KEY.to_string(), json!(score.malformed));
                    }
                }
                None => {
                    record.set_field(self.level_column.as_str(), Value::Null);
                    record.set_field(self.codes_column.as_str(), Value::Null);
                }
            }
        });
        Ok(batch)
    }
}

/// `{source?, level_column?, codes_column?, placeholders?}`.
pub fn additive_risk_factory(config: &Value, registry: &ZiDictionaryRegistry) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "additive.risk")?;
    let source = optional_str(obj, "source", "additive.risk")?
        .unwrap_or_else(|| "additives_fr".to_string());
    let level_column = optional_str(obj, "level_column", "additive.risk")?
        .unwrap_or_else(|| "additive_danger_level".to_string());
    let codes_column = optional_str(obj, "codes_column", "additive.risk")?
        .unwrap_or_else(|| "additive_codes".to_string());
    Ok(Box::new(ZiAdditiveRisk::new(
        source,
        level_column,
        codes_column,
        placeholders(obj, "additive.risk")?,
        ZiAdditiveScorer::new(registry.severity())?,
    )))
}
