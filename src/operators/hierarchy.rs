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

//! Leveled category synthesis.
//!
//! `"snacks sucrés,chocolats,chocolats au lait"` with three levels becomes
//! `categories_level_1 = "snacks sucrés"`, `categories_level_2 = "chocolats"`,
//! `categories_level_3 = "chocolats au lait"`. Generic tokens from the
//! stoplist are dropped before levels are assigned.

use std::collections::HashSet;

use serde_json::Value;

use crate::dictionary::ZiDictionaryRegistry;
use crate::errors::{Result, ZiError};
use crate::operator::{for_each_record, ZiBoxedOperator, ZiOperator};
use crate::operators::transform::ZiTextCell;
use crate::operators::{config_object, optional_str, optional_usize, placeholders, string_list};
use crate::record::ZiRecordBatch;

pub const DEFAULT_LEVELS: usize = 3;

pub const DEFAULT_LEVEL_PREFIX: &str = "categories_level_";

/// Categories too generic to carry taxonomy information.
pub const DEFAULT_STOPLIST: &[&str] = &[
    "aliments et boissons à base de végétaux",
    "aliments d'origine végétale",
    "aliments à base de fruits et de légumes",
    "boissons",
];

#[derive(Clone, Debug)]
pub struct ZiHierarchySynthesizer {
    levels: usize,
    stoplist: HashSet<String>,
    placeholders: Vec<String>,
}

impl ZiHierarchySynthesizer {
    pub fn new(levels: usize, stoplist: &[String], placeholders: Vec<String>) -> Result<Self> {
        if levels == 0 {
            return Err(ZiError::validation("hierarchy level count must be at least 1"));
        }
        Ok(Self {
            levels,
            stoplist: stoplist.iter().map(|s| s.trim().to_lowercase()).collect(),
            placeholders,
        })
    }

    pub fn with_defaults(levels: usize) -> Result<Self> {
        let stoplist: Vec<String> = DEFAULT_STOPLIST.iter().map(|s| s.to_string()).collect();
        Self::new(levels, &stoplist, crate::operators::transform::default_placeholders())
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Always returns exactly `levels` entries.
    pub fn synthesize(&self, raw: Option<&str>) -> Vec<Option<String>> {
        let mut out = vec![None; self.levels];
        let Some(raw) = raw else {
            return out;
        };
        let lowered = raw.to_lowercase();
        let tokens = lowered
            .split(',')
            .map(str::trim)
            .filter(|token| !self.stoplist.contains(*token));
        for (slot, token) in out.iter_mut().zip(tokens) {
            if !token.is_empty() && !self.placeholders.iter().any(|p| p == token) {
                *slot = Some(token.to_string());
            }
        }
        out
    }
}

#[derive(Debug)]
pub struct ZiHierarchySynthesize {
    source: String,
    columns: Vec<String>,
    synthesizer: ZiHierarchySynthesizer,
}

impl ZiHierarchySynthesize {
    pub fn new(source: impl Into<String>, prefix: &str, synthesizer: ZiHierarchySynthesizer) -> Self {
        let columns = (1..=synthesizer.levels())
            .map(|i| format!("{prefix}{i}"))
            .collect();
        Self {
            source: source.into(),
            columns,
            synthesizer,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl ZiOperator for ZiHierarchySynthesize {
    fn name(&self) -> &'static str {
        "hierarchy.synthesize"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            let cell = ZiTextCell::read(record, &self.source, &self.synthesizer.placeholders);
            let levels = self.synthesizer.synthesize(cell.as_text());
            for (column, level) in self.columns.iter().zip(levels) {
                record.set_field(column.as_str(), level.map(Value::String).unwrap_or(Value::Null));
            }
        });
        Ok(batch)
    }
}

pub fn hierarchy_synthesize_factory(
    config: &Value,
    _registry: &ZiDictionaryRegistry,
) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "hierarchy.synthesize")?;
    let source = optional_str(obj, "source", "hierarchy.synthesize")?
        .unwrap_or_else(|| "categories_fr".to_string());
    let levels = optional_usize(obj, "levels", "hierarchy.synthesize")?.unwrap_or(DEFAULT_LEVELS);
    let stoplist = string_list(obj, "stoplist", "hierarchy.synthesize")?
        .unwrap_or_else(|| DEFAULT_STOPLIST.iter().map(|s| s.to_string()).collect());
    let prefix = optional_str(obj, "prefix", "hierarchy.synthesize")?
        .unwrap_or_else(|| DEFAULT_LEVEL_PREFIX.to_string());
    let synthesizer = ZiHierarchySynthesizer::new(
        levels,
        &stoplist,
        placeholders(obj, "hierarchy.synthesize")?,
    )?;
    Ok(Box::new(ZiHierarchySynthesize::new(source, &prefix, synthesizer)))
}
