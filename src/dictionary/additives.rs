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

//! Additive code → danger level table.

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZiError};

/// Highest level the table may hold.
pub const MAX_LEVEL: u8 = 3;

const BUILTIN_SEVERITY_TABLE: &str = include_str!("../../data/additifs_dangereux.csv");

#[derive(Debug, Deserialize)]
struct SeverityRow {
    #[serde(rename = "Id_additif")]
    code: String,
    #[serde(rename = "Niveau_danger")]
    level: u8,
}

/// Lookup of lowercased additive codes. Codes absent from the table score 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiSeverityTable {
    levels: HashMap<String, u8>,
}

impl ZiSeverityTable {
    pub fn builtin() -> Result<Self> {
        Self::from_csv_reader(BUILTIN_SEVERITY_TABLE.as_bytes())
    }

    /// Loads an `Id_additif;Niveau_danger` table.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut pairs = Vec::new();
        for row in csv_reader.deserialize::<SeverityRow>() {
            let row = row?;
            pairs.push((row.code, row.level));
        }
        let table = Self::from_pairs(pairs)?;
        log::debug!("severity table loaded: {} additives", table.len());
        Ok(table)
    }

    pub fn from_pairs<K: AsRef<str>>(pairs: impl IntoIterator<Item = (K, u8)>) -> Result<Self> {
        let mut levels = HashMap::new();
        for (code, level) in pairs {
            let code = code.as_ref().trim().to_lowercase();
            if code.is_empty() {
                return Err(ZiError::validation("severity table contains an empty additive code"));
            }
            if level > MAX_LEVEL {
                return Err(ZiError::validation(format!(
                    "additive '{code}' has level {level}, above {MAX_LEVEL}"
                )));
            }
            levels.insert(code, level);
        }
        Ok(Self { levels })
    }

    pub fn level(&self, code: &str) -> u8 {
        self.levels.get(code).copied().unwrap_or(0)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.levels.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
