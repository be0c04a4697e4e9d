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

//! Text normalization shared by every matching stage.

use serde_json::Value;

use crate::dictionary::ZiDictionaryRegistry;
use crate::errors::Result;
use crate::operator::{for_each_record, ZiBoxedOperator, ZiOperator};
use crate::operators::{config_object, string_list};
use crate::record::{ZiRecord, ZiRecordBatch};

/// Textual stand-ins for a missing value left behind by upstream exports.
pub const DEFAULT_PLACEHOLDERS: &[&str] = &["nan", "missing"];

/// Lowercases a cell; `None` stays `None`.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    value.map(str::to_lowercase)
}

/// Tri-state view of one text cell after normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZiTextCell {
    /// Absent or JSON `null`.
    Null,
    /// Blank, or one of the placeholder tokens.
    Placeholder,
    /// Lowercased, trimmed text.
    Present(String),
}

impl ZiTextCell {
    /// Reads `column` from `record`. Numbers and booleans are read as text.
    pub fn read(record: &ZiRecord, column: &str, placeholders: &[String]) -> Self {
        let text = match record.field(column) {
            None => return ZiTextCell::Null,
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };
        Self::from_text(&text, placeholders)
    }

    pub fn from_text(text: &str, placeholders: &[String]) -> Self {
        let normalized = normalize_text(Some(text)).unwrap_or_default();
        let trimmed = normalized.trim();
        if trimmed.is_empty() || placeholders.iter().any(|p| p == trimmed) {
            ZiTextCell::Placeholder
        } else {
            ZiTextCell::Present(trimmed.to_string())
        }
    }

    /// Reads several columns as one source joined by `,`.
    ///
    /// The combined cell is null only when every part is null; placeholder
    /// parts are skipped.
    pub fn read_joined(record: &ZiRecord, columns: &[String], placeholders: &[String]) -> Self {
        let mut parts = Vec::new();
        let mut any_placeholder = false;
        for column in columns {
            match Self::read(record, column, placeholders) {
                ZiTextCell::Present(text) => parts.push(text),
                ZiTextCell::Placeholder => any_placeholder = true,
                ZiTextCell::Null => {}
            }
        }
        if !parts.is_empty() {
            ZiTextCell::Present(parts.join(","))
        } else if any_placeholder {
            ZiTextCell::Placeholder
        } else {
            ZiTextCell::Null
        }
    }

    /// Text of a present cell; null and placeholder cells yield `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ZiTextCell::Present(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ZiTextCell::Null)
    }
}

/// Default placeholder list as owned strings.
pub fn default_placeholders() -> Vec<String> {
    DEFAULT_PLACEHOLDERS.iter().map(|p| p.to_string()).collect()
}

/// Lowercases the configured text columns in place.
#[derive(Debug)]
pub struct ZiTransformNormalize {
    fields: Vec<String>,
}

impl ZiTransformNormalize {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

impl ZiOperator for ZiTransformNormalize {
    fn name(&self) -> &'static str {
        "transform.normalize"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            for field in &self.fields {
                let lowered = match record.field(field) {
                    Some(Value::String(text)) if text.chars().any(char::is_uppercase) => {
                        text.to_lowercase()
                    }
                    _ => continue,
                };
                record.set_field(field.as_str(), Value::String(lowered));
            }
        });
        Ok(batch)
    }
}

pub fn transform_normalize_factory(
    config: &Value,
    _registry: &ZiDictionaryRegistry,
) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "transform.normalize")?;
    let fields = string_list(obj, "fields", "transform.normalize")?.unwrap_or_default();
    Ok(Box::new(ZiTransformNormalize::new(fields)))
}
