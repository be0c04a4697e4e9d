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

//! # Zi Record Module
//!
//! One `ZiRecord` is one product row of the attribute table. The payload is a
//! JSON object holding one key per column; a key that is absent and a key
//! holding JSON `null` are both treated as a null cell. Derived columns are
//! appended to the same payload object, raw columns are left untouched.
//!
//! ## Usage Example
//!
//! ```rust
//! use zi_food::record::ZiRecord;
//! use serde_json::json;
//!
//! let record = ZiRecord::new(None, json!({"code": "301", "packaging": "Bocal en verre"}));
//! assert!(record.is_null("origins"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::operators::transform::ZiTextCell;

/// Generic metadata map that may accompany a record.
pub type ZiMetadata = Map<String, Value>;

/// One product row processed by the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ZiRecord {
    /// Business identifier, populated by the identifier cleanup stage.
    pub id: Option<String>,

    /// Column values keyed by column name.
    pub payload: Value,

    /// Additional attributes attached by stages (never used as table columns).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ZiMetadata>,
}

impl ZiRecord {
    /// Constructs a record with the given payload and optional identifier.
    pub fn new(id: impl Into<Option<String>>, payload: Value) -> Self {
        ZiRecord {
            id: id.into(),
            payload,
            metadata: None,
        }
    }

    /// Attaches metadata to the record.
    pub fn with_metadata(mut self, metadata: ZiMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns a mutable reference to the metadata map, creating it if necessary.
    pub fn metadata_mut(&mut self) -> &mut ZiMetadata {
        self.metadata.get_or_insert_with(ZiMetadata::new)
    }

    /// Returns the non-null value stored under `column`.
    pub fn field(&self, column: &str) -> Option<&Value> {
        match self.payload.get(column) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// True when the cell is absent or JSON `null`.
    pub fn is_null(&self, column: &str) -> bool {
        self.field(column).is_none()
    }

    /// Writes a column value, turning a non-object payload into an object first.
    pub fn set_field(&mut self, column: impl Into<String>, value: Value) {
        if !self.payload.is_object() {
            self.payload = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.payload {
            map.insert(column.into(), value);
        }
    }

    /// Fraction of `columns` that are null for this record.
    ///
    /// An empty column list yields `0.0`.
    pub fn missing_ratio(&self, columns: &[String]) -> f64 {
        if columns.is_empty() {
            return 0.0;
        }
        let missing = columns.iter().filter(|c| self.is_null(c)).count();
        missing as f64 / columns.len() as f64
    }

    /// Fraction of `columns` that carry no information: null cells plus
    /// text cells that are blank or one of `placeholders`.
    pub fn missing_ratio_with(&self, columns: &[String], placeholders: &[String]) -> f64 {
        if columns.is_empty() {
            return 0.0;
        }
        let missing = columns
            .iter()
            .filter(|c| self.is_uninformative(c, placeholders))
            .count();
        missing as f64 / columns.len() as f64
    }

    fn is_uninformative(&self, column: &str, placeholders: &[String]) -> bool {
        match self.field(column) {
            None => true,
            Some(Value::String(text)) => {
                ZiTextCell::from_text(text, placeholders) == ZiTextCell::Placeholder
            }
            Some(_) => false,
        }
    }

    /// Fraction of `columns` that are non-null for this record.
    pub fn completeness(&self, columns: &[String]) -> f64 {
        1.0 - self.missing_ratio(columns)
    }
}

/// Convenience alias for working on batches of records.
pub type ZiRecordBatch = Vec<ZiRecord>;

/// Ordered union of payload keys across the batch (first-seen order).
pub fn batch_columns(batch: &[ZiRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut columns = Vec::new();
    for record in batch {
        if let Value::Object(map) = &record.payload {
            for key in map.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}
