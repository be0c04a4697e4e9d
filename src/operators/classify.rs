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

//! # Multi-Label Classification
//!
//! Maps one free-text source onto every category of a domain dictionary.
//! Each category yields an independent tri-state flag, so a record may carry
//! several `1`s in the same domain:
//!
//! | source cell       | flag per category                 |
//! |-------------------|-----------------------------------|
//! | null/placeholder  | null                              |
//! | text              | `1` if any keyword is a substring, else `0` |

use std::sync::Arc;

use serde_json::{json, Value};

use crate::dictionary::{ZiCategoryDictionary, ZiDictionaryRegistry, ZiDomain};
use crate::errors::{Result, ZiError};
use crate::operator::{for_each_record, ZiBoxedOperator, ZiOperator};
use crate::operators::transform::{normalize_text, ZiTextCell};
use crate::operators::{config_object, optional_str, placeholders, string_list};
use crate::record::ZiRecordBatch;

/// Tri-state category membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZiFlag {
    Null,
    No,
    Yes,
}

impl ZiFlag {
    pub fn from_bool(present: bool) -> Self {
        if present {
            ZiFlag::Yes
        } else {
            ZiFlag::No
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            ZiFlag::Null => Value::Null,
            ZiFlag::No => json!(0),
            ZiFlag::Yes => json!(1),
        }
    }

    /// Reads a flag cell written by a classification stage.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_i64) {
            Some(0) => ZiFlag::No,
            Some(_) => ZiFlag::Yes,
            None => ZiFlag::Null,
        }
    }
}

/// Classifies `value` against every category of `dictionary`, in order.
pub fn classify<'d>(dictionary: &'d ZiCategoryDictionary, value: Option<&str>) -> Vec<(&'d str, ZiFlag)> {
    let normalized = normalize_text(value);
    dictionary
        .categories()
        .iter()
        .map(|category| {
            let flag = match normalized.as_deref() {
                None => ZiFlag::Null,
                Some(text) => ZiFlag::from_bool(category.matches(text)),
            };
            (category.name.as_str(), flag)
        })
        .collect()
}

pub fn default_prefix(domain: ZiDomain) -> &'static str {
    match domain {
        ZiDomain::Packaging => "pack_",
        ZiDomain::Allergen => "allergen_",
        ZiDomain::Label => "label_",
    }
}

pub fn default_sources(domain: ZiDomain) -> Vec<String> {
    let sources: &[&str] = match domain {
        ZiDomain::Packaging => &["packaging"],
        ZiDomain::Allergen => &["traces_fr", "allergens"],
        ZiDomain::Label => &["labels_fr"],
    };
    sources.iter().map(|s| s.to_string()).collect()
}

/// Column name of one category flag.
pub fn flag_column(prefix: &str, category: &str) -> String {
    format!("{prefix}{category}")
}

/// Writes one flag column per category of a domain.
#[derive(Debug)]
pub struct ZiClassifyMultiLabel {
    domain: ZiDomain,
    sources: Vec<String>,
    prefix: String,
    placeholders: Vec<String>,
    dictionary: Arc<ZiCategoryDictionary>,
    columns: Vec<String>,
}

impl ZiClassifyMultiLabel {
    pub fn new(
        domain: ZiDomain,
        sources: Vec<String>,
        prefix: impl Into<String>,
        placeholders: Vec<String>,
        dictionary: Arc<ZiCategoryDictionary>,
    ) -> Self {
        let prefix = prefix.into();
        let columns = dictionary
            .categories()
            .iter()
            .map(|c| flag_column(&prefix, &c.name))
            .collect();
        Self {
            domain,
            sources,
            prefix,
            placeholders,
            dictionary,
            columns,
        }
    }

    pub fn domain(&self) -> ZiDomain {
        self.domain
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Output columns, in dictionary order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl ZiOperator for ZiClassifyMultiLabel {
    fn name(&self) -> &'static str {
        "classify.multilabel"
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for_each_record(&mut batch, |record| {
            let cell = ZiTextCell::read_joined(record, &self.sources, &self.placeholders);
            let text = cell.as_text();
            for (column, category) in self.columns.iter().zip(self.dictionary.categories()) {
                let flag = match text {
                    None => ZiFlag::Null,
                    Some(text) => ZiFlag::from_bool(category.matches(text)),
                };
                record.set_field(column.as_str(), flag.to_value());
            }
        });
        log::debug!(
            "classified {} records over {} {} categories (dictionary v{})",
            batch.len(),
            self.dictionary.len(),
            self.domain,
            self.dictionary.version()
        );
        Ok(batch)
    }
}

/// Builds a classifier from `{domain, sources?, prefix?, placeholders?, categories?}`.
///
/// An inline `categories` object (name → keyword array, in order) replaces
/// the registry dictionary for this stage.
pub fn classify_multilabel_factory(
    config: &Value,
    registry: &ZiDictionaryRegistry,
) -> Result<ZiBoxedOperator> {
    let obj = config_object(config, "classify.multilabel")?;
    let domain_name = obj
        .get("domain")
        .and_then(Value::as_str)
        .ok_or_else(|| ZiError::validation("classify.multilabel requires string 'domain'"))?;
    let domain = ZiDomain::parse(domain_name)?;
    let sources = string_list(obj, "sources", "classify.multilabel")?
        .unwrap_or_else(|| default_sources(domain));
    if sources.is_empty() {
        return Err(ZiError::validation(
            "classify.multilabel 'sources' may not be empty",
        ));
    }
    let prefix = optional_str(obj, "prefix", "classify.multilabel")?
        .unwrap_or_else(|| default_prefix(domain).to_string());
    let dictionary = match obj.get("categories") {
        None | Some(Value::Null) => registry.domain(domain),
        Some(Value::Object(categories)) => {
            let mut entries = Vec::with_capacity(categories.len());
            for (name, keywords) in categories {
                let keywords = keywords
                    .as_array()
                    .ok_or_else(|| {
                        ZiError::validation(format!(
                            "classify.multilabel category '{name}' must list keywords"
                        ))
                    })?
                    .iter()
                    .map(|k| {
                        k.as_str().map(str::to_string).ok_or_else(|| {
                            ZiError::validation(format!(
                                "classify.multilabel category '{name}' keywords must be strings"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                entries.push((name.clone(), keywords));
            }
            Arc::new(ZiCategoryDictionary::new(domain.as_str(), entries)?)
        }
        Some(_) => {
            return Err(ZiError::validation(
                "classify.multilabel 'categories' must be an object",
            ))
        }
    };
    Ok(Box::new(ZiClassifyMultiLabel::new(
        domain,
        sources,
        prefix,
        placeholders(obj, "classify.multilabel")?,
        dictionary,
    )))
}
