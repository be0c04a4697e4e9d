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

//! # Keyword Dictionary Registry
//!
//! Curated, immutable reference data consumed by the classification stages:
//!
//! - [`ZiCategoryDictionary`]: ordered category name → keyword substrings for
//!   one classification domain (packaging material, allergen family,
//!   label/certification)
//! - [`geography::ZiGeoTables`]: canonical country list, continent buckets
//!   and the ordered alias table
//! - [`additives::ZiSeverityTable`]: additive code → danger level
//!
//! Dictionaries are built once and never mutated. A correction (for example
//! a missing synonym) produces a new dictionary with a bumped version through
//! [`ZiCategoryDictionary::revise`], leaving the previous version intact for
//! any run still holding it.

pub mod additives;
pub mod allergen;
pub mod geography;
pub mod label;
pub mod packaging;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZiError};
use crate::operators::transform::normalize_text;

use self::additives::ZiSeverityTable;
use self::geography::ZiGeoTables;

/// Classification domain: one free-text source and its dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiDomain {
    Packaging,
    Allergen,
    Label,
}

impl ZiDomain {
    pub const ALL: [ZiDomain; 3] = [ZiDomain::Packaging, ZiDomain::Allergen, ZiDomain::Label];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZiDomain::Packaging => "packaging",
            ZiDomain::Allergen => "allergen",
            ZiDomain::Label => "label",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "packaging" => Ok(ZiDomain::Packaging),
            "allergen" | "allergens" => Ok(ZiDomain::Allergen),
            "label" | "labels" => Ok(ZiDomain::Label),
            other => Err(ZiError::validation(format!("unknown domain '{other}'"))),
        }
    }
}

impl fmt::Display for ZiDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category and the normalized substrings that signal membership.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

impl ZiCategory {
    /// True when any keyword occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }
}

/// Ordered, versioned mapping from category name to keyword set.
///
/// Category names are unique and non-empty; keywords are lowercased, trimmed
/// and deduplicated within a category but may repeat across categories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiCategoryDictionary {
    domain: String,
    version: u32,
    categories: Vec<ZiCategory>,
}

impl ZiCategoryDictionary {
    /// Builds version 1 of a dictionary from owned entries.
    pub fn new(domain: impl Into<String>, entries: Vec<(String, Vec<String>)>) -> Result<Self> {
        let domain = domain.into();
        if domain.trim().is_empty() {
            return Err(ZiError::validation("dictionary domain may not be empty"));
        }
        let mut names = HashSet::new();
        let mut categories = Vec::with_capacity(entries.len());
        for (name, keywords) in entries {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ZiError::validation(format!(
                    "dictionary '{domain}' contains an empty category name"
                )));
            }
            if !names.insert(name.clone()) {
                return Err(ZiError::validation(format!(
                    "dictionary '{domain}' defines category '{name}' twice"
                )));
            }
            let keywords = clean_keywords(keywords);
            if keywords.is_empty() {
                return Err(ZiError::validation(format!(
                    "category '{name}' of dictionary '{domain}' has no keywords"
                )));
            }
            categories.push(ZiCategory { name, keywords });
        }
        Ok(Self {
            domain,
            version: 1,
            categories,
        })
    }

    /// Builds a dictionary from static curated data.
    pub fn from_static(domain: &str, entries: &[(&str, &[&str])]) -> Result<Self> {
        Self::new(
            domain,
            entries
                .iter()
                .map(|(name, keywords)| {
                    (
                        name.to_string(),
                        keywords.iter().map(|k| k.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn categories(&self) -> &[ZiCategory] {
        &self.categories
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ZiCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Returns the next version with `extra` keywords appended to `category`.
    pub fn revise(&self, category: &str, extra: &[&str]) -> Result<Self> {
        let mut next = self.clone();
        let target = next
            .categories
            .iter_mut()
            .find(|c| c.name == category)
            .ok_or_else(|| {
                ZiError::validation(format!(
                    "dictionary '{}' has no category '{category}'",
                    self.domain
                ))
            })?;
        let mut keywords = target.keywords.clone();
        keywords.extend(extra.iter().map(|k| k.to_string()));
        target.keywords = clean_keywords(keywords);
        next.version += 1;
        Ok(next)
    }

    /// Returns the next version with one more category appended.
    pub fn with_category(&self, name: &str, keywords: &[&str]) -> Result<Self> {
        let mut entries: Vec<(String, Vec<String>)> = self
            .categories
            .iter()
            .map(|c| (c.name.clone(), c.keywords.clone()))
            .collect();
        entries.push((
            name.to_string(),
            keywords.iter().map(|k| k.to_string()).collect(),
        ));
        let mut next = Self::new(self.domain.clone(), entries)?;
        next.version = self.version + 1;
        Ok(next)
    }
}

fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter_map(|k| normalize_text(Some(k.trim())))
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

/// Read-only bundle of every table a pipeline run needs.
///
/// Tables sit behind `Arc` so operators built from the same registry share
/// them across worker threads without copying or locking.
#[derive(Clone, Debug)]
pub struct ZiDictionaryRegistry {
    packaging: Arc<ZiCategoryDictionary>,
    allergen: Arc<ZiCategoryDictionary>,
    label: Arc<ZiCategoryDictionary>,
    geography: Arc<ZiGeoTables>,
    severity: Arc<ZiSeverityTable>,
}

impl ZiDictionaryRegistry {
    /// Registry built from the curated data bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            packaging: Arc::new(packaging::dictionary()?),
            allergen: Arc::new(allergen::dictionary()?),
            label: Arc::new(label::dictionary()?),
            geography: Arc::new(ZiGeoTables::builtin()?),
            severity: Arc::new(ZiSeverityTable::builtin()?),
        })
    }

    pub fn domain(&self, domain: ZiDomain) -> Arc<ZiCategoryDictionary> {
        match domain {
            ZiDomain::Packaging => Arc::clone(&self.packaging),
            ZiDomain::Allergen => Arc::clone(&self.allergen),
            ZiDomain::Label => Arc::clone(&self.label),
        }
    }

    pub fn geography(&self) -> Arc<ZiGeoTables> {
        Arc::clone(&self.geography)
    }

    pub fn severity(&self) -> Arc<ZiSeverityTable> {
        Arc::clone(&self.severity)
    }

    /// Returns a registry where `domain` is served by `dictionary`.
    pub fn with_domain(&self, domain: ZiDomain, dictionary: ZiCategoryDictionary) -> Self {
        let mut next = self.clone();
        let slot = match domain {
            ZiDomain::Packaging => &mut next.packaging,
            ZiDomain::Allergen => &mut next.allergen,
            ZiDomain::Label => &mut next.label,
        };
        *slot = Arc::new(dictionary);
        next
    }

    pub fn with_geography(&self, geography: ZiGeoTables) -> Self {
        let mut next = self.clone();
        next.geography = Arc::new(geography);
        next
    }

    pub fn with_severity(&self, severity: ZiSeverityTable) -> Self {
        let mut next = self.clone();
        next.severity = Arc::new(severity);
        next
    }
}
