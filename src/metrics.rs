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

//! # Coverage and Run Metrics
//!
//! Data-quality conditions never fail a run. They are counted here instead:
//! null sources, unmatched (all-zero) classifications, unresolved
//! locations, malformed additive entries, rejected identifiers and removed
//! duplicates. The unmatched count of a domain is the signal used to decide
//! whether its dictionary needs new synonyms; extending a dictionary can
//! only lower it.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::ZiCleaningConfig;
use crate::dictionary::geography::ZiContinent;
use crate::dictionary::{ZiDictionaryRegistry, ZiDomain};
use crate::operators::additive::MALFORMED_METADATA_KEY;
use crate::operators::classify::{flag_column, ZiFlag};
use crate::record::ZiRecord;

/// Records entering and leaving one stage.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ZiPipelineStageMetrics {
    pub stage: String,
    pub records_in: usize,
    pub records_out: usize,
}

impl ZiPipelineStageMetrics {
    pub fn removed(&self) -> usize {
        self.records_in.saturating_sub(self.records_out)
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ZiDomainCoverage {
    pub domain: String,
    pub dictionary_version: u32,
    /// Records with a non-null source.
    pub observed: usize,
    pub null: usize,
    /// Observed records with every flag at 0.
    pub unmatched: usize,
    pub category_hits: BTreeMap<String, usize>,
}

impl ZiDomainCoverage {
    pub fn unmatched_ratio(&self) -> f64 {
        if self.observed == 0 {
            0.0
        } else {
            self.unmatched as f64 / self.observed as f64
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ZiGeoCoverage {
    pub field: String,
    pub null: usize,
    pub domestic: usize,
    pub unresolved: usize,
    pub by_continent: BTreeMap<String, usize>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ZiAdditiveCoverage {
    pub observed: usize,
    pub null: usize,
    pub malformed_entries: usize,
    pub by_level: BTreeMap<u64, usize>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ZiCoverageReport {
    pub total_records: usize,
    pub domains: Vec<ZiDomainCoverage>,
    pub geography: Vec<ZiGeoCoverage>,
    pub additives: ZiAdditiveCoverage,
}

impl ZiCoverageReport {
    /// Audits a processed table against the columns named by `config`.
    pub fn compute(records: &[ZiRecord], config: &ZiCleaningConfig, registry: &ZiDictionaryRegistry) -> Self {
        let domains = ZiDomain::ALL
            .iter()
            .map(|domain| domain_coverage(records, *domain, config, registry))
            .collect();
        let geography = vec![
            geo_coverage(
                records,
                &config.fields.origin,
                &config.outputs.origin_country,
                &config.outputs.origin_continent,
            ),
            geo_coverage(
                records,
                &config.fields.manufacturing_place,
                &config.outputs.manufacturing_country,
                &config.outputs.manufacturing_continent,
            ),
        ];
        Self {
            total_records: records.len(),
            domains,
            geography,
            additives: additive_coverage(records, &config.outputs.additive_level),
        }
    }

    pub fn domain(&self, domain: ZiDomain) -> Option<&ZiDomainCoverage> {
        self.domains.iter().find(|d| d.domain == domain.as_str())
    }

    pub fn geo(&self, field: &str) -> Option<&ZiGeoCoverage> {
        self.geography.iter().find(|g| g.field == field)
    }

    pub fn as_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn domain_coverage(
    records: &[ZiRecord],
    domain: ZiDomain,
    config: &ZiCleaningConfig,
    registry: &ZiDictionaryRegistry,
) -> ZiDomainCoverage {
    let dictionary = registry.domain(domain);
    let prefix = config.outputs.domain_prefix(domain);
    let columns: Vec<(String, String)> = dictionary
        .categories()
        .iter()
        .map(|c| (c.name.clone(), flag_column(prefix, &c.name)))
        .collect();

    let mut coverage = ZiDomainCoverage {
        domain: domain.as_str().to_string(),
        dictionary_version: dictionary.version(),
        ..Default::default()
    };
    for record in records {
        let flags: Vec<ZiFlag> = columns
            .iter()
            .map(|(_, column)| ZiFlag::from_value(record.field(column)))
            .collect();
        if flags.iter().all(|f| *f == ZiFlag::Null) {
            coverage.null += 1;
            continue;
        }
        coverage.observed += 1;
        let mut matched = false;
        for ((name, _), flag) in columns.iter().zip(&flags) {
            if *flag == ZiFlag::Yes {
                matched = true;
                *coverage.category_hits.entry(name.clone()).or_insert(0) += 1;
            }
        }
        if !matched {
            coverage.unmatched += 1;
        }
    }
    coverage
}

fn geo_coverage(records: &[ZiRecord], field: &str, country: &str, continent: &str) -> ZiGeoCoverage {
    let mut coverage = ZiGeoCoverage {
        field: field.to_string(),
        ..Default::default()
    };
    for record in records {
        match record.field(continent).and_then(Value::as_str) {
            Some(bucket) => {
                if bucket == ZiContinent::Inconnue.as_str() {
                    coverage.unresolved += 1;
                }
                *coverage.by_continent.entry(bucket.to_string()).or_insert(0) += 1;
            }
            None if record.field(country).is_some() => coverage.domestic += 1,
            None => coverage.null += 1,
        }
    }
    coverage
}

fn additive_coverage(records: &[ZiRecord], level_column: &str) -> ZiAdditiveCoverage {
    let mut coverage = ZiAdditiveCoverage::default();
    for record in records {
        match record.field(level_column).and_then(Value::as_u64) {
            Some(level) => {
                coverage.observed += 1;
                *coverage.by_level.entry(level).or_insert(0) += 1;
            }
            None => coverage.null += 1,
        }
        if let Some(malformed) = record
            .metadata
            .as_ref()
            .and_then(|m| m.get(MALFORMED_METADATA_KEY))
            .and_then(Value::as_u64)
        {
            coverage.malformed_entries += malformed as usize;
        }
    }
    coverage
}

/// Everything a caller learns about one run besides the output table.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ZiRunReport {
    pub stages: Vec<ZiPipelineStageMetrics>,
    pub coverage: ZiCoverageReport,
}

impl ZiRunReport {
    fn removed_by(&self, stage: &str) -> usize {
        self.stages
            .iter()
            .filter(|s| s.stage == stage)
            .map(ZiPipelineStageMetrics::removed)
            .sum()
    }

    pub fn rejected_identifiers(&self) -> usize {
        self.removed_by("identifier.require")
    }

    pub fn duplicates_removed(&self) -> usize {
        self.removed_by("dedup.completeness")
    }
}
