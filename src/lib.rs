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

//! # Zi Food Library
//!
//! Rule-based normalization and classification of sparse food-product
//! attribute tables. Free-text fields become multi-label category flags,
//! canonical countries and continents, leveled category labels and an
//! additive risk score; duplicate products are collapsed to their most
//! complete row.
//!
//! ## Module Overview
//!
//! - **record**: `ZiRecord`, one product row as a JSON object
//! - **operator**: the `ZiOperator` stage trait and its parallel helpers
//! - **operators**: the bundled cleaning stages
//! - **dictionary**: immutable, versioned keyword dictionaries and reference
//!   tables
//! - **config**: `ZiCleaningConfig`, column names and stage parameters
//! - **pipeline**: pipeline building and the canonical cleaning run
//! - **metrics**: coverage audit and per-stage record counts
//!
//! ## Feature Flags
//!
//! - `parallel` (default): per-record stages fan out over Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use zi_food::{ZiCleaningConfig, ZiFoodPipeline, ZiRecord};
//!
//! let pipeline = ZiFoodPipeline::builtin(ZiCleaningConfig::default())?;
//! let (records, report) = pipeline.run(vec![
//!     ZiRecord::new(None, json!({"code": "1", "packaging": "Pot en verre, film plastique"})),
//! ])?;
//! assert_eq!(records[0].payload["pack_verre"], json!(1));
//! println!("{}", report.coverage.as_json());
//! # Ok::<(), zi_food::ZiError>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, ZiError>`. Only structural
//! problems are errors; data-quality issues end up in the coverage report.

pub mod config;
pub mod dictionary;
pub mod errors;
pub mod metrics;
pub mod operator;
pub mod operators;
pub mod pipeline;
pub mod record;

pub use config::{
    ZiClampConfig, ZiCleaningConfig, ZiFieldGroups, ZiGeoConfig, ZiHierarchyConfig,
    ZiOutputColumns,
};
pub use dictionary::additives::ZiSeverityTable;
pub use dictionary::geography::{ZiAliasTable, ZiContinent, ZiCountry, ZiGeoTables};
pub use dictionary::{ZiCategory, ZiCategoryDictionary, ZiDictionaryRegistry, ZiDomain};
pub use errors::{Result, ZiError};
pub use metrics::{
    ZiAdditiveCoverage, ZiCoverageReport, ZiDomainCoverage, ZiGeoCoverage,
    ZiPipelineStageMetrics, ZiRunReport,
};
pub use operator::{execute_operator, for_each_record, ZiOperator, ZiOperatorFactory};
pub use operators::additive::{ZiAdditiveRisk, ZiAdditiveScore, ZiAdditiveScorer};
pub use operators::classify::{classify, ZiClassifyMultiLabel, ZiFlag};
pub use operators::dedup::{dedupe_by_completeness, ZiDedupCompleteness, ZiIdentifierRequire};
pub use operators::flags::{ZiAlcoholFlag, ZiIngredientCount, ZiMeatFlags, ZiNutrientClamp};
pub use operators::geo::{ZiGeoResolve, ZiGeoResolver, ZiGeoStage, ZiLocation};
pub use operators::hierarchy::{ZiHierarchySynthesize, ZiHierarchySynthesizer};
pub use operators::transform::{normalize_text, ZiTextCell, ZiTransformNormalize};
pub use pipeline::{canonical_steps, ZiFoodPipeline, ZiPipeline, ZiPipelineBuilder};
pub use record::{batch_columns, ZiMetadata, ZiRecord, ZiRecordBatch};
