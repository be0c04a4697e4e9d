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

//! # Zi Operator Module
//!
//! Operators are the stages of the cleaning pipeline. Each receives a batch
//! of records and returns a batch; only the deduplication and identifier
//! stages ever return fewer records than they receive.
//!
//! Per-record stages are independent across rows, so they go through
//! [`for_each_record`], which fans out over Rayon when the `parallel`
//! feature is enabled and falls back to a plain loop otherwise.
//!
//! ```rust
//! use zi_food::operator::ZiOperator;
//! use zi_food::record::ZiRecordBatch;
//! use zi_food::errors::Result;
//!
//! #[derive(Debug)]
//! struct Passthrough;
//!
//! impl ZiOperator for Passthrough {
//!     fn name(&self) -> &'static str {
//!         "passthrough"
//!     }
//!
//!     fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
//!         Ok(batch)
//!     }
//! }
//! ```

use crate::dictionary::ZiDictionaryRegistry;
use crate::errors::{Result, ZiError};
use crate::record::{ZiRecord, ZiRecordBatch};

/// Contract every pipeline stage fulfills.
///
/// Operators hold only immutable configuration (dictionaries, tables, column
/// names), so one instance can be shared across worker threads.
pub trait ZiOperator: std::fmt::Debug {
    /// Unique, human-readable name for the operator.
    fn name(&self) -> &'static str;

    /// Applies the operator to an incoming batch of records.
    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch>;
}

/// Executes an operator and tags any failure with the operator name.
///
/// Schema errors are returned unchanged so callers can still tell a
/// structurally unusable table apart from a stage failure.
pub fn execute_operator(
    operator: &dyn ZiOperator,
    batch: ZiRecordBatch,
) -> Result<ZiRecordBatch> {
    log::debug!("running stage '{}' on {} records", operator.name(), batch.len());
    operator.apply(batch).map_err(|err| {
        if err.is_schema() {
            err
        } else {
            ZiError::operator(operator.name(), err.to_string())
        }
    })
}

/// Applies `f` to every record of the batch in place.
#[cfg(feature = "parallel")]
pub fn for_each_record<F>(batch: &mut ZiRecordBatch, f: F)
where
    F: Fn(&mut ZiRecord) + Send + Sync,
{
    use rayon::prelude::*;
    batch.par_iter_mut().for_each(f);
}

/// Applies `f` to every record of the batch in place.
#[cfg(not(feature = "parallel"))]
pub fn for_each_record<F>(batch: &mut ZiRecordBatch, f: F)
where
    F: Fn(&mut ZiRecord) + Send + Sync,
{
    batch.iter_mut().for_each(f);
}

/// Boxed operator type produced by factories.
pub type ZiBoxedOperator = Box<dyn ZiOperator + Send + Sync>;

/// Factory signature used by the pipeline builder.
///
/// Factories receive the step's JSON config and the registry whose tables
/// the built operator will share.
pub type ZiOperatorFactory =
    fn(&serde_json::Value, &ZiDictionaryRegistry) -> Result<ZiBoxedOperator>;
