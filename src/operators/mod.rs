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

//! # Operators Module
//!
//! The cleaning stages of the engine. Every stage is a [`ZiOperator`] built
//! by a factory from a JSON config object and the shared
//! [`ZiDictionaryRegistry`].
//!
//! ## Operator Categories
//!
//! - **transform**: text normalization (`transform.normalize`)
//! - **dedup**: identifier cleanup and completeness deduplication
//!   (`identifier.require`, `dedup.completeness`)
//! - **classify**: multi-label keyword classification (`classify.multilabel`)
//! - **geo**: country and continent resolution (`geo.resolve`)
//! - **hierarchy**: leveled category synthesis (`hierarchy.synthesize`)
//! - **additive**: additive risk scoring (`additive.risk`)
//! - **flags**: meat/pork and alcohol flags, ingredient counts and nutrient
//!   clamping (`flag.meat`, `flag.alcohol`, `count.ingredients`,
//!   `nutrient.clamp`)
//!
//! [`ZiOperator`]: crate::operator::ZiOperator
//! [`ZiDictionaryRegistry`]: crate::dictionary::ZiDictionaryRegistry

pub mod additive;
pub mod classify;
pub mod dedup;
pub mod flags;
pub mod geo;
pub mod hierarchy;
pub mod transform;

use serde_json::{Map, Value};

use crate::errors::{Result, ZiError};

pub(crate) fn config_object<'a>(config: &'a Value, operator: &str) -> Result<&'a Map<String, Value>> {
    config
        .as_object()
        .ok_or_else(|| ZiError::validation(format!("{operator} config must be object")))
}

pub(crate) fn required_str(obj: &Map<String, Value>, key: &str, operator: &str) -> Result<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ZiError::validation(format!("{operator} requires string '{key}'")))
}

pub(crate) fn optional_str(
    obj: &Map<String, Value>,
    key: &str,
    operator: &str,
) -> Result<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ZiError::validation(format!(
            "{operator} '{key}' must be a string"
        ))),
    }
}

pub(crate) fn string_list(
    obj: &Map<String, Value>,
    key: &str,
    operator: &str,
) -> Result<Option<Vec<String>>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ZiError::validation(format!("{operator} '{key}' must contain only strings"))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(ZiError::validation(format!(
            "{operator} '{key}' must be an array of strings"
        ))),
    }
}

pub(crate) fn optional_usize(
    obj: &Map<String, Value>,
    key: &str,
    operator: &str,
) -> Result<Option<usize>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| {
                ZiError::validation(format!("{operator} '{key}' must be a non-negative integer"))
            }),
    }
}

pub(crate) fn optional_f64(
    obj: &Map<String, Value>,
    key: &str,
    operator: &str,
) -> Result<Option<f64>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ZiError::validation(format!("{operator} '{key}' must be a number"))),
    }
}

pub(crate) fn optional_bool(
    obj: &Map<String, Value>,
    key: &str,
    operator: &str,
) -> Result<Option<bool>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(ZiError::validation(format!(
            "{operator} '{key}' must be a boolean"
        ))),
    }
}

/// Placeholder tokens from `placeholders`, or the defaults.
pub(crate) fn placeholders(obj: &Map<String, Value>, operator: &str) -> Result<Vec<String>> {
    Ok(string_list(obj, "placeholders", operator)?
        .map(|tokens| tokens.into_iter().map(|t| t.trim().to_lowercase()).collect())
        .unwrap_or_else(transform::default_placeholders))
}
