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

//! # Zi Food Error Module
//!
//! This module defines the error types used throughout the engine.
//!
//! ## Error Handling Philosophy
//!
//! Data-quality conditions (null fields, unmatched keywords, unresolved
//! locations, malformed additive entries, duplicate identifiers) are never
//! errors: they are handled locally by each stage and surface only as counts
//! in the coverage report. `ZiError` is reserved for structural failures:
//!
//! - **Schema**: the identifier column is absent from the whole table
//! - **Validation**: bad operator configuration or an invalid dictionary
//! - **Operator**: failures raised inside a stage, tagged with its name
//! - **Pipeline**: orchestration failures (empty pipeline, unknown operator)
//! - **Serde**: JSON/YAML/CSV decoding failures of configuration or bundled tables
//!
//! ## Usage
//!
//! ```rust
//! use zi_food::errors::{Result, ZiError};
//!
//! fn levels(n: usize) -> Result<usize> {
//!     if n == 0 {
//!         return Err(ZiError::validation("levels must be positive"));
//!     }
//!     Ok(n)
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum ZiError {
    /// Errors originating from reading an in-memory source.
    #[error("io error: {0}")]
    Io(String),

    /// Errors caused by malformed schema or incompatible table layout.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Any failure raised by an operator implementation.
    #[error("operator '{operator}' failed: {message}")]
    Operator { operator: String, message: String },

    /// Failures that occur while orchestrating a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ZiError {
    fn from(err: serde_yaml::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<csv::Error> for ZiError {
    fn from(err: csv::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        ZiError::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct operator errors.
    pub fn operator(name: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Operator {
            operator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ZiError::Internal(message.into())
    }

    /// Returns true when the error denotes a structural table problem.
    pub fn is_schema(&self) -> bool {
        matches!(self, ZiError::Schema { .. })
    }
}
