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

//! # Pipeline Orchestration
//!
//! [`ZiPipeline`] runs boxed operators in sequence. [`ZiPipelineBuilder`]
//! turns `{operator, config}` steps (JSON, or YAML with a `steps` list) into
//! a pipeline, sharing one [`ZiDictionaryRegistry`] across every stage it
//! builds. [`ZiFoodPipeline`] assembles the canonical cleaning order from a
//! [`ZiCleaningConfig`]:
//!
//! ```text
//! identifier.require → dedup.completeness → transform.normalize
//!   → classify.multilabel ×3 → geo.resolve ×2 → hierarchy.synthesize
//!   → flag.meat → additive.risk → flag.alcohol → count.ingredients
//!   → nutrient.clamp
//! ```

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::config::ZiCleaningConfig;
use crate::dictionary::{ZiDictionaryRegistry, ZiDomain};
use crate::errors::{Result, ZiError};
use crate::metrics::{ZiCoverageReport, ZiPipelineStageMetrics, ZiRunReport};
use crate::operator::{execute_operator, ZiBoxedOperator, ZiOperatorFactory};
use crate::operators;
use crate::record::ZiRecordBatch;

/// Linear pipeline of sequential operators.
pub struct ZiPipeline {
    stages: Vec<ZiBoxedOperator>,
}

impl ZiPipeline {
    pub fn new(stages: Vec<ZiBoxedOperator>) -> Self {
        ZiPipeline { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs the pipeline, passing the batch through each operator in turn.
    pub fn run(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        for stage in &self.stages {
            batch = execute_operator(stage.as_ref(), batch)?;
        }
        Ok(batch)
    }

    /// Runs the pipeline, reporting `(stage, records_in, records_out)`
    /// after each stage.
    pub fn run_with_progress(
        &self,
        mut batch: ZiRecordBatch,
        progress: impl Fn(&str, usize, usize),
    ) -> Result<ZiRecordBatch> {
        for stage in &self.stages {
            let before = batch.len();
            batch = execute_operator(stage.as_ref(), batch)?;
            progress(stage.name(), before, batch.len());
        }
        Ok(batch)
    }

    /// Ensures the pipeline contains at least one stage.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(ZiError::pipeline("pipeline", "no stages configured"));
        }
        Ok(())
    }

    /// Executes the pipeline and returns per-stage record counts.
    pub fn run_with_metrics(
        &self,
        mut batch: ZiRecordBatch,
    ) -> Result<(ZiRecordBatch, Vec<ZiPipelineStageMetrics>)> {
        let mut metrics = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            let records_in = batch.len();
            batch = execute_operator(stage.as_ref(), batch)?;
            metrics.push(ZiPipelineStageMetrics {
                stage: stage.name().to_string(),
                records_in,
                records_out: batch.len(),
            });
        }
        Ok((batch, metrics))
    }
}

impl std::fmt::Debug for ZiPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZiPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Builder that knows how to instantiate operators from configuration.
pub struct ZiPipelineBuilder {
    factories: HashMap<String, ZiOperatorFactory>,
    registry: ZiDictionaryRegistry,
}

impl ZiPipelineBuilder {
    /// Creates a builder with no registered operators.
    pub fn new(registry: ZiDictionaryRegistry) -> Self {
        ZiPipelineBuilder {
            factories: HashMap::new(),
            registry,
        }
    }

    /// Builder over the bundled dictionaries with every operator registered.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::with_registry(ZiDictionaryRegistry::builtin()?))
    }

    /// Builder over `registry` with every operator registered.
    pub fn with_registry(registry: ZiDictionaryRegistry) -> Self {
        let mut builder = Self::new(registry);
        builder.register_defaults();
        builder
    }

    /// Registers a factory for the given operator name.
    pub fn register(&mut self, name: impl Into<String>, factory: ZiOperatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn registry(&self) -> &ZiDictionaryRegistry {
        &self.registry
    }

    pub fn operator_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn register_defaults(&mut self) {
        self.register(
            "transform.normalize",
            operators::transform::transform_normalize_factory as ZiOperatorFactory,
        );
        self.register(
            "identifier.require",
            operators::dedup::identifier_require_factory as ZiOperatorFactory,
        );
        self.register(
            "dedup.completeness",
            operators::dedup::dedup_completeness_factory as ZiOperatorFactory,
        );
        self.register(
            "classify.multilabel",
            operators::classify::classify_multilabel_factory as ZiOperatorFactory,
        );
        self.register(
            "geo.resolve",
            operators::geo::geo_resolve_factory as ZiOperatorFactory,
        );
        self.register(
            "hierarchy.synthesize",
            operators::hierarchy::hierarchy_synthesize_factory as ZiOperatorFactory,
        );
        self.register(
            "additive.risk",
            operators::additive::additive_risk_factory as ZiOperatorFactory,
        );
        self.register(
            "flag.meat",
            operators::flags::flag_meat_factory as ZiOperatorFactory,
        );
        self.register(
            "flag.alcohol",
            operators::flags::flag_alcohol_factory as ZiOperatorFactory,
        );
        self.register(
            "count.ingredients",
            operators::flags::count_ingredients_factory as ZiOperatorFactory,
        );
        self.register(
            "nutrient.clamp",
            operators::flags::nutrient_clamp_factory as ZiOperatorFactory,
        );
    }

    /// Builds a pipeline from a sequence of configuration steps.
    pub fn build_from_config(&self, steps: &[Value]) -> Result<ZiPipeline> {
        let mut stages = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let object = step.as_object().ok_or_else(|| {
                ZiError::validation(format!("pipeline step #{index} must be an object"))
            })?;

            let operator_name = object
                .get("operator")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ZiError::validation(format!("pipeline step #{index} missing string 'operator'"))
                })?;

            let factory = self.factories.get(operator_name).ok_or_else(|| {
                ZiError::validation(format!("unknown operator '{operator_name}'"))
            })?;

            let config_value = match object.get("config") {
                None | Some(Value::Null) => json!({}),
                Some(value) => value.clone(),
            };
            let operator = factory(&config_value, &self.registry)?;
            stages.push(operator);
        }

        let pipeline = ZiPipeline::new(stages);
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Builds a pipeline from YAML: either a list of steps or a mapping with
    /// a `steps` list.
    pub fn build_from_yaml(&self, source: &str) -> Result<ZiPipeline> {
        let document: Value = serde_yaml::from_str(source)?;
        let steps = match document {
            Value::Array(steps) => steps,
            Value::Object(mut map) => match map.remove("steps") {
                Some(Value::Array(steps)) => steps,
                Some(_) => return Err(ZiError::validation("'steps' must be an array")),
                None => return Err(ZiError::validation("YAML pipeline requires a 'steps' list")),
            },
            _ => return Err(ZiError::validation("YAML pipeline must be an array or object")),
        };
        self.build_from_config(&steps)
    }
}

/// Canonical cleaning steps for `config`.
pub fn canonical_steps(config: &ZiCleaningConfig) -> Vec<Value> {
    let fields = &config.fields;
    let outputs = &config.outputs;
    let placeholders = &config.placeholders;

    let mut steps = vec![
        json!({"operator": "identifier.require", "config": {"column": config.identifier}}),
        json!({"operator": "dedup.completeness", "config": {"placeholders": placeholders}}),
        json!({"operator": "transform.normalize", "config": {"fields": fields.text_columns()}}),
    ];
    for domain in ZiDomain::ALL {
        steps.push(json!({
            "operator": "classify.multilabel",
            "config": {
                "domain": domain.as_str(),
                "sources": fields.domain_sources(domain),
                "prefix": outputs.domain_prefix(domain),
                "placeholders": placeholders,
            }
        }));
    }
    for (source, country, continent) in [
        (&fields.origin, &outputs.origin_country, &outputs.origin_continent),
        (
            &fields.manufacturing_place,
            &outputs.manufacturing_country,
            &outputs.manufacturing_continent,
        ),
    ] {
        steps.push(json!({
            "operator": "geo.resolve",
            "config": {
                "source": source,
                "country_column": country,
                "continent_column": continent,
                "border_bucket": config.geo.border_bucket,
                "aliases": config.geo.extra_aliases,
                "placeholders": placeholders,
            }
        }));
    }
    steps.extend([
        json!({
            "operator": "hierarchy.synthesize",
            "config": {
                "source": fields.categories,
                "levels": config.hierarchy.levels,
                "stoplist": config.hierarchy.stoplist,
                "prefix": config.hierarchy.prefix,
                "placeholders": placeholders,
            }
        }),
        json!({
            "operator": "flag.meat",
            "config": {
                "source": fields.categories,
                "product_name": fields.product_name,
                "meat_column": outputs.meat,
                "pork_column": outputs.pork,
                "placeholders": placeholders,
            }
        }),
        json!({
            "operator": "additive.risk",
            "config": {
                "source": fields.additives,
                "level_column": outputs.additive_level,
                "codes_column": outputs.additive_codes,
                "placeholders": placeholders,
            }
        }),
        json!({
            "operator": "flag.alcohol",
            "config": {"source": fields.alcohol, "column": outputs.alcohol}
        }),
        json!({
            "operator": "count.ingredients",
            "config": {
                "source": fields.ingredients,
                "column": outputs.ingredient_count,
                "placeholders": placeholders,
            }
        }),
        json!({
            "operator": "nutrient.clamp",
            "config": {
                "columns": config.clamp.columns,
                "min": config.clamp.min,
                "max": config.clamp.max,
            }
        }),
    ]);
    steps
}

/// The full cleaning run: canonical stages plus the coverage audit.
#[derive(Debug)]
pub struct ZiFoodPipeline {
    config: ZiCleaningConfig,
    registry: ZiDictionaryRegistry,
    pipeline: ZiPipeline,
}

impl ZiFoodPipeline {
    pub fn from_config(config: ZiCleaningConfig, registry: ZiDictionaryRegistry) -> Result<Self> {
        config.validate()?;
        let builder = ZiPipelineBuilder::with_registry(registry.clone());
        let pipeline = builder.build_from_config(&canonical_steps(&config))?;
        log::info!(
            "food pipeline ready: {} stages, dictionaries packaging v{}, allergen v{}, label v{}",
            pipeline.len(),
            registry.domain(ZiDomain::Packaging).version(),
            registry.domain(ZiDomain::Allergen).version(),
            registry.domain(ZiDomain::Label).version()
        );
        Ok(Self {
            config,
            registry,
            pipeline,
        })
    }

    /// Pipeline over the bundled dictionaries.
    pub fn builtin(config: ZiCleaningConfig) -> Result<Self> {
        Self::from_config(config, ZiDictionaryRegistry::builtin()?)
    }

    pub fn config(&self) -> &ZiCleaningConfig {
        &self.config
    }

    pub fn registry(&self) -> &ZiDictionaryRegistry {
        &self.registry
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.pipeline.stage_names()
    }

    pub fn run(&self, batch: ZiRecordBatch) -> Result<(ZiRecordBatch, ZiRunReport)> {
        let (out, stages) = self.pipeline.run_with_metrics(batch)?;
        let coverage = ZiCoverageReport::compute(&out, &self.config, &self.registry);
        for domain in &coverage.domains {
            if domain.unmatched > 0 {
                log::info!(
                    "{} domain: {} of {} observed records matched no category",
                    domain.domain,
                    domain.unmatched,
                    domain.observed
                );
            }
        }
        Ok((out, ZiRunReport { stages, coverage }))
    }
}
