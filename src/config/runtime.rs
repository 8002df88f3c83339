// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::RecordingExecutor;
use crate::config::{validate_config, Config};
use crate::engine::DynamicTestEngine;
use crate::errors::ConfigError;
use crate::traits::DynamicTestExecutor;

/// Engine runtime builder - validates configuration and wires the engine to its executor.
///
/// # Examples
///
/// ## Building runtime from configuration
/// ```
/// use dynamic_tests::config::{Config, IdStrategy, RuntimeBuilder};
///
/// let config = Config {
///     unique_ids: IdStrategy::Sequential,
///     ..Config::default()
/// };
///
/// let (engine, executor) = RuntimeBuilder::from_config(&config).unwrap();
///
/// assert_eq!(engine.root_id().to_string(), "[engine:dynamic-tests]");
/// # let _ = executor;
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build an engine backed by a [`RecordingExecutor`].
    ///
    /// Returns the engine and a handle to the executor so its report can be read after the run.
    pub fn from_config(
        cfg: &Config,
    ) -> Result<(DynamicTestEngine, Arc<RecordingExecutor>), ConfigError> {
        let executor = Arc::new(RecordingExecutor::new(cfg.catch_panics));
        let engine = Self::with_executor(cfg, executor.clone())?;
        Ok((engine, executor))
    }

    /// Build an engine that hands descriptors to a caller-supplied executor.
    pub fn with_executor(
        cfg: &Config,
        executor: Arc<dyn DynamicTestExecutor>,
    ) -> Result<DynamicTestEngine, ConfigError> {
        validate_config(cfg)?;
        Ok(DynamicTestEngine::new(cfg.clone(), executor))
    }
}
