// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_ENGINE_ID;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure for the dynamic test engine.
///
/// Every field is optional; an empty file yields the same configuration as
/// [`Config::default`].
///
/// # Fields
/// * `engine_id` - Value of the root `[engine:...]` segment of every unique id
/// * `unique_ids` - How identifier tokens for dynamic nodes are generated
/// * `catch_panics` - Convert panics in factories and test actions into failures
/// * `log_filter` - Default tracing filter, overridden by `RUST_LOG`
///
/// # Example
/// ```yaml
/// engine_id: dynamic-tests
/// unique_ids: sequential
/// catch_panics: true
/// log_filter: "dynamic_tests=debug"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_engine_id")]
    pub engine_id: String,
    #[serde(default)]
    pub unique_ids: IdStrategy,
    #[serde(default = "default_catch_panics")]
    pub catch_panics: bool,
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_id: default_engine_id(),
            unique_ids: IdStrategy::default(),
            catch_panics: default_catch_panics(),
            log_filter: None,
        }
    }
}

fn default_engine_id() -> String {
    DEFAULT_ENGINE_ID.to_string()
}

fn default_catch_panics() -> bool {
    true
}

/// Token generation strategy for dynamic node identifiers.
///
/// # Variants
/// * `Random` - display name plus a random UUID (default)
/// * `Sequential` - display name plus a run-wide monotonic counter; deterministic across runs
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Random,
    Sequential,
}

/// Load configuration from a YAML (`.yaml`/`.yml`) or TOML (`.toml`) file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let config = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    Ok(config)
}

/// Load configuration from file and validate it.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let config = load_config(path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject settings that would make unique ids ambiguous.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let engine_id = config.engine_id.as_str();
    if engine_id.trim().is_empty() {
        return Err(ConfigError::InvalidEngineId {
            engine_id: engine_id.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if let Some(c) = engine_id.chars().find(|c| matches!(c, '[' | ']' | '/' | ':')) {
        return Err(ConfigError::InvalidEngineId {
            engine_id: engine_id.to_string(),
            reason: format!("must not contain '{}'", c),
        });
    }
    Ok(())
}
