// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config file extension for {path}; expected .yaml, .yml or .toml")]
    UnsupportedFormat { path: PathBuf },

    /// The engine id would produce ambiguous unique ids.
    #[error("invalid engine_id '{engine_id}': {reason}")]
    InvalidEngineId { engine_id: String, reason: String },
}
