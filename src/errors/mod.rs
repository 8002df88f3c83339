// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod dynamic;
mod shape;

pub use config::ConfigError;
pub use dynamic::DynamicTestError;
pub use shape::{ShapeError, TraversalError, ACCEPTED_SHAPES};
