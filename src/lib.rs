// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;       // executor + factory implementations
pub mod config;         // config + runtime builder
pub mod descriptor;     // descriptor tree and unique ids
pub mod engine;         // discovery-and-execution of dynamic trees
pub mod errors;         // error handling
pub mod node;           // dynamic nodes and node streams
pub mod observability;
pub mod traits;         // collaborator seams
pub mod utils;
