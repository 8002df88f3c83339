// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::node::FactoryResult;

/// A user-supplied producer of dynamic nodes.
///
/// The returned value is normalized by [`normalize`](crate::node::normalize); any shape it does
/// not accept fails the factory node.
#[async_trait]
pub trait TestFactory: Send + Sync {
    async fn invoke(&self) -> anyhow::Result<FactoryResult>;

    fn name(&self) -> &str;
}
