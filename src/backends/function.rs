// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;

use crate::node::FactoryResult;
use crate::traits::TestFactory;

type FactoryFn = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<FactoryResult>> + Send + Sync>;

/// Test factory backed by a closure.
pub struct FnTestFactory {
    name: String,
    factory: FactoryFn,
}

impl FnTestFactory {
    pub fn new<F, Fut>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<FactoryResult>> + Send + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(move || factory().boxed()),
        }
    }
}

#[async_trait]
impl TestFactory for FnTestFactory {
    async fn invoke(&self) -> anyhow::Result<FactoryResult> {
        (self.factory)().await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
