// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::Config;
use crate::descriptor::{TestSource, UniqueId};
use crate::engine::{IdentityAllocator, NodeOutcome, TestFactoryDescriptor};
use crate::traits::{DynamicTestExecutor, TestFactory};

/// Result of running one test factory: its populated dynamic tree and its own outcome.
#[derive(Debug)]
pub struct FactoryRun {
    pub descriptor: TestFactoryDescriptor,
    pub outcome: NodeOutcome,
}

/// Runs test factories against an executor.
///
/// Factories run one after another. Within a factory, dynamic nodes are expanded depth-first on
/// the calling task; whether anything runs concurrently is up to the executor.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use dynamic_tests::backends::{FnTestFactory, RecordingExecutor};
/// use dynamic_tests::config::Config;
/// use dynamic_tests::descriptor::TestSource;
/// use dynamic_tests::engine::DynamicTestEngine;
/// use dynamic_tests::node::{factory_result, DynamicNode};
///
/// # #[tokio::main]
/// # async fn main() {
/// let executor = Arc::new(RecordingExecutor::new(true));
/// let engine = DynamicTestEngine::new(Config::default(), executor.clone());
///
/// let factory = FnTestFactory::new("squares", || async {
///     let nodes: Vec<DynamicNode> = (1..=3)
///         .map(|n| DynamicNode::test_sync(format!("{n} squared"), move || {
///             anyhow::ensure!(n * n >= n);
///             Ok(())
///         }))
///         .collect();
///     Ok(factory_result(nodes))
/// });
///
/// let run = engine.run_factory(Arc::new(factory), TestSource::new("demo", "squares")).await;
/// assert!(run.outcome.is_successful());
/// assert_eq!(run.descriptor.children().len(), 3);
/// assert_eq!(executor.report().await.succeeded, 3);
/// # }
/// ```
pub struct DynamicTestEngine {
    config: Config,
    root: UniqueId,
    allocator: IdentityAllocator,
    executor: Arc<dyn DynamicTestExecutor>,
}

impl DynamicTestEngine {
    pub fn new(config: Config, executor: Arc<dyn DynamicTestExecutor>) -> Self {
        Self {
            root: UniqueId::for_engine(&config.engine_id),
            allocator: IdentityAllocator::new(config.unique_ids),
            config,
            executor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root_id(&self) -> &UniqueId {
        &self.root
    }

    /// Invoke `factory`, expanding and executing everything it produces.
    pub async fn run_factory(
        &self,
        factory: Arc<dyn TestFactory>,
        source: TestSource,
    ) -> FactoryRun {
        let mut descriptor = TestFactoryDescriptor::new(&self.root, factory, source);
        let outcome = descriptor
            .execute(&self.allocator, self.executor.as_ref(), self.config.catch_panics)
            .await;
        FactoryRun { descriptor, outcome }
    }

    /// Run each factory in order. A failing factory does not stop the ones after it.
    pub async fn run_all<I>(&self, factories: I) -> Vec<FactoryRun>
    where
        I: IntoIterator<Item = (Arc<dyn TestFactory>, TestSource)>,
    {
        let mut runs = Vec::new();
        for (factory, source) in factories {
            runs.push(self.run_factory(factory, source).await);
        }
        runs
    }
}
