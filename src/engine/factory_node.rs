// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::config::consts::FACTORY_SEGMENT_TYPE;
use crate::descriptor::{
    collect_descendants, push_child, DescriptorParent, DescriptorType, TestDescriptor, TestSource,
    UniqueId,
};
use crate::engine::failure_scope::{FailureScope, NodeOutcome};
use crate::engine::{IdentityAllocator, TreeBuilder};
use crate::errors::DynamicTestError;
use crate::node::normalize;
use crate::observability::messages::{engine::*, StructuredLog};
use crate::traits::{DynamicTestExecutor, TestFactory};

/// Descriptor of a test factory.
///
/// To the surrounding engine a factory node is a container that certainly has tests, yet it is
/// planned as a single opaque unit of work: its dynamic children only exist once
/// [`execute`](Self::execute) has run.
pub struct TestFactoryDescriptor {
    unique_id: UniqueId,
    factory: Arc<dyn TestFactory>,
    source: TestSource,
    children: Vec<TestDescriptor>,
}

impl TestFactoryDescriptor {
    pub fn new(parent: &UniqueId, factory: Arc<dyn TestFactory>, source: TestSource) -> Self {
        Self {
            unique_id: parent.append(FACTORY_SEGMENT_TYPE, factory.name()),
            factory,
            source,
            children: Vec::new(),
        }
    }

    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    pub fn display_name(&self) -> &str {
        self.factory.name()
    }

    pub fn source(&self) -> &TestSource {
        &self.source
    }

    pub fn descriptor_type(&self) -> DescriptorType {
        DescriptorType::Container
    }

    pub fn has_tests(&self) -> bool {
        true
    }

    /// The planner treats a factory as one unit of work; its shape is unknown until it runs.
    pub fn is_leaf(&self) -> bool {
        true
    }

    /// Top-level dynamic descriptors, in production order.
    pub fn children(&self) -> &[TestDescriptor] {
        &self.children
    }

    /// Every dynamic descriptor in pre-order.
    pub fn descendants(&self) -> Vec<&TestDescriptor> {
        let mut out = Vec::new();
        collect_descendants(&self.children, &mut out);
        out
    }

    /// Invoke the factory and expand its result, executing each dynamic node as it is
    /// discovered.
    ///
    /// Any failure that escapes invocation or expansion becomes this node's outcome; dynamic
    /// descriptors attached before the failure stay in the tree with whatever result the
    /// executor recorded for them.
    pub async fn execute(
        &mut self,
        allocator: &IdentityAllocator,
        executor: &dyn DynamicTestExecutor,
        catch_panics: bool,
    ) -> NodeOutcome {
        let factory_name = self.factory.name().to_string();
        let unique_id = self.unique_id.to_string();
        let started = FactoryInvocationStarted {
            factory: &factory_name,
            unique_id: &unique_id,
        };
        let span = started.span("test_factory");
        started.log();

        let start_time = Instant::now();
        let mut scope = FailureScope::new(factory_name.as_str(), catch_panics);
        scope
            .run(self.invoke_and_expand(allocator, executor))
            .instrument(span)
            .await;

        let descriptor_count = self.descendants().len();
        if let Some(error) = scope.failure() {
            FactoryExpansionFailed {
                factory: &factory_name,
                kind: error.kind(),
                descriptor_count,
                error,
            }
            .log();
        } else {
            FactoryExpansionCompleted {
                factory: &factory_name,
                descriptor_count,
                duration: start_time.elapsed(),
            }
            .log();
        }

        scope.into_outcome()
    }

    async fn invoke_and_expand(
        &mut self,
        allocator: &IdentityAllocator,
        executor: &dyn DynamicTestExecutor,
    ) -> Result<(), DynamicTestError> {
        let factory = Arc::clone(&self.factory);
        let raw = factory
            .invoke()
            .await
            .map_err(|cause| DynamicTestError::FactoryInvocation {
                factory: factory.name().to_string(),
                cause,
            })?;

        let nodes = normalize(raw).map_err(|cause| DynamicTestError::InvalidFactoryResult {
            factory: factory.name().to_string(),
            cause,
        })?;

        let source = self.source.clone();
        let builder = TreeBuilder::new(factory.name(), &source, allocator, executor);
        builder.expand_all(self, nodes).await
    }
}

impl DescriptorParent for TestFactoryDescriptor {
    fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    fn add_child(&mut self, child: TestDescriptor) -> &TestDescriptor {
        push_child(&mut self.children, child)
    }
}

impl std::fmt::Debug for TestFactoryDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestFactoryDescriptor")
            .field("unique_id", &self.unique_id.to_string())
            .field("factory", &self.factory.name())
            .field("children", &self.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::FailingFactory;
    use crate::backends::RecordingExecutor;
    use crate::config::IdStrategy;

    fn factory_descriptor() -> TestFactoryDescriptor {
        TestFactoryDescriptor::new(
            &UniqueId::for_engine("e"),
            Arc::new(FailingFactory::new("generated")),
            TestSource::new("tests", "generated"),
        )
    }

    #[test]
    fn test_factory_node_presents_as_leaf_container_with_tests() {
        let descriptor = factory_descriptor();

        assert_eq!(descriptor.descriptor_type(), DescriptorType::Container);
        assert!(descriptor.has_tests());
        assert!(descriptor.is_leaf());
        assert!(descriptor.children().is_empty());
        assert_eq!(
            descriptor.unique_id().to_string(),
            "[engine:e]/[test-factory:generated]"
        );
    }

    #[tokio::test]
    async fn test_presentation_is_unchanged_after_execution() {
        let mut descriptor = factory_descriptor();
        let allocator = IdentityAllocator::new(IdStrategy::Sequential);
        let executor = RecordingExecutor::default();

        let outcome = descriptor.execute(&allocator, &executor, true).await;

        assert!(matches!(
            outcome.error(),
            Some(DynamicTestError::FactoryInvocation { .. })
        ));
        assert_eq!(descriptor.descriptor_type(), DescriptorType::Container);
        assert!(descriptor.has_tests());
        assert!(descriptor.is_leaf());
    }
}
