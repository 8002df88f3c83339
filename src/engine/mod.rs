pub mod dynamic_engine;
pub mod factory_node;
pub mod failure_scope;
pub mod identity;
pub mod tree_builder;

pub use dynamic_engine::{DynamicTestEngine, FactoryRun};
pub use factory_node::TestFactoryDescriptor;
pub use failure_scope::{FailureScope, NodeOutcome};
pub use identity::IdentityAllocator;
pub use tree_builder::TreeBuilder;
