pub mod executor;
pub mod factory;

pub use executor::DynamicTestExecutor;
pub use factory::TestFactory;
