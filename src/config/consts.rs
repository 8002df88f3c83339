/// Segment type of the engine root
pub const ENGINE_SEGMENT_TYPE: &str = "engine";
/// Segment type of a test factory node
pub const FACTORY_SEGMENT_TYPE: &str = "test-factory";
/// Segment type of a dynamic test
pub const DYNAMIC_TEST_SEGMENT_TYPE: &str = "dynamic-test";
/// Segment type of a dynamic container
pub const DYNAMIC_CONTAINER_SEGMENT_TYPE: &str = "dynamic-container";
/// Engine id used when the configuration does not name one
pub const DEFAULT_ENGINE_ID: &str = "dynamic-tests";
/// Tracing filter used when neither `RUST_LOG` nor the configuration sets one
pub const DEFAULT_LOG_FILTER: &str = "info";
