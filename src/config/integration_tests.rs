#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;

    use crate::backends::FnTestFactory;
    use crate::config::{load_and_validate_config, Config, IdStrategy, RuntimeBuilder};
    use crate::descriptor::TestSource;
    use crate::node::{factory_result, DynamicNode};

    /// The shipped YAML configuration selects deterministic identifiers
    #[test]
    fn test_sequential_ids_yaml_loading() {
        let config = load_and_validate_config("configs/sequential-ids.yaml").unwrap();

        assert_eq!(config.engine_id, "dynamic-tests");
        assert_eq!(config.unique_ids, IdStrategy::Sequential);
        assert!(config.catch_panics);
        assert_eq!(config.log_filter.as_deref(), Some("dynamic_tests=debug"));
    }

    /// The shipped TOML configuration is equivalent to running without one
    #[test]
    fn test_defaults_toml_loading() {
        let config = load_and_validate_config("configs/defaults.toml").unwrap();

        assert_eq!(config, Config::default());
    }

    /// A runtime built from a loaded configuration produces counter-suffixed ids
    #[tokio::test]
    async fn test_runtime_from_loaded_config() {
        let config = load_and_validate_config("configs/sequential-ids.yaml").unwrap();
        let (engine, executor) = RuntimeBuilder::from_config(&config).unwrap();

        let factory = FnTestFactory::new("config_check", || async {
            Ok(factory_result(vec![
                DynamicNode::test_sync("first", || Ok(())),
                DynamicNode::test_sync("second", || Ok(())),
            ]))
        });
        let run = engine
            .run_factory(Arc::new(factory), TestSource::new("config", "config_check"))
            .await;

        assert!(run.outcome.is_successful());
        let tokens: Vec<&str> = run
            .descriptor
            .children()
            .iter()
            .map(|d| d.unique_id().last_segment().value())
            .collect();
        let counters: Vec<u64> = tokens
            .iter()
            .map(|token| token.rsplit('#').next().unwrap().parse().unwrap())
            .collect();
        assert!(tokens[0].starts_with("first#"));
        assert!(tokens[1].starts_with("second#"));
        assert_eq!(counters[1], counters[0] + 1);
        assert_eq!(executor.report().await.succeeded, 2);
    }
}
