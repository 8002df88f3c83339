// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::env;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use dynamic_tests::backends::{ExecutionRecord, FnTestFactory, TestOutcome};
use dynamic_tests::config::{load_and_validate_config, Config, RuntimeBuilder};
use dynamic_tests::descriptor::{DescriptorType, TestDescriptor, TestSource};
use dynamic_tests::engine::{FactoryRun, NodeOutcome};
use dynamic_tests::node::{factory_result, DynamicNode, FactoryResult, NodeStream};
use dynamic_tests::observability::init_tracing;
use dynamic_tests::traits::TestFactory;

const WORDS: [&str; 5] = ["racecar", "level", "rotor", "kayak", "madam"];

const LOG_LINES: &str =
    "GET /health 200\nPOST /orders 201\nGET /orders/7 404\nDELETE /orders/7 204";

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let json_output = args.iter().any(|a| a == "--json");
    let config_file = args.iter().skip(1).find(|a| !a.starts_with("--"));

    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [config.yaml|config.toml] [--json]", args[0]);
        eprintln!("Example: {} configs/sequential-ids.yaml", args[0]);
        eprintln!("Example: {} --json", args[0]);
        return;
    }

    let config = match config_file {
        Some(path) => match load_and_validate_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    init_tracing(config.log_filter.as_deref());

    let (engine, executor) = match RuntimeBuilder::from_config(&config) {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let start_time = Instant::now();
    let runs = engine.run_all(demo_factories()).await;
    let report = executor.report().await;

    if json_output {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("🌱 Dynamic Test Run");
    println!("═══════════════════════════════════");
    println!("Engine: {}", engine.root_id());
    println!("Unique ids: {:?}", config.unique_ids);
    println!();

    let by_id: HashMap<&str, &ExecutionRecord> = report
        .records
        .iter()
        .map(|record| (record.unique_id.as_str(), record))
        .collect();

    for run in &runs {
        print_factory(run, &by_id);
    }

    let failed_factories = runs.iter().filter(|run| !run.outcome.is_successful()).count();
    println!("{}", "─".repeat(80));
    println!(
        "📊 {} tests: {} passed, {} failed; {} containers; {} of {} factories failed",
        report.tests,
        report.succeeded,
        report.failed,
        report.containers,
        failed_factories,
        runs.len()
    );
    println!("⏱️  Total Time: {:?}", start_time.elapsed());

    if report.failed > 0 || failed_factories > 0 {
        std::process::exit(1);
    }
}

fn print_factory(run: &FactoryRun, by_id: &HashMap<&str, &ExecutionRecord>) {
    let marker = match &run.outcome {
        NodeOutcome::Successful => "✅".to_string(),
        NodeOutcome::Failed { error, .. } => format!("❌ {}", error),
    };
    println!("🏭 {} {}", run.descriptor.display_name(), marker);
    for child in run.descriptor.children() {
        print_descriptor(child, 1, by_id);
    }
    println!();
}

fn print_descriptor(
    descriptor: &TestDescriptor,
    depth: usize,
    by_id: &HashMap<&str, &ExecutionRecord>,
) {
    let indent = "   ".repeat(depth);
    let marker = match by_id.get(descriptor.unique_id().to_string().as_str()).map(|r| &r.outcome) {
        Some(TestOutcome::Successful) => "✓".to_string(),
        Some(TestOutcome::Failed { message }) => format!("✗ {}", message),
        None => "?".to_string(),
    };

    match descriptor.descriptor_type() {
        DescriptorType::Test => println!("{}• {} {}", indent, descriptor.display_name(), marker),
        DescriptorType::Container => {
            println!("{}📁 {}", indent, descriptor.display_name());
            for child in descriptor.children() {
                print_descriptor(child, depth + 1, by_id);
            }
        }
    }
}

fn demo<F, Fut>(name: &str, factory: F) -> (Arc<dyn TestFactory>, TestSource)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<FactoryResult>> + Send + 'static,
{
    (
        Arc::new(FnTestFactory::new(name, factory)),
        TestSource::new("demo", name),
    )
}

fn demo_factories() -> Vec<(Arc<dyn TestFactory>, TestSource)> {
    vec![
        demo("palindromes", || async {
            let nodes: Vec<DynamicNode> = WORDS
                .iter()
                .map(|word| {
                    DynamicNode::test_sync(format!("{} is a palindrome", word), move || {
                        anyhow::ensure!(
                            word.chars().eq(word.chars().rev()),
                            "{} reads differently backwards",
                            word
                        );
                        Ok(())
                    })
                })
                .collect();
            Ok(factory_result(nodes))
        }),
        demo("multiplication", || async {
            let rows = (1..=3).map(|a| {
                DynamicNode::container(
                    format!("row {}", a),
                    (1..=3).map(move |b| {
                        DynamicNode::test(format!("{} x {}", a, b), move || async move {
                            tokio::task::yield_now().await;
                            anyhow::ensure!((0..b).map(|_| a).sum::<i32>() == a * b);
                            Ok(())
                        })
                    }),
                )
            });
            let iter: Box<dyn Iterator<Item = DynamicNode> + Send> = Box::new(rows);
            Ok(factory_result(iter))
        }),
        demo("access_log", || async {
            let stream = NodeStream::new(LOG_LINES.lines().map(|line| {
                let line = line.to_string();
                DynamicNode::test_sync(line.clone(), move || {
                    let status: u16 = line.rsplit(' ').next().unwrap_or_default().parse()?;
                    anyhow::ensure!(status < 400, "status {} is an error", status);
                    Ok(())
                })
            }))
            .on_close(|| {
                tracing::info!("access log released");
                Ok(())
            });
            Ok(factory_result(stream))
        }),
        // Rejected: a lone node is not a sequence.
        demo("single_node", || async {
            Ok(factory_result(DynamicNode::test_sync("lonely", || Ok(()))))
        }),
    ]
}
