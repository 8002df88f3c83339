// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use futures::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::descriptor::{DescriptorKind, DescriptorType, TestDescriptor};
use crate::observability::messages::{node::*, StructuredLog};
use crate::traits::DynamicTestExecutor;
use crate::utils::panic_message;

/// Outcome of executing one dynamic descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    Successful,
    Failed { message: String },
}

impl TestOutcome {
    pub fn is_successful(&self) -> bool {
        matches!(self, TestOutcome::Successful)
    }
}

/// What the executor saw for one descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRecord {
    pub unique_id: String,
    pub display_name: String,
    pub descriptor_type: DescriptorType,
    pub outcome: TestOutcome,
    pub duration_ms: u64,
}

/// Summary of everything a [`RecordingExecutor`] has executed.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub records: Vec<ExecutionRecord>,
    pub tests: usize,
    pub containers: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ExecutionReport {
    fn from_records(records: Vec<ExecutionRecord>) -> Self {
        let tests = records
            .iter()
            .filter(|r| r.descriptor_type == DescriptorType::Test)
            .count();
        let failed = records
            .iter()
            .filter(|r| r.descriptor_type == DescriptorType::Test && !r.outcome.is_successful())
            .count();

        Self {
            containers: records.len() - tests,
            succeeded: tests - failed,
            tests,
            failed,
            records,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Executor that runs each dynamic test's action inline and records every descriptor it is
/// handed, in execution order.
///
/// Containers have no action of their own; executing one only records it. A failing or
/// panicking test is recorded as failed and never reported back to the engine as an error,
/// so its siblings keep running.
pub struct RecordingExecutor {
    catch_panics: bool,
    records: Mutex<Vec<ExecutionRecord>>,
}

impl RecordingExecutor {
    pub fn new(catch_panics: bool) -> Self {
        Self {
            catch_panics,
            records: Mutex::new(Vec::new()),
        }
    }

    pub async fn records(&self) -> Vec<ExecutionRecord> {
        self.records.lock().await.clone()
    }

    pub async fn report(&self) -> ExecutionReport {
        ExecutionReport::from_records(self.records().await)
    }

    async fn run_test(&self, descriptor: &TestDescriptor) -> TestOutcome {
        let Some(executable) = descriptor.executable() else {
            return TestOutcome::Successful;
        };

        let result = if self.catch_panics {
            match AssertUnwindSafe(executable.call()).catch_unwind().await {
                Ok(result) => result.map_err(|e| format!("{:#}", e)),
                Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
            }
        } else {
            executable.call().await.map_err(|e| format!("{:#}", e))
        };

        match result {
            Ok(()) => TestOutcome::Successful,
            Err(message) => TestOutcome::Failed { message },
        }
    }
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl DynamicTestExecutor for RecordingExecutor {
    async fn execute(&self, descriptor: &TestDescriptor) -> anyhow::Result<()> {
        let start_time = Instant::now();
        let outcome = match descriptor.kind() {
            DescriptorKind::Test(_) => self.run_test(descriptor).await,
            DescriptorKind::Container => TestOutcome::Successful,
        };
        let duration = start_time.elapsed();

        if descriptor.descriptor_type() == DescriptorType::Test {
            match &outcome {
                TestOutcome::Successful => DynamicTestPassed {
                    display_name: descriptor.display_name(),
                    duration,
                }
                .log(),
                TestOutcome::Failed { message } => DynamicTestFailed {
                    display_name: descriptor.display_name(),
                    unique_id: &descriptor.unique_id().to_string(),
                    reason: message,
                }
                .log(),
            }
        }

        self.records.lock().await.push(ExecutionRecord {
            unique_id: descriptor.unique_id().to_string(),
            display_name: descriptor.display_name().to_string(),
            descriptor_type: descriptor.descriptor_type(),
            outcome,
            duration_ms: duration.as_millis() as u64,
        });
        Ok(())
    }
}
