// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Mutex;

use crate::descriptor::TestDescriptor;
use crate::node::FactoryResult;
use crate::traits::{DynamicTestExecutor, TestFactory};

/// A factory that always fails before producing anything
pub struct FailingFactory {
    pub name: String,
}

impl FailingFactory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl TestFactory for FailingFactory {
    async fn invoke(&self) -> anyhow::Result<FactoryResult> {
        anyhow::bail!("simulated factory failure")
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An executor that records display names and breaks down on one chosen descriptor
pub struct BreakingExecutor {
    pub break_on: String,
    pub executed: Mutex<Vec<String>>,
}

impl BreakingExecutor {
    pub fn new(break_on: &str) -> Self {
        Self {
            break_on: break_on.to_string(),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl DynamicTestExecutor for BreakingExecutor {
    async fn execute(&self, descriptor: &TestDescriptor) -> anyhow::Result<()> {
        self.executed
            .lock()
            .unwrap()
            .push(descriptor.display_name().to_string());
        if descriptor.display_name() == self.break_on {
            anyhow::bail!("reporting channel closed");
        }
        Ok(())
    }
}
