// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a trigger factory gets to know about the function it serves

use jt_adapters::WorkerFactory;
use jt_core::ControlBroker;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Runtime context handed to every trigger factory
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Name of the function the triggers invoke
    pub function_name: String,
    /// Where completion messages are published
    pub broker: ControlBroker,
    /// Creates the workers behind each pool
    pub worker_factory: Arc<dyn WorkerFactory>,
}

impl RuntimeConfig {
    pub fn new(
        function_name: impl Into<String>,
        broker: ControlBroker,
        worker_factory: Arc<dyn WorkerFactory>,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            broker,
            worker_factory,
        }
    }

    /// Runtime kind of the workers this function runs on
    pub fn runtime(&self) -> &str {
        self.worker_factory.runtime()
    }

    pub(crate) fn summary(&self) -> RuntimeSummary {
        RuntimeSummary {
            function_name: self.function_name.clone(),
            runtime: self.runtime().to_string(),
        }
    }
}

impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("function_name", &self.function_name)
            .field("runtime", &self.runtime())
            .field("consumers", &self.broker.consumer_count())
            .finish()
    }
}

/// Serializable slice of the runtime context kept on a trigger's configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeSummary {
    pub function_name: String,
    pub runtime: String,
}
