// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Processor lifecycle: build triggers, start them, collect completions, stop.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use jt_adapters::{CommandWorkerFactory, TracedWorkerFactory, WorkerFactory, COMMAND_RUNTIME};
use jt_config::{ConfigError, ProcessorConfig};
use jt_core::{ControlBroker, ControlMessage, ControlMessageKind, ControlReceiver, Subscription};
use jt_engine::{
    AllocatorStats, NamedAllocators, RegistryError, RuntimeConfig, Trigger, TriggerError,
    TriggerRegistry,
};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

/// Consumer id the processor listens on
pub const PROCESSOR_CONSUMER: &str = "processor";

/// Errors that stop the processor before any work is done
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unsupported runtime: {0} (expected {COMMAND_RUNTIME})")]
    UnsupportedRuntime(String),
    #[error("no triggers configured")]
    NoTriggers,
    #[error("failed to create trigger {trigger}")]
    Create {
        trigger: String,
        #[source]
        source: RegistryError,
    },
    #[error("failed to start trigger {trigger}")]
    Start {
        trigger: String,
        #[source]
        source: TriggerError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("log path has no file name: {0}")]
    BadLogPath(PathBuf),
}

/// Tally of completion messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub ok: usize,
    pub failed: usize,
    /// Triggers that never reported before the wait ended
    pub pending: usize,
}

impl Summary {
    pub fn succeeded(&self) -> bool {
        self.failed == 0 && self.pending == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "completed: {} ok, {} failed", self.ok, self.failed)
    }
}

/// Running processor state
pub struct Processor {
    triggers: Vec<Box<dyn Trigger>>,
    completions: ControlReceiver,
    allocators: NamedAllocators,
    summary: Summary,
}

/// Build the worker factory for the configured function
///
/// A relative `cwd` is resolved against `base_dir`.
pub fn worker_factory(
    config: &ProcessorConfig,
    base_dir: &Path,
) -> Result<Arc<dyn WorkerFactory>, LifecycleError> {
    let function = &config.function;
    if function.runtime != COMMAND_RUNTIME {
        return Err(LifecycleError::UnsupportedRuntime(function.runtime.clone()));
    }
    let cwd = function.cwd.as_ref().map(|cwd| base_dir.join(cwd));
    let factory = CommandWorkerFactory::new(function.handler.clone())
        .with_env(function.env.clone())
        .with_cwd(cwd);
    Ok(Arc::new(TracedWorkerFactory::new(factory)))
}

/// Create every configured trigger
///
/// The processor subscribes to completions before any trigger exists, so no
/// message can be missed.
pub fn startup(
    config: &ProcessorConfig,
    workers: Arc<dyn WorkerFactory>,
) -> Result<Processor, LifecycleError> {
    if config.triggers.is_empty() {
        return Err(LifecycleError::NoTriggers);
    }

    let broker = ControlBroker::new();
    let completions = broker.subscribe(Subscription::new(
        PROCESSOR_CONSUMER,
        vec![ControlMessageKind::Complete],
        "processor completion listener",
    ));
    let runtime = RuntimeConfig::new(config.function.name.clone(), broker, workers);
    let registry = TriggerRegistry::with_builtins();
    let allocators = NamedAllocators::new();

    let mut triggers = Vec::with_capacity(config.triggers.len());
    for (name, def) in &config.triggers {
        let trigger = registry
            .create(name, def, &runtime, &allocators)
            .map_err(|source| LifecycleError::Create {
                trigger: name.clone(),
                source,
            })?;
        triggers.push(trigger);
    }

    info!(
        function = %config.function.name,
        runtime = %runtime.runtime(),
        triggers = triggers.len(),
        allocators = ?allocators.names(),
        "processor ready"
    );

    let summary = Summary {
        pending: triggers.len(),
        ..Summary::default()
    };
    Ok(Processor {
        triggers,
        completions,
        allocators,
        summary,
    })
}

impl Processor {
    pub fn triggers(&self) -> &[Box<dyn Trigger>] {
        &self.triggers
    }

    /// Lifetime counters of every worker pool, sorted by pool name
    pub fn allocator_stats(&self) -> Vec<(String, AllocatorStats)> {
        self.allocators
            .names()
            .into_iter()
            .filter_map(|name| {
                let stats = self.allocators.get(&name)?.stats();
                Some((name, stats))
            })
            .collect()
    }

    /// Start every trigger
    pub fn start(&self) -> Result<(), LifecycleError> {
        for trigger in &self.triggers {
            trigger.start(None).map_err(|source| LifecycleError::Start {
                trigger: trigger.name().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Completions tallied so far
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Wait for one completion per trigger, or until `timeout` elapses
    ///
    /// Progress is kept on the processor, so a wait that is cancelled still
    /// leaves an accurate [`Processor::summary`].
    pub async fn wait(&mut self, timeout: Duration) -> Summary {
        let deadline = Instant::now() + timeout;
        let summary = &mut self.summary;

        while summary.pending > 0 {
            let message = match tokio::time::timeout_at(deadline, self.completions.recv()).await {
                Ok(Some(message)) => message,
                Ok(None) => break,
                Err(_) => {
                    warn!(pending = summary.pending, "timed out waiting for completions");
                    break;
                }
            };

            match message {
                ControlMessage::Complete { status: true } => summary.failed += 1,
                ControlMessage::Complete { status: false } => summary.ok += 1,
            }
            summary.pending -= 1;
            info!(
                failed = message.is_failure(),
                remaining = summary.pending,
                "job completion received"
            );
        }

        *summary
    }

    /// Stop every trigger; errors are logged, not returned
    pub fn shutdown(&self) {
        for trigger in &self.triggers {
            let state = trigger.state();
            match trigger.stop(false) {
                Ok(_) => info!(trigger = %trigger.name(), state = %state, "trigger stopped"),
                Err(e) => warn!(trigger = %trigger.name(), error = %e, "failed to stop trigger"),
            }
        }
        for (name, stats) in self.allocator_stats() {
            info!(
                allocator = %name,
                allocations = stats.allocations,
                releases = stats.releases,
                timeouts = stats.timeouts,
                "worker allocator closed"
            );
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
