// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workers: execution contexts that process one event at a time

mod command;

pub use command::{CommandWorker, CommandWorkerFactory, COMMAND_RUNTIME};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOutcome, FakeWorker, FakeWorkerFactory, WorkerCall};

use async_trait::async_trait;
use jt_core::{Event, Reply};
use std::sync::Arc;
use thiserror::Error;

/// Errors from handing an event to a worker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    /// The event never reached the handler
    #[error("submit failed: {0}")]
    Submit(String),
    /// The handler ran and reported a failure
    #[error("process failed: {0}")]
    Process(String),
    /// The worker could not be created
    #[error("worker creation failed: {0}")]
    Create(String),
}

/// An execution context that accepts one event and produces a reply
///
/// Exclusive use is enforced by whoever hands the worker out; a worker never
/// sees two events at once.
#[async_trait]
pub trait Worker: Send + Sync + 'static {
    /// Position of this worker inside its pool
    fn index(&self) -> usize;

    /// Process a single event
    async fn process_event(&self, event: &Event) -> Result<Reply, WorkerError>;
}

/// Creates the workers that populate a pool
pub trait WorkerFactory: Send + Sync + 'static {
    /// Runtime kind the created workers run
    fn runtime(&self) -> &str;

    fn create_worker(&self, index: usize) -> Result<Arc<dyn Worker>, WorkerError>;
}
