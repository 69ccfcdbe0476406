// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake workers for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Worker, WorkerError, WorkerFactory};
use async_trait::async_trait;
use jt_core::{Event, Reply, Response};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded worker call
#[derive(Debug, Clone)]
pub struct WorkerCall {
    pub worker: usize,
    pub event: Event,
}

/// What a fake worker does with every event
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Reply(Reply),
    SubmitError(String),
    ProcessError(String),
}

impl FakeOutcome {
    pub fn status(status_code: u16) -> Self {
        FakeOutcome::Reply(Reply::Response(Response::new(status_code)))
    }
}

#[derive(Default)]
struct FakeState {
    calls: Mutex<Vec<WorkerCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    created: AtomicUsize,
}

/// Counts one event in flight until dropped, including by cancellation
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize, high_water: &AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        high_water.fetch_max(now, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Fake worker; all workers from one factory share call records
#[derive(Clone)]
pub struct FakeWorker {
    index: usize,
    outcome: FakeOutcome,
    delay: Option<Duration>,
    state: Arc<FakeState>,
}

impl FakeWorker {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            outcome: FakeOutcome::status(200),
            delay: None,
            state: Arc::new(FakeState::default()),
        }
    }

    pub fn with_outcome(mut self, outcome: FakeOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WorkerCall> {
        self.state
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Worker for FakeWorker {
    fn index(&self) -> usize {
        self.index
    }

    async fn process_event(&self, event: &Event) -> Result<Reply, WorkerError> {
        self.state
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(WorkerCall {
                worker: self.index,
                event: event.clone(),
            });

        let in_flight = InFlight::enter(&self.state.in_flight, &self.state.max_in_flight);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        drop(in_flight);

        match &self.outcome {
            FakeOutcome::Reply(reply) => Ok(reply.clone()),
            FakeOutcome::SubmitError(message) => Err(WorkerError::Submit(message.clone())),
            FakeOutcome::ProcessError(message) => Err(WorkerError::Process(message.clone())),
        }
    }
}

/// Fake worker factory with scripted behavior
#[derive(Clone)]
pub struct FakeWorkerFactory {
    outcome: FakeOutcome,
    delay: Option<Duration>,
    fail_creation: bool,
    state: Arc<FakeState>,
}

impl Default for FakeWorkerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeWorkerFactory {
    pub fn new() -> Self {
        Self {
            outcome: FakeOutcome::status(200),
            delay: None,
            fail_creation: false,
            state: Arc::new(FakeState::default()),
        }
    }

    pub fn with_outcome(mut self, outcome: FakeOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Hold every event for `delay` before replying
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every `create_worker` call fail
    pub fn failing_creation(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    /// Get all recorded calls across every created worker
    pub fn calls(&self) -> Vec<WorkerCall> {
        self.state
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Highest number of events processed at the same time
    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    /// Events being processed right now
    pub fn in_flight(&self) -> usize {
        self.state.in_flight.load(Ordering::SeqCst)
    }

    /// Number of workers created so far
    pub fn created(&self) -> usize {
        self.state.created.load(Ordering::SeqCst)
    }
}

impl WorkerFactory for FakeWorkerFactory {
    fn runtime(&self) -> &str {
        "fake"
    }

    fn create_worker(&self, index: usize) -> Result<Arc<dyn Worker>, WorkerError> {
        if self.fail_creation {
            return Err(WorkerError::Create(format!("fake worker {} refused", index)));
        }
        self.state.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeWorker {
            index,
            outcome: self.outcome.clone(),
            delay: self.delay,
            state: Arc::clone(&self.state),
        }))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
