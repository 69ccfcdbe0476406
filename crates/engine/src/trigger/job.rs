// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-shot job trigger
//!
//! On start the trigger dispatches its configured event exactly once to a
//! worker from its pool, then publishes one `complete` control message
//! carrying whether the activation failed. The steps run strictly in order:
//! acquire, submit, release, publish.

use super::activation::{Activation, SubmitError};
use super::config::JobConfiguration;
use super::{Checkpoint, Trigger, TriggerState};
use crate::allocator::WorkerAllocator;
use crate::error::TriggerError;
use jt_adapters::WorkerError;
use jt_core::{ControlBroker, ControlMessage};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use tracing::Instrument;

/// Trigger that runs its event once per start
#[derive(Clone)]
pub struct JobTrigger {
    inner: Arc<JobInner>,
}

struct JobInner {
    configuration: Arc<JobConfiguration>,
    allocator: WorkerAllocator,
    broker: ControlBroker,
    state: Mutex<TriggerState>,
}

impl JobTrigger {
    pub fn new(
        configuration: JobConfiguration,
        allocator: WorkerAllocator,
        broker: ControlBroker,
    ) -> Self {
        Self {
            inner: Arc::new(JobInner {
                configuration: Arc::new(configuration),
                allocator,
                broker,
                state: Mutex::new(TriggerState::Created),
            }),
        }
    }

    pub fn configuration(&self) -> &JobConfiguration {
        &self.inner.configuration
    }

    pub fn allocator(&self) -> &WorkerAllocator {
        &self.inner.allocator
    }
}

impl Trigger for JobTrigger {
    fn id(&self) -> &str {
        &self.inner.configuration.id
    }

    fn kind(&self) -> &str {
        &self.inner.configuration.kind
    }

    fn name(&self) -> &str {
        &self.inner.configuration.name
    }

    fn state(&self) -> TriggerState {
        *self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn start(&self, _checkpoint: Option<Checkpoint>) -> Result<(), TriggerError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| TriggerError::NoRuntime {
            id: self.id().to_string(),
        })?;

        {
            let mut state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
            if *state != TriggerState::Created {
                return Err(TriggerError::AlreadyStarted {
                    id: self.id().to_string(),
                    state: *state,
                });
            }
            *state = TriggerState::Started;
        }

        tracing::info!(
            trigger = %self.name(),
            allocator = %self.inner.allocator.name(),
            "starting job"
        );
        let inner = Arc::clone(&self.inner);
        handle.spawn(async move { inner.run().await });
        Ok(())
    }

    fn stop(&self, force: bool) -> Result<Option<Checkpoint>, TriggerError> {
        let mut state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
        tracing::debug!(trigger = %self.name(), from = %*state, force, "stopping job");
        *state = TriggerState::Stopped;
        Ok(None)
    }

    fn config(&self) -> serde_json::Map<String, serde_json::Value> {
        self.inner.configuration.to_map()
    }
}

impl JobInner {
    async fn run(&self) {
        let span = tracing::info_span!(
            "job.activation",
            trigger = %self.configuration.name,
            allocator = %self.allocator.name(),
        );

        async {
            let start = std::time::Instant::now();
            let activation = self.dispatch().await;
            let has_error = activation.has_error();
            let elapsed_ms = start.elapsed().as_millis() as u64;

            if let Some(error) = &activation.submit_error {
                tracing::error!(error = %error, elapsed_ms, "failed to submit event");
            } else if let Some(error) = &activation.process_error {
                tracing::warn!(error = %error, elapsed_ms, "handler failed");
            } else if has_error {
                tracing::warn!(
                    status_code = ?activation.status_code(),
                    elapsed_ms,
                    "handler replied with a failure status"
                );
            } else {
                tracing::info!(status_code = ?activation.status_code(), elapsed_ms, "job completed");
            }

            self.finish(has_error);
            let delivered = self
                .broker
                .send_to_consumers(&ControlMessage::complete(has_error));
            tracing::debug!(delivered, status = has_error, "published completion");
        }
        .instrument(span)
        .await
    }

    /// Acquire a worker, process the event, and release the worker
    async fn dispatch(&self) -> Activation {
        let timeout = self.configuration.timeout;
        let deadline = Instant::now() + timeout;

        let lease = match self.allocator.allocate(timeout).await {
            Ok(lease) => lease,
            Err(error) => return Activation::submit_failed(error),
        };
        let worker = lease.worker().index();
        tracing::debug!(worker, "worker allocated");

        // Lease moves into the task; aborting the task drops it
        let configuration = Arc::clone(&self.configuration);
        let mut task = tokio::spawn(async move {
            let result = lease.worker().process_event(&configuration.event).await;
            lease.release();
            result
        });

        let joined = match tokio::time::timeout_at(deadline, &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                task.abort();
                // Wait for the abort to drop the lease before publishing
                let _ = task.await;
                return Activation::submit_failed(SubmitError::Timeout { timeout });
            }
        };

        match joined {
            Ok(Ok(reply)) => Activation::replied(reply),
            Ok(Err(WorkerError::Process(message))) => Activation::process_failed(message),
            Ok(Err(error)) => Activation::submit_failed(SubmitError::Worker(error.to_string())),
            Err(error) => Activation::submit_failed(SubmitError::Aborted(error.to_string())),
        }
    }

    /// Record the final state unless the trigger was stopped meanwhile
    fn finish(&self, has_error: bool) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state == TriggerState::Started {
            *state = if has_error {
                TriggerState::Failed
            } else {
                TriggerState::Completed
            };
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
