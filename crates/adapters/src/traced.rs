// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced worker wrappers for consistent observability

use crate::worker::{Worker, WorkerError, WorkerFactory};
use async_trait::async_trait;
use jt_core::{Event, Reply};
use std::sync::Arc;
use tracing::Instrument;

/// Wrapper that adds tracing to any Worker
#[derive(Clone)]
pub struct TracedWorker {
    inner: Arc<dyn Worker>,
}

impl TracedWorker {
    pub fn new(inner: Arc<dyn Worker>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Worker for TracedWorker {
    fn index(&self) -> usize {
        self.inner.index()
    }

    async fn process_event(&self, event: &Event) -> Result<Reply, WorkerError> {
        let span = tracing::info_span!(
            "worker.process",
            worker = self.inner.index(),
            method = %event.method,
            path = %event.path
        );

        async {
            tracing::debug!(body_len = event.body.len(), "processing");

            let start = std::time::Instant::now();
            let result = self.inner.process_event(event).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(Reply::Response(response)) => tracing::info!(
                    elapsed_ms,
                    status_code = response.status_code,
                    "processed"
                ),
                Ok(Reply::Raw(_)) => tracing::info!(elapsed_ms, "processed (untyped reply)"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "process failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that traces every worker a factory creates
#[derive(Clone)]
pub struct TracedWorkerFactory<F> {
    inner: F,
}

impl<F> TracedWorkerFactory<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: WorkerFactory> WorkerFactory for TracedWorkerFactory<F> {
    fn runtime(&self) -> &str {
        self.inner.runtime()
    }

    fn create_worker(&self, index: usize) -> Result<Arc<dyn Worker>, WorkerError> {
        match self.inner.create_worker(index) {
            Ok(worker) => {
                tracing::debug!(runtime = self.inner.runtime(), worker = index, "worker created");
                Ok(Arc::new(TracedWorker::new(worker)))
            }
            Err(e) => {
                tracing::error!(
                    runtime = self.inner.runtime(),
                    worker = index,
                    error = %e,
                    "worker creation failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
