// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded worker pool
//!
//! A pool owns a fixed set of workers and hands each one to at most one
//! caller at a time. A semaphore carries one permit per idle worker; a caller
//! holding a permit is guaranteed to find a worker on the idle list.

use jt_adapters::{Worker, WorkerError, WorkerFactory};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

/// Errors from building a pool
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocatorError {
    #[error("worker allocator {name} must have at least one worker")]
    EmptyPool { name: String },
    #[error("failed to create worker {index} for allocator {name}")]
    Worker {
        name: String,
        index: usize,
        #[source]
        source: WorkerError,
    },
}

/// Errors from asking a pool for a worker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Nothing free and the caller would not wait
    #[error("no free worker in allocator {pool}")]
    PoolExhausted { pool: String },
    /// Nothing became free before the deadline
    #[error("timed out after {timeout:?} waiting for a worker from allocator {pool}")]
    Timeout { pool: String, timeout: Duration },
    #[error("worker allocator {pool} is closed")]
    Closed { pool: String },
}

/// Counters for a pool's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocatorStats {
    pub allocations: u64,
    pub releases: u64,
    pub timeouts: u64,
}

struct Pool {
    name: String,
    capacity: usize,
    permits: Arc<Semaphore>,
    idle: Mutex<Vec<Arc<dyn Worker>>>,
    allocations: AtomicU64,
    releases: AtomicU64,
    timeouts: AtomicU64,
}

impl Pool {
    fn give_back(&self, worker: Arc<dyn Worker>) {
        self.idle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(worker);
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// A fixed-size pool of workers shared by any number of triggers
///
/// Cheap to clone; clones hand out workers from the same pool.
#[derive(Clone)]
pub struct WorkerAllocator {
    pool: Arc<Pool>,
}

impl WorkerAllocator {
    /// Build a pool from already created workers
    pub fn new(
        name: impl Into<String>,
        workers: Vec<Arc<dyn Worker>>,
    ) -> Result<Self, AllocatorError> {
        let name = name.into();
        if workers.is_empty() {
            return Err(AllocatorError::EmptyPool { name });
        }
        let capacity = workers.len();
        tracing::debug!(allocator = %name, capacity, "worker allocator created");
        Ok(Self {
            pool: Arc::new(Pool {
                name,
                capacity,
                permits: Arc::new(Semaphore::new(capacity)),
                idle: Mutex::new(workers),
                allocations: AtomicU64::new(0),
                releases: AtomicU64::new(0),
                timeouts: AtomicU64::new(0),
            }),
        })
    }

    /// Build a pool of `size` workers created by `factory`
    pub fn from_factory(
        name: impl Into<String>,
        size: usize,
        factory: &dyn WorkerFactory,
    ) -> Result<Self, AllocatorError> {
        let name = name.into();
        if size == 0 {
            return Err(AllocatorError::EmptyPool { name });
        }
        let workers = (0..size)
            .map(|index| {
                factory
                    .create_worker(index)
                    .map_err(|source| AllocatorError::Worker {
                        name: name.clone(),
                        index,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, workers)
    }

    pub fn name(&self) -> &str {
        &self.pool.name
    }

    /// Total number of workers in the pool
    pub fn capacity(&self) -> usize {
        self.pool.capacity
    }

    /// Workers free right now
    pub fn available(&self) -> usize {
        self.pool.permits.available_permits()
    }

    /// Workers currently leased out
    pub fn checked_out(&self) -> usize {
        self.pool.capacity.saturating_sub(self.available())
    }

    pub fn stats(&self) -> AllocatorStats {
        AllocatorStats {
            allocations: self.pool.allocations.load(Ordering::SeqCst),
            releases: self.pool.releases.load(Ordering::SeqCst),
            timeouts: self.pool.timeouts.load(Ordering::SeqCst),
        }
    }

    /// Take a worker, waiting at most `timeout` for one to become free
    ///
    /// A free worker is returned immediately even with a zero timeout. With a
    /// zero timeout and nothing free this fails with
    /// [`AllocationError::PoolExhausted`]; otherwise an elapsed wait fails
    /// with [`AllocationError::Timeout`]. Failures are never retried here.
    pub async fn allocate(&self, timeout: Duration) -> Result<WorkerLease, AllocationError> {
        let permit = match Arc::clone(&self.pool.permits).try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::Closed) => return Err(self.closed()),
            Err(TryAcquireError::NoPermits) if timeout.is_zero() => {
                self.pool.timeouts.fetch_add(1, Ordering::SeqCst);
                return Err(AllocationError::PoolExhausted {
                    pool: self.pool.name.clone(),
                });
            }
            Err(TryAcquireError::NoPermits) => {
                let acquire = Arc::clone(&self.pool.permits).acquire_owned();
                match tokio::time::timeout(timeout, acquire).await {
                    Ok(Ok(permit)) => permit,
                    Ok(Err(_)) => return Err(self.closed()),
                    Err(_) => {
                        self.pool.timeouts.fetch_add(1, Ordering::SeqCst);
                        return Err(AllocationError::Timeout {
                            pool: self.pool.name.clone(),
                            timeout,
                        });
                    }
                }
            }
        };

        let worker = self
            .pool
            .idle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop();
        // Permits track idle workers one to one
        let Some(worker) = worker else {
            return Err(AllocationError::PoolExhausted {
                pool: self.pool.name.clone(),
            });
        };

        self.pool.allocations.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(allocator = %self.pool.name, worker = worker.index(), "worker allocated");
        Ok(WorkerLease {
            worker,
            permit: Some(permit),
            pool: Arc::clone(&self.pool),
        })
    }

    fn closed(&self) -> AllocationError {
        AllocationError::Closed {
            pool: self.pool.name.clone(),
        }
    }
}

impl fmt::Debug for WorkerAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerAllocator")
            .field("name", &self.pool.name)
            .field("capacity", &self.pool.capacity)
            .field("available", &self.available())
            .finish()
    }
}

/// Exclusive use of one worker
///
/// The worker goes back to its pool exactly once: on [`WorkerLease::release`]
/// or when the lease is dropped, whichever comes first.
pub struct WorkerLease {
    worker: Arc<dyn Worker>,
    permit: Option<OwnedSemaphorePermit>,
    pool: Arc<Pool>,
}

impl WorkerLease {
    pub fn worker(&self) -> &dyn Worker {
        self.worker.as_ref()
    }

    /// Return the worker to its pool
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for WorkerLease {
    fn drop(&mut self) {
        // Worker must be idle again before its permit is visible to waiters
        self.pool.give_back(Arc::clone(&self.worker));
        drop(self.permit.take());
        tracing::trace!(allocator = %self.pool.name, worker = self.worker.index(), "worker released");
    }
}

impl fmt::Debug for WorkerLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerLease")
            .field("allocator", &self.pool.name)
            .field("worker", &self.worker.index())
            .finish()
    }
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;
