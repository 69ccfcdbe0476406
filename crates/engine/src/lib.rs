// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Job trigger engine: worker pools, triggers and the factories that build them

mod allocator;
mod error;
mod named;
mod registry;
mod runtime;
pub mod trigger;

pub use allocator::{AllocationError, AllocatorError, AllocatorStats, WorkerAllocator, WorkerLease};
pub use error::{FactoryError, TriggerError};
pub use named::NamedAllocators;
pub use registry::{RegistryError, TriggerFactory, TriggerRegistry};
pub use runtime::{RuntimeConfig, RuntimeSummary};
pub use trigger::{
    Activation, Checkpoint, JobConfigError, JobConfiguration, JobTrigger, JobTriggerFactory,
    SubmitError, Trigger, TriggerState, DEFAULT_DISPATCH_TIMEOUT, DEFAULT_WORKER_ALLOCATOR_NAME,
    JOB_KIND,
};
