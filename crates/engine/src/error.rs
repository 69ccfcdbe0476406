// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for triggers and their factories

use crate::allocator::AllocatorError;
use crate::trigger::TriggerState;
use thiserror::Error;

/// Errors returned by trigger lifecycle calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("trigger {id} already started (state: {state})")]
    AlreadyStarted { id: String, state: TriggerState },
    #[error("trigger {id} needs a running tokio runtime to start")]
    NoRuntime { id: String },
}

/// Errors from building a trigger out of its definition
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("failed to parse configuration for trigger {trigger}")]
    Config {
        trigger: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to create worker allocator {allocator} for trigger {trigger}")]
    Allocator {
        trigger: String,
        allocator: String,
        #[source]
        source: AllocatorError,
    },
}
