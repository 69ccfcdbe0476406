// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of a single job activation

use crate::allocator::AllocationError;
use jt_core::Reply;
use std::time::Duration;
use thiserror::Error;

/// The event never got processed to completion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("failed to allocate worker: {0}")]
    Allocation(#[from] AllocationError),
    #[error("worker did not finish within {timeout:?}")]
    Timeout { timeout: Duration },
    #[error("{0}")]
    Worker(String),
    #[error("worker task aborted: {0}")]
    Aborted(String),
}

/// What happened when a trigger dispatched its event
///
/// Only [`Activation::has_error`] leaves the trigger; the details are logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activation {
    pub reply: Option<Reply>,
    pub submit_error: Option<SubmitError>,
    pub process_error: Option<String>,
}

impl Activation {
    pub fn replied(reply: Reply) -> Self {
        Self {
            reply: Some(reply),
            ..Self::default()
        }
    }

    pub fn submit_failed(error: impl Into<SubmitError>) -> Self {
        Self {
            submit_error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn process_failed(message: impl Into<String>) -> Self {
        Self {
            process_error: Some(message.into()),
            ..Self::default()
        }
    }

    /// True on a submit error, a process error, or a typed non-200 reply
    pub fn has_error(&self) -> bool {
        self.submit_error.is_some()
            || self.process_error.is_some()
            || self.reply.as_ref().is_some_and(Reply::is_failure_status)
    }

    /// Status code of a typed reply
    pub fn status_code(&self) -> Option<u16> {
        self.reply
            .as_ref()
            .and_then(Reply::response)
            .map(|r| r.status_code)
    }
}

#[cfg(test)]
#[path = "activation_tests.rs"]
mod tests;
