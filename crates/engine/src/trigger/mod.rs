// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Triggers: sources of events that dispatch work to a worker pool

mod activation;
mod config;
mod factory;
mod job;

pub use activation::{Activation, SubmitError};
pub use config::{
    JobConfigError, JobConfiguration, DEFAULT_DISPATCH_TIMEOUT, DEFAULT_WORKER_ALLOCATOR_NAME,
    JOB_KIND,
};
pub use factory::JobTriggerFactory;
pub use job::JobTrigger;

use crate::error::TriggerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque resume marker a trigger may accept on start and hand back on stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint(pub String);

/// Lifecycle of a trigger
///
/// `Created -> Started -> Completed | Failed`; `Stopped` can be entered from
/// any state and is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    Created,
    Started,
    Completed,
    Failed,
    Stopped,
}

impl TriggerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerState::Created => "created",
            TriggerState::Started => "started",
            TriggerState::Completed => "completed",
            TriggerState::Failed => "failed",
            TriggerState::Stopped => "stopped",
        }
    }

    /// Whether the trigger has finished its work or been stopped
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TriggerState::Completed | TriggerState::Failed | TriggerState::Stopped
        )
    }
}

impl fmt::Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source of events the processor can start and stop
pub trait Trigger: Send + Sync {
    fn id(&self) -> &str;

    fn kind(&self) -> &str;

    fn name(&self) -> &str;

    fn state(&self) -> TriggerState;

    /// Begin producing events; must not block on the work itself
    fn start(&self, checkpoint: Option<Checkpoint>) -> Result<(), TriggerError>;

    /// Stop producing events, returning a checkpoint when the kind has one
    fn stop(&self, force: bool) -> Result<Option<Checkpoint>, TriggerError>;

    /// Effective configuration as a string-keyed map
    fn config(&self) -> serde_json::Map<String, serde_json::Value>;
}
