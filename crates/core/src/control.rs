// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control messages published to the completion broker
//!
//! Each kind carries its own typed attributes. On the wire a message looks
//! like `{"kind": "complete", "attributes": {"status": true}}`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message kinds consumers can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMessageKind {
    Complete,
}

impl ControlMessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMessageKind::Complete => "complete",
        }
    }
}

impl fmt::Display for ControlMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured notification fanned out to every interested consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "attributes", rename_all = "snake_case")]
pub enum ControlMessage {
    /// A job activation finished.
    ///
    /// `status` is `true` when the activation FAILED. Consumers depend on
    /// this polarity, so it must not be flipped.
    Complete { status: bool },
}

impl ControlMessage {
    /// Completion message for an activation outcome
    pub fn complete(has_error: bool) -> Self {
        ControlMessage::Complete { status: has_error }
    }

    pub fn kind(&self) -> ControlMessageKind {
        match self {
            ControlMessage::Complete { .. } => ControlMessageKind::Complete,
        }
    }

    /// Whether the message reports a failed activation
    pub fn is_failure(&self) -> bool {
        match self {
            ControlMessage::Complete { status } => *status,
        }
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
