// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer registrations

use crate::control::ControlMessageKind;
use std::fmt;

/// Consumer handle for unsubscribing
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(pub String);

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A consumer's interest in control messages
///
/// An empty kind list matches every kind.
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: ConsumerId,
    pub kinds: Vec<ControlMessageKind>,
    pub description: String,
}

impl Subscription {
    pub fn new(
        id: impl Into<String>,
        kinds: Vec<ControlMessageKind>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ConsumerId(id.into()),
            kinds,
            description: description.into(),
        }
    }

    /// Subscribe to every message kind
    pub fn all(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(id, Vec::new(), description)
    }

    pub fn matches(&self, kind: ControlMessageKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
