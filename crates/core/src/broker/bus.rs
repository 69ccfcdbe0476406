// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Broker routing control messages to consumers

use super::subscription::{ConsumerId, Subscription};
use crate::control::ControlMessage;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Sender for control message delivery
pub type ControlSender = mpsc::UnboundedSender<ControlMessage>;
/// Receiver for control message delivery
pub type ControlReceiver = mpsc::UnboundedReceiver<ControlMessage>;

/// The broker fans control messages out to every matching consumer
///
/// Clones share the same consumer set, so one broker can be handed to every
/// trigger in a runtime scope.
pub struct ControlBroker {
    consumers: Arc<RwLock<HashMap<ConsumerId, (Subscription, ControlSender)>>>,
}

impl ControlBroker {
    pub fn new() -> Self {
        Self {
            consumers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a consumer for future messages
    ///
    /// Messages sent before this call are not replayed. Subscribing an id
    /// that is already registered replaces the previous registration.
    pub fn subscribe(&self, subscription: Subscription) -> ControlReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = subscription.id.clone();

        tracing::debug!(consumer = %id, kinds = ?subscription.kinds, "consumer subscribed");

        let mut consumers = self.consumers.write().unwrap_or_else(|e| e.into_inner());
        consumers.insert(id, (subscription, tx));

        rx
    }

    /// Remove a consumer
    pub fn unsubscribe(&self, id: &ConsumerId) {
        let mut consumers = self.consumers.write().unwrap_or_else(|e| e.into_inner());
        if consumers.remove(id).is_some() {
            tracing::debug!(consumer = %id, "consumer unsubscribed");
        }
    }

    /// Deliver a message to every current consumer interested in its kind
    ///
    /// The message is enqueued for each consumer before this returns.
    /// Consumers whose receiver has been dropped are pruned. Returns the
    /// number of consumers the message was delivered to.
    pub fn send_to_consumers(&self, message: &ControlMessage) -> usize {
        let kind = message.kind();
        let mut delivered = 0;
        let mut closed = Vec::new();

        {
            let consumers = self.consumers.read().unwrap_or_else(|e| e.into_inner());
            for (id, (subscription, tx)) in consumers.iter() {
                if !subscription.matches(kind) {
                    continue;
                }
                if tx.send(message.clone()).is_ok() {
                    delivered += 1;
                } else {
                    closed.push(id.clone());
                }
            }
        }

        if !closed.is_empty() {
            let mut consumers = self.consumers.write().unwrap_or_else(|e| e.into_inner());
            for id in &closed {
                consumers.remove(id);
            }
            tracing::debug!(pruned = closed.len(), "dropped closed consumers");
        }

        tracing::debug!(%kind, delivered, "control message sent");
        delivered
    }

    /// Get count of registered consumers
    pub fn consumer_count(&self) -> usize {
        self.consumers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// List all consumer IDs
    pub fn list_consumers(&self) -> Vec<ConsumerId> {
        let mut ids: Vec<ConsumerId> = self
            .consumers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl Default for ControlBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ControlBroker {
    fn clone(&self) -> Self {
        Self {
            consumers: Arc::clone(&self.consumers),
        }
    }
}

impl std::fmt::Debug for ControlBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlBroker")
            .field("consumers", &self.list_consumers())
            .finish()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
