// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger definitions

use serde::{Deserialize, Serialize};

/// A trigger definition from the processor config
///
/// `attributes` stay opaque here; each trigger kind decodes its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDef {
    /// Trigger name (the key of its `[trigger.<name>]` table)
    #[serde(default)]
    pub name: String,
    /// Trigger kind, used to pick a factory
    pub kind: String,
    /// Name of the worker pool this trigger draws from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_allocator_name: Option<String>,
    /// Desired worker pool size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<usize>,
    /// Kind-specific settings
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl TriggerDef {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            worker_allocator_name: None,
            max_workers: None,
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    pub fn with_worker_allocator_name(mut self, name: impl Into<String>) -> Self {
        self.worker_allocator_name = Some(name.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}
