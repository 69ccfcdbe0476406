// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide registry of named worker pools

use crate::allocator::WorkerAllocator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Named worker pools shared between triggers
///
/// Triggers that name the same allocator draw from one pool. Clones share
/// the same set of pools.
#[derive(Clone, Default)]
pub struct NamedAllocators {
    allocators: Arc<Mutex<HashMap<String, WorkerAllocator>>>,
}

impl NamedAllocators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pool called `name`, creating it with `create` on first use
    ///
    /// The lock is held across `create`, so concurrent first uses of a name
    /// build exactly one pool. A failed creation leaves nothing behind and
    /// the next caller tries again.
    pub fn get_or_create<F, E>(&self, name: &str, create: F) -> Result<WorkerAllocator, E>
    where
        F: FnOnce() -> Result<WorkerAllocator, E>,
    {
        let mut allocators = self.allocators.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = allocators.get(name) {
            return Ok(existing.clone());
        }

        let allocator = create()?;
        tracing::info!(
            allocator = %name,
            capacity = allocator.capacity(),
            "registered worker allocator"
        );
        allocators.insert(name.to_string(), allocator.clone());
        Ok(allocator)
    }

    pub fn get(&self, name: &str) -> Option<WorkerAllocator> {
        self.allocators
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    /// Registered pool names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .allocators
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.allocators
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "named_tests.rs"]
mod tests;
