// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger kinds and the factories that build them

use crate::error::FactoryError;
use crate::named::NamedAllocators;
use crate::runtime::RuntimeConfig;
use crate::trigger::{JobTriggerFactory, Trigger, JOB_KIND};
use jt_config::TriggerDef;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Builds triggers of one kind
pub trait TriggerFactory: Send + Sync {
    fn create(
        &self,
        id: &str,
        def: &TriggerDef,
        runtime: &RuntimeConfig,
        allocators: &NamedAllocators,
    ) -> Result<Box<dyn Trigger>, FactoryError>;
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("trigger kind already registered: {0}")]
    AlreadyRegistered(String),
    #[error("unknown trigger kind: {0}")]
    UnknownKind(String),
    #[error(transparent)]
    Factory(#[from] FactoryError),
}

/// Maps trigger kinds to their factories
#[derive(Clone, Default)]
pub struct TriggerRegistry {
    factories: BTreeMap<String, Arc<dyn TriggerFactory>>,
}

impl TriggerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in trigger kind
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        if let Err(e) = registry.register_builtins() {
            tracing::warn!(error = %e, "built-in trigger kinds incomplete");
        }
        registry
    }

    /// Register every built-in trigger kind, stopping at the first conflict
    pub fn register_builtins(&mut self) -> Result<(), RegistryError> {
        for (kind, factory) in builtin_factories() {
            self.register(kind, factory)?;
        }
        Ok(())
    }

    pub fn register(
        &mut self,
        kind: impl Into<String>,
        factory: Arc<dyn TriggerFactory>,
    ) -> Result<(), RegistryError> {
        let kind = kind.into();
        if self.factories.contains_key(&kind) {
            return Err(RegistryError::AlreadyRegistered(kind));
        }
        tracing::debug!(kind = %kind, "registered trigger kind");
        self.factories.insert(kind, factory);
        Ok(())
    }

    /// Build a trigger with the factory registered for `def.kind`
    pub fn create(
        &self,
        id: &str,
        def: &TriggerDef,
        runtime: &RuntimeConfig,
        allocators: &NamedAllocators,
    ) -> Result<Box<dyn Trigger>, RegistryError> {
        let factory = self
            .factories
            .get(&def.kind)
            .ok_or_else(|| RegistryError::UnknownKind(def.kind.clone()))?;
        Ok(factory.create(id, def, runtime, allocators)?)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

impl std::fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Trigger kinds every processor ships with
fn builtin_factories() -> Vec<(&'static str, Arc<dyn TriggerFactory>)> {
    let job: Arc<dyn TriggerFactory> = Arc::new(JobTriggerFactory);
    vec![(JOB_KIND, job)]
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
