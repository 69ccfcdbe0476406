// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds job triggers from their definitions

use super::config::JobConfiguration;
use super::job::JobTrigger;
use super::Trigger;
use crate::allocator::WorkerAllocator;
use crate::error::FactoryError;
use crate::named::NamedAllocators;
use crate::registry::TriggerFactory;
use crate::runtime::RuntimeConfig;
use jt_config::TriggerDef;

/// Factory registered under the `job` kind
#[derive(Debug, Clone, Copy, Default)]
pub struct JobTriggerFactory;

impl TriggerFactory for JobTriggerFactory {
    fn create(
        &self,
        id: &str,
        def: &TriggerDef,
        runtime: &RuntimeConfig,
        allocators: &NamedAllocators,
    ) -> Result<Box<dyn Trigger>, FactoryError> {
        let configuration =
            JobConfiguration::new(id, def, runtime).map_err(|e| FactoryError::Config {
                trigger: def.name.clone(),
                source: Box::new(e),
            })?;

        let name = configuration.worker_allocator_name.clone();
        let allocator = allocators
            .get_or_create(&name, || {
                WorkerAllocator::from_factory(
                    name.as_str(),
                    configuration.num_workers,
                    runtime.worker_factory.as_ref(),
                )
            })
            .map_err(|source| FactoryError::Allocator {
                trigger: def.name.clone(),
                allocator: name.clone(),
                source,
            })?;

        if allocator.capacity() != configuration.num_workers {
            tracing::debug!(
                trigger = %def.name,
                allocator = %name,
                requested = configuration.num_workers,
                capacity = allocator.capacity(),
                "reusing existing worker allocator"
            );
        }

        tracing::debug!(trigger = %def.name, id, allocator = %name, "created job trigger");
        Ok(Box::new(JobTrigger::new(
            configuration,
            allocator,
            runtime.broker.clone(),
        )))
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
