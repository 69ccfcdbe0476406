// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job trigger configuration

use crate::runtime::{RuntimeConfig, RuntimeSummary};
use jt_config::TriggerDef;
use jt_core::Event;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Registry kind served by the job trigger
pub const JOB_KIND: &str = "job";

/// How long an activation may take, allocation included, when unset
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Pool used by triggers that do not name one
pub const DEFAULT_WORKER_ALLOCATOR_NAME: &str = "default";

/// Errors decoding a job trigger definition
#[derive(Debug, Error)]
pub enum JobConfigError {
    #[error("invalid job attributes: {0}")]
    InvalidAttributes(#[from] serde_json::Error),
    #[error("missing job attribute: {0}")]
    MissingAttribute(&'static str),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Kind-specific attributes of a job trigger
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobAttributes {
    #[serde(default)]
    event: Option<Event>,
    #[serde(default, with = "humantime_serde")]
    timeout: Option<Duration>,
}

/// Fully resolved configuration of one job trigger
///
/// Built once by the factory and never mutated, so it can be read from any
/// thread while the activation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobConfiguration {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub worker_allocator_name: String,
    pub num_workers: usize,
    /// The single event this trigger dispatches
    pub event: Event,
    /// Deadline shared by worker allocation and processing
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub runtime: RuntimeSummary,
}

impl JobConfiguration {
    pub fn new(
        id: impl Into<String>,
        def: &TriggerDef,
        runtime: &RuntimeConfig,
    ) -> Result<Self, JobConfigError> {
        let attributes: JobAttributes =
            serde_json::from_value(serde_json::Value::Object(def.attributes.clone()))?;
        let event = attributes
            .event
            .ok_or(JobConfigError::MissingAttribute("event"))?;

        let num_workers = def.max_workers.unwrap_or(1);
        if num_workers == 0 {
            return Err(JobConfigError::InvalidValue {
                field: "max_workers",
                reason: "must be at least 1".to_string(),
            });
        }

        let worker_allocator_name = match def.worker_allocator_name.as_deref() {
            None => DEFAULT_WORKER_ALLOCATOR_NAME.to_string(),
            Some("") => {
                return Err(JobConfigError::InvalidValue {
                    field: "worker_allocator_name",
                    reason: "must not be empty".to_string(),
                })
            }
            Some(name) => name.to_string(),
        };

        Ok(Self {
            id: id.into(),
            name: def.name.clone(),
            kind: def.kind.clone(),
            worker_allocator_name,
            num_workers,
            event,
            timeout: attributes.timeout.unwrap_or(DEFAULT_DISPATCH_TIMEOUT),
            runtime: runtime.summary(),
        })
    }

    /// Flatten into a string-keyed map
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
