// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Processor TOML parsing

use crate::{FunctionDef, TriggerDef};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading processor config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// A parsed processor config
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorConfig {
    pub function: FunctionDef,
    pub triggers: BTreeMap<String, TriggerDef>,
}

impl ProcessorConfig {
    /// Get a trigger definition by name
    pub fn get_trigger(&self, name: &str) -> Option<&TriggerDef> {
        self.triggers.get(name)
    }
}

/// Read and parse a processor config file
pub fn load_config(path: &Path) -> Result<ProcessorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

/// Parse a processor config from TOML content
pub fn parse_config(content: &str) -> Result<ProcessorConfig, ConfigError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| ConfigError::InvalidFormat("root must be a table".to_string()))?;

    let function = table
        .get("function")
        .ok_or_else(|| ConfigError::MissingField("function".to_string()))
        .and_then(parse_function)?;

    let mut triggers = BTreeMap::new();
    if let Some(value) = table.get("trigger") {
        let entries = value
            .as_table()
            .ok_or_else(|| ConfigError::InvalidFormat("trigger must be a table".to_string()))?;
        for (name, value) in entries {
            let trigger = parse_trigger(name, value)?;
            triggers.insert(name.clone(), trigger);
        }
    }

    Ok(ProcessorConfig { function, triggers })
}

fn parse_function(value: &toml::Value) -> Result<FunctionDef, ConfigError> {
    let table = value
        .as_table()
        .ok_or_else(|| ConfigError::InvalidFormat("function must be a table".to_string()))?;

    for field in ["name", "handler"] {
        if !table.contains_key(field) {
            return Err(ConfigError::MissingField(format!("function.{}", field)));
        }
    }

    let function: FunctionDef = value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::InvalidFormat(format!("function: {}", e)))?;

    if function.handler.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "function.handler".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(function)
}

fn parse_trigger(name: &str, value: &toml::Value) -> Result<TriggerDef, ConfigError> {
    let table = value
        .as_table()
        .ok_or_else(|| ConfigError::InvalidFormat(format!("trigger.{} must be a table", name)))?;

    if !table.contains_key("kind") {
        return Err(ConfigError::MissingField(format!("trigger.{}.kind", name)));
    }

    let mut trigger: TriggerDef = value.clone().try_into().map_err(|e: toml::de::Error| {
        ConfigError::InvalidFormat(format!("trigger.{}: {}", name, e))
    })?;
    trigger.name = name.to_string();

    if trigger.max_workers == Some(0) {
        return Err(ConfigError::InvalidValue {
            field: format!("trigger.{}.max_workers", name),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(trigger)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
