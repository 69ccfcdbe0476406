// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Function (runtime) definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The function every worker in the processor runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name
    pub name: String,
    /// Runtime kind that interprets the handler
    #[serde(default = "default_runtime")]
    pub runtime: String,
    /// Handler the runtime invokes for each event
    pub handler: String,
    /// Extra environment for the handler
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Working directory for the handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

fn default_runtime() -> String {
    "shell".to_string()
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runtime: default_runtime(),
            handler: handler.into(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }
}
