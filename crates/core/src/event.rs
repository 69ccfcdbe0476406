// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The unit of work a trigger dispatches and what a worker hands back

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status code a response must carry to count as a success
pub const STATUS_OK: u16 = 200;

/// A request-shaped unit of work dispatched to a worker
///
/// Built once from trigger configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

fn default_method() -> String {
    "POST".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

impl Event {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            body: String::new(),
            content_type: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new(default_method(), default_path())
    }
}

/// A structured response produced by a worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status_code: u16,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Response {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            body: String::new(),
            headers: BTreeMap::new(),
            content_type: None,
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(STATUS_OK).with_body(body)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Only an exact 200 counts; other 2xx codes are failures too
    pub fn is_ok(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// Whatever a worker returned for an event
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A typed response whose status code is inspected
    Response(Response),
    /// Any other value; never treated as a failure signal on its own
    Raw(serde_json::Value),
}

impl Reply {
    /// The typed response, if this reply carries one
    pub fn response(&self) -> Option<&Response> {
        match self {
            Reply::Response(response) => Some(response),
            Reply::Raw(_) => None,
        }
    }

    /// True when a typed response carries a non-200 status
    pub fn is_failure_status(&self) -> bool {
        self.response().is_some_and(|r| !r.is_ok())
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Reply::Response(response)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
