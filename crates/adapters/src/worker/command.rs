// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command runtime
//!
//! Each event runs `sh -c <handler>`. The event body is written to stdin and
//! the event metadata is exported as `JT_EVENT_*` variables. Exit code 0
//! yields a 200 response carrying stdout; any other exit is a process error.

use super::{Worker, WorkerError, WorkerFactory};
use async_trait::async_trait;
use jt_core::{Event, Reply, Response};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runtime kind served by the command worker
pub const COMMAND_RUNTIME: &str = "shell";

/// Worker that runs a shell handler per event
#[derive(Clone, Debug)]
pub struct CommandWorker {
    index: usize,
    handler: String,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
}

impl CommandWorker {
    pub fn new(index: usize, handler: impl Into<String>) -> Self {
        Self {
            index,
            handler: handler.into(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_cwd(mut self, cwd: Option<PathBuf>) -> Self {
        self.cwd = cwd;
        self
    }

    fn command(&self, event: &Event) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(&self.handler)
            .envs(&self.env)
            .env("JT_EVENT_METHOD", &event.method)
            .env("JT_EVENT_PATH", &event.path)
            .env(
                "JT_EVENT_CONTENT_TYPE",
                event.content_type.as_deref().unwrap_or(""),
            )
            .env("JT_WORKER_INDEX", self.index.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for (name, value) in &event.headers {
            cmd.env(header_env_name(name), value);
        }
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

/// `x-run-id` becomes `JT_HEADER_X_RUN_ID`
fn header_env_name(name: &str) -> String {
    let suffix: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("JT_HEADER_{}", suffix)
}

#[async_trait]
impl Worker for CommandWorker {
    fn index(&self) -> usize {
        self.index
    }

    async fn process_event(&self, event: &Event) -> Result<Reply, WorkerError> {
        let mut child = self
            .command(event)
            .spawn()
            .map_err(|e| WorkerError::Submit(format!("failed to spawn handler: {}", e)))?;

        let stdin = child.stdin.take();
        let body = event.body.as_bytes();
        // Feed stdin while draining stdout so large bodies cannot deadlock
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(body).await {
                // Handlers that ignore stdin may exit before reading it
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        fed.map_err(|e| WorkerError::Submit(format!("failed to write event body: {}", e)))?;
        let output = output
            .map_err(|e| WorkerError::Submit(format!("failed to collect handler output: {}", e)))?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WorkerError::Process(format!(
                "handler exited with code {}: {}",
                code,
                stderr.trim()
            )));
        }

        let mut response = Response::ok(String::from_utf8_lossy(&output.stdout).into_owned());
        response.content_type = Some("text/plain".to_string());
        Ok(Reply::Response(response))
    }
}

/// Creates command workers sharing one handler definition
#[derive(Clone, Debug)]
pub struct CommandWorkerFactory {
    handler: String,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
}

impl CommandWorkerFactory {
    pub fn new(handler: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_cwd(mut self, cwd: Option<PathBuf>) -> Self {
        self.cwd = cwd;
        self
    }
}

impl WorkerFactory for CommandWorkerFactory {
    fn runtime(&self) -> &str {
        COMMAND_RUNTIME
    }

    fn create_worker(&self, index: usize) -> Result<Arc<dyn Worker>, WorkerError> {
        if self.handler.trim().is_empty() {
            return Err(WorkerError::Create("handler is empty".to_string()));
        }
        Ok(Arc::new(
            CommandWorker::new(index, self.handler.clone())
                .with_env(self.env.clone())
                .with_cwd(self.cwd.clone()),
        ))
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
