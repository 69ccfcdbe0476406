//! Shared fixtures for processor specs

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Name of the config file every project writes
pub const CONFIG_FILE: &str = "processor.toml";

/// A scratch directory holding a processor config and handler outputs
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Project with `content` written as its processor config
    pub fn with_config(content: &str) -> Self {
        let project = Self::empty();
        project.file(CONFIG_FILE, content);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join(CONFIG_FILE)
    }

    pub fn file(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path().join(relative)).unwrap()
    }

    /// `jtp --config <project config>`
    pub fn jtp(&self) -> Cli {
        let mut cli = jtp();
        cli.cmd
            .current_dir(self.path())
            .arg("--config")
            .arg(self.config_path())
            .env("RUST_LOG", "info");
        cli
    }
}

/// Bare `jtp` invocation
pub fn jtp() -> Cli {
    Cli {
        cmd: Command::new(env!("CARGO_BIN_EXE_jtp")),
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    fn run(mut self) -> Run {
        Run {
            output: self.cmd.output().unwrap(),
        }
    }

    /// Run and expect exit code 0
    pub fn passes(self) -> Run {
        self.exits(0)
    }

    /// Run and expect a specific exit code
    pub fn exits(self, code: i32) -> Run {
        let run = self.run();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct Run {
    output: Output,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            predicate::str::contains(expected).eval(stdout.as_str()),
            "stdout missing {expected:?}\nstdout:\n{stdout}"
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout().trim_end(), expected);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            predicate::str::contains(expected).eval(stderr.as_str()),
            "stderr missing {expected:?}\nstderr:\n{stderr}"
        );
        self
    }
}

/// Config with one job trigger running `handler`
pub fn single_job(handler: &str) -> String {
    format!(
        r#"
[function]
name = "nightly"
handler = '''{handler}'''

[trigger.once]
kind = "job"
[trigger.once.attributes.event]
path = "/run"
body = "payload"
"#
    )
}
