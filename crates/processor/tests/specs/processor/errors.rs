//! Startup error specs
//!
//! Anything that stops the processor before a trigger starts exits with 2.

use crate::prelude::*;

#[test]
fn missing_config_file() {
    let project = Project::empty();

    project.jtp().exits(2).stderr_has("processor.toml");
}

#[test]
fn malformed_toml() {
    let project = Project::with_config("[function\nname = ");

    project.jtp().exits(2).stderr_has("error:");
}

#[test]
fn missing_handler() {
    let project = Project::with_config("[function]\nname = \"nightly\"\n");

    project
        .jtp()
        .exits(2)
        .stderr_has("missing required field: function.handler");
}

#[test]
fn unknown_trigger_kind() {
    let project = Project::with_config(
        r#"
[function]
name = "nightly"
handler = "cat"

[trigger.tick]
kind = "cron"
"#,
    );

    project
        .jtp()
        .exits(2)
        .stderr_has("unknown trigger kind: cron");
}

#[test]
fn job_without_event() {
    let project = Project::with_config(
        r#"
[function]
name = "nightly"
handler = "cat"

[trigger.once]
kind = "job"
"#,
    );

    project
        .jtp()
        .exits(2)
        .stderr_has("missing job attribute: event");
}

#[test]
fn unsupported_runtime() {
    let project = Project::with_config(
        r#"
[function]
name = "nightly"
runtime = "python"
handler = "main:handler"

[trigger.once]
kind = "job"
[trigger.once.attributes.event]
body = ""
"#,
    );

    project
        .jtp()
        .exits(2)
        .stderr_has("unsupported runtime: python");
}

#[test]
fn no_triggers() {
    let project = Project::with_config("[function]\nname = \"nightly\"\nhandler = \"cat\"\n");

    project.jtp().exits(2).stderr_has("no triggers configured");
}
