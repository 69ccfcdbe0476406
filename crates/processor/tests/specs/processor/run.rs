//! Processor run specs
//!
//! Each job runs its handler once and the processor reports the outcome.

use crate::prelude::*;

#[test]
fn successful_job_exits_zero() {
    let project = Project::with_config(&single_job("cat > /dev/null"));

    project
        .jtp()
        .passes()
        .stdout_eq("completed: 1 ok, 0 failed");
}

#[test]
fn failing_handler_exits_one() {
    let project = Project::with_config(&single_job("exit 3"));

    project
        .jtp()
        .exits(1)
        .stdout_eq("completed: 0 ok, 1 failed");
}

#[test]
fn handler_receives_event_body_and_metadata() {
    let project = Project::with_config(&single_job(
        r#"cat > body.txt; printf '%s %s' "$JT_EVENT_METHOD" "$JT_EVENT_PATH" > meta.txt"#,
    ));

    project.jtp().passes();

    assert_eq!(project.read("body.txt"), "payload");
    assert_eq!(project.read("meta.txt"), "POST /run");
}

#[test]
fn function_env_reaches_the_handler() {
    let project = Project::with_config(
        r#"
[function]
name = "nightly"
handler = 'printf "$GREETING" > greeting.txt'
[function.env]
GREETING = "hi"

[trigger.once]
kind = "job"
[trigger.once.attributes.event]
body = ""
"#,
    );

    project.jtp().passes();

    assert_eq!(project.read("greeting.txt"), "hi");
}

#[test]
fn relative_cwd_is_resolved_against_the_config() {
    let project = Project::with_config(
        r#"
[function]
name = "nightly"
handler = 'pwd > here.txt'
cwd = "work"

[trigger.once]
kind = "job"
[trigger.once.attributes.event]
body = ""
"#,
    );
    project.file("work/.keep", "");

    project.jtp().passes();

    assert!(project.read("work/here.txt").trim_end().ends_with("work"));
}

#[test]
fn each_trigger_reports_once() {
    let project = Project::with_config(
        r#"
[function]
name = "nightly"
handler = 'test "$(cat)" = good'

[trigger.first]
kind = "job"
worker_allocator_name = "shared"
[trigger.first.attributes.event]
body = "good"

[trigger.second]
kind = "job"
worker_allocator_name = "shared"
[trigger.second.attributes.event]
body = "good"

[trigger.third]
kind = "job"
[trigger.third.attributes.event]
body = "bad"
"#,
    );

    project
        .jtp()
        .exits(1)
        .stdout_eq("completed: 2 ok, 1 failed");
}

#[test]
fn slow_handler_fails_at_the_job_timeout() {
    let project = Project::with_config(
        r#"
[function]
name = "nightly"
handler = "sleep 5"

[trigger.once]
kind = "job"
[trigger.once.attributes]
timeout = "200ms"
[trigger.once.attributes.event]
body = ""
"#,
    );

    project
        .jtp()
        .exits(1)
        .stdout_eq("completed: 0 ok, 1 failed");
}

#[test]
fn processor_gives_up_at_its_own_timeout() {
    let project = Project::with_config(&single_job("sleep 5"));

    project
        .jtp()
        .args(["--timeout", "200ms"])
        .exits(1)
        .stdout_eq("completed: 0 ok, 0 failed");
}
