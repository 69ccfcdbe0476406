//! Logging specs

use crate::prelude::*;

#[test]
fn logs_go_to_the_requested_file() {
    let project = Project::with_config(&single_job("cat > /dev/null"));

    project
        .jtp()
        .args(["--log-file", "logs/jtp.log"])
        .passes();

    let log = project.read("logs/jtp.log");
    assert!(log.contains("processor ready"), "log:\n{log}");
    assert!(log.contains("job completed"), "log:\n{log}");
}

#[test]
fn failures_are_logged_with_detail() {
    let project = Project::with_config(&single_job("echo boom >&2; exit 7"));

    project
        .jtp()
        .exits(1)
        .stderr_has("handler exited with code 7: boom");
}
