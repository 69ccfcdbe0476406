//! CLI help specs

use crate::prelude::*;

#[test]
fn help_lists_options() {
    jtp()
        .args(["--help"])
        .passes()
        .stdout_has("--config")
        .stdout_has("--log-file")
        .stdout_has("--timeout");
}

#[test]
fn config_is_required() {
    jtp().exits(2).stderr_has("--config");
}

#[test]
fn bad_timeout_is_rejected() {
    jtp()
        .args(["--config", "processor.toml", "--timeout", "soon"])
        .exits(2)
        .stderr_has("--timeout");
}
