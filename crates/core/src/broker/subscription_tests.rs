// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_kind_list_matches_everything() {
    let sub = Subscription::all("logger", "Logs every message");
    assert!(sub.matches(ControlMessageKind::Complete));
}

#[test]
fn explicit_kind_matches() {
    let sub = Subscription::new(
        "processor",
        vec![ControlMessageKind::Complete],
        "Waits for job completion",
    );
    assert!(sub.matches(ControlMessageKind::Complete));
}

#[test]
fn consumer_id_displays_inner_value() {
    let sub = Subscription::all("status-endpoint", "");
    assert_eq!(sub.id.to_string(), "status-endpoint");
}
