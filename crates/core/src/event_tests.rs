// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn event_defaults_fill_missing_fields() {
    let event: Event = serde_json::from_str(r#"{"body": "hello"}"#).unwrap();

    assert_eq!(event.method, "POST");
    assert_eq!(event.path, "/");
    assert!(event.headers.is_empty());
    assert_eq!(event.body, "hello");
    assert_eq!(event.content_type, None);
}

#[test]
fn event_builder_sets_fields() {
    let event = Event::new("GET", "/status")
        .with_header("x-run", "1")
        .with_content_type("text/plain")
        .with_body("ping");

    assert_eq!(event.method, "GET");
    assert_eq!(event.path, "/status");
    assert_eq!(event.headers.get("x-run").map(String::as_str), Some("1"));
    assert_eq!(event.content_type.as_deref(), Some("text/plain"));
    assert_eq!(event.body, "ping");
}

#[parameterized(
    ok = { 200, true },
    created = { 201, false },
    not_found = { 404, false },
    server_error = { 500, false },
)]
fn response_is_ok_only_for_200(status: u16, expected: bool) {
    assert_eq!(Response::new(status).is_ok(), expected);
}

#[parameterized(
    typed_ok = { Reply::Response(Response::ok("done")), false },
    typed_not_found = { Reply::Response(Response::new(404)), true },
    raw_value = { Reply::Raw(serde_json::json!({"status_code": 500})), false },
    raw_null = { Reply::Raw(serde_json::Value::Null), false },
)]
fn reply_failure_status(reply: Reply, expected: bool) {
    assert_eq!(reply.is_failure_status(), expected);
}

#[test]
fn reply_from_response() {
    let reply: Reply = Response::ok("body").into();
    assert_eq!(reply.response().map(|r| r.body.as_str()), Some("body"));
}
