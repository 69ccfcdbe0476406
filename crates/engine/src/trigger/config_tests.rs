// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jt_adapters::FakeWorkerFactory;
use jt_core::ControlBroker;
use serde_json::json;
use std::sync::Arc;
use yare::parameterized;

fn runtime() -> RuntimeConfig {
    RuntimeConfig::new(
        "hello",
        ControlBroker::new(),
        Arc::new(FakeWorkerFactory::new()),
    )
}

fn job_def() -> TriggerDef {
    TriggerDef::new("nightly", JOB_KIND).with_attribute("event", json!({"body": "payload"}))
}

#[test]
fn defaults_are_applied() {
    let config = JobConfiguration::new("t1", &job_def(), &runtime()).unwrap();

    assert_eq!(config.id, "t1");
    assert_eq!(config.name, "nightly");
    assert_eq!(config.kind, "job");
    assert_eq!(config.worker_allocator_name, DEFAULT_WORKER_ALLOCATOR_NAME);
    assert_eq!(config.num_workers, 1);
    assert_eq!(config.timeout, DEFAULT_DISPATCH_TIMEOUT);
    assert_eq!(config.event, Event::default().with_body("payload"));
    assert_eq!(config.runtime.function_name, "hello");
    assert_eq!(config.runtime.runtime, "fake");
}

#[test]
fn explicit_settings_win() {
    let def = job_def()
        .with_max_workers(3)
        .with_worker_allocator_name("shared")
        .with_attribute("timeout", json!("1m 30s"));

    let config = JobConfiguration::new("t1", &def, &runtime()).unwrap();

    assert_eq!(config.num_workers, 3);
    assert_eq!(config.worker_allocator_name, "shared");
    assert_eq!(config.timeout, Duration::from_secs(90));
}

#[test]
fn missing_event_is_reported() {
    let def = TriggerDef::new("nightly", JOB_KIND);

    let err = JobConfiguration::new("t1", &def, &runtime()).unwrap_err();

    assert!(matches!(err, JobConfigError::MissingAttribute("event")));
}

#[parameterized(
    bad_timeout = { json!({"event": {}, "timeout": "soon"}) },
    numeric_timeout = { json!({"event": {}, "timeout": 10}) },
    unknown_attribute = { json!({"event": {}, "interval": "1s"}) },
    event_not_a_table = { json!({"event": "payload"}) },
)]
fn malformed_attributes_are_rejected(attributes: serde_json::Value) {
    let mut def = TriggerDef::new("nightly", JOB_KIND);
    if let serde_json::Value::Object(map) = attributes {
        def.attributes = map;
    }

    let err = JobConfiguration::new("t1", &def, &runtime()).unwrap_err();

    assert!(matches!(err, JobConfigError::InvalidAttributes(_)), "{err:?}");
}

#[test]
fn zero_workers_is_rejected() {
    let err = JobConfiguration::new("t1", &job_def().with_max_workers(0), &runtime()).unwrap_err();

    assert!(matches!(
        err,
        JobConfigError::InvalidValue {
            field: "max_workers",
            ..
        }
    ));
}

#[test]
fn empty_allocator_name_is_rejected() {
    let def = job_def().with_worker_allocator_name("");

    let err = JobConfiguration::new("t1", &def, &runtime()).unwrap_err();

    assert!(matches!(
        err,
        JobConfigError::InvalidValue {
            field: "worker_allocator_name",
            ..
        }
    ));
}

#[test]
fn flattens_to_a_string_keyed_map() {
    let def = job_def().with_attribute("timeout", json!("250ms"));
    let map = JobConfiguration::new("t1", &def, &runtime())
        .unwrap()
        .to_map();

    assert_eq!(map.get("id"), Some(&json!("t1")));
    assert_eq!(map.get("kind"), Some(&json!("job")));
    assert_eq!(map.get("worker_allocator_name"), Some(&json!("default")));
    assert_eq!(map.get("num_workers"), Some(&json!(1)));
    assert_eq!(map.get("timeout"), Some(&json!("250ms")));
    assert_eq!(map["event"]["body"], json!("payload"));
    assert_eq!(map["runtime"]["function_name"], json!("hello"));
}
