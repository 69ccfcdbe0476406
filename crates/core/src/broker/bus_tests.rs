// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::control::ControlMessageKind;

#[tokio::test]
async fn send_reaches_every_consumer() {
    let broker = ControlBroker::new();

    let mut first = broker.subscribe(Subscription::all("first", "First"));
    let mut second = broker.subscribe(Subscription::new(
        "second",
        vec![ControlMessageKind::Complete],
        "Second",
    ));

    let delivered = broker.send_to_consumers(&ControlMessage::complete(false));

    assert_eq!(delivered, 2);
    assert_eq!(first.try_recv().unwrap(), ControlMessage::complete(false));
    assert_eq!(second.try_recv().unwrap(), ControlMessage::complete(false));
}

#[tokio::test]
async fn no_replay_for_late_subscribers() {
    let broker = ControlBroker::new();

    broker.send_to_consumers(&ControlMessage::complete(true));
    let mut late = broker.subscribe(Subscription::all("late", "Late"));

    assert!(late.try_recv().is_err());
}

#[tokio::test]
async fn each_message_delivered_once_per_consumer() {
    let broker = ControlBroker::new();
    let mut rx = broker.subscribe(Subscription::all("only", "Only"));

    broker.send_to_consumers(&ControlMessage::complete(true));

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[test]
fn send_without_consumers_delivers_nothing() {
    let broker = ControlBroker::new();
    assert_eq!(broker.send_to_consumers(&ControlMessage::complete(false)), 0);
}

#[test]
fn dropped_receivers_are_pruned() {
    let broker = ControlBroker::new();
    let rx = broker.subscribe(Subscription::all("gone", "Gone"));
    let _kept = broker.subscribe(Subscription::all("kept", "Kept"));
    drop(rx);

    let delivered = broker.send_to_consumers(&ControlMessage::complete(false));

    assert_eq!(delivered, 1);
    assert_eq!(broker.list_consumers(), vec![ConsumerId("kept".to_string())]);
}

#[test]
fn unsubscribe_removes_consumer() {
    let broker = ControlBroker::new();
    let _rx = broker.subscribe(Subscription::all("test", "Test"));
    assert_eq!(broker.consumer_count(), 1);

    broker.unsubscribe(&ConsumerId("test".to_string()));
    assert_eq!(broker.consumer_count(), 0);
}

#[test]
fn resubscribe_replaces_previous_registration() {
    let broker = ControlBroker::new();
    let mut old = broker.subscribe(Subscription::all("dup", "Old"));
    let mut new = broker.subscribe(Subscription::all("dup", "New"));

    broker.send_to_consumers(&ControlMessage::complete(false));

    assert_eq!(broker.consumer_count(), 1);
    assert!(new.try_recv().is_ok());
    assert!(old.try_recv().is_err());
}

#[test]
fn clone_shares_consumers() {
    let broker = ControlBroker::new();
    let other = broker.clone();

    let mut rx = broker.subscribe(Subscription::all("shared", "Shared"));
    other.send_to_consumers(&ControlMessage::complete(true));

    assert_eq!(other.consumer_count(), 1);
    assert!(rx.try_recv().unwrap().is_failure());
}

#[test]
fn concurrent_publishers_all_delivered() {
    let broker = ControlBroker::new();
    let mut rx = broker.subscribe(Subscription::all("collector", "Collector"));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let broker = broker.clone();
            std::thread::spawn(move || broker.send_to_consumers(&ControlMessage::complete(i % 2 == 0)))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }

    let mut received = 0;
    while rx.try_recv().is_ok() {
        received += 1;
    }
    assert_eq!(received, 8);
}
