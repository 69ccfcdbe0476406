// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jt-core: shared types for the job trigger processor
//!
//! This crate provides:
//! - The `Event` a trigger dispatches and the `Reply` a worker returns
//! - Typed `ControlMessage`s and their wire schema
//! - The `ControlBroker` that fans completion messages out to consumers

pub mod broker;
pub mod control;
pub mod event;

pub use broker::{ConsumerId, ControlBroker, ControlReceiver, ControlSender, Subscription};
pub use control::{ControlMessage, ControlMessageKind};
pub use event::{Event, Reply, Response, STATUS_OK};
