// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion broker: fan-out of control messages to registered consumers
//!
//! This module provides:
//! - `ControlBroker` - Deliver control messages to every matching consumer
//! - `Subscription` - A consumer registration filtered by message kind

mod bus;
mod subscription;

pub use bus::{ControlBroker, ControlReceiver, ControlSender};
pub use subscription::{ConsumerId, Subscription};
