// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Processor configuration parsing

mod function;
mod parser;
mod trigger;

pub use function::FunctionDef;
pub use parser::{load_config, parse_config, ConfigError, ProcessorConfig};
pub use trigger::TriggerDef;
