//! Outbound delivery adapters. One file per transport: each adapter knows
//! one gateway protocol and nothing about queues.

use std::time::Duration;

/// Per-request timeout for outbound deliveries. A gateway that accepts the
/// connection but never responds must not hold the sender open forever.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

mod push;
mod sms;

pub use push::HttpPushGateway;
pub use sms::HttpSmsGateway;
