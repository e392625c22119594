//! Metric helpers for `ldpframe`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. With the `metrics` feature
//! disabled the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::wire::MessageType;

/// Name of the counter tracking framed PDUs.
pub const PDUS_RECEIVED: &str = "ldpframe_pdus_received_total";
/// Name of the counter tracking dispatched messages, labelled by `type`.
pub const MESSAGES_RECEIVED: &str = "ldpframe_messages_received_total";
/// Name of the counter tracking fatal decode errors, labelled by `kind`.
pub const DECODE_ERRORS: &str = "ldpframe_decode_errors_total";

/// Record a framed PDU.
pub fn inc_pdus() {
    #[cfg(feature = "metrics")]
    counter!(PDUS_RECEIVED).increment(1);
}

/// Record a dispatched message of the given type.
pub fn inc_messages(message_type: MessageType) {
    #[cfg(feature = "metrics")]
    counter!(MESSAGES_RECEIVED, "type" => message_type.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = message_type;
}

/// Record a fatal decode error of the given kind.
pub fn inc_decode_errors(kind: &'static str) {
    #[cfg(feature = "metrics")]
    counter!(DECODE_ERRORS, "kind" => kind).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = kind;
}
