//! Public API for the `ldpframe` library.
//!
//! This crate implements the receive path of a Label Distribution Protocol
//! session: it accumulates an arbitrarily fragmented byte stream, frames
//! PDUs, validates them against the session identity and limits, and turns
//! the messages they carry into state-machine events.
//!
//! The surrounding system supplies a [`SessionBridge`] for events, timer
//! restarts and session teardown, and feeds bytes through
//! [`Session::on_receive`] or the async [`transport::receive_loop`].

pub mod buffer;
pub mod byte_order;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod framer;
pub mod identity;
pub mod metrics;
pub mod session;
pub mod tlv;
pub mod transport;
pub mod wire;

pub use buffer::ReadBuffer;
pub use config::{DEFAULT_KEEPALIVE_TIME, SessionConfig, SessionConfigBuilder};
pub use dispatch::{Message, Messages};
pub use error::{BufferExhausted, ConfigError, Field, HeaderFault, ReceiveError, StatusCode};
pub use framer::{Pdu, PduFramer};
pub use identity::LdpIdentifier;
pub use session::{Session, SessionBridge, SessionEvent, SessionState, SessionStats};
pub use tlv::{SessionParameters, Tlv, Tlvs};
pub use transport::{ReceiveEnd, receive_loop};
