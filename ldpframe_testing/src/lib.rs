//! Utilities for exercising an [`ldpframe::Session`] in tests.
//!
//! [`PduBuilder`] encodes PDUs the way a peer would send them,
//! [`RecordingBridge`] captures every callback the session makes, and the
//! fixtures wire both into a ready-to-use session.
//!
//! ```rust
//! use ldpframe_testing::{PduBuilder, PEER, session};
//!
//! let mut session = session();
//! let bytes = PduBuilder::new(PEER).keepalive(1).build();
//! session.on_receive(Some(&bytes));
//! session.on_receive(None);
//! assert_eq!(session.state().stats().keepalive_rx, 1);
//! ```

pub mod bridge;
pub mod encode;
pub mod fixtures;
pub mod logging;

pub use bridge::{BridgeCall, RecordingBridge};
pub use encode::{PduBuilder, common_session_parameters, tlv};
pub use fixtures::{
    LOCAL,
    PEER,
    config,
    drive_with_chunks,
    feed_in_chunks,
    session,
    session_with,
};
pub use logging::{LoggerHandle, logger};
