//! LDP wire vocabulary: fixed sizes, type codes and header views.
//!
//! Nothing here owns bytes. Header views are parsed from a prefix of a
//! borrowed slice and the decoders above them hand out sub-slices of the
//! same storage.

pub mod header;
pub mod types;

pub use header::{MessageHeader, PduHeader, TlvHeader};
pub use types::{MessageType, TlvType};

/// The only LDP protocol version this decoder accepts.
pub const PROTOCOL_VERSION: u16 = 1;

/// Version and PDU length fields preceding every PDU.
pub const PDU_HEADER_LEN: usize = 4;

/// LSR id (4 bytes) plus label space id (2 bytes).
pub const IDENTIFIER_LEN: usize = 6;

/// Smallest byte count that can hold a PDU header and identifier.
pub const MIN_PDU_LEN: usize = PDU_HEADER_LEN + IDENTIFIER_LEN;

/// Type and length fields preceding every message.
pub const MESSAGE_HEADER_LEN: usize = 4;

/// Message id counted by the message length field.
pub const MESSAGE_ID_LEN: usize = 4;

/// Smallest byte count that can hold a message header and id.
pub const MIN_MESSAGE_LEN: usize = MESSAGE_HEADER_LEN + MESSAGE_ID_LEN;

/// Type and length fields preceding every TLV value.
pub const TLV_HEADER_LEN: usize = 4;

/// Minimum value length of a Common Session Parameters TLV.
pub const COMMON_SESSION_PARAMETERS_LEN: usize = 14;

/// Significant bits of message and TLV type words. The two high bits are
/// the U and F flags.
pub const TYPE_MASK: u16 = 0x3FFF;

/// Default maximum PDU length when none has been negotiated.
pub const DEFAULT_MAX_PDU_LEN: u16 = 4096;
