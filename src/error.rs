//! Error types for the receive path.
//!
//! Every [`ReceiveError`] is fatal for the session that produced it: the LDP
//! stream carries no resynchronisation marker, so once a length or identity
//! cannot be trusted nothing after it can be either.
//!
//! # Error Categories
//!
//! - [`ReceiveError::MalformedHeader`]: a fixed header field is out of range (version, PDU length,
//!   message length, session parameter length).
//! - [`ReceiveError::IdentityMismatch`]: a PDU claims a sender other than the session peer.
//! - [`ReceiveError::TruncatedField`]: a declared length runs past the enclosing container.
//! - [`ReceiveError::BufferExhausted`]: appended bytes do not fit the read buffer.
//!
//! [`ReceiveError::status_code`] maps each error to the LDP status code the
//! session reports when it tears down.

use std::fmt;

use thiserror::Error;

use crate::identity::LdpIdentifier;

/// LDP status code carried in Notification messages.
///
/// Only the codes this crate records are named; the session may hold any
/// other value set by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatusCode(u32);

impl StatusCode {
    pub const BAD_LDP_IDENTIFIER: Self = Self(0x0000_0001);
    pub const BAD_PROTOCOL_VERSION: Self = Self(0x0000_0002);
    pub const BAD_PDU_LENGTH: Self = Self(0x0000_0003);
    pub const BAD_MESSAGE_LENGTH: Self = Self(0x0000_0005);
    pub const BAD_TLV_LENGTH: Self = Self(0x0000_0007);
    pub const INTERNAL_ERROR: Self = Self(0x0000_0019);

    /// Wrap a raw status code.
    #[must_use]
    pub const fn new(code: u32) -> Self { Self(code) }

    /// Return the raw status code.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#010x}", self.0) }
}

/// A fixed header field outside its permitted range.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum HeaderFault {
    /// The PDU version is not the one version LDP defines.
    #[error("unsupported protocol version {version}")]
    UnsupportedVersion {
        /// Version found in the PDU header.
        version: u16,
    },
    /// The PDU length cannot hold the sender identifier.
    #[error("PDU length {length} shorter than identifier length {min}")]
    PduTooShort {
        /// Declared PDU length.
        length: u16,
        /// Identifier length the PDU must at least carry.
        min: usize,
    },
    /// The PDU length exceeds the session maximum.
    #[error("PDU length {length} exceeds maximum {max}")]
    PduTooLong {
        /// Declared PDU length.
        length: u16,
        /// Maximum PDU length currently in force.
        max: u16,
    },
    /// The message length cannot hold the message id.
    #[error("message length {length} shorter than message id")]
    MessageTooShort {
        /// Declared message length.
        length: u16,
    },
    /// A Common Session Parameters TLV is shorter than its fixed layout.
    #[error("session parameters length {length} shorter than {min}")]
    SessionParametersTooShort {
        /// Declared TLV value length.
        length: u16,
        /// Minimum value length.
        min: usize,
    },
}

/// Nesting level at which a declared length overran its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// A message inside a PDU.
    Message,
    /// A TLV inside a message body.
    Tlv,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Message => "message",
            Self::Tlv => "TLV",
        })
    }
}

/// Returned when an append would overflow the read buffer.
///
/// Nothing is copied when this error is produced.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("read buffer exhausted: {requested} bytes requested, {available} available")]
pub struct BufferExhausted {
    /// Bytes the caller tried to append.
    pub requested: usize,
    /// Free bytes left in the buffer.
    pub available: usize,
}

/// Fatal errors raised while decoding a session's byte stream.
///
/// # Examples
///
/// ```
/// use ldpframe::{Field, ReceiveError, StatusCode};
///
/// let err = ReceiveError::TruncatedField {
///     field: Field::Message,
///     declared: 40,
///     available: 12,
/// };
/// assert_eq!(err.kind(), "truncated_field");
/// assert_eq!(err.status_code(), StatusCode::BAD_MESSAGE_LENGTH);
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ReceiveError {
    /// A fixed header field is out of range.
    #[error("malformed header: {0}")]
    MalformedHeader(#[from] HeaderFault),

    /// The PDU sender is not the session peer.
    #[error("identity mismatch: expected {expected}, found {found}")]
    IdentityMismatch {
        /// Peer identity bound to the session.
        expected: LdpIdentifier,
        /// Identity carried by the PDU.
        found: LdpIdentifier,
    },

    /// A declared length exceeds the bytes left in its container.
    #[error("truncated {field}: declared {declared} bytes, {available} available")]
    TruncatedField {
        /// Nesting level of the offending length.
        field: Field,
        /// Bytes the header claims, including its own fixed fields.
        declared: usize,
        /// Bytes remaining in the enclosing container.
        available: usize,
    },

    /// The read buffer cannot take more bytes.
    #[error(transparent)]
    BufferExhausted(#[from] BufferExhausted),
}

impl ReceiveError {
    /// Returns the error kind as a static string for metrics and logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedHeader(_) => "malformed_header",
            Self::IdentityMismatch { .. } => "identity_mismatch",
            Self::TruncatedField { .. } => "truncated_field",
            Self::BufferExhausted(_) => "buffer_exhausted",
        }
    }

    /// Returns the status code recorded on the session for this error.
    ///
    /// | Error | Status |
    /// |-------|--------|
    /// | `UnsupportedVersion` | Bad Protocol Version |
    /// | `PduTooShort`, `PduTooLong` | Bad PDU Length |
    /// | `MessageTooShort`, truncated message | Bad Message Length |
    /// | `SessionParametersTooShort`, truncated TLV | Bad TLV Length |
    /// | `IdentityMismatch` | Bad LDP Identifier |
    /// | `BufferExhausted` | Internal Error |
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedHeader(HeaderFault::UnsupportedVersion { .. }) => {
                StatusCode::BAD_PROTOCOL_VERSION
            }
            Self::MalformedHeader(
                HeaderFault::PduTooShort { .. } | HeaderFault::PduTooLong { .. },
            ) => StatusCode::BAD_PDU_LENGTH,
            Self::MalformedHeader(HeaderFault::MessageTooShort { .. })
            | Self::TruncatedField {
                field: Field::Message,
                ..
            } => StatusCode::BAD_MESSAGE_LENGTH,
            Self::MalformedHeader(HeaderFault::SessionParametersTooShort { .. })
            | Self::TruncatedField {
                field: Field::Tlv,
                ..
            } => StatusCode::BAD_TLV_LENGTH,
            Self::IdentityMismatch { .. } => StatusCode::BAD_LDP_IDENTIFIER,
            Self::BufferExhausted(_) => StatusCode::INTERNAL_ERROR,
        }
    }
}

/// Errors raised while building a [`SessionConfig`](crate::SessionConfig).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The maximum PDU length is in the range LDP reserves for "use default".
    #[error("max PDU length {value} must be greater than 255")]
    MaxPduLenTooSmall {
        /// Rejected value.
        value: u16,
    },
    /// The read buffer cannot hold one maximum-size PDU.
    #[error("read buffer capacity {capacity} smaller than one PDU of {required} bytes")]
    ReadBufferTooSmall {
        /// Requested capacity.
        capacity: usize,
        /// Bytes occupied by a maximum-size PDU.
        required: usize,
    },
    /// A zero keepalive time would expire immediately.
    #[error("keepalive time must be non-zero")]
    ZeroKeepaliveTime,
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use rstest::rstest;

    use super::{BufferExhausted, Field, HeaderFault, ReceiveError, StatusCode};
    use crate::identity::LdpIdentifier;

    #[rstest]
    #[case::version(
        HeaderFault::UnsupportedVersion { version: 2 }.into(),
        StatusCode::BAD_PROTOCOL_VERSION
    )]
    #[case::short_pdu(
        HeaderFault::PduTooShort { length: 4, min: 6 }.into(),
        StatusCode::BAD_PDU_LENGTH
    )]
    #[case::long_pdu(
        HeaderFault::PduTooLong { length: 5000, max: 4096 }.into(),
        StatusCode::BAD_PDU_LENGTH
    )]
    #[case::short_message(
        HeaderFault::MessageTooShort { length: 2 }.into(),
        StatusCode::BAD_MESSAGE_LENGTH
    )]
    #[case::truncated_tlv(
        ReceiveError::TruncatedField { field: Field::Tlv, declared: 18, available: 10 },
        StatusCode::BAD_TLV_LENGTH
    )]
    #[case::exhausted(
        BufferExhausted { requested: 10, available: 3 }.into(),
        StatusCode::INTERNAL_ERROR
    )]
    fn errors_map_to_ldp_status_codes(#[case] err: ReceiveError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[test]
    fn identity_mismatch_names_both_identities() {
        let err = ReceiveError::IdentityMismatch {
            expected: LdpIdentifier::new(Ipv4Addr::new(2, 2, 2, 2), 0),
            found: LdpIdentifier::new(Ipv4Addr::new(9, 9, 9, 9), 0),
        };
        let message = err.to_string();
        assert!(message.contains("2.2.2.2:0"), "missing expected: {message}");
        assert!(message.contains("9.9.9.9:0"), "missing found: {message}");
        assert_eq!(err.kind(), "identity_mismatch");
        assert_eq!(err.status_code(), StatusCode::BAD_LDP_IDENTIFIER);
    }

    #[test]
    fn status_code_displays_as_hex() {
        assert_eq!(StatusCode::INTERNAL_ERROR.to_string(), "0x00000019");
    }
}
