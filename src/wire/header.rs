//! Fixed-size header views for PDUs, messages and TLVs.
//!
//! Each `parse` reads only the prefix it needs and returns `None` when the
//! slice is too short. Length validation against the surrounding container
//! is left to the decoder that owns that container.

use super::{
    MESSAGE_HEADER_LEN,
    MESSAGE_ID_LEN,
    MessageType,
    PDU_HEADER_LEN,
    TLV_HEADER_LEN,
    TlvType,
};
use crate::byte_order::{u16_at, u32_at};

const UNKNOWN_BIT: u16 = 0x8000;
const FORWARD_BIT: u16 = 0x4000;

/// Version and length words opening every PDU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PduHeader {
    version: u16,
    length: u16,
}

impl PduHeader {
    /// Parse the first [`PDU_HEADER_LEN`] bytes of `src`.
    #[must_use]
    pub fn parse(src: &[u8]) -> Option<Self> {
        Some(Self {
            version: u16_at(src, 0)?,
            length: u16_at(src, 2)?,
        })
    }

    /// Protocol version as sent by the peer.
    #[must_use]
    pub const fn version(&self) -> u16 { self.version }

    /// Declared length of everything after the length field.
    #[must_use]
    pub const fn length(&self) -> u16 { self.length }

    /// Bytes the whole PDU occupies on the wire.
    #[must_use]
    pub const fn wire_len(&self) -> usize { self.length as usize + PDU_HEADER_LEN }
}

/// Type, length and id fields opening every message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    raw_type: u16,
    length: u16,
    id: u32,
}

impl MessageHeader {
    /// Parse the first [`MIN_MESSAGE_LEN`](super::MIN_MESSAGE_LEN) bytes of `src`.
    #[must_use]
    pub fn parse(src: &[u8]) -> Option<Self> {
        Some(Self {
            raw_type: u16_at(src, 0)?,
            length: u16_at(src, 2)?,
            id: u32_at(src, MESSAGE_HEADER_LEN)?,
        })
    }

    /// Decoded message type with flag bits removed.
    #[must_use]
    pub const fn message_type(&self) -> MessageType { MessageType::from_wire(self.raw_type) }

    /// Type word exactly as received.
    #[must_use]
    pub const fn raw_type(&self) -> u16 { self.raw_type }

    /// Declared length of everything after the length field.
    #[must_use]
    pub const fn length(&self) -> u16 { self.length }

    /// Message id chosen by the sender.
    #[must_use]
    pub const fn id(&self) -> u32 { self.id }

    /// Bytes the whole message occupies inside its PDU.
    #[must_use]
    pub const fn wire_len(&self) -> usize { self.length as usize + MESSAGE_HEADER_LEN }

    /// Length of the body following the message id.
    ///
    /// Returns `None` when the declared length cannot even hold the id.
    #[must_use]
    pub const fn body_len(&self) -> Option<usize> {
        (self.length as usize).checked_sub(MESSAGE_ID_LEN)
    }

    /// Report whether the U bit asks receivers to ignore unknown types silently.
    #[must_use]
    pub const fn is_unknown_bit_set(&self) -> bool { self.raw_type & UNKNOWN_BIT != 0 }
}

/// Type and length fields opening every TLV.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TlvHeader {
    raw_type: u16,
    length: u16,
}

impl TlvHeader {
    /// Parse the first [`TLV_HEADER_LEN`] bytes of `src`.
    #[must_use]
    pub fn parse(src: &[u8]) -> Option<Self> {
        Some(Self {
            raw_type: u16_at(src, 0)?,
            length: u16_at(src, 2)?,
        })
    }

    /// Decoded TLV type with flag bits removed.
    #[must_use]
    pub const fn tlv_type(&self) -> TlvType { TlvType::from_wire(self.raw_type) }

    /// Declared value length.
    #[must_use]
    pub const fn length(&self) -> u16 { self.length }

    /// Bytes the whole TLV occupies inside its message.
    #[must_use]
    pub const fn wire_len(&self) -> usize { self.length as usize + TLV_HEADER_LEN }

    /// Report whether the U bit is set.
    #[must_use]
    pub const fn is_unknown_bit_set(&self) -> bool { self.raw_type & UNKNOWN_BIT != 0 }

    /// Report whether the F bit asks for unknown TLVs to be forwarded.
    #[must_use]
    pub const fn is_forward_bit_set(&self) -> bool { self.raw_type & FORWARD_BIT != 0 }
}
