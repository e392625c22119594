//! Peer-side encoders for PDUs, messages and TLVs.
//!
//! The session under test only decodes; these helpers produce the bytes a
//! peer would put on the wire, including deliberately malformed variants.

use bytes::{BufMut, Bytes, BytesMut};
use ldpframe::{LdpIdentifier, wire::PROTOCOL_VERSION};

const COMMON_SESSION_PARAMETERS: u16 = 0x0500;
const INITIALIZATION: u16 = 0x0200;
const KEEPALIVE: u16 = 0x0201;

/// Encode one TLV.
#[must_use]
pub fn tlv(raw_type: u16, value: &[u8]) -> Vec<u8> {
    let mut out = BytesMut::with_capacity(value.len() + 4);
    out.put_u16(raw_type);
    out.put_u16(len_u16(value.len()));
    out.put_slice(value);
    out.to_vec()
}

/// Encode a Common Session Parameters TLV.
///
/// Protocol version 1, no flags, path vector limit 0, receiver identifier
/// `receiver`.
#[must_use]
pub fn common_session_parameters(
    keepalive_time: u16,
    max_pdu_len: u16,
    receiver: LdpIdentifier,
) -> Vec<u8> {
    let mut value = BytesMut::with_capacity(14);
    value.put_u16(PROTOCOL_VERSION);
    value.put_u16(keepalive_time);
    value.put_u8(0);
    value.put_u8(0);
    value.put_u16(max_pdu_len);
    value.put_slice(&receiver.to_bytes());
    tlv(COMMON_SESSION_PARAMETERS, &value)
}

/// Builder assembling one PDU from messages.
///
/// # Examples
///
/// ```
/// use ldpframe_testing::{PEER, PduBuilder};
///
/// let bytes = PduBuilder::new(PEER).keepalive(7).build();
/// assert_eq!(bytes.len(), 10 + 8);
/// ```
#[derive(Clone, Debug)]
pub struct PduBuilder {
    version: u16,
    sender: LdpIdentifier,
    messages: BytesMut,
    length_override: Option<u16>,
}

impl PduBuilder {
    /// Start a PDU sent by `sender`.
    #[must_use]
    pub fn new(sender: LdpIdentifier) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            sender,
            messages: BytesMut::new(),
            length_override: None,
        }
    }

    /// Use a different protocol version.
    #[must_use]
    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    /// Write `length` into the PDU length field instead of the real length.
    #[must_use]
    pub fn pdu_length(mut self, length: u16) -> Self {
        self.length_override = Some(length);
        self
    }

    /// Append a message with an arbitrary raw type word.
    #[must_use]
    pub fn message(mut self, raw_type: u16, id: u32, body: &[u8]) -> Self {
        self.messages.put_u16(raw_type);
        self.messages.put_u16(len_u16(body.len() + 4));
        self.messages.put_u32(id);
        self.messages.put_slice(body);
        self
    }

    /// Append a message whose length field claims `declared` bytes.
    #[must_use]
    pub fn message_with_length(mut self, raw_type: u16, declared: u16, id: u32, body: &[u8]) -> Self {
        self.messages.put_u16(raw_type);
        self.messages.put_u16(declared);
        self.messages.put_u32(id);
        self.messages.put_slice(body);
        self
    }

    /// Append a Keepalive message.
    #[must_use]
    pub fn keepalive(self, id: u32) -> Self { self.message(KEEPALIVE, id, &[]) }

    /// Append an Initialization message carrying `tlvs`.
    #[must_use]
    pub fn initialization(self, id: u32, tlvs: &[u8]) -> Self {
        self.message(INITIALIZATION, id, tlvs)
    }

    /// Append raw bytes to the PDU payload.
    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.messages.put_slice(bytes);
        self
    }

    /// Encode the PDU.
    #[must_use]
    pub fn build(self) -> Bytes {
        let length = self
            .length_override
            .unwrap_or_else(|| len_u16(self.messages.len() + 6));
        let mut out = BytesMut::with_capacity(self.messages.len() + 10);
        out.put_u16(self.version);
        out.put_u16(length);
        out.put_slice(&self.sender.to_bytes());
        out.put_slice(&self.messages);
        out.freeze()
    }
}

fn len_u16(len: usize) -> u16 { u16::try_from(len).expect("test payload fits a u16 length") }
