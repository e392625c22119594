//! TLV iteration for message bodies and Initialization decoding.
//!
//! [`Tlvs`] walks a body as a sequence of type/length/value attributes,
//! checking each declared length against the bytes left. It stops at the
//! first violation and yields the error once.

use crate::{
    byte_order::u16_at,
    error::{Field, HeaderFault, ReceiveError},
    wire::{COMMON_SESSION_PARAMETERS_LEN, TLV_HEADER_LEN, TlvHeader, TlvType},
};

const KEEPALIVE_OFFSET: usize = 2;
const MAX_PDU_LEN_OFFSET: usize = 6;

/// One TLV borrowed from a message body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tlv<'a> {
    header: TlvHeader,
    value: &'a [u8],
}

impl<'a> Tlv<'a> {
    /// Decoded TLV type.
    #[must_use]
    pub const fn tlv_type(&self) -> TlvType { self.header.tlv_type() }

    /// Fixed header fields.
    #[must_use]
    pub const fn header(&self) -> TlvHeader { self.header }

    /// Value bytes, exactly as long as the declared length.
    #[must_use]
    pub const fn value(&self) -> &'a [u8] { self.value }
}

/// Iterator over the TLVs of a message body.
///
/// Iteration continues while more than [`TLV_HEADER_LEN`] bytes remain, so a
/// trailing remainder of four bytes or fewer ends the sequence silently.
#[derive(Clone, Debug)]
pub struct Tlvs<'a> {
    rest: &'a [u8],
}

impl<'a> Tlvs<'a> {
    /// Iterate the TLVs in `body`.
    #[must_use]
    pub const fn new(body: &'a [u8]) -> Self { Self { rest: body } }
}

impl<'a> Iterator for Tlvs<'a> {
    type Item = Result<Tlv<'a>, ReceiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.len() <= TLV_HEADER_LEN {
            return None;
        }
        let header = TlvHeader::parse(self.rest)?;
        let Some(tlv) = self.rest.get(..header.wire_len()) else {
            let available = self.rest.len();
            self.rest = &[];
            return Some(Err(ReceiveError::TruncatedField {
                field: Field::Tlv,
                declared: header.wire_len(),
                available,
            }));
        };
        self.rest = &self.rest[header.wire_len()..];
        Some(Ok(Tlv {
            header,
            value: &tlv[TLV_HEADER_LEN..],
        }))
    }
}

/// Peer parameters advertised in a Common Session Parameters TLV.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionParameters {
    /// Keepalive time proposed by the peer, in seconds.
    pub keepalive_time: u16,
    /// Largest PDU the peer is willing to receive.
    pub max_pdu_len: u16,
}

impl SessionParameters {
    /// Extract the parameters from a Common Session Parameters value.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderFault::SessionParametersTooShort`] when the value is
    /// shorter than [`COMMON_SESSION_PARAMETERS_LEN`].
    pub fn from_value(value: &[u8]) -> Result<Self, HeaderFault> {
        let too_short = || HeaderFault::SessionParametersTooShort {
            length: u16::try_from(value.len()).unwrap_or(u16::MAX),
            min: COMMON_SESSION_PARAMETERS_LEN,
        };
        if value.len() < COMMON_SESSION_PARAMETERS_LEN {
            return Err(too_short());
        }
        Ok(Self {
            keepalive_time: u16_at(value, KEEPALIVE_OFFSET).ok_or_else(too_short)?,
            max_pdu_len: u16_at(value, MAX_PDU_LEN_OFFSET).ok_or_else(too_short)?,
        })
    }
}

/// Decode the body of an Initialization message.
///
/// Returns the parameters from the last Common Session Parameters TLV, or
/// `None` if the body carried none. Other TLV types are skipped.
///
/// # Errors
///
/// Fails on the first TLV whose length overruns the body or whose session
/// parameters are too short.
pub fn decode_initialization(body: &[u8]) -> Result<Option<SessionParameters>, ReceiveError> {
    let mut parameters = None;
    for tlv in Tlvs::new(body) {
        let tlv = tlv?;
        match tlv.tlv_type() {
            TlvType::CommonSessionParameters => {
                parameters = Some(SessionParameters::from_value(tlv.value())?);
            }
            other => tracing::trace!(
                tlv_type = ?other,
                unknown_bit = tlv.header().is_unknown_bit_set(),
                forward_bit = tlv.header().is_forward_bit_set(),
                "skipping TLV"
            ),
        }
    }
    Ok(parameters)
}
