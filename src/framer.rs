//! PDU framing over the unread window of a [`ReadBuffer`](crate::ReadBuffer).
//!
//! [`PduFramer::frame`] looks at the front of the window only. It either
//! yields a [`Pdu`] view borrowing the window, reports that more bytes are
//! needed, or rejects the fixed header. It never consumes bytes; the caller
//! advances the buffer once the PDU has been handled.

use crate::{
    error::{HeaderFault, ReceiveError},
    identity::LdpIdentifier,
    wire::{IDENTIFIER_LEN, MIN_PDU_LEN, PDU_HEADER_LEN, PROTOCOL_VERSION, PduHeader},
};

/// One complete PDU inside the read window.
#[derive(Clone, Copy, Debug)]
pub struct Pdu<'a> {
    header: PduHeader,
    sender: LdpIdentifier,
    messages: &'a [u8],
}

impl<'a> Pdu<'a> {
    /// Fixed header fields.
    #[must_use]
    pub const fn header(&self) -> PduHeader { self.header }

    /// Identifier the sender placed in the PDU.
    #[must_use]
    pub const fn sender(&self) -> LdpIdentifier { self.sender }

    /// Inner payload holding the PDU's messages.
    #[must_use]
    pub const fn messages(&self) -> &'a [u8] { self.messages }

    /// Bytes the PDU occupies in the window.
    #[must_use]
    pub const fn wire_len(&self) -> usize { self.header.wire_len() }
}

/// Validates and delimits PDUs against a session's maximum PDU length.
#[derive(Clone, Copy, Debug)]
pub struct PduFramer {
    max_pdu_len: u16,
}

impl PduFramer {
    /// Create a framer enforcing `max_pdu_len`.
    #[must_use]
    pub const fn new(max_pdu_len: u16) -> Self { Self { max_pdu_len } }

    /// Attempt to frame the PDU at the start of `window`.
    ///
    /// Returns `Ok(None)` when the window holds less than a PDU header or
    /// less than the whole PDU the header announces.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveError::MalformedHeader`] when the version is not
    /// [`PROTOCOL_VERSION`] or the PDU length falls outside
    /// `IDENTIFIER_LEN..=max_pdu_len`. Header fields are checked as soon as
    /// they are available, before the rest of the PDU arrives.
    pub fn frame<'a>(&self, window: &'a [u8]) -> Result<Option<Pdu<'a>>, ReceiveError> {
        if window.len() < MIN_PDU_LEN {
            return Ok(None);
        }
        let Some(header) = PduHeader::parse(window) else {
            return Ok(None);
        };
        self.validate(header)?;

        let Some(pdu) = window.get(..header.wire_len()) else {
            tracing::trace!(
                have = window.len(),
                need = header.wire_len(),
                "partial PDU buffered"
            );
            return Ok(None);
        };
        let sender = LdpIdentifier::parse(&pdu[PDU_HEADER_LEN..]).ok_or(
            HeaderFault::PduTooShort {
                length: header.length(),
                min: IDENTIFIER_LEN,
            },
        )?;
        Ok(Some(Pdu {
            header,
            sender,
            messages: &pdu[MIN_PDU_LEN..],
        }))
    }

    fn validate(&self, header: PduHeader) -> Result<(), HeaderFault> {
        if header.version() != PROTOCOL_VERSION {
            return Err(HeaderFault::UnsupportedVersion {
                version: header.version(),
            });
        }
        if usize::from(header.length()) < IDENTIFIER_LEN {
            return Err(HeaderFault::PduTooShort {
                length: header.length(),
                min: IDENTIFIER_LEN,
            });
        }
        if header.length() > self.max_pdu_len {
            return Err(HeaderFault::PduTooLong {
                length: header.length(),
                max: self.max_pdu_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use rstest::rstest;

    use super::PduFramer;
    use crate::{
        error::{HeaderFault, ReceiveError},
        identity::LdpIdentifier,
    };

    const PEER: [u8; 6] = [2, 2, 2, 2, 0, 0];

    fn pdu(version: u16, length: u16, tail: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&version.to_be_bytes());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&PEER);
        out.extend_from_slice(tail);
        out
    }

    #[test]
    fn minimum_pdu_frames_with_empty_payload() {
        let bytes = pdu(1, 6, &[]);
        let framed = PduFramer::new(4096)
            .frame(&bytes)
            .expect("valid header")
            .expect("complete PDU");
        assert_eq!(framed.wire_len(), 10);
        assert!(framed.messages().is_empty());
        assert_eq!(
            framed.sender(),
            LdpIdentifier::new(Ipv4Addr::new(2, 2, 2, 2), 0)
        );
    }

    #[test]
    fn trailing_bytes_are_not_part_of_the_pdu() {
        let mut bytes = pdu(1, 8, &[0xAA, 0xBB]);
        bytes.extend_from_slice(&[0x00, 0x01]);
        let framed = PduFramer::new(4096)
            .frame(&bytes)
            .expect("valid header")
            .expect("complete PDU");
        assert_eq!(framed.messages(), &[0xAA, 0xBB]);
        assert_eq!(framed.wire_len(), 12);
    }

    #[rstest]
    #[case::identifier_only(6)]
    #[case::one_message(14)]
    #[case::odd_length(21)]
    fn complete_pdu_always_frames_with_its_sender(#[case] length: u16) {
        let bytes = pdu(1, length, &vec![0; usize::from(length) - 6]);
        let framed = PduFramer::new(4096)
            .frame(&bytes)
            .expect("valid header")
            .expect("complete PDU is never reported as partial");
        assert_eq!(framed.wire_len(), usize::from(length) + 4);
        assert_eq!(framed.sender().to_bytes(), PEER);
    }

    #[rstest]
    #[case::below_minimum(&[0x00, 0x01, 0x00, 0x06, 2, 2, 2, 2, 0][..])]
    #[case::missing_payload(&[0x00, 0x01, 0x00, 0x08, 2, 2, 2, 2, 0, 0, 0xAA][..])]
    fn incomplete_input_waits_for_more(#[case] bytes: &[u8]) {
        assert!(
            PduFramer::new(4096)
                .frame(bytes)
                .expect("no error for partial data")
                .is_none()
        );
    }

    #[rstest]
    #[case::version(pdu(2, 6, &[]), HeaderFault::UnsupportedVersion { version: 2 })]
    #[case::too_short(pdu(1, 5, &[]), HeaderFault::PduTooShort { length: 5, min: 6 })]
    #[case::too_long(pdu(1, 301, &[]), HeaderFault::PduTooLong { length: 301, max: 300 })]
    fn invalid_headers_are_rejected(#[case] bytes: Vec<u8>, #[case] fault: HeaderFault) {
        let err = PduFramer::new(300)
            .frame(&bytes)
            .expect_err("header must be rejected");
        assert_eq!(err, ReceiveError::MalformedHeader(fault));
    }

    #[test]
    fn oversized_length_is_rejected_before_payload_arrives() {
        // only the minimum header is present; the declared length is still checked
        let bytes = pdu(1, 5000, &[]);
        assert!(PduFramer::new(4096).frame(&bytes).is_err());
    }
}
