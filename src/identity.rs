//! LDP identifiers naming the two ends of a session.
//!
//! An identifier is the pair of an LSR id (an IPv4 address) and a label
//! space id. A session is bound to one peer identifier for its whole life.

use std::{fmt, net::Ipv4Addr};

use crate::{
    byte_order::{u16_at, write_network_u16, write_network_u32},
    wire::IDENTIFIER_LEN,
};

/// Six-octet LDP identifier: LSR id followed by the label space id.
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
///
/// use ldpframe::LdpIdentifier;
///
/// let id = LdpIdentifier::new(Ipv4Addr::new(10, 0, 0, 1), 0);
/// assert_eq!(id.to_string(), "10.0.0.1:0");
/// assert_eq!(LdpIdentifier::parse(&id.to_bytes()), Some(id));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LdpIdentifier {
    lsr_id: Ipv4Addr,
    label_space: u16,
}

impl LdpIdentifier {
    /// Create an identifier from its parts.
    #[must_use]
    pub const fn new(lsr_id: Ipv4Addr, label_space: u16) -> Self { Self { lsr_id, label_space } }

    /// Return the LSR id.
    #[must_use]
    pub const fn lsr_id(&self) -> Ipv4Addr { self.lsr_id }

    /// Return the label space id.
    #[must_use]
    pub const fn label_space(&self) -> u16 { self.label_space }

    /// Parse an identifier from the first six bytes of `src`.
    ///
    /// Returns `None` when `src` is shorter than [`IDENTIFIER_LEN`].
    #[must_use]
    pub fn parse(src: &[u8]) -> Option<Self> {
        let octets: [u8; 4] = src.get(..4)?.try_into().ok()?;
        let label_space = u16_at(src, 4)?;
        Some(Self::new(Ipv4Addr::from(octets), label_space))
    }

    /// Encode the identifier in wire order.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; IDENTIFIER_LEN] {
        let mut out = [0u8; IDENTIFIER_LEN];
        out[..4].copy_from_slice(&write_network_u32(u32::from(self.lsr_id)));
        out[4..].copy_from_slice(&write_network_u16(self.label_space));
        out
    }
}

impl fmt::Display for LdpIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lsr_id, self.label_space)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::LdpIdentifier;

    #[test]
    fn parse_reads_lsr_id_and_label_space() {
        let bytes = [192, 0, 2, 7, 0x00, 0x05, 0xAA];
        let id = LdpIdentifier::parse(&bytes).expect("six bytes available");
        assert_eq!(id.lsr_id(), Ipv4Addr::new(192, 0, 2, 7));
        assert_eq!(id.label_space(), 5);
    }

    #[test]
    fn to_bytes_writes_lsr_id_then_label_space() {
        let id = LdpIdentifier::new(Ipv4Addr::new(10, 0, 0, 1), 0x0102);
        assert_eq!(id.to_bytes(), [10, 0, 0, 1, 0x01, 0x02]);
    }

    #[test]
    fn parse_rejects_short_input() {
        assert_eq!(LdpIdentifier::parse(&[1, 2, 3, 4, 0]), None);
    }

    #[test]
    fn identifiers_differing_only_in_label_space_are_distinct() {
        let a = LdpIdentifier::new(Ipv4Addr::new(2, 2, 2, 2), 0);
        let b = LdpIdentifier::new(Ipv4Addr::new(2, 2, 2, 2), 1);
        assert_ne!(a, b);
        assert_eq!(b.to_string(), "2.2.2.2:1");
    }
}
