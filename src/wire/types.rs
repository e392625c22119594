//! Message and TLV type codes.
//!
//! Type words carry two flag bits above the 14-bit code. Both enums are
//! built through a single mask-then-match step so the flag bits never reach
//! dispatch logic.

use std::fmt;

use super::TYPE_MASK;

/// LDP message types known to the receive path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    Notification,
    Hello,
    Initialization,
    Keepalive,
    Address,
    AddressWithdraw,
    LabelMapping,
    LabelRequest,
    LabelWithdraw,
    LabelRelease,
    AbortRequest,
    /// A masked type code with no assigned meaning here.
    Unknown(u16),
}

impl MessageType {
    /// Decode a raw on-wire type word.
    ///
    /// # Examples
    ///
    /// ```
    /// use ldpframe::wire::MessageType;
    ///
    /// assert_eq!(MessageType::from_wire(0x0201), MessageType::Keepalive);
    /// // flag bits are not part of the type identity
    /// assert_eq!(MessageType::from_wire(0x8201), MessageType::Keepalive);
    /// assert_eq!(MessageType::from_wire(0x3F00), MessageType::Unknown(0x3F00));
    /// ```
    #[must_use]
    pub const fn from_wire(raw: u16) -> Self {
        match raw & TYPE_MASK {
            0x0001 => Self::Notification,
            0x0100 => Self::Hello,
            0x0200 => Self::Initialization,
            0x0201 => Self::Keepalive,
            0x0300 => Self::Address,
            0x0301 => Self::AddressWithdraw,
            0x0400 => Self::LabelMapping,
            0x0401 => Self::LabelRequest,
            0x0402 => Self::LabelWithdraw,
            0x0403 => Self::LabelRelease,
            0x0404 => Self::AbortRequest,
            code => Self::Unknown(code),
        }
    }

    /// Return the masked 14-bit type code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Notification => 0x0001,
            Self::Hello => 0x0100,
            Self::Initialization => 0x0200,
            Self::Keepalive => 0x0201,
            Self::Address => 0x0300,
            Self::AddressWithdraw => 0x0301,
            Self::LabelMapping => 0x0400,
            Self::LabelRequest => 0x0401,
            Self::LabelWithdraw => 0x0402,
            Self::LabelRelease => 0x0403,
            Self::AbortRequest => 0x0404,
            Self::Unknown(code) => code,
        }
    }

    /// Report whether the message belongs to the address or label family.
    ///
    /// These are recognised by the receive path but decoded elsewhere.
    #[must_use]
    pub const fn is_delegated(self) -> bool {
        matches!(
            self,
            Self::Address
                | Self::AddressWithdraw
                | Self::LabelMapping
                | Self::LabelRequest
                | Self::LabelWithdraw
                | Self::LabelRelease
                | Self::AbortRequest
        )
    }

    /// Name used in logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::Hello => "hello",
            Self::Initialization => "initialization",
            Self::Keepalive => "keepalive",
            Self::Address => "address",
            Self::AddressWithdraw => "address-withdraw",
            Self::LabelMapping => "label-mapping",
            Self::LabelRequest => "label-request",
            Self::LabelWithdraw => "label-withdraw",
            Self::LabelRelease => "label-release",
            Self::AbortRequest => "abort-request",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown({code:#06x})"),
            known => f.write_str(known.as_str()),
        }
    }
}

/// TLV types defined for LDP.
///
/// Only [`TlvType::CommonSessionParameters`] is interpreted by the receive
/// path; the rest exist so diagnostics can name what was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TlvType {
    Fec,
    AddressList,
    HopCount,
    PathVector,
    GenericLabel,
    AtmLabel,
    FrameRelayLabel,
    Status,
    ExtendedStatus,
    ReturnedPdu,
    ReturnedMessage,
    CommonHelloParameters,
    Ipv4TransportAddress,
    ConfigurationSequenceNumber,
    Ipv6TransportAddress,
    CommonSessionParameters,
    AtmSessionParameters,
    FrameRelaySessionParameters,
    LabelRequestMessageId,
    Unknown(u16),
}

impl TlvType {
    /// Decode a raw on-wire type word.
    ///
    /// # Examples
    ///
    /// ```
    /// use ldpframe::wire::TlvType;
    ///
    /// assert_eq!(TlvType::from_wire(0x0500), TlvType::CommonSessionParameters);
    /// assert_eq!(TlvType::from_wire(0xC500), TlvType::CommonSessionParameters);
    /// ```
    #[must_use]
    pub const fn from_wire(raw: u16) -> Self {
        match raw & TYPE_MASK {
            0x0100 => Self::Fec,
            0x0101 => Self::AddressList,
            0x0103 => Self::HopCount,
            0x0104 => Self::PathVector,
            0x0200 => Self::GenericLabel,
            0x0201 => Self::AtmLabel,
            0x0202 => Self::FrameRelayLabel,
            0x0300 => Self::Status,
            0x0301 => Self::ExtendedStatus,
            0x0302 => Self::ReturnedPdu,
            0x0303 => Self::ReturnedMessage,
            0x0400 => Self::CommonHelloParameters,
            0x0401 => Self::Ipv4TransportAddress,
            0x0402 => Self::ConfigurationSequenceNumber,
            0x0403 => Self::Ipv6TransportAddress,
            0x0500 => Self::CommonSessionParameters,
            0x0501 => Self::AtmSessionParameters,
            0x0502 => Self::FrameRelaySessionParameters,
            0x0600 => Self::LabelRequestMessageId,
            code => Self::Unknown(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{MessageType, TlvType};

    #[rstest]
    #[case(0x0001, MessageType::Notification)]
    #[case(0x0100, MessageType::Hello)]
    #[case(0x0200, MessageType::Initialization)]
    #[case(0x0201, MessageType::Keepalive)]
    #[case(0x0300, MessageType::Address)]
    #[case(0x0301, MessageType::AddressWithdraw)]
    #[case(0x0400, MessageType::LabelMapping)]
    #[case(0x0401, MessageType::LabelRequest)]
    #[case(0x0402, MessageType::LabelWithdraw)]
    #[case(0x0403, MessageType::LabelRelease)]
    #[case(0x0404, MessageType::AbortRequest)]
    fn known_codes_map_back_to_themselves(#[case] raw: u16, #[case] expected: MessageType) {
        let decoded = MessageType::from_wire(raw);
        assert_eq!(decoded, expected);
        assert_eq!(decoded.code(), raw);
    }

    #[test]
    fn flag_bits_are_masked_before_matching() {
        assert_eq!(MessageType::from_wire(0x4200), MessageType::Initialization);
        assert_eq!(MessageType::from_wire(0xFFFF), MessageType::Unknown(0x3FFF));
        assert_eq!(TlvType::from_wire(0x8300), TlvType::Status);
    }

    #[test]
    fn only_address_and_label_family_is_delegated() {
        assert!(MessageType::LabelMapping.is_delegated());
        assert!(MessageType::AbortRequest.is_delegated());
        assert!(!MessageType::Keepalive.is_delegated());
        assert!(!MessageType::Hello.is_delegated());
        assert!(!MessageType::Unknown(0x0999).is_delegated());
    }

    #[test]
    fn unknown_types_display_their_code() {
        assert_eq!(MessageType::Unknown(0x0999).to_string(), "unknown(0x0999)");
        assert_eq!(MessageType::AddressWithdraw.to_string(), "address-withdraw");
    }
}
