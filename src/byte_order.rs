//! Helpers for explicit network byte-order conversions.
//!
//! Every integer on the LDP wire is big-endian. These helpers keep Clippy
//! expectations scoped to the conversion points so the decoders can remain
//! explicit about wire endianness without repeating lint annotations.

/// Serialise a `u16` in network byte order (big-endian).
///
/// # Examples
///
/// ```
/// use ldpframe::byte_order::write_network_u16;
///
/// assert_eq!(write_network_u16(0x0201), [0x02, 0x01]);
/// ```
#[must_use]
pub fn write_network_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `u16` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use ldpframe::byte_order::read_network_u16;
///
/// assert_eq!(read_network_u16([0x10, 0x00]), 4096);
/// ```
#[must_use]
pub fn read_network_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    u16::from_be_bytes(bytes)
}

/// Serialise a `u32` in network byte order (big-endian).
#[must_use]
pub fn write_network_u32(value: u32) -> [u8; 4] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `u32` from its on-wire representation.
#[must_use]
pub fn read_network_u32(bytes: [u8; 4]) -> u32 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    u32::from_be_bytes(bytes)
}

/// Read a big-endian `u16` starting at `offset`.
///
/// Returns `None` when fewer than two bytes remain after `offset`.
#[must_use]
pub fn u16_at(src: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    let bytes = src.get(offset..end)?;
    <[u8; 2]>::try_from(bytes).ok().map(read_network_u16)
}

/// Read a big-endian `u32` starting at `offset`.
///
/// Returns `None` when fewer than four bytes remain after `offset`.
#[must_use]
pub fn u32_at(src: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let bytes = src.get(offset..end)?;
    <[u8; 4]>::try_from(bytes).ok().map(read_network_u32)
}

#[cfg(test)]
mod tests {
    //! Tests for network byte-order helpers and offset readers.

    use rstest::rstest;

    use super::{
        read_network_u16,
        read_network_u32,
        u16_at,
        u32_at,
        write_network_u16,
        write_network_u32,
    };

    #[test]
    fn write_then_read_preserves_values() {
        assert_eq!(read_network_u16(write_network_u16(0x3FFF)), 0x3FFF);
        assert_eq!(
            read_network_u32(write_network_u32(0x0A00_0001)),
            0x0A00_0001
        );
        assert_eq!(write_network_u32(0x0102_0304), [1, 2, 3, 4]);
    }

    #[rstest]
    #[case::start(0, Some(0x0001))]
    #[case::middle(1, Some(0x0102))]
    #[case::last_pair(2, Some(0x0203))]
    #[case::past_end(3, None)]
    #[case::overflowing_offset(usize::MAX, None)]
    fn u16_at_reads_within_bounds(#[case] offset: usize, #[case] expected: Option<u16>) {
        let src = [0x00, 0x01, 0x02, 0x03];
        assert_eq!(u16_at(&src, offset), expected);
    }

    #[test]
    fn u32_at_requires_four_bytes() {
        let src = [0xC0, 0xA8, 0x00, 0x01, 0xFF];
        assert_eq!(u32_at(&src, 0), Some(0xC0A8_0001));
        assert_eq!(u32_at(&src, 2), None);
    }
}
