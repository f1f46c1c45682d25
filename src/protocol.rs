//! NBSS framing constants and header encoding.
//!
//! The probe speaks exactly one fragment of the NetBIOS session-framing
//! protocol: the length prefix that precedes every session message. A
//! session writes this prefix once, declaring a large forthcoming message,
//! and then goes silent — the peer sizes its receive buffer from the
//! declared length and holds it for as long as the connection lives.
//!
//! # Wire Format
//!
//! One 4-byte unsigned field, network byte order (big-endian):
//!
//! ```text
//! ┌────────┬────────┬────────┬────────┐
//! │           declared length          │   4 bytes, big-endian
//! └────────┴────────┴────────┴────────┘
//! ```
//!
//! The framing grants the length 17 significant bits (a 16-bit length field
//! plus an extension flag bit), so the largest claim a single session can
//! carry is [`MAX_COMMIT`] = `0x1FFFF`.

// ============================================================================
// Constants
// ============================================================================

/// Default port for the file/print-sharing service this targets.
pub const SMB_PORT: u16 = 445;

/// Largest value the declared-length field may carry (17 significant bits).
pub const MAX_COMMIT: u32 = 0x1FFFF;

/// Size of the framing header in bytes.
pub const HEADER_LEN: usize = 4;

// ============================================================================
// Header Encoding
// ============================================================================

/// Encodes the claim header for a declared size.
///
/// The field is emitted in network byte order. The reference tool packed it
/// in host-native order, which silently flips meaning between little- and
/// big-endian hosts; the encoding here is fixed and documented instead.
#[inline]
#[must_use]
pub fn claim_header(size: u32) -> [u8; HEADER_LEN] {
    size.to_be_bytes()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(SMB_PORT, 445);
        assert_eq!(MAX_COMMIT, 131_071);
        assert_eq!(HEADER_LEN, 4);
    }

    #[test]
    fn test_header_is_big_endian() {
        assert_eq!(claim_header(MAX_COMMIT), [0x00, 0x01, 0xFF, 0xFF]);
        assert_eq!(claim_header(1), [0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_header_zero_claim() {
        assert_eq!(claim_header(0), [0u8; HEADER_LEN]);
    }
}
