//! BSV byte format: sentinel-framed rows and cells
//!
//! The four bytes 0xFC..=0xFF never occur in valid UTF-8 (the highest lead
//! byte is 0xF4 and continuation bytes stop at 0xBF), so text is written
//! verbatim and needs no escaping.
//!
//! | byte | meaning           |
//! |------|-------------------|
//! | 0xFF | row separator     |
//! | 0xFE | cell separator    |
//! | 0xFD | null cell         |
//! | 0xFC | empty-text cell   |

mod decoder;
mod encoder;
#[cfg(any(test, feature = "reference-decoder"))]
pub mod reference;

pub use decoder::{decode, validate, CellRef, Scanner, Summary, Token};
pub use encoder::{encode, encode_raw, Encoder};

/// Separates consecutive rows
pub const ROW_SEPARATOR: u8 = 0xFF;
/// Separates consecutive cells within a row
pub const CELL_SEPARATOR: u8 = 0xFE;
/// A cell holding null
pub const NULL_MARKER: u8 = 0xFD;
/// A cell holding the empty string
pub const EMPTY_MARKER: u8 = 0xFC;

/// True for any of the four reserved bytes
pub fn is_sentinel(byte: u8) -> bool {
    byte >= EMPTY_MARKER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_never_in_utf8() {
        let sample = "Hello 🌎 ¥ä€東 𝄞 \u{10FFFF}\u{0}";
        assert!(!sample.bytes().any(is_sentinel));
        for b in [ROW_SEPARATOR, CELL_SEPARATOR, NULL_MARKER, EMPTY_MARKER] {
            assert!(is_sentinel(b));
            assert!(std::str::from_utf8(&[b]).is_err());
        }
        assert!(!is_sentinel(0xF4));
    }
}
