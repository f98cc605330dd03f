//! Hex string <-> byte buffer conversion for APDU exchange.
//!
//! ```ignore
//! use f4_mds_reader::hex::{encode, decode, PadSide};
//!
//! let bytes = encode("A", Some(2), PadSide::Left)?;
//! assert_eq!(bytes, vec![0x00, 0x0A]);
//! assert_eq!(decode(&bytes), "000A");
//! ```

use crate::errors::HexError;

/// Which side zero digits are added on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PadSide {
    Left,
    #[default]
    Right,
}

/// Convert a string of hex digits into bytes.
///
/// An odd digit count gets one `0` on the `pad` side first. With `length`,
/// the result is zero-padded on the same side up to exactly `length` bytes;
/// input longer than `length` bytes is rejected rather than truncated.
pub fn encode(digits: &str, length: Option<usize>, pad: PadSide) -> Result<Vec<u8>, HexError> {
    let mut padded = String::with_capacity(digits.len() + 1);
    let odd = digits.len() % 2 == 1;

    let zeros = match length {
        Some(length) => {
            let too_long = HexError::InvalidLength {
                digits: digits.len(),
                length,
            };
            let wanted = length.checked_mul(2).ok_or_else(|| too_long.clone())?;
            if digits.len() + usize::from(odd) > wanted {
                return Err(too_long);
            }
            wanted - digits.len()
        }
        None => usize::from(odd),
    };

    match pad {
        PadSide::Left => {
            padded.extend(std::iter::repeat('0').take(zeros));
            padded.push_str(digits);
        }
        PadSide::Right => {
            padded.push_str(digits);
            padded.extend(std::iter::repeat('0').take(zeros));
        }
    }

    let offset = if pad == PadSide::Left { zeros } else { 0 };
    hex::decode(&padded).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => HexError::InvalidDigit {
            digit: c,
            index: index.saturating_sub(offset),
        },
        _ => HexError::OddLength,
    })
}

/// Render bytes as uppercase hex, two digits per byte.
pub fn decode(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}
