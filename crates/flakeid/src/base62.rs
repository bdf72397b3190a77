//! Base62 text codec for arbitrary byte strings.
//!
//! The input is read as a big-endian integer and written in the alphabet
//! `0-9A-Za-z`. Each leading zero byte becomes a leading `'0'` so that the
//! byte length survives a round trip.
//!
//! ```
//! use flakeid::base62;
//!
//! let encoded = base62::encode(&[0, 0, 255]);
//! assert_eq!(encoded, "0047");
//! assert_eq!(base62::decode(&encoded).unwrap(), vec![0, 0, 255]);
//! ```

use crate::{DecodeError, FlakeId};

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE: u32 = 62;

/// Reverse lookup table; `NO_VALUE` marks bytes outside the alphabet.
const LOOKUP: [u8; 256] = {
    let mut table = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};
const NO_VALUE: u8 = u8::MAX;

/// Encodes `bytes` as base62 text.
pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // Little-endian base62 digits of the non-zero tail. log(256)/log(62) is
    // just under 1.35.
    let mut digits: Vec<u8> = Vec::with_capacity((bytes.len() - zeros) * 135 / 100 + 1);
    for &byte in &bytes[zeros..] {
        let mut carry = u32::from(byte);
        for digit in &mut digits {
            carry += u32::from(*digit) << 8;
            *digit = (carry % BASE) as u8;
            carry /= BASE;
        }
        while carry > 0 {
            digits.push((carry % BASE) as u8);
            carry /= BASE;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(core::iter::repeat_n(char::from(ALPHABET[0]), zeros));
    out.extend(digits.iter().rev().map(|&d| char::from(ALPHABET[d as usize])));
    out
}

/// Decodes base62 text produced by [`encode`].
///
/// # Errors
///
/// Returns [`DecodeError::InvalidChar`] for any byte outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    let zeros = s.bytes().take_while(|&c| c == ALPHABET[0]).count();

    // Little-endian bytes of the non-zero tail.
    let mut bytes: Vec<u8> = Vec::with_capacity(s.len());
    for (index, byte) in s.bytes().enumerate().skip(zeros) {
        let value = LOOKUP[byte as usize];
        if value == NO_VALUE {
            return Err(DecodeError::InvalidChar { byte, index });
        }
        let mut carry = u32::from(value);
        for b in &mut bytes {
            carry += u32::from(*b) * BASE;
            *b = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

impl FlakeId {
    /// Base62 text of the little-endian byte projection.
    pub fn to_base62(&self) -> String {
        encode(&self.to_le_bytes())
    }

    /// Reverses [`FlakeId::to_base62`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidChar`] for text outside the alphabet and
    /// [`DecodeError::InvalidLength`] if it does not decode to exactly 8
    /// bytes.
    pub fn from_base62(s: &str) -> Result<Self, DecodeError> {
        let bytes = decode(s)?;
        Self::try_from_le_slice(&bytes)
    }
}
