//! Raw sample decoding.
//!
//! HID value fields are little-endian bit fields of a declared report size.
//! [`SampleFormat`] pairs that size with a signedness so bytes are decoded by
//! an explicit rule instead of being reinterpreted.
//!
//! ## Rules
//! - `ceil(bits / 8)` bytes are read; missing bytes read as zero and extra
//!   bytes are ignored. An empty buffer therefore decodes to `0`.
//! - The assembled word is masked to `bits` and sign-extended when signed.
//! - Signed widths `1..=64` and unsigned widths `1..=63` are supported;
//!   anything else is [`DecodeError::UnsupportedWidth`].

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Bit width and signedness of a raw sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleFormat {
    /// Report size in bits.
    pub bits: u8,
    /// Whether the field is two's-complement signed.
    pub signed: bool,
}

impl SampleFormat {
    pub fn new(bits: u8, signed: bool) -> Self {
        Self { bits, signed }
    }

    pub fn unsigned(bits: u8) -> Self {
        Self::new(bits, false)
    }

    pub fn signed(bits: u8) -> Self {
        Self::new(bits, true)
    }

    /// Number of bytes a sample of this format occupies.
    pub fn byte_len(&self) -> usize {
        usize::from(self.bits).div_ceil(8)
    }

    /// Check that samples of this format fit in an `i64`.
    pub fn validate(&self) -> Result<(), DecodeError> {
        let max_bits = if self.signed { 64 } else { 63 };
        if self.bits == 0 || self.bits > max_bits {
            return Err(DecodeError::UnsupportedWidth {
                bits: self.bits,
                signed: self.signed,
            });
        }
        Ok(())
    }

    /// Decode the leading bytes of `bytes` as one sample.
    pub fn decode(&self, bytes: &[u8]) -> Result<i64, DecodeError> {
        self.validate()?;

        let mut word = [0u8; 8];
        for (dst, src) in word.iter_mut().zip(bytes.iter().take(self.byte_len())) {
            *dst = *src;
        }
        let raw = u64::from_le_bytes(word);

        let bits = u32::from(self.bits);
        let masked = if bits == 64 {
            raw
        } else {
            raw & ((1u64 << bits) - 1)
        };

        if self.signed && bits < 64 {
            // Shift the sign bit to the top, then arithmetic-shift back down.
            let shift = 64 - bits;
            Ok(((masked << shift) as i64) >> shift)
        } else {
            Ok(masked as i64)
        }
    }
}

/// Smallest little-endian two's-complement encoding of `value`.
///
/// Returns between one and eight bytes; `0` encodes as a single zero byte.
/// Decoding the result with `SampleFormat::signed(8 * len)` yields `value`.
pub fn encode_minimal(value: i64) -> Vec<u8> {
    let full = value.to_le_bytes();
    let len = (1u32..8)
        .find(|&n| fits_signed(value, n))
        .map_or(full.len(), |n| n as usize);
    full.iter().take(len).copied().collect()
}

fn fits_signed(value: i64, bytes: u32) -> bool {
    let shift = 64 - bytes * 8;
    (value << shift) >> shift == value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_byte() {
        let fmt = SampleFormat::unsigned(8);
        assert_eq!(fmt.decode(&[0x80]), Ok(128));
        assert_eq!(fmt.decode(&[0xFF]), Ok(255));
    }

    #[test]
    fn signed_byte_sign_extends() {
        let fmt = SampleFormat::signed(8);
        assert_eq!(fmt.decode(&[0xFF]), Ok(-1));
        assert_eq!(fmt.decode(&[0x80]), Ok(-128));
        assert_eq!(fmt.decode(&[0x7F]), Ok(127));
    }

    #[test]
    fn little_endian_16() {
        assert_eq!(SampleFormat::unsigned(16).decode(&[0x34, 0x12]), Ok(0x1234));
        assert_eq!(SampleFormat::signed(16).decode(&[0x00, 0x80]), Ok(-32768));
    }

    #[test]
    fn odd_widths_mask_and_extend() {
        // 12-bit field, upper nibble of the second byte belongs to another field.
        assert_eq!(SampleFormat::unsigned(12).decode(&[0xFF, 0xFF]), Ok(0x0FFF));
        assert_eq!(SampleFormat::signed(12).decode(&[0xFF, 0x0F]), Ok(-1));
        assert_eq!(SampleFormat::signed(12).decode(&[0xFF, 0x07]), Ok(2047));
        assert_eq!(SampleFormat::unsigned(1).decode(&[0b11]), Ok(1));
        assert_eq!(SampleFormat::signed(4).decode(&[0x08]), Ok(-8));
    }

    #[test]
    fn short_and_empty_buffers_zero_fill() {
        assert_eq!(SampleFormat::unsigned(32).decode(&[]), Ok(0));
        assert_eq!(SampleFormat::unsigned(32).decode(&[0x01]), Ok(1));
        // A short signed buffer is not sign-extended from its last byte.
        assert_eq!(SampleFormat::signed(16).decode(&[0xFF]), Ok(255));
    }

    #[test]
    fn extra_bytes_ignored() {
        assert_eq!(SampleFormat::unsigned(8).decode(&[0x05, 0xAA, 0xBB]), Ok(5));
    }

    #[test]
    fn full_width() {
        let fmt = SampleFormat::signed(64);
        assert_eq!(fmt.decode(&i64::MIN.to_le_bytes()), Ok(i64::MIN));
        assert_eq!(fmt.decode(&(-2i64).to_le_bytes()), Ok(-2));
        let fmt = SampleFormat::unsigned(63);
        assert_eq!(fmt.decode(&[0xFF; 8]), Ok(i64::MAX));
    }

    #[test]
    fn unsupported_widths() {
        assert_eq!(
            SampleFormat::unsigned(0).decode(&[1]),
            Err(DecodeError::UnsupportedWidth {
                bits: 0,
                signed: false
            })
        );
        assert_eq!(
            SampleFormat::unsigned(64).decode(&[1]),
            Err(DecodeError::UnsupportedWidth {
                bits: 64,
                signed: false
            })
        );
        assert!(SampleFormat::signed(65).validate().is_err());
    }

    #[test]
    fn byte_len_rounds_up() {
        assert_eq!(SampleFormat::unsigned(1).byte_len(), 1);
        assert_eq!(SampleFormat::unsigned(8).byte_len(), 1);
        assert_eq!(SampleFormat::unsigned(9).byte_len(), 2);
        assert_eq!(SampleFormat::signed(64).byte_len(), 8);
    }

    #[test]
    fn minimal_encoding() {
        assert_eq!(encode_minimal(0), vec![0]);
        assert_eq!(encode_minimal(127), vec![0x7F]);
        assert_eq!(encode_minimal(128), vec![0x80, 0x00]);
        assert_eq!(encode_minimal(-1), vec![0xFF]);
        assert_eq!(encode_minimal(-129), vec![0x7F, 0xFF]);
        assert_eq!(encode_minimal(1 << 40).len(), 6);
        assert_eq!(encode_minimal(i64::MIN).len(), 8);
        assert_eq!(encode_minimal(i64::MAX).len(), 8);
    }

    #[test]
    fn minimal_encoding_decodes_back() {
        for v in [0, 1, -1, 255, -256, 70_000, -70_000, i64::MAX, i64::MIN] {
            let bytes = encode_minimal(v);
            let bits = u8::try_from(bytes.len() * 8).unwrap_or(64);
            assert_eq!(SampleFormat::signed(bits).decode(&bytes), Ok(v));
        }
    }
}
