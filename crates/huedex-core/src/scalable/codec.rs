//! Sign/magnitude packing of quantized coefficients.
//!
//! ```text
//! [ |c0| |c1| ... |cN-1| ][ sign byte 0 ] ... [ sign byte N/8-1 ]
//! ```
//!
//! Bit `j` of sign byte `i` (LSB first) is set when coefficient `8i + j` is
//! negative.

use crate::error::{DescriptorError, DescriptorResult};

/// Encoded length for `coefficients` coefficients.
pub const fn encoded_len(coefficients: usize) -> usize {
    coefficients + coefficients / 8
}

/// Pack coefficients into magnitude bytes followed by sign bytes.
///
/// `coeffs.len()` is a multiple of 8; magnitudes are truncated to their low
/// byte.
pub fn encode(coeffs: &[i32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(coeffs.len()));
    out.extend(coeffs.iter().map(|c| (c.unsigned_abs() & 0xff) as u8));
    out.extend(coeffs.chunks(8).map(|chunk| {
        chunk
            .iter()
            .enumerate()
            .filter(|(_, c)| **c < 0)
            .fold(0u8, |byte, (j, _)| byte | (1 << j))
    }));
    out
}

/// Unpack `coefficients` coefficients written by [`encode`].
pub fn decode(bytes: &[u8], coefficients: usize) -> DescriptorResult<Vec<i32>> {
    if bytes.len() != encoded_len(coefficients) {
        return Err(DescriptorError::Configuration(format!(
            "SCD feature vector has {} bytes, {coefficients} coefficients need {}",
            bytes.len(),
            encoded_len(coefficients)
        )));
    }
    let (magnitudes, signs) = bytes.split_at(coefficients);
    Ok(magnitudes
        .iter()
        .enumerate()
        .map(|(i, &m)| {
            let negative = (signs[i / 8] >> (i % 8)) & 1 == 1;
            if negative { -i32::from(m) } else { i32::from(m) }
        })
        .collect())
}
