//! Histogram pre-quantization and Haar coefficient quantization.

use crate::tables::scalable::{COEFFICIENT_QUANT, COEFFICIENTS, LINEAR_MAX, POWER_MAX};

/// Ceiling of the power-law segment: 40 % of the linear range.
const POWER_CEILING: f64 = 40.0 * LINEAR_MAX as f64 / 100.0;
const POWER_EXPONENT: f64 = 0.4;

/// Scale counts to 11 bits relative to the pixel total.
pub fn linear(counts: &[u32; COEFFICIENTS]) -> [i32; COEFFICIENTS] {
    let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    if total == 0 {
        return [0; COEFFICIENTS];
    }
    std::array::from_fn(|i| {
        let scaled = f64::from(LINEAR_MAX) * (f64::from(counts[i]) / total as f64);
        ((scaled + 0.49999) as i32).min(LINEAR_MAX)
    })
}

/// Compress 11-bit bins to 4 bits with a `x^0.4` curve.
pub fn power_law(bins: &mut [i32; COEFFICIENTS]) {
    for bin in bins.iter_mut() {
        let value = f64::from(*bin);
        *bin = if value > POWER_CEILING {
            POWER_MAX
        } else {
            let curved = f64::from(POWER_MAX) * (value / POWER_CEILING).powf(POWER_EXPONENT);
            ((curved + 0.5) as i32).min(POWER_MAX)
        };
    }
}

/// Center each coefficient on its bias and clip to its bound.
pub fn coefficients(coeffs: &mut [i32; COEFFICIENTS]) {
    for (c, q) in coeffs.iter_mut().zip(&COEFFICIENT_QUANT) {
        *c = (*c - q.bias).clamp(-q.bound, q.bound);
    }
}

/// Drop `planes` low-order bit-planes.
///
/// Coefficients left with fewer than two bits collapse to a sign flag:
/// 1 for non-negative, 0 for negative.
pub fn discard_bit_planes(coeffs: &mut [i32; COEFFICIENTS], planes: u32) {
    if planes == 0 {
        return;
    }
    for (c, q) in coeffs.iter_mut().zip(&COEFFICIENT_QUANT) {
        let remaining = q.bits as i32 - planes as i32;
        *c = if remaining < 2 {
            i32::from(*c >= 0)
        } else {
            let magnitude = c.abs() >> planes;
            if *c < 0 { -magnitude } else { magnitude }
        };
    }
}
