//! MPEG-7 Scalable Color Descriptor (SCD).
//!
//! ```text
//! HSV raster ─► 16×4×4 histogram ─► 11-bit linear ─► 4-bit power law
//!            ─► Haar (256 coefficients) ─► bias/clip ─► bit-plane discard
//!            ─► first N coefficients ─► sign/magnitude bytes
//! ```

pub mod codec;
pub mod haar;
pub mod histogram;
pub mod quantize;

use serde::{Deserialize, Serialize};

use crate::color_space::ColorSpaceTag;
use crate::compare::{ensure_matching, ensure_populated, l1_distance};
use crate::error::{DescriptorError, DescriptorResult};
use crate::raster::{PixelRaster, validate_raster};

pub use histogram::{BlockLayout, HsvHistogram, hsv_histogram};

/// Accepted coefficient counts.
pub const COEFFICIENT_COUNTS: [u32; 5] = [16, 32, 64, 128, 256];

/// Largest number of bit-planes that may be discarded.
pub const MAX_BIT_PLANES_DISCARDED: u32 = 8;

/// Construction parameters that must match for two SCDs to be comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScalableParams {
    pub coefficients: u32,
    pub bit_planes_discarded: u32,
}

impl ScalableParams {
    /// Validated parameters.
    pub fn new(coefficients: u32, bit_planes_discarded: u32) -> DescriptorResult<Self> {
        if !COEFFICIENT_COUNTS.contains(&coefficients) {
            return Err(DescriptorError::Configuration(format!(
                "SCD coefficient count {coefficients} is not one of {COEFFICIENT_COUNTS:?}"
            )));
        }
        if bit_planes_discarded > MAX_BIT_PLANES_DISCARDED {
            return Err(DescriptorError::Configuration(format!(
                "cannot discard {bit_planes_discarded} bit-planes (max {MAX_BIT_PLANES_DISCARDED})"
            )));
        }
        Ok(Self {
            coefficients,
            bit_planes_discarded,
        })
    }
}

impl Default for ScalableParams {
    fn default() -> Self {
        Self {
            coefficients: 256,
            bit_planes_discarded: 0,
        }
    }
}

/// A Scalable Color Descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalableColor {
    params: ScalableParams,
    blocks: [u32; 2],
    parallel: bool,
    coeffs: Option<Vec<i32>>,
}

impl ScalableColor {
    /// Required color space of input rasters.
    pub const COLOR_SPACE: ColorSpaceTag = ColorSpaceTag::Hsv;

    /// Empty descriptor with validated parameters.
    pub fn new(coefficients: u32, bit_planes_discarded: u32) -> DescriptorResult<Self> {
        Ok(Self::with_params(ScalableParams::new(coefficients, bit_planes_discarded)?))
    }

    pub fn with_params(params: ScalableParams) -> Self {
        Self {
            params,
            blocks: [1, 1],
            parallel: true,
            coeffs: None,
        }
    }

    /// Tile the histogram over `[x, y]` blocks. Checked at compute time.
    pub fn with_blocks(mut self, blocks: [u32; 2]) -> Self {
        self.blocks = blocks;
        self
    }

    /// Choose between the rayon and the single-threaded scan.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn params(&self) -> ScalableParams {
        self.params
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Quantized coefficients in canonical order, once computed or decoded.
    pub fn coefficients(&self) -> Option<&[i32]> {
        self.coeffs.as_deref()
    }

    pub fn is_computed(&self) -> bool {
        self.coeffs.is_some()
    }

    /// Extract the descriptor from an HSV raster. Computing again replaces
    /// the previous coefficients.
    pub fn compute(&mut self, raster: &dyn PixelRaster) -> DescriptorResult<()> {
        validate_raster(raster, Self::COLOR_SPACE)?;

        let layout = BlockLayout::new(self.blocks, raster.width(), raster.height())?;
        let counts = hsv_histogram(raster, layout, self.parallel);

        let mut bins = quantize::linear(&counts);
        quantize::power_law(&mut bins);
        let mut coeffs = haar::forward(&bins);
        quantize::coefficients(&mut coeffs);
        quantize::discard_bit_planes(&mut coeffs, self.params.bit_planes_discarded);

        tracing::debug!(
            covered_width = layout.covered_width(),
            covered_height = layout.covered_height(),
            coefficients = self.params.coefficients,
            bit_planes_discarded = self.params.bit_planes_discarded,
            "computed scalable color descriptor"
        );
        self.coeffs = Some(coeffs[..self.params.coefficients as usize].to_vec());
        Ok(())
    }

    /// Sum of absolute coefficient differences.
    ///
    /// Both sides must share coefficient count and discarded bit-planes.
    pub fn compare(&self, other: &Self) -> DescriptorResult<f64> {
        ensure_matching(
            "bit-planes discarded",
            self.params.bit_planes_discarded,
            other.params.bit_planes_discarded,
        )?;
        ensure_matching("coefficient count", self.params.coefficients, other.params.coefficients)?;
        let a = ensure_populated(self.coeffs.as_ref())?;
        let b = ensure_populated(other.coeffs.as_ref())?;
        l1_distance(a, b)
    }

    /// Magnitude bytes followed by sign bytes.
    pub fn serialize(&self) -> DescriptorResult<Vec<u8>> {
        let coeffs = ensure_populated(self.coeffs.as_ref())?;
        Ok(codec::encode(coeffs))
    }

    /// Decode a feature vector written by [`serialize`](Self::serialize).
    pub fn deserialize(bytes: &[u8], params: ScalableParams) -> DescriptorResult<Self> {
        let params = ScalableParams::new(params.coefficients, params.bit_planes_discarded)?;
        let coeffs = codec::decode(bytes, params.coefficients as usize)?;
        Ok(Self {
            coeffs: Some(coeffs),
            ..Self::with_params(params)
        })
    }

    /// Add another descriptor's coefficients into this one. Both sides must
    /// share their parameters.
    pub fn accumulate(&mut self, other: &Self) -> DescriptorResult<()> {
        ensure_matching("SCD parameters", self.params, other.params)?;
        let incoming = ensure_populated(other.coeffs.as_ref())?;
        let coeffs = self.coeffs.as_mut().ok_or(DescriptorError::Unpopulated)?;
        for (c, &add) in coeffs.iter_mut().zip(incoming) {
            *c = c.saturating_add(add);
        }
        Ok(())
    }

    /// Multiply every coefficient by `factor`, rounding to the nearest integer.
    pub fn scale(&mut self, factor: f32) -> DescriptorResult<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(DescriptorError::Configuration(format!(
                "scale factor must be finite and non-negative, got {factor}"
            )));
        }
        let coeffs = self.coeffs.as_mut().ok_or(DescriptorError::Unpopulated)?;
        for c in coeffs.iter_mut() {
            *c = (f64::from(*c) * f64::from(factor)).round() as i32;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ColorImage;

    fn hsv_raster(f: impl Fn(u32, u32) -> [f32; 3]) -> ColorImage {
        ColorImage::from_fn(24, 20, f).convert(ColorSpaceTag::Hsv)
    }

    fn mixed() -> ColorImage {
        hsv_raster(|x, y| [x as f32 / 23.0, y as f32 / 19.0, 0.4])
    }

    #[test]
    fn test_params_reject_invalid_counts() {
        assert!(ScalableParams::new(48, 0).unwrap_err().is_configuration());
        assert!(ScalableParams::new(64, 9).unwrap_err().is_configuration());
        assert!(ScalableParams::new(16, 8).is_ok());
    }

    #[test]
    fn test_uniform_red_dc_dominates() {
        let raster = hsv_raster(|_, _| [1.0, 0.0, 0.0]);
        let mut scd = ScalableColor::new(256, 0).unwrap();
        scd.compute(&raster).unwrap();
        let coeffs = scd.coefficients().unwrap();
        assert_eq!(coeffs.len(), 256);
        assert_eq!(coeffs[0], 15 - 217);
        let dc = coeffs[0].abs();
        assert!(coeffs[1..].iter().all(|&c| c.abs() < dc));
    }

    #[test]
    fn test_coefficient_count_truncates() {
        let raster = mixed();
        let mut full = ScalableColor::new(256, 0).unwrap();
        full.compute(&raster).unwrap();
        let mut short = ScalableColor::new(32, 0).unwrap();
        short.compute(&raster).unwrap();
        assert_eq!(short.coefficients().unwrap(), &full.coefficients().unwrap()[..32]);
    }

    #[test]
    fn test_compute_rejects_hmmd_raster() {
        let raster = ColorImage::uniform(8, 8, ColorSpaceTag::Hmmd, [0.0; 4]);
        let err = ScalableColor::new(64, 0).unwrap().compute(&raster).unwrap_err();
        assert!(matches!(err, DescriptorError::WrongColorSpace { .. }));
    }

    #[test]
    fn test_compare_self_is_zero() {
        let mut scd = ScalableColor::new(128, 2).unwrap();
        scd.compute(&mixed()).unwrap();
        assert_eq!(scd.compare(&scd).unwrap(), 0.0);
    }

    #[test]
    fn test_compare_rejects_mismatched_params() {
        let raster = mixed();
        let mut a = ScalableColor::new(64, 0).unwrap();
        a.compute(&raster).unwrap();
        let mut b = ScalableColor::new(64, 1).unwrap();
        b.compute(&raster).unwrap();
        assert!(matches!(a.compare(&b), Err(DescriptorError::IncompatibleOperands(_))));
        let mut c = ScalableColor::new(32, 0).unwrap();
        c.compute(&raster).unwrap();
        assert!(matches!(a.compare(&c), Err(DescriptorError::IncompatibleOperands(_))));
    }

    #[test]
    fn test_compare_unpopulated_fails() {
        let a = ScalableColor::new(64, 0).unwrap();
        let mut b = ScalableColor::new(64, 0).unwrap();
        b.compute(&mixed()).unwrap();
        assert!(matches!(a.compare(&b), Err(DescriptorError::Unpopulated)));
    }

    #[test]
    fn test_serialize_roundtrip_is_lossless() {
        let mut scd = ScalableColor::new(64, 0).unwrap();
        scd.compute(&mixed()).unwrap();
        let bytes = scd.serialize().unwrap();
        assert_eq!(bytes.len(), 64 + 8);
        let back = ScalableColor::deserialize(&bytes, scd.params()).unwrap();
        assert_eq!(back.coefficients(), scd.coefficients());
        assert_eq!(back.compare(&scd).unwrap(), 0.0);
    }

    #[test]
    fn test_blocks_drop_remainder_pixels() {
        // Five blocks of 4 columns cover x < 20; the blue columns past that are skipped.
        let raster = hsv_raster(|x, _| if x >= 20 { [0.0, 0.0, 1.0] } else { [0.0, 1.0, 0.0] });
        let green = hsv_raster(|_, _| [0.0, 1.0, 0.0]);
        let mut tiled = ScalableColor::new(256, 0).unwrap().with_blocks([5, 1]);
        tiled.compute(&raster).unwrap();
        let mut plain = ScalableColor::new(256, 0).unwrap();
        plain.compute(&green).unwrap();
        assert_eq!(tiled.compare(&plain).unwrap(), 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let raster = mixed();
        let mut seq = ScalableColor::new(256, 3).unwrap().with_parallel(false);
        seq.compute(&raster).unwrap();
        let mut par = ScalableColor::new(256, 3).unwrap();
        par.compute(&raster).unwrap();
        assert_eq!(seq.coefficients(), par.coefficients());
    }

    #[test]
    fn test_accumulate_then_scale_averages() {
        let mut sum = ScalableColor::new(128, 1).unwrap();
        sum.compute(&mixed()).unwrap();
        let single = sum.clone();
        sum.accumulate(&single).unwrap();
        sum.accumulate(&single).unwrap();
        sum.scale(1.0 / 3.0).unwrap();
        assert_eq!(sum.coefficients(), single.coefficients());
    }

    #[test]
    fn test_accumulate_rejects_mismatched_or_empty() {
        let mut a = ScalableColor::new(64, 0).unwrap();
        a.compute(&mixed()).unwrap();
        let mut b = ScalableColor::new(64, 2).unwrap();
        b.compute(&mixed()).unwrap();
        let err = a.accumulate(&b).unwrap_err();
        assert!(matches!(err, DescriptorError::IncompatibleOperands(_)));

        let empty = ScalableColor::new(64, 0).unwrap();
        assert!(matches!(a.accumulate(&empty), Err(DescriptorError::Unpopulated)));
        let mut empty = empty;
        assert!(matches!(empty.accumulate(&a), Err(DescriptorError::Unpopulated)));
        assert!(matches!(empty.scale(0.5), Err(DescriptorError::Unpopulated)));
    }

    #[test]
    fn test_scale_rejects_negative_factor() {
        let mut scd = ScalableColor::new(32, 0).unwrap();
        scd.compute(&mixed()).unwrap();
        assert!(scd.scale(-1.0).unwrap_err().is_configuration());
        assert!(scd.scale(f32::NAN).unwrap_err().is_configuration());
    }

    #[test]
    fn test_scale_doubles_coefficients() {
        let mut scd = ScalableColor::new(64, 0).unwrap();
        scd.compute(&mixed()).unwrap();
        let before = scd.coefficients().unwrap().to_vec();
        scd.scale(2.0).unwrap();
        let doubled: Vec<i32> = before.iter().map(|c| c * 2).collect();
        assert_eq!(scd.coefficients().unwrap(), doubled.as_slice());
    }

    #[test]
    fn test_recompute_replaces_coefficients() {
        let mut scd = ScalableColor::new(64, 0).unwrap();
        scd.compute(&mixed()).unwrap();
        scd.compute(&hsv_raster(|_, _| [0.0, 0.0, 1.0])).unwrap();
        let mut fresh = ScalableColor::new(64, 0).unwrap();
        fresh.compute(&hsv_raster(|_, _| [0.0, 0.0, 1.0])).unwrap();
        assert_eq!(scd.coefficients(), fresh.coefficients());
    }
}
