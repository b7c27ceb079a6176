//! MPEG-7 Color Structure Descriptor (CSD).
//!
//! Extraction runs in three stages over an HMMD raster:
//!
//! 1. [`quantize`] maps every pixel to one of 32–256 non-uniform bins.
//! 2. [`histogram`] slides the structuring window and counts bin presence.
//! 3. The normalized counts are re-quantized to 8-bit codes with
//!    [`quant_func`].
//!
//! Descriptors at different levels are compared after [`resize`]-ing the
//! finer one down.

pub mod histogram;
pub mod quantize;
pub mod resize;

use crate::color_space::ColorSpaceTag;
use crate::compare::{ensure_populated, l1_distance};
use crate::error::{DescriptorError, DescriptorResult};
use crate::raster::{PixelRaster, validate_raster};
use crate::tables::structure::{QuantLevel, quant_func};

pub use histogram::{StructureHistogram, WindowGeometry, structure_histogram};
pub use quantize::{QuantizedImage, quantize_raster};
pub use resize::resize;

/// Largest value a single re-quantized bin takes.
pub const BIN_MAX: u32 = 255;

/// A Color Structure Descriptor.
///
/// Bins are kept as `u32` so that [`accumulate`](Self::accumulate) can sum
/// descriptors over a frame set before [`scale`](Self::scale) averages them.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStructure {
    level: QuantLevel,
    histogram: Option<Vec<u32>>,
    parallel: bool,
}

impl ColorStructure {
    /// Required color space of input rasters.
    pub const COLOR_SPACE: ColorSpaceTag = ColorSpaceTag::Hmmd;

    /// Empty descriptor for a requested bin count, rounded down to a
    /// supported level.
    pub fn new(requested_levels: u32) -> DescriptorResult<Self> {
        Ok(Self::with_level(QuantLevel::from_requested(requested_levels)?))
    }

    /// Empty descriptor at an exact level.
    pub fn with_level(level: QuantLevel) -> Self {
        Self {
            level,
            histogram: None,
            parallel: true,
        }
    }

    /// Choose between the rayon and the single-threaded scan.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn level(&self) -> QuantLevel {
        self.level
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Bin values, once computed or decoded.
    pub fn histogram(&self) -> Option<&[u32]> {
        self.histogram.as_deref()
    }

    pub fn is_computed(&self) -> bool {
        self.histogram.is_some()
    }

    /// Extract the descriptor from an HMMD raster. Computing again replaces
    /// the previous histogram.
    pub fn compute(&mut self, raster: &dyn PixelRaster) -> DescriptorResult<()> {
        validate_raster(raster, Self::COLOR_SPACE)?;

        let quantized = quantize_raster(raster, self.level, self.parallel)?;
        let structure = structure_histogram(&quantized, self.parallel);
        let bins = structure
            .normalized()
            .into_iter()
            .map(|x| u32::from(quant_func(x)))
            .collect();

        tracing::debug!(
            bins = self.level.bins(),
            placements = structure.placements,
            "computed color structure descriptor"
        );
        self.histogram = Some(bins);
        Ok(())
    }

    /// Bins resized to a coarser or equal level.
    pub fn resized(&self, to: QuantLevel) -> DescriptorResult<Vec<u32>> {
        let bins = ensure_populated(self.histogram.as_ref())?;
        resize(bins, self.level, to)
    }

    /// L1 distance normalized by `256 × bins`, in [0, 1] for
    /// freshly computed descriptors.
    ///
    /// The finer of two descriptors at different levels is resized down to
    /// the coarser one first.
    pub fn compare(&self, other: &Self) -> DescriptorResult<f64> {
        ensure_populated(self.histogram.as_ref())?;
        ensure_populated(other.histogram.as_ref())?;

        let level = self.level.min(other.level);
        let a = self.resized(level)?;
        let b = other.resized(level)?;
        Ok(l1_distance(&a, &b)? / (256.0 * level.bins() as f64))
    }

    /// One byte per bin. Values above 255 (after accumulation) saturate.
    pub fn serialize(&self) -> DescriptorResult<Vec<u8>> {
        let bins = ensure_populated(self.histogram.as_ref())?;
        Ok(bins.iter().map(|&v| v.min(BIN_MAX) as u8).collect())
    }

    /// Decode a feature vector written by [`serialize`](Self::serialize).
    pub fn deserialize(bytes: &[u8], level: QuantLevel) -> DescriptorResult<Self> {
        if bytes.len() != level.bins() {
            return Err(DescriptorError::Configuration(format!(
                "CSD feature vector has {} bytes, level expects {}",
                bytes.len(),
                level.bins()
            )));
        }
        Ok(Self {
            level,
            histogram: Some(bytes.iter().map(|&b| u32::from(b)).collect()),
            parallel: true,
        })
    }

    /// Add another descriptor's bins into this one. A finer `other` is
    /// resized to this level first.
    pub fn accumulate(&mut self, other: &Self) -> DescriptorResult<()> {
        let incoming = other.resized(self.level)?;
        let bins = self.histogram.as_mut().ok_or(DescriptorError::Unpopulated)?;
        for (bin, add) in bins.iter_mut().zip(incoming) {
            *bin = bin.saturating_add(add);
        }
        Ok(())
    }

    /// Multiply every bin by `factor`, rounding to the nearest integer.
    pub fn scale(&mut self, factor: f32) -> DescriptorResult<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(DescriptorError::Configuration(format!(
                "scale factor must be finite and non-negative, got {factor}"
            )));
        }
        let bins = self.histogram.as_mut().ok_or(DescriptorError::Unpopulated)?;
        for bin in bins.iter_mut() {
            *bin = (f64::from(*bin) * f64::from(factor)).round() as u32;
        }
        Ok(())
    }
}
