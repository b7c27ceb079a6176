//! Non-uniform HMMD quantization: one bin index per pixel.

use rayon::prelude::*;

use crate::color_space::hmmd::{DIFF, HUE, MAX, MIN};
use crate::color_space::{ColorSpaceTag, PixelSample};
use crate::error::{DescriptorError, DescriptorResult};
use crate::raster::PixelRaster;
use crate::tables::structure::{HUE_DIVISOR, QuantLevel, subspace_for_diff};

/// Offset subtracted from the Min/Max midpoint before sum binning.
const SUM_OFFSET: f32 = 1.0 / 255.0;

/// An image reduced to CSD bin indices, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    pub width: usize,
    pub height: usize,
    pub level: QuantLevel,
    pub bins: Vec<u8>,
}

impl QuantizedImage {
    /// Bin index at `(x, y)`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.bins[y * self.width + x]
    }
}

/// Bin index of a single HMMD sample at `level`.
pub fn bin_index(sample: PixelSample, level: QuantLevel) -> DescriptorResult<u8> {
    let s = ColorSpaceTag::Hmmd.clamp(sample);

    let subspace = subspace_for_diff(s[DIFF]);
    let table = level.subspaces()[subspace];
    let start = level.start_positions()[subspace];

    let hue_bin = (s[HUE] / HUE_DIVISOR * table.hue_bins as f32) as usize;
    let sum = ((s[MIN] + s[MAX]) / 2.0 - SUM_OFFSET).max(0.0);
    let sum_bin = (sum * table.sum_bins as f32) as usize;

    check_bin(start + sum_bin * table.hue_bins + hue_bin, level)
}

/// Narrow a computed index to a byte, failing when it leaves the level.
pub fn check_bin(index: usize, level: QuantLevel) -> DescriptorResult<u8> {
    if index >= level.bins() {
        return Err(DescriptorError::Overflow {
            index,
            bins: level.bins(),
        });
    }
    Ok(index as u8)
}

/// Quantize every pixel of an HMMD raster.
///
/// The raster must already be validated. Rows are processed on the rayon
/// pool when `parallel` is set.
pub fn quantize_raster(
    raster: &dyn PixelRaster,
    level: QuantLevel,
    parallel: bool,
) -> DescriptorResult<QuantizedImage> {
    let width = raster.width();
    let height = raster.height();

    let row = |y: u32| -> DescriptorResult<Vec<u8>> {
        (0..width)
            .map(|x| bin_index(raster.pixel(x, y), level))
            .collect()
    };

    let rows: Vec<Vec<u8>> = if parallel {
        (0..height).into_par_iter().map(row).collect::<DescriptorResult<_>>()?
    } else {
        (0..height).map(row).collect::<DescriptorResult<_>>()?
    };

    tracing::trace!(width, height, bins = level.bins(), "quantized HMMD raster");

    Ok(QuantizedImage {
        width: width as usize,
        height: height as usize,
        level,
        bins: rows.concat(),
    })
}
