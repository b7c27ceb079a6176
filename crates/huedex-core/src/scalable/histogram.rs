//! 16 × 4 × 4 HSV histogram over a block-tiled raster.

use rayon::prelude::*;

use crate::color_space::{ColorSpaceTag, PixelSample};
use crate::error::{DescriptorError, DescriptorResult};
use crate::raster::PixelRaster;
use crate::tables::scalable::{COEFFICIENTS, HUE_BINS, SATURATION_BINS, VALUE_BINS};

/// Hue width of one bin. `360 + 1` keeps a hue of 360° in the last bin.
pub const HUE_SCALE: f32 = (360.0 + 1.0) / HUE_BINS as f32;
/// Saturation width of one bin, padded so that 1.0 stays in the last bin.
pub const SATURATION_SCALE: f32 = (1.0 + 1.0 / 255.0) / SATURATION_BINS as f32;
/// Value width of one bin, padded like saturation.
pub const VALUE_SCALE: f32 = (1.0 + 1.0 / 255.0) / VALUE_BINS as f32;

/// Linearized histogram: V outer, S middle, H inner.
pub type HsvHistogram = [u32; COEFFICIENTS];

/// How the raster is tiled into counting blocks.
///
/// Pixels beyond `blocks × block_size` on either axis are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub x_blocks: u32,
    pub y_blocks: u32,
    pub block_width: u32,
    pub block_height: u32,
}

impl BlockLayout {
    /// Tile a `width × height` raster into `blocks = [x, y]` blocks. Block
    /// counts larger than the image are clamped to one pixel per block.
    pub fn new(blocks: [u32; 2], width: u32, height: u32) -> DescriptorResult<Self> {
        let [x_req, y_req] = blocks;
        if x_req == 0 || y_req == 0 {
            return Err(DescriptorError::Configuration(format!(
                "block counts must be positive, got {x_req}x{y_req}"
            )));
        }
        if width == 0 || height == 0 {
            return Err(DescriptorError::Configuration(format!(
                "empty raster ({width}x{height})"
            )));
        }

        let x_blocks = x_req.min(width);
        let y_blocks = y_req.min(height);
        if (x_blocks, y_blocks) != (x_req, y_req) {
            tracing::warn!(
                requested = ?blocks,
                used = ?[x_blocks, y_blocks],
                "SCD block counts clamped to image size"
            );
        }

        Ok(Self {
            x_blocks,
            y_blocks,
            block_width: width / x_blocks,
            block_height: height / y_blocks,
        })
    }

    /// Width of the counted region.
    pub fn covered_width(&self) -> u32 {
        self.x_blocks * self.block_width
    }

    /// Height of the counted region.
    pub fn covered_height(&self) -> u32 {
        self.y_blocks * self.block_height
    }
}

/// Linear bin of one HSV sample.
pub fn bin_of(sample: PixelSample) -> usize {
    let [h, s, v, _] = ColorSpaceTag::Hsv.clamp(sample);
    let h_bin = ((h / HUE_SCALE) as usize).min(HUE_BINS - 1);
    let s_bin = ((s / SATURATION_SCALE) as usize).min(SATURATION_BINS - 1);
    let v_bin = ((v / VALUE_SCALE) as usize).min(VALUE_BINS - 1);
    (v_bin * SATURATION_BINS + s_bin) * HUE_BINS + h_bin
}

fn count_row(raster: &dyn PixelRaster, y: u32, width: u32, hist: &mut HsvHistogram) {
    for x in 0..width {
        hist[bin_of(raster.pixel(x, y))] += 1;
    }
}

/// Count every covered pixel of an HSV raster into the linearized histogram.
pub fn hsv_histogram(raster: &dyn PixelRaster, layout: BlockLayout, parallel: bool) -> HsvHistogram {
    let width = layout.covered_width();
    let height = layout.covered_height();

    if parallel {
        (0..height)
            .into_par_iter()
            .fold(
                || [0u32; COEFFICIENTS],
                |mut acc, y| {
                    count_row(raster, y, width, &mut acc);
                    acc
                },
            )
            .reduce(
                || [0u32; COEFFICIENTS],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            )
    } else {
        let mut acc = [0u32; COEFFICIENTS];
        for y in 0..height {
            count_row(raster, y, width, &mut acc);
        }
        acc
    }
}
