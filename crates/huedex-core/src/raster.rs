//! Pixel raster access for descriptor extraction.
//!
//! Engines read pixels through [`PixelRaster`], so any image store can be
//! fed to them. [`ColorImage`] is the in-crate implementation, with adapters
//! from the `image` crate's decoded buffers.

use rayon::prelude::*;

use crate::color_space::{self, ColorSpaceTag, PixelSample};
use crate::error::{DescriptorError, DescriptorResult};

/// Read-only pixel accessor over a tagged raster.
///
/// `Sync` so that extraction can scan horizontal strips in parallel.
pub trait PixelRaster: Sync {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Color space the components are expressed in.
    fn color_space(&self) -> ColorSpaceTag;
    /// Sample at `(x, y)`. Callers stay within `width × height`.
    fn pixel(&self, x: u32, y: u32) -> PixelSample;

    /// Whether the raster has no pixels.
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Reject rasters that are empty or tagged with a different color space.
pub fn validate_raster(raster: &dyn PixelRaster, expected: ColorSpaceTag) -> DescriptorResult<()> {
    if raster.color_space() != expected {
        return Err(DescriptorError::WrongColorSpace {
            expected,
            actual: raster.color_space(),
        });
    }
    if raster.is_empty() {
        return Err(DescriptorError::Configuration(format!(
            "empty raster ({}x{})",
            raster.width(),
            raster.height()
        )));
    }
    Ok(())
}

/// In-memory raster, row-major, one [`PixelSample`] per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Color space of `pixels`.
    pub space: ColorSpaceTag,
    /// Pixel data, `width * height` samples.
    pub pixels: Vec<PixelSample>,
}

impl ColorImage {
    /// Wrap existing pixel data. The buffer length must equal
    /// `width * height`.
    pub fn new(
        width: u32,
        height: u32,
        space: ColorSpaceTag,
        pixels: Vec<PixelSample>,
    ) -> DescriptorResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DescriptorError::Configuration(format!(
                "pixel buffer holds {} samples, {width}x{height} needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            space,
            pixels,
        })
    }

    /// A raster filled with one sample.
    pub fn uniform(width: u32, height: u32, space: ColorSpaceTag, sample: PixelSample) -> Self {
        Self {
            width,
            height,
            space,
            pixels: vec![space.clamp(sample); width as usize * height as usize],
        }
    }

    /// Build an RGB raster from normalized RGB values produced per pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [f32; 3]) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| color_space::from_rgb(f(x, y), ColorSpaceTag::Rgb))
            .collect();
        Self {
            width,
            height,
            space: ColorSpaceTag::Rgb,
            pixels,
        }
    }

    /// Adapt an 8-bit RGB buffer; components are normalized to [0, 1].
    pub fn from_rgb8(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0.map(|c| f32::from(c) / 255.0);
                [r, g, b, 0.0]
            })
            .collect();
        Self {
            width,
            height,
            space: ColorSpaceTag::Rgb,
            pixels,
        }
    }

    /// Adapt any decoded image. Alpha is dropped.
    pub fn from_dynamic(img: &image::DynamicImage) -> Self {
        let rgb = img.to_rgb32f();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| color_space::from_rgb(p.0, ColorSpaceTag::Rgb))
            .collect();
        Self {
            width,
            height,
            space: ColorSpaceTag::Rgb,
            pixels,
        }
    }

    /// Copy of this raster with every pixel converted into `to`, on the rayon
    /// pool.
    pub fn convert(&self, to: ColorSpaceTag) -> Self {
        self.convert_with(to, true)
    }

    /// Like [`convert`](Self::convert), single-threaded unless `parallel`.
    pub fn convert_with(&self, to: ColorSpaceTag, parallel: bool) -> Self {
        let from = self.space;
        let pixels = if parallel {
            self.pixels
                .par_iter()
                .map(|&sample| color_space::convert(sample, from, to))
                .collect()
        } else {
            self.pixels
                .iter()
                .map(|&sample| color_space::convert(sample, from, to))
                .collect()
        };
        tracing::trace!(%from, %to, width = self.width, height = self.height, "converted raster");
        Self {
            width: self.width,
            height: self.height,
            space: to,
            pixels,
        }
    }
}

impl PixelRaster for ColorImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_space(&self) -> ColorSpaceTag {
        self.space
    }

    fn pixel(&self, x: u32, y: u32) -> PixelSample {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}
