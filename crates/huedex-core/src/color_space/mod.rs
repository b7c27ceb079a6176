//! Color space conversions — RGB to and from HSV, HSI and HMMD.
//!
//! Every conversion takes and returns a `[f32; 4]` pixel sample. Three
//! component spaces leave the last slot at zero. Inputs are clamped to the
//! source space's declared ranges before conversion, and outputs are clamped
//! to the destination ranges afterwards.

pub mod hmmd;
pub mod hsi;
pub mod hsv;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use hmmd::{hmmd_to_rgb, rgb_to_hmmd};
pub use hsi::{hsi_to_rgb, rgb_to_hsi};
pub use hsv::{hsv_to_rgb, rgb_to_hsv};

/// A pixel sample: up to four float components in some color space.
pub type PixelSample = [f32; 4];

/// Identifies the color space a raster's components are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpaceTag {
    /// Normalized RGB, each component in [0, 1].
    Rgb,
    /// Hue in degrees [0, 360], saturation and value in [0, 1].
    Hsv,
    /// Hue in radians [0, 2π], saturation and intensity in [0, 1].
    Hsi,
    /// Hue in degrees [0, 360], then max, min and diff in [0, 1].
    Hmmd,
}

impl ColorSpaceTag {
    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Hsv => "HSV",
            Self::Hsi => "HSI",
            Self::Hmmd => "HMMD",
        }
    }

    /// Number of meaningful components in a sample.
    pub const fn components(&self) -> usize {
        match self {
            Self::Hmmd => 4,
            _ => 3,
        }
    }

    /// Short component names, in sample order.
    pub const fn component_names(&self) -> &'static [&'static str] {
        match self {
            Self::Rgb => &["R", "G", "B"],
            Self::Hsv => &["H", "S", "V"],
            Self::Hsi => &["H", "S", "I"],
            Self::Hmmd => &["Hue", "Max", "Min", "Diff"],
        }
    }

    /// Declared `(min, max)` range of component `index`.
    ///
    /// Indices past the component count report `(0, 0)`.
    pub fn range(&self, index: usize) -> (f32, f32) {
        if index >= self.components() {
            return (0.0, 0.0);
        }
        match (self, index) {
            (Self::Hsv | Self::Hmmd, 0) => (0.0, 360.0),
            (Self::Hsi, 0) => (0.0, std::f32::consts::TAU),
            _ => (0.0, 1.0),
        }
    }

    /// Clamp every component of `sample` into this space's declared ranges.
    pub fn clamp(&self, sample: PixelSample) -> PixelSample {
        let mut out = [0.0; 4];
        for (i, slot) in out.iter_mut().enumerate().take(self.components()) {
            let (lo, hi) = self.range(i);
            *slot = sample[i].clamp(lo, hi);
        }
        out
    }

    /// Built-in color spaces.
    pub fn all() -> &'static [Self] {
        const ALL: [ColorSpaceTag; 4] = [
            ColorSpaceTag::Rgb,
            ColorSpaceTag::Hsv,
            ColorSpaceTag::Hsi,
            ColorSpaceTag::Hmmd,
        ];
        &ALL
    }
}

impl fmt::Display for ColorSpaceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Convert a normalized RGB sample into `to`.
pub fn from_rgb(rgb: [f32; 3], to: ColorSpaceTag) -> PixelSample {
    match to {
        ColorSpaceTag::Rgb => ColorSpaceTag::Rgb.clamp([rgb[0], rgb[1], rgb[2], 0.0]),
        ColorSpaceTag::Hsv => widen(rgb_to_hsv(rgb)),
        ColorSpaceTag::Hsi => widen(rgb_to_hsi(rgb)),
        ColorSpaceTag::Hmmd => rgb_to_hmmd(rgb),
    }
}

/// Convert a sample expressed in `from` back to normalized RGB.
pub fn to_rgb(sample: PixelSample, from: ColorSpaceTag) -> [f32; 3] {
    let three = [sample[0], sample[1], sample[2]];
    match from {
        ColorSpaceTag::Rgb => three.map(|c| c.clamp(0.0, 1.0)),
        ColorSpaceTag::Hsv => hsv_to_rgb(three),
        ColorSpaceTag::Hsi => hsi_to_rgb(three),
        ColorSpaceTag::Hmmd => hmmd_to_rgb(sample),
    }
}

/// Convert a sample between any two supported spaces, routing through RGB.
pub fn convert(sample: PixelSample, from: ColorSpaceTag, to: ColorSpaceTag) -> PixelSample {
    if from == to {
        return from.clamp(sample);
    }
    from_rgb(to_rgb(sample, from), to)
}

fn widen(v: [f32; 3]) -> PixelSample {
    [v[0], v[1], v[2], 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_convert_same_space_only_clamps() {
        let out = convert([400.0, 1.5, -0.2, 9.0], ColorSpaceTag::Hsv, ColorSpaceTag::Hsv);
        assert_eq!(out, [360.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_convert_hsv_to_hsi_matches_rgb_route() {
        let rgb = [0.8, 0.3, 0.1];
        let hsv = from_rgb(rgb, ColorSpaceTag::Hsv);
        let direct = from_rgb(rgb, ColorSpaceTag::Hsi);
        let routed = convert(hsv, ColorSpaceTag::Hsv, ColorSpaceTag::Hsi);
        for i in 0..3 {
            assert!((direct[i] - routed[i]).abs() < EPSILON, "component {i}");
        }
    }

    #[test]
    fn test_ranges_cover_components() {
        for space in ColorSpaceTag::all() {
            assert_eq!(space.component_names().len(), space.components());
            for i in 0..space.components() {
                let (lo, hi) = space.range(i);
                assert!(hi > lo);
            }
        }
    }
}
