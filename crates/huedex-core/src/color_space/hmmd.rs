//! RGB ↔ HMMD (hue, max, min, diff), the color space of the MPEG-7 Color
//! Structure Descriptor.
//!
//! ```text
//! Hue  = HSV hue in degrees
//! Max  = max(R, G, B)
//! Min  = min(R, G, B)
//! Diff = Max − Min
//! ```

use super::PixelSample;
use super::hsv::{hsv_to_rgb, rgb_to_hsv};

/// Component slots of an HMMD sample.
pub const HUE: usize = 0;
pub const MAX: usize = 1;
pub const MIN: usize = 2;
pub const DIFF: usize = 3;

/// Convert normalized RGB to `[Hue, Max, Min, Diff]`.
pub fn rgb_to_hmmd(rgb: [f32; 3]) -> PixelSample {
    let [r, g, b] = rgb.map(|c| c.clamp(0.0, 1.0));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let hue = rgb_to_hsv([r, g, b])[0];
    [hue, max, min, max - min]
}

/// Convert `[Hue, Max, Min, Diff]` back to normalized RGB.
///
/// Goes through HSV with `V = Max` and `S = (Max − Min) / Max`. The diff slot
/// is redundant with max and min and is ignored.
pub fn hmmd_to_rgb(hmmd: PixelSample) -> [f32; 3] {
    let max = hmmd[MAX].clamp(0.0, 1.0);
    let min = hmmd[MIN].clamp(0.0, max);
    let s = if max == 0.0 { 0.0 } else { (max - min) / max };
    hsv_to_rgb([hmmd[HUE], s, max])
}
