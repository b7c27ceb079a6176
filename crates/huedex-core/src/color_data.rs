//! Color Data descriptor: one representative color in a chosen space.

use crate::color_space::{ColorSpaceTag, PixelSample};
use crate::compare::{ensure_matching, ensure_populated, euclidean_distance};
use crate::error::{DescriptorError, DescriptorResult};
use crate::raster::{PixelRaster, validate_raster};

/// A single color, compared by Euclidean distance between components.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorData {
    space: ColorSpaceTag,
    color: Option<PixelSample>,
}

impl ColorData {
    /// Empty descriptor measuring colors in `space`.
    pub fn new(space: ColorSpaceTag) -> Self {
        Self { space, color: None }
    }

    /// Descriptor holding a known color.
    pub fn from_color(space: ColorSpaceTag, color: PixelSample) -> Self {
        Self {
            space,
            color: Some(space.clamp(color)),
        }
    }

    pub fn space(&self) -> ColorSpaceTag {
        self.space
    }

    pub fn color(&self) -> Option<PixelSample> {
        self.color
    }

    pub fn is_computed(&self) -> bool {
        self.color.is_some()
    }

    /// Store the per-component mean of a raster in this descriptor's space.
    pub fn compute(&mut self, raster: &dyn PixelRaster) -> DescriptorResult<()> {
        validate_raster(raster, self.space)?;

        let mut sum = [0f64; 4];
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                let p = raster.pixel(x, y);
                for (acc, c) in sum.iter_mut().zip(p) {
                    *acc += f64::from(c);
                }
            }
        }
        let n = f64::from(raster.width()) * f64::from(raster.height());
        let mean = sum.map(|s| (s / n) as f32);

        tracing::debug!(space = %self.space, ?mean, "computed color data descriptor");
        self.color = Some(self.space.clamp(mean));
        Ok(())
    }

    /// Euclidean distance between the two colors. Spaces must match.
    pub fn compare(&self, other: &Self) -> DescriptorResult<f64> {
        ensure_matching("color space", self.space, other.space)?;
        let a = ensure_populated(self.color.as_ref())?;
        let b = ensure_populated(other.color.as_ref())?;
        let n = self.space.components();
        euclidean_distance(&a[..n], &b[..n])
    }

    /// Components as little-endian `f32`s.
    pub fn serialize(&self) -> DescriptorResult<Vec<u8>> {
        let color = ensure_populated(self.color.as_ref())?;
        Ok(color[..self.space.components()]
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect())
    }

    /// Decode a feature vector written by [`serialize`](Self::serialize).
    pub fn deserialize(bytes: &[u8], space: ColorSpaceTag) -> DescriptorResult<Self> {
        let n = space.components();
        if bytes.len() != n * 4 {
            return Err(DescriptorError::Configuration(format!(
                "color data feature vector has {} bytes, {space} needs {}",
                bytes.len(),
                n * 4
            )));
        }
        let mut color = [0f32; 4];
        for (slot, chunk) in color.iter_mut().zip(bytes.chunks_exact(4)) {
            *slot = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Self::from_color(space, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ColorImage;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_compute_takes_mean() {
        let raster = ColorImage::from_fn(4, 2, |x, _| if x < 2 { [1.0, 0.0, 0.0] } else { [0.0, 0.0, 1.0] });
        let mut data = ColorData::new(ColorSpaceTag::Rgb);
        data.compute(&raster).unwrap();
        assert_eq!(data.color(), Some([0.5, 0.0, 0.5, 0.0]));
    }

    #[test]
    fn test_compare_is_euclidean() {
        let a = ColorData::from_color(ColorSpaceTag::Rgb, [0.0, 0.0, 0.0, 0.0]);
        let b = ColorData::from_color(ColorSpaceTag::Rgb, [0.3, 0.4, 0.0, 0.0]);
        assert!((a.compare(&b).unwrap() - 0.5).abs() < EPSILON);
        assert!(a.compare(&a).unwrap().abs() < EPSILON);
    }

    #[test]
    fn test_compare_rejects_space_mismatch() {
        let a = ColorData::from_color(ColorSpaceTag::Rgb, [0.0; 4]);
        let b = ColorData::from_color(ColorSpaceTag::Hsv, [0.0; 4]);
        assert!(matches!(a.compare(&b), Err(DescriptorError::IncompatibleOperands(_))));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let a = ColorData::from_color(ColorSpaceTag::Hmmd, [200.0, 0.8, 0.1, 0.7]);
        let bytes = a.serialize().unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(ColorData::deserialize(&bytes, ColorSpaceTag::Hmmd).unwrap(), a);
    }

    #[test]
    fn test_compute_requires_matching_space() {
        let raster = ColorImage::uniform(2, 2, ColorSpaceTag::Rgb, [0.0; 4]);
        let err = ColorData::new(ColorSpaceTag::Hsi).compute(&raster).unwrap_err();
        assert!(err.is_configuration());
    }
}
