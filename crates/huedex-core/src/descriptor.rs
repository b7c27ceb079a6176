//! Common descriptor interface and the tagged descriptor façade.
//!
//! Each descriptor type implements [`Descriptor`]. [`AnyDescriptor`] wraps
//! them behind one enum so that collections, persistence and configuration
//! can handle every kind uniformly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color_data::ColorData;
use crate::color_space::ColorSpaceTag;
use crate::config::ExtractionConfig;
use crate::error::{DescriptorError, DescriptorResult};
use crate::raster::{ColorImage, PixelRaster};
use crate::scalable::{ScalableColor, ScalableParams};
use crate::structure::ColorStructure;
use crate::tables::structure::QuantLevel;

/// Descriptor kinds known to the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DescriptorKind {
    ColorStructure,
    ScalableColor,
    ColorData,
}

impl DescriptorKind {
    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ColorStructure => "Color Structure",
            Self::ScalableColor => "Scalable Color",
            Self::ColorData => "Color Data",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [DescriptorKind; 3] = [
            DescriptorKind::ColorStructure,
            DescriptorKind::ScalableColor,
            DescriptorKind::ColorData,
        ];
        &ALL
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Operations shared by every descriptor.
///
/// A descriptor is created empty, populated once by [`compute`] or built
/// populated by [`deserialize`], and compared only with descriptors whose
/// parameters are compatible.
///
/// [`compute`]: Descriptor::compute
/// [`deserialize`]: Descriptor::deserialize
pub trait Descriptor: Sized {
    /// Parameters needed to decode a feature vector.
    type Params;

    const KIND: DescriptorKind;

    fn kind(&self) -> DescriptorKind {
        Self::KIND
    }

    fn params(&self) -> Self::Params;

    fn is_computed(&self) -> bool;

    /// Extract from a raster in the descriptor's color space.
    fn compute(&mut self, raster: &dyn PixelRaster) -> DescriptorResult<()>;

    /// Non-negative distance; 0 for identical descriptors.
    fn compare(&self, other: &Self) -> DescriptorResult<f64>;

    /// Byte feature vector.
    fn serialize(&self) -> DescriptorResult<Vec<u8>>;

    /// Rebuild a populated descriptor from a feature vector.
    fn deserialize(bytes: &[u8], params: Self::Params) -> DescriptorResult<Self>;
}

impl Descriptor for ColorStructure {
    type Params = QuantLevel;
    const KIND: DescriptorKind = DescriptorKind::ColorStructure;

    fn params(&self) -> QuantLevel {
        self.level()
    }

    fn is_computed(&self) -> bool {
        ColorStructure::is_computed(self)
    }

    fn compute(&mut self, raster: &dyn PixelRaster) -> DescriptorResult<()> {
        ColorStructure::compute(self, raster)
    }

    fn compare(&self, other: &Self) -> DescriptorResult<f64> {
        ColorStructure::compare(self, other)
    }

    fn serialize(&self) -> DescriptorResult<Vec<u8>> {
        ColorStructure::serialize(self)
    }

    fn deserialize(bytes: &[u8], level: QuantLevel) -> DescriptorResult<Self> {
        ColorStructure::deserialize(bytes, level)
    }
}

impl Descriptor for ScalableColor {
    type Params = ScalableParams;
    const KIND: DescriptorKind = DescriptorKind::ScalableColor;

    fn params(&self) -> ScalableParams {
        ScalableColor::params(self)
    }

    fn is_computed(&self) -> bool {
        ScalableColor::is_computed(self)
    }

    fn compute(&mut self, raster: &dyn PixelRaster) -> DescriptorResult<()> {
        ScalableColor::compute(self, raster)
    }

    fn compare(&self, other: &Self) -> DescriptorResult<f64> {
        ScalableColor::compare(self, other)
    }

    fn serialize(&self) -> DescriptorResult<Vec<u8>> {
        ScalableColor::serialize(self)
    }

    fn deserialize(bytes: &[u8], params: ScalableParams) -> DescriptorResult<Self> {
        ScalableColor::deserialize(bytes, params)
    }
}

impl Descriptor for ColorData {
    type Params = ColorSpaceTag;
    const KIND: DescriptorKind = DescriptorKind::ColorData;

    fn params(&self) -> ColorSpaceTag {
        self.space()
    }

    fn is_computed(&self) -> bool {
        ColorData::is_computed(self)
    }

    fn compute(&mut self, raster: &dyn PixelRaster) -> DescriptorResult<()> {
        ColorData::compute(self, raster)
    }

    fn compare(&self, other: &Self) -> DescriptorResult<f64> {
        ColorData::compare(self, other)
    }

    fn serialize(&self) -> DescriptorResult<Vec<u8>> {
        ColorData::serialize(self)
    }

    fn deserialize(bytes: &[u8], space: ColorSpaceTag) -> DescriptorResult<Self> {
        ColorData::deserialize(bytes, space)
    }
}

/// Decoding parameters of any descriptor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescriptorParams {
    ColorStructure { level: QuantLevel },
    ScalableColor(ScalableParams),
    ColorData { space: ColorSpaceTag },
}

impl DescriptorParams {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::ColorStructure { .. } => DescriptorKind::ColorStructure,
            Self::ScalableColor(_) => DescriptorKind::ScalableColor,
            Self::ColorData { .. } => DescriptorKind::ColorData,
        }
    }
}

/// Any descriptor, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyDescriptor {
    ColorStructure(ColorStructure),
    ScalableColor(ScalableColor),
    ColorData(ColorData),
}

impl AnyDescriptor {
    /// Empty descriptor of `kind` configured from `config`.
    pub fn build(kind: DescriptorKind, config: &ExtractionConfig) -> DescriptorResult<Self> {
        let descriptor = match kind {
            DescriptorKind::ColorStructure => Self::ColorStructure(
                ColorStructure::new(config.structure.quant_levels)?.with_parallel(config.parallel),
            ),
            DescriptorKind::ScalableColor => {
                let s = &config.scalable;
                Self::ScalableColor(
                    ScalableColor::new(s.coefficients, s.bit_planes_discarded)?
                        .with_blocks(s.blocks)
                        .with_parallel(config.parallel),
                )
            }
            DescriptorKind::ColorData => Self::ColorData(ColorData::new(config.color_data.space)),
        };
        tracing::debug!(%kind, "built descriptor");
        Ok(descriptor)
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::ColorStructure(_) => DescriptorKind::ColorStructure,
            Self::ScalableColor(_) => DescriptorKind::ScalableColor,
            Self::ColorData(_) => DescriptorKind::ColorData,
        }
    }

    pub fn params(&self) -> DescriptorParams {
        match self {
            Self::ColorStructure(d) => DescriptorParams::ColorStructure { level: d.level() },
            Self::ScalableColor(d) => DescriptorParams::ScalableColor(d.params()),
            Self::ColorData(d) => DescriptorParams::ColorData { space: d.space() },
        }
    }

    /// Color space the descriptor extracts from.
    pub fn required_space(&self) -> ColorSpaceTag {
        match self {
            Self::ColorStructure(_) => ColorStructure::COLOR_SPACE,
            Self::ScalableColor(_) => ScalableColor::COLOR_SPACE,
            Self::ColorData(d) => d.space(),
        }
    }

    pub fn is_computed(&self) -> bool {
        match self {
            Self::ColorStructure(d) => d.is_computed(),
            Self::ScalableColor(d) => d.is_computed(),
            Self::ColorData(d) => d.is_computed(),
        }
    }

    /// Extract from a raster already in [`required_space`](Self::required_space).
    pub fn compute(&mut self, raster: &dyn PixelRaster) -> DescriptorResult<()> {
        match self {
            Self::ColorStructure(d) => d.compute(raster),
            Self::ScalableColor(d) => d.compute(raster),
            Self::ColorData(d) => d.compute(raster),
        }
    }

    /// Whether pixel scans run on the rayon pool.
    pub fn is_parallel(&self) -> bool {
        match self {
            Self::ColorStructure(d) => d.is_parallel(),
            Self::ScalableColor(d) => d.is_parallel(),
            Self::ColorData(_) => false,
        }
    }

    /// Convert `image` into the required space when needed, then extract.
    /// The conversion follows [`is_parallel`](Self::is_parallel).
    pub fn compute_image(&mut self, image: &ColorImage) -> DescriptorResult<()> {
        let space = self.required_space();
        if image.space == space {
            self.compute(image)
        } else {
            self.compute(&image.convert_with(space, self.is_parallel()))
        }
    }

    /// Distance between two descriptors of the same kind.
    pub fn compare(&self, other: &Self) -> DescriptorResult<f64> {
        match (self, other) {
            (Self::ColorStructure(a), Self::ColorStructure(b)) => a.compare(b),
            (Self::ScalableColor(a), Self::ScalableColor(b)) => a.compare(b),
            (Self::ColorData(a), Self::ColorData(b)) => a.compare(b),
            _ => Err(DescriptorError::IncompatibleOperands(format!(
                "cannot compare {} with {}",
                self.kind(),
                other.kind()
            ))),
        }
    }

    pub fn serialize(&self) -> DescriptorResult<Vec<u8>> {
        match self {
            Self::ColorStructure(d) => d.serialize(),
            Self::ScalableColor(d) => d.serialize(),
            Self::ColorData(d) => d.serialize(),
        }
    }

    /// Rebuild a populated descriptor from a feature vector.
    pub fn deserialize(bytes: &[u8], params: DescriptorParams) -> DescriptorResult<Self> {
        Ok(match params {
            DescriptorParams::ColorStructure { level } => {
                Self::ColorStructure(decode::<ColorStructure>(bytes, level)?)
            }
            DescriptorParams::ScalableColor(p) => {
                Self::ScalableColor(decode::<ScalableColor>(bytes, p)?)
            }
            DescriptorParams::ColorData { space } => {
                Self::ColorData(decode::<ColorData>(bytes, space)?)
            }
        })
    }
}

fn decode<D: Descriptor>(bytes: &[u8], params: D::Params) -> DescriptorResult<D> {
    let descriptor = D::deserialize(bytes, params)?;
    tracing::trace!(kind = %D::KIND, len = bytes.len(), "decoded feature vector");
    Ok(descriptor)
}

impl From<ColorStructure> for AnyDescriptor {
    fn from(d: ColorStructure) -> Self {
        Self::ColorStructure(d)
    }
}

impl From<ScalableColor> for AnyDescriptor {
    fn from(d: ScalableColor) -> Self {
        Self::ScalableColor(d)
    }
}

impl From<ColorData> for AnyDescriptor {
    fn from(d: ColorData) -> Self {
        Self::ColorData(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> ColorImage {
        ColorImage::from_fn(32, 24, |x, y| {
            [x as f32 / 31.0, 0.5, y as f32 / 23.0]
        })
    }

    fn assert_roundtrip_distance_zero<D: Descriptor>(d: &D, params: D::Params) {
        let back = D::deserialize(&d.serialize().unwrap(), params).unwrap();
        assert!(back.is_computed());
        assert_eq!(back.compare(d).unwrap(), 0.0);
    }

    #[test]
    fn test_build_follows_config() {
        let mut config = ExtractionConfig::default();
        config.structure.quant_levels = 100;
        config.scalable.coefficients = 32;
        let csd = AnyDescriptor::build(DescriptorKind::ColorStructure, &config).unwrap();
        assert_eq!(csd.params(), DescriptorParams::ColorStructure { level: QuantLevel::L64 });
        let scd = AnyDescriptor::build(DescriptorKind::ScalableColor, &config).unwrap();
        assert_eq!(
            scd.params(),
            DescriptorParams::ScalableColor(ScalableParams::new(32, 0).unwrap())
        );
        assert_eq!(scd.required_space(), ColorSpaceTag::Hsv);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = ExtractionConfig::default();
        config.scalable.coefficients = 100;
        assert!(AnyDescriptor::build(DescriptorKind::ScalableColor, &config)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn test_every_kind_roundtrips_through_bytes() {
        let image = sample_image();
        let config = ExtractionConfig::default();
        for &kind in DescriptorKind::all() {
            let mut d = AnyDescriptor::build(kind, &config).unwrap();
            d.compute_image(&image).unwrap();
            match &d {
                AnyDescriptor::ColorStructure(c) => assert_roundtrip_distance_zero(c, c.level()),
                AnyDescriptor::ScalableColor(s) => assert_roundtrip_distance_zero(s, s.params()),
                AnyDescriptor::ColorData(c) => assert_roundtrip_distance_zero(c, c.space()),
            }
            let back = AnyDescriptor::deserialize(&d.serialize().unwrap(), d.params()).unwrap();
            assert_eq!(back.kind(), kind);
            assert_eq!(d.compare(&back).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_compare_different_kinds_fails() {
        let image = sample_image();
        let config = ExtractionConfig::default();
        let mut a = AnyDescriptor::build(DescriptorKind::ColorStructure, &config).unwrap();
        let mut b = AnyDescriptor::build(DescriptorKind::ColorData, &config).unwrap();
        a.compute_image(&image).unwrap();
        b.compute_image(&image).unwrap();
        assert!(matches!(a.compare(&b), Err(DescriptorError::IncompatibleOperands(_))));
    }

    #[test]
    fn test_compute_without_conversion_checks_space() {
        let mut d = AnyDescriptor::build(DescriptorKind::ColorStructure, &ExtractionConfig::default())
            .unwrap();
        let err = d.compute(&sample_image()).unwrap_err();
        assert!(matches!(err, DescriptorError::WrongColorSpace { .. }));
        assert!(!d.is_computed());
    }

    #[test]
    fn test_build_carries_parallel_flag() {
        let sequential = ExtractionConfig {
            parallel: false,
            ..ExtractionConfig::default()
        };
        for &kind in DescriptorKind::all() {
            assert!(!AnyDescriptor::build(kind, &sequential).unwrap().is_parallel());
        }
        let csd = AnyDescriptor::build(DescriptorKind::ColorStructure, &ExtractionConfig::default())
            .unwrap();
        assert!(csd.is_parallel());
    }

    #[test]
    fn test_trait_kind_matches_enum() {
        let d = ColorData::new(ColorSpaceTag::Rgb);
        assert_eq!(Descriptor::kind(&d), DescriptorKind::ColorData);
        assert_eq!(AnyDescriptor::from(d).kind(), DescriptorKind::ColorData);
    }
}
