//! Extraction settings shared by every descriptor kind.
//!
//! `ExtractionConfig` is the single place construction parameters come
//! from when descriptors are built through [`crate::descriptor::AnyDescriptor`].
//! Absent JSON fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::color_space::ColorSpaceTag;
use crate::error::DescriptorResult;

/// Color Structure Descriptor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Requested number of bins. Rounded down to 32, 64, 128 or 256.
    pub quant_levels: u32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self { quant_levels: 256 }
    }
}

/// Scalable Color Descriptor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalableConfig {
    /// Haar coefficients kept: 16, 32, 64, 128 or 256.
    pub coefficients: u32,
    /// Low-order bit-planes dropped from each coefficient, 0..=8.
    pub bit_planes_discarded: u32,
    /// Histogram tiling as `[x_blocks, y_blocks]`.
    pub blocks: [u32; 2],
}

impl Default for ScalableConfig {
    fn default() -> Self {
        Self {
            coefficients: 256,
            bit_planes_discarded: 0,
            blocks: [1, 1],
        }
    }
}

/// Color Data descriptor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorDataConfig {
    /// Space the representative color is measured in.
    pub space: ColorSpaceTag,
}

impl Default for ColorDataConfig {
    fn default() -> Self {
        Self {
            space: ColorSpaceTag::Rgb,
        }
    }
}

/// Top-level extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub structure: StructureConfig,
    pub scalable: ScalableConfig,
    pub color_data: ColorDataConfig,
    /// Scan pixels on the rayon pool instead of a single thread. Results are
    /// identical either way.
    pub parallel: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            structure: StructureConfig::default(),
            scalable: ScalableConfig::default(),
            color_data: ColorDataConfig::default(),
            parallel: true,
        }
    }
}

impl ExtractionConfig {
    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> DescriptorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json(&self) -> DescriptorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
