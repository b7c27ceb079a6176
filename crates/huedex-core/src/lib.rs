//! Huedex Core — MPEG-7 color descriptors.
//!
//! Extraction, compact encoding and comparison of the Color Structure and
//! Scalable Color descriptors, plus a single-color descriptor, over any
//! raster exposed through [`PixelRaster`]. No file I/O.

pub mod color_data;
pub mod color_space;
pub mod compare;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod raster;
pub mod record;
pub mod scalable;
pub mod structure;
pub mod tables;

// Re-exports for convenience.
pub use color_data::ColorData;
pub use color_space::{ColorSpaceTag, PixelSample};
pub use config::ExtractionConfig;
pub use descriptor::{AnyDescriptor, Descriptor, DescriptorKind, DescriptorParams};
pub use error::{DescriptorError, DescriptorResult};
pub use raster::{ColorImage, PixelRaster};
pub use record::DescriptorRecord;
pub use scalable::{ScalableColor, ScalableParams};
pub use structure::ColorStructure;
pub use tables::structure::QuantLevel;
