//! Error taxonomy for descriptor extraction, encoding and comparison.

use crate::color_space::ColorSpaceTag;

/// Errors surfaced by descriptor operations.
///
/// Every variant is fatal to the single operation that raised it; none of
/// them are retried internally.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// The raster is tagged with a color space the engine does not accept.
    #[error("wrong color space: expected {expected}, got {actual}")]
    WrongColorSpace {
        expected: ColorSpaceTag,
        actual: ColorSpaceTag,
    },

    /// A construction parameter or input shape is invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A computed bin index fell outside the range implied by the tables.
    #[error("bin index {index} overflows {bins} bins")]
    Overflow { index: usize, bins: usize },

    /// The two operands cannot be compared.
    #[error("incompatible operands: {0}")]
    IncompatibleOperands(String),

    /// The descriptor has not been computed or decoded yet.
    #[error("descriptor has not been computed")]
    Unpopulated,

    /// Extraction settings could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A persisted feature vector could not be decoded.
    #[error("feature decode error: {0}")]
    FeatureDecode(#[from] base64::DecodeError),
}

impl DescriptorError {
    /// Whether this error belongs to the configuration class (wrong color
    /// space, invalid parameters, malformed input shape).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::WrongColorSpace { .. } | Self::Configuration(_) | Self::ConfigParse(_)
        )
    }
}

/// Result type for descriptor operations.
pub type DescriptorResult<T> = Result<T, DescriptorError>;
