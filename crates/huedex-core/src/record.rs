//! JSON persistence of computed descriptors.
//!
//! A record carries the descriptor kind, its decoding parameters and the
//! feature vector as base64 text:
//!
//! ```json
//! {
//!   "kind": "ScalableColor",
//!   "params": { "ScalableColor": { "coefficients": 64, "bit_planes_discarded": 0 } },
//!   "features": "yQAM..."
//! }
//! ```

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::compare::ensure_matching;
use crate::descriptor::{AnyDescriptor, DescriptorKind, DescriptorParams};
use crate::error::DescriptorResult;

/// A serialized descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorRecord {
    pub kind: DescriptorKind,
    pub params: DescriptorParams,
    /// Base64-encoded feature vector.
    pub features: String,
}

impl DescriptorRecord {
    /// Capture a computed descriptor.
    pub fn from_descriptor(descriptor: &AnyDescriptor) -> DescriptorResult<Self> {
        let bytes = descriptor.serialize()?;
        Ok(Self {
            kind: descriptor.kind(),
            params: descriptor.params(),
            features: STANDARD.encode(bytes),
        })
    }

    /// Decoded feature bytes.
    pub fn feature_bytes(&self) -> DescriptorResult<Vec<u8>> {
        Ok(STANDARD.decode(&self.features)?)
    }

    /// Rebuild the populated descriptor.
    pub fn into_descriptor(self) -> DescriptorResult<AnyDescriptor> {
        ensure_matching("record kind", self.kind, self.params.kind())?;
        let bytes = self.feature_bytes()?;
        AnyDescriptor::deserialize(&bytes, self.params)
    }

    pub fn to_json(&self) -> DescriptorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> DescriptorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
