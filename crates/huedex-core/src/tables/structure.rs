//! Color Structure Descriptor tables: HMMD subspace partitioning per
//! quantization level and the non-linear 8-bit bin re-quantization.

use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, DescriptorResult};

/// Number of Diff-axis subspaces in the HMMD partition.
pub const SUBSPACES: usize = 5;

/// Diff thresholds separating subspaces 0..4 (upper bounds, exclusive).
pub const DIFF_THRESHOLDS: [f32; SUBSPACES - 1] =
    [7.0 / 255.0, 21.0 / 255.0, 61.0 / 255.0, 111.0 / 255.0];

/// Divisor applied to the hue before binning. Slightly above 360 so that a
/// hue of exactly 360° still lands in the last bin.
pub const HUE_DIVISOR: f32 = 361.0;

/// Hue/sum bin counts of one subspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subspace {
    pub hue_bins: usize,
    pub sum_bins: usize,
}

impl Subspace {
    /// Total bins the subspace contributes.
    pub const fn bins(&self) -> usize {
        self.hue_bins * self.sum_bins
    }
}

const fn sub(hue_bins: usize, sum_bins: usize) -> Subspace {
    Subspace { hue_bins, sum_bins }
}

/// Subspace rows indexed by [`QuantLevel::offset`].
#[rustfmt::skip]
pub const SUBSPACE_TABLE: [[Subspace; SUBSPACES]; 4] = [
    [sub(1, 8),  sub(4, 2), sub(4, 2),  sub(4, 1),  sub(4, 1)],
    [sub(1, 8),  sub(4, 4), sub(4, 4),  sub(8, 2),  sub(8, 1)],
    [sub(1, 16), sub(4, 4), sub(8, 4),  sub(8, 4),  sub(8, 4)],
    [sub(1, 32), sub(4, 8), sub(16, 4), sub(16, 4), sub(16, 4)],
];

/// Supported CSD quantization levels (number of histogram bins).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum QuantLevel {
    L32,
    L64,
    L128,
    #[default]
    L256,
}

impl QuantLevel {
    /// Coarsest to finest.
    pub const ALL: [QuantLevel; 4] = [Self::L32, Self::L64, Self::L128, Self::L256];

    /// Resolve a requested bin count, rounding down to the nearest
    /// supported level. Requests below 32 are rejected.
    pub fn from_requested(requested: u32) -> DescriptorResult<Self> {
        let level = match requested {
            256.. => Self::L256,
            128.. => Self::L128,
            64.. => Self::L64,
            32.. => Self::L32,
            _ => {
                return Err(DescriptorError::Configuration(format!(
                    "quantization level {requested} is below the minimum of 32"
                )));
            }
        };
        if level.bins() as u32 != requested {
            tracing::warn!(requested, used = level.bins(), "CSD quantization level rounded down");
        }
        Ok(level)
    }

    /// Exact match on a bin count, used when decoding feature vectors.
    pub fn from_bins(bins: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.bins() == bins)
    }

    /// Number of histogram bins.
    pub const fn bins(self) -> usize {
        32 << self.offset()
    }

    /// `log2(bins) − 5`, the row of [`SUBSPACE_TABLE`].
    pub const fn offset(self) -> usize {
        match self {
            Self::L32 => 0,
            Self::L64 => 1,
            Self::L128 => 2,
            Self::L256 => 3,
        }
    }

    /// The five subspaces of this level.
    pub const fn subspaces(self) -> &'static [Subspace; SUBSPACES] {
        &SUBSPACE_TABLE[self.offset()]
    }

    /// First bin index of each subspace.
    pub const fn start_positions(self) -> [usize; SUBSPACES] {
        let row = self.subspaces();
        let mut starts = [0; SUBSPACES];
        let mut i = 1;
        while i < SUBSPACES {
            starts[i] = starts[i - 1] + row[i - 1].bins();
            i += 1;
        }
        starts
    }

    /// Subspace owning bin `index`.
    pub fn subspace_of_bin(self, index: usize) -> usize {
        let starts = self.start_positions();
        starts.iter().rposition(|&start| index >= start).unwrap_or(0)
    }
}

/// Subspace selected by an HMMD Diff value.
pub fn subspace_for_diff(diff: f32) -> usize {
    DIFF_THRESHOLDS
        .iter()
        .position(|&threshold| diff < threshold)
        .unwrap_or(SUBSPACES - 1)
}

// ---------------------------------------------------------------------------
// Bin re-quantization
// ---------------------------------------------------------------------------

const STEP_IN: [f64; 6] = [1e-9, 0.037, 0.08, 0.195, 0.32, 1.0];
const STEP_OUT: [i32; 6] = [-1, 0, 25, 45, 80, 115];

/// Map a normalized bin amplitude in [0, 1] to its 8-bit code.
///
/// Piecewise-linear in six segments followed by a `(y + 66) · 255 / 321`
/// remap into the byte range. The remap truncates, it does not round.
pub fn quant_func(x: f64) -> u8 {
    if x <= 0.0 {
        return 0;
    }
    if x >= 1.0 {
        return 255;
    }

    let mut y = ((x - 0.32) / (1.0 - 0.32) * 140.0 + 0.5).floor() as i32;
    if let Some(i) = STEP_IN.iter().position(|&step| x < step) {
        y += STEP_OUT[i];
    }

    let remapped = (255.0 * f64::from(y + 66) / (255.0 + 66.0)) as i32;
    remapped.clamp(0, 255) as u8
}
