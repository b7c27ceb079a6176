//! Cross-resolution histogram resizing.
//!
//! Each source bin is split back into `(subspace, sum, hue)` using the source
//! level's start positions, the sub-indices are rescaled to the destination
//! subspace, and the value is added into the destination bin. Several source
//! bins may collapse into one.

use crate::error::{DescriptorError, DescriptorResult};
use crate::tables::structure::QuantLevel;

/// Resize a histogram from `from` to the coarser or equal level `to`.
pub fn resize(histogram: &[u32], from: QuantLevel, to: QuantLevel) -> DescriptorResult<Vec<u32>> {
    if histogram.len() != from.bins() {
        return Err(DescriptorError::Configuration(format!(
            "histogram has {} bins, expected {}",
            histogram.len(),
            from.bins()
        )));
    }
    if to > from {
        return Err(DescriptorError::IncompatibleOperands(format!(
            "cannot resize {} bins up to {}",
            from.bins(),
            to.bins()
        )));
    }
    if to == from {
        return Ok(histogram.to_vec());
    }

    let src_starts = from.start_positions();
    let dst_starts = to.start_positions();
    let mut out = vec![0u32; to.bins()];

    for (i, &value) in histogram.iter().enumerate() {
        let subspace = from.subspace_of_bin(i);
        let src = from.subspaces()[subspace];
        let dst = to.subspaces()[subspace];

        let local = i - src_starts[subspace];
        let hue = local % src.hue_bins;
        let sum = local / src.hue_bins;

        let hue_dst = dst.hue_bins * hue / src.hue_bins;
        let sum_dst = dst.sum_bins * sum / src.sum_bins;

        out[dst_starts[subspace] + sum_dst * dst.hue_bins + hue_dst] += value;
    }

    tracing::trace!(from = from.bins(), to = to.bins(), "resized CSD histogram");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(level: QuantLevel) -> Vec<u32> {
        (0..level.bins() as u32).map(|i| i % 7 + 1).collect()
    }

    #[test]
    fn test_resize_preserves_mass() {
        for from in QuantLevel::ALL {
            for to in QuantLevel::ALL.into_iter().filter(|&to| to <= from) {
                let src = ramp(from);
                let dst = resize(&src, from, to).unwrap();
                assert_eq!(dst.len(), to.bins());
                assert_eq!(dst.iter().sum::<u32>(), src.iter().sum::<u32>(), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn test_resize_same_level_is_identity() {
        let src = ramp(QuantLevel::L64);
        assert_eq!(resize(&src, QuantLevel::L64, QuantLevel::L64).unwrap(), src);
    }

    #[test]
    fn test_resize_keeps_grey_axis_in_first_subspace() {
        let mut src = vec![0u32; 256];
        src[31] = 10;
        let dst = resize(&src, QuantLevel::L256, QuantLevel::L32).unwrap();
        assert_eq!(dst[7], 10);
    }

    #[test]
    fn test_resize_collapses_hue_bins() {
        // Subspace 2 at 256 has 16 hue bins; at 128 it has 8.
        let mut src = vec![0u32; 256];
        src[64] = 3;
        src[65] = 4;
        let dst = resize(&src, QuantLevel::L256, QuantLevel::L128).unwrap();
        let start = QuantLevel::L128.start_positions()[2];
        assert_eq!(dst[start], 7);
    }

    #[test]
    fn test_resize_rejects_upscaling() {
        let src = ramp(QuantLevel::L32);
        let err = resize(&src, QuantLevel::L32, QuantLevel::L64).unwrap_err();
        assert!(matches!(err, DescriptorError::IncompatibleOperands(_)));
    }

    #[test]
    fn test_resize_rejects_wrong_length() {
        assert!(resize(&[1, 2, 3], QuantLevel::L32, QuantLevel::L32).is_err());
    }
}
