//! Structuring-element histogram.
//!
//! An `E × E` window slides over the quantized image in steps of `K`. For
//! each placement the window is sampled every `K` pixels (8 × 8 samples) and
//! every bin present at least once gets its count incremented by one.
//!
//! ```text
//! p = max(0, floor(log2(sqrt(W·H)) − 7.5))
//! K = 2^p,  E = 8K
//! S = floor((W − E + K) / K) · floor((H − E + K) / K)
//! ```

use rayon::prelude::*;

use super::quantize::QuantizedImage;

/// Samples per window side.
pub const ELEMENT_SIDE: usize = 8;

/// Window size and step for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    /// Sub-sampling step `K`, also the slide step.
    pub step: usize,
    /// Window side `E`.
    pub extent: usize,
}

impl WindowGeometry {
    /// Geometry for a `width × height` image.
    pub fn for_image(width: usize, height: usize) -> Self {
        let area = (width as f64) * (height as f64);
        let p = (area.sqrt().log2() - 7.5).floor().max(0.0) as u32;
        let step = 1usize << p;
        Self {
            step,
            extent: ELEMENT_SIDE * step,
        }
    }

    /// Window placements along an axis of length `len`. A single, clipped
    /// placement when the axis is shorter than the window.
    pub fn placements_along(&self, len: usize) -> usize {
        if len < self.extent {
            1
        } else {
            (len - self.extent) / self.step + 1
        }
    }

    /// Total placements `S` for the image.
    pub fn placements(&self, width: usize, height: usize) -> usize {
        self.placements_along(width) * self.placements_along(height)
    }
}

/// Raw presence counts, one per bin, plus the number of placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureHistogram {
    pub counts: Vec<u32>,
    pub placements: u32,
}

impl StructureHistogram {
    /// Counts divided by the placement total, each in [0, 1].
    pub fn normalized(&self) -> Vec<f64> {
        let total = f64::from(self.placements.max(1));
        self.counts.iter().map(|&c| f64::from(c) / total).collect()
    }
}

/// Set of bins seen inside one window.
#[derive(Clone, Copy, Default)]
struct Presence([u64; 4]);

impl Presence {
    #[inline]
    fn insert(&mut self, bin: u8) {
        self.0[usize::from(bin >> 6)] |= 1 << (bin & 63);
    }

    fn add_to(&self, counts: &mut [u32]) {
        for (word_index, &word) in self.0.iter().enumerate() {
            let mut bits = word;
            while bits != 0 {
                let bit = bits.trailing_zeros() as usize;
                counts[word_index * 64 + bit] += 1;
                bits &= bits - 1;
            }
        }
    }
}

/// Sweep one row of window placements starting at `top`.
fn sweep_row(image: &QuantizedImage, geometry: WindowGeometry, top: usize, counts: &mut [u32]) {
    let span_x = geometry.extent.min(image.width);
    let span_y = geometry.extent.min(image.height);
    let k = geometry.step;

    for i in 0..geometry.placements_along(image.width) {
        let left = i * k;
        let mut presence = Presence::default();
        for yy in (top..top + span_y).step_by(k) {
            for xx in (left..left + span_x).step_by(k) {
                presence.insert(image.at(xx, yy));
            }
        }
        presence.add_to(counts);
    }
}

fn add_counts(mut a: Vec<u32>, b: Vec<u32>) -> Vec<u32> {
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
    a
}

/// Build the structuring-element histogram of a quantized image.
///
/// Placement rows are folded into partial histograms on the rayon pool when
/// `parallel` is set; the integer sums are identical either way.
pub fn structure_histogram(image: &QuantizedImage, parallel: bool) -> StructureHistogram {
    let bins = image.level.bins();
    let geometry = WindowGeometry::for_image(image.width, image.height);
    let rows = geometry.placements_along(image.height);
    let placements = geometry.placements(image.width, image.height);

    tracing::debug!(
        width = image.width,
        height = image.height,
        step = geometry.step,
        extent = geometry.extent,
        placements,
        "CSD structuring window"
    );

    let counts = if parallel {
        (0..rows)
            .into_par_iter()
            .fold(
                || vec![0u32; bins],
                |mut acc, row| {
                    sweep_row(image, geometry, row * geometry.step, &mut acc);
                    acc
                },
            )
            .reduce(|| vec![0u32; bins], add_counts)
    } else {
        let mut acc = vec![0u32; bins];
        for row in 0..rows {
            sweep_row(image, geometry, row * geometry.step, &mut acc);
        }
        acc
    };

    StructureHistogram {
        counts,
        placements: placements as u32,
    }
}
