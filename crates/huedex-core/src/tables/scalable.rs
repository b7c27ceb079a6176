//! Scalable Color Descriptor tables: Haar butterfly schedule, canonical
//! coefficient order, and per-coefficient non-linear quantization bounds.
//!
//! The values are the MPEG-7 eXperimentation Model (XM) tables. Any change
//! breaks interoperability of serialized feature vectors.

/// Number of histogram bins / Haar coefficients.
pub const COEFFICIENTS: usize = 256;

/// Side of the square matrix the Haar transform operates on.
pub const MATRIX_SIDE: usize = 16;

/// Number of butterfly steps in the full decomposition.
pub const BUTTERFLIES: usize = 255;

/// Hue, saturation and value bin counts of the HSV histogram.
pub const HUE_BINS: usize = 16;
pub const SATURATION_BINS: usize = 4;
pub const VALUE_BINS: usize = 4;

/// Largest value after linear pre-quantization (11 bits).
pub const LINEAR_MAX: i32 = 0x7ff;

/// Largest value after power-law quantization (4 bits).
pub const POWER_MAX: i32 = 15;

/// Non-linear quantization entry for one Haar coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoefficientQuant {
    /// Value subtracted to center the coefficient.
    pub bias: i32,
    /// Nominal bit width of the coefficient, sign included.
    pub bits: u32,
    /// Symmetric clip bound applied after centering.
    pub bound: i32,
}

const fn q(bias: i32, bits: u32, bound: i32) -> CoefficientQuant {
    CoefficientQuant { bias, bits, bound }
}

/// Per-coefficient `(bias, bits, bound)` in canonical coefficient order.
#[rustfmt::skip]
pub const COEFFICIENT_QUANT: [CoefficientQuant; COEFFICIENTS] = [
    q(217, 9, 255), q(-71, 9, 255), q(-27, 8, 127), q(-54, 9, 255), q(-8, 7, 63), q(-14, 7, 63), q(-22, 7, 63), q(-29, 8, 127),
    q(-6, 6, 31), q(-13, 7, 63), q(-11, 6, 31), q(-22, 7, 63), q(-9, 7, 63), q(-14, 7, 63), q(-19, 7, 63), q(-22, 7, 63),
    q(0, 4, 7), q(-1, 5, 15), q(0, 3, 3), q(-2, 6, 31), q(1, 5, 15), q(-5, 6, 31), q(0, 5, 15), q(0, 7, 63),
    q(2, 5, 15), q(-2, 6, 31), q(-2, 5, 15), q(0, 7, 63), q(3, 5, 15), q(-5, 6, 31), q(-1, 6, 31), q(4, 7, 63),
    q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(-1, 5, 15), q(0, 3, 3), q(0, 3, 3), q(-1, 5, 15), q(-2, 5, 15),
    q(-1, 5, 15), q(-1, 4, 7), q(-1, 5, 15), q(-3, 5, 15), q(-1, 5, 15), q(-2, 5, 15), q(-4, 5, 15), q(-5, 5, 15),
    q(-1, 5, 15), q(0, 3, 3), q(-2, 5, 15), q(-2, 5, 15), q(-2, 5, 15), q(-3, 5, 15), q(-3, 5, 15), q(0, 5, 15),
    q(0, 5, 15), q(0, 5, 15), q(0, 5, 15), q(2, 5, 15), q(-1, 5, 15), q(0, 5, 15), q(3, 6, 31), q(3, 5, 15),
    q(0, 2, 1), q(0, 2, 1), q(0, 3, 3), q(0, 4, 7), q(0, 2, 1), q(0, 2, 1), q(0, 3, 3), q(-1, 4, 7),
    q(-1, 4, 7), q(-1, 4, 7), q(-2, 5, 15), q(-1, 5, 15), q(-2, 5, 15), q(-2, 5, 15), q(-2, 5, 15), q(-1, 5, 15),
    q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(-1, 4, 7), q(0, 2, 1), q(0, 3, 3), q(-1, 4, 7), q(-1, 5, 15),
    q(-2, 5, 15), q(-1, 4, 7), q(-2, 5, 15), q(-1, 5, 15), q(-3, 5, 15), q(-3, 5, 15), q(-2, 5, 15), q(0, 5, 15),
    q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(-1, 4, 7), q(0, 3, 3), q(0, 3, 3), q(-2, 5, 15), q(-2, 5, 15),
    q(-2, 5, 15), q(-2, 4, 7), q(-2, 5, 15), q(-1, 5, 15), q(-3, 5, 15), q(-3, 5, 15), q(-1, 5, 15), q(0, 5, 15),
    q(1, 4, 7), q(0, 3, 3), q(0, 4, 7), q(-1, 4, 7), q(0, 3, 3), q(0, 4, 7), q(-1, 4, 7), q(0, 4, 7),
    q(-1, 4, 7), q(-1, 3, 3), q(-1, 4, 7), q(0, 4, 7), q(-1, 5, 15), q(0, 5, 15), q(1, 5, 15), q(-1, 5, 15),
    q(0, 2, 1), q(0, 2, 1), q(0, 3, 3), q(0, 3, 3), q(0, 2, 1), q(0, 2, 1), q(0, 3, 3), q(0, 3, 3),
    q(0, 2, 1), q(0, 2, 1), q(0, 3, 3), q(0, 4, 7), q(0, 2, 1), q(0, 2, 1), q(0, 3, 3), q(0, 3, 3),
    q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(1, 4, 7), q(0, 2, 1), q(0, 3, 3), q(-1, 4, 7), q(1, 4, 7),
    q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(0, 4, 7), q(0, 3, 3), q(0, 3, 3), q(-1, 4, 7), q(0, 4, 7),
    q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(0, 3, 3), q(0, 2, 1), q(0, 2, 1), q(0, 3, 3), q(0, 3, 3),
    q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(1, 4, 7), q(0, 2, 1), q(0, 3, 3), q(0, 4, 7), q(1, 4, 7),
    q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(1, 5, 15), q(0, 3, 3), q(0, 3, 3), q(-1, 5, 15), q(2, 5, 15),
    q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(0, 4, 7), q(0, 3, 3), q(0, 3, 3), q(-1, 4, 7), q(1, 5, 15),
    q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(0, 4, 7), q(0, 4, 7),
    q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(1, 4, 7), q(0, 3, 3), q(0, 3, 3), q(-1, 5, 15), q(1, 5, 15),
    q(0, 3, 3), q(0, 2, 1), q(-1, 3, 3), q(1, 5, 15), q(0, 3, 3), q(-1, 4, 7), q(-1, 5, 15), q(2, 5, 15),
    q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(0, 4, 7), q(0, 3, 3), q(-1, 3, 3), q(0, 4, 7), q(1, 4, 7),
    q(1, 3, 3), q(0, 2, 1), q(-1, 3, 3), q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(1, 4, 7),
    q(0, 3, 3), q(0, 2, 1), q(-1, 3, 3), q(0, 4, 7), q(0, 3, 3), q(0, 3, 3), q(0, 4, 7), q(1, 4, 7),
    q(0, 3, 3), q(0, 2, 1), q(0, 3, 3), q(0, 4, 7), q(0, 3, 3), q(-1, 3, 3), q(0, 4, 7), q(1, 4, 7),
    q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(0, 3, 3), q(-1, 3, 3), q(0, 3, 3), q(-1, 4, 7),
];

/// Butterfly operand cells `[y1, x1, y2, x2]` in application order.
#[rustfmt::skip]
pub const HAAR_BUTTERFLIES: [[u8; 4]; BUTTERFLIES] = [
    [0, 0, 1, 0], [2, 0, 3, 0], [4, 0, 5, 0], [6, 0, 7, 0], [8, 0, 9, 0], [10, 0, 11, 0], [12, 0, 13, 0], [14, 0, 15, 0],
    [0, 1, 1, 1], [2, 1, 3, 1], [4, 1, 5, 1], [6, 1, 7, 1], [8, 1, 9, 1], [10, 1, 11, 1], [12, 1, 13, 1], [14, 1, 15, 1],
    [0, 2, 1, 2], [2, 2, 3, 2], [4, 2, 5, 2], [6, 2, 7, 2], [8, 2, 9, 2], [10, 2, 11, 2], [12, 2, 13, 2], [14, 2, 15, 2],
    [0, 3, 1, 3], [2, 3, 3, 3], [4, 3, 5, 3], [6, 3, 7, 3], [8, 3, 9, 3], [10, 3, 11, 3], [12, 3, 13, 3], [14, 3, 15, 3],
    [0, 4, 1, 4], [2, 4, 3, 4], [4, 4, 5, 4], [6, 4, 7, 4], [8, 4, 9, 4], [10, 4, 11, 4], [12, 4, 13, 4], [14, 4, 15, 4],
    [0, 5, 1, 5], [2, 5, 3, 5], [4, 5, 5, 5], [6, 5, 7, 5], [8, 5, 9, 5], [10, 5, 11, 5], [12, 5, 13, 5], [14, 5, 15, 5],
    [0, 6, 1, 6], [2, 6, 3, 6], [4, 6, 5, 6], [6, 6, 7, 6], [8, 6, 9, 6], [10, 6, 11, 6], [12, 6, 13, 6], [14, 6, 15, 6],
    [0, 7, 1, 7], [2, 7, 3, 7], [4, 7, 5, 7], [6, 7, 7, 7], [8, 7, 9, 7], [10, 7, 11, 7], [12, 7, 13, 7], [14, 7, 15, 7],
    [0, 8, 1, 8], [2, 8, 3, 8], [4, 8, 5, 8], [6, 8, 7, 8], [8, 8, 9, 8], [10, 8, 11, 8], [12, 8, 13, 8], [14, 8, 15, 8],
    [0, 9, 1, 9], [2, 9, 3, 9], [4, 9, 5, 9], [6, 9, 7, 9], [8, 9, 9, 9], [10, 9, 11, 9], [12, 9, 13, 9], [14, 9, 15, 9],
    [0, 10, 1, 10], [2, 10, 3, 10], [4, 10, 5, 10], [6, 10, 7, 10], [8, 10, 9, 10], [10, 10, 11, 10], [12, 10, 13, 10], [14, 10, 15, 10],
    [0, 11, 1, 11], [2, 11, 3, 11], [4, 11, 5, 11], [6, 11, 7, 11], [8, 11, 9, 11], [10, 11, 11, 11], [12, 11, 13, 11], [14, 11, 15, 11],
    [0, 12, 1, 12], [2, 12, 3, 12], [4, 12, 5, 12], [6, 12, 7, 12], [8, 12, 9, 12], [10, 12, 11, 12], [12, 12, 13, 12], [14, 12, 15, 12],
    [0, 13, 1, 13], [2, 13, 3, 13], [4, 13, 5, 13], [6, 13, 7, 13], [8, 13, 9, 13], [10, 13, 11, 13], [12, 13, 13, 13], [14, 13, 15, 13],
    [0, 14, 1, 14], [2, 14, 3, 14], [4, 14, 5, 14], [6, 14, 7, 14], [8, 14, 9, 14], [10, 14, 11, 14], [12, 14, 13, 14], [14, 14, 15, 14],
    [0, 15, 1, 15], [2, 15, 3, 15], [4, 15, 5, 15], [6, 15, 7, 15], [8, 15, 9, 15], [10, 15, 11, 15], [12, 15, 13, 15], [14, 15, 15, 15],
    [0, 0, 0, 1], [2, 0, 2, 1], [4, 0, 4, 1], [6, 0, 6, 1], [8, 0, 8, 1], [10, 0, 10, 1], [12, 0, 12, 1], [14, 0, 14, 1],
    [0, 2, 0, 3], [2, 2, 2, 3], [4, 2, 4, 3], [6, 2, 6, 3], [8, 2, 8, 3], [10, 2, 10, 3], [12, 2, 12, 3], [14, 2, 14, 3],
    [0, 4, 0, 5], [2, 4, 2, 5], [4, 4, 4, 5], [6, 4, 6, 5], [8, 4, 8, 5], [10, 4, 10, 5], [12, 4, 12, 5], [14, 4, 14, 5],
    [0, 6, 0, 7], [2, 6, 2, 7], [4, 6, 4, 7], [6, 6, 6, 7], [8, 6, 8, 7], [10, 6, 10, 7], [12, 6, 12, 7], [14, 6, 14, 7],
    [0, 8, 0, 9], [2, 8, 2, 9], [4, 8, 4, 9], [6, 8, 6, 9], [8, 8, 8, 9], [10, 8, 10, 9], [12, 8, 12, 9], [14, 8, 14, 9],
    [0, 10, 0, 11], [2, 10, 2, 11], [4, 10, 4, 11], [6, 10, 6, 11], [8, 10, 8, 11], [10, 10, 10, 11], [12, 10, 12, 11], [14, 10, 14, 11],
    [0, 12, 0, 13], [2, 12, 2, 13], [4, 12, 4, 13], [6, 12, 6, 13], [8, 12, 8, 13], [10, 12, 10, 13], [12, 12, 12, 13], [14, 12, 14, 13],
    [0, 14, 0, 15], [2, 14, 2, 15], [4, 14, 4, 15], [6, 14, 6, 15], [8, 14, 8, 15], [10, 14, 10, 15], [12, 14, 12, 15], [14, 14, 14, 15],
    [0, 0, 0, 4], [2, 0, 2, 4], [4, 0, 4, 4], [6, 0, 6, 4], [8, 0, 8, 4], [10, 0, 10, 4], [12, 0, 12, 4], [14, 0, 14, 4],
    [0, 2, 0, 6], [2, 2, 2, 6], [4, 2, 4, 6], [6, 2, 6, 6], [8, 2, 8, 6], [10, 2, 10, 6], [12, 2, 12, 6], [14, 2, 14, 6],
    [0, 8, 0, 12], [2, 8, 2, 12], [4, 8, 4, 12], [6, 8, 6, 12], [8, 8, 8, 12], [10, 8, 10, 12], [12, 8, 12, 12], [14, 8, 14, 12],
    [0, 10, 0, 14], [2, 10, 2, 14], [4, 10, 4, 14], [6, 10, 6, 14], [8, 10, 8, 14], [10, 10, 10, 14], [12, 10, 12, 14], [14, 10, 14, 14],
    [0, 0, 2, 0], [4, 0, 6, 0], [8, 0, 10, 0], [12, 0, 14, 0], [0, 2, 2, 2], [4, 2, 6, 2], [8, 2, 10, 2], [12, 2, 14, 2],
    [0, 8, 2, 8], [4, 8, 6, 8], [8, 8, 10, 8], [12, 8, 14, 8], [0, 10, 2, 10], [4, 10, 6, 10], [8, 10, 10, 10], [12, 10, 14, 10],
    [0, 0, 0, 2], [4, 0, 4, 2], [8, 0, 8, 2], [12, 0, 12, 2], [0, 8, 0, 10], [4, 8, 4, 10], [8, 8, 8, 10], [12, 8, 12, 10],
    [0, 0, 0, 8], [4, 0, 4, 8], [8, 0, 8, 8], [12, 0, 12, 8], [0, 0, 4, 0], [8, 0, 12, 0], [0, 0, 8, 0],
];

/// Linear matrix index feeding each canonical coefficient position.
#[rustfmt::skip]
pub const COEFFICIENT_ORDER: [u8; COEFFICIENTS] = [
    0, 4, 8, 12, 32, 36, 40, 44, 128, 132, 136, 140, 160, 164, 168, 172,
    2, 6, 10, 14, 34, 38, 42, 46, 130, 134, 138, 142, 162, 166, 170, 174,
    64, 66, 68, 70, 72, 74, 76, 78, 96, 98, 100, 102, 104, 106, 108, 110,
    192, 194, 196, 198, 200, 202, 204, 206, 224, 226, 228, 230, 232, 234, 236, 238,
    16, 18, 20, 22, 24, 26, 28, 30, 48, 50, 52, 54, 56, 58, 60, 62,
    80, 82, 84, 86, 88, 90, 92, 94, 112, 114, 116, 118, 120, 122, 124, 126,
    144, 146, 148, 150, 152, 154, 156, 158, 176, 178, 180, 182, 184, 186, 188, 190,
    208, 210, 212, 214, 216, 218, 220, 222, 240, 242, 244, 246, 248, 250, 252, 254,
    1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 25, 27, 29, 31,
    33, 35, 37, 39, 41, 43, 45, 47, 49, 51, 53, 55, 57, 59, 61, 63,
    65, 67, 69, 71, 73, 75, 77, 79, 81, 83, 85, 87, 89, 91, 93, 95,
    97, 99, 101, 103, 105, 107, 109, 111, 113, 115, 117, 119, 121, 123, 125, 127,
    129, 131, 133, 135, 137, 139, 141, 143, 145, 147, 149, 151, 153, 155, 157, 159,
    161, 163, 165, 167, 169, 171, 173, 175, 177, 179, 181, 183, 185, 187, 189, 191,
    193, 195, 197, 199, 201, 203, 205, 207, 209, 211, 213, 215, 217, 219, 221, 223,
    225, 227, 229, 231, 233, 235, 237, 239, 241, 243, 245, 247, 249, 251, 253, 255,
];
