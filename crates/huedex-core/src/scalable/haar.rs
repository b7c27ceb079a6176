//! Fixed-basis Haar transform over the 256-bin HSV histogram.
//!
//! The histogram is laid out as a 16 × 16 matrix (`matrix[i % 16][i / 16]`)
//! and reduced by 255 sum/difference butterflies:
//!
//! ```text
//! (a, b) → (a + b, b − a)
//! ```
//!
//! Coefficients are then permuted into canonical order, DC first.

use crate::tables::scalable::{COEFFICIENT_ORDER, COEFFICIENTS, HAAR_BUTTERFLIES, MATRIX_SIDE};

type Matrix = [[i32; MATRIX_SIDE]; MATRIX_SIDE];

fn to_matrix(values: &[i32; COEFFICIENTS]) -> Matrix {
    let mut m = [[0; MATRIX_SIDE]; MATRIX_SIDE];
    for (i, &v) in values.iter().enumerate() {
        m[i % MATRIX_SIDE][i / MATRIX_SIDE] = v;
    }
    m
}

fn from_matrix(m: &Matrix) -> [i32; COEFFICIENTS] {
    std::array::from_fn(|i| m[i % MATRIX_SIDE][i / MATRIX_SIDE])
}

/// Forward transform, output in canonical coefficient order.
pub fn forward(histogram: &[i32; COEFFICIENTS]) -> [i32; COEFFICIENTS] {
    let mut m = to_matrix(histogram);
    for &[y1, x1, y2, x2] in &HAAR_BUTTERFLIES {
        let (y1, x1, y2, x2) = (y1 as usize, x1 as usize, y2 as usize, x2 as usize);
        let a = m[y1][x1];
        let b = m[y2][x2];
        m[y1][x1] = a + b;
        m[y2][x2] = b - a;
    }
    let raw = from_matrix(&m);
    std::array::from_fn(|j| raw[COEFFICIENT_ORDER[j] as usize])
}

/// Inverse of [`forward`]. Exact for any output of the forward transform.
pub fn inverse(coefficients: &[i32; COEFFICIENTS]) -> [i32; COEFFICIENTS] {
    let mut raw = [0; COEFFICIENTS];
    for (j, &c) in coefficients.iter().enumerate() {
        raw[COEFFICIENT_ORDER[j] as usize] = c;
    }
    let mut m = to_matrix(&raw);
    for &[y1, x1, y2, x2] in HAAR_BUTTERFLIES.iter().rev() {
        let (y1, x1, y2, x2) = (y1 as usize, x1 as usize, y2 as usize, x2 as usize);
        let sum = m[y1][x1];
        let dif = m[y2][x2];
        m[y1][x1] = (sum - dif) / 2;
        m[y2][x2] = (sum + dif) / 2;
    }
    from_matrix(&m)
}
