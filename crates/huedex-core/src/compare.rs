//! Distance functions and operand checks shared by the descriptor engines.

use crate::error::{DescriptorError, DescriptorResult};

/// Sum of absolute differences. Operands must have equal length.
pub fn l1_distance<T>(a: &[T], b: &[T]) -> DescriptorResult<f64>
where
    T: Copy + Into<f64>,
{
    ensure_same_length(a, b)?;
    Ok(a.iter()
        .zip(b)
        .map(|(&x, &y)| (x.into() - y.into()).abs())
        .sum())
}

/// Euclidean distance. Operands must have equal length.
pub fn euclidean_distance<T>(a: &[T], b: &[T]) -> DescriptorResult<f64>
where
    T: Copy + Into<f64>,
{
    ensure_same_length(a, b)?;
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x.into() - y.into();
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}

/// Borrow a descriptor's payload, or fail if it was never computed.
pub fn ensure_populated<T>(payload: Option<&T>) -> DescriptorResult<&T>
where
    T: ?Sized,
{
    payload.ok_or(DescriptorError::Unpopulated)
}

/// Fail with the parameter's name when the two sides disagree.
pub fn ensure_matching<T>(parameter: &str, a: T, b: T) -> DescriptorResult<()>
where
    T: PartialEq + std::fmt::Debug,
{
    if a != b {
        return Err(DescriptorError::IncompatibleOperands(format!(
            "{parameter} differs: {a:?} vs {b:?}"
        )));
    }
    Ok(())
}

/// Fail when two vectors differ in length.
pub fn ensure_same_length<T>(a: &[T], b: &[T]) -> DescriptorResult<()> {
    ensure_matching("length", a.len(), b.len())
}
