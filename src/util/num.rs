use crate::{ast::Position, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: i64 = 9_007_199_254_740_991;

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// This is how every integer-valued context (loop bounds, indexes,
/// repetition counts) interprets a number: `2.9` becomes `2`, `-2.9` becomes
/// `-2`.
///
/// ## Errors
/// Returns `TypeMismatch` for `NaN`, infinities, and magnitudes beyond
/// [`MAX_SAFE_INT`].
///
/// ## Example
/// ```
/// use mava::{ast::Position, util::num::truncate_to_i64};
///
/// assert_eq!(truncate_to_i64(2.9, Position::default()).unwrap(), 2);
/// assert_eq!(truncate_to_i64(-2.9, Position::default()).unwrap(), -2);
/// assert!(truncate_to_i64(f64::NAN, Position::default()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn truncate_to_i64(value: f64, pos: Position) -> EvalResult<i64> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated.abs() > MAX_SAFE_INT as f64 {
        return Err(RuntimeError::type_mismatch(format!("cannot use {value} as an integer"),
                                               pos));
    }
    Ok(truncated as i64)
}

/// Converts an `i64` produced by [`truncate_to_i64`] back into an `f64`.
///
/// Values in the safe integer range convert exactly.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a length or count into an `f64`.
///
/// Lengths of in-memory lists and strings stay far below `2^53`, so the
/// conversion is exact.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Resolves a numeric index against a sequence of length `len`.
///
/// The index is truncated toward zero first. Negative indexes are not
/// counted from the end; they are simply out of range.
///
/// ## Errors
/// - `TypeMismatch` if the index is not finite.
/// - `IndexOutOfRange` if the truncated index is negative or `>= len`.
///
/// ## Example
/// ```
/// use mava::{ast::Position, util::num::resolve_index};
///
/// assert_eq!(resolve_index(1.7, 3, Position::default()).unwrap(), 1);
/// assert!(resolve_index(3.0, 3, Position::default()).is_err());
/// assert!(resolve_index(-1.0, 3, Position::default()).is_err());
/// ```
pub fn resolve_index(index: f64, len: usize, pos: Position) -> EvalResult<usize> {
    let index = truncate_to_i64(index, pos)?;
    usize::try_from(index).ok()
                          .filter(|i| *i < len)
                          .ok_or(RuntimeError::IndexOutOfRange { index, len, pos })
}

/// Number of repetitions for `string * n` and `list * n`.
///
/// Truncates toward zero; zero and negative counts produce no repetitions.
pub fn repeat_count(count: f64, pos: Position) -> EvalResult<usize> {
    let count = truncate_to_i64(count, pos)?;
    Ok(usize::try_from(count).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_matches_integer_conversion() {
        let pos = Position::default();
        assert_eq!(truncate_to_i64(3.99, pos).unwrap(), 3);
        assert_eq!(truncate_to_i64(-0.5, pos).unwrap(), 0);
        assert!(truncate_to_i64(f64::INFINITY, pos).is_err());
        assert!(truncate_to_i64(1e300, pos).is_err());
    }

    #[test]
    fn index_bounds_are_checked() {
        let pos = Position::new(7, 3);
        assert_eq!(resolve_index(0.0, 1, pos).unwrap(), 0);
        match resolve_index(5.0, 2, pos) {
            Err(RuntimeError::IndexOutOfRange { index, len, pos: p }) => {
                assert_eq!((index, len, p), (5, 2, pos));
            },
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn negative_repeat_counts_are_empty() {
        let pos = Position::default();
        assert_eq!(repeat_count(-3.0, pos).unwrap(), 0);
        assert_eq!(repeat_count(2.5, pos).unwrap(), 2);
    }
}
