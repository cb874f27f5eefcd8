/// Dense row-major matrices of `f64` and the numeric kernels over them.
///
/// Nothing in this module knows about runtime values; shape mismatches are
/// reported as [`matrix::ShapeMismatch`] and translated by the adapter.
pub mod matrix;

/// Conversion between list values and [`matrix::Matrix`], plus the
/// vector/matrix operators and built-ins exposed to programs.
///
/// A vector enters the kernel as an `n x 1` column. Results are rebuilt as
/// lists in row-major order.
pub mod adapter;
