/// Binary operator evaluation logic.
///
/// Dispatches every binary operator on the runtime types of its already
/// evaluated operands: arithmetic, repetition, list append/removal, vector
/// and matrix operators, comparisons, membership and logic.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the interpreter state, the control-flow outcome type, and the
/// dispatch over expression and statement nodes.
pub mod core;

/// `if`, `for` and `while`, including propagation of return signals out of
/// their bodies.
pub mod control;

/// Reading through trailing indexes and assigning through them.
pub mod index;

/// Function evaluation.
///
/// Handles user-defined calls and the built-in functions.
pub mod function;

/// Utility functions for evaluation.
pub mod utils;
