/// Operator dispatch entry point.
pub mod core;
/// `+ - * / % ^` over numbers, strings, lists, vectors and matrices.
pub mod arith;
/// Ordering, equality and `in`.
pub mod comparison;
/// Non-short-circuiting `&&` and `||`.
pub mod logic;
