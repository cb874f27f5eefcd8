/// Parser entry points and the shared result type.
pub mod core;

/// Unary operators, postfix indexing and primary expressions.
///
/// Handles negation, logical NOT, literals, list literals, grouping, variable
/// references and calls.
pub mod unary;

/// Binary operator parsing.
///
/// Implements every precedence level from the ternary operator down to
/// exponentiation.
pub mod binary;

/// Block and program bodies: statement sequences with an optional trailing
/// `return`.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token expectations, identifier and list helpers, and error
/// constructors.
pub mod utils;

/// Statement parsing.
///
/// Function declarations, assignments, `if`, `for`, `while` and expression
/// statements.
pub mod statement;
