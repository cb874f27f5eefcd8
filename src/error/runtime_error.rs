use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur during function registration and
/// evaluation.
///
/// Every error aborts the current run. [`RuntimeError::AssertionFailed`] is
/// the one fatal variant callers are expected to report distinctly.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// An operand's type or shape does not satisfy the operator's contract.
    #[error("Error on {pos}: Type mismatch: {details}.")]
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// Where the error occurred.
        pos:     Position,
    },
    /// Vector or matrix shapes are incompatible.
    #[error("Error on {pos}: Dimension mismatch! {details}.")]
    DimensionMismatch {
        /// Description of the shape mismatch.
        details: String,
        /// Where the error occurred.
        pos:     Position,
    },
    /// Tried to access a list or string element outside its bounds.
    #[error("Error on {pos}: Index {index} is out of range for length {len}.")]
    IndexOutOfRange {
        /// The index that was actually requested.
        index: i64,
        /// The length of the indexed value.
        len:   usize,
        /// Where the error occurred.
        pos:   Position,
    },
    /// Tried to use a variable that is not bound in any enclosing frame.
    #[error("Error on {pos}: Unknown variable '{name}'.")]
    UnboundIdentifier {
        /// The name of the variable.
        name: String,
        /// Where the error occurred.
        pos:  Position,
    },
    /// Called a function that is not registered with this arity.
    #[error("Error on {pos}: Unknown function '{name}' taking {arity} argument(s).")]
    UnboundFunction {
        /// The name of the function.
        name:  String,
        /// The number of arguments supplied.
        arity: usize,
        /// Where the error occurred.
        pos:   Position,
    },
    /// Ordering was requested between values that have no ordering.
    #[error("Error on {pos}: Can't compare `{left}` to `{right}`.")]
    NotComparable {
        /// Printed form of the left operand.
        left:  String,
        /// Printed form of the right operand.
        right: String,
        /// Where the error occurred.
        pos:   Position,
    },
    /// `transpose` applied to something that is not a vector or matrix.
    #[error("Error on {pos}: Only vectors and matrices can be transposed!")]
    NotTransposable {
        /// Where the error occurred.
        pos: Position,
    },
    /// `rows`/`columns` applied to something that is not a vector or matrix.
    #[error("Error on {pos}: rows() and columns() work only with vectors and matrices.")]
    NotDimensionable {
        /// Where the error occurred.
        pos: Position,
    },
    /// `determinant` applied to something that is not a square matrix.
    #[error("Error on {pos}: Determinant can be calculated only of a square matrix.")]
    NotSquare {
        /// Where the error occurred.
        pos: Position,
    },
    /// `matrixSum` applied to something that is not a vector or matrix.
    #[error("Error on {pos}: matrixSum() works only with vectors and matrices.")]
    NotSummable {
        /// Where the error occurred.
        pos: Position,
    },
    /// Illegal use of the `VOID` sentinel.
    #[error("Error on {pos}: Invalid operation: {details}.")]
    InvalidOperation {
        /// Details about what was attempted.
        details: String,
        /// Where the error occurred.
        pos:     Position,
    },
    /// An `assert` evaluated to `false`.
    #[error("Failed Assertion {expression} line:{}", .pos.line)]
    AssertionFailed {
        /// Source text of the asserted expression.
        expression: String,
        /// Where the assertion is.
        pos:        Position,
    },
    /// Reading input for `input()` or writing program output failed.
    #[error("Error on {pos}: I/O failure: {source}.")]
    Io {
        /// The underlying I/O error.
        source: std::io::Error,
        /// Where the error occurred.
        pos:    Position,
    },
    /// The wrong number of arguments was supplied to a built-in.
    #[error("Error on {pos}: '{name}' expects {expected} argument(s), but found {found}.")]
    ArgumentCountMismatch {
        /// The name of the built-in.
        name:     &'static str,
        /// Human readable description of the accepted counts.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// Where the error occurred.
        pos:      Position,
    },
    /// Two declarations share the same name and arity.
    #[error("Error on {pos}: Function '{name}' taking {arity} argument(s) is already defined.")]
    FunctionAlreadyDefined {
        /// The name of the function.
        name:  String,
        /// The shared arity.
        arity: usize,
        /// Position of the second declaration.
        pos:   Position,
    },
    /// `string * n` or `list * n` would need more memory than can be
    /// allocated.
    #[error("Error on {pos}: Cannot repeat {len} element(s) {count} times: result is too large.")]
    RepetitionTooLarge {
        /// Length of the repeated string (in bytes) or list.
        len:   usize,
        /// The requested repetition count.
        count: usize,
        /// Where the error occurred.
        pos:   Position,
    },
    /// Attempted to declare a function under a built-in name.
    #[error("Error on {pos}: Cannot redefine built-in function '{name}'.")]
    BuiltinFunctionRedefinition {
        /// The name of the function.
        name: String,
        /// Position of the declaration.
        pos:  Position,
    },
}

impl RuntimeError {
    /// Returns `true` for a failed `assert`, the fatal error class.
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.is_assertion() { 2 } else { 1 }
    }

    /// The source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::TypeMismatch { pos, .. }
            | Self::DimensionMismatch { pos, .. }
            | Self::IndexOutOfRange { pos, .. }
            | Self::UnboundIdentifier { pos, .. }
            | Self::UnboundFunction { pos, .. }
            | Self::NotComparable { pos, .. }
            | Self::NotTransposable { pos }
            | Self::NotDimensionable { pos }
            | Self::NotSquare { pos }
            | Self::NotSummable { pos }
            | Self::InvalidOperation { pos, .. }
            | Self::AssertionFailed { pos, .. }
            | Self::Io { pos, .. }
            | Self::ArgumentCountMismatch { pos, .. }
            | Self::FunctionAlreadyDefined { pos, .. }
            | Self::RepetitionTooLarge { pos, .. }
            | Self::BuiltinFunctionRedefinition { pos, .. } => *pos,
        }
    }

    /// Builds a [`RuntimeError::TypeMismatch`].
    pub(crate) fn type_mismatch(details: impl Into<String>, pos: Position) -> Self {
        Self::TypeMismatch { details: details.into(),
                             pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_is_reported_distinctly() {
        let err = RuntimeError::AssertionFailed { expression: "x==3".into(),
                                                  pos:        Position::new(4, 1), };
        assert!(err.is_assertion());
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Failed Assertion x==3 line:4");
    }

    #[test]
    fn ordinary_errors_carry_position() {
        let err = RuntimeError::type_mismatch("cannot negate \"a\"", Position::new(2, 5));
        assert!(!err.is_assertion());
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.position(), Position::new(2, 5));
        assert_eq!(err.to_string(),
                   "Error on line 2, column 5: Type mismatch: cannot negate \"a\".");
    }
}
