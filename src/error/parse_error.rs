use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer met text that does not start any token.
    #[error("Error on {pos}: Invalid token '{text}'.")]
    InvalidToken {
        /// The offending source text.
        text: String,
        /// Where the text starts.
        pos:  Position,
    },
    /// Found a token the grammar does not allow here.
    #[error("Error on {pos}: Expected {expected}, but found '{found}'.")]
    UnexpectedToken {
        /// Description of what the parser was looking for.
        expected: String,
        /// Source text of the token encountered.
        found:    String,
        /// Position of the token encountered.
        pos:      Position,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on {pos}: Expected {expected}, but reached the end of input.")]
    UnexpectedEndOfInput {
        /// Description of what the parser was looking for.
        expected: String,
        /// Position of the last token in the input.
        pos:      Position,
    },
}

impl ParseError {
    /// The source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::InvalidToken { pos, .. }
            | Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEndOfInput { pos, .. } => *pos,
        }
    }
}
