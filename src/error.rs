/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unexpected tokens, unterminated constructs and characters the lexer
/// does not recognise.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while registering functions
/// and evaluating a program: type and dimension mismatches, unbound names,
/// illegal use of `VOID`, failed assertions and I/O failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure produced while turning source text into a finished run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source could not be lexed or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Function registration or evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Failed assertions terminate with `2`; every other failure with `1`.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(_) => 1,
            Self::Runtime(e) => e.exit_code(),
        }
    }
}
