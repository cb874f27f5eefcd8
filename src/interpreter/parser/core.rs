use std::iter::Peekable;

use crate::{
    ast::{Block, Expr, Position},
    error::ParseError,
    interpreter::{
        lexer::Lexeme,
        parser::{binary::parse_ternary, block::parse_body, utils::unexpected},
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A cloneable stream of lexemes that knows how many remain.
///
/// Cloning gives the parser cheap lookahead; the remaining length lets it
/// recover the exact lexemes an expression was parsed from.
pub trait TokenStream<'a>: Iterator<Item = &'a Lexeme> + ExactSizeIterator + Clone {}

impl<'a, I> TokenStream<'a> for I where I: Iterator<Item = &'a Lexeme> + ExactSizeIterator + Clone {}

/// Parses a whole program.
///
/// Grammar: `program := item* ("return" expression ";"?)? EOF`
///
/// # Parameters
/// - `lexemes`: Output of the lexer.
///
/// # Returns
/// The program as a [`Block`] positioned at line 1, column 1.
///
/// # Errors
/// Any syntax error. An error at the end of input points at the last
/// lexeme of the program.
pub fn parse_program(lexemes: &[Lexeme]) -> ParseResult<Block> {
    let end = lexemes.last().map_or_else(|| Position::new(1, 1), |l| l.pos);
    let mut tokens = lexemes.iter().peekable();

    let result = parse_body(&mut tokens, None, Position::new(1, 1)).and_then(|block| {
                     match tokens.next() {
                         Some(lexeme) => Err(unexpected(lexeme, "end of input")),
                         None => Ok(block),
                     }
                 });

    result.map_err(|err| match err {
              ParseError::UnexpectedEndOfInput { expected, .. } => {
                  ParseError::UnexpectedEndOfInput { expected,
                                                     pos: end }
              },
              other => other,
          })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the lowest
/// precedence level, the ternary operator, and recursively descends through
/// the precedence hierarchy.
///
/// Grammar: `expression := ternary`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    ensure_sufficient_stack(|| parse_ternary(tokens))
}
