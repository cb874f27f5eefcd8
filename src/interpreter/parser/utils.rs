use std::iter::Peekable;

use crate::{
    ast::Position,
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::core::{ParseResult, TokenStream},
    },
};

/// Builds an `UnexpectedToken` error for `found`.
pub(in crate::interpreter::parser) fn unexpected(found: &Lexeme, expected: &str) -> ParseError {
    ParseError::UnexpectedToken { expected: expected.to_string(),
                                  found:    found.text.clone(),
                                  pos:      found.pos, }
}

/// Builds an `UnexpectedEndOfInput` error. The position is filled in by
/// `parse_program`.
pub(in crate::interpreter::parser) fn end_of_input(expected: &str) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                       pos:      Position::default(), }
}

/// Returns `true` if the next lexeme is `token`.
pub(in crate::interpreter::parser) fn peek_is<'a, I>(tokens: &mut Peekable<I>, token: &Token) -> bool
    where I: TokenStream<'a>
{
    tokens.peek().is_some_and(|l| l.token == *token)
}

/// Consumes the next lexeme if it is `token`.
pub(in crate::interpreter::parser) fn accept<'a, I>(tokens: &mut Peekable<I>, token: &Token) -> bool
    where I: TokenStream<'a>
{
    tokens.next_if(|l| l.token == *token).is_some()
}

/// Consumes the next lexeme, which must be `token`.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `token`: The required token.
/// - `expected`: How the token is described in an error, e.g. `"')'"`.
///
/// # Returns
/// The consumed lexeme.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    token: &Token,
                                                    expected: &str)
                                                    -> ParseResult<&'a Lexeme>
    where I: TokenStream<'a>
{
    match tokens.next() {
        Some(lexeme) if lexeme.token == *token => Ok(lexeme),
        Some(lexeme) => Err(unexpected(lexeme, expected)),
        None => Err(end_of_input(expected)),
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: TokenStream<'a>
{
    match tokens.next() {
        Some(Lexeme { token: Token::Identifier(name),
                      .. }) => Ok(name.clone()),
        Some(lexeme) => Err(unexpected(lexeme, "identifier")),
        None => Err(end_of_input("identifier")),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by list literals, argument lists and parameter lists. An
/// immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
/// - `closing_text`: How the closing token is named in errors.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    closing_text: &str)
    -> ParseResult<Vec<T>>
    where I: TokenStream<'a>
{
    let mut items = Vec::new();
    if accept(tokens, closing) {
        return Ok(items);
    }

    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some(Lexeme { token: Token::Comma,
                          .. }) => {},
            Some(lexeme) if lexeme.token == *closing => break,
            Some(lexeme) => return Err(unexpected(lexeme, &format!("',' or {closing_text}"))),
            None => return Err(end_of_input(&format!("',' or {closing_text}"))),
        }
    }

    Ok(items)
}
