use std::iter::Peekable;

use crate::{
    ast::{Block, Position},
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            core::{ParseResult, TokenStream, parse_expression},
            statement::parse_statement,
            utils::{accept, end_of_input, expect},
        },
    },
};

/// Parses a brace-delimited block.
///
/// Grammar: `block := "{" item* ("return" expression ";"?)? "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at `{`.
///
/// # Returns
/// A [`Block`] positioned at its opening brace.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: TokenStream<'a>
{
    let open = expect(tokens, &Token::LBrace, "'{'")?;
    let block = parse_body(tokens, Some(&Token::RBrace), open.pos)?;
    expect(tokens, &Token::RBrace, "'}'")?;
    Ok(block)
}

/// Parses statements up to `closing` (left unconsumed), the end of input,
/// or a `return`, which must be the last thing in the body.
///
/// Stray semicolons between statements are ignored.
///
/// # Errors
/// `UnexpectedEndOfInput` if `closing` is given and the input ends first.
pub(in crate::interpreter::parser) fn parse_body<'a, I>(tokens: &mut Peekable<I>,
                                                        closing: Option<&Token>,
                                                        pos: Position)
                                                        -> ParseResult<Block>
    where I: TokenStream<'a>
{
    let mut statements = Vec::new();
    let mut result = None;

    loop {
        match tokens.peek() {
            None if closing.is_some() => return Err(end_of_input("'}'")),
            None => break,
            Some(lexeme) if Some(&lexeme.token) == closing => break,
            Some(Lexeme { token: Token::Semicolon,
                          .. }) => {
                tokens.next();
            },
            Some(Lexeme { token: Token::Return,
                          .. }) => {
                tokens.next();
                result = Some(parse_expression(tokens)?);
                accept(tokens, &Token::Semicolon);
                break;
            },
            Some(_) => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(Block { statements,
               result,
               pos })
}
