use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{ConditionalBranch, FunctionDecl, Statement},
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, TokenStream, parse_expression},
            utils::{accept, end_of_input, expect, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a function declaration (`def`),
/// - an `if`, `for` or `while` statement,
/// - an assignment, possibly through indexes,
/// - an expression used as a statement.
///
/// Assignments and expression statements may be followed by an optional
/// `;`.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first token of the statement.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: TokenStream<'a>
{
    let Some(first) = tokens.peek().copied() else {
        return Err(end_of_input("statement"));
    };

    let statement = match first.token {
        Token::Def => return parse_function_decl(tokens),
        Token::If => return parse_if(tokens),
        Token::For => return parse_for(tokens),
        Token::While => return parse_while(tokens),
        Token::Identifier(_) if is_assignment(tokens) => parse_assignment(tokens)?,
        _ => Statement::Expression { expr: parse_expression(tokens)?,
                                     pos:  first.pos, },
    };

    accept(tokens, &Token::Semicolon);
    Ok(statement)
}

/// Looks ahead for `Identifier ("[" ... "]")* "="` without consuming input.
fn is_assignment<'a, I>(tokens: &Peekable<I>) -> bool
    where I: TokenStream<'a>
{
    let mut lookahead = tokens.clone();
    lookahead.next();

    let mut depth = 0usize;
    for lexeme in lookahead {
        match lexeme.token {
            Token::LBracket => depth += 1,
            Token::RBracket if depth > 0 => depth -= 1,
            Token::Equals if depth == 0 => return true,
            _ if depth > 0 => {},
            _ => return false,
        }
    }
    false
}

/// Parses `name ("[" expression "]")* "=" expression`.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: TokenStream<'a>
{
    let pos = tokens.peek().map(|l| l.pos).unwrap_or_default();
    let name = parse_identifier(tokens)?;

    let mut indexes = Vec::new();
    while accept(tokens, &Token::LBracket) {
        indexes.push(parse_expression(tokens)?);
        expect(tokens, &Token::RBracket, "']'")?;
    }

    expect(tokens, &Token::Equals, "'='")?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assignment { name,
                               indexes,
                               value,
                               pos })
}

/// Parses a function declaration.
///
/// Grammar: `functionDecl := "def" Identifier "(" idList? ")" block`
fn parse_function_decl<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: TokenStream<'a>
{
    let def = expect(tokens, &Token::Def, "'def'")?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen, "'('")?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen, "')'")?;
    let body = parse_block(tokens)?;

    Ok(Statement::FunctionDecl(Rc::new(FunctionDecl { name,
                                                      params,
                                                      body,
                                                      pos: def.pos })))
}

/// Parses an `if` statement with optional `else if` and `else` arms.
///
/// Syntax:
/// ```text
///     if <condition> { ... }
///     else if <condition> { ... }
///     else { ... }
/// ```
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: TokenStream<'a>
{
    let if_token = expect(tokens, &Token::If, "'if'")?;

    let mut branches = vec![ConditionalBranch { condition: parse_expression(tokens)?,
                                                body:      parse_block(tokens)?, }];
    let mut else_block = None;

    while accept(tokens, &Token::Else) {
        if accept(tokens, &Token::If) {
            branches.push(ConditionalBranch { condition: parse_expression(tokens)?,
                                              body:      parse_block(tokens)?, });
        } else {
            else_block = Some(parse_block(tokens)?);
            break;
        }
    }

    Ok(Statement::If { branches,
                       else_block,
                       pos: if_token.pos })
}

/// Parses `for var = start to stop { ... }`.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: TokenStream<'a>
{
    let for_token = expect(tokens, &Token::For, "'for'")?;
    let var = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals, "'='")?;
    let start = parse_expression(tokens)?;
    expect(tokens, &Token::To, "'to'")?;
    let stop = parse_expression(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::For { var,
                        start,
                        stop,
                        body,
                        pos: for_token.pos })
}

/// Parses `while condition { ... }`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: TokenStream<'a>
{
    let while_token = expect(tokens, &Token::While, "'while'")?;
    let condition = parse_expression(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::While { condition,
                          body,
                          pos: while_token.pos })
}
