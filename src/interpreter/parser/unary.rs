use std::iter::Peekable;

use crate::{
    ast::{Builtin, Expr, LiteralValue, Position, UnaryOperator},
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            core::{ParseResult, TokenStream, parse_expression},
            utils::{accept, end_of_input, expect, parse_comma_separated, peek_is, unexpected},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so `!-x` is parsed as `!(-x)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | postfix
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a postfix expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    let op = match tokens.peek() {
        Some(Lexeme { token: Token::Minus,
                      .. }) => UnaryOperator::Negate,
        Some(Lexeme { token: Token::Bang,
                      .. }) => UnaryOperator::Not,
        _ => return parse_postfix(tokens),
    };

    let Some(operator) = tokens.next() else {
        return Err(end_of_input("expression"));
    };
    let expr = parse_unary(tokens)?;

    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       pos: operator.pos })
}

/// Parses a primary expression followed by any number of `[index]`
/// suffixes.
///
/// Grammar: `postfix := primary ("[" expression "]")*`
///
/// Consecutive indexes are collected into a single [`Expr::Index`] so that
/// `m[i][j]` evaluates `m` once.
pub(crate) fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    let target = parse_primary(tokens)?;

    let mut indexes = Vec::new();
    while accept(tokens, &Token::LBracket) {
        indexes.push(parse_expression(tokens)?);
        expect(tokens, &Token::RBracket, "']'")?;
    }

    if indexes.is_empty() {
        return Ok(target);
    }

    let pos = target.position();
    Ok(Expr::Index { target: Box::new(target),
                     indexes,
                     pos })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions include:
/// - number, string, boolean and `null` literals
/// - list literals (`[ ... ]`)
/// - parenthesized expressions
/// - identifiers
/// - user-defined and built-in calls
///
/// # Errors
/// `UnexpectedToken` if the next token cannot start an expression,
/// `UnexpectedEndOfInput` if there is none.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    let Some(lexeme) = tokens.next() else {
        return Err(end_of_input("expression"));
    };
    let pos = lexeme.pos;

    match &lexeme.token {
        Token::Number(n) => Ok(literal(LiteralValue::Number(*n), pos)),
        Token::String(raw) => Ok(literal(LiteralValue::String(raw.clone()), pos)),
        Token::Bool(b) => Ok(literal(LiteralValue::Bool(*b), pos)),
        Token::Null => Ok(literal(LiteralValue::Null, pos)),
        Token::LBracket => {
            let elements =
                parse_comma_separated(tokens, parse_expression, &Token::RBracket, "']'")?;
            Ok(Expr::ListLiteral { elements, pos })
        },
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')'")?;
            Ok(expr)
        },
        Token::Identifier(name) if peek_is(tokens, &Token::LParen) => {
            tokens.next();
            parse_call(tokens, name, pos)
        },
        Token::Identifier(name) => Ok(Expr::Identifier { name: name.clone(),
                                                         pos }),
        _ => Err(unexpected(lexeme, "expression")),
    }
}

/// Parses the argument list of a call whose `(` has been consumed.
///
/// `assert` keeps the source text of its single argument, rebuilt from
/// the consumed lexemes without whitespace.
fn parse_call<'a, I>(tokens: &mut Peekable<I>, name: &str, pos: Position) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    if name == "assert" {
        let remaining = tokens.len();
        let snapshot = tokens.clone();

        let condition = parse_expression(tokens)?;
        let source = snapshot.take(remaining - tokens.len())
                             .map(|l| l.text.as_str())
                             .collect::<String>();
        expect(tokens, &Token::RParen, "')'")?;

        return Ok(Expr::Assert { condition: Box::new(condition),
                                 source,
                                 pos });
    }

    let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen, "')'")?;

    Ok(match Builtin::from_name(name) {
        Some(builtin) => Expr::BuiltinCall { builtin,
                                             arguments,
                                             pos },
        None => Expr::FunctionCall { name: name.to_string(),
                                     arguments,
                                     pos },
    })
}

fn literal(value: LiteralValue, pos: Position) -> Expr {
    Expr::Literal { value, pos }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ParseError, interpreter::lexer::tokenize};

    fn parse(source: &str) -> ParseResult<Expr> {
        let lexemes = tokenize(source).unwrap();
        parse_expression(&mut lexemes.iter().peekable())
    }

    #[test]
    fn assert_keeps_its_source_text() {
        match parse("assert(size( xs ) == 3)").unwrap() {
            Expr::Assert { source, .. } => assert_eq!(source, "size(xs)==3"),
            other => panic!("expected assert, got {other:?}"),
        }
    }

    #[test]
    fn builtin_names_become_builtin_calls() {
        assert!(matches!(parse("transpose(m)").unwrap(),
                         Expr::BuiltinCall { builtin: Builtin::Transpose,
                                             .. }));
        assert!(matches!(parse("transposed(m)").unwrap(), Expr::FunctionCall { .. }));
    }

    #[test]
    fn chained_indexes_share_one_node() {
        match parse("m[1][0]").unwrap() {
            Expr::Index { indexes, .. } => assert_eq!(indexes.len(), 2),
            other => panic!("expected index, got {other:?}"),
        }
    }

    #[test]
    fn nested_list_literal() {
        match parse("[[1, 2], []]").unwrap() {
            Expr::ListLiteral { elements, .. } => {
                assert!(matches!(&elements[1], Expr::ListLiteral { elements, .. } if elements.is_empty()));
            },
            other => panic!("expected list literal, got {other:?}"),
        }
    }

    #[test]
    fn missing_operand_is_reported() {
        assert!(matches!(parse("1 + )"),
                         Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(parse("(1 + 2"),
                         Err(ParseError::UnexpectedEndOfInput { .. })));
    }
}
