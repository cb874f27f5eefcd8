use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream, parse_expression},
            unary::parse_unary,
            utils::expect,
        },
    },
};

/// Parses a ternary conditional expression.
///
/// Grammar: `ternary := or ("?" expression ":" expression)?`
///
/// The branches are full expressions, so `a ? b : c ? d : e` nests to the
/// right.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the start of an expression.
///
/// # Returns
/// An `Expr::Ternary` node, or the condition itself when no `?` follows.
pub fn parse_ternary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    let condition = parse_or(tokens)?;

    let Some(question) = tokens.next_if(|l| l.token == Token::Question) else {
        return Ok(condition);
    };

    let then_branch = parse_expression(tokens)?;
    expect(tokens, &Token::Colon, "':'")?;
    let else_branch = parse_expression(tokens)?;

    Ok(Expr::Ternary { condition:   Box::new(condition),
                       then_branch: Box::new(then_branch),
                       else_branch: Box::new(else_branch),
                       pos:         question.pos, })
}

/// Parses `or := and ("||" and)*`.
pub fn parse_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    parse_left_associative(tokens, parse_and, &[BinaryOperator::Or])
}

/// Parses `and := equality ("&&" equality)*`.
pub fn parse_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    parse_left_associative(tokens, parse_equality, &[BinaryOperator::And])
}

/// Parses `equality := comparison (("==" | "!=") comparison)*`.
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    parse_left_associative(tokens,
                           parse_comparison,
                           &[BinaryOperator::Equal, BinaryOperator::NotEqual])
}

/// Parses relational comparisons and list membership.
///
/// The rule is: `comparison := additive (("<" | "<=" | ">" | ">=" | "in")
/// additive)*`
///
/// `in` binds as tightly as `<`, not as the loosest expression form, so
/// `x in xs == true` is `(x in xs) == true`.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    parse_left_associative(tokens,
                           parse_additive,
                           &[BinaryOperator::Less,
                             BinaryOperator::LessEqual,
                             BinaryOperator::Greater,
                             BinaryOperator::GreaterEqual,
                             BinaryOperator::In])
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    parse_left_associative(tokens,
                           parse_multiplicative,
                           &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := power (("*" | "/" | "%") power)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    parse_left_associative(tokens,
                           parse_power,
                           &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod])
}

/// Parses exponentiation.
///
/// `^` is right-associative, so `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`. Its operands
/// are unary expressions: `-2 ^ 2` squares `-2`.
///
/// The rule is: `power := unary ("^" power)?`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    let base = parse_unary(tokens)?;

    let Some(caret) = tokens.next_if(|l| l.token == Token::Caret) else {
        return Ok(base);
    };

    let exponent = parse_power(tokens)?;
    Ok(Expr::BinaryOp { left:  Box::new(base),
                        op:    BinaryOperator::Pow,
                        right: Box::new(exponent),
                        pos:   caret.pos, })
}

/// Maps a token to the binary operator it spells, if any.
///
/// ## Example
/// ```
/// use mava::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::In), Some(BinaryOperator::In));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::OrOr => Some(BinaryOperator::Or),
        Token::In => Some(BinaryOperator::In),
        _ => None,
    }
}

/// Folds `operand (op operand)*` into a left-leaning tree for the operators
/// in `ops`.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 operand: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                                 ops: &[BinaryOperator])
                                 -> ParseResult<Expr>
    where I: TokenStream<'a>
{
    let mut left = operand(tokens)?;

    while let Some(lexeme) = tokens.peek()
          && let Some(op) = token_to_binary_operator(&lexeme.token)
          && ops.contains(&op)
    {
        let pos = lexeme.pos;
        tokens.next();

        let right = operand(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                pos };
    }

    Ok(left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn expression(source: &str) -> Expr {
        let lexemes = tokenize(source).unwrap();
        let mut tokens = lexemes.iter().peekable();
        let expr = parse_expression(&mut tokens).unwrap();
        assert!(tokens.next().is_none(), "trailing tokens in {source:?}");
        expr
    }

    fn operator(expr: &Expr) -> BinaryOperator {
        match expr {
            Expr::BinaryOp { op, .. } => *op,
            other => panic!("expected binary operation, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = expression("1 + 2 * 3");
        assert_eq!(operator(&expr), BinaryOperator::Add);
        let Expr::BinaryOp { right, .. } = expr else { unreachable!() };
        assert_eq!(operator(&right), BinaryOperator::Mul);
    }

    #[test]
    fn subtraction_is_left_associative() {
        let Expr::BinaryOp { left, .. } = expression("10 - 4 - 3") else {
            panic!("expected binary operation")
        };
        assert_eq!(operator(&left), BinaryOperator::Sub);
    }

    #[test]
    fn power_is_right_associative() {
        let Expr::BinaryOp { left, right, .. } = expression("2 ^ 3 ^ 2") else {
            panic!("expected binary operation")
        };
        assert!(matches!(*left, Expr::Literal { .. }));
        assert_eq!(operator(&right), BinaryOperator::Pow);
    }

    #[test]
    fn unary_minus_applies_to_the_base() {
        let Expr::BinaryOp { left, op, .. } = expression("-2 ^ 2") else {
            panic!("expected binary operation")
        };
        assert_eq!(op, BinaryOperator::Pow);
        assert!(matches!(*left, Expr::UnaryOp { .. }));
    }

    #[test]
    fn membership_sits_with_comparisons() {
        let expr = expression("1 + 1 in xs == true");
        assert_eq!(operator(&expr), BinaryOperator::Equal);
        let Expr::BinaryOp { left, .. } = expr else { unreachable!() };
        assert_eq!(operator(&left), BinaryOperator::In);
    }

    #[test]
    fn ternary_nests_in_the_else_branch() {
        let Expr::Ternary { else_branch, .. } = expression("a ? 1 : b ? 2 : 3") else {
            panic!("expected ternary")
        };
        assert!(matches!(*else_branch, Expr::Ternary { .. }));
    }
}
