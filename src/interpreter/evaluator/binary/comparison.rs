use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::describe,
        },
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a relational or equality operator.
    ///
    /// `==` and `!=` accept any operands except `VOID` and use the
    /// tolerant structural equality of [`Value::try_eq`]. The ordering
    /// operators accept two numbers or two strings. Numbers are ordered
    /// exactly, and every ordering involving `NaN` is `false`.
    ///
    /// # Example
    /// ```
    /// use mava::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let r = Interpreter::eval_comparison(BinaryOperator::LessEqual,
    ///                                      &Value::from("abc"),
    ///                                      &Value::from("abd"),
    ///                                      Position::default());
    /// assert_eq!(r.unwrap().to_string(), "true");
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           pos: Position)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let result = match op {
            Equal => left.try_eq(right, pos)?,
            NotEqual => !left.try_eq(right, pos)?,
            Less => left.compare(right, pos)? == Some(Ordering::Less),
            LessEqual => matches!(left.compare(right, pos)?, Some(Ordering::Less | Ordering::Equal)),
            Greater => left.compare(right, pos)? == Some(Ordering::Greater),
            GreaterEqual => matches!(left.compare(right, pos)?, Some(Ordering::Greater | Ordering::Equal)),
            _ => return Err(RuntimeError::type_mismatch(format!("`{op}` is not a comparison"), pos)),
        };

        Ok(Value::Bool(result))
    }

    /// Evaluates `needle in haystack`.
    ///
    /// # Errors
    /// `TypeMismatch` unless the right operand is a list.
    pub fn eval_membership(needle: &Value, haystack: &Value, pos: Position) -> EvalResult<Value> {
        let elements =
            haystack.borrow_elements()
                    .ok_or_else(|| RuntimeError::type_mismatch(format!("`in` expects a list on the right, found {}",
                                                                       describe(haystack)),
                                                               pos))?;

        for element in elements.iter() {
            if element.try_eq(needle, pos)? {
                return Ok(Value::Bool(true));
            }
        }

        Ok(Value::Bool(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position::new(1, 1);

    fn compare(op: BinaryOperator, left: f64, right: f64) -> String {
        Interpreter::eval_comparison(op, &Value::Number(left), &Value::Number(right), POS).unwrap()
                                                                                         .to_string()
    }

    #[test]
    fn ordering_is_exact_ieee() {
        assert_eq!(compare(BinaryOperator::Less, 0.3, 0.1 + 0.2), "true");
        assert_eq!(compare(BinaryOperator::GreaterEqual, 0.3, 0.1 + 0.2), "false");
        assert_eq!(compare(BinaryOperator::LessEqual, 2.0, 2.0), "true");
    }

    #[test]
    fn nan_is_unordered() {
        for op in [BinaryOperator::Less,
                   BinaryOperator::LessEqual,
                   BinaryOperator::Greater,
                   BinaryOperator::GreaterEqual]
        {
            assert_eq!(compare(op, f64::NAN, 1.0), "false", "NaN {op} 1");
            assert_eq!(compare(op, 1.0, f64::NAN), "false", "1 {op} NaN");
            assert_eq!(compare(op, f64::NAN, f64::NAN), "false", "NaN {op} NaN");
        }
    }

    #[test]
    fn mixed_ordering_is_not_comparable() {
        let err = Interpreter::eval_comparison(BinaryOperator::Greater, &Value::Number(1.0), &"1".into(), POS);
        assert!(matches!(err, Err(RuntimeError::NotComparable { .. })));
    }

    #[test]
    fn void_equality_is_invalid() {
        let err = Interpreter::eval_comparison(BinaryOperator::NotEqual, &Value::Void, &Value::Null, POS);
        assert!(matches!(err, Err(RuntimeError::InvalidOperation { .. })));
    }

    #[test]
    fn membership_uses_structural_equality() {
        let haystack = Value::list(vec![Value::list(vec![1.0.into()]), "x".into()]);
        let found = Interpreter::eval_membership(&Value::list(vec![1.0.into()]), &haystack, POS).unwrap();
        assert_eq!(found.to_string(), "true");
        let missing = Interpreter::eval_membership(&"y".into(), &haystack, POS).unwrap();
        assert_eq!(missing.to_string(), "false");
        assert!(Interpreter::eval_membership(&"y".into(), &"xyz".into(), POS).is_err());
    }
}
