use crate::{
    ast::{BinaryOperator, Position},
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::operand_mismatch,
        },
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates `&&` or `||` on two booleans.
    ///
    /// Both operands have already been evaluated by the time this runs, so a
    /// side effect in the right operand happens even when the left operand
    /// decides the result.
    ///
    /// # Example
    /// ```
    /// use mava::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let r = Interpreter::eval_logic(BinaryOperator::Or,
    ///                                 &Value::Bool(false),
    ///                                 &Value::Bool(true),
    ///                                 Position::default());
    /// assert_eq!(r.unwrap().to_string(), "true");
    /// ```
    pub fn eval_logic(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      pos: Position)
                      -> EvalResult<Value> {
        match (op, left, right) {
            (BinaryOperator::And, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
            (BinaryOperator::Or, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
            _ => Err(operand_mismatch(op, left, right, pos)),
        }
    }
}
