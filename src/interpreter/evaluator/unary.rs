use crate::{
    ast::{Position, UnaryOperator},
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
    /// Evaluates a unary operation on a value.
    ///
    /// - `Negate` requires a number.
    /// - `Not` requires a boolean.
    ///
    /// # Example
    /// ```
    /// use mava::{
    ///     ast::{Position, UnaryOperator},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Number(5.0), Position::default());
    /// assert_eq!(v.unwrap().to_string(), "-5");
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Not, &Value::Number(5.0), Position::default());
    /// assert!(v.is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, pos: Position) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            _ => Err(RuntimeError::type_mismatch(format!("cannot apply unary `{op}` to {}",
                                                         describe(value)),
                                                 pos)),
        }
    }
}
