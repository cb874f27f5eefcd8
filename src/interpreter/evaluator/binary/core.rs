use crate::{
    ast::{BinaryOperator, Position},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a binary operation between two already evaluated values.
    ///
    /// Arithmetic operators go to `eval_arith`, relational and equality
    /// operators to `eval_comparison`, `in` to `eval_membership`, and the
    /// logical operators to `eval_logic`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `pos`: Position for error reporting.
    ///
    /// # Example
    /// ```
    /// use mava::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let left = Value::from(vec![Value::Number(1.0), Value::Number(2.0)]);
    /// let right = Value::from(vec![Value::Number(3.0), Value::Number(4.0)]);
    ///
    /// let sum = Interpreter::eval_binary(BinaryOperator::Add, &left, &right, Position::default());
    /// assert_eq!(sum.unwrap().to_string(), "[4, 6]");
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       pos: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, In, Less, LessEqual, Mod, Mul, NotEqual,
            Or, Pow, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod | Pow => Self::eval_arith(op, left, right, pos),
            Less | LessEqual | Greater | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, pos)
            },
            In => Self::eval_membership(left, right, pos),
            And | Or => Self::eval_logic(op, left, right, pos),
        }
    }
}
