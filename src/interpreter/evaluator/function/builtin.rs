use crate::{
    ast::{Expr, Position},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::describe,
        },
        io::IoHandler,
        value::core::Value,
    },
    util::num::usize_to_f64,
};

/// `size(x)`: the number of characters of a string or elements of a list.
///
/// # Example
/// ```
/// use mava::{
///     ast::Position,
///     interpreter::{evaluator::function::builtin::size, io::IoHandler, value::core::Value},
/// };
///
/// let n = size(&mut IoHandler::buffer(), &["hello".into()], Position::default()).unwrap();
/// assert_eq!(n.to_string(), "5");
/// ```
pub fn size(_io: &mut IoHandler, args: &[Value], pos: Position) -> EvalResult<Value> {
    match &args[0] {
        Value::String(s) => Ok(Value::Number(usize_to_f64(s.chars().count()))),
        Value::List(list) => Ok(Value::Number(usize_to_f64(list.borrow().len()))),
        other => Err(RuntimeError::type_mismatch(format!("size() expects a string or list, found {}",
                                                         describe(other)),
                                                 pos)),
    }
}

impl Interpreter<'_> {
    /// Evaluates `assert(condition)`.
    ///
    /// # Errors
    /// - `TypeMismatch` if the condition is not a boolean.
    /// - `AssertionFailed`, carrying the condition's source text, if it is
    ///   `false`.
    pub(crate) fn eval_assert(&mut self,
                              condition: &Expr,
                              source: &str,
                              pos: Position,
                              env: &Environment)
                              -> EvalResult<Value> {
        if self.eval_condition(condition, pos, env)? {
            Ok(Value::Void)
        } else {
            tracing::debug!(line = pos.line, expression = source, "assertion failed");
            Err(RuntimeError::AssertionFailed { expression: source.to_string(),
                                                pos })
        }
    }
}
