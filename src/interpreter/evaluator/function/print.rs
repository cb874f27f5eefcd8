use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, io::IoHandler, value::core::Value},
};

/// Writes a value without a trailing newline.
///
/// # Example
/// ```
/// use mava::{
///     ast::Position,
///     interpreter::{evaluator::function::print::print, io::IoHandler, value::core::Value},
/// };
///
/// let mut io = IoHandler::buffer();
/// let result = print(&mut io, &[Value::Number(42.0)], Position::default()).unwrap();
///
/// assert!(result.is_void());
/// assert_eq!(io.output(), "42");
/// ```
pub fn print(io: &mut IoHandler, args: &[Value], pos: Position) -> EvalResult<Value> {
    io.print(&args[0].to_string())
      .map_err(|source| RuntimeError::Io { source, pos })?;
    Ok(Value::Void)
}

/// Writes a value followed by a newline, or just a newline when called
/// without arguments.
pub fn println(io: &mut IoHandler, args: &[Value], pos: Position) -> EvalResult<Value> {
    let text = args.first().map(ToString::to_string).unwrap_or_default();
    io.println(&text)
      .map_err(|source| RuntimeError::Io { source, pos })?;
    Ok(Value::Void)
}
