use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::describe},
        io::IoHandler,
        value::core::Value,
    },
};

/// `input()` or `input(path)`.
///
/// Without arguments, reads one line from the input stream; once the
/// stream is exhausted the result is `null`. With a path, reads the whole
/// file as a string.
///
/// # Errors
/// - `TypeMismatch` if the path is not a string.
/// - `Io` if reading fails.
pub fn input(io: &mut IoHandler, args: &[Value], pos: Position) -> EvalResult<Value> {
    let Some(path) = args.first() else {
        let line = io.read_line()
                     .map_err(|source| RuntimeError::Io { source, pos })?;
        return Ok(line.map_or(Value::Null, Value::String));
    };

    let Value::String(path) = path else {
        return Err(RuntimeError::type_mismatch(format!("input() expects a file path string, found {}",
                                                       describe(path)),
                                               pos));
    };

    tracing::debug!(path = %path, "reading input file");
    io.read_file(path)
      .map(Value::String)
      .map_err(|source| RuntimeError::Io { source, pos })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_then_null() {
        let mut io = IoHandler::buffer_with_input(["one"]);
        let pos = Position::default();
        assert_eq!(input(&mut io, &[], pos).unwrap().to_string(), "one");
        assert!(matches!(input(&mut io, &[], pos).unwrap(), Value::Null));
    }

    #[test]
    fn bad_path_argument() {
        let mut io = IoHandler::buffer();
        let pos = Position::new(3, 1);
        assert!(matches!(input(&mut io, &[Value::Number(1.0)], pos),
                         Err(RuntimeError::TypeMismatch { .. })));
        assert!(matches!(input(&mut io, &["/no/such/file".into()], pos),
                         Err(RuntimeError::Io { .. })));
    }
}
