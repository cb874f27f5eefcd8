use crate::{
    ast::{Builtin, Expr, Position},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            function::{builtin, input, print},
        },
        io::IoHandler,
        linalg::adapter,
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the I/O handler, a slice of evaluated argument values
/// and the position of the call.
type BuiltinFn = fn(&mut IoHandler, &[Value], Position) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(counts) => counts.contains(&n),
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::OneOf(counts) => counts.iter()
                                         .map(ToString::to_string)
                                         .collect::<Vec<_>>()
                                         .join(" or "),
        }
    }
}

struct BuiltinDef {
    arity: Arity,
    func:  BuiltinFn,
}

/// Defines the builtin table.
///
/// Each entry maps a [`Builtin`] variant to its arity and implementation.
/// The macro produces `builtin_def`, an exhaustive match, so adding a
/// variant to [`Builtin`] without an entry here fails to compile.
macro_rules! builtin_functions {
    (
        $(
            $variant:ident => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        fn builtin_def(builtin: Builtin) -> BuiltinDef {
            match builtin {
                $(
                    Builtin::$variant => BuiltinDef { arity: $arity, func: $func },
                )*
            }
        }
    };
}

builtin_functions! {
    Print       => { arity: Arity::Exact(1),        func: print::print },
    Println     => { arity: Arity::OneOf(&[0, 1]),  func: print::println },
    Input       => { arity: Arity::OneOf(&[0, 1]),  func: input::input },
    Size        => { arity: Arity::Exact(1),        func: builtin::size },
    Transpose   => { arity: Arity::Exact(1),        func: |_, args, pos| adapter::transpose(&args[0], pos) },
    Rows        => { arity: Arity::Exact(1),        func: |_, args, pos| adapter::rows(&args[0], pos) },
    Columns     => { arity: Arity::Exact(1),        func: |_, args, pos| adapter::columns(&args[0], pos) },
    Determinant => { arity: Arity::Exact(1),        func: |_, args, pos| adapter::determinant(&args[0], pos) },
    MatrixSum   => { arity: Arity::Exact(1),        func: |_, args, pos| adapter::matrix_sum(&args[0], pos) },
}

impl Interpreter<'_> {
    /// Calls a user-defined function.
    ///
    /// The function is looked up by name and argument count. Arguments are
    /// evaluated in the caller's scope, left to right, and bound to the
    /// parameters in a new frame whose parent is the global frame: a
    /// function sees its parameters and the globals, never the caller's
    /// locals.
    ///
    /// # Returns
    /// The value of the body's `return`, or `Void` if it has none.
    ///
    /// # Errors
    /// `UnboundFunction` if no function with this name takes this many
    /// arguments.
    #[tracing::instrument(level = "debug", skip_all, fields(function = name, line = pos.line))]
    pub(crate) fn call_function(&mut self,
                                name: &str,
                                arguments: &[Expr],
                                pos: Position,
                                env: &Environment)
                                -> EvalResult<Value> {
        let decl = self.functions
                       .lookup(name, arguments.len())
                       .ok_or_else(|| RuntimeError::UnboundFunction { name: name.to_string(),
                                                                      arity: arguments.len(),
                                                                      pos })?;

        let frame = self.globals.child();
        for (param, argument) in decl.params.iter().zip(arguments) {
            let value = self.eval_expr(argument, env)?;
            frame.define(param, value);
        }

        let flow = ensure_sufficient_stack(|| self.exec_statements(&decl.body, &frame))?;
        let result = flow.into_returned();
        tracing::debug!(result = %result, "function returned");
        Ok(result)
    }

    /// Calls a built-in function.
    ///
    /// The argument count is checked before any argument is evaluated.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` for a wrong number of arguments, and whatever
    /// the built-in itself raises.
    pub(crate) fn call_builtin(&mut self,
                               builtin: Builtin,
                               arguments: &[Expr],
                               pos: Position,
                               env: &Environment)
                               -> EvalResult<Value> {
        let def = builtin_def(builtin);
        if !def.arity.check(arguments.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name:     builtin.name(),
                                                             expected: def.arity.describe(),
                                                             found:    arguments.len(),
                                                             pos, });
        }

        let values = arguments.iter()
                              .map(|argument| self.eval_expr(argument, env))
                              .collect::<EvalResult<Vec<_>>>()?;

        (def.func)(self.io, &values, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_descriptions() {
        assert_eq!(Arity::Exact(1).describe(), "1");
        assert_eq!(Arity::OneOf(&[0, 1]).describe(), "0 or 1");
        assert!(Arity::OneOf(&[0, 1]).check(0));
        assert!(!Arity::Exact(1).check(2));
    }

    #[test]
    fn every_builtin_has_an_entry() {
        for name in Builtin::NAMES {
            if let Some(builtin) = Builtin::from_name(name) {
                assert_eq!(builtin.name(), *name);
                let _ = builtin_def(builtin);
            }
        }
    }
}
