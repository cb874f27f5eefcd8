use crate::{
    ast::{Block, Expr, LiteralValue, Position, Statement},
    error::RuntimeError,
    interpreter::{
        environment::Environment, evaluator::utils::unescape_string, io::IoHandler,
        registry::FunctionRegistry, value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Outcome of executing a statement or block.
///
/// A block with a trailing `return` produces `Return`, which every enclosing
/// construct hands upward unchanged until a function call (or the program
/// driver) turns it back into a value.
#[derive(Debug, Clone)]
pub enum Flow {
    /// Execution finished normally.
    Completed(Value),
    /// A `return` is unwinding to the nearest function call.
    Return(Value),
}

impl Flow {
    /// The value carried by a `Return`, or `Void` for normal completion.
    #[must_use]
    pub fn into_returned(self) -> Value {
        match self {
            Self::Completed(_) => Value::Void,
            Self::Return(value) => value,
        }
    }

    /// Returns `true` for a `Return` signal.
    #[must_use]
    pub const fn is_return(&self) -> bool {
        matches!(self, Self::Return(_))
    }
}

/// Stores the runtime evaluation state.
///
/// An `Interpreter` owns the global frame and the function registry of one
/// program run. The current scope is never stored here: every evaluation
/// method receives the `Environment` to work in.
///
/// ## Usage
///
/// Collect the program's functions, create the interpreter with an
/// [`IoHandler`], then call [`Interpreter::run`].
///
/// ```
/// use mava::{
///     interpreter::{evaluator::core::Interpreter, io::IoHandler, registry::collect_functions},
///     parse_program,
/// };
///
/// let program = parse_program("def twice(x) { return x * 2 } println(twice(21))").unwrap();
/// let functions = collect_functions(&program).unwrap();
///
/// let mut io = IoHandler::buffer();
/// Interpreter::new(functions, &mut io).run(&program).unwrap();
///
/// assert_eq!(io.output(), "42\n");
/// ```
pub struct Interpreter<'io> {
    /// The root frame. Function bodies run in children of this frame.
    pub globals:   Environment,
    /// Every function declared in the program, keyed by name and arity.
    pub functions: FunctionRegistry,
    /// Destination of `print`/`println` and source of `input()`.
    pub io:        &'io mut IoHandler,
}

impl<'io> Interpreter<'io> {
    /// Creates an interpreter with an empty global frame.
    #[must_use]
    pub fn new(functions: FunctionRegistry, io: &'io mut IoHandler) -> Self {
        Self { globals: Environment::global(),
               functions,
               io }
    }

    /// Runs a whole program.
    ///
    /// Top-level statements execute directly in the global frame, so the
    /// variables they assign are globals visible inside function bodies.
    ///
    /// # Returns
    /// The value of a top-level `return`, or `Void` if there is none.
    pub fn run(&mut self, program: &Block) -> EvalResult<Value> {
        let globals = self.globals.clone();
        let flow = self.exec_statements(program, &globals)?;
        Ok(flow.into_returned())
    }

    /// Evaluates a block in a fresh child frame of `env`.
    ///
    /// # Returns
    /// `Flow::Return` if the block (or anything nested in it) returned,
    /// otherwise `Flow::Completed(Void)`.
    pub fn eval_block(&mut self, block: &Block, env: &Environment) -> EvalResult<Flow> {
        let scope = env.child();
        self.exec_statements(block, &scope)
    }

    /// Executes the statements of `block` and its `return` in `env` itself.
    pub(crate) fn exec_statements(&mut self, block: &Block, env: &Environment) -> EvalResult<Flow> {
        for statement in &block.statements {
            let flow = self.exec_statement(statement, env)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }

        match &block.result {
            Some(expr) => {
                let value = self.eval_expr(expr, env)?;
                tracing::trace!(line = block.pos.line, "return signal raised");
                Ok(Flow::Return(value))
            },
            None => Ok(Flow::Completed(Value::Void)),
        }
    }

    /// Executes a single statement.
    ///
    /// Function declarations were registered before the run started and do
    /// nothing here.
    pub fn exec_statement(&mut self, statement: &Statement, env: &Environment) -> EvalResult<Flow> {
        match statement {
            Statement::FunctionDecl(_) => Ok(Flow::Completed(Value::Void)),
            Statement::Assignment { name,
                                    indexes,
                                    value,
                                    pos, } => {
                let value = self.eval_expr(value, env)?;
                if indexes.is_empty() {
                    env.assign(name, value);
                } else {
                    self.assign_at_indexes(name, indexes, value, *pos, env)?;
                }
                Ok(Flow::Completed(Value::Void))
            },
            Statement::Expression { expr, .. } => Ok(Flow::Completed(self.eval_expr(expr, env)?)),
            Statement::If { branches,
                            else_block,
                            pos, } => self.exec_if(branches, else_block.as_ref(), *pos, env),
            Statement::For { var,
                             start,
                             stop,
                             body,
                             pos, } => self.exec_for(var, start, stop, body, *pos, env),
            Statement::While { condition,
                               body,
                               pos, } => self.exec_while(condition, body, *pos, env),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Operands of unary and binary operators are always evaluated, left to
    /// right, before the operator is applied; `&&` and `||` do not
    /// short-circuit. Only the ternary operator skips a subexpression.
    pub fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Self::eval_literal(value)),
            Expr::ListLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval_expr(element, env))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::list(values))
            },
            Expr::Identifier { name, pos } => {
                env.resolve(name)
                   .ok_or_else(|| RuntimeError::UnboundIdentifier { name: name.clone(),
                                                                    pos:  *pos, })
            },
            Expr::UnaryOp { op, expr, pos } => {
                let value = self.eval_expr(expr, env)?;
                Self::eval_unary(*op, &value, *pos)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             pos, } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                Self::eval_binary(*op, &left, &right, *pos)
            },
            Expr::Ternary { condition,
                            then_branch,
                            else_branch,
                            pos, } => {
                if self.eval_condition(condition, *pos, env)? {
                    self.eval_expr(then_branch, env)
                } else {
                    self.eval_expr(else_branch, env)
                }
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 pos, } => self.call_function(name, arguments, *pos, env),
            Expr::BuiltinCall { builtin,
                                arguments,
                                pos, } => self.call_builtin(*builtin, arguments, *pos, env),
            Expr::Assert { condition,
                           source,
                           pos, } => self.eval_assert(condition, source, *pos, env),
            Expr::Index { target,
                          indexes,
                          .. } => {
                let target = self.eval_expr(target, env)?;
                self.read_at_indexes(target, indexes, env)
            },
        }
    }

    fn eval_literal(value: &LiteralValue) -> Value {
        match value {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::Null => Value::Null,
            LiteralValue::String(raw) => Value::String(unescape_string(raw)),
        }
    }

    /// Evaluates a condition that must produce a boolean.
    pub(crate) fn eval_condition(&mut self,
                                 condition: &Expr,
                                 pos: Position,
                                 env: &Environment)
                                 -> EvalResult<bool> {
        let value = self.eval_expr(condition, env)?;
        value.as_bool()
             .ok_or_else(|| RuntimeError::type_mismatch(format!("condition must be a boolean, found {} `{value}`",
                                                                value.type_name()),
                                                        pos))
    }
}
