use crate::{
    ast::{Block, ConditionalBranch, Expr, Position},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            utils::describe,
        },
        value::core::Value,
    },
    util::num::{i64_to_f64, truncate_to_i64},
};

impl Interpreter<'_> {
    /// Executes an `if` / `else if` / `else` chain.
    ///
    /// Conditions are evaluated in order until one is `true`; only that
    /// branch runs. Every evaluated condition must be a boolean.
    ///
    /// # Returns
    /// The outcome of the chosen block, or `Completed(Void)` if no branch
    /// was taken.
    pub fn exec_if(&mut self,
                   branches: &[ConditionalBranch],
                   else_block: Option<&Block>,
                   pos: Position,
                   env: &Environment)
                   -> EvalResult<Flow> {
        for branch in branches {
            if self.eval_condition(&branch.condition, pos, env)? {
                return self.eval_block(&branch.body, env);
            }
        }

        match else_block {
            Some(block) => self.eval_block(block, env),
            None => Ok(Flow::Completed(Value::Void)),
        }
    }

    /// Executes `for var = start to stop { body }`.
    ///
    /// Both bounds are evaluated once and truncated toward zero. The loop
    /// runs for every integer from `start` to `stop` inclusive, assigning the
    /// loop variable in `env` (not in the body's frame) before each
    /// iteration, so the variable outlives the loop. A `return` in the body
    /// stops the loop and propagates.
    pub fn exec_for(&mut self,
                    var: &str,
                    start: &Expr,
                    stop: &Expr,
                    body: &Block,
                    pos: Position,
                    env: &Environment)
                    -> EvalResult<Flow> {
        let start = self.eval_bound(start, pos, env)?;
        let stop = self.eval_bound(stop, pos, env)?;

        for i in start..=stop {
            env.assign(var, Value::Number(i64_to_f64(i)));
            tracing::trace!(var, i, "for iteration");

            let flow = self.eval_block(body, env)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }

        Ok(Flow::Completed(Value::Void))
    }

    fn eval_bound(&mut self, bound: &Expr, pos: Position, env: &Environment) -> EvalResult<i64> {
        match self.eval_expr(bound, env)? {
            Value::Number(n) => truncate_to_i64(n, pos),
            other => Err(RuntimeError::type_mismatch(format!("loop bounds must be numbers, found {}",
                                                             describe(&other)),
                                                     pos)),
        }
    }

    /// Executes `while condition { body }`.
    ///
    /// The condition is re-evaluated before every iteration and must be a
    /// boolean. A `return` in the body stops the loop and propagates.
    pub fn exec_while(&mut self,
                      condition: &Expr,
                      body: &Block,
                      pos: Position,
                      env: &Environment)
                      -> EvalResult<Flow> {
        while self.eval_condition(condition, pos, env)? {
            let flow = self.eval_block(body, env)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }

        Ok(Flow::Completed(Value::Void))
    }
}
