use crate::{
    ast::{Expr, Position},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::describe,
        },
        value::core::{ListRef, Value},
    },
    util::num::resolve_index,
};

impl Interpreter<'_> {
    /// Applies trailing indexes to `target`, left to right.
    ///
    /// Indexing a list yields the element itself, so a nested list read this
    /// way is still shared with its parent. Indexing a string yields a
    /// one-character string.
    pub(crate) fn read_at_indexes(&mut self,
                                  target: Value,
                                  indexes: &[Expr],
                                  env: &Environment)
                                  -> EvalResult<Value> {
        let mut current = target;

        for index_expr in indexes {
            let pos = index_expr.position();
            let index = self.eval_index(index_expr, env)?;

            current = match &current {
                Value::List(list) => {
                    let elements = list.borrow();
                    let at = resolve_index(index, elements.len(), pos)?;
                    elements[at].clone()
                },
                Value::String(s) => {
                    let at = resolve_index(index, s.chars().count(), pos)?;
                    Value::String(s.chars().skip(at).take(1).collect())
                },
                other => {
                    return Err(RuntimeError::type_mismatch(format!("only lists and strings can be indexed, found {}",
                                                                   describe(other)),
                                                           pos));
                },
            };
        }

        Ok(current)
    }

    /// Executes `name[i]...[k] = value`.
    ///
    /// All but the last index walk into the structure without copying; the
    /// list reached is then updated in place at the last index. Every other
    /// holder of that list sees the change.
    pub(crate) fn assign_at_indexes(&mut self,
                                    name: &str,
                                    indexes: &[Expr],
                                    value: Value,
                                    pos: Position,
                                    env: &Environment)
                                    -> EvalResult<()> {
        let root = env.resolve(name)
                      .ok_or_else(|| RuntimeError::UnboundIdentifier { name: name.to_string(),
                                                                       pos })?;

        let Some((last, path)) = indexes.split_last() else {
            env.assign(name, value);
            return Ok(());
        };

        let mut list = Self::expect_list(&root, pos)?;
        for index_expr in path {
            let index = self.eval_index(index_expr, env)?;
            let next = {
                let elements = list.borrow();
                let at = resolve_index(index, elements.len(), index_expr.position())?;
                elements[at].clone()
            };
            list = Self::expect_list(&next, index_expr.position())?;
        }

        let index = self.eval_index(last, env)?;
        let mut elements = list.borrow_mut();
        let at = resolve_index(index, elements.len(), last.position())?;
        elements[at] = value;
        Ok(())
    }

    fn expect_list(value: &Value, pos: Position) -> EvalResult<ListRef> {
        value.as_list().cloned().ok_or_else(|| {
                                    RuntimeError::type_mismatch(format!("indexed assignment needs a list, found {}",
                                                                        describe(value)),
                                                                pos)
                                })
    }

    fn eval_index(&mut self, index: &Expr, env: &Environment) -> EvalResult<f64> {
        match self.eval_expr(index, env)? {
            Value::Number(n) => Ok(n),
            other => Err(RuntimeError::type_mismatch(format!("index must be a number, found {}",
                                                             describe(&other)),
                                                     index.position())),
        }
    }
}
