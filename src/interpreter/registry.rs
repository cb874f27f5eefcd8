use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Block, Builtin, FunctionDecl, Statement},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Maps `(name, arity)` to a user-defined function.
///
/// Functions live in a single global namespace regardless of where in the
/// program they are declared. Two functions may share a name as long as
/// their arities differ.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: HashMap<(String, usize), Rc<FunctionDecl>>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration.
    ///
    /// # Errors
    /// - `BuiltinFunctionRedefinition` if the name belongs to a built-in.
    /// - `FunctionAlreadyDefined` if the `(name, arity)` pair is taken.
    pub fn register(&mut self, decl: Rc<FunctionDecl>) -> EvalResult<()> {
        if Builtin::is_reserved(&decl.name) {
            return Err(RuntimeError::BuiltinFunctionRedefinition { name: decl.name.clone(),
                                                                   pos:  decl.pos, });
        }

        let key = (decl.name.clone(), decl.arity());
        if self.functions.contains_key(&key) {
            return Err(RuntimeError::FunctionAlreadyDefined { name:  decl.name.clone(),
                                                              arity: decl.arity(),
                                                              pos:   decl.pos, });
        }

        tracing::debug!(name = %decl.name, arity = decl.arity(), line = decl.pos.line, "registered function");
        self.functions.insert(key, decl);
        Ok(())
    }

    /// Finds the function declared with `name` and exactly `arity` parameters.
    #[must_use]
    pub fn lookup(&self, name: &str, arity: usize) -> Option<Rc<FunctionDecl>> {
        self.functions.get(&(name.to_string(), arity)).cloned()
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Collects every function declaration in `program` into a new registry.
///
/// Declarations nested inside `if`, `for`, `while` and function bodies are
/// registered too, so any function can be called from anywhere in the
/// program, including before its declaration.
///
/// # Errors
/// Propagates the registration errors of [`FunctionRegistry::register`].
pub fn collect_functions(program: &Block) -> EvalResult<FunctionRegistry> {
    let mut registry = FunctionRegistry::new();
    collect_block(program, &mut registry)?;
    Ok(registry)
}

fn collect_block(block: &Block, registry: &mut FunctionRegistry) -> EvalResult<()> {
    for statement in &block.statements {
        match statement {
            Statement::FunctionDecl(decl) => {
                registry.register(Rc::clone(decl))?;
                collect_block(&decl.body, registry)?;
            },
            Statement::If { branches,
                            else_block,
                            .. } => {
                for branch in branches {
                    collect_block(&branch.body, registry)?;
                }
                if let Some(block) = else_block {
                    collect_block(block, registry)?;
                }
            },
            Statement::For { body, .. } | Statement::While { body, .. } => {
                collect_block(body, registry)?;
            },
            Statement::Assignment { .. } | Statement::Expression { .. } => {},
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Position;

    fn decl(name: &str, params: &[&str], line: usize) -> Rc<FunctionDecl> {
        Rc::new(FunctionDecl { name:   name.to_string(),
                               params: params.iter().map(ToString::to_string).collect(),
                               body:   Block { statements: Vec::new(),
                                               result:     None,
                                               pos:        Position::new(line, 1), },
                               pos:    Position::new(line, 1), })
    }

    fn program(statements: Vec<Statement>) -> Block {
        Block { statements,
                result: None,
                pos: Position::new(1, 1) }
    }

    #[test]
    fn overloads_by_arity_coexist() {
        let registry = collect_functions(&program(vec![Statement::FunctionDecl(decl("f", &["a"], 1)),
                                                       Statement::FunctionDecl(decl("f", &["a", "b"], 2))])).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("f", 2).unwrap().pos.line, 2);
        assert!(registry.lookup("f", 0).is_none());
    }

    #[test]
    fn duplicate_name_and_arity_is_rejected() {
        let err = collect_functions(&program(vec![Statement::FunctionDecl(decl("f", &["a"], 1)),
                                                  Statement::FunctionDecl(decl("f", &["b"], 4))])).unwrap_err();

        assert!(matches!(err, RuntimeError::FunctionAlreadyDefined { arity: 1, pos, .. } if pos.line == 4));
    }

    #[test]
    fn builtin_names_are_reserved() {
        let err = collect_functions(&program(vec![Statement::FunctionDecl(decl("size", &["x"], 1))])).unwrap_err();
        assert!(matches!(err, RuntimeError::BuiltinFunctionRedefinition { .. }));

        let err = collect_functions(&program(vec![Statement::FunctionDecl(decl("assert", &[], 1))])).unwrap_err();
        assert!(matches!(err, RuntimeError::BuiltinFunctionRedefinition { .. }));
    }

    #[test]
    fn nested_declarations_are_registered() {
        let mut outer = (*decl("outer", &[], 1)).clone();
        outer.body.statements.push(Statement::FunctionDecl(decl("inner", &["x"], 2)));

        let registry = collect_functions(&program(vec![Statement::FunctionDecl(Rc::new(outer))])).unwrap();
        assert!(registry.lookup("inner", 1).is_some());
    }
}
