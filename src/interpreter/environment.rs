use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

#[derive(Debug, Default)]
struct Frame {
    variables: HashMap<String, Value>,
    parent:    Option<Environment>,
}

/// A chain of variable frames.
///
/// Cloning an `Environment` yields another handle to the same innermost
/// frame. Each frame links to its parent, and lookups walk outward until the
/// global frame (which has no parent).
///
/// ## Example
/// ```
/// use mava::interpreter::{environment::Environment, value::core::Value};
///
/// let globals = Environment::global();
/// globals.assign("x", Value::Number(1.0));
///
/// let inner = globals.child();
/// inner.assign("x", Value::Number(2.0));
/// inner.assign("y", Value::Number(3.0));
///
/// assert_eq!(globals.resolve("x").unwrap().to_string(), "2");
/// assert!(globals.resolve("y").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

impl Environment {
    /// Creates the root frame.
    #[must_use]
    pub fn global() -> Self {
        Self::default()
    }

    /// Opens a new empty frame whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self { frame: Rc::new(RefCell::new(Frame { variables: HashMap::new(),
                                                   parent:    Some(self.clone()), })), }
    }

    /// Looks a name up in this frame, then in each ancestor in turn.
    ///
    /// # Returns
    /// The value bound in the nearest frame that has `name`, or `None`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();

        loop {
            let next = {
                let frame = current.frame.borrow();
                if let Some(value) = frame.variables.get(name) {
                    return Some(value.clone());
                }
                frame.parent.clone()?
            };
            current = next;
        }
    }

    /// Binds `name` to `value`.
    ///
    /// If some frame in the chain already binds `name`, the nearest such
    /// binding is updated. Otherwise a new binding is created in this frame.
    pub fn assign(&self, name: &str, value: Value) {
        let mut current = self.clone();

        loop {
            let next = {
                let mut frame = current.frame.borrow_mut();
                if let Some(slot) = frame.variables.get_mut(name) {
                    *slot = value;
                    return;
                }
                frame.parent.clone()
            };

            match next {
                Some(parent) => current = parent,
                None => break,
            }
        }

        self.define(name, value);
    }

    /// Binds `name` in this frame only, shadowing any outer binding.
    pub fn define(&self, name: &str, value: Value) {
        self.frame.borrow_mut().variables.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_creates_in_innermost_frame_when_unbound() {
        let globals = Environment::global();
        let inner = globals.child().child();
        inner.assign("a", Value::Number(1.0));

        assert!(globals.resolve("a").is_none());
        assert_eq!(inner.resolve("a").unwrap().to_string(), "1");
    }

    #[test]
    fn assign_updates_nearest_existing_binding() {
        let globals = Environment::global();
        let middle = globals.child();
        let inner = middle.child();

        globals.define("a", Value::Number(1.0));
        middle.define("a", Value::Number(2.0));
        inner.assign("a", Value::Number(3.0));

        assert_eq!(globals.resolve("a").unwrap().to_string(), "1");
        assert_eq!(middle.resolve("a").unwrap().to_string(), "3");
    }

    #[test]
    fn define_shadows_outer_binding() {
        let globals = Environment::global();
        globals.define("n", Value::Number(1.0));

        let call = globals.child();
        call.define("n", Value::Number(5.0));

        assert_eq!(call.resolve("n").unwrap().to_string(), "5");
        assert_eq!(globals.resolve("n").unwrap().to_string(), "1");
    }

    #[test]
    fn unbound_name_resolves_to_none() {
        assert!(Environment::global().child().resolve("missing").is_none());
    }
}
