use std::{
    cell::{Ref, RefCell},
    cmp::Ordering,
    rc::Rc,
};

use crate::{
    ast::Position, error::RuntimeError, interpreter::evaluator::core::EvalResult,
    util::stack::ensure_sufficient_stack,
};

/// Absolute tolerance under which two numbers compare equal.
pub const EQUALITY_TOLERANCE: f64 = 1e-11;

/// A list shared by reference.
///
/// Assigning a list to another variable, passing it to a function or reading
/// it out of another list never copies it: every holder sees mutations made
/// through any other holder.
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// Represents a runtime value in the interpreter.
///
/// This closed enum models every datum a program can produce. `Null` is the
/// value of the `null` literal; `Void` is what statements and value-less
/// built-ins like `println` produce, and may not take part in equality.
#[derive(Clone)]
pub enum Value {
    /// The `null` sentinel.
    Null,
    /// The "no value produced" sentinel.
    Void,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string of characters.
    String(String),
    /// An ordered, mutable, shared sequence of values.
    List(ListRef),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::list(v)
    }
}

/// Returns `true` if two numbers are equal within [`EQUALITY_TOLERANCE`].
///
/// Identical infinities are equal; `NaN` equals nothing.
#[must_use]
pub fn numbers_equal(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < EQUALITY_TOLERANCE
}

/// Formats a number the way the language prints it.
///
/// Integral values print without a fractional part (`3`, not `3.0`), and
/// the IEEE specials print as `Infinity`, `-Infinity` and `NaN`.
///
/// ## Example
/// ```
/// use mava::interpreter::value::core::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(5.0 / 0.0), "Infinity");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        n.to_string()
    }
}

impl Value {
    /// Wraps elements into a fresh shared list.
    #[must_use]
    pub fn list(elements: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(elements)))
    }

    /// The name of the value's variant, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Void => "void",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }

    /// Returns the number, if this is a `Number`.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the shared list handle, if this is a `List`.
    #[must_use]
    pub const fn as_list(&self) -> Option<&ListRef> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns `true` for the `Void` sentinel.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Returns `true` if the value is a vector.
    ///
    /// A vector is a non-empty list whose first element is not a list. Only
    /// the first element is inspected, so `[1, [2]]` also counts as a vector;
    /// the linear-algebra adapter rejects its non-numeric element later.
    ///
    /// ## Example
    /// ```
    /// use mava::interpreter::value::core::Value;
    ///
    /// assert!(Value::from(vec![1.0.into(), 2.0.into()]).is_vector());
    /// assert!(!Value::list(vec![]).is_vector());
    /// ```
    #[must_use]
    pub fn is_vector(&self) -> bool {
        self.first_element_is_list() == Some(false)
    }

    /// Returns `true` if the value is a matrix: a non-empty list whose first
    /// element is itself a list.
    #[must_use]
    pub fn is_matrix(&self) -> bool {
        self.first_element_is_list() == Some(true)
    }

    fn first_element_is_list(&self) -> Option<bool> {
        let list = self.as_list()?;
        let list = list.borrow();
        list.first().map(|first| matches!(first, Self::List(_)))
    }

    /// Borrows the elements of a list value.
    #[must_use]
    pub fn borrow_elements(&self) -> Option<Ref<'_, Vec<Self>>> {
        self.as_list().map(|list| list.borrow())
    }

    /// Compares two values for equality.
    ///
    /// Numbers are equal within [`EQUALITY_TOLERANCE`]. Lists compare
    /// element by element with the same rule; two handles to the same list
    /// are always equal. Values of different variants are unequal.
    ///
    /// ## Errors
    /// Returns `InvalidOperation` if either side is (or, for lists, contains
    /// at a compared position) the `Void` sentinel.
    ///
    /// ## Example
    /// ```
    /// use mava::{ast::Position, interpreter::value::core::Value};
    ///
    /// let pos = Position::default();
    /// let a = Value::Number(0.1 + 0.2);
    /// assert!(a.try_eq(&Value::Number(0.3), pos).unwrap());
    /// assert!(Value::Void.try_eq(&Value::Void, pos).is_err());
    /// ```
    pub fn try_eq(&self, other: &Self, pos: Position) -> EvalResult<bool> {
        self.try_eq_tracked(other, pos, &mut Vec::new())
    }

    /// Equality over possibly cyclic lists. A pair of lists already being
    /// compared further up is assumed equal, so cycles terminate.
    fn try_eq_tracked(&self,
                      other: &Self,
                      pos: Position,
                      open: &mut Vec<(*const RefCell<Vec<Self>>, *const RefCell<Vec<Self>>)>)
                      -> EvalResult<bool> {
        match (self, other) {
            (Self::Void, _) | (_, Self::Void) => {
                Err(RuntimeError::InvalidOperation { details: format!("can't use VOID: {self} ==/!= {other}"),
                                                     pos })
            },
            (Self::Null, Self::Null) => Ok(true),
            (Self::Bool(a), Self::Bool(b)) => Ok(a == b),
            (Self::Number(a), Self::Number(b)) => Ok(numbers_equal(*a, *b)),
            (Self::String(a), Self::String(b)) => Ok(a == b),
            (Self::List(a), Self::List(b)) => {
                let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
                if Rc::ptr_eq(a, b) || open.contains(&pair) {
                    return Ok(true);
                }
                let (a, b) = (a.borrow(), b.borrow());
                if a.len() != b.len() {
                    return Ok(false);
                }

                open.push(pair);
                let mut equal = true;
                for (x, y) in a.iter().zip(b.iter()) {
                    if !ensure_sufficient_stack(|| x.try_eq_tracked(y, pos, open))? {
                        equal = false;
                        break;
                    }
                }
                open.pop();
                Ok(equal)
            },
            _ => Ok(false),
        }
    }

    /// Writes `self`, printing `(this Collection)` where a list contains
    /// itself.
    fn fmt_tracked(&self,
                   f: &mut std::fmt::Formatter<'_>,
                   open: &mut Vec<*const RefCell<Vec<Self>>>)
                   -> std::fmt::Result {
        let Self::List(list) = self else {
            return write!(f, "{self}");
        };

        let ptr = Rc::as_ptr(list);
        if open.contains(&ptr) {
            return write!(f, "(this Collection)");
        }

        open.push(ptr);
        write!(f, "[")?;
        for (index, value) in list.borrow().iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            ensure_sufficient_stack(|| value.fmt_tracked(f, open))?;
        }
        open.pop();

        write!(f, "]")
    }

    /// Orders two numbers or two strings.
    ///
    /// Numbers use plain IEEE ordering, without the equality tolerance;
    /// `NaN` is unordered against everything, itself included, and yields
    /// `None`. Strings compare lexicographically.
    ///
    /// ## Errors
    /// Returns `NotComparable` for any other pairing.
    pub fn compare(&self, other: &Self, pos: Position) -> EvalResult<Option<Ordering>> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Ok(a.partial_cmp(b)),
            (Self::String(a), Self::String(b)) => Ok(Some(a.cmp(b))),
            _ => Err(RuntimeError::NotComparable { left: self.to_string(),
                                                   right: other.to_string(),
                                                   pos }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Void => write!(f, "VOID"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::List(_) => self.fmt_tracked(f, &mut Vec::new()),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Void => write!(f, "Void"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Number(n) => write!(f, "Number({n:?})"),
            Self::String(s) => write!(f, "String({s:?})"),
            Self::List(_) => write!(f, "List({self})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Value {
        Value::list(values.iter().copied().map(Value::Number).collect())
    }

    #[test]
    fn display_matches_language_output() {
        let nested = Value::list(vec![numbers(&[1.0, 2.5]), "hi".into(), Value::Null]);
        assert_eq!(nested.to_string(), "[[1, 2.5], hi, NULL]");
        assert_eq!(Value::Void.to_string(), "VOID");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn lists_compare_structurally_with_tolerance() {
        let pos = Position::default();
        let a = numbers(&[1.0, 2.0]);
        let b = numbers(&[1.0 + 1e-12, 2.0]);
        assert!(a.try_eq(&b, pos).unwrap());
        assert!(!a.try_eq(&numbers(&[1.0]), pos).unwrap());
        assert!(!a.try_eq(&Value::Number(1.0), pos).unwrap());
    }

    #[test]
    fn void_inside_compared_list_is_rejected() {
        let pos = Position::default();
        let a = Value::list(vec![Value::Void]);
        let b = Value::list(vec![Value::Void]);
        assert!(matches!(a.try_eq(&b, pos), Err(RuntimeError::InvalidOperation { .. })));
    }

    #[test]
    fn shape_classification_inspects_first_element_only() {
        assert!(numbers(&[1.0]).is_vector());
        assert!(Value::list(vec![numbers(&[1.0])]).is_matrix());
        assert!(Value::list(vec![1.0.into(), numbers(&[2.0])]).is_vector());
        assert!(!Value::list(vec![]).is_vector());
        assert!(!Value::list(vec![]).is_matrix());
        assert!(!Value::from("abc").is_vector());
    }

    #[test]
    fn ordering_is_only_defined_for_numbers_and_strings() {
        let pos = Position::default();
        assert_eq!(Value::from("abc").compare(&"abd".into(), pos).unwrap(),
                   Some(Ordering::Less));
        assert_eq!(Value::Number(1.0).compare(&Value::Number(1.0 + 1e-13), pos)
                                     .unwrap(),
                   Some(Ordering::Less));
        assert_eq!(Value::Number(f64::NAN).compare(&Value::Number(f64::NAN), pos)
                                          .unwrap(),
                   None);
        assert!(matches!(Value::Bool(true).compare(&Value::Number(1.0), pos),
                         Err(RuntimeError::NotComparable { .. })));
    }

    #[test]
    fn self_referencing_lists_terminate() {
        let a = numbers(&[1.0]);
        let b = numbers(&[1.0]);
        for list in [&a, &b] {
            list.as_list().unwrap().borrow_mut()[0] = list.clone();
        }
        assert_eq!(a.to_string(), "[(this Collection)]");
        assert!(a.try_eq(&b, Position::default()).unwrap());

        let nested = Value::list(vec![a.clone(), 2.0.into()]);
        assert_eq!(nested.to_string(), "[[(this Collection)], 2]");
    }

    #[test]
    fn cloned_lists_share_storage() {
        let a = numbers(&[1.0, 2.0]);
        let b = a.clone();
        if let Value::List(list) = &a {
            list.borrow_mut()[0] = Value::Number(99.0);
        }
        assert_eq!(b.to_string(), "[99, 2]");
    }
}
