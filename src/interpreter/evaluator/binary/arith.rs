use crate::{
    ast::{BinaryOperator, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::operand_mismatch,
        },
        linalg::adapter,
        value::core::{ListRef, Value},
    },
    util::num::repeat_count,
};

impl Interpreter<'_> {
    /// Evaluates an arithmetic operator.
    ///
    /// The first rule matching the operand types applies:
    ///
    /// | Op | Operands | Result |
    /// |----|----------|--------|
    /// | `+` | number, number | sum |
    /// | `+` | vector, vector / matrix, matrix | entry-wise sum |
    /// | `+` | list, any | `any` appended to the same list |
    /// | `+` | string, any / any, string | concatenation |
    /// | `-` | number, number | difference |
    /// | `-` | vector, vector / matrix, matrix | entry-wise difference |
    /// | `-` | list, any | first equal element removed from the same list |
    /// | `*` | number, number | product |
    /// | `*` | string, number / list, number | repetition |
    /// | `*` | vector, vector | entry-wise product |
    /// | `*` | vector or matrix, matrix or vector | matrix product |
    /// | `/` `%` | number, number | quotient / remainder |
    /// | `^` | number, number / vector or matrix, number | power |
    ///
    /// # Errors
    /// `TypeMismatch` when no rule matches, `DimensionMismatch` when vector or
    /// matrix shapes are incompatible.
    pub fn eval_arith(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      pos: Position)
                      -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => Self::eval_add(left, right, pos),
            BinaryOperator::Sub => Self::eval_sub(left, right, pos),
            BinaryOperator::Mul => Self::eval_mul(left, right, pos),
            BinaryOperator::Pow => Self::eval_pow(left, right, pos),
            BinaryOperator::Div | BinaryOperator::Mod => match (left, right) {
                (Value::Number(a), Value::Number(b)) if op == BinaryOperator::Div => Ok(Value::Number(a / b)),
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a % b)),
                _ => Err(operand_mismatch(op, left, right, pos)),
            },
            _ => Err(operand_mismatch(op, left, right, pos)),
        }
    }

    fn eval_add(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
        if let (Value::Number(a), Value::Number(b)) = (left, right) {
            return Ok(Value::Number(a + b));
        }

        if matches!((left, right), (Value::List(_), Value::List(_))) {
            if let Some(sum) = adapter::elementwise(left, right, pos, |a, b| a + b)? {
                return Ok(sum);
            }
        }

        match (left, right) {
            (Value::List(list), _) => {
                list.borrow_mut().push(right.clone());
                Ok(left.clone())
            },
            (Value::String(s), _) => Ok(Value::String(format!("{s}{right}"))),
            (_, Value::String(s)) => Ok(Value::String(format!("{left}{s}"))),
            _ => Err(operand_mismatch(BinaryOperator::Add, left, right, pos)),
        }
    }

    fn eval_sub(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
        if let (Value::Number(a), Value::Number(b)) = (left, right) {
            return Ok(Value::Number(a - b));
        }

        if matches!((left, right), (Value::List(_), Value::List(_))) {
            if let Some(difference) = adapter::elementwise(left, right, pos, |a, b| a - b)? {
                return Ok(difference);
            }
        }

        match left {
            Value::List(list) => {
                remove_first_equal(list, right, pos)?;
                Ok(left.clone())
            },
            _ => Err(operand_mismatch(BinaryOperator::Sub, left, right, pos)),
        }
    }

    fn eval_mul(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
            (Value::String(s), Value::Number(n)) => repeat_string(s, repeat_count(*n, pos)?, pos),
            (Value::List(list), Value::Number(n)) => repeat_list(list, repeat_count(*n, pos)?, pos),
            (Value::List(_), Value::List(_)) => {
                if left.is_vector() && right.is_vector() {
                    if let Some(product) = adapter::elementwise(left, right, pos, |a, b| a * b)? {
                        return Ok(product);
                    }
                }
                adapter::matrix_product(left, right, pos)?.ok_or_else(|| operand_mismatch(BinaryOperator::Mul, left, right, pos))
            },
            _ => Err(operand_mismatch(BinaryOperator::Mul, left, right, pos)),
        }
    }

    fn eval_pow(base: &Value, exponent: &Value, pos: Position) -> EvalResult<Value> {
        match (base, exponent) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.powf(*b))),
            (Value::List(_), Value::Number(b)) => {
                adapter::power(base, *b, pos)?.ok_or_else(|| operand_mismatch(BinaryOperator::Pow, base, exponent, pos))
            },
            _ => Err(operand_mismatch(BinaryOperator::Pow, base, exponent, pos)),
        }
    }
}

/// Removes the first element of `list` equal to `target`, if any.
fn repeat_string(s: &str, count: usize, pos: Position) -> EvalResult<Value> {
    if s.is_empty() || count == 0 {
        return Ok(Value::String(String::new()));
    }

    let mut repeated = String::new();
    s.len()
     .checked_mul(count)
     .and_then(|total| repeated.try_reserve_exact(total).ok())
     .ok_or(RuntimeError::RepetitionTooLarge { len: s.len(),
                                               count,
                                               pos })?;

    for _ in 0..count {
        repeated.push_str(s);
    }
    Ok(Value::String(repeated))
}

fn repeat_list(list: &ListRef, count: usize, pos: Position) -> EvalResult<Value> {
    let elements = list.borrow();
    if elements.is_empty() || count == 0 {
        return Ok(Value::list(Vec::new()));
    }

    let mut repeated = Vec::new();
    elements.len()
            .checked_mul(count)
            .and_then(|total| repeated.try_reserve_exact(total).ok())
            .ok_or(RuntimeError::RepetitionTooLarge { len: elements.len(),
                                                      count,
                                                      pos })?;

    for _ in 0..count {
        repeated.extend(elements.iter().cloned());
    }
    Ok(Value::list(repeated))
}

fn remove_first_equal(list: &ListRef, target: &Value, pos: Position) -> EvalResult<()> {
    let mut found = None;
    for (index, element) in list.borrow().iter().enumerate() {
        if element.try_eq(target, pos)? {
            found = Some(index);
            break;
        }
    }

    if let Some(index) = found {
        list.borrow_mut().remove(index);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position::new(1, 1);

    fn numbers(values: &[f64]) -> Value {
        Value::list(values.iter().copied().map(Value::Number).collect())
    }

    fn eval(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        Interpreter::eval_arith(op, left, right, POS)
    }

    #[test]
    fn append_mutates_and_returns_same_list() {
        let list = Value::list(vec!["a".into()]);
        let result = eval(BinaryOperator::Add, &list, &Value::Number(1.0)).unwrap();
        assert_eq!(list.to_string(), "[a, 1]");
        assert!(std::rc::Rc::ptr_eq(result.as_list().unwrap(), list.as_list().unwrap()));
    }

    #[test]
    fn removal_drops_first_equal_element_only() {
        let list = numbers(&[1.0, 2.0, 1.0]);
        eval(BinaryOperator::Sub, &list, &Value::Number(1.0)).unwrap();
        assert_eq!(list.to_string(), "[2, 1]");
        eval(BinaryOperator::Sub, &list, &Value::Number(7.0)).unwrap();
        assert_eq!(list.to_string(), "[2, 1]");
    }

    #[test]
    fn repetition_comes_before_vector_rules() {
        assert_eq!(eval(BinaryOperator::Mul, &"ab".into(), &Value::Number(3.0)).unwrap().to_string(),
                   "ababab");
        assert_eq!(eval(BinaryOperator::Mul, &numbers(&[1.0, 2.0]), &Value::Number(2.0)).unwrap()
                                                                                     .to_string(),
                   "[1, 2, 1, 2]");
        assert_eq!(eval(BinaryOperator::Mul, &"ab".into(), &Value::Number(-1.0)).unwrap().to_string(),
                   "");
    }

    #[test]
    fn oversized_repetition_is_an_error() {
        let huge = Value::Number(9_000_000_000_000_000.0);
        assert!(matches!(eval(BinaryOperator::Mul, &numbers(&[1.0, 2.0, 3.0]), &huge),
                         Err(RuntimeError::RepetitionTooLarge { len: 3, .. })));
        assert!(matches!(eval(BinaryOperator::Mul, &"abc".into(), &huge),
                         Err(RuntimeError::RepetitionTooLarge { len: 3, .. })));
        assert_eq!(eval(BinaryOperator::Mul, &"".into(), &huge).unwrap().to_string(), "");
        assert_eq!(eval(BinaryOperator::Mul, &Value::list(vec![]), &huge).unwrap().to_string(),
                   "[]");
    }

    #[test]
    fn vector_products() {
        assert_eq!(eval(BinaryOperator::Mul, &numbers(&[1.0, 2.0]), &numbers(&[3.0, 4.0])).unwrap()
                                                                                        .to_string(),
                   "[3, 8]");
        let a = Value::list(vec![numbers(&[1.0, 2.0]), numbers(&[3.0, 4.0])]);
        let b = Value::list(vec![numbers(&[5.0, 6.0]), numbers(&[7.0, 8.0])]);
        assert_eq!(eval(BinaryOperator::Mul, &a, &b).unwrap().to_string(),
                   "[[19, 22], [43, 50]]");
    }

    #[test]
    fn string_concatenation_stringifies_other_side() {
        assert_eq!(eval(BinaryOperator::Add, &Value::Number(1.0), &"x".into()).unwrap().to_string(),
                   "1x");
        assert_eq!(eval(BinaryOperator::Add, &"x".into(), &Value::Null).unwrap().to_string(),
                   "xNULL");
    }

    #[test]
    fn unmatched_operands_are_type_mismatches() {
        assert!(matches!(eval(BinaryOperator::Add, &Value::Bool(true), &Value::Number(1.0)),
                         Err(RuntimeError::TypeMismatch { .. })));
        assert!(matches!(eval(BinaryOperator::Div, &"a".into(), &Value::Number(1.0)),
                         Err(RuntimeError::TypeMismatch { .. })));
        assert!(matches!(eval(BinaryOperator::Pow, &Value::list(vec![]), &Value::Number(2.0)),
                         Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(eval(BinaryOperator::Div, &Value::Number(5.0), &Value::Number(0.0)).unwrap()
                                                                                   .to_string(),
                   "Infinity");
    }
}
