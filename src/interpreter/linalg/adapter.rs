use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        linalg::matrix::{Matrix, ShapeMismatch},
        value::core::Value,
    },
};

fn dimension_mismatch(err: ShapeMismatch, pos: Position) -> RuntimeError {
    RuntimeError::DimensionMismatch { details: err.to_string(),
                                      pos }
}

fn entry(value: &Value, pos: Position) -> EvalResult<f64> {
    value.as_number()
         .ok_or_else(|| RuntimeError::type_mismatch(format!("vector and matrix entries must be numbers, found {} `{value}`",
                                                            value.type_name()),
                                                    pos))
}

/// Reads a vector's elements as numbers.
///
/// # Errors
/// `TypeMismatch` if `value` is not a list or holds a non-number.
pub fn to_vector(value: &Value, pos: Position) -> EvalResult<Vec<f64>> {
    let elements = value.borrow_elements()
                        .ok_or_else(|| RuntimeError::type_mismatch(format!("expected a vector, found {}", value.type_name()), pos))?;

    elements.iter().map(|element| entry(element, pos)).collect()
}

/// Reads a list of rows as a [`Matrix`].
///
/// # Errors
/// - `TypeMismatch` if a row is not a list or an entry is not a number.
/// - `DimensionMismatch` if the rows differ in length.
pub fn to_matrix(value: &Value, pos: Position) -> EvalResult<Matrix> {
    let rows = value.borrow_elements()
                    .ok_or_else(|| RuntimeError::type_mismatch(format!("expected a matrix, found {}", value.type_name()), pos))?;

    let mut grid = Vec::with_capacity(rows.len());
    for row in rows.iter() {
        if row.as_list().is_none() {
            return Err(RuntimeError::type_mismatch(format!("matrix rows must be lists, found {} `{row}`",
                                                           row.type_name()),
                                                   pos));
        }
        grid.push(to_vector(row, pos)?);
    }

    Matrix::from_rows(grid).map_err(|err| dimension_mismatch(err, pos))
}

/// Reads a vector as an `n x 1` column or a matrix as itself.
///
/// # Returns
/// `None` if the value is neither a vector nor a matrix.
fn to_grid(value: &Value, pos: Position) -> EvalResult<Option<Matrix>> {
    if value.is_matrix() {
        return to_matrix(value, pos).map(Some);
    }
    if value.is_vector() {
        return to_vector(value, pos).map(|v| Some(Matrix::column(v)));
    }
    Ok(None)
}

/// Rebuilds a flat list of numbers.
#[must_use]
pub fn from_vector(values: Vec<f64>) -> Value {
    Value::list(values.into_iter().map(Value::Number).collect())
}

/// Rebuilds a list of rows, preserving row-major order.
#[must_use]
pub fn from_matrix(matrix: Matrix) -> Value {
    Value::list(matrix.into_rows().into_iter().map(from_vector).collect())
}

/// `transpose(x)`.
///
/// A vector is treated as a column, so transposing `[1, 2, 3]` gives the
/// single-row matrix `[[1, 2, 3]]`.
///
/// # Errors
/// `NotTransposable` unless `value` is a vector or matrix.
pub fn transpose(value: &Value, pos: Position) -> EvalResult<Value> {
    let grid = to_grid(value, pos)?.ok_or(RuntimeError::NotTransposable { pos })?;
    Ok(from_matrix(grid.transpose()))
}

/// `rows(x)`. A vector of length `n` has `n` rows.
///
/// # Errors
/// `NotDimensionable` unless `value` is a vector or matrix.
pub fn rows(value: &Value, pos: Position) -> EvalResult<Value> {
    let grid = to_grid(value, pos)?.ok_or(RuntimeError::NotDimensionable { pos })?;
    Ok(Value::Number(crate::util::num::usize_to_f64(grid.rows())))
}

/// `columns(x)`. A vector has one column.
///
/// # Errors
/// `NotDimensionable` unless `value` is a vector or matrix.
pub fn columns(value: &Value, pos: Position) -> EvalResult<Value> {
    let grid = to_grid(value, pos)?.ok_or(RuntimeError::NotDimensionable { pos })?;
    Ok(Value::Number(crate::util::num::usize_to_f64(grid.cols())))
}

/// `determinant(m)`.
///
/// # Errors
/// `NotSquare` unless `value` is a square matrix.
pub fn determinant(value: &Value, pos: Position) -> EvalResult<Value> {
    if !value.is_matrix() {
        return Err(RuntimeError::NotSquare { pos });
    }
    let det = to_matrix(value, pos)?.determinant()
                                     .ok_or(RuntimeError::NotSquare { pos })?;
    Ok(Value::Number(det))
}

/// `matrixSum(x)`: the sum of every entry of a vector or matrix.
///
/// # Errors
/// `NotSummable` unless `value` is a vector or matrix.
pub fn matrix_sum(value: &Value, pos: Position) -> EvalResult<Value> {
    let grid = to_grid(value, pos)?.ok_or(RuntimeError::NotSummable { pos })?;
    Ok(Value::Number(grid.sum()))
}

/// Entry-wise combination of two vectors or two matrices.
///
/// Two vectors yield a flat vector, two matrices a matrix.
///
/// # Returns
/// `None` if the operands are not both vectors or both matrices, so the
/// caller can try its next rule.
///
/// # Errors
/// `DimensionMismatch` if the shapes differ.
pub fn elementwise(left: &Value,
                   right: &Value,
                   pos: Position,
                   op: impl Fn(f64, f64) -> f64)
                   -> EvalResult<Option<Value>> {
    if left.is_matrix() && right.is_matrix() {
        let result = to_matrix(left, pos)?.zip_with(&to_matrix(right, pos)?, op)
                                          .map_err(|err| dimension_mismatch(err, pos))?;
        return Ok(Some(from_matrix(result)));
    }

    if left.is_vector() && right.is_vector() {
        let result = Matrix::column(to_vector(left, pos)?).zip_with(&Matrix::column(to_vector(right, pos)?), op)
                                                          .map_err(|err| dimension_mismatch(err, pos))?;
        return Ok(Some(from_vector(result.data().to_vec())));
    }

    Ok(None)
}

/// Matrix product for `*` when at least one side is a matrix.
///
/// A vector on the left is a `1 x n` row; a vector on the right is an
/// `n x 1` column. The result is always a matrix.
///
/// # Returns
/// `None` if neither operand is a matrix or the other is not a vector or
/// matrix.
///
/// # Errors
/// `DimensionMismatch` if the inner dimensions differ.
pub fn matrix_product(left: &Value, right: &Value, pos: Position) -> EvalResult<Option<Value>> {
    let (lhs, rhs) = if left.is_vector() && right.is_matrix() {
        (Matrix::row(to_vector(left, pos)?), to_matrix(right, pos)?)
    } else if left.is_matrix() && right.is_vector() {
        (to_matrix(left, pos)?, Matrix::column(to_vector(right, pos)?))
    } else if left.is_matrix() && right.is_matrix() {
        (to_matrix(left, pos)?, to_matrix(right, pos)?)
    } else {
        return Ok(None);
    };

    lhs.multiply(&rhs)
       .map(|product| Some(from_matrix(product)))
       .map_err(|err| dimension_mismatch(err, pos))
}

/// Raises every entry of a vector or matrix to `exponent`, keeping the shape.
///
/// # Returns
/// `None` if `base` is neither a vector nor a matrix.
pub fn power(base: &Value, exponent: f64, pos: Position) -> EvalResult<Option<Value>> {
    if base.is_matrix() {
        let result = to_matrix(base, pos)?.map(|x| x.powf(exponent));
        return Ok(Some(from_matrix(result)));
    }

    if base.is_vector() {
        let result = to_vector(base, pos)?.into_iter().map(|x| x.powf(exponent)).collect();
        return Ok(Some(from_vector(result)));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Value {
        from_vector(values.to_vec())
    }

    fn matrix(rows: &[&[f64]]) -> Value {
        Value::list(rows.iter().map(|r| numbers(r)).collect())
    }

    const POS: Position = Position::new(1, 1);

    #[test]
    fn vector_is_a_column_for_dimensions() {
        let v = numbers(&[1.0, 2.0, 3.0]);
        assert_eq!(rows(&v, POS).unwrap().to_string(), "3");
        assert_eq!(columns(&v, POS).unwrap().to_string(), "1");

        let t = transpose(&v, POS).unwrap();
        assert_eq!(t.to_string(), "[[1, 2, 3]]");
        assert_eq!(rows(&t, POS).unwrap().to_string(), "1");
        assert_eq!(columns(&t, POS).unwrap().to_string(), "3");
    }

    #[test]
    fn builtins_reject_non_grids() {
        let s = Value::from("abc");
        assert!(matches!(transpose(&s, POS), Err(RuntimeError::NotTransposable { .. })));
        assert!(matches!(rows(&Value::list(vec![]), POS), Err(RuntimeError::NotDimensionable { .. })));
        assert!(matches!(matrix_sum(&Value::Number(1.0), POS), Err(RuntimeError::NotSummable { .. })));
        assert!(matches!(determinant(&numbers(&[1.0]), POS), Err(RuntimeError::NotSquare { .. })));
        assert!(matches!(determinant(&matrix(&[&[1.0, 2.0]]), POS), Err(RuntimeError::NotSquare { .. })));
    }

    #[test]
    fn mixed_vector_is_a_type_mismatch() {
        let v = Value::list(vec![1.0.into(), numbers(&[2.0])]);
        assert!(v.is_vector());
        assert!(matches!(matrix_sum(&v, POS), Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn ragged_matrix_is_a_dimension_mismatch() {
        let m = Value::list(vec![numbers(&[1.0, 2.0]), numbers(&[3.0])]);
        assert!(matches!(transpose(&m, POS), Err(RuntimeError::DimensionMismatch { .. })));
    }

    #[test]
    fn products_follow_vector_orientation() {
        let m = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let v = numbers(&[1.0, 1.0]);

        assert_eq!(matrix_product(&v, &m, POS).unwrap().unwrap().to_string(), "[[4, 6]]");
        assert_eq!(matrix_product(&m, &v, POS).unwrap().unwrap().to_string(), "[[3], [7]]");
        assert!(matrix_product(&v, &v, POS).unwrap().is_none());
        assert!(matches!(matrix_product(&numbers(&[1.0]), &m, POS),
                         Err(RuntimeError::DimensionMismatch { .. })));
    }

    #[test]
    fn elementwise_keeps_vectors_flat() {
        let sum = elementwise(&numbers(&[1.0, 2.0]), &numbers(&[3.0, 4.0]), POS, |a, b| a + b).unwrap();
        assert_eq!(sum.unwrap().to_string(), "[4, 6]");

        let err = elementwise(&numbers(&[1.0]), &numbers(&[3.0, 4.0]), POS, |a, b| a + b);
        assert!(matches!(err, Err(RuntimeError::DimensionMismatch { .. })));

        assert!(elementwise(&numbers(&[1.0]), &matrix(&[&[1.0]]), POS, |a, b| a + b).unwrap()
                                                                                 .is_none());
    }

    #[test]
    fn power_keeps_shape() {
        let m = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(power(&m, 2.0, POS).unwrap().unwrap().to_string(), "[[1, 4], [9, 16]]");
        assert_eq!(power(&numbers(&[2.0, 3.0]), 3.0, POS).unwrap().unwrap().to_string(),
                   "[8, 27]");
        assert!(power(&Value::from("x"), 2.0, POS).unwrap().is_none());
    }
}
