use thiserror::Error;

/// Two operands whose shapes do not fit the requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{left_rows}x{left_cols} is incompatible with {right_rows}x{right_cols}")]
pub struct ShapeMismatch {
    /// Rows of the left operand.
    pub left_rows:  usize,
    /// Columns of the left operand.
    pub left_cols:  usize,
    /// Rows of the right operand.
    pub right_rows: usize,
    /// Columns of the right operand.
    pub right_cols: usize,
}

/// A dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Builds a matrix from equally sized rows.
    ///
    /// # Errors
    /// Returns a [`ShapeMismatch`] naming the first row whose length differs
    /// from the first row's.
    ///
    /// ## Example
    /// ```
    /// use mava::interpreter::linalg::matrix::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!((m.rows(), m.cols()), (2, 2));
    /// assert!(Matrix::from_rows(vec![vec![1.0], vec![2.0, 3.0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ShapeMismatch> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for row in &rows {
            if row.len() != cols {
                return Err(ShapeMismatch { left_rows:  1,
                                           left_cols:  cols,
                                           right_rows: 1,
                                           right_cols: row.len(), });
            }
            data.extend_from_slice(row);
        }

        Ok(Self { rows: rows.len(),
                  cols,
                  data })
    }

    /// Builds an `n x 1` column from a vector.
    #[must_use]
    pub fn column(values: Vec<f64>) -> Self {
        Self { rows: values.len(),
               cols: 1,
               data: values }
    }

    /// Builds a `1 x n` row from a vector.
    #[must_use]
    pub fn row(values: Vec<f64>) -> Self {
        Self { rows: 1,
               cols: values.len(),
               data: values }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at `(row, col)`. Callers stay in bounds.
    fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Entries in row-major order.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix, yielding its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    const fn mismatch(&self, other: &Self) -> ShapeMismatch {
        ShapeMismatch { left_rows:  self.rows,
                        left_cols:  self.cols,
                        right_rows: other.rows,
                        right_cols: other.cols, }
    }

    /// Swaps rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.at(row, col));
            }
        }

        Self { rows: self.cols,
               cols: self.rows,
               data }
    }

    /// Applies `f` to every entry.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self { rows: self.rows,
               cols: self.cols,
               data: self.data.iter().copied().map(f).collect() }
    }

    /// Combines two equally shaped matrices entry by entry.
    ///
    /// # Errors
    /// Returns a [`ShapeMismatch`] if the shapes differ.
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self, ShapeMismatch> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(self.mismatch(other));
        }

        Ok(Self { rows: self.rows,
                  cols: self.cols,
                  data: self.data
                            .iter()
                            .zip(&other.data)
                            .map(|(&a, &b)| f(a, b))
                            .collect() })
    }

    /// Computes the matrix product `self * other`.
    ///
    /// # Errors
    /// Returns a [`ShapeMismatch`] if `self.cols() != other.rows()`.
    ///
    /// ## Example
    /// ```
    /// use mava::interpreter::linalg::matrix::Matrix;
    ///
    /// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
    ///
    /// assert_eq!(a.multiply(&b).unwrap().into_rows(),
    ///            vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
    /// ```
    pub fn multiply(&self, other: &Self) -> Result<Self, ShapeMismatch> {
        if self.cols != other.rows {
            return Err(self.mismatch(other));
        }

        let mut data = Vec::with_capacity(self.rows * other.cols);
        for row in 0..self.rows {
            for col in 0..other.cols {
                data.push((0..self.cols).map(|k| self.at(row, k) * other.at(k, col)).sum());
            }
        }

        Ok(Self { rows: self.rows,
                  cols: other.cols,
                  data })
    }

    /// Sum of all entries.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Computes the determinant by LU decomposition with partial pivoting.
    ///
    /// # Returns
    /// `None` if the matrix is not square. A singular matrix yields `0`.
    #[must_use]
    pub fn determinant(&self) -> Option<f64> {
        if self.rows != self.cols {
            return None;
        }

        let n = self.rows;
        let mut lu = self.data.clone();
        let mut det = 1.0;

        for k in 0..n {
            let mut pivot = k;
            for candidate in k + 1..n {
                if lu[candidate * n + k].abs() > lu[pivot * n + k].abs() {
                    pivot = candidate;
                }
            }

            if lu[pivot * n + k] == 0.0 {
                return Some(0.0);
            }

            if pivot != k {
                for col in 0..n {
                    lu.swap(k * n + col, pivot * n + col);
                }
                det = -det;
            }

            let diagonal = lu[k * n + k];
            det *= diagonal;

            for row in k + 1..n {
                let factor = lu[row * n + k] / diagonal;
                for col in k + 1..n {
                    lu[row * n + col] -= factor * lu[k * n + col];
                }
            }
        }

        Some(det)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn transpose_swaps_axes() {
        let m = matrix(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(m.transpose().into_rows(),
                   vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
        assert_eq!(Matrix::column(vec![1.0, 2.0]).transpose().into_rows(),
                   vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn multiply_checks_inner_dimension() {
        let a = matrix(&[&[1.0, 2.0]]);
        let err = a.multiply(&a).unwrap_err();
        assert_eq!(err.to_string(), "1x2 is incompatible with 1x2");

        let product = a.multiply(&a.transpose()).unwrap();
        assert_eq!(product.into_rows(), vec![vec![5.0]]);
    }

    #[test]
    fn determinant_of_known_matrices() {
        assert!(close(matrix(&[&[1.0, 2.0], &[3.0, 4.0]]).determinant().unwrap(), -2.0));
        assert!(close(matrix(&[&[2.0, 0.0, 1.0], &[1.0, 3.0, 2.0], &[1.0, 1.0, 1.0]]).determinant()
                                                                                      .unwrap(),
                      1.0));
        assert!(close(matrix(&[&[1.0, 2.0], &[2.0, 4.0]]).determinant().unwrap(), 0.0));
        assert!(close(matrix(&[&[0.0, 1.0], &[1.0, 0.0]]).determinant().unwrap(), -1.0));
        assert_eq!(matrix(&[&[1.0, 2.0]]).determinant(), None);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn zip_with_requires_equal_shapes() {
        let a = matrix(&[&[1.0, 2.0]]);
        let b = matrix(&[&[3.0, 4.0]]);
        assert_eq!(a.zip_with(&b, |x, y| x + y).unwrap().data(), &[4.0, 6.0]);
        assert!(a.zip_with(&a.transpose(), |x, y| x + y).is_err());
    }
}
