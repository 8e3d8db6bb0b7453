use crate::error::{Error, Result};
use crate::math::vector::Vector;

/// Dense row-major matrix of `f64`.
///
/// Every operation allocates its result, so sources and destinations never
/// alias. Matrices are only built through constructors that keep `rows`,
/// `cols` and the row data consistent; there is no way to deserialize one
/// around those checks:
///
/// ```compile_fail
/// let m: sigmoid_net::Matrix =
///     serde_json::from_str(r#"{"rows":2,"cols":2,"data":[[1.0]]}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![value; cols]; rows],
        }
    }

    /// Builds a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Matrix
    where
        F: Fn(usize, usize) -> f64,
    {
        let data = (0..rows)
            .map(|i| (0..cols).map(|j| f(i, j)).collect())
            .collect();
        Matrix { rows, cols, data }
    }

    /// Builds a matrix from literal rows. All rows must have the same length.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(Error::shape("matrix from_rows", cols, bad.len()));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Outer product: `m[r][c] = a[r] * b[c]`.
    pub fn outer(a: &Vector, b: &Vector) -> Matrix {
        Matrix::from_fn(a.len(), b.len(), |r, c| a[r] * b[c])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }

    /// Overwrites every entry, row by row, with successive values of `f`.
    pub fn fill_with<F>(&mut self, f: &mut F)
    where
        F: FnMut() -> f64,
    {
        for row in self.data.iter_mut() {
            for x in row.iter_mut() {
                *x = f();
            }
        }
    }

    pub fn transpose(&self) -> Matrix {
        Matrix::from_fn(self.cols, self.rows, |i, j| self.data[j][i])
    }

    /// Borrowed transpose usable for multiplication without copying.
    pub fn transpose_view(&self) -> Transposed<'_> {
        Transposed { inner: self }
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        self.map_indexed(|_, _, x| functor(x))
    }

    /// Like `map`, but the functor also receives the entry's row and column.
    pub fn map_indexed<F>(&self, functor: F) -> Matrix
    where
        F: Fn(usize, usize, f64) -> f64,
    {
        Matrix::from_fn(self.rows, self.cols, |i, j| functor(i, j, self.data[i][j]))
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// (R×C)·(C) → (R)
    pub fn mul_vec(&self, v: &Vector) -> Result<Vector> {
        if self.cols != v.len() {
            return Err(Error::shape("matrix-vector multiply", self.cols, v.len()));
        }
        Ok(self
            .data
            .iter()
            .map(|row| row.iter().zip(v.iter()).map(|(w, x)| w * x).sum::<f64>())
            .collect())
    }

    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("matrix add", rhs, |a, b| a + b)
    }

    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("matrix sub", rhs, |a, b| a - b)
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("matrix hadamard", rhs, |a, b| a * b)
    }

    fn zip_with<F>(&self, op: &'static str, rhs: &Matrix, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(Error::shape(
                op,
                format!("{}x{}", self.rows, self.cols),
                format!("{}x{}", rhs.rows, rhs.cols),
            ));
        }
        Ok(self.map_indexed(|i, j, x| f(x, rhs.data[i][j])))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

/// A transposed view of a [`Matrix`].
#[derive(Debug, Clone, Copy)]
pub struct Transposed<'a> {
    inner: &'a Matrix,
}

impl Transposed<'_> {
    pub fn rows(&self) -> usize {
        self.inner.cols
    }

    pub fn cols(&self) -> usize {
        self.inner.rows
    }

    /// (C×R)·(R) → (C), reading the underlying matrix column-wise.
    pub fn mul_vec(&self, v: &Vector) -> Result<Vector> {
        if self.inner.rows != v.len() {
            return Err(Error::shape(
                "transposed matrix-vector multiply",
                self.inner.rows,
                v.len(),
            ));
        }
        Ok((0..self.inner.cols)
            .map(|j| {
                self.inner
                    .data
                    .iter()
                    .zip(v.iter())
                    .map(|(row, x)| row[j] * x)
                    .sum::<f64>()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn mul_vec() {
        let out = sample().mul_vec(&Vector::from([1.0, 0.0, -1.0])).unwrap();
        assert_eq!(out, Vector::from([-2.0, -2.0]));

        let err = sample().mul_vec(&Vector::from([1.0, 0.0])).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn transpose_view_matches_explicit_transpose() {
        let m = sample();
        let v = Vector::from([0.5, -1.5]);

        let viewed = m.transpose_view().mul_vec(&v).unwrap();
        let copied = m.transpose().mul_vec(&v).unwrap();

        assert_eq!(viewed, copied);
        assert_eq!(viewed, Vector::from([-5.5, -6.5, -7.5]));
        assert_eq!(m.transpose_view().rows(), 3);
        assert!(m.transpose_view().mul_vec(&Vector::from([1.0])).is_err());
    }

    #[test]
    fn elementwise_ops_require_equal_shapes() {
        let m = sample();
        let sum = m.add(&m).unwrap();
        assert_eq!(sum, m.scale(2.0));
        assert_eq!(m.sub(&m).unwrap(), Matrix::zeros(2, 3));
        assert_eq!(m.hadamard(&m).unwrap().row(1), &[16.0, 25.0, 36.0]);

        let other = Matrix::zeros(3, 2);
        assert!(m.add(&other).unwrap_err().is_shape_mismatch());
        assert!(m.sub(&other).unwrap_err().is_shape_mismatch());
        assert!(m.hadamard(&other).unwrap_err().is_shape_mismatch());
    }

    #[test]
    fn outer_product() {
        let m = Matrix::outer(&Vector::from([1.0, -2.0]), &Vector::from([3.0, 4.0, 5.0]));
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(0), &[3.0, 4.0, 5.0]);
        assert_eq!(m.row(1), &[-6.0, -8.0, -10.0]);
    }

    #[test]
    fn fill_with_walks_rows_in_order() {
        let mut m = Matrix::zeros(2, 2);
        let mut next = 0.0;
        m.fill_with(&mut || {
            next += 1.0;
            next
        });
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }
}
