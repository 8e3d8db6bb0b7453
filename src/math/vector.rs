use std::ops::Index;

use crate::error::{Error, Result};

/// Dense column vector of `f64`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn zeros(len: usize) -> Vector {
        Vector { data: vec![0.0; len] }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn map<F>(&self, functor: F) -> Vector
    where
        F: Fn(f64) -> f64,
    {
        self.data.iter().map(|&x| functor(x)).collect()
    }

    /// Like `map`, but the functor also receives the entry's index.
    pub fn map_indexed<F>(&self, functor: F) -> Vector
    where
        F: Fn(usize, f64) -> f64,
    {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &x)| functor(i, x))
            .collect()
    }

    pub fn scale(&self, factor: f64) -> Vector {
        self.map(|x| x * factor)
    }

    pub fn add(&self, rhs: &Vector) -> Result<Vector> {
        self.zip_with("vector add", rhs, |a, b| a + b)
    }

    pub fn sub(&self, rhs: &Vector) -> Result<Vector> {
        self.zip_with("vector sub", rhs, |a, b| a - b)
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, rhs: &Vector) -> Result<Vector> {
        self.zip_with("vector hadamard", rhs, |a, b| a * b)
    }

    fn zip_with<F>(&self, op: &'static str, rhs: &Vector, f: F) -> Result<Vector>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.len() != rhs.len() {
            return Err(Error::shape(op, self.len(), rhs.len()));
        }
        Ok(self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Vector { data }
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(data: [f64; N]) -> Self {
        Vector { data: data.to_vec() }
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector { data: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
