use alloc::vec::Vec;
use core::ops::Index;

use crate::error::{ArrayError, Result};

/// Contiguous one-dimensional column of values.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Column<T> {
    data: Vec<T>,
}

impl<T: Copy> Column<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn from_slice(s: &[T]) -> Self {
        Self::new(s.to_vec())
    }

    /// `n` copies of `value`.
    pub fn repeat(value: T, n: usize) -> Self {
        Self::new(alloc::vec![value; n])
    }

    /// Column whose `i`-th entry is `f(i)`.
    pub fn from_fn(n: usize, f: impl FnMut(usize) -> T) -> Self {
        Self::new((0..n).map(f).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<T> {
        self.data.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.data.iter().copied()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply element-wise unary operation.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Column<U> {
        Column::new(self.data.iter().map(|&v| f(v)).collect())
    }

    /// Element-wise binary operation; both columns must have the same length.
    pub fn zip_with<U: Copy, V: Copy>(
        &self,
        other: &Column<U>,
        f: impl Fn(T, U) -> V,
    ) -> Result<Column<V>> {
        if self.len() != other.len() {
            return Err(ArrayError::LengthMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Column::new(data))
    }
}

impl<T> Index<usize> for Column<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> From<Vec<T>> for Column<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> FromIterator<T> for Column<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
