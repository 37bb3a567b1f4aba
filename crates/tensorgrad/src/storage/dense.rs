//! Dense storage for tensor data.

use crate::scalar::Scalar;

/// Dense storage - contiguous buffer of elements in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<ElT: Scalar> {
    data: Vec<ElT>,
}

impl<ElT: Scalar> Dense<ElT> {
    /// Create dense storage with given length, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, ElT::zero())
    }

    /// Create dense storage with every element set to `value`.
    pub fn filled(len: usize, value: ElT) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Create dense storage from existing vector (takes ownership).
    pub fn from_vec(data: Vec<ElT>) -> Self {
        Self { data }
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
    pub fn as_slice(&self) -> &[ElT] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ElT] {
        &mut self.data
    }

    /// Consume the storage and return the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<ElT> {
        self.data
    }
}

impl<ElT: Scalar> std::ops::Index<usize> for Dense<ElT> {
    type Output = ElT;

    #[inline]
    fn index(&self, i: usize) -> &ElT {
        &self.data[i]
    }
}

impl<ElT: Scalar> std::ops::IndexMut<usize> for Dense<ElT> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut ElT {
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let d: Dense<f64> = Dense::zeros(5);
        assert_eq!(d.len(), 5);
        assert!(!d.is_empty());
        assert!(d.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_filled() {
        let d: Dense<f32> = Dense::filled(3, 2.5);
        assert_eq!(d.as_slice(), &[2.5, 2.5, 2.5]);
    }

    #[test]
    fn test_index_mut() {
        let mut d: Dense<f64> = Dense::zeros(3);
        d[1] = 5.0;
        assert_eq!(d[1], 5.0);
    }

    #[test]
    fn test_into_vec() {
        let d = Dense::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(d.into_vec(), vec![1.0, 2.0, 3.0]);
    }
}
