use crate::error::{TensorError, TensorResult};
use serde::{Deserialize, Serialize};

/// Dimension list of a tensor, with the element count cached at construction.
///
/// Serializes as a plain dimension list; the cached count is rebuilt on the
/// way in so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct Shape {
    dims: Vec<usize>,
    numel: usize,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        let numel = dims.iter().product();
        Shape { dims, numel }
    }

    pub fn from_slice(dims: &[usize]) -> Self {
        Shape::new(dims.to_vec())
    }

    /// Rank-zero shape; holds exactly one element.
    pub fn scalar() -> Self {
        Shape::new(vec![])
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements. Cached, so this never re-walks the dims.
    #[inline]
    pub fn numel(&self) -> usize {
        self.numel
    }

    /// Size along a specific axis.
    pub fn dim(&self, axis: usize) -> TensorResult<usize> {
        self.dims.get(axis).copied().ok_or(TensorError::InvalidAxis {
            axis,
            ndim: self.ndim(),
        })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.dims.clone()
    }

    /// Compute row-major (C-order) strides.
    pub fn strides(&self) -> Vec<usize> {
        if self.dims.is_empty() {
            return vec![];
        }
        let mut strides = vec![1usize; self.dims.len()];
        for i in (0..self.dims.len() - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Flat row-major offset for a full-rank coordinate list.
    ///
    /// The coordinate count must equal the rank; rank is checked before any
    /// bounds, and bounds are checked in axis order so the first offending
    /// axis is the one reported. A rank-zero shape accepts `&[]` at offset 0.
    pub fn index(&self, coords: &[usize]) -> TensorResult<usize> {
        if coords.len() != self.ndim() {
            return Err(TensorError::RankMismatch {
                expected: self.ndim(),
                got: coords.len(),
            });
        }
        for (axis, (&c, &d)) in coords.iter().zip(self.dims.iter()).enumerate() {
            if c >= d {
                return Err(TensorError::IndexOutOfBounds {
                    index: c,
                    axis,
                    size: d,
                });
            }
        }
        let mut offset = 0;
        let mut stride = 1;
        for (&c, &d) in coords.iter().zip(self.dims.iter()).rev() {
            offset += c * stride;
            stride *= d;
        }
        Ok(offset)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::from_slice(dims)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape::new(dims.to_vec())
    }
}

impl From<Shape> for Vec<usize> {
    fn from(shape: Shape) -> Self {
        shape.dims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_basics() {
        let s = Shape::new(vec![3, 4, 5]);
        assert_eq!(s.ndim(), 3);
        assert_eq!(s.numel(), 60);
        assert_eq!(s.dim(0).unwrap(), 3);
        assert_eq!(s.dim(2).unwrap(), 5);
        assert_eq!(
            s.dim(3),
            Err(TensorError::InvalidAxis { axis: 3, ndim: 3 })
        );
    }

    #[test]
    fn test_numel_with_zero_dim() {
        let s = Shape::new(vec![3, 0, 4]);
        assert_eq!(s.numel(), 0);
        assert_eq!(s.ndim(), 3);
    }

    #[test]
    fn test_strides() {
        let s = Shape::new(vec![3, 4, 5]);
        assert_eq!(s.strides(), vec![20, 5, 1]);

        let s2 = Shape::new(vec![2, 3]);
        assert_eq!(s2.strides(), vec![3, 1]);

        assert_eq!(Shape::scalar().strides(), Vec::<usize>::new());
    }

    #[test]
    fn test_index_row_major() {
        let s = Shape::new(vec![3, 4]);
        assert_eq!(s.index(&[0, 0]).unwrap(), 0);
        assert_eq!(s.index(&[0, 3]).unwrap(), 3);
        assert_eq!(s.index(&[1, 0]).unwrap(), 4);
        assert_eq!(s.index(&[2, 3]).unwrap(), 11);

        let s3 = Shape::new(vec![2, 3, 4]);
        assert_eq!(s3.index(&[1, 2, 3]).unwrap(), 23);
    }

    #[test]
    fn test_index_rank_mismatch() {
        let s = Shape::new(vec![3, 4]);
        assert_eq!(
            s.index(&[1]),
            Err(TensorError::RankMismatch { expected: 2, got: 1 })
        );
        assert_eq!(
            s.index(&[1, 2, 0]),
            Err(TensorError::RankMismatch { expected: 2, got: 3 })
        );
    }

    #[test]
    fn test_index_out_of_bounds_reports_first_axis() {
        let s = Shape::new(vec![3, 4]);
        assert_eq!(
            s.index(&[3, 0]),
            Err(TensorError::IndexOutOfBounds {
                index: 3,
                axis: 0,
                size: 3
            })
        );
        // both axes out of range: axis 0 wins
        assert_eq!(
            s.index(&[5, 9]),
            Err(TensorError::IndexOutOfBounds {
                index: 5,
                axis: 0,
                size: 3
            })
        );
        assert_eq!(
            s.index(&[2, 4]),
            Err(TensorError::IndexOutOfBounds {
                index: 4,
                axis: 1,
                size: 4
            })
        );
    }

    #[test]
    fn test_scalar() {
        let s = Shape::scalar();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.numel(), 1);
        assert_eq!(s.index(&[]).unwrap(), 0);
        assert_eq!(
            s.index(&[0]),
            Err(TensorError::RankMismatch { expected: 0, got: 1 })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(vec![3, 4]).to_string(), "(3,4)");
        assert_eq!(Shape::new(vec![7]).to_string(), "(7)");
        assert_eq!(Shape::new(vec![2, 3, 4]).to_string(), "(2,3,4)");
        assert_eq!(Shape::scalar().to_string(), "()");
    }

    #[test]
    fn test_from_conversions() {
        let a: Shape = vec![2, 3].into();
        let b: Shape = [2, 3].into();
        let c: Shape = (&[2usize, 3][..]).into();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(Vec::from(a), vec![2, 3]);
    }
}
