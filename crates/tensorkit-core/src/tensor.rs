use crate::dtype::{DataType, Element};
use crate::error::{TensorError, TensorResult};
use crate::shape::Shape;
use crate::storage::Storage;

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Ref, RefMut};
use std::fmt;

/// N-dimensional tensor handle over a shared row-major buffer.
///
/// The buffer is reference counted: cloning a tensor yields a second handle
/// onto the same elements, while shape and name stay per-handle. All layout
/// is C-order, with the last axis contiguous.
#[derive(Debug)]
pub struct Tensor<T: Element> {
    name: Option<String>,
    shape: Shape,
    data: Storage<T>,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl<T: Element> Tensor<T> {
    /// Create a tensor from raw data and shape.
    pub fn new(data: Vec<T>, shape: impl Into<Shape>) -> TensorResult<Self> {
        let s = shape.into();
        if data.len() != s.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: s.to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(Tensor {
            name: None,
            shape: s,
            data: Storage::from_vec(data),
        })
    }

    /// Create a tensor filled with a constant value.
    pub fn full(shape: impl Into<Shape>, value: T) -> TensorResult<Self> {
        let s = shape.into();
        let data = Storage::filled(s.numel(), value)?;
        Ok(Tensor {
            name: None,
            shape: s,
            data,
        })
    }

    /// Create a tensor filled with zeros.
    pub fn zeros(shape: impl Into<Shape>) -> TensorResult<Self> {
        Tensor::full(shape, T::zero())
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: impl Into<Shape>) -> TensorResult<Self> {
        Tensor::full(shape, T::one())
    }

    /// Create a tensor with unspecified contents.
    /// Currently zero-initialized; callers must not rely on that.
    pub fn empty(shape: impl Into<Shape>) -> TensorResult<Self> {
        Tensor::full(shape, T::zero())
    }

    /// Create a scalar tensor (0-d).
    pub fn scalar(value: T) -> Self {
        Tensor {
            name: None,
            shape: Shape::scalar(),
            data: Storage::from_vec(vec![value]),
        }
    }

    /// Create a 1-D tensor from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Tensor {
            name: None,
            shape: Shape::new(vec![data.len()]),
            data: Storage::from_vec(data.to_vec()),
        }
    }

    /// Zero-filled tensor with the same shape as `other`, on a fresh buffer.
    pub fn zeros_like(other: &Tensor<T>) -> TensorResult<Self> {
        Tensor::zeros(other.shape.clone())
    }

    /// One-filled tensor with the same shape as `other`, on a fresh buffer.
    pub fn ones_like(other: &Tensor<T>) -> TensorResult<Self> {
        Tensor::ones(other.shape.clone())
    }

    /// Unspecified-content tensor with the same shape as `other`.
    pub fn empty_like(other: &Tensor<T>) -> TensorResult<Self> {
        Tensor::empty(other.shape.clone())
    }

    /// Constant-filled tensor with the same shape as `other`.
    pub fn full_like(other: &Tensor<T>, value: T) -> TensorResult<Self> {
        Tensor::full(other.shape.clone(), value)
    }

    /// Random tensor drawn from the standard distribution of `T`.
    /// Floats sample uniformly from [0, 1); integers span their full range.
    pub fn rand(shape: impl Into<Shape>, seed: Option<u64>) -> TensorResult<Self>
    where
        Standard: Distribution<T>,
    {
        let s = shape.into();
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let data = Storage::filled(s.numel(), T::zero())?;
        for v in data.borrow_mut().iter_mut() {
            *v = rand::Rng::gen(&mut rng);
        }
        Ok(Tensor {
            name: None,
            shape: s,
            data,
        })
    }

    /// Attach a name used in display output.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_vec(&self) -> Vec<usize> {
        self.shape.to_vec()
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Runtime tag of the element type.
    pub fn dtype(&self) -> DataType {
        T::DTYPE
    }

    /// Buffer footprint in bytes.
    pub fn size_in_bytes(&self) -> usize {
        self.data.size_in_bytes()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.ndim() == 0
    }

    /// The shared buffer behind this handle.
    pub fn storage(&self) -> &Storage<T> {
        &self.data
    }

    /// True when both handles read and write the same allocation.
    pub fn shares_buffer_with(&self, other: &Tensor<T>) -> bool {
        self.data.shares_buffer_with(&other.data)
    }

    /// Read view of the flat row-major buffer.
    /// Panics while a write view from any handle is live.
    pub fn data(&self) -> Ref<'_, [T]> {
        self.data.borrow()
    }

    /// Write view of the flat row-major buffer.
    /// Panics while any other view from any handle is live.
    pub fn data_mut(&mut self) -> RefMut<'_, [T]> {
        self.data.borrow_mut()
    }

    /// The single element of a one-element tensor.
    pub fn item(&self) -> TensorResult<T> {
        if self.numel() != 1 {
            return Err(TensorError::ShapeMismatch {
                expected: vec![1],
                got: self.shape.to_vec(),
            });
        }
        Ok(self.data.borrow()[0])
    }

    /// Read one element at a full-rank coordinate.
    pub fn get(&self, coords: &[usize]) -> TensorResult<T> {
        let offset = self.shape.index(coords)?;
        Ok(self.data.borrow()[offset])
    }

    /// Write one element at a full-rank coordinate.
    /// Visible through every handle sharing the buffer.
    pub fn set(&mut self, coords: &[usize], value: T) -> TensorResult<()> {
        let offset = self.shape.index(coords)?;
        self.data.borrow_mut()[offset] = value;
        Ok(())
    }

    // ─── Mutation ───────────────────────────────────────────────────────────

    /// Overwrite every element with `value`.
    /// Visible through every handle sharing the buffer.
    pub fn fill(&mut self, value: T) {
        self.data.borrow_mut().fill(value);
    }

    /// Reinterpret the buffer under a new shape with the same element count.
    ///
    /// Mutates only this handle; other handles on the buffer keep their
    /// shapes. On error the tensor is left untouched.
    pub fn reshape(&mut self, new_shape: impl Into<Shape>) -> TensorResult<()> {
        let ns = new_shape.into();
        if ns.numel() != self.shape.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: self.shape.to_vec(),
                got: ns.to_vec(),
            });
        }
        self.shape = ns;
        Ok(())
    }

    // ─── Conversion ─────────────────────────────────────────────────────────

    /// Copy into a tensor of another element type, on a fresh buffer.
    /// Values transit through `f64`; see [`Element::from_elem`].
    pub fn cast<U: Element>(&self) -> TensorResult<Tensor<U>> {
        let data = Storage::filled(self.numel(), U::zero())?;
        {
            let src = self.data.borrow();
            let mut dst = data.borrow_mut();
            for (d, &s) in dst.iter_mut().zip(src.iter()) {
                *d = U::from_elem(s);
            }
        }
        Ok(Tensor {
            name: self.name.clone(),
            shape: self.shape.clone(),
            data,
        })
    }
}

/// Cloning yields another handle onto the same buffer, not a copy of it.
impl<T: Element> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Tensor {
            name: self.name.clone(),
            shape: self.shape.clone(),
            data: self.data.clone(),
        }
    }
}

/// Equality compares shape and elements; names and aliasing do not count.
impl<T: Element> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && *self.data.borrow() == *other.data.borrow()
    }
}

// ─── Display ────────────────────────────────────────────────────────────────

/// Formats as `Tensor<f32>:name(3,4)`, or without the `:name` part when
/// the tensor is unnamed.
impl<T: Element> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor<{}>", T::DTYPE)?;
        if let Some(name) = &self.name {
            write!(f, ":{}", name)?;
        }
        write!(f, "{}", self.shape)
    }
}
