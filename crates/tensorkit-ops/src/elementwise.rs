use tensorkit_core::error::TensorResult;
use tensorkit_core::{Element, Tensor, TensorError};

/// Shared driver for the binary operators.
///
/// Validates that all three tensors hold the same number of elements, then
/// runs one flat pass over the buffers. Both operands are converted to the
/// destination element type first, so arithmetic happens in that type.
/// The destination must not share its buffer with either source; an aliased
/// destination trips the borrow guard.
fn zip_apply<A, B, T, F>(
    a: &Tensor<A>,
    b: &Tensor<B>,
    dst: &mut Tensor<T>,
    op: F,
) -> TensorResult<()>
where
    A: Element,
    B: Element,
    T: Element,
    F: Fn(T, T) -> T,
{
    if a.numel() != dst.numel() {
        return Err(TensorError::ShapeMismatch {
            expected: dst.shape().to_vec(),
            got: a.shape().to_vec(),
        });
    }
    if b.numel() != dst.numel() {
        return Err(TensorError::ShapeMismatch {
            expected: dst.shape().to_vec(),
            got: b.shape().to_vec(),
        });
    }
    let a_data = a.data();
    let b_data = b.data();
    let mut out = dst.data_mut();
    for (o, (&x, &y)) in out.iter_mut().zip(a_data.iter().zip(b_data.iter())) {
        *o = op(T::from_elem(x), T::from_elem(y));
    }
    Ok(())
}

/// Elementwise sum over equally sized tensors: `dst[i] = a[i] + b[i]`.
pub fn add<A: Element, B: Element, T: Element>(
    a: &Tensor<A>,
    b: &Tensor<B>,
    dst: &mut Tensor<T>,
) -> TensorResult<()> {
    zip_apply(a, b, dst, |x, y| x + y)
}

/// Elementwise difference over equally sized tensors: `dst[i] = a[i] - b[i]`.
pub fn sub<A: Element, B: Element, T: Element>(
    a: &Tensor<A>,
    b: &Tensor<B>,
    dst: &mut Tensor<T>,
) -> TensorResult<()> {
    zip_apply(a, b, dst, |x, y| x - y)
}

/// Elementwise product over equally sized tensors: `dst[i] = a[i] * b[i]`.
pub fn mul<A: Element, B: Element, T: Element>(
    a: &Tensor<A>,
    b: &Tensor<B>,
    dst: &mut Tensor<T>,
) -> TensorResult<()> {
    zip_apply(a, b, dst, |x, y| x * y)
}

/// Elementwise quotient over equally sized tensors: `dst[i] = a[i] / b[i]`.
/// Division follows the destination type: floats produce inf/NaN on zero
/// divisors, integer destinations panic.
pub fn div<A: Element, B: Element, T: Element>(
    a: &Tensor<A>,
    b: &Tensor<B>,
    dst: &mut Tensor<T>,
) -> TensorResult<()> {
    zip_apply(a, b, dst, |x, y| x / y)
}
