use std::cell::{Ref, RefCell, RefMut};
use std::mem;
use std::rc::Rc;

use crate::error::{TensorError, TensorResult};

/// Reference-counted element buffer shared between tensor handles.
///
/// Cloning produces another handle onto the same allocation; a write through
/// any handle is visible to all of them. `Rc` keeps the whole container
/// single-threaded, and the `RefCell` turns a second simultaneous writer
/// into a deterministic panic instead of silent corruption.
#[derive(Debug)]
pub struct Storage<T> {
    data: Rc<RefCell<Vec<T>>>,
}

impl<T> Storage<T> {
    /// Allocate a buffer of `len` copies of `value`.
    ///
    /// Allocation failure is reported as [`TensorError::Allocation`] rather
    /// than aborting the process.
    pub fn filled(len: usize, value: T) -> TensorResult<Self>
    where
        T: Clone,
    {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| TensorError::Allocation {
                bytes: len.saturating_mul(mem::size_of::<T>()),
            })?;
        buf.resize(len, value);
        Ok(Storage::from_vec(buf))
    }

    /// Wrap an existing buffer without copying it.
    pub fn from_vec(data: Vec<T>) -> Self {
        Storage {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buffer footprint in bytes.
    pub fn size_in_bytes(&self) -> usize {
        self.len() * mem::size_of::<T>()
    }

    /// Shared read view. Panics if a writer currently holds the buffer.
    pub fn borrow(&self) -> Ref<'_, [T]> {
        Ref::map(self.data.borrow(), |v| v.as_slice())
    }

    /// Exclusive write view. Panics if any other view is currently live.
    pub fn borrow_mut(&self) -> RefMut<'_, [T]> {
        RefMut::map(self.data.borrow_mut(), |v| v.as_mut_slice())
    }

    /// Number of handles sharing this buffer, this one included.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.data)
    }

    /// True when no other handle shares the buffer.
    pub fn is_unique(&self) -> bool {
        self.ref_count() == 1
    }

    /// True when both handles point at the same allocation.
    pub fn shares_buffer_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

/// Cloning a handle shares the buffer instead of copying it.
impl<T> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Storage {
            data: Rc::clone(&self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled() {
        let s = Storage::filled(6, 1.5f32).unwrap();
        assert_eq!(s.len(), 6);
        assert_eq!(s.size_in_bytes(), 24);
        assert!(s.borrow().iter().all(|&v| v == 1.5));
    }

    #[test]
    fn test_from_vec() {
        let s = Storage::from_vec(vec![1, 2, 3]);
        assert_eq!(s.len(), 3);
        assert_eq!(&*s.borrow(), &[1, 2, 3]);
    }

    #[test]
    fn test_clone_shares_allocation() {
        let a = Storage::from_vec(vec![0.0f64; 4]);
        let b = a.clone();
        assert!(a.shares_buffer_with(&b));

        b.borrow_mut()[2] = 9.0;
        assert_eq!(a.borrow()[2], 9.0);
    }

    #[test]
    fn test_ref_count_tracks_handles() {
        let a = Storage::from_vec(vec![1u8]);
        assert_eq!(a.ref_count(), 1);
        assert!(a.is_unique());

        let b = a.clone();
        assert_eq!(a.ref_count(), 2);
        assert!(!a.is_unique());

        drop(b);
        assert_eq!(a.ref_count(), 1);
        assert!(a.is_unique());
    }

    #[test]
    fn test_separate_buffers_do_not_alias() {
        let a = Storage::from_vec(vec![1, 2]);
        let b = Storage::from_vec(vec![1, 2]);
        assert!(!a.shares_buffer_with(&b));
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        let err = Storage::<f64>::filled(usize::MAX, 0.0).unwrap_err();
        assert!(matches!(err, TensorError::Allocation { .. }));
    }

    #[test]
    #[should_panic]
    fn test_second_writer_panics() {
        let s = Storage::from_vec(vec![1, 2, 3]);
        let _w = s.borrow_mut();
        let _second = s.borrow_mut();
    }
}
