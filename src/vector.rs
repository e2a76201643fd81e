//! Owning contiguous vector.

use std::ops::{Index, IndexMut};

use log::{debug, trace};

use crate::view::{assign_strided, shape_mismatch, VectorIter, VectorView, VectorViewMut};
use crate::{MinimathError, Result, Scalar, VecExpr};

/// A contiguous, owned vector of `size` elements.
///
/// Copying is explicit (`clone` duplicates the buffer). Moving transfers the
/// buffer; `std::mem::take` leaves an empty vector behind.
///
/// # Example
/// ```
/// use minimath::Vector;
///
/// let x = Vector::from_fn(4, |i| i as f64);
/// let mut y = Vector::new(4);
/// y.assign(&x + &x);
/// assert_eq!(y.as_slice(), &[0.0, 2.0, 4.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T: Scalar> Vector<T> {
    /// Allocate a vector of `size` zeros.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![T::zero(); size],
        }
    }

    /// Allocate a vector of `size` zeros, reporting allocation failure
    /// instead of aborting.
    ///
    /// # Errors
    /// Returns [`MinimathError::Allocation`] if the buffer cannot be reserved.
    pub fn try_new(size: usize) -> Result<Self> {
        let mut data = Vec::new();
        if data.try_reserve_exact(size).is_err() {
            debug!("vector allocation of {size} elements failed");
            return Err(MinimathError::Allocation { elements: size });
        }
        data.resize(size, T::zero());
        Ok(Self { data })
    }

    /// Create a vector with values produced by a function of the index.
    pub fn from_fn(size: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: (0..size).map(f).collect(),
        }
    }

    /// Copy the elements of a slice.
    pub fn from_slice(values: &[T]) -> Self {
        Self {
            data: values.to_vec(),
        }
    }

    /// Materialize an expression: allocate once and evaluate every element.
    pub fn from_expr<E: VecExpr<Elem = T>>(e: E) -> Self {
        let size = e.size();
        trace!("materializing vector expression of size {size}");
        Self {
            data: (0..size).map(|i| e.read(i)).collect(),
        }
    }

    /// Write `value` into every element.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Evaluate `e` element by element into this vector.
    ///
    /// # Panics
    /// Panics if `e.size() != len()`.
    pub fn assign<E: VecExpr<Elem = T>>(&mut self, e: E) {
        assert_eq!(
            self.data.len(),
            e.size(),
            "shape mismatch: assigning size {} to size {}",
            e.size(),
            self.data.len()
        );
        let size = self.data.len();
        assign_strided(&mut self.data, 0, 1, size, &e);
    }

    /// Like [`assign`](Self::assign), but reports a size mismatch as
    /// [`MinimathError::ShapeMismatch`] before writing anything.
    pub fn try_assign<E: VecExpr<Elem = T>>(&mut self, e: E) -> Result<()> {
        let size = self.data.len();
        if size != e.size() {
            return Err(shape_mismatch(size, e.size()));
        }
        assign_strided(&mut self.data, 0, 1, size, &e);
        Ok(())
    }

    /// Set element `i`, or return [`MinimathError::IndexOutOfRange`] without writing.
    pub fn set(&mut self, i: usize, value: T) -> Result<()> {
        *self.get_mut(i)? = value;
        Ok(())
    }
}

impl<T> Vector<T> {
    /// Take ownership of an existing buffer.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Give up the buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Element `i`, or [`MinimathError::IndexOutOfRange`].
    pub fn get(&self, i: usize) -> Result<T>
    where
        T: Copy,
    {
        self.data
            .get(i)
            .copied()
            .ok_or(MinimathError::IndexOutOfRange {
                index: i,
                size: self.data.len(),
            })
    }

    /// Mutable reference to element `i`, or [`MinimathError::IndexOutOfRange`].
    pub fn get_mut(&mut self, i: usize) -> Result<&mut T> {
        let size = self.data.len();
        self.data
            .get_mut(i)
            .ok_or(MinimathError::IndexOutOfRange { index: i, size })
    }

    /// Immutable view of the whole vector.
    pub fn view(&self) -> VectorView<'_, T> {
        VectorView::from_parts(&self.data, self.data.len(), 1, 0)
    }

    /// Mutable view of the whole vector.
    pub fn view_mut(&mut self) -> VectorViewMut<'_, T> {
        let size = self.data.len();
        VectorViewMut::from_parts(&mut self.data, size, 1, 0)
    }

    /// View of `[first, next)`.
    ///
    /// # Panics
    /// Panics unless `first <= next <= len()`.
    pub fn range(&self, first: usize, next: usize) -> VectorView<'_, T> {
        self.view().range(first, next)
    }

    /// View of every `step`-th element starting at `first`.
    ///
    /// # Panics
    /// Panics if `step == 0` or `first > len()`.
    pub fn slice(&self, first: usize, step: usize) -> VectorView<'_, T> {
        self.view().slice(first, step)
    }

    /// Mutable view of `[first, next)`; writes go to this vector.
    ///
    /// # Panics
    /// Panics unless `first <= next <= len()`.
    pub fn range_mut(&mut self, first: usize, next: usize) -> VectorViewMut<'_, T> {
        self.view_mut().into_range(first, next)
    }

    /// Mutable view of every `step`-th element starting at `first`; writes
    /// go to this vector.
    ///
    /// # Panics
    /// Panics if `step == 0` or `first > len()`.
    pub fn slice_mut(&mut self, first: usize, step: usize) -> VectorViewMut<'_, T> {
        self.view_mut().into_slice(first, step)
    }
}

impl<T: Copy> Vector<T> {
    /// Iterate over the elements by value.
    pub fn iter(&self) -> VectorIter<'_, T> {
        self.view().iter()
    }
}

impl<T: Copy> VecExpr for Vector<T> {
    type Elem = T;

    #[inline]
    fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn read(&self, i: usize) -> T {
        self[i]
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        assert!(
            i < self.data.len(),
            "index out of range: {i} for size {}",
            self.data.len()
        );
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        assert!(
            i < self.data.len(),
            "index out of range: {i} for size {}",
            self.data.len()
        );
        &mut self.data[i]
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
