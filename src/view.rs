//! Strided vector views.
//!
//! [`VectorView`] and [`VectorViewMut`] are non-owning windows over a buffer:
//! `size` logical elements, `dist` buffer elements apart, starting at
//! `offset`. Ranges and slices are new views over the same buffer, so writes
//! through them land in the original storage.
//!
//! Overlapping views alias: a write through one is visible through any other
//! view of the same memory once the borrow checker lets both exist.

use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use log::debug;

use crate::order::validate_vector;
use crate::vector::Vector;
use crate::{MinimathError, Result, Scalar, VecExpr};

/// Write `e.read(i)` into `data[offset + i * dist]` for every `i`.
///
/// The caller has already checked that `e.size() == size`.
#[inline]
pub(crate) fn assign_strided<T, E>(data: &mut [T], offset: usize, dist: usize, size: usize, e: &E)
where
    E: VecExpr<Elem = T>,
{
    if dist == 1 {
        for (i, slot) in data[offset..offset + size].iter_mut().enumerate() {
            *slot = e.read(i);
        }
    } else {
        for i in 0..size {
            data[offset + i * dist] = e.read(i);
        }
    }
}

#[inline]
pub(crate) fn fill_strided<T: Copy>(data: &mut [T], offset: usize, dist: usize, size: usize, value: T) {
    for i in 0..size {
        data[offset + i * dist] = value;
    }
}

/// Length of `slice(first, step)` over `size` elements: `size / step`,
/// clamped to the positions `first, first + step, ...` below `size`.
#[inline]
pub(crate) fn slice_len(size: usize, first: usize, step: usize) -> usize {
    assert!(step > 0, "slice step must be positive");
    assert!(first <= size, "slice start {first} out of range for size {size}");
    (size / step).min((size - first).div_ceil(step))
}

#[inline]
fn check_range(first: usize, next: usize, size: usize) {
    assert!(
        first <= next && next <= size,
        "range {first}..{next} out of range for size {size}"
    );
}

pub(crate) fn shape_mismatch(expected: usize, actual: usize) -> MinimathError {
    debug!("vector shape mismatch: {expected} vs {actual}");
    MinimathError::ShapeMismatch(vec![expected], vec![actual])
}

// ============================================================================
// VectorView
// ============================================================================

/// An immutable strided window over a borrowed buffer.
///
/// # Example
/// ```
/// use minimath::{VecExpr, VectorView};
///
/// let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// // every second element, starting at 1
/// let odd = VectorView::new(&data, 3, 2, 1).unwrap();
/// assert_eq!(odd.read(2), 5.0);
/// ```
pub struct VectorView<'a, T> {
    data: &'a [T],
    size: usize,
    dist: usize,
    offset: usize,
}

impl<T> Clone for VectorView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VectorView<'_, T> {}

impl<T> std::fmt::Debug for VectorView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorView")
            .field("size", &self.size)
            .field("dist", &self.dist)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, T> VectorView<'a, T> {
    /// Create a view of `size` elements spaced `dist` apart, starting at `offset`.
    ///
    /// # Errors
    /// Returns [`MinimathError::InvalidView`] if the last element would fall
    /// outside `data`.
    pub fn new(data: &'a [T], size: usize, dist: usize, offset: usize) -> Result<Self> {
        validate_vector(data.len(), size, dist, offset)?;
        Ok(Self::from_parts(data, size, dist, offset))
    }

    /// Caller guarantees the window fits `data`.
    #[inline]
    pub(crate) fn from_parts(data: &'a [T], size: usize, dist: usize, offset: usize) -> Self {
        Self {
            data,
            size,
            dist,
            offset,
        }
    }

    /// Number of logical elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Buffer elements between logically adjacent positions.
    #[inline]
    pub fn dist(&self) -> usize {
        self.dist
    }

    /// Position of logical element 0 in the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The whole borrowed buffer.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// The viewed elements as a slice, if they are contiguous.
    pub fn as_slice(&self) -> Option<&'a [T]> {
        if self.size == 0 {
            Some(&[])
        } else if self.dist == 1 || self.size == 1 {
            Some(&self.data[self.offset..self.offset + self.size])
        } else {
            None
        }
    }

    /// View of the logical sub-range `[first, next)`.
    ///
    /// # Panics
    /// Panics unless `first <= next <= len()`.
    pub fn range(&self, first: usize, next: usize) -> VectorView<'a, T> {
        check_range(first, next, self.size);
        VectorView::from_parts(
            self.data,
            next - first,
            self.dist,
            self.offset + first * self.dist,
        )
    }

    /// View of every `step`-th element starting at `first`.
    ///
    /// # Panics
    /// Panics if `step == 0` or `first > len()`.
    pub fn slice(&self, first: usize, step: usize) -> VectorView<'a, T> {
        let size = slice_len(self.size, first, step);
        VectorView::from_parts(
            self.data,
            size,
            self.dist * step,
            self.offset + first * self.dist,
        )
    }

    #[inline]
    fn slot(&self, i: usize) -> &'a T {
        assert!(
            i < self.size,
            "index out of range: {i} for size {}",
            self.size
        );
        &self.data[self.offset + i * self.dist]
    }
}

impl<'a, T: Copy> VectorView<'a, T> {
    /// Element `i`, or [`MinimathError::IndexOutOfRange`].
    pub fn get(&self, i: usize) -> Result<T> {
        if i >= self.size {
            return Err(MinimathError::IndexOutOfRange {
                index: i,
                size: self.size,
            });
        }
        Ok(self.data[self.offset + i * self.dist])
    }

    /// Iterate over the viewed elements in logical order.
    pub fn iter(&self) -> VectorIter<'a, T> {
        VectorIter {
            view: *self,
            front: 0,
            back: self.size,
        }
    }
}

impl<T: Scalar> VectorView<'_, T> {
    /// Copy the viewed elements into a new contiguous vector.
    pub fn to_vector(&self) -> Vector<T> {
        Vector::from_expr(*self)
    }
}

impl<T: Copy> VecExpr for VectorView<'_, T> {
    type Elem = T;

    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn read(&self, i: usize) -> T {
        *self.slot(i)
    }
}

impl<T> Index<usize> for VectorView<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        self.slot(i)
    }
}

// ============================================================================
// VectorIter
// ============================================================================

/// Iterator over the elements of a [`VectorView`].
#[derive(Debug, Clone)]
pub struct VectorIter<'a, T> {
    view: VectorView<'a, T>,
    front: usize,
    back: usize,
}

impl<T: Copy> Iterator for VectorIter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let v = self.view.read(self.front);
        self.front += 1;
        Some(v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<T: Copy> DoubleEndedIterator for VectorIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.view.read(self.back))
    }
}

impl<T: Copy> ExactSizeIterator for VectorIter<'_, T> {}

impl<T: Copy> FusedIterator for VectorIter<'_, T> {}

// ============================================================================
// VectorViewMut
// ============================================================================

/// A mutable strided window over a borrowed buffer.
///
/// Assignment through the view ([`fill`](Self::fill),
/// [`assign`](Self::assign)) writes into the borrowed buffer at the strided
/// positions and leaves every other element untouched.
pub struct VectorViewMut<'a, T> {
    data: &'a mut [T],
    size: usize,
    dist: usize,
    offset: usize,
}

impl<T> std::fmt::Debug for VectorViewMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorViewMut")
            .field("size", &self.size)
            .field("dist", &self.dist)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, T> VectorViewMut<'a, T> {
    /// Create a mutable view of `size` elements spaced `dist` apart, starting
    /// at `offset`.
    ///
    /// # Errors
    /// Returns [`MinimathError::InvalidView`] if the last element would fall
    /// outside `data`.
    pub fn new(data: &'a mut [T], size: usize, dist: usize, offset: usize) -> Result<Self> {
        validate_vector(data.len(), size, dist, offset)?;
        Ok(Self::from_parts(data, size, dist, offset))
    }

    #[inline]
    pub(crate) fn from_parts(data: &'a mut [T], size: usize, dist: usize, offset: usize) -> Self {
        Self {
            data,
            size,
            dist,
            offset,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn dist(&self) -> usize {
        self.dist
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> VectorView<'_, T> {
        VectorView::from_parts(&*self.data, self.size, self.dist, self.offset)
    }

    /// Immutable view of `[first, next)`.
    pub fn range(&self, first: usize, next: usize) -> VectorView<'_, T> {
        self.as_view().range(first, next)
    }

    /// Immutable view of every `step`-th element starting at `first`.
    pub fn slice(&self, first: usize, step: usize) -> VectorView<'_, T> {
        self.as_view().slice(first, step)
    }

    /// Mutable view of `[first, next)`, reborrowing this view.
    ///
    /// # Panics
    /// Panics unless `first <= next <= len()`.
    pub fn range_mut(&mut self, first: usize, next: usize) -> VectorViewMut<'_, T> {
        check_range(first, next, self.size);
        VectorViewMut::from_parts(
            &mut *self.data,
            next - first,
            self.dist,
            self.offset + first * self.dist,
        )
    }

    /// Mutable view of every `step`-th element starting at `first`,
    /// reborrowing this view.
    ///
    /// # Panics
    /// Panics if `step == 0` or `first > len()`.
    pub fn slice_mut(&mut self, first: usize, step: usize) -> VectorViewMut<'_, T> {
        let size = slice_len(self.size, first, step);
        VectorViewMut::from_parts(
            &mut *self.data,
            size,
            self.dist * step,
            self.offset + first * self.dist,
        )
    }

    /// Like [`range_mut`](Self::range_mut), consuming the view to keep its lifetime.
    pub fn into_range(self, first: usize, next: usize) -> VectorViewMut<'a, T> {
        check_range(first, next, self.size);
        VectorViewMut::from_parts(
            self.data,
            next - first,
            self.dist,
            self.offset + first * self.dist,
        )
    }

    /// Like [`slice_mut`](Self::slice_mut), consuming the view to keep its lifetime.
    pub fn into_slice(self, first: usize, step: usize) -> VectorViewMut<'a, T> {
        let size = slice_len(self.size, first, step);
        VectorViewMut::from_parts(
            self.data,
            size,
            self.dist * step,
            self.offset + first * self.dist,
        )
    }

    /// Mutable reference to element `i`, or [`MinimathError::IndexOutOfRange`].
    pub fn get_mut(&mut self, i: usize) -> Result<&mut T> {
        if i >= self.size {
            return Err(MinimathError::IndexOutOfRange {
                index: i,
                size: self.size,
            });
        }
        Ok(&mut self.data[self.offset + i * self.dist])
    }

    #[inline]
    fn slot_mut(&mut self, i: usize) -> &mut T {
        assert!(
            i < self.size,
            "index out of range: {i} for size {}",
            self.size
        );
        &mut self.data[self.offset + i * self.dist]
    }
}

impl<T: Copy> VectorViewMut<'_, T> {
    /// Element `i`, or [`MinimathError::IndexOutOfRange`].
    pub fn get(&self, i: usize) -> Result<T> {
        self.as_view().get(i)
    }

    /// Set element `i`, or return [`MinimathError::IndexOutOfRange`] without writing.
    pub fn set(&mut self, i: usize, value: T) -> Result<()> {
        *self.get_mut(i)? = value;
        Ok(())
    }

    /// Write `value` into every viewed position.
    pub fn fill(&mut self, value: T) {
        fill_strided(&mut *self.data, self.offset, self.dist, self.size, value);
    }

    /// Evaluate `e` element by element into the viewed positions.
    ///
    /// # Panics
    /// Panics if `e.size() != len()`.
    pub fn assign<E: VecExpr<Elem = T>>(&mut self, e: E) {
        assert_eq!(
            self.size,
            e.size(),
            "shape mismatch: assigning size {} to size {}",
            e.size(),
            self.size
        );
        assign_strided(&mut *self.data, self.offset, self.dist, self.size, &e);
    }

    /// Like [`assign`](Self::assign), but reports a size mismatch as
    /// [`MinimathError::ShapeMismatch`] before writing anything.
    pub fn try_assign<E: VecExpr<Elem = T>>(&mut self, e: E) -> Result<()> {
        if self.size != e.size() {
            return Err(shape_mismatch(self.size, e.size()));
        }
        assign_strided(&mut *self.data, self.offset, self.dist, self.size, &e);
        Ok(())
    }
}

impl<T: Copy> VecExpr for VectorViewMut<'_, T> {
    type Elem = T;

    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn read(&self, i: usize) -> T {
        self.as_view().read(i)
    }
}

impl<T> Index<usize> for VectorViewMut<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        assert!(
            i < self.size,
            "index out of range: {i} for size {}",
            self.size
        );
        &self.data[self.offset + i * self.dist]
    }
}

impl<T> IndexMut<usize> for VectorViewMut<'_, T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        self.slot_mut(i)
    }
}

// ============================================================================
// Tests
// ============================================================================
