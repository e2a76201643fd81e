//! Matrix views with a leading distance.
//!
//! A [`MatrixView`] is a `rows x cols` window over a borrowed buffer. The
//! window is made of contiguous lines (rows for row-major, columns for
//! column-major) whose starts are `dist` elements apart, so a view can
//! describe a block of a larger matrix without copying.
//!
//! Metadata transformations ([`block`](MatrixView::block),
//! [`row`](MatrixView::row), [`col`](MatrixView::col),
//! [`t`](MatrixView::t)) never touch the data.

use std::ops::{Index, IndexMut, Range};

use log::debug;

use crate::matrix::Matrix;
use crate::order::validate_matrix;
use crate::view::{VectorView, VectorViewMut};
use crate::{MatExpr, MinimathError, Order, Result, Scalar};

// ============================================================================
// Kernels shared with Matrix
// ============================================================================

/// Geometry of a matrix window inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub rows: usize,
    pub cols: usize,
    pub dist: usize,
    pub order: Order,
    pub offset: usize,
}

impl Layout {
    #[inline]
    pub fn dense(rows: usize, cols: usize, order: Order) -> Self {
        Self {
            rows,
            cols,
            dist: order.dense_dist(rows, cols),
            order,
            offset: 0,
        }
    }

    /// Buffer position of `(i, j)`, panicking outside the declared shape.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index out of range: ({i}, {j}) for {}x{} matrix",
            self.rows,
            self.cols
        );
        self.offset + self.order.offset(i, j, self.dist)
    }

    /// Buffer position of `(i, j)`, or the out-of-range error.
    #[inline]
    pub fn try_index(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.rows || j >= self.cols {
            return Err(MinimathError::MatrixIndexOutOfRange {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.offset + self.order.offset(i, j, self.dist))
    }

    pub fn block(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        assert!(
            rows.start <= rows.end && rows.end <= self.rows,
            "row range {rows:?} out of range for {} rows",
            self.rows
        );
        assert!(
            cols.start <= cols.end && cols.end <= self.cols,
            "column range {cols:?} out of range for {} columns",
            self.cols
        );
        Self {
            rows: rows.len(),
            cols: cols.len(),
            dist: self.dist,
            order: self.order,
            offset: self.offset + self.order.offset(rows.start, cols.start, self.dist),
        }
    }

    /// `(size, dist, offset)` of row `i` as a vector window.
    pub fn row(&self, i: usize) -> (usize, usize, usize) {
        assert!(
            i < self.rows,
            "row {i} out of range for {} rows",
            self.rows
        );
        let (row_stride, col_stride) = self.order.strides(self.dist);
        (self.cols, col_stride, self.offset + i * row_stride)
    }

    /// `(size, dist, offset)` of column `j` as a vector window.
    pub fn col(&self, j: usize) -> (usize, usize, usize) {
        assert!(
            j < self.cols,
            "column {j} out of range for {} columns",
            self.cols
        );
        let (row_stride, col_stride) = self.order.strides(self.dist);
        (self.rows, row_stride, self.offset + j * col_stride)
    }

    /// Same elements, rows and columns swapped.
    pub fn transposed(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            dist: self.dist,
            order: self.order.flip(),
            offset: self.offset,
        }
    }
}

/// Evaluate `e` into every position of `layout`, walking in storage order.
///
/// The caller has already checked the shapes.
pub(crate) fn assign_layout<T, E>(data: &mut [T], layout: &Layout, e: &E)
where
    E: MatExpr<Elem = T>,
{
    let Layout {
        rows,
        cols,
        dist,
        order,
        offset,
    } = *layout;
    if rows == 0 || cols == 0 {
        return;
    }
    match order {
        Order::RowMajor => {
            for i in 0..rows {
                let line = offset + i * dist;
                for (j, slot) in data[line..line + cols].iter_mut().enumerate() {
                    *slot = e.read(i, j);
                }
            }
        }
        Order::ColMajor => {
            for j in 0..cols {
                let line = offset + j * dist;
                for (i, slot) in data[line..line + rows].iter_mut().enumerate() {
                    *slot = e.read(i, j);
                }
            }
        }
    }
}

pub(crate) fn fill_layout<T: Copy>(data: &mut [T], layout: &Layout, value: T) {
    let (lines, run) = layout.order.lines(layout.rows, layout.cols);
    if run == 0 {
        return;
    }
    for k in 0..lines {
        let line = layout.offset + k * layout.dist;
        data[line..line + run].fill(value);
    }
}

pub(crate) fn check_shape<E: MatExpr>(layout: &Layout, e: &E) -> Result<()> {
    if (layout.rows, layout.cols) != e.shape() {
        debug!(
            "matrix shape mismatch: {}x{} vs {}x{}",
            layout.rows,
            layout.cols,
            e.rows(),
            e.cols()
        );
        return Err(MinimathError::ShapeMismatch(
            vec![layout.rows, layout.cols],
            vec![e.rows(), e.cols()],
        ));
    }
    Ok(())
}

pub(crate) fn assert_shape<E: MatExpr>(layout: &Layout, e: &E) {
    assert!(
        (layout.rows, layout.cols) == e.shape(),
        "shape mismatch: assigning {}x{} to {}x{}",
        e.rows(),
        e.cols(),
        layout.rows,
        layout.cols
    );
}

// ============================================================================
// MatrixView
// ============================================================================

/// An immutable matrix window over a borrowed buffer.
///
/// # Example
/// ```
/// use minimath::{MatExpr, MatrixView, Order};
///
/// let data: Vec<f64> = (0..12).map(|x| x as f64).collect();
/// // 3x4 row-major
/// let a = MatrixView::new(&data, 3, 4, 4, Order::RowMajor).unwrap();
/// // lower-right 2x2 block, no copy
/// let b = a.block(1..3, 2..4);
/// assert_eq!(b.read(0, 0), 6.0);
/// assert_eq!(b.read(1, 1), 11.0);
/// ```
pub struct MatrixView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

impl<T> Clone for MatrixView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatrixView<'_, T> {}

impl<T> std::fmt::Debug for MatrixView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixView")
            .field("rows", &self.layout.rows)
            .field("cols", &self.layout.cols)
            .field("dist", &self.layout.dist)
            .field("order", &self.layout.order)
            .field("offset", &self.layout.offset)
            .finish()
    }
}

impl<'a, T> MatrixView<'a, T> {
    /// Create a `rows x cols` view with leading distance `dist` over `data`.
    ///
    /// # Errors
    /// - [`MinimathError::InvalidDistance`] if `dist` is shorter than a line.
    /// - [`MinimathError::InvalidView`] if the window does not fit `data`.
    pub fn new(data: &'a [T], rows: usize, cols: usize, dist: usize, order: Order) -> Result<Self> {
        validate_matrix(data.len(), rows, cols, dist, order, 0)?;
        Ok(Self::from_layout(
            data,
            Layout {
                rows,
                cols,
                dist,
                order,
                offset: 0,
            },
        ))
    }

    #[inline]
    pub(crate) fn from_layout(data: &'a [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.layout.rows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.layout.cols
    }

    /// Leading distance between lines.
    #[inline]
    pub fn dist(&self) -> usize {
        self.layout.dist
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.layout.order
    }

    /// Position of element `(0, 0)` in the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.rows == 0 || self.layout.cols == 0
    }

    /// Sub-matrix of the given row and column ranges.
    ///
    /// # Panics
    /// Panics if either range exceeds the view's shape.
    pub fn block(&self, rows: Range<usize>, cols: Range<usize>) -> MatrixView<'a, T> {
        MatrixView::from_layout(self.data, self.layout.block(rows, cols))
    }

    /// Row `i` as a vector view.
    pub fn row(&self, i: usize) -> VectorView<'a, T> {
        let (size, dist, offset) = self.layout.row(i);
        VectorView::from_parts(self.data, size, dist, offset)
    }

    /// Column `j` as a vector view.
    pub fn col(&self, j: usize) -> VectorView<'a, T> {
        let (size, dist, offset) = self.layout.col(j);
        VectorView::from_parts(self.data, size, dist, offset)
    }

    /// Zero-copy transpose: swaps the shape and flips the ordering.
    pub fn t(&self) -> MatrixView<'a, T> {
        MatrixView::from_layout(self.data, self.layout.transposed())
    }
}

impl<T: Copy> MatrixView<'_, T> {
    /// Element `(i, j)`, or [`MinimathError::MatrixIndexOutOfRange`].
    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        Ok(self.data[self.layout.try_index(i, j)?])
    }
}

impl<T: Scalar> MatrixView<'_, T> {
    /// Copy the viewed block into a new densely packed matrix of the same ordering.
    pub fn to_matrix(&self) -> Matrix<T> {
        Matrix::from_expr(*self, self.layout.order)
    }
}

impl<T: Copy> MatExpr for MatrixView<'_, T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.layout.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.layout.cols
    }

    #[inline]
    fn read(&self, i: usize, j: usize) -> T {
        self.data[self.layout.index(i, j)]
    }
}

impl<T> Index<(usize, usize)> for MatrixView<'_, T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[self.layout.index(i, j)]
    }
}

// ============================================================================
// MatrixViewMut
// ============================================================================

/// A mutable matrix window over a borrowed buffer.
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

impl<T> std::fmt::Debug for MatrixViewMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixViewMut")
            .field("rows", &self.layout.rows)
            .field("cols", &self.layout.cols)
            .field("dist", &self.layout.dist)
            .field("order", &self.layout.order)
            .field("offset", &self.layout.offset)
            .finish()
    }
}

impl<'a, T> MatrixViewMut<'a, T> {
    /// Create a mutable `rows x cols` view with leading distance `dist`.
    ///
    /// # Errors
    /// Same as [`MatrixView::new`].
    pub fn new(
        data: &'a mut [T],
        rows: usize,
        cols: usize,
        dist: usize,
        order: Order,
    ) -> Result<Self> {
        validate_matrix(data.len(), rows, cols, dist, order, 0)?;
        Ok(Self::from_layout(
            data,
            Layout {
                rows,
                cols,
                dist,
                order,
                offset: 0,
            },
        ))
    }

    #[inline]
    pub(crate) fn from_layout(data: &'a mut [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.layout.rows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.layout.cols
    }

    #[inline]
    pub fn dist(&self) -> usize {
        self.layout.dist
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.layout.order
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView::from_layout(&*self.data, self.layout)
    }

    /// Mutable sub-matrix, reborrowing this view.
    pub fn block_mut(&mut self, rows: Range<usize>, cols: Range<usize>) -> MatrixViewMut<'_, T> {
        let layout = self.layout.block(rows, cols);
        MatrixViewMut::from_layout(&mut *self.data, layout)
    }

    /// Like [`block_mut`](Self::block_mut), consuming the view to keep its lifetime.
    pub fn into_block(self, rows: Range<usize>, cols: Range<usize>) -> MatrixViewMut<'a, T> {
        let layout = self.layout.block(rows, cols);
        MatrixViewMut::from_layout(self.data, layout)
    }

    /// Row `i` as a mutable vector view.
    pub fn row_mut(&mut self, i: usize) -> VectorViewMut<'_, T> {
        let (size, dist, offset) = self.layout.row(i);
        VectorViewMut::from_parts(&mut *self.data, size, dist, offset)
    }

    /// Column `j` as a mutable vector view.
    pub fn col_mut(&mut self, j: usize) -> VectorViewMut<'_, T> {
        let (size, dist, offset) = self.layout.col(j);
        VectorViewMut::from_parts(&mut *self.data, size, dist, offset)
    }

    /// Mutable reference to `(i, j)`, or [`MinimathError::MatrixIndexOutOfRange`].
    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        let k = self.layout.try_index(i, j)?;
        Ok(&mut self.data[k])
    }
}

impl<T: Copy> MatrixViewMut<'_, T> {
    /// Element `(i, j)`, or [`MinimathError::MatrixIndexOutOfRange`].
    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        self.as_view().get(i, j)
    }

    /// Set `(i, j)`, or return the out-of-range error without writing.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        *self.get_mut(i, j)? = value;
        Ok(())
    }

    /// Write `value` into every viewed position.
    pub fn fill(&mut self, value: T) {
        fill_layout(&mut *self.data, &self.layout, value);
    }

    /// Evaluate `e` element by element into the viewed block.
    ///
    /// # Panics
    /// Panics if `e.shape()` differs from the view's shape.
    pub fn assign<E: MatExpr<Elem = T>>(&mut self, e: E) {
        assert_shape(&self.layout, &e);
        assign_layout(&mut *self.data, &self.layout, &e);
    }

    /// Like [`assign`](Self::assign), but reports a shape mismatch as
    /// [`MinimathError::ShapeMismatch`] before writing anything.
    pub fn try_assign<E: MatExpr<Elem = T>>(&mut self, e: E) -> Result<()> {
        check_shape(&self.layout, &e)?;
        assign_layout(&mut *self.data, &self.layout, &e);
        Ok(())
    }
}

impl<T: Copy> MatExpr for MatrixViewMut<'_, T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.layout.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.layout.cols
    }

    #[inline]
    fn read(&self, i: usize, j: usize) -> T {
        self.data[self.layout.index(i, j)]
    }
}

impl<T> Index<(usize, usize)> for MatrixViewMut<'_, T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[self.layout.index(i, j)]
    }
}

impl<T> IndexMut<(usize, usize)> for MatrixViewMut<'_, T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let k = self.layout.index(i, j);
        &mut self.data[k]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(n: usize) -> Vec<f64> {
        (0..n).map(|x| x as f64).collect()
    }

    #[test]
    fn test_row_major_view() {
        let data = counting(6);
        let a = MatrixView::new(&data, 2, 3, 3, Order::RowMajor).unwrap();
        // [[0, 1, 2], [3, 4, 5]]
        assert_eq!(a.shape(), (2, 3));
        assert_eq!(a.read(0, 2), 2.0);
        assert_eq!(a.read(1, 0), 3.0);
        assert_eq!(a[(1, 2)], 5.0);
    }

    #[test]
    fn test_col_major_view() {
        let data = counting(6);
        let a = MatrixView::new(&data, 2, 3, 2, Order::ColMajor).unwrap();
        // [[0, 2, 4], [1, 3, 5]]
        assert_eq!(a.read(0, 1), 2.0);
        assert_eq!(a.read(1, 0), 1.0);
        assert_eq!(a.read(1, 2), 5.0);
    }

    #[test]
    fn test_new_rejects_short_dist() {
        let data = counting(6);
        assert_eq!(
            MatrixView::new(&data, 2, 3, 2, Order::RowMajor).unwrap_err(),
            MinimathError::InvalidDistance { dist: 2, run: 3 }
        );
    }

    #[test]
    fn test_new_rejects_small_buffer() {
        let data = counting(5);
        assert_eq!(
            MatrixView::new(&data, 2, 3, 3, Order::RowMajor).unwrap_err(),
            MinimathError::InvalidView {
                required: 6,
                available: 5
            }
        );
    }

    #[test]
    fn test_padded_rows() {
        // 2x2 matrix stored with a distance of 3; the padding is never read
        let data = [1.0, 2.0, -1.0, 3.0, 4.0];
        let a = MatrixView::new(&data, 2, 2, 3, Order::RowMajor).unwrap();
        assert_eq!(a.read(1, 0), 3.0);
        assert_eq!(a.read(1, 1), 4.0);
    }

    #[test]
    fn test_block() {
        let data = counting(12);
        let a = MatrixView::new(&data, 3, 4, 4, Order::RowMajor).unwrap();
        let b = a.block(1..3, 1..3);
        assert_eq!(b.shape(), (2, 2));
        assert_eq!(b.dist(), 4);
        assert_eq!(b.read(0, 0), 5.0);
        assert_eq!(b.read(0, 1), 6.0);
        assert_eq!(b.read(1, 0), 9.0);
        assert_eq!(b.read(1, 1), 10.0);
    }

    #[test]
    fn test_block_col_major() {
        let data = counting(12);
        // 3x4 column-major: element (i, j) = j * 3 + i
        let a = MatrixView::new(&data, 3, 4, 3, Order::ColMajor).unwrap();
        let b = a.block(1..3, 2..4);
        assert_eq!(b.read(0, 0), 7.0);
        assert_eq!(b.read(1, 1), 11.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_block_out_of_range() {
        let data = counting(12);
        let a = MatrixView::new(&data, 3, 4, 4, Order::RowMajor).unwrap();
        a.block(0..4, 0..1);
    }

    #[test]
    fn test_row_and_col() {
        let data = counting(12);
        let a = MatrixView::new(&data, 3, 4, 4, Order::RowMajor).unwrap();
        assert_eq!(a.row(1).iter().collect::<Vec<_>>(), vec![4.0, 5.0, 6.0, 7.0]);
        assert_eq!(a.col(2).iter().collect::<Vec<_>>(), vec![2.0, 6.0, 10.0]);

        let at = a.t();
        assert_eq!(at.row(2).iter().collect::<Vec<_>>(), vec![2.0, 6.0, 10.0]);
    }

    #[test]
    fn test_transpose_view() {
        let data = counting(6);
        let a = MatrixView::new(&data, 2, 3, 3, Order::RowMajor).unwrap();
        let t = a.t();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.order(), Order::ColMajor);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t.read(j, i), a.read(i, j));
            }
        }
        let tt = t.t();
        assert_eq!(tt.order(), Order::RowMajor);
        assert_eq!(tt.read(1, 2), 5.0);
    }

    #[test]
    fn test_get_out_of_range() {
        let data = counting(12);
        let a = MatrixView::new(&data, 3, 4, 4, Order::RowMajor).unwrap();
        let b = a.block(0..2, 0..2);
        assert_eq!(b.get(1, 1), Ok(5.0));
        // (0, 2) is inside the buffer but outside the block
        assert_eq!(
            b.get(0, 2),
            Err(MinimathError::MatrixIndexOutOfRange {
                row: 0,
                col: 2,
                rows: 2,
                cols: 2
            })
        );
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_read_out_of_range() {
        let data = counting(12);
        let a = MatrixView::new(&data, 3, 4, 4, Order::RowMajor).unwrap();
        a.block(0..2, 0..2).read(2, 0);
    }

    #[test]
    fn test_view_mut_fill_block() {
        let mut data = vec![0.0; 12];
        {
            let mut a = MatrixViewMut::new(&mut data, 3, 4, 4, Order::RowMajor).unwrap();
            a.block_mut(1..3, 1..3).fill(1.0);
        }
        assert_eq!(
            data,
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_view_mut_assign_transpose() {
        let src = counting(6);
        let a = MatrixView::new(&src, 2, 3, 3, Order::RowMajor).unwrap();
        let mut data = vec![0.0; 6];
        {
            let mut b = MatrixViewMut::new(&mut data, 3, 2, 2, Order::RowMajor).unwrap();
            b.assign(a.t());
        }
        // [[0, 3], [1, 4], [2, 5]]
        assert_eq!(data, vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_view_mut_try_assign_mismatch() {
        let src = counting(6);
        let a = MatrixView::new(&src, 2, 3, 3, Order::RowMajor).unwrap();
        let mut data = vec![0.0; 6];
        let mut b = MatrixViewMut::new(&mut data, 2, 3, 3, Order::RowMajor).unwrap();
        assert_eq!(
            b.try_assign(a.t()),
            Err(MinimathError::ShapeMismatch(vec![2, 3], vec![3, 2]))
        );
        assert!(data.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_view_mut_row_col() {
        let mut data = vec![0.0; 6];
        let mut a = MatrixViewMut::new(&mut data, 2, 3, 2, Order::ColMajor).unwrap();
        a.row_mut(1).fill(1.0);
        a.col_mut(0).fill(2.0);
        a[(0, 2)] = 3.0;
        a.set(0, 1, 4.0).unwrap();
        assert!(a.set(2, 0, 5.0).is_err());
        // column-major storage of [[2, 4, 3], [2, 1, 1]]
        assert_eq!(data, vec![2.0, 2.0, 4.0, 1.0, 3.0, 1.0]);
    }

    #[test]
    fn test_to_matrix() {
        let data = counting(12);
        let a = MatrixView::new(&data, 3, 4, 4, Order::RowMajor).unwrap();
        let m = a.block(1..3, 2..4).to_matrix();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.dist(), 2);
        assert_eq!(m.as_slice(), &[6.0, 7.0, 10.0, 11.0]);
    }
}
