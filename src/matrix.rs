//! Owning dense matrix.

use std::ops::{Index, IndexMut, Range};

use log::{debug, trace};

use crate::matrix_view::{
    assert_shape, assign_layout, check_shape, fill_layout, Layout, MatrixView, MatrixViewMut,
};
use crate::view::{VectorView, VectorViewMut};
use crate::{MatExpr, MinimathError, Order, Result, Scalar, VecExpr};

/// A densely packed, owned `rows x cols` matrix.
///
/// The leading distance is derived from the ordering: `cols` for row-major,
/// `rows` for column-major. Blocks, rows and columns are available as views
/// that borrow the matrix.
///
/// # Example
/// ```
/// use minimath::{transpose, Matrix, Order};
///
/// let a = Matrix::from_fn(2, 3, Order::RowMajor, |i, j| (i * 3 + j) as f64);
/// let at = Matrix::from_expr(transpose(&a), Order::ColMajor);
/// assert_eq!(at.shape(), (3, 2));
/// assert_eq!(at[(2, 1)], 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    data: Vec<T>,
    layout: Layout,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            layout: Layout::dense(0, 0, Order::RowMajor),
        }
    }
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(MinimathError::Allocation {
        elements: usize::MAX,
    })
}

impl<T: Scalar> Matrix<T> {
    /// Allocate a `rows x cols` matrix of zeros with the given ordering.
    pub fn new(rows: usize, cols: usize, order: Order) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            layout: Layout::dense(rows, cols, order),
        }
    }

    /// Row-major matrix of zeros.
    pub fn row_major(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, Order::RowMajor)
    }

    /// Column-major matrix of zeros.
    pub fn col_major(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, Order::ColMajor)
    }

    /// Like [`new`](Self::new), reporting allocation failure instead of aborting.
    ///
    /// # Errors
    /// Returns [`MinimathError::Allocation`] if `rows * cols` overflows or
    /// the buffer cannot be reserved.
    pub fn try_new(rows: usize, cols: usize, order: Order) -> Result<Self> {
        let elements = element_count(rows, cols)?;
        let mut data = Vec::new();
        if data.try_reserve_exact(elements).is_err() {
            debug!("matrix allocation of {rows}x{cols} failed");
            return Err(MinimathError::Allocation { elements });
        }
        data.resize(elements, T::zero());
        Ok(Self {
            data,
            layout: Layout::dense(rows, cols, order),
        })
    }

    /// Create a matrix with values produced by a function of `(i, j)`.
    ///
    /// The function is called in storage order.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        order: Order,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        match order {
            Order::RowMajor => {
                for i in 0..rows {
                    for j in 0..cols {
                        data.push(f(i, j));
                    }
                }
            }
            Order::ColMajor => {
                for j in 0..cols {
                    for i in 0..rows {
                        data.push(f(i, j));
                    }
                }
            }
        }
        Self {
            data,
            layout: Layout::dense(rows, cols, order),
        }
    }

    /// Materialize an expression: allocate once and evaluate every element.
    pub fn from_expr<E: MatExpr<Elem = T>>(e: E, order: Order) -> Self {
        let (rows, cols) = e.shape();
        trace!("materializing {rows}x{cols} matrix expression");
        Self::from_fn(rows, cols, order, |i, j| e.read(i, j))
    }

    /// Write `value` into every element.
    pub fn fill(&mut self, value: T) {
        fill_layout(&mut self.data, &self.layout, value);
    }

    /// Evaluate `e` element by element into this matrix.
    ///
    /// # Panics
    /// Panics if `e.shape()` differs from `shape()`.
    pub fn assign<E: MatExpr<Elem = T>>(&mut self, e: E) {
        assert_shape(&self.layout, &e);
        assign_layout(&mut self.data, &self.layout, &e);
    }

    /// Like [`assign`](Self::assign), but reports a shape mismatch as
    /// [`MinimathError::ShapeMismatch`] before writing anything.
    pub fn try_assign<E: MatExpr<Elem = T>>(&mut self, e: E) -> Result<()> {
        check_shape(&self.layout, &e)?;
        assign_layout(&mut self.data, &self.layout, &e);
        Ok(())
    }

    /// Set `(i, j)`, or return the out-of-range error without writing.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        *self.get_mut(i, j)? = value;
        Ok(())
    }
}

impl<T> Matrix<T> {
    /// Take ownership of a buffer laid out in `order`.
    ///
    /// # Errors
    /// Returns [`MinimathError::ShapeMismatch`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, order: Order, data: Vec<T>) -> Result<Self> {
        let elements = element_count(rows, cols)?;
        if data.len() != elements {
            debug!(
                "matrix buffer of {} elements does not fit {rows}x{cols}",
                data.len()
            );
            return Err(MinimathError::ShapeMismatch(
                vec![rows, cols],
                vec![data.len()],
            ));
        }
        Ok(Self {
            data,
            layout: Layout::dense(rows, cols, order),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.layout.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.layout.rows, self.layout.cols)
    }

    /// Leading distance between lines of storage.
    #[inline]
    pub fn dist(&self) -> usize {
        self.layout.dist
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.layout.order
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The buffer in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Give up the buffer (in storage order).
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Element `(i, j)`, or [`MinimathError::MatrixIndexOutOfRange`].
    pub fn get(&self, i: usize, j: usize) -> Result<T>
    where
        T: Copy,
    {
        Ok(self.data[self.layout.try_index(i, j)?])
    }

    /// Mutable reference to `(i, j)`, or [`MinimathError::MatrixIndexOutOfRange`].
    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        let k = self.layout.try_index(i, j)?;
        Ok(&mut self.data[k])
    }

    /// Immutable view of the whole matrix.
    pub fn view(&self) -> MatrixView<'_, T> {
        MatrixView::from_layout(&self.data, self.layout)
    }

    /// Mutable view of the whole matrix.
    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut::from_layout(&mut self.data, self.layout)
    }

    /// View of a sub-matrix.
    ///
    /// # Panics
    /// Panics if either range exceeds the matrix shape.
    pub fn block(&self, rows: Range<usize>, cols: Range<usize>) -> MatrixView<'_, T> {
        self.view().block(rows, cols)
    }

    /// Mutable view of a sub-matrix; writes go to this matrix.
    pub fn block_mut(&mut self, rows: Range<usize>, cols: Range<usize>) -> MatrixViewMut<'_, T> {
        self.view_mut().into_block(rows, cols)
    }

    /// Row `i` as a vector view.
    pub fn row(&self, i: usize) -> VectorView<'_, T> {
        self.view().row(i)
    }

    /// Column `j` as a vector view.
    pub fn col(&self, j: usize) -> VectorView<'_, T> {
        self.view().col(j)
    }

    /// Row `i` as a mutable vector view.
    pub fn row_mut(&mut self, i: usize) -> VectorViewMut<'_, T> {
        let (size, dist, offset) = self.layout.row(i);
        VectorViewMut::from_parts(&mut self.data, size, dist, offset)
    }

    /// Column `j` as a mutable vector view.
    pub fn col_mut(&mut self, j: usize) -> VectorViewMut<'_, T> {
        let (size, dist, offset) = self.layout.col(j);
        VectorViewMut::from_parts(&mut self.data, size, dist, offset)
    }

    /// Zero-copy transpose view.
    pub fn t(&self) -> MatrixView<'_, T> {
        self.view().t()
    }
}

impl<T: Scalar> Matrix<T> {
    /// Lazy matrix-vector product `self * x`.
    ///
    /// # Panics
    /// Panics if `x.size() != cols()`.
    pub fn mul_vec<X: VecExpr<Elem = T>>(&self, x: X) -> crate::MatVec<&Self, X> {
        crate::MatVec::new(self, x)
    }
}

impl<T: Copy> MatExpr for Matrix<T> {
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

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[self.layout.index(i, j)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let k = self.layout.index(i, j);
        &mut self.data[k]
    }
}
