//! Matrix ordering and the offset arithmetic shared by matrices and views.
//!
//! A matrix stores `rows x cols` elements as a sequence of contiguous runs
//! ("lines"): rows for [`Order::RowMajor`], columns for [`Order::ColMajor`].
//! Successive lines start `dist` elements apart, so `dist` larger than the
//! line length describes a sub-matrix of a bigger buffer.

use crate::{MinimathError, Result};

/// Linear addressing convention of a matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Row-major: last index varies fastest.
    #[default]
    RowMajor,
    /// Column-major: first index varies fastest.
    ColMajor,
}

impl Order {
    /// The other ordering.
    #[inline]
    pub fn flip(self) -> Order {
        match self {
            Order::RowMajor => Order::ColMajor,
            Order::ColMajor => Order::RowMajor,
        }
    }

    /// `(lines, run)` for a `rows x cols` matrix: the number of contiguous
    /// runs and the length of each.
    #[inline]
    pub fn lines(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Order::RowMajor => (rows, cols),
            Order::ColMajor => (cols, rows),
        }
    }

    /// Leading distance of a densely packed `rows x cols` matrix.
    #[inline]
    pub fn dense_dist(self, rows: usize, cols: usize) -> usize {
        self.lines(rows, cols).1
    }

    /// `(row_stride, col_stride)` in elements for leading distance `dist`.
    #[inline]
    pub fn strides(self, dist: usize) -> (usize, usize) {
        match self {
            Order::RowMajor => (dist, 1),
            Order::ColMajor => (1, dist),
        }
    }

    /// Linear offset of element `(i, j)` relative to the first element.
    #[inline]
    pub fn offset(self, i: usize, j: usize, dist: usize) -> usize {
        match self {
            Order::RowMajor => i * dist + j,
            Order::ColMajor => j * dist + i,
        }
    }
}

/// Number of buffer elements spanned by a `rows x cols` matrix with leading
/// distance `dist`: `dist * (lines - 1) + run`, or 0 when empty.
///
/// Every valid `(i, j)` maps to an offset strictly below this value.
/// Returns `None` if the span does not fit in `usize`.
#[inline]
pub fn extent(rows: usize, cols: usize, dist: usize, order: Order) -> Option<usize> {
    let (lines, run) = order.lines(rows, cols);
    if lines == 0 || run == 0 {
        return Some(0);
    }
    dist.checked_mul(lines - 1)?.checked_add(run)
}

/// Number of buffer elements spanned by `size` elements spaced `dist` apart,
/// or `None` on overflow.
#[inline]
pub fn vec_extent(size: usize, dist: usize) -> Option<usize> {
    if size == 0 {
        Some(0)
    } else {
        dist.checked_mul(size - 1)?.checked_add(1)
    }
}

fn overflow(len: usize) -> MinimathError {
    MinimathError::InvalidView {
        required: usize::MAX,
        available: len,
    }
}

/// Validate that a matrix window starting at `offset` stays within `len`.
pub(crate) fn validate_matrix(
    len: usize,
    rows: usize,
    cols: usize,
    dist: usize,
    order: Order,
    offset: usize,
) -> Result<()> {
    let (lines, run) = order.lines(rows, cols);
    if lines > 1 && dist < run {
        return Err(MinimathError::InvalidDistance { dist, run });
    }
    let span = extent(rows, cols, dist, order).ok_or_else(|| overflow(len))?;
    if span == 0 {
        return Ok(());
    }
    let required = offset.checked_add(span).ok_or_else(|| overflow(len))?;
    if required > len {
        return Err(MinimathError::InvalidView {
            required,
            available: len,
        });
    }
    Ok(())
}

/// Validate that a vector window starting at `offset` stays within `len`.
pub(crate) fn validate_vector(len: usize, size: usize, dist: usize, offset: usize) -> Result<()> {
    let span = vec_extent(size, dist).ok_or_else(|| overflow(len))?;
    if span == 0 {
        return Ok(());
    }
    let required = offset.checked_add(span).ok_or_else(|| overflow(len))?;
    if required > len {
        return Err(MinimathError::InvalidView {
            required,
            available: len,
        });
    }
    Ok(())
}
