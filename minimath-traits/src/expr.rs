//! Element access contracts for vector-like and matrix-like values.
//!
//! A type takes part in expression composition by exposing its shape and an
//! indexed read. Containers, views and lazy expression nodes all implement
//! the same contract, so expressions nest to any depth and are evaluated
//! element by element only when something consumes them.
//!
//! Dispatch is static: composition goes through generic parameters bounded
//! by these traits, never through trait objects.

/// Read access to a one-dimensional sequence of elements.
///
/// # Contract
/// - `read(i)` is defined for `0 <= i < size()`.
/// - `read` must not have side effects on the underlying data.
/// - Implementations panic with an "index out of range" message when `i` is
///   outside `[0, size())`, before touching any memory.
pub trait VecExpr {
    /// Element type produced by [`read`](VecExpr::read).
    type Elem: Copy;

    /// Number of logical elements.
    fn size(&self) -> usize;

    /// Element at logical position `i`.
    fn read(&self, i: usize) -> Self::Elem;
}

/// Read access to a two-dimensional grid of elements.
///
/// # Contract
/// - `read(i, j)` is defined for `0 <= i < rows()` and `0 <= j < cols()`.
/// - `read` must not have side effects on the underlying data.
/// - Implementations panic with an "index out of range" message when the
///   index pair is outside the declared shape, before touching any memory.
pub trait MatExpr {
    /// Element type produced by [`read`](MatExpr::read).
    type Elem: Copy;

    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Element at row `i`, column `j`.
    fn read(&self, i: usize, j: usize) -> Self::Elem;

    /// Returns `(rows, cols)`.
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }
}

impl<E: VecExpr + ?Sized> VecExpr for &E {
    type Elem = E::Elem;

    #[inline]
    fn size(&self) -> usize {
        (**self).size()
    }

    #[inline]
    fn read(&self, i: usize) -> E::Elem {
        (**self).read(i)
    }
}

impl<E: MatExpr + ?Sized> MatExpr for &E {
    type Elem = E::Elem;

    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn read(&self, i: usize, j: usize) -> E::Elem {
        (**self).read(i, j)
    }
}
