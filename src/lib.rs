//! Dense vectors and matrices with lazy, composable arithmetic.
//!
//! Arithmetic on vectors and matrices does not compute anything. It builds a
//! small expression value (sum, difference, scale, transpose, product) that
//! holds its operands and computes each element on demand. The expression is
//! evaluated in a single pass, without intermediate buffers, when it is
//! assigned into a container or view, reduced with [`dot`], or rendered.
//!
//! # Core Types
//!
//! - [`Vector`] / [`Matrix`]: Owning containers over a contiguous buffer
//! - [`VectorView`] / [`VectorViewMut`]: Strided windows over a borrowed buffer
//! - [`MatrixView`] / [`MatrixViewMut`]: Sub-matrix windows with a leading distance
//! - [`VecExpr`] / [`MatExpr`]: The element access contract all of the above implement
//! - Expression nodes: [`VecSum`], [`VecDiff`], [`VecScale`], [`MatVec`],
//!   [`MatSum`], [`MatDiff`], [`MatScale`], [`MatTranspose`], [`MatMul`]
//!
//! # Example
//!
//! ```rust
//! use minimath::{dot, Vector};
//!
//! let x = Vector::from_fn(10, |i| i as f64);
//! let mut y = Vector::new(10);
//! y.fill(10.0);
//!
//! // Nothing is computed until the expression is materialized.
//! let z = Vector::from_expr(&x + 3.0 * &y);
//! assert_eq!(z[0], 30.0);
//! assert_eq!(z[9], 39.0);
//! assert_eq!(dot(&x, &x), 285.0);
//!
//! // Views alias the container's buffer.
//! let mut x = x;
//! x.range_mut(2, 9).fill(3.0);
//! x.slice_mut(1, 5).fill(10.0);
//! assert_eq!(x.to_string(), "0, 10, 3, 3, 3, 3, 10, 3, 3, 9");
//! ```
//!
//! # Errors
//!
//! Out-of-range element access through `get`/`get_mut`/`set` is reported as
//! [`MinimathError`]. Shape mismatches between operands are programming
//! errors: operators and `assign` panic, while `try_assign` and [`try_dot`]
//! return [`MinimathError::ShapeMismatch`] for callers that need to translate
//! the failure.

mod bytes;
pub mod expr;
mod matrix;
pub mod matrix_view;
mod ops;
pub mod order;
mod render;
mod vector;
pub mod view;

// ============================================================================
// Element access contract
// ============================================================================
pub use minimath_traits::{MatExpr, Scalar, VecExpr};

// ============================================================================
// Containers and views
// ============================================================================
pub use matrix::Matrix;
pub use matrix_view::{MatrixView, MatrixViewMut};
pub use order::Order;
pub use vector::Vector;
pub use view::{VectorIter, VectorView, VectorViewMut};

// ============================================================================
// Expressions and reductions
// ============================================================================
pub use expr::{
    mat_scale, matvec, scale, transpose, MatDiff, MatMul, MatScale, MatSum, MatTranspose, MatVec,
    VecDiff, VecScale, VecSum,
};
pub use ops::{dot, try_dot};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during vector and matrix operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MinimathError {
    /// Vector index past the end.
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Matrix index pair outside the declared shape.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    MatrixIndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Operand shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// A view's declared extent does not fit the borrowed buffer.
    #[error("view needs {required} elements but the buffer holds {available}")]
    InvalidView { required: usize, available: usize },

    /// A view's distance is smaller than its contiguous run.
    #[error("distance {dist} is smaller than the contiguous run of {run} elements")]
    InvalidDistance { dist: usize, run: usize },

    /// The element buffer could not be allocated.
    #[error("failed to allocate {elements} elements")]
    Allocation { elements: usize },

    /// Raw bytes do not match the recorded element count.
    #[error("expected {expected} bytes, got {actual}")]
    ByteLength { expected: usize, actual: usize },
}

/// Result type for vector and matrix operations.
pub type Result<T> = std::result::Result<T, MinimathError>;
