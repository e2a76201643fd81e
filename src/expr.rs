//! Lazy expression nodes.
//!
//! Every node holds its operands by value (usually references or other
//! nodes) and computes an element only when [`VecExpr::read`] or
//! [`MatExpr::read`] asks for it. Building a tree allocates nothing; the
//! tree is walked once per element by whatever consumes it.
//!
//! Shapes are checked when a node is built, so a tree that exists is always
//! well formed. Nodes are `Copy` whenever their operands are.

use num_traits::Zero;

use crate::{MatExpr, Scalar, VecExpr};

#[inline]
fn assert_same_size(op: &str, a: usize, b: usize) {
    assert_eq!(a, b, "shape mismatch: {op} of size {a} and size {b}");
}

#[inline]
fn assert_same_shape(op: &str, a: (usize, usize), b: (usize, usize)) {
    assert_eq!(
        a, b,
        "shape mismatch: {op} of {}x{} and {}x{}",
        a.0, a.1, b.0, b.1
    );
}

// ============================================================================
// Vector nodes
// ============================================================================

/// Elementwise `a + b`.
#[derive(Debug, Clone, Copy)]
pub struct VecSum<A, B> {
    a: A,
    b: B,
}

impl<A, B> VecSum<A, B>
where
    A: VecExpr,
    B: VecExpr<Elem = A::Elem>,
{
    /// # Panics
    /// Panics if the sizes differ.
    pub fn new(a: A, b: B) -> Self {
        assert_same_size("sum", a.size(), b.size());
        Self { a, b }
    }
}

impl<A, B> VecExpr for VecSum<A, B>
where
    A: VecExpr,
    A::Elem: Scalar,
    B: VecExpr<Elem = A::Elem>,
{
    type Elem = A::Elem;

    #[inline]
    fn size(&self) -> usize {
        self.a.size()
    }

    #[inline]
    fn read(&self, i: usize) -> A::Elem {
        self.a.read(i) + self.b.read(i)
    }
}

/// Elementwise `a - b`.
#[derive(Debug, Clone, Copy)]
pub struct VecDiff<A, B> {
    a: A,
    b: B,
}

impl<A, B> VecDiff<A, B>
where
    A: VecExpr,
    B: VecExpr<Elem = A::Elem>,
{
    /// # Panics
    /// Panics if the sizes differ.
    pub fn new(a: A, b: B) -> Self {
        assert_same_size("difference", a.size(), b.size());
        Self { a, b }
    }
}

impl<A, B> VecExpr for VecDiff<A, B>
where
    A: VecExpr,
    A::Elem: Scalar,
    B: VecExpr<Elem = A::Elem>,
{
    type Elem = A::Elem;

    #[inline]
    fn size(&self) -> usize {
        self.a.size()
    }

    #[inline]
    fn read(&self, i: usize) -> A::Elem {
        self.a.read(i) - self.b.read(i)
    }
}

/// `s * a`, elementwise.
#[derive(Debug, Clone, Copy)]
pub struct VecScale<S, A> {
    s: S,
    a: A,
}

impl<S: Scalar, A: VecExpr<Elem = S>> VecScale<S, A> {
    pub fn new(s: S, a: A) -> Self {
        Self { s, a }
    }
}

impl<S: Scalar, A: VecExpr<Elem = S>> VecExpr for VecScale<S, A> {
    type Elem = S;

    #[inline]
    fn size(&self) -> usize {
        self.a.size()
    }

    #[inline]
    fn read(&self, i: usize) -> S {
        self.s * self.a.read(i)
    }
}

/// Matrix-vector product `a * x`.
///
/// Each read is a dot product of one row of `a` with `x`, so reading the
/// whole node costs `rows * cols` multiplications.
#[derive(Debug, Clone, Copy)]
pub struct MatVec<A, X> {
    a: A,
    x: X,
}

impl<A, X> MatVec<A, X>
where
    A: MatExpr,
    X: VecExpr<Elem = A::Elem>,
{
    /// # Panics
    /// Panics unless `a.cols() == x.size()`.
    pub fn new(a: A, x: X) -> Self {
        assert_eq!(
            a.cols(),
            x.size(),
            "shape mismatch: {}x{} matrix times vector of size {}",
            a.rows(),
            a.cols(),
            x.size()
        );
        Self { a, x }
    }
}

impl<A, X> VecExpr for MatVec<A, X>
where
    A: MatExpr,
    A::Elem: Scalar,
    X: VecExpr<Elem = A::Elem>,
{
    type Elem = A::Elem;

    #[inline]
    fn size(&self) -> usize {
        self.a.rows()
    }

    fn read(&self, i: usize) -> A::Elem {
        assert!(
            i < self.a.rows(),
            "index out of range: {i} for size {}",
            self.a.rows()
        );
        let mut acc = A::Elem::zero();
        for k in 0..self.a.cols() {
            acc = acc + self.a.read(i, k) * self.x.read(k);
        }
        acc
    }
}

// ============================================================================
// Matrix nodes
// ============================================================================

/// Elementwise `a + b`.
#[derive(Debug, Clone, Copy)]
pub struct MatSum<A, B> {
    a: A,
    b: B,
}

impl<A, B> MatSum<A, B>
where
    A: MatExpr,
    B: MatExpr<Elem = A::Elem>,
{
    /// # Panics
    /// Panics if the shapes differ.
    pub fn new(a: A, b: B) -> Self {
        assert_same_shape("sum", a.shape(), b.shape());
        Self { a, b }
    }
}

impl<A, B> MatExpr for MatSum<A, B>
where
    A: MatExpr,
    A::Elem: Scalar,
    B: MatExpr<Elem = A::Elem>,
{
    type Elem = A::Elem;

    #[inline]
    fn rows(&self) -> usize {
        self.a.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.a.cols()
    }

    #[inline]
    fn read(&self, i: usize, j: usize) -> A::Elem {
        self.a.read(i, j) + self.b.read(i, j)
    }
}

/// Elementwise `a - b`.
#[derive(Debug, Clone, Copy)]
pub struct MatDiff<A, B> {
    a: A,
    b: B,
}

impl<A, B> MatDiff<A, B>
where
    A: MatExpr,
    B: MatExpr<Elem = A::Elem>,
{
    /// # Panics
    /// Panics if the shapes differ.
    pub fn new(a: A, b: B) -> Self {
        assert_same_shape("difference", a.shape(), b.shape());
        Self { a, b }
    }
}

impl<A, B> MatExpr for MatDiff<A, B>
where
    A: MatExpr,
    A::Elem: Scalar,
    B: MatExpr<Elem = A::Elem>,
{
    type Elem = A::Elem;

    #[inline]
    fn rows(&self) -> usize {
        self.a.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.a.cols()
    }

    #[inline]
    fn read(&self, i: usize, j: usize) -> A::Elem {
        self.a.read(i, j) - self.b.read(i, j)
    }
}

/// `s * a`, elementwise.
#[derive(Debug, Clone, Copy)]
pub struct MatScale<S, A> {
    s: S,
    a: A,
}

impl<S: Scalar, A: MatExpr<Elem = S>> MatScale<S, A> {
    pub fn new(s: S, a: A) -> Self {
        Self { s, a }
    }
}

impl<S: Scalar, A: MatExpr<Elem = S>> MatExpr for MatScale<S, A> {
    type Elem = S;

    #[inline]
    fn rows(&self) -> usize {
        self.a.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.a.cols()
    }

    #[inline]
    fn read(&self, i: usize, j: usize) -> S {
        self.s * self.a.read(i, j)
    }
}

/// `a` with rows and columns swapped.
#[derive(Debug, Clone, Copy)]
pub struct MatTranspose<A> {
    a: A,
}

impl<A: MatExpr> MatTranspose<A> {
    pub fn new(a: A) -> Self {
        Self { a }
    }
}

impl<A: MatExpr> MatExpr for MatTranspose<A> {
    type Elem = A::Elem;

    #[inline]
    fn rows(&self) -> usize {
        self.a.cols()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.a.rows()
    }

    #[inline]
    fn read(&self, i: usize, j: usize) -> A::Elem {
        self.a.read(j, i)
    }
}

/// Matrix product `a * b`.
///
/// No blocking or reordering: each read walks one row of `a` and one column
/// of `b`.
#[derive(Debug, Clone, Copy)]
pub struct MatMul<A, B> {
    a: A,
    b: B,
}

impl<A, B> MatMul<A, B>
where
    A: MatExpr,
    B: MatExpr<Elem = A::Elem>,
{
    /// # Panics
    /// Panics unless `a.cols() == b.rows()`.
    pub fn new(a: A, b: B) -> Self {
        assert_eq!(
            a.cols(),
            b.rows(),
            "shape mismatch: product of {}x{} and {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        );
        Self { a, b }
    }
}

impl<A, B> MatExpr for MatMul<A, B>
where
    A: MatExpr,
    A::Elem: Scalar,
    B: MatExpr<Elem = A::Elem>,
{
    type Elem = A::Elem;

    #[inline]
    fn rows(&self) -> usize {
        self.a.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.b.cols()
    }

    fn read(&self, i: usize, j: usize) -> A::Elem {
        // an empty inner dimension never reaches the operands' own checks
        assert!(
            i < self.a.rows() && j < self.b.cols(),
            "index out of range: ({i}, {j}) for {}x{} matrix",
            self.a.rows(),
            self.b.cols()
        );
        let mut acc = A::Elem::zero();
        for k in 0..self.a.cols() {
            acc = acc + self.a.read(i, k) * self.b.read(k, j);
        }
        acc
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Lazy transpose of `a`.
pub fn transpose<A: MatExpr>(a: A) -> MatTranspose<A> {
    MatTranspose::new(a)
}

/// Lazy `s * a` for any vector expression.
pub fn scale<S: Scalar, A: VecExpr<Elem = S>>(s: S, a: A) -> VecScale<S, A> {
    VecScale::new(s, a)
}

/// Lazy `s * a` for any matrix expression.
pub fn mat_scale<S: Scalar, A: MatExpr<Elem = S>>(s: S, a: A) -> MatScale<S, A> {
    MatScale::new(s, a)
}

/// Lazy matrix-vector product.
///
/// # Panics
/// Panics unless `a.cols() == x.size()`.
pub fn matvec<A, X>(a: A, x: X) -> MatVec<A, X>
where
    A: MatExpr,
    X: VecExpr<Elem = A::Elem>,
{
    MatVec::new(a, x)
}
