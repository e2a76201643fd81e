//! Operator overloads and reductions.
//!
//! `+`, `-` and matrix `*` build expression nodes from [`crate::expr`]; they
//! never evaluate. Left operands are references to containers, views, or
//! nodes by value; right operands can be anything that implements the
//! matching contract. Scalar-left `*` is available for the standard scalar
//! types; for other element types use [`scale`](crate::scale) and
//! [`mat_scale`](crate::mat_scale).

use std::ops::{Add, Mul, Sub};

use num_complex::{Complex32, Complex64};
use num_traits::Zero;

use crate::expr::{
    MatDiff, MatMul, MatScale, MatSum, MatTranspose, MatVec, VecDiff, VecScale, VecSum,
};
use crate::view::shape_mismatch;
use crate::{
    MatExpr, Matrix, MatrixView, MatrixViewMut, Result, Scalar, VecExpr, Vector, VectorView,
    VectorViewMut,
};

// ============================================================================
// Vector operators
// ============================================================================

macro_rules! impl_vec_arith {
    ($([$($gen:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*, Rhs> Add<Rhs> for $ty
            where
                $ty: VecExpr,
                <$ty as VecExpr>::Elem: Scalar,
                Rhs: VecExpr<Elem = <$ty as VecExpr>::Elem>,
            {
                type Output = VecSum<$ty, Rhs>;

                #[inline]
                fn add(self, rhs: Rhs) -> Self::Output {
                    VecSum::new(self, rhs)
                }
            }

            impl<$($gen)*, Rhs> Sub<Rhs> for $ty
            where
                $ty: VecExpr,
                <$ty as VecExpr>::Elem: Scalar,
                Rhs: VecExpr<Elem = <$ty as VecExpr>::Elem>,
            {
                type Output = VecDiff<$ty, Rhs>;

                #[inline]
                fn sub(self, rhs: Rhs) -> Self::Output {
                    VecDiff::new(self, rhs)
                }
            }
        )*
    };
}

impl_vec_arith!(
    ['a, T: Scalar] &'a Vector<T>,
    ['a, T: Scalar] VectorView<'a, T>,
    ['a, 'b, T: Scalar] &'a VectorViewMut<'b, T>,
    [A, B] VecSum<A, B>,
    [A, B] VecDiff<A, B>,
    [S, A] VecScale<S, A>,
    [A, X] MatVec<A, X>,
);

// ============================================================================
// Matrix operators
// ============================================================================

macro_rules! impl_mat_arith {
    ($([$($gen:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*, Rhs> Add<Rhs> for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: Scalar,
                Rhs: MatExpr<Elem = <$ty as MatExpr>::Elem>,
            {
                type Output = MatSum<$ty, Rhs>;

                #[inline]
                fn add(self, rhs: Rhs) -> Self::Output {
                    MatSum::new(self, rhs)
                }
            }

            impl<$($gen)*, Rhs> Sub<Rhs> for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: Scalar,
                Rhs: MatExpr<Elem = <$ty as MatExpr>::Elem>,
            {
                type Output = MatDiff<$ty, Rhs>;

                #[inline]
                fn sub(self, rhs: Rhs) -> Self::Output {
                    MatDiff::new(self, rhs)
                }
            }

            impl<$($gen)*, Rhs> Mul<Rhs> for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: Scalar,
                Rhs: MatExpr<Elem = <$ty as MatExpr>::Elem>,
            {
                type Output = MatMul<$ty, Rhs>;

                #[inline]
                fn mul(self, rhs: Rhs) -> Self::Output {
                    MatMul::new(self, rhs)
                }
            }
        )*
    };
}

impl_mat_arith!(
    ['a, T: Scalar] &'a Matrix<T>,
    ['a, T: Scalar] MatrixView<'a, T>,
    ['a, 'b, T: Scalar] &'a MatrixViewMut<'b, T>,
    [A, B] MatSum<A, B>,
    [A, B] MatDiff<A, B>,
    [S, A] MatScale<S, A>,
    [A] MatTranspose<A>,
    [A, B] MatMul<A, B>,
);

// ============================================================================
// Scalar-left multiplication
// ============================================================================

// Containers and views name the element type so that an unsuffixed literal
// like `3.0 * &y` resolves from the operand alone.
macro_rules! impl_scalar_left {
    (@vec $s:ty, [$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*> Mul<$ty> for $s
        where
            $ty: VecExpr<Elem = $s>,
        {
            type Output = VecScale<$s, $ty>;

            #[inline]
            fn mul(self, rhs: $ty) -> Self::Output {
                VecScale::new(self, rhs)
            }
        }
    };
    (@mat $s:ty, [$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*> Mul<$ty> for $s
        where
            $ty: MatExpr<Elem = $s>,
        {
            type Output = MatScale<$s, $ty>;

            #[inline]
            fn mul(self, rhs: $ty) -> Self::Output {
                MatScale::new(self, rhs)
            }
        }
    };
    ($($s:ty),* $(,)?) => {
        $(
            impl_scalar_left!(@vec $s, ['a] &'a Vector<$s>);
            impl_scalar_left!(@vec $s, ['a] VectorView<'a, $s>);
            impl_scalar_left!(@vec $s, ['a, 'b] &'a VectorViewMut<'b, $s>);
            impl_scalar_left!(@vec $s, [A, B] VecSum<A, B>);
            impl_scalar_left!(@vec $s, [A, B] VecDiff<A, B>);
            impl_scalar_left!(@vec $s, [S, A] VecScale<S, A>);
            impl_scalar_left!(@vec $s, [A, X] MatVec<A, X>);

            impl_scalar_left!(@mat $s, ['a] &'a Matrix<$s>);
            impl_scalar_left!(@mat $s, ['a] MatrixView<'a, $s>);
            impl_scalar_left!(@mat $s, ['a, 'b] &'a MatrixViewMut<'b, $s>);
            impl_scalar_left!(@mat $s, [A, B] MatSum<A, B>);
            impl_scalar_left!(@mat $s, [A, B] MatDiff<A, B>);
            impl_scalar_left!(@mat $s, [S, A] MatScale<S, A>);
            impl_scalar_left!(@mat $s, [A] MatTranspose<A>);
            impl_scalar_left!(@mat $s, [A, B] MatMul<A, B>);
        )*
    };
}

impl_scalar_left!(f32, f64, i32, i64, Complex32, Complex64);

// ============================================================================
// Reductions
// ============================================================================

/// Inner product `sum_i a(i) * b(i)`, accumulated from zero in index order.
///
/// No conjugation is applied to complex operands.
///
/// # Panics
/// Panics if the sizes differ.
///
/// # Example
/// ```
/// use minimath::{dot, Vector};
///
/// let x = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// assert_eq!(dot(&x, x.range(0, 3)), 14.0);
/// ```
pub fn dot<A, B>(a: A, b: B) -> A::Elem
where
    A: VecExpr,
    A::Elem: Scalar,
    B: VecExpr<Elem = A::Elem>,
{
    assert_eq!(
        a.size(),
        b.size(),
        "shape mismatch: dot of size {} and size {}",
        a.size(),
        b.size()
    );
    accumulate(&a, &b)
}

/// Like [`dot`], but reports a size mismatch as
/// [`MinimathError::ShapeMismatch`](crate::MinimathError::ShapeMismatch).
pub fn try_dot<A, B>(a: A, b: B) -> Result<A::Elem>
where
    A: VecExpr,
    A::Elem: Scalar,
    B: VecExpr<Elem = A::Elem>,
{
    if a.size() != b.size() {
        return Err(shape_mismatch(a.size(), b.size()));
    }
    Ok(accumulate(&a, &b))
}

#[inline]
fn accumulate<A, B>(a: &A, b: &B) -> A::Elem
where
    A: VecExpr,
    A::Elem: Scalar,
    B: VecExpr<Elem = A::Elem>,
{
    let mut acc = A::Elem::zero();
    for i in 0..a.size() {
        acc = acc + a.read(i) * b.read(i);
    }
    acc
}
