//! Text rendering of vectors, matrices and unevaluated expressions.
//!
//! Vectors render as `a, b, c`. Matrices render one row per line with the
//! row's elements written back to back and every row ending in `\n`.
//! Formatter options such as precision are forwarded to each element.

use std::fmt::{self, Display};

use crate::expr::{
    MatDiff, MatMul, MatScale, MatSum, MatTranspose, MatVec, VecDiff, VecScale, VecSum,
};
use crate::{MatExpr, Matrix, MatrixView, MatrixViewMut, VecExpr, Vector, VectorView, VectorViewMut};

pub(crate) fn write_vector<E>(e: &E, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    E: VecExpr,
    E::Elem: Display,
{
    for i in 0..e.size() {
        if i > 0 {
            f.write_str(", ")?;
        }
        e.read(i).fmt(f)?;
    }
    Ok(())
}

pub(crate) fn write_matrix<E>(e: &E, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    E: MatExpr,
    E::Elem: Display,
{
    for i in 0..e.rows() {
        for j in 0..e.cols() {
            e.read(i, j).fmt(f)?;
        }
        f.write_str("\n")?;
    }
    Ok(())
}

macro_rules! impl_display {
    (vec: $([$($gen:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> Display for $ty
            where
                $ty: VecExpr,
                <$ty as VecExpr>::Elem: Display,
            {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write_vector(self, f)
                }
            }
        )*
    };
    (mat: $([$($gen:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> Display for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: Display,
            {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write_matrix(self, f)
                }
            }
        )*
    };
}

impl_display!(vec:
    [T] Vector<T>,
    ['a, T] VectorView<'a, T>,
    ['a, T] VectorViewMut<'a, T>,
    [A, B] VecSum<A, B>,
    [A, B] VecDiff<A, B>,
    [S, A] VecScale<S, A>,
    [A, X] MatVec<A, X>,
);

impl_display!(mat:
    [T] Matrix<T>,
    ['a, T] MatrixView<'a, T>,
    ['a, T] MatrixViewMut<'a, T>,
    [A, B] MatSum<A, B>,
    [A, B] MatDiff<A, B>,
    [S, A] MatScale<S, A>,
    [A] MatTranspose<A>,
    [A, B] MatMul<A, B>,
);

#[cfg(test)]
mod tests {
    use crate::{transpose, Matrix, Order, Vector};

    #[test]
    fn test_vector_display() {
        let x = Vector::from_fn(4, |i| i as f64);
        assert_eq!(x.to_string(), "0, 1, 2, 3");
        assert_eq!(Vector::<f64>::new(0).to_string(), "");
        assert_eq!(x.slice(1, 2).to_string(), "1, 3");
    }

    #[test]
    fn test_expression_display() {
        let x = Vector::from_slice(&[1_i32, 2]);
        assert_eq!((&x + &x).to_string(), "2, 4");
        assert_eq!((3 * &x).to_string(), "3, 6");
    }

    #[test]
    fn test_precision_forwarded() {
        let x = Vector::from_slice(&[1.0, 0.5]);
        assert_eq!(format!("{x:.2}"), "1.00, 0.50");
    }

    #[test]
    fn test_matrix_display() {
        let a = Matrix::from_fn(2, 3, Order::ColMajor, |i, j| i * 3 + j);
        assert_eq!(a.to_string(), "012\n345\n");
        assert_eq!(transpose(&a).to_string(), "03\n14\n25\n");
        assert_eq!(a.block(1..2, 0..2).to_string(), "34\n");
    }

    #[test]
    fn test_matrix_display_padded() {
        let a = Matrix::from_fn(2, 2, Order::RowMajor, |i, j| (i + j) as f64);
        assert_eq!(format!("{a:4}"), "   0   1\n   1   2\n");
    }
}
