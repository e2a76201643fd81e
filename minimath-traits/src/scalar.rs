//! Scalar type bounds for vector and matrix elements.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Trait bounds shared by every element type usable in containers and
/// expressions.
///
/// Blanket-implemented: anything with the arithmetic below qualifies,
/// including `f32`, `f64`, the primitive integers and
/// `num_complex::Complex<_>`. The accumulator of reductions starts from
/// [`num_traits::Zero::zero`].
pub trait Scalar:
    Copy
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + num_traits::Zero
    + num_traits::One
    + PartialEq
    + Debug
{
}

impl<T> Scalar for T where
    T: Copy
        + Send
        + Sync
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + num_traits::Zero
        + num_traits::One
        + PartialEq
        + Debug
{
}
