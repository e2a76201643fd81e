//! Shared traits for the minimath crates.
//!
//! This crate provides the element access contracts that every vector-like
//! and matrix-like value implements: owning containers, borrowed views and
//! lazy expression nodes alike.
//!
//! External crates (for example a binding layer exposing vectors to a host
//! environment) can depend on `minimath-traits` to implement the contracts
//! for their own types without orphan rule violations.

pub mod expr;
pub mod scalar;

pub use expr::{MatExpr, VecExpr};
pub use scalar::Scalar;
