pub mod vector;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorError {
    #[error("a vector requires at least one coordinate")]
    Empty,
    #[error("'{0}' is not a valid decimal number")]
    InvalidNumber(String),
    #[error("decimal arithmetic overflow")]
    Overflow,
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("cross product requires dimension 3, got {0}")]
    UnsupportedDimension(usize),
    #[error("cannot normalize the zero vector")]
    ZeroVector,
    #[error("angle is undefined for a zero-magnitude vector")]
    ZeroMagnitude,
}

pub type Result<T> = std::result::Result<T, VectorError>;

// Re-export main types for convenience
pub use vector::{Multiplicand, Vector};
