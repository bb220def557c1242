//! Shape errors shared by all kernel layers.
//!
//! Degenerate numerical input (zero vectors, ideal points, coincident points)
//! is not an error; those cases have documented fallbacks at each call site.

use std::fmt;

/// Error type shared by all kernel routines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// Operand lengths are incompatible with the requested operation.
    SizeMismatch {
        op: &'static str,
        expected: usize,
        found: usize,
    },
    /// A matrix buffer whose length is not a perfect square.
    NotSquare { op: &'static str, len: usize },
    /// The index list handed to `permutation_matrix` is not a permutation.
    BadPermutation { len: usize },
    /// A camera frustum with zero width, height or depth.
    EmptyFrustum,
}

impl KernelError {
    pub(crate) fn size(op: &'static str, expected: usize, found: usize) -> Self {
        Self::SizeMismatch {
            op,
            expected,
            found,
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch {
                op,
                expected,
                found,
            } => write!(f, "{op}: size mismatch (expected {expected}, found {found})"),
            Self::NotSquare { op, len } => {
                write!(f, "{op}: buffer of length {len} is not a square matrix")
            }
            Self::BadPermutation { len } => {
                write!(f, "permutation_matrix: indices are not a permutation of 0..{len}")
            }
            Self::EmptyFrustum => f.write_str("make_frustum_matrix: frustum has an empty extent"),
        }
    }
}

impl std::error::Error for KernelError {}

/// Result alias used throughout the kernel.
pub type Result<T> = std::result::Result<T, KernelError>;
