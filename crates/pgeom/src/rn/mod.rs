//! Generic linear algebra on flat `f64` buffers (no notion of metric).
//!
//! Purpose
//! - Dimension-agnostic vector and square-matrix routines shared by the
//!   projective layers: arithmetic, norms, products, determinants, inverse,
//!   basis completion.
//!
//! Buffers
//! - Vectors are slices; matrices are row-major slices of length n².
//! - Allocating forms return a fresh `Vec<f64>`; `_into` forms write into a
//!   caller buffer of the exact result length; `_in_place` forms update their
//!   operand. Shape problems are reported as `KernelError`, never truncated.
//!
//! Code cross-refs: `crate::pn` (metric layer), `crate::p3` (3D layer).

mod det;
mod matrix;
mod vector;

pub use det::{adjugate, cofactor, complete_basis, determinant, submatrix};
pub use matrix::{
    apply_linear, apply_linear_into, apply_projective, apply_projective_into, bilinear_form,
    conjugate_by_matrix, diagonal_matrix, format_matrix, identity_matrix, is_identity_matrix,
    matrix_order, matrix_times_vector, permutation_matrix, times, times_into, trace, transpose,
    try_inverse,
};
pub use vector::{
    abs, add, add_into, average, cross_product, equals, euclidean_angle, euclidean_distance,
    euclidean_norm, euclidean_norm_squared, inner_product, is_nan, is_zero, linear_combination,
    linear_combination_into, manhattan_norm, manhattan_norm_distance, max_norm, negate, normalize,
    normalize_in_place, project_onto, project_onto_complement, set_euclidean_norm, subtract,
    subtract_into, times_scalar, times_scalar_in_place,
};

pub(crate) use vector::{check_len, cross3, divide_by_last, dot};
