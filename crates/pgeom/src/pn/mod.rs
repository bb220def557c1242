//! Metric-generic projective layer over homogeneous coordinates.
//!
//! Purpose
//! - One implementation of each geometric formula (distance, interpolation,
//!   dragging, tangent projection, polarity) shared by Euclidean, elliptic
//!   and hyperbolic geometry; the [`Metric`] argument selects the sign of the
//!   homogeneous term of the bilinear form.
//!
//! Conventions
//! - The homogeneous coordinate is the last slot. `|w| <= 1e-10` is ideal and
//!   never divided by.
//! - All points passed to a single call must use the same metric.
//! - Degenerate inputs (null vectors, coincident points, points on the
//!   absolute) fall back to documented results instead of failing; shape
//!   problems are `KernelError`s.

mod metric;
mod ops;

pub use metric::{Metric, ParseMetricError};
pub use ops::{
    angle_between_planes, dehomogenize, dehomogenize_in_place, dehomogenize_into,
    distance_between, drag_towards, homogenize, inner_product, is_proper_point,
    linear_interpolation, midpoint, norm, norm_squared, normalize, normalize_in_place,
    normalize_plane, polarize, polarize_plane, polarize_point, project_to_tangent_space,
};
pub use crate::rn::{abs, complete_basis, is_zero, manhattan_norm};

pub(crate) use ops::canonical_point;

#[cfg(test)]
mod tests;
