//! Homogeneous 3D: points, planes, Plücker lines and 4×4 maps.
//!
//! Purpose
//! - Specialize the metric layer to 4-vectors and 4×4 matrices: line
//!   coordinates, plane constructions, metric-aware translations and
//!   reflections, isometry decomposition, and the Euclidean camera matrices
//!   used by renderers.
//!
//! Conventions
//! - `Point3`/`Plane3` are `[x, y, z, w]` and `[A, B, C, D]` with
//!   `A x + B y + C z + D w = 0`.
//! - `Line3` holds the 2×2 minors `(01, 02, 03, 12, 13, 23)` of two stacked
//!   points.
//! - `Mat4` is row-major and acts on column vectors from the left.
//! - Slice inputs are length-checked; outputs are fixed-size arrays.
//!
//! Code cross-refs: `crate::pn` (canonical points, polarity), `crate::rn`
//! (basis completion).

use nalgebra::Matrix4;

use crate::error::{KernelError, Result};

mod isometry;
mod lines;
mod maps;

pub use isometry::{
    compose_matrix_from_factors, extract_orientation_matrix, factor_matrix,
    get_transformed_absolute, is_isometry, Factors,
};
pub use lines::{
    line_from_points, line_intersect_plane, lines_intersect, perpendicular_bisector,
    plane_from_direction_and_point, plane_from_points, plane_parallel_to_passing_through,
    plucker_pairing,
};
pub use maps::{
    make_frustum_matrix, make_look_at_matrix, make_perspective_matrix, make_reflection_matrix,
    make_rotation_matrix, make_rotation_matrix_about, make_stretch_matrix,
    make_translation_matrix, make_translation_matrix_between, Frustum,
};

pub type Point3 = [f64; 4];
pub type Plane3 = [f64; 4];
pub type Line3 = [f64; 6];
pub type Mat4 = [f64; 16];

pub const ORIGIN: Point3 = [0.0, 0.0, 0.0, 1.0];

#[rustfmt::skip]
pub const IDENTITY: Mat4 = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

#[inline]
pub(crate) fn as4(op: &'static str, v: &[f64]) -> Result<[f64; 4]> {
    v.try_into().map_err(|_| KernelError::size(op, 4, v.len()))
}

#[inline]
pub(crate) fn as6(op: &'static str, v: &[f64]) -> Result<[f64; 6]> {
    v.try_into().map_err(|_| KernelError::size(op, 6, v.len()))
}

#[inline]
pub(crate) fn as16(op: &'static str, m: &[f64]) -> Result<Mat4> {
    m.try_into().map_err(|_| KernelError::size(op, 16, m.len()))
}

/// `a · b`.
pub(crate) fn mul4(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [0.0; 16];
    for i in 0..4 {
        for j in 0..4 {
            out[i * 4 + j] = (0..4).map(|k| a[i * 4 + k] * b[k * 4 + j]).sum();
        }
    }
    out
}

/// `m · v` without dehomogenization.
pub(crate) fn apply4(m: &Mat4, v: &[f64; 4]) -> [f64; 4] {
    let mut out = [0.0; 4];
    for (i, o) in out.iter_mut().enumerate() {
        *o = crate::rn::dot(&m[i * 4..i * 4 + 4], v);
    }
    out
}

/// Bridge to nalgebra for callers that mix the two representations.
pub fn to_matrix4(m: &Mat4) -> Matrix4<f64> {
    Matrix4::from_row_slice(m)
}

pub fn from_matrix4(m: &Matrix4<f64>) -> Mat4 {
    let mut out = [0.0; 16];
    for i in 0..4 {
        for j in 0..4 {
            out[i * 4 + j] = m[(i, j)];
        }
    }
    out
}
