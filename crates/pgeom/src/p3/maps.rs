//! Translations, rotations, stretches, reflections and camera matrices.
//!
//! Translations are metric-aware: Euclidean translation is the affine shear
//! `[[I, x], [0, 1]]`, while elliptic/hyperbolic translation along the
//! geodesic from the origin is a rotation resp. boost of the quadric.

use super::{as4, mul4, Mat4, Plane3, IDENTITY};
use crate::cfg::NORM_EPS;
use crate::error::{KernelError, Result};
use crate::pn::{self, Metric};
use crate::rn::{self, cross3, dot};

/// The isometry taking `ORIGIN` to `p` along the geodesic between them.
///
/// - Euclidean: translation by the dehomogenized `p`.
/// - Elliptic/hyperbolic: for the unit representative `[x, w]` of `p` with
///   `w >= 0`, `[[I − m x xᵀ/(1 + w), x], [−m xᵀ, w]]`.
///
/// Points with no such isometry (Euclidean ideal points, hyperbolic points
/// outside the absolute, the zero vector) yield the identity.
pub fn make_translation_matrix(p: &[f64], metric: Metric) -> Result<Mat4> {
    let p = as4("make_translation_matrix", p)?;
    if !pn::is_proper_point(&p, metric) {
        tracing::debug!(%metric, ?p, "make_translation_matrix: no translation to this point");
        return Ok(IDENTITY);
    }
    let q = pn::canonical_point(&p, metric);
    let (x, w) = (&q[..3], q[3]);
    let mut out = IDENTITY;
    match metric {
        Metric::Euclidean => {
            for i in 0..3 {
                out[i * 4 + 3] = x[i];
            }
        }
        _ => {
            let m = metric.sign();
            for i in 0..3 {
                for j in 0..3 {
                    out[i * 4 + j] -= m * x[i] * x[j] / (1.0 + w);
                }
                out[i * 4 + 3] = x[i];
                out[12 + i] = -m * x[i];
            }
            out[15] = w;
        }
    }
    Ok(out)
}

/// Inverse of [`make_translation_matrix`]: the translation to the canonical
/// representative of `p` with its spatial part negated.
fn inverse_translation(p: &[f64; 4], metric: Metric) -> Result<Mat4> {
    if !pn::is_proper_point(p, metric) {
        return Ok(IDENTITY);
    }
    let mut q = pn::canonical_point(p, metric);
    for x in &mut q[..3] {
        *x = -*x;
    }
    make_translation_matrix(&q, metric)
}

/// The translation along the geodesic through `from` and `to` taking the
/// former to the latter.
///
/// `T(from) · T(T(from)⁻¹ · to) · T(from)⁻¹`; the geodesic is mapped into
/// itself. An improper `from` yields `T(to)`.
pub fn make_translation_matrix_between(from: &[f64], to: &[f64], metric: Metric) -> Result<Mat4> {
    let from = as4("make_translation_matrix_between", from)?;
    let to = as4("make_translation_matrix_between", to)?;
    let t_from = make_translation_matrix(&from, metric)?;
    let t_from_inv = inverse_translation(&from, metric)?;
    let local = make_translation_matrix(&super::apply4(&t_from_inv, &to), metric)?;
    Ok(mul4(&mul4(&t_from, &local), &t_from_inv))
}

/// Rotation by `angle` (right-handed) about the axis `axis = [x, y, z]`
/// through the origin. A zero axis yields the identity.
pub fn make_rotation_matrix(axis: &[f64], angle: f64) -> Result<Mat4> {
    rn::check_len("make_rotation_matrix", axis, 3)?;
    let len = rn::euclidean_norm(axis);
    if len < NORM_EPS {
        tracing::debug!("make_rotation_matrix: zero axis");
        return Ok(IDENTITY);
    }
    let k = [axis[0] / len, axis[1] / len, axis[2] / len];
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    #[rustfmt::skip]
    let out = [
        c + t * k[0] * k[0],        t * k[0] * k[1] - s * k[2], t * k[0] * k[2] + s * k[1], 0.0,
        t * k[1] * k[0] + s * k[2], c + t * k[1] * k[1],        t * k[1] * k[2] - s * k[0], 0.0,
        t * k[2] * k[0] - s * k[1], t * k[2] * k[1] + s * k[0], c + t * k[2] * k[2],        0.0,
        0.0,                        0.0,                        0.0,                        1.0,
    ];
    Ok(out)
}

/// Rotation by `angle` about the geodesic through `p1` and `p2`, oriented
/// from `p1` towards `p2`.
///
/// `p1` is moved to the origin, the rotation is applied about the image
/// direction of `p2`, and the result is conjugated back.
pub fn make_rotation_matrix_about(
    p1: &[f64],
    p2: &[f64],
    angle: f64,
    metric: Metric,
) -> Result<Mat4> {
    let a = as4("make_rotation_matrix_about", p1)?;
    let b = as4("make_rotation_matrix_about", p2)?;
    let to_origin = inverse_translation(&a, metric)?;
    let mut axis = super::apply4(&to_origin, &b);
    if axis[3] < 0.0 {
        rn::times_scalar_in_place(-1.0, &mut axis);
    }
    let rot = make_rotation_matrix(&axis[..3], angle)?;
    let back = make_translation_matrix(&a, metric)?;
    Ok(mul4(&mul4(&back, &rot), &to_origin))
}

/// `diag(sx, sy, sz, 1)`.
pub fn make_stretch_matrix(sx: f64, sy: f64, sz: f64) -> Mat4 {
    let mut out = IDENTITY;
    out[0] = sx;
    out[5] = sy;
    out[10] = sz;
    out
}

/// Reflection in `plane`: `I − 2 v Pᵀ / <P, P>` with `v` the pole of `P`.
///
/// A plane with vanishing norm (the Euclidean plane at infinity, a hyperbolic
/// plane tangent to the absolute) yields the identity.
pub fn make_reflection_matrix(plane: &[f64], metric: Metric) -> Result<Mat4> {
    let plane: Plane3 = as4("make_reflection_matrix", plane)?;
    let nn = pn::norm_squared(&plane, metric);
    if nn.abs() < NORM_EPS {
        tracing::debug!(%metric, "make_reflection_matrix: degenerate plane");
        return Ok(IDENTITY);
    }
    let pole = pn::polarize(&plane, metric);
    let mut out = IDENTITY;
    for i in 0..4 {
        for j in 0..4 {
            out[i * 4 + j] -= 2.0 * pole[i] * plane[j] / nn;
        }
    }
    Ok(out)
}

/// View volume of a perspective camera, in eye coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

/// OpenGL-style projection of `frustum` onto clip coordinates.
///
/// Empty extents (`left == right`, `bottom == top` or `near == far`) are
/// rejected with `EmptyFrustum`.
pub fn make_frustum_matrix(f: &Frustum) -> Result<Mat4> {
    let (w, h, d) = (f.right - f.left, f.top - f.bottom, f.far - f.near);
    if w == 0.0 || h == 0.0 || d == 0.0 {
        return Err(KernelError::EmptyFrustum);
    }
    #[rustfmt::skip]
    let out = [
        2.0 * f.near / w, 0.0,              (f.right + f.left) / w,  0.0,
        0.0,              2.0 * f.near / h, (f.top + f.bottom) / h,  0.0,
        0.0,              0.0,              -(f.far + f.near) / d,   -2.0 * f.far * f.near / d,
        0.0,              0.0,              -1.0,                    0.0,
    ];
    Ok(out)
}

/// Symmetric perspective projection with vertical field of view `fov_y`
/// (radians) and `aspect = width / height`.
pub fn make_perspective_matrix(fov_y: f64, aspect: f64, near: f64, far: f64) -> Result<Mat4> {
    let top = near * (0.5 * fov_y).tan();
    let right = top * aspect;
    make_frustum_matrix(&Frustum {
        left: -right,
        right,
        bottom: -top,
        top,
        near,
        far,
    })
}

/// Euclidean view matrix: camera at `eye` looking at `target` with `up`
/// roughly upwards (all `[x, y, z]`).
///
/// An `up` parallel to the view direction is replaced by the coordinate axis
/// least parallel to it. `None` when `eye == target`.
pub fn make_look_at_matrix(eye: &[f64], target: &[f64], up: &[f64]) -> Result<Option<Mat4>> {
    rn::check_len("make_look_at_matrix", eye, 3)?;
    rn::check_len("make_look_at_matrix", target, 3)?;
    rn::check_len("make_look_at_matrix", up, 3)?;
    let f = rn::normalize(&rn::subtract(target, eye)?);
    if rn::euclidean_norm(&f) < 0.5 {
        tracing::debug!("make_look_at_matrix: eye and target coincide");
        return Ok(None);
    }
    let mut side = cross3(&f, up);
    if rn::euclidean_norm(&side) < NORM_EPS.sqrt() {
        let k = (0..3)
            .min_by(|&i, &j| f[i].abs().total_cmp(&f[j].abs()))
            .unwrap_or(0);
        let mut axis = [0.0; 3];
        axis[k] = 1.0;
        side = cross3(&f, &axis);
    }
    let s = rn::normalize(&side);
    let u = cross3(&s, &f);
    #[rustfmt::skip]
    let out = [
        s[0],  s[1],  s[2],  -dot(&s, eye),
        u[0],  u[1],  u[2],  -dot(&u, eye),
        -f[0], -f[1], -f[2], dot(&f, eye),
        0.0,   0.0,   0.0,   1.0,
    ];
    Ok(Some(out))
}
