//! Metric-aware projective operations on homogeneous coordinates.
//!
//! Every routine below is written once in terms of the form
//! `<u,v>_m = Σ_{i<n-1} u_i v_i + m · u_{n-1} v_{n-1}`; only normalization
//! (dehomogenize vs. scale to unit form) and the choice of trigonometric vs.
//! hyperbolic functions differ between metrics.

use super::Metric;
use crate::cfg::{DEHOMOGENIZE_EPS, NORM_EPS, ZERO_EPS};
use crate::error::{KernelError, Result};
use crate::rn::{self, check_len, divide_by_last};

#[inline]
fn form(u: &[f64], v: &[f64], sign: f64) -> f64 {
    let n = u.len();
    if n == 0 {
        return 0.0;
    }
    rn::dot(&u[..n - 1], &v[..n - 1]) + sign * u[n - 1] * v[n - 1]
}

fn same_len(op: &'static str, u: &[f64], v: &[f64]) -> Result<usize> {
    check_len(op, v, u.len())?;
    if u.is_empty() {
        return Err(KernelError::size(op, 1, 0));
    }
    Ok(u.len())
}

#[inline]
fn is_ideal(v: &[f64]) -> bool {
    v.last().map_or(true, |w| w.abs() <= DEHOMOGENIZE_EPS)
}

/// `p` and `q` are nonzero multiples of each other.
fn same_projective_point(p: &[f64], q: &[f64]) -> bool {
    let (a, b) = (rn::normalize(p), rn::normalize(q));
    if rn::is_zero(&a, ZERO_EPS) || rn::is_zero(&b, ZERO_EPS) {
        return false;
    }
    rn::equals(&a, &b, ZERO_EPS) || rn::equals(&a, &rn::negate(&b), ZERO_EPS)
}

/// `(cos, sin)` or `(cosh, sinh)` of `t`.
#[inline]
fn circular(metric: Metric, t: f64) -> (f64, f64) {
    match metric {
        Metric::Hyperbolic => (t.cosh(), t.sinh()),
        _ => (t.cos(), t.sin()),
    }
}

/// Divide by the last coordinate if `|v[last]| > 1e-10`; otherwise unchanged.
///
/// Idempotent: the last slot of a dehomogenized vector is exactly `1.0`.
pub fn dehomogenize(v: &[f64]) -> Vec<f64> {
    let mut out = v.to_vec();
    divide_by_last(&mut out);
    out
}

pub fn dehomogenize_into(dst: &mut [f64], v: &[f64]) -> Result<()> {
    check_len("dehomogenize", dst, v.len())?;
    dst.copy_from_slice(v);
    divide_by_last(dst);
    Ok(())
}

pub fn dehomogenize_in_place(v: &mut [f64]) {
    divide_by_last(v);
}

/// Append a homogeneous coordinate `1.0`.
pub fn homogenize(v: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(v.len() + 1);
    out.extend_from_slice(v);
    out.push(1.0);
    out
}

/// The metric bilinear form; operands must have equal, nonzero length.
pub fn inner_product(u: &[f64], v: &[f64], metric: Metric) -> Result<f64> {
    same_len("inner_product", u, v)?;
    Ok(form(u, v, metric.sign()))
}

/// `<v,v>_m`.
pub fn norm_squared(v: &[f64], metric: Metric) -> f64 {
    form(v, v, metric.sign())
}

/// `sqrt(|<v,v>_m|)`.
pub fn norm(v: &[f64], metric: Metric) -> f64 {
    norm_squared(v, metric).abs().sqrt()
}

/// Scale `v` so that `|<v,v>_m| = 1`, keeping its sign.
///
/// Euclidean: the first n−1 coordinates are scaled to unit length and the
/// homogeneous coordinate is held fixed. A vector whose form vanishes (zero
/// vector, or a hyperbolic point on the absolute) is returned unchanged.
pub fn normalize(v: &[f64], metric: Metric) -> Vec<f64> {
    let mut out = v.to_vec();
    normalize_in_place(&mut out, metric);
    out
}

pub fn normalize_in_place(v: &mut [f64], metric: Metric) {
    let Some(last) = v.len().checked_sub(1) else {
        return;
    };
    let (scaled, len) = match metric {
        Metric::Euclidean => {
            let len = rn::euclidean_norm(&v[..last]);
            (&mut v[..last], len)
        }
        _ => {
            let len = norm(v, metric);
            (&mut v[..], len)
        }
    };
    if len < NORM_EPS {
        tracing::debug!(%metric, "normalize: null vector left unchanged");
        return;
    }
    for x in scaled {
        *x /= len;
    }
}

/// Scale a hyperplane to unit norm in the dual form (`diag(1,…,1,m)`, which is
/// its own inverse for the non-degenerate metrics).
pub fn normalize_plane(plane: &[f64], metric: Metric) -> Vec<f64> {
    let len = norm(plane, metric);
    if len < NORM_EPS {
        tracing::debug!(%metric, "normalize_plane: null plane left unchanged");
        return plane.to_vec();
    }
    plane.iter().map(|x| x / len).collect()
}

/// Whether `p` represents an actual point of the geometry.
///
/// Euclidean: not ideal. Elliptic: nonzero. Hyperbolic: strictly inside the
/// absolute (`<p,p> < 0`).
pub fn is_proper_point(p: &[f64], metric: Metric) -> bool {
    match metric {
        Metric::Euclidean => !is_ideal(p),
        Metric::Elliptic => norm_squared(p, metric) > NORM_EPS,
        Metric::Hyperbolic => norm_squared(p, metric) < -NORM_EPS,
    }
}

/// Canonical representative: dehomogenized (Euclidean), or unit form with a
/// non-negative homogeneous coordinate.
pub(crate) fn canonical_point(p: &[f64], metric: Metric) -> Vec<f64> {
    match metric {
        Metric::Euclidean => dehomogenize(p),
        _ => {
            let mut q = normalize(p, metric);
            if q.last().is_some_and(|w| *w < 0.0) {
                rn::times_scalar_in_place(-1.0, &mut q);
            }
            q
        }
    }
}

/// Geodesic distance between two homogeneous points.
///
/// - Euclidean: distance of the dehomogenized points; `∞` if either is ideal,
///   unless both are the same point.
/// - Elliptic: `arccos(|<p,q>| / sqrt(<p,p><q,q>))`; `NaN` for a zero vector.
/// - Hyperbolic: `arccosh(|<p,q>| / sqrt(<p,p><q,q>))`; `∞` unless both
///   points lie strictly inside the absolute or are the same point.
///
/// The non-Euclidean cases are evaluated through the chord `c = |p̂ − q̂|_m`
/// of the normalized representatives (`d = 2 asin(c/2)` resp.
/// `2 asinh(c/2)`), which is the same quantity but exact at `p = q` and
/// exactly symmetric.
pub fn distance_between(p: &[f64], q: &[f64], metric: Metric) -> Result<f64> {
    let n = same_len("distance_between", p, q)?;
    match metric {
        Metric::Euclidean => {
            if is_ideal(p) || is_ideal(q) {
                if same_projective_point(p, q) {
                    return Ok(0.0);
                }
                return Ok(f64::INFINITY);
            }
            let (a, b) = (dehomogenize(p), dehomogenize(q));
            rn::euclidean_distance(&a[..n - 1], &b[..n - 1])
        }
        Metric::Elliptic => {
            if !is_proper_point(p, metric) || !is_proper_point(q, metric) {
                return Ok(f64::NAN);
            }
            let (a, mut b) = (normalize(p, metric), normalize(q, metric));
            // antipodal representatives are the same point
            if form(&a, &b, 1.0) < 0.0 {
                rn::times_scalar_in_place(-1.0, &mut b);
            }
            let chord = rn::euclidean_distance(&a, &b)?;
            Ok(2.0 * (0.5 * chord).min(1.0).asin())
        }
        Metric::Hyperbolic => {
            if !is_proper_point(p, metric) || !is_proper_point(q, metric) {
                if same_projective_point(p, q) {
                    return Ok(0.0);
                }
                return Ok(f64::INFINITY);
            }
            let (a, b) = (canonical_point(p, metric), canonical_point(q, metric));
            let diff = rn::subtract(&a, &b)?;
            let chord = form(&diff, &diff, -1.0).max(0.0).sqrt();
            Ok(2.0 * (0.5 * chord).asinh())
        }
    }
}

/// Angle between two hyperplanes measured with the dual form.
///
/// `NaN` if either plane has vanishing dual norm.
pub fn angle_between_planes(a: &[f64], b: &[f64], metric: Metric) -> Result<f64> {
    same_len("angle_between_planes", a, b)?;
    let sign = metric.sign();
    let denom = (form(a, a, sign) * form(b, b, sign)).abs().sqrt();
    if denom < NORM_EPS {
        return Ok(f64::NAN);
    }
    Ok((form(a, b, sign) / denom).clamp(-1.0, 1.0).acos())
}

/// Point at arc-length fraction `t` along the geodesic from `p0` to `p1`.
///
/// Euclidean: affine interpolation of the dehomogenized points (raw
/// coordinates if either is ideal). Elliptic/hyperbolic: constant-speed
/// parameterization `(S((1−t)d) p̂0 + S(td) p̂1) / S(d)` with `S = sin` resp.
/// `sinh`. Coincident points return `p0`.
pub fn linear_interpolation(p0: &[f64], p1: &[f64], t: f64, metric: Metric) -> Result<Vec<f64>> {
    let n = same_len("linear_interpolation", p0, p1)?;
    if metric == Metric::Euclidean {
        if is_ideal(p0) || is_ideal(p1) {
            return rn::linear_combination(1.0 - t, p0, t, p1);
        }
        let (a, b) = (dehomogenize(p0), dehomogenize(p1));
        let mut out = rn::linear_combination(1.0 - t, &a, t, &b)?;
        out[n - 1] = 1.0;
        return Ok(out);
    }
    let a = canonical_point(p0, metric);
    let mut b = canonical_point(p1, metric);
    if metric == Metric::Elliptic && form(&a, &b, 1.0) < 0.0 {
        rn::times_scalar_in_place(-1.0, &mut b);
    }
    let d = distance_between(&a, &b, metric)?;
    if !d.is_finite() {
        return rn::linear_combination(1.0 - t, &a, t, &b);
    }
    if d < NORM_EPS {
        return Ok(p0.to_vec());
    }
    let (_, sd) = circular(metric, d);
    let (_, s0) = circular(metric, (1.0 - t) * d);
    let (_, s1) = circular(metric, t * d);
    rn::linear_combination(s0 / sd, &a, s1 / sd, &b)
}

/// Geodesic midpoint.
pub fn midpoint(p0: &[f64], p1: &[f64], metric: Metric) -> Result<Vec<f64>> {
    linear_interpolation(p0, p1, 0.5, metric)
}

/// The point at metric distance `length` from `p0` along the geodesic towards `p1`.
///
/// - Euclidean: `p0 + length · (p1 − p0)/|p1 − p0|` on dehomogenized points;
///   an ideal `p1` is read as the direction itself.
/// - Elliptic/hyperbolic: `C(length) p̂0 + S(length) t̂`, where `t̂` is the unit
///   tangent at `p̂0` pointing at `p1` (`p1` may lie on the absolute).
///
/// If `p0` is not a proper point, or `p1` coincides with it, `p0` is returned
/// unchanged.
pub fn drag_towards(p0: &[f64], p1: &[f64], length: f64, metric: Metric) -> Result<Vec<f64>> {
    let n = same_len("drag_towards", p0, p1)?;
    if !is_proper_point(p0, metric) {
        tracing::debug!(%metric, "drag_towards: start is not a proper point");
        return Ok(p0.to_vec());
    }
    let start = canonical_point(p0, metric);
    if metric == Metric::Euclidean {
        let dir = if is_ideal(p1) {
            p1[..n - 1].to_vec()
        } else {
            rn::subtract(&dehomogenize(p1)[..n - 1], &start[..n - 1])?
        };
        let len = rn::euclidean_norm(&dir);
        if len < NORM_EPS {
            tracing::debug!("drag_towards: coincident points");
            return Ok(p0.to_vec());
        }
        let mut out = start;
        for (o, d) in out.iter_mut().zip(&dir) {
            *o += length * d / len;
        }
        return Ok(out);
    }
    let mut target = p1.to_vec();
    if metric == Metric::Elliptic && form(&start, &target, 1.0) < 0.0 {
        rn::times_scalar_in_place(-1.0, &mut target);
    }
    let tangent = project_to_tangent_space(&start, &target, metric)?;
    let tt = norm_squared(&tangent, metric);
    if tt < NORM_EPS {
        tracing::debug!(%metric, "drag_towards: coincident points");
        return Ok(p0.to_vec());
    }
    let (c, s) = circular(metric, length);
    rn::linear_combination(c, &start, s / tt.sqrt(), &tangent)
}

/// Remove from `vector` its component along `point`.
///
/// Elliptic/hyperbolic: `v − (<v,p>/<p,p>) p`, so that `<p, result> = 0`; a
/// point on the absolute leaves `vector` unchanged. Euclidean: the multiple of
/// `point` that cancels the homogeneous slot is removed and the last
/// coordinate of the result is exactly `0.0`.
pub fn project_to_tangent_space(point: &[f64], vector: &[f64], metric: Metric) -> Result<Vec<f64>> {
    let n = same_len("project_to_tangent_space", point, vector)?;
    let mut out = vector.to_vec();
    match metric {
        Metric::Euclidean => {
            let w = point[n - 1];
            if w.abs() > DEHOMOGENIZE_EPS {
                let f = vector[n - 1] / w;
                for (o, p) in out[..n - 1].iter_mut().zip(&point[..n - 1]) {
                    *o -= f * p;
                }
            }
            out[n - 1] = 0.0;
        }
        _ => {
            let sign = metric.sign();
            let pp = form(point, point, sign);
            if pp.abs() < NORM_EPS {
                tracing::debug!(%metric, "project_to_tangent_space: point on the absolute");
                return Ok(out);
            }
            let f = form(vector, point, sign) / pp;
            for (o, p) in out.iter_mut().zip(point) {
                *o -= f * p;
            }
        }
    }
    Ok(out)
}

/// Apply `diag(1,…,1,m)`: the polarity of the absolute quadric.
pub fn polarize(v: &[f64], metric: Metric) -> Vec<f64> {
    let mut out = v.to_vec();
    if let Some(w) = out.last_mut() {
        *w *= metric.sign();
        // keep Euclidean output free of -0.0
        *w += 0.0;
    }
    out
}

/// Point → its polar hyperplane. Euclidean: every point maps to a plane
/// through the origin-direction `[x, y, z, 0]`.
pub fn polarize_plane(point: &[f64], metric: Metric) -> Vec<f64> {
    polarize(point, metric)
}

/// Hyperplane → its pole (inverse of [`polarize_plane`] for the
/// non-degenerate metrics; Euclidean yields the plane's normal direction).
pub fn polarize_point(plane: &[f64], metric: Metric) -> Vec<f64> {
    polarize(plane, metric)
}
