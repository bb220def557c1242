//! Plücker lines and plane constructions.

use super::{as4, as6, Line3, Plane3};
use crate::cfg::{DEHOMOGENIZE_EPS, PLUCKER_EPS};
use crate::error::Result;
use crate::pn::{self, Metric};
use crate::rn::{self, cross3, dot};

#[inline]
fn is_ideal(p: &[f64; 4]) -> bool {
    p[3].abs() <= DEHOMOGENIZE_EPS
}

fn dehom4(p: [f64; 4]) -> [f64; 4] {
    let mut q = p;
    pn::dehomogenize_in_place(&mut q);
    q
}

/// Plücker coordinates of the line through `p` and `q`.
///
/// Both points are dehomogenized first (ideal points are used as given), then
/// the minors `(01, 02, 03, 12, 13, 23)` of the 2×4 matrix `[p; q]` are taken.
pub fn line_from_points(p: &[f64], q: &[f64]) -> Result<Line3> {
    let a = dehom4(as4("line_from_points", p)?);
    let b = dehom4(as4("line_from_points", q)?);
    let minor = |i: usize, j: usize| a[i] * b[j] - a[j] * b[i];
    Ok([
        minor(0, 1),
        minor(0, 2),
        minor(0, 3),
        minor(1, 2),
        minor(1, 3),
        minor(2, 3),
    ])
}

/// The Plücker pairing `l01 k23 − l02 k13 + l03 k12 + l12 k03 − l13 k02 + l23 k01`.
///
/// Equals the determinant of the four points spanning `l` and `k`, so it
/// vanishes iff the lines are coplanar.
pub fn plucker_pairing(l: &[f64], k: &[f64]) -> Result<f64> {
    let l = as6("plucker_pairing", l)?;
    let k = as6("plucker_pairing", k)?;
    Ok(l[0] * k[5] - l[1] * k[4] + l[2] * k[3] + l[3] * k[2] - l[4] * k[1] + l[5] * k[0])
}

/// Whether two lines meet (possibly at infinity).
pub fn lines_intersect(l: &[f64], k: &[f64]) -> Result<bool> {
    Ok(plucker_pairing(l, k)?.abs() < PLUCKER_EPS)
}

/// Intersection of the line through `p`, `q` with `plane`, homogeneous and
/// not dehomogenized: `(plane·q) p − (plane·p) q`.
///
/// A line lying in the plane yields the zero vector.
pub fn line_intersect_plane(p: &[f64], q: &[f64], plane: &[f64]) -> Result<[f64; 4]> {
    let p = as4("line_intersect_plane", p)?;
    let q = as4("line_intersect_plane", q)?;
    let plane = as4("line_intersect_plane", plane)?;
    let (fp, fq) = (dot(&plane, &p), dot(&plane, &q));
    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = fq * p[i] - fp * q[i];
    }
    Ok(out)
}

/// Plane through three points.
///
/// Proper points: normal `(p2 − p1) × (p3 − p1)` of the dehomogenized points,
/// offset so that `p1` lies on the plane. If any point is ideal the plane is
/// the cofactor vector orthogonal to the three homogeneous rows. Collinear
/// points give the zero vector.
pub fn plane_from_points(p1: &[f64], p2: &[f64], p3: &[f64]) -> Result<Plane3> {
    let pts = [
        as4("plane_from_points", p1)?,
        as4("plane_from_points", p2)?,
        as4("plane_from_points", p3)?,
    ];
    if pts.iter().any(is_ideal) {
        let basis = rn::complete_basis(&pts)?;
        return as4("plane_from_points", &basis[3]);
    }
    let [a, b, c] = pts.map(dehom4);
    let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = cross3(&e1, &e2);
    Ok([n[0], n[1], n[2], -dot(&n, &a[..3])])
}

/// A plane through `point` containing the direction `dir` (`[x, y, z, _]`).
///
/// The normal is `dir × e`, where `e` is whichever of the x/y axes is less
/// parallel to `dir`. An ideal `point` gives a plane through the origin.
/// `None` for a zero direction.
pub fn plane_from_direction_and_point(dir: &[f64], point: &[f64]) -> Result<Option<Plane3>> {
    let d = as4("plane_from_direction_and_point", dir)?;
    let p = as4("plane_from_direction_and_point", point)?;
    if rn::euclidean_norm(&d[..3]) < DEHOMOGENIZE_EPS {
        tracing::debug!("plane_from_direction_and_point: zero direction");
        return Ok(None);
    }
    let axis = if d[0].abs() <= d[1].abs() {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    let n = cross3(&d[..3], &axis);
    let offset = if is_ideal(&p) {
        0.0
    } else {
        -dot(&n, &p[..3]) / p[3]
    };
    Ok(Some([n[0], n[1], n[2], offset]))
}

/// The plane with the normal of `plane` passing through `point`.
///
/// An ideal `point` leaves `plane` unchanged.
pub fn plane_parallel_to_passing_through(plane: &[f64], point: &[f64]) -> Result<Plane3> {
    let mut out = as4("plane_parallel_to_passing_through", plane)?;
    let p = as4("plane_parallel_to_passing_through", point)?;
    if !is_ideal(&p) {
        out[3] = -dot(&out[..3], &p[..3]) / p[3];
    }
    Ok(out)
}

/// The plane of points equidistant from `p1` and `p2`, normalized, with `p2`
/// on its positive side.
///
/// - Euclidean: normal `p2 − p1` through the midpoint of the dehomogenized
///   points; the plane at infinity `[0, 0, 0, 1]` if either point is ideal.
/// - Elliptic/hyperbolic: the polar of `p̂2 − p̂1` for unit representatives
///   (elliptic representatives chosen on the same hemisphere).
///
/// Coincident points give the zero plane.
pub fn perpendicular_bisector(p1: &[f64], p2: &[f64], metric: Metric) -> Result<Plane3> {
    let a = as4("perpendicular_bisector", p1)?;
    let b = as4("perpendicular_bisector", p2)?;
    let plane: Vec<f64> = match metric {
        Metric::Euclidean => {
            if is_ideal(&a) || is_ideal(&b) {
                return Ok([0.0, 0.0, 0.0, 1.0]);
            }
            let (a, b) = (dehom4(a), dehom4(b));
            let n = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let mid = [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1]), 0.5 * (a[2] + b[2])];
            vec![n[0], n[1], n[2], -dot(&n, &mid)]
        }
        _ => {
            let a = pn::canonical_point(&a, metric);
            let mut b = pn::canonical_point(&b, metric);
            if metric == Metric::Elliptic && pn::inner_product(&a, &b, metric)? < 0.0 {
                rn::times_scalar_in_place(-1.0, &mut b);
            }
            pn::polarize(&rn::subtract(&b, &a)?, metric)
        }
    };
    as4("perpendicular_bisector", &pn::normalize_plane(&plane, metric))
}
