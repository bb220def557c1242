//! Separating "where" from "how oriented" for 4×4 maps.
//!
//! Every map `M` is read as `T(p) · O`, where `p = M · ORIGIN` and `T(p)` is
//! the metric translation from the origin to `p`; the orientation part `O`
//! fixes the origin and is further split into rotation and stretch by a polar
//! decomposition.
//!
//! References
//! - Polar decomposition via SVD: `A = U Σ Vᵀ = (U Vᵀ)(V Σ Vᵀ)`.

use nalgebra::{Matrix3, SVD};

use super::maps::{make_translation_matrix, make_translation_matrix_between};
use super::{apply4, as16, as4, mul4, Mat4, Point3, IDENTITY, ORIGIN};
use crate::cfg::{DEHOMOGENIZE_EPS, NORM_EPS};
use crate::error::Result;
use crate::pn::{self, Metric};

/// `T(point → src·point)⁻¹ · src`: the part of `src` that fixes `point`.
///
/// If `point` or its image is not a proper point of the geometry there is no
/// translation to remove and `src` is returned unchanged.
pub fn extract_orientation_matrix(src: &[f64], point: &[f64], metric: Metric) -> Result<Mat4> {
    let src = as16("extract_orientation_matrix", src)?;
    let point = as4("extract_orientation_matrix", point)?;
    let image = apply4(&src, &point);
    if !pn::is_proper_point(&point, metric) || !pn::is_proper_point(&image, metric) {
        tracing::debug!(%metric, "extract_orientation_matrix: improper point, nothing removed");
        return Ok(src);
    }
    let back = make_translation_matrix_between(&image, &point, metric)?;
    Ok(mul4(&back, &src))
}

/// Image of the absolute under `m`.
///
/// Euclidean: the absolute is the plane at infinity, represented by the
/// bottom-right entry `[0, 0, 0, m33]`. Elliptic/hyperbolic: the last column
/// of `m` with its homogeneous slot multiplied by the metric sign.
pub fn get_transformed_absolute(m: &[f64], metric: Metric) -> Result<[f64; 4]> {
    let m = as16("get_transformed_absolute", m)?;
    Ok(match metric {
        Metric::Euclidean => [0.0, 0.0, 0.0, m[15]],
        _ => [m[3], m[7], m[11], metric.sign() * m[15]],
    })
}

/// Whether `m` preserves the metric up to a projective scale.
///
/// Elliptic/hyperbolic: `Mᵀ Q M = λ Q` with `Q = diag(1, 1, 1, m)` and
/// `λ > 0`. Euclidean: last row `[0, 0, 0, s]` with `s ≠ 0` and the linear
/// block `A` satisfying `Aᵀ A = s² I`. Deviations are compared with `tol`
/// scaled by `max(1, λ)`.
pub fn is_isometry(m: &[f64], metric: Metric, tol: f64) -> Result<bool> {
    let m = as16("is_isometry", m)?;
    if metric == Metric::Euclidean {
        let s = m[15];
        let scale = tol * s.abs().max(1.0);
        if s.abs() <= tol || m[12..15].iter().any(|x| x.abs() > scale) {
            return Ok(false);
        }
        let s2 = s * s;
        for i in 0..3 {
            for j in 0..3 {
                let g: f64 = (0..3).map(|k| m[k * 4 + i] * m[k * 4 + j]).sum();
                let target = if i == j { s2 } else { 0.0 };
                if (g - target).abs() > tol * s2.max(1.0) {
                    return Ok(false);
                }
            }
        }
        return Ok(true);
    }
    let q = [1.0, 1.0, 1.0, metric.sign()];
    let mut g = [0.0; 16];
    for i in 0..4 {
        for j in 0..4 {
            g[i * 4 + j] = (0..4).map(|k| m[k * 4 + i] * q[k] * m[k * 4 + j]).sum();
        }
    }
    let lambda = (g[0] + g[5] + g[10] + q[3] * g[15]) / 4.0;
    if lambda <= tol {
        return Ok(false);
    }
    let scale = tol * lambda.max(1.0);
    Ok(g.iter().enumerate().all(|(k, x)| {
        let (i, j) = (k / 4, k % 4);
        let target = if i == j { lambda * q[i] } else { 0.0 };
        (x - target).abs() <= scale
    }))
}

/// `M ≃ T(translation) · rotation · stretch`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Factors {
    /// Canonical representative of `M · ORIGIN`.
    pub translation: Point3,
    /// Proper rotation fixing the origin.
    pub rotation: Mat4,
    /// Symmetric linear block fixing the origin.
    pub stretch: Mat4,
    /// The orientation part reverses orientation; `stretch` then carries the
    /// point reflection.
    pub flipped: bool,
}

fn embed3(a: &Matrix3<f64>) -> Mat4 {
    let mut out = IDENTITY;
    for i in 0..3 {
        for j in 0..3 {
            out[i * 4 + j] = a[(i, j)];
        }
    }
    out
}

/// Split `m` into translation, rotation and stretch.
///
/// The orientation part `O = T(p)⁻¹ · m` is scaled so that `O33 = 1`; its
/// linear block is polar-decomposed. Any projective row of `O` is dropped, so
/// [`compose_matrix_from_factors`] reproduces `m / O33` exactly when `O` is
/// affine. `None` if the origin is not mapped to a proper point or the
/// orientation part is singular at the origin.
pub fn factor_matrix(m: &[f64], metric: Metric) -> Result<Option<Factors>> {
    let m = as16("factor_matrix", m)?;
    let image = apply4(&m, &ORIGIN);
    if !pn::is_proper_point(&image, metric) {
        tracing::debug!(%metric, "factor_matrix: origin maps to an improper point");
        return Ok(None);
    }
    let translation = as4("factor_matrix", &pn::canonical_point(&image, metric))?;
    let back = make_translation_matrix_between(&translation, &ORIGIN, metric)?;
    let orient = mul4(&back, &m);
    let c = orient[15];
    if c.abs() <= DEHOMOGENIZE_EPS {
        return Ok(None);
    }
    let a = Matrix3::from_fn(|i, j| orient[i * 4 + j] / c);
    let svd = SVD::new(a, true, true);
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Ok(None);
    };
    let mut rotation = u * v_t;
    let mut stretch = v_t.transpose() * Matrix3::from_diagonal(&svd.singular_values) * v_t;
    let flipped = rotation.determinant() < 0.0;
    if flipped {
        rotation = -rotation;
        stretch = -stretch;
    }
    if stretch.iter().any(|x| !x.is_finite()) || stretch.amax() < NORM_EPS {
        return Ok(None);
    }
    Ok(Some(Factors {
        translation,
        rotation: embed3(&rotation),
        stretch: embed3(&stretch),
        flipped,
    }))
}

/// `T(translation) · rotation · stretch`.
pub fn compose_matrix_from_factors(f: &Factors, metric: Metric) -> Result<Mat4> {
    let t = make_translation_matrix(&f.translation, metric)?;
    Ok(mul4(&mul4(&t, &f.rotation), &f.stretch))
}
