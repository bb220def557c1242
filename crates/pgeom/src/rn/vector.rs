//! Elementwise vector arithmetic, norms and projections.
//!
//! Binary operations accept operands whose lengths differ by at most one; the
//! shorter operand is read as an implicitly homogeneous vector and only the
//! common prefix is combined.

use crate::cfg::{DEHOMOGENIZE_EPS, NORM_EPS};
use crate::error::{KernelError, Result};

/// Length of the common prefix of two operands (lengths may differ by one).
#[inline]
pub(crate) fn common_len(op: &'static str, a: &[f64], b: &[f64]) -> Result<usize> {
    let (short, long) = if a.len() <= b.len() {
        (a.len(), b.len())
    } else {
        (b.len(), a.len())
    };
    if long - short > 1 {
        return Err(KernelError::size(op, long, short));
    }
    Ok(short)
}

#[inline]
pub(crate) fn check_len(op: &'static str, buf: &[f64], expected: usize) -> Result<()> {
    if buf.len() != expected {
        return Err(KernelError::size(op, expected, buf.len()));
    }
    Ok(())
}

/// Divide by the last coordinate unless it is (nearly) zero; the last slot
/// becomes exactly `1.0`.
pub(crate) fn divide_by_last(v: &mut [f64]) {
    let Some(&w) = v.last() else {
        return;
    };
    if w.abs() <= DEHOMOGENIZE_EPS || w == 1.0 {
        return;
    }
    let n = v.len();
    for x in &mut v[..n - 1] {
        *x /= w;
    }
    v[n - 1] = 1.0;
}

/// Componentwise absolute value.
pub fn abs(v: &[f64]) -> Vec<f64> {
    v.iter().map(|x| x.abs()).collect()
}

pub fn negate(v: &[f64]) -> Vec<f64> {
    v.iter().map(|x| -x).collect()
}

/// `s · v`.
pub fn times_scalar(s: f64, v: &[f64]) -> Vec<f64> {
    v.iter().map(|x| s * x).collect()
}

pub fn times_scalar_in_place(s: f64, v: &mut [f64]) {
    for x in v {
        *x *= s;
    }
}

/// `a + b` over the common prefix.
pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    let n = common_len("add", a, b)?;
    let mut out = vec![0.0; n];
    add_into(&mut out, a, b)?;
    Ok(out)
}

/// `dst = a + b`; `dst` must have the common length of `a` and `b`.
pub fn add_into(dst: &mut [f64], a: &[f64], b: &[f64]) -> Result<()> {
    let n = common_len("add", a, b)?;
    check_len("add", dst, n)?;
    for i in 0..n {
        dst[i] = a[i] + b[i];
    }
    Ok(())
}

/// `a − b` over the common prefix.
pub fn subtract(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    let n = common_len("subtract", a, b)?;
    let mut out = vec![0.0; n];
    subtract_into(&mut out, a, b)?;
    Ok(out)
}

pub fn subtract_into(dst: &mut [f64], a: &[f64], b: &[f64]) -> Result<()> {
    let n = common_len("subtract", a, b)?;
    check_len("subtract", dst, n)?;
    for i in 0..n {
        dst[i] = a[i] - b[i];
    }
    Ok(())
}

/// `a·u + b·v` over the common prefix.
pub fn linear_combination(a: f64, u: &[f64], b: f64, v: &[f64]) -> Result<Vec<f64>> {
    let n = common_len("linear_combination", u, v)?;
    let mut out = vec![0.0; n];
    linear_combination_into(&mut out, a, u, b, v)?;
    Ok(out)
}

pub fn linear_combination_into(
    dst: &mut [f64],
    a: f64,
    u: &[f64],
    b: f64,
    v: &[f64],
) -> Result<()> {
    let n = common_len("linear_combination", u, v)?;
    check_len("linear_combination", dst, n)?;
    for i in 0..n {
        dst[i] = a * u[i] + b * v[i];
    }
    Ok(())
}

/// Arithmetic mean of equally long vectors.
pub fn average<V: AsRef<[f64]>>(vectors: &[V]) -> Result<Vec<f64>> {
    let first = vectors
        .first()
        .ok_or_else(|| KernelError::size("average", 1, 0))?;
    let n = first.as_ref().len();
    let mut out = vec![0.0; n];
    for v in vectors {
        let v = v.as_ref();
        check_len("average", v, n)?;
        for (o, x) in out.iter_mut().zip(v) {
            *o += x;
        }
    }
    times_scalar_in_place(1.0 / vectors.len() as f64, &mut out);
    Ok(out)
}

/// Euclidean dot product over the common prefix.
pub fn inner_product(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = common_len("inner_product", a, b)?;
    Ok(dot(&a[..n], &b[..n]))
}

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cross product of two 3-vectors.
pub fn cross_product(a: &[f64], b: &[f64]) -> Result<[f64; 3]> {
    check_len("cross_product", a, 3)?;
    check_len("cross_product", b, 3)?;
    Ok(cross3(a, b))
}

#[inline]
pub(crate) fn cross3(a: &[f64], b: &[f64]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn euclidean_norm_squared(v: &[f64]) -> f64 {
    dot(v, v)
}

pub fn euclidean_norm(v: &[f64]) -> f64 {
    euclidean_norm_squared(v).sqrt()
}

pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = common_len("euclidean_distance", a, b)?;
    Ok(a[..n]
        .iter()
        .zip(&b[..n])
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

/// Angle in `[0, π]` between two vectors; `0.0` if either is zero.
pub fn euclidean_angle(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = common_len("euclidean_angle", a, b)?;
    let (a, b) = (&a[..n], &b[..n]);
    let denom = euclidean_norm(a) * euclidean_norm(b);
    if denom < NORM_EPS {
        return Ok(0.0);
    }
    Ok((dot(a, b) / denom).clamp(-1.0, 1.0).acos())
}

/// ℓ1 norm.
pub fn manhattan_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x.abs()).sum()
}

/// ℓ1 distance over the common prefix.
pub fn manhattan_norm_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = common_len("manhattan_norm_distance", a, b)?;
    Ok(a[..n].iter().zip(&b[..n]).map(|(x, y)| (x - y).abs()).sum())
}

/// ℓ∞ norm.
pub fn max_norm(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |m, x| m.max(x.abs()))
}

/// Unit-length copy; a zero vector is returned unchanged.
pub fn normalize(v: &[f64]) -> Vec<f64> {
    let mut out = v.to_vec();
    normalize_in_place(&mut out);
    out
}

pub fn normalize_in_place(v: &mut [f64]) {
    let len = euclidean_norm(v);
    if len < NORM_EPS {
        tracing::debug!(dim = v.len(), "normalize: zero vector left unchanged");
        return;
    }
    for x in v {
        *x /= len;
    }
}

/// Copy scaled to Euclidean length `length`; a zero vector is returned unchanged.
pub fn set_euclidean_norm(v: &[f64], length: f64) -> Vec<f64> {
    let mut out = normalize(v);
    if euclidean_norm(&out) >= NORM_EPS {
        times_scalar_in_place(length, &mut out);
    }
    out
}

/// Component of `v` along `onto`; zero if `onto` is zero.
pub fn project_onto(v: &[f64], onto: &[f64]) -> Result<Vec<f64>> {
    let n = common_len("project_onto", v, onto)?;
    let oo = dot(&onto[..n], &onto[..n]);
    if oo < NORM_EPS {
        return Ok(vec![0.0; n]);
    }
    let f = dot(&v[..n], &onto[..n]) / oo;
    Ok(onto[..n].iter().map(|x| f * x).collect())
}

/// Component of `v` orthogonal to `onto`.
pub fn project_onto_complement(v: &[f64], onto: &[f64]) -> Result<Vec<f64>> {
    let along = project_onto(v, onto)?;
    subtract(&v[..along.len()], &along)
}

/// All components within `tol` of zero.
pub fn is_zero(v: &[f64], tol: f64) -> bool {
    v.iter().all(|x| x.abs() <= tol)
}

/// Same length and all components within `tol`.
pub fn equals(a: &[f64], b: &[f64], tol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tol)
}

pub fn is_nan(v: &[f64]) -> bool {
    v.iter().any(|x| x.is_nan())
}
