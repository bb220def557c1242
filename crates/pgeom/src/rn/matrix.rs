//! Square row-major matrices stored in flat buffers.
//!
//! Conventions
//! - A matrix of order n is a buffer of length n², entry (i, j) at `i*n + j`.
//! - Matrices act on column vectors from the left.
//! - `apply_linear` requires `order == len(v)`; `apply_projective` requires
//!   `order == len(v) + 1` and dehomogenizes the product. `matrix_times_vector`
//!   picks one of the two from the operand sizes.

use std::fmt::Write as _;

use nalgebra::DMatrix;

use super::vector::{check_len, divide_by_last};
use crate::error::{KernelError, Result};

/// Order n of a square buffer of length n²; `NotSquare` otherwise.
pub fn matrix_order(op: &'static str, m: &[f64]) -> Result<usize> {
    let n = (m.len() as f64).sqrt().round() as usize;
    if n == 0 || n * n != m.len() {
        return Err(KernelError::NotSquare { op, len: m.len() });
    }
    Ok(n)
}

pub fn identity_matrix(n: usize) -> Vec<f64> {
    let mut m = vec![0.0; n * n];
    for i in 0..n {
        m[i * n + i] = 1.0;
    }
    m
}

pub fn is_identity_matrix(m: &[f64], tol: f64) -> Result<bool> {
    let n = matrix_order("is_identity_matrix", m)?;
    Ok(m.iter().enumerate().all(|(k, x)| {
        let target = if k / n == k % n { 1.0 } else { 0.0 };
        (x - target).abs() <= tol
    }))
}

pub fn diagonal_matrix(entries: &[f64]) -> Vec<f64> {
    let n = entries.len();
    let mut m = vec![0.0; n * n];
    for (i, d) in entries.iter().enumerate() {
        m[i * n + i] = *d;
    }
    m
}

/// Matrix whose row i is `e_{perm[i]}`, so `(M v)_i = v[perm[i]]`.
pub fn permutation_matrix(perm: &[usize]) -> Result<Vec<f64>> {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &p in perm {
        if p >= n || seen[p] {
            return Err(KernelError::BadPermutation { len: n });
        }
        seen[p] = true;
    }
    let mut m = vec![0.0; n * n];
    for (i, &p) in perm.iter().enumerate() {
        m[i * n + p] = 1.0;
    }
    Ok(m)
}

pub fn transpose(m: &[f64]) -> Result<Vec<f64>> {
    let n = matrix_order("transpose", m)?;
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            out[j * n + i] = m[i * n + j];
        }
    }
    Ok(out)
}

pub fn trace(m: &[f64]) -> Result<f64> {
    let n = matrix_order("trace", m)?;
    Ok((0..n).map(|i| m[i * n + i]).sum())
}

/// Matrix product `a · b`.
pub fn times(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    let mut out = vec![0.0; a.len()];
    times_into(&mut out, a, b)?;
    Ok(out)
}

/// `dst = a · b`.
pub fn times_into(dst: &mut [f64], a: &[f64], b: &[f64]) -> Result<()> {
    let n = matrix_order("times", a)?;
    check_len("times", b, n * n)?;
    check_len("times", dst, n * n)?;
    for i in 0..n {
        for j in 0..n {
            let mut s = 0.0;
            for k in 0..n {
                s += a[i * n + k] * b[k * n + j];
            }
            dst[i * n + j] = s;
        }
    }
    Ok(())
}

/// `m · v` for a matrix of order `len(v)`.
pub fn apply_linear(m: &[f64], v: &[f64]) -> Result<Vec<f64>> {
    let mut out = vec![0.0; v.len()];
    apply_linear_into(&mut out, m, v)?;
    Ok(out)
}

pub fn apply_linear_into(dst: &mut [f64], m: &[f64], v: &[f64]) -> Result<()> {
    let n = matrix_order("apply_linear", m)?;
    check_len("apply_linear", v, n)?;
    check_len("apply_linear", dst, n)?;
    for i in 0..n {
        dst[i] = super::vector::dot(&m[i * n..(i + 1) * n], v);
    }
    Ok(())
}

/// Affine action of a matrix of order `len(v) + 1`: `v` gets an implicit
/// trailing 1, the product is dehomogenized and its last slot dropped.
///
/// A product whose last coordinate is (nearly) zero is not divided.
pub fn apply_projective(m: &[f64], v: &[f64]) -> Result<Vec<f64>> {
    let mut out = vec![0.0; v.len()];
    apply_projective_into(&mut out, m, v)?;
    Ok(out)
}

pub fn apply_projective_into(dst: &mut [f64], m: &[f64], v: &[f64]) -> Result<()> {
    let n = matrix_order("apply_projective", m)?;
    check_len("apply_projective", v, n - 1)?;
    check_len("apply_projective", dst, n - 1)?;
    let mut hom = v.to_vec();
    hom.push(1.0);
    let mut image = vec![0.0; n];
    apply_linear_into(&mut image, m, &hom)?;
    divide_by_last(&mut image);
    dst.copy_from_slice(&image[..n - 1]);
    Ok(())
}

/// `m · v`, inferring linear vs. projective action from the sizes.
pub fn matrix_times_vector(m: &[f64], v: &[f64]) -> Result<Vec<f64>> {
    let n = matrix_order("matrix_times_vector", m)?;
    if n == v.len() {
        apply_linear(m, v)
    } else if n == v.len() + 1 {
        apply_projective(m, v)
    } else {
        Err(KernelError::size("matrix_times_vector", n, v.len()))
    }
}

/// `uᵀ q v`.
pub fn bilinear_form(q: &[f64], u: &[f64], v: &[f64]) -> Result<f64> {
    let qv = apply_linear(q, v)?;
    check_len("bilinear_form", u, qv.len())?;
    Ok(super::vector::dot(u, &qv))
}

/// `c · m · c⁻¹`; `None` if `c` is singular.
pub fn conjugate_by_matrix(m: &[f64], c: &[f64]) -> Result<Option<Vec<f64>>> {
    let n = matrix_order("conjugate_by_matrix", m)?;
    check_len("conjugate_by_matrix", c, n * n)?;
    let Some(cinv) = try_inverse(c)? else {
        return Ok(None);
    };
    let cm = times(c, m)?;
    Ok(Some(times(&cm, &cinv)?))
}

/// Inverse via LU; `None` for a singular (or numerically useless) matrix.
pub fn try_inverse(m: &[f64]) -> Result<Option<Vec<f64>>> {
    let n = matrix_order("try_inverse", m)?;
    let a = DMatrix::from_row_slice(n, n, m);
    let Some(inv) = a.try_inverse() else {
        return Ok(None);
    };
    // Column-major storage of the transpose is the row-major layout of `inv`.
    let out = inv.transpose().as_slice().to_vec();
    if out.iter().any(|x| !x.is_finite()) {
        return Ok(None);
    }
    Ok(Some(out))
}

/// Rows of `m`, one per line, fixed-width.
pub fn format_matrix(m: &[f64]) -> Result<String> {
    let n = matrix_order("format_matrix", m)?;
    let mut s = String::new();
    for row in m.chunks(n) {
        for (j, x) in row.iter().enumerate() {
            if j > 0 {
                s.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = write!(s, "{x:>10.4}");
        }
        s.push('\n');
    }
    Ok(s)
}
