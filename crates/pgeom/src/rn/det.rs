//! Determinants, minors and basis completion.
//!
//! - Orders 1–4 use hand-expanded closed forms.
//! - Larger orders use Laplace expansion along the first row.
//! - `complete_basis` extends k independent rows by cofactor vectors
//!   (generalized cross products), each orthogonal to every other row.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::matrix::matrix_order;
use crate::error::{KernelError, Result};

/// Fixed seed for the placeholder rows of `complete_basis`.
const FILL_SEED: u64 = 0x5eed_ba5e;

/// Drop row `row` and column `col` of a square matrix.
pub fn submatrix(m: &[f64], row: usize, col: usize) -> Result<Vec<f64>> {
    let n = matrix_order("submatrix", m)?;
    if row >= n {
        return Err(KernelError::size("submatrix", n, row));
    }
    if col >= n {
        return Err(KernelError::size("submatrix", n, col));
    }
    let mut out = Vec::with_capacity((n - 1) * (n - 1));
    for i in (0..n).filter(|&i| i != row) {
        for j in (0..n).filter(|&j| j != col) {
            out.push(m[i * n + j]);
        }
    }
    Ok(out)
}

pub fn determinant(m: &[f64]) -> Result<f64> {
    let n = matrix_order("determinant", m)?;
    Ok(match n {
        1 => m[0],
        2 => m[0] * m[3] - m[1] * m[2],
        3 => {
            m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
                + m[2] * (m[3] * m[7] - m[4] * m[6])
        }
        4 => det4(m),
        _ => laplace(m, n)?,
    })
}

/// Expansion by 2×2 minors of rows (0,1) against complementary rows (2,3).
fn det4(m: &[f64]) -> f64 {
    let s0 = m[0] * m[5] - m[1] * m[4];
    let s1 = m[0] * m[6] - m[2] * m[4];
    let s2 = m[0] * m[7] - m[3] * m[4];
    let s3 = m[1] * m[6] - m[2] * m[5];
    let s4 = m[1] * m[7] - m[3] * m[5];
    let s5 = m[2] * m[7] - m[3] * m[6];

    let c5 = m[10] * m[15] - m[11] * m[14];
    let c4 = m[9] * m[15] - m[11] * m[13];
    let c3 = m[9] * m[14] - m[10] * m[13];
    let c2 = m[8] * m[15] - m[11] * m[12];
    let c1 = m[8] * m[14] - m[10] * m[12];
    let c0 = m[8] * m[13] - m[9] * m[12];

    s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
}

fn laplace(m: &[f64], n: usize) -> Result<f64> {
    let mut det = 0.0;
    for j in 0..n {
        if m[j] == 0.0 {
            continue;
        }
        let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
        det += sign * m[j] * determinant(&submatrix(m, 0, j)?)?;
    }
    Ok(det)
}

/// Signed minor `(-1)^{i+j} det(submatrix(m, i, j))`.
pub fn cofactor(m: &[f64], i: usize, j: usize) -> Result<f64> {
    let n = matrix_order("cofactor", m)?;
    if n == 1 {
        return Ok(1.0);
    }
    let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
    Ok(sign * determinant(&submatrix(m, i, j)?)?)
}

/// Transposed cofactor matrix; `m · adj(m) = det(m) · I`.
pub fn adjugate(m: &[f64]) -> Result<Vec<f64>> {
    let n = matrix_order("adjugate", m)?;
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            out[j * n + i] = cofactor(m, i, j)?;
        }
    }
    Ok(out)
}

/// Extend `k < n` linearly independent n-vectors to a basis of Rⁿ.
///
/// Rows k..n start as fixed pseudo-random numbers; then each row i ≥ k is
/// replaced, in order, by its cofactor vector `c_j = (-1)^{i+j} det(M_ij)`.
/// Every new row is orthogonal to all other rows of the matrix at the time
/// it is written, in particular to the input rows and earlier new rows.
///
/// `k == n` returns the input unchanged.
pub fn complete_basis<V: AsRef<[f64]>>(rows: &[V]) -> Result<Vec<Vec<f64>>> {
    let k = rows.len();
    let first = rows
        .first()
        .ok_or_else(|| KernelError::size("complete_basis", 1, 0))?;
    let n = first.as_ref().len();
    if k > n {
        return Err(KernelError::size("complete_basis", n, k));
    }
    let mut m = vec![0.0; n * n];
    for (i, r) in rows.iter().enumerate() {
        let r = r.as_ref();
        if r.len() != n {
            return Err(KernelError::size("complete_basis", n, r.len()));
        }
        m[i * n..(i + 1) * n].copy_from_slice(r);
    }
    let mut rng = StdRng::seed_from_u64(FILL_SEED);
    for x in &mut m[k * n..] {
        *x = rng.gen_range(-1.0..1.0);
    }
    for i in k..n {
        let mut row = vec![0.0; n];
        for (j, c) in row.iter_mut().enumerate() {
            *c = cofactor(&m, i, j)?;
        }
        m[i * n..(i + 1) * n].copy_from_slice(&row);
    }
    Ok(m.chunks(n).map(|r| r.to_vec()).collect())
}
