//! Tolerance defaults for the kernel.
//!
//! Policy
//! - Defaults are fixed constants shared by every layer so that metric-aware
//!   routines agree on what "zero" means. Callers that need a different
//!   tolerance use the `_eps`/`tol` variants where they exist.

/// A homogeneous coordinate with `|w| <= DEHOMOGENIZE_EPS` is treated as ideal.
pub const DEHOMOGENIZE_EPS: f64 = 1e-10;
/// Two Plücker lines meet iff their pairing is below this in absolute value.
pub const PLUCKER_EPS: f64 = 1e-10;
/// Default tolerance for `is_zero`, `equals` and identity checks.
pub const ZERO_EPS: f64 = 1e-8;
/// Tolerance for `is_isometry` (max-abs metric on `Mᵀ Q M − λ Q`).
pub const ISOMETRY_EPS: f64 = 1e-8;
/// Norms below this are treated as zero by normalization routines.
pub(crate) const NORM_EPS: f64 = 1e-15;
