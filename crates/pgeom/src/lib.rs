//! Metric-generic projective geometry kernel.
//!
//! Layers
//! - `rn`: dimension-agnostic vector and matrix routines on flat buffers.
//! - `pn`: homogeneous-coordinate geometry parameterized by [`Metric`]
//!   (Euclidean, elliptic, hyperbolic); one formula per operation.
//! - `p3`: 3D specializations (Plücker lines, planes, isometries, camera
//!   matrices) on fixed-size arrays.
//!
//! Every routine is a pure function of its inputs. Shape errors are reported
//! as [`KernelError`]; degenerate numerical input falls back to documented
//! results.

pub mod cfg;
pub mod error;
pub mod p3;
pub mod pn;
pub mod rn;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{KernelError, Result};
pub use pn::Metric;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::p3::{Line3, Mat4, Plane3, Point3, ORIGIN};
    pub use crate::pn::{
        dehomogenize, distance_between, drag_towards, inner_product, linear_interpolation,
        normalize, polarize_plane, project_to_tangent_space, Metric,
    };
    pub use crate::{KernelError, Result};
}
