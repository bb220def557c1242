//! The three classical metrics as a closed enumeration.

use std::fmt;
use std::str::FromStr;

/// Selects the bilinear form `<u,v> = Σ_{i<n-1} u_i v_i + m · u_{n-1} v_{n-1}`.
///
/// `m` is [`Metric::sign`]: 0 (Euclidean), +1 (elliptic), −1 (hyperbolic).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    #[default]
    Euclidean,
    Elliptic,
    Hyperbolic,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Euclidean, Metric::Elliptic, Metric::Hyperbolic];

    /// Coefficient of the homogeneous coordinate in the form.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Metric::Euclidean => 0.0,
            Metric::Elliptic => 1.0,
            Metric::Hyperbolic => -1.0,
        }
    }

    #[inline]
    pub fn as_i32(self) -> i32 {
        match self {
            Metric::Euclidean => 0,
            Metric::Elliptic => 1,
            Metric::Hyperbolic => -1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Elliptic => "elliptic",
            Metric::Hyperbolic => "hyperbolic",
        }
    }
}

/// Unrecognized metric name or code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMetricError {
    input: String,
}

impl fmt::Display for ParseMetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown metric {:?} (expected euclidean|elliptic|hyperbolic or 0|1|-1)",
            self.input
        )
    }
}

impl std::error::Error for ParseMetricError {}

impl TryFrom<i32> for Metric {
    type Error = ParseMetricError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Metric::Euclidean),
            1 => Ok(Metric::Elliptic),
            -1 => Ok(Metric::Hyperbolic),
            other => Err(ParseMetricError {
                input: other.to_string(),
            }),
        }
    }
}

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "0" => Ok(Metric::Euclidean),
            "elliptic" | "spherical" | "1" => Ok(Metric::Elliptic),
            "hyperbolic" | "-1" => Ok(Metric::Hyperbolic),
            _ => Err(ParseMetricError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
