use std::fmt;
use std::time::Duration;

use crate::constants::{KMH_PER_KNOT, MICRODEGREES_PER_DEGREE};

/// Signed fixed-point coordinate in micro-degrees (degrees × 10⁶)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct FixedDegrees(i64);

impl FixedDegrees {
    pub const fn from_micro(micro: i64) -> Self {
        Self(micro)
    }

    /// Convert from floating-point degrees, truncating toward zero
    pub fn from_degrees(degrees: f64) -> Self {
        Self((degrees * MICRODEGREES_PER_DEGREE as f64) as i64)
    }

    pub const fn micro(&self) -> i64 {
        self.0
    }

    pub fn degrees(&self) -> f64 {
        self.0 as f64 / MICRODEGREES_PER_DEGREE as f64
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for FixedDegrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.degrees())
    }
}

/// One accepted GPS fix
///
/// Built once per sampling window from the decoder state and consumed by the
/// scheduler and, when a beacon goes out, by the position encoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: FixedDegrees,
    pub longitude: FixedDegrees,
    /// Ground speed in km/h (non-negative)
    pub speed_kmh: f32,
    /// Course over ground in whole degrees, 0 when unknown
    pub course: u16,
    pub altitude_feet: i32,
    /// Monotonic time of the fix, measured from tracker start
    pub timestamp: Duration,
}

const KNOTS_EPSILON: f32 = 1e-3;

impl GeoFix {
    /// Ground speed truncated to whole knots, as reported on air
    pub fn speed_knots(&self) -> u16 {
        // Tolerance for the knots -> km/h -> knots round trip
        let knots = self.speed_kmh / KMH_PER_KNOT + KNOTS_EPSILON;
        if knots.is_finite() && knots > 0.0 {
            knots.trunc().min(u16::MAX as f32) as u16
        } else {
            0
        }
    }
}
