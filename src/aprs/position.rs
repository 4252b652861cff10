//! APRS uncompressed position encoding.
//!
//! Coordinates are rendered as degrees, minutes and hundredths of minutes
//! followed by the hemisphere letter:
//!
//! - Latitude: `DDMM.hhN` (8 characters)
//! - Longitude: `DDDMM.hhW` (9 characters)
//!
//! Reference: APRS Protocol Reference 1.0, chapter 6 (Lat/Long Position Report Format)

use crate::constants::{
    COMMENT_CAPACITY, MAX_ALTITUDE_FEET, MICRODEGREES_PER_DEGREE, MIN_ALTITUDE_FEET,
};
use crate::fix::{FixedDegrees, GeoFix};

const MAX_LATITUDE_MICRO: u64 = 90 * MICRODEGREES_PER_DEGREE as u64;
const MAX_LONGITUDE_MICRO: u64 = 180 * MICRODEGREES_PER_DEGREE as u64;

/// Which coordinate is being encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Encode a fixed-point coordinate in APRS `DDMM.hhH` / `DDDMM.hhH` form
///
/// Hundredths of minutes are truncated, not rounded. Values beyond ±90°
/// (latitude) or ±180° (longitude) are clamped to the pole or antimeridian.
///
/// # Example
/// ```
/// use aprs_tracker::aprs::{Axis, encode_coordinate};
/// use aprs_tracker::fix::FixedDegrees;
///
/// let lat = FixedDegrees::from_micro(45_123_400);
/// assert_eq!(encode_coordinate(lat, Axis::Latitude), "4507.40N");
///
/// let lon = FixedDegrees::from_micro(-7_654_321);
/// assert_eq!(encode_coordinate(lon, Axis::Longitude), "00739.25W");
/// ```
pub fn encode_coordinate(value: FixedDegrees, axis: Axis) -> String {
    let scale = MICRODEGREES_PER_DEGREE as u64;
    let limit = match axis {
        Axis::Latitude => MAX_LATITUDE_MICRO,
        Axis::Longitude => MAX_LONGITUDE_MICRO,
    };
    let micro = value.micro().unsigned_abs().min(limit);

    // Minutes scaled by 10⁶, then folded into DDMM / DDDMM
    let minutes = (micro % scale) * 60;
    let degrees_minutes = (micro / scale) * 100 + minutes / scale;
    let hundredths = (minutes % scale) / 10_000;

    match axis {
        Axis::Latitude => {
            let hemisphere = if value.is_negative() { 'S' } else { 'N' };
            format!("{:04}.{:02}{}", degrees_minutes, hundredths, hemisphere)
        }
        Axis::Longitude => {
            let hemisphere = if value.is_negative() { 'W' } else { 'E' };
            format!("{:05}.{:02}{}", degrees_minutes, hundredths, hemisphere)
        }
    }
}

/// Build the beacon comment: `/A=` altitude in feet followed by free text
///
/// The altitude field is six characters: zero-padded digits, or a minus sign
/// and five digits below sea level. Altitudes that do not fit are clamped.
/// The result fits the modem's comment buffer (one byte is reserved for the
/// terminator) and is cut on a character boundary.
pub fn build_comment(altitude_feet: i32, free_text: &str) -> String {
    let altitude = altitude_feet.clamp(MIN_ALTITUDE_FEET, MAX_ALTITUDE_FEET);
    let mut comment = format!("/A={:06}{}", altitude, free_text);
    truncate_on_char_boundary(&mut comment, COMMENT_CAPACITY - 1);
    comment
}

fn truncate_on_char_boundary(s: &mut String, max_len: usize) {
    if s.len() <= max_len {
        return;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

/// Position strings for one transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPosition {
    /// `DDMM.hhN`
    pub latitude: String,
    /// `DDDMM.hhE`
    pub longitude: String,
    /// `/A=aaaaaa` plus free text
    pub comment: String,
}

impl EncodedPosition {
    pub fn from_fix(fix: &GeoFix, free_text: &str) -> Self {
        Self {
            latitude: encode_coordinate(fix.latitude, Axis::Latitude),
            longitude: encode_coordinate(fix.longitude, Axis::Longitude),
            comment: build_comment(fix.altitude_feet, free_text),
        }
    }
}
