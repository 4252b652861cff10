//! SmartBeaconing rate rules (HamHUB variant)
//!
//! Pure functions over the configured parameters. The scheduler combines
//! them with its transmit history to make the beacon decision.

use std::time::Duration;

use crate::config::SmartBeaconConfig;

/// Smallest turn angle between two courses, in degrees (0-180)
///
/// # Example
/// ```
/// use aprs_tracker::beacon::course_delta;
///
/// assert_eq!(course_delta(350, 10), 20);
/// assert_eq!(course_delta(10, 350), 20);
/// ```
pub fn course_delta(previous: u16, current: u16) -> u16 {
    let delta = (previous as i32 - current as i32).abs();
    if delta > 180 {
        (delta - 360).unsigned_abs() as u16
    } else {
        delta as u16
    }
}

/// Target beacon interval for a ground speed in km/h
///
/// Slow rate below the low speed, fast rate above the high speed, and in
/// between inversely proportional to speed. The result always lies within
/// `[fast_rate, slow_rate]`.
pub fn beacon_interval(config: &SmartBeaconConfig, speed_kmh: f32) -> Duration {
    let speed = sanitize_speed(speed_kmh);

    // The low-speed branch must come first: it keeps zero out of the divide.
    if speed < config.low_speed_kmh {
        config.slow_rate()
    } else if speed > config.high_speed_kmh {
        config.fast_rate()
    } else {
        let secs = config.fast_rate_secs as f32 * config.high_speed_kmh / speed;
        Duration::from_secs_f32(secs).clamp(config.fast_rate(), config.slow_rate())
    }
}

/// Heading change (degrees) that counts as a corner at this speed
///
/// Returns `None` when stationary: without motion the course is noise and
/// no turn can trigger a beacon.
pub fn turn_threshold(config: &SmartBeaconConfig, speed_kmh: f32) -> Option<f32> {
    let speed = sanitize_speed(speed_kmh);
    if speed > 0.0 {
        Some(config.turn_min_degrees + config.turn_slope / speed)
    } else {
        None
    }
}

fn sanitize_speed(speed_kmh: f32) -> f32 {
    if speed_kmh.is_finite() {
        speed_kmh.max(0.0)
    } else {
        0.0
    }
}
