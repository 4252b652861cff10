//! Default SmartBeaconing parameters and APRS protocol constants
//!
//! SmartBeaconing values follow the HamHUB recommendations for a bicycle
//! or slow vehicle. All of them can be overridden through `TrackerConfig`.

/// Below this speed (km/h) the tracker beacons at the slow rate.
pub const LOW_SPEED_KMH: f32 = 5.0;

/// Above this speed (km/h) the tracker beacons at the fast rate.
pub const HIGH_SPEED_KMH: f32 = 90.0;

/// Beacon interval when stationary or crawling, in seconds.
pub const SLOW_RATE_SECS: u32 = 300;

/// Beacon interval at or above the high speed, in seconds.
pub const FAST_BEACON_RATE_SECS: u32 = 30;

/// Minimum heading change (degrees) that counts as a corner.
pub const TURN_MIN_DEGREES: f32 = 30.0;

/// Speed-dependent part of the corner threshold (degrees × km/h).
pub const TURN_SLOPE: f32 = 240.0;

/// Shortest allowed gap between corner beacons, in seconds.
pub const MIN_TURN_TIME_SECS: u32 = 20;

/// Fixes whose location is older than this are reported as stale.
pub const STALE_FIX_AGE_MS: u64 = 5000;

/// Length of one GPS sampling window.
pub const SAMPLING_WINDOW_MS: u64 = 1000;

/// Size of the comment buffer handed to the modem, including the terminator.
pub const COMMENT_CAPACITY: usize = 36;

/// Largest altitude that fits the six-digit `/A=` field.
pub const MAX_ALTITUDE_FEET: i32 = 999_999;

/// Smallest altitude that fits the `/A=` field (sign plus five digits).
pub const MIN_ALTITUDE_FEET: i32 = -99_999;

/// Scale of the fixed-point coordinate representation (micro-degrees).
pub const MICRODEGREES_PER_DEGREE: i64 = 1_000_000;

pub const KMH_PER_KNOT: f32 = 1.852;

pub const FEET_PER_METER: f32 = 3.280_84;

/// AFSK 1200 line rate used for on-air time estimates.
pub const AFSK_BAUD: f32 = 1200.0;

/// Flags, addresses, control/PID and FCS framing an APRS info field.
pub const AX25_FRAME_OVERHEAD_BYTES: usize = 2 + 7 * 2 + 2 + 2;

/// Interval at which the keying indicator is polled while transmitting.
pub const KEYING_POLL_MS: u64 = 10;
