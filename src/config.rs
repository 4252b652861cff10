//! Configuration for the APRS tracker.
//!
//! Every value has a default matching a typical bicycle tracker. A TOML file
//! can override any subset of them; all sections and keys are optional:
//!
//! ```toml
//! comment = "Rust APRS Tracker"
//!
//! [station]
//! callsign = "N0CALL"
//! ssid = 9
//! symbol = "car"
//!
//! [smart_beacon]
//! high_speed_kmh = 100.0
//! fast_rate_secs = 60
//! ```
//!
//! The configuration is fixed once the tracker starts.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::*;
use crate::error::{Result, TrackerError};

const MAX_CALLSIGN_LEN: usize = 6;
const MAX_SSID: u8 = 15;

/// Amateur radio callsign without SSID
///
/// Stored uppercased. Must be 1-6 ASCII letters or digits.
///
/// # Example
/// ```
/// use aprs_tracker::config::Callsign;
///
/// let call: Callsign = "n0call".parse().unwrap();
/// assert_eq!(call.as_str(), "N0CALL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Callsign(String);

impl Callsign {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Callsign {
    fn default() -> Self {
        Self("MYCALL".to_string())
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Callsign {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.len() > MAX_CALLSIGN_LEN {
            return Err(TrackerError::InvalidCallsign(format!(
                "'{}' must be 1-{} characters",
                s, MAX_CALLSIGN_LEN
            )));
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TrackerError::InvalidCallsign(format!(
                "'{}' may only contain letters and digits",
                s
            )));
        }
        Ok(Self(s.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for Callsign {
    type Error = TrackerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// APRS map symbol from the primary symbol table
///
/// # Parsing formats
/// - `bike`, `car`, `runner` - named symbols
/// - any single printable character - raw symbol code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Symbol {
    #[default]
    Bike,
    Car,
    Runner,
    Other(char),
}

impl Symbol {
    /// Symbol table identifier (primary table)
    pub const TABLE: char = '/';

    /// Symbol code character
    pub fn code(&self) -> char {
        match self {
            Symbol::Bike => 'b',
            Symbol::Car => '>',
            Symbol::Runner => '[',
            Symbol::Other(c) => *c,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Bike => f.write_str("bike"),
            Symbol::Car => f.write_str("car"),
            Symbol::Runner => f.write_str("runner"),
            Symbol::Other(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bike" => return Ok(Symbol::Bike),
            "car" => return Ok(Symbol::Car),
            "runner" => return Ok(Symbol::Runner),
            _ => {}
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_graphic() => Ok(match c {
                'b' => Symbol::Bike,
                '>' => Symbol::Car,
                '[' => Symbol::Runner,
                other => Symbol::Other(other),
            }),
            _ => Err(format!("invalid symbol: {}", s)),
        }
    }
}

impl TryFrom<String> for Symbol {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Source of fix timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    /// Monotonic host clock (live receivers)
    #[default]
    System,
    /// UTC time carried in the sentences (replaying recorded logs)
    Gps,
}

/// Station identity handed to the modem once at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub callsign: Callsign,
    /// Secondary station identifier (0-15, 0 is omitted on air)
    pub ssid: u8,
    pub symbol: Symbol,
}

/// SmartBeaconing parameters
///
/// Speeds are in km/h, rates and times in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmartBeaconConfig {
    pub low_speed_kmh: f32,
    pub high_speed_kmh: f32,
    pub slow_rate_secs: u32,
    pub fast_rate_secs: u32,
    pub turn_min_degrees: f32,
    pub turn_slope: f32,
    pub min_turn_time_secs: u32,
}

impl SmartBeaconConfig {
    pub fn slow_rate(&self) -> Duration {
        Duration::from_secs(self.slow_rate_secs as u64)
    }

    pub fn fast_rate(&self) -> Duration {
        Duration::from_secs(self.fast_rate_secs as u64)
    }

    pub fn min_turn_time(&self) -> Duration {
        Duration::from_secs(self.min_turn_time_secs as u64)
    }
}

/// GPS acquisition configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GpsConfig {
    /// Location age above which a fix is reported as stale
    pub stale_after_ms: u64,
    /// Length of one sampling window
    pub sampling_window_ms: u64,
    /// Skip stale fixes instead of only warning about them
    pub reject_stale: bool,
    pub clock: ClockMode,
}

impl GpsConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }

    pub fn sampling_window(&self) -> Duration {
        Duration::from_millis(self.sampling_window_ms)
    }
}

/// Modem configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    /// Hold the keying indicator for the estimated on-air time
    pub simulate_airtime: bool,
    /// Key-up delay before the frame starts, in milliseconds
    pub tx_delay_ms: u64,
}

/// Complete tracker configuration
///
/// # Example
/// ```
/// use aprs_tracker::config::TrackerConfig;
///
/// let mut config = TrackerConfig::default();
/// config.smart_beacon.fast_rate_secs = 60;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub station: StationConfig,
    pub smart_beacon: SmartBeaconConfig,
    pub gps: GpsConfig,
    pub modem: ModemConfig,
    /// Free text appended to the altitude in every beacon comment
    pub comment: String,
}

impl TrackerConfig {
    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        let sb = &self.smart_beacon;

        if self.station.ssid > MAX_SSID {
            return Err(TrackerError::Config(format!(
                "SSID {} out of range 0-{}",
                self.station.ssid, MAX_SSID
            )));
        }
        if sb.fast_rate_secs == 0 || sb.slow_rate_secs == 0 {
            return Err(TrackerError::Config(
                "beacon rates must be positive".to_string(),
            ));
        }
        if sb.fast_rate_secs > sb.slow_rate_secs {
            return Err(TrackerError::Config(format!(
                "fast rate {}s exceeds slow rate {}s",
                sb.fast_rate_secs, sb.slow_rate_secs
            )));
        }
        if sb.low_speed_kmh <= 0.0 || sb.low_speed_kmh >= sb.high_speed_kmh {
            return Err(TrackerError::Config(format!(
                "low speed {} km/h must be positive and below high speed {} km/h",
                sb.low_speed_kmh, sb.high_speed_kmh
            )));
        }
        if sb.turn_min_degrees < 0.0 || sb.turn_slope < 0.0 {
            return Err(TrackerError::Config(
                "turn parameters must not be negative".to_string(),
            ));
        }
        if self.gps.sampling_window_ms == 0 {
            return Err(TrackerError::Config(
                "sampling window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            callsign: Callsign::default(),
            ssid: 7,
            symbol: Symbol::Bike,
        }
    }
}

impl Default for SmartBeaconConfig {
    fn default() -> Self {
        Self {
            low_speed_kmh: LOW_SPEED_KMH,
            high_speed_kmh: HIGH_SPEED_KMH,
            slow_rate_secs: SLOW_RATE_SECS,
            fast_rate_secs: FAST_BEACON_RATE_SECS,
            turn_min_degrees: TURN_MIN_DEGREES,
            turn_slope: TURN_SLOPE,
            min_turn_time_secs: MIN_TURN_TIME_SECS,
        }
    }
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            stale_after_ms: STALE_FIX_AGE_MS,
            sampling_window_ms: SAMPLING_WINDOW_MS,
            reject_stale: false,
            clock: ClockMode::System,
        }
    }
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            simulate_airtime: false,
            tx_delay_ms: 300,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            station: StationConfig::default(),
            smart_beacon: SmartBeaconConfig::default(),
            gps: GpsConfig::default(),
            modem: ModemConfig::default(),
            comment: "Rust APRS Tracker".to_string(),
        }
    }
}
