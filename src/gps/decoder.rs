//! NMEA decoder adapter
//!
//! Sentence parsing is done by the `nmea0183` crate. This module merges the
//! sentence types a tracker needs into one reading:
//! - **GGA**: position, altitude, satellite count, UTC time
//! - **RMC**: position, speed, course, UTC date and time
//! - **VTG**: speed and course (backup source)
//!
//! Position, speed and course are only taken from sentences that report a
//! fix (GGA quality above 0, RMC status `A`). Fields keep their last known
//! value until a newer sentence replaces them, so a receiver that loses lock
//! keeps reporting the old position with a growing location age.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use nmea0183::{GPSQuality, Mode, ParseResult, Parser};

use crate::config::ClockMode;
use crate::constants::{FEET_PER_METER, KMH_PER_KNOT};
use crate::fix::{FixedDegrees, GeoFix};
use crate::gps::clock::GpsClock;

/// Snapshot of the decoder state with a known position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsReading {
    /// Latitude in degrees (-90 to +90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to +180)
    pub longitude: f64,
    /// Altitude in meters above sea level (0 until a GGA reports one)
    pub altitude_m: f32,
    pub speed_knots: f32,
    /// Course over ground in degrees (0-360)
    pub course_deg: f32,
    pub satellites: u8,
    /// UTC date and time, when both have been received
    pub utc: Option<NaiveDateTime>,
    /// Time since the position was last updated
    pub location_age: Duration,
    /// Decoder clock at the time of the reading
    pub timestamp: Duration,
}

impl GpsReading {
    pub fn speed_kmh(&self) -> f32 {
        self.speed_knots * KMH_PER_KNOT
    }

    /// Altitude in whole feet, truncated toward zero
    pub fn altitude_feet(&self) -> i32 {
        (self.altitude_m * FEET_PER_METER) as i32
    }

    pub fn is_stale(&self, limit: Duration) -> bool {
        self.location_age > limit
    }

    pub fn to_fix(&self) -> GeoFix {
        GeoFix {
            latitude: FixedDegrees::from_degrees(self.latitude),
            longitude: FixedDegrees::from_degrees(self.longitude),
            speed_kmh: self.speed_kmh().max(0.0),
            course: whole_degrees(self.course_deg),
            altitude_feet: self.altitude_feet(),
            timestamp: self.timestamp,
        }
    }
}

fn whole_degrees(course: f32) -> u16 {
    if course.is_finite() {
        (course.rem_euclid(360.0) as u16) % 360
    } else {
        0
    }
}

/// Merged state from the sentence stream
#[derive(Debug, Clone, Copy, Default)]
struct GpsState {
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude_m: Option<f32>,
    speed_knots: Option<f32>,
    course_deg: Option<f32>,
    satellites: Option<u8>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    location_at: Option<Duration>,
}

impl GpsState {
    /// Time and satellite count always; position only with a fix
    fn update_from_gga(&mut self, gga: &nmea0183::GGA, now: Duration) {
        let t = &gga.time;
        self.time = naive_time(t.hours as u32, t.minutes as u32, t.seconds as f64).or(self.time);
        self.satellites = Some(gga.sat_in_use);

        if gga.gps_quality == GPSQuality::NoFix {
            log::debug!("GGA without fix, position ignored");
            return;
        }
        self.latitude = Some(gga.latitude.as_f64());
        self.longitude = Some(gga.longitude.as_f64());
        self.altitude_m = Some(gga.altitude.meters);
        self.location_at = Some(now);
    }

    /// Date and time always; position and motion only with status `A`
    fn update_from_rmc(&mut self, rmc: &nmea0183::RMC, now: Duration) {
        let d = &rmc.datetime.date;
        let t = &rmc.datetime.time;
        self.date = naive_date(d.year as i32, d.month as u32, d.day as u32).or(self.date);
        self.time = naive_time(t.hours as u32, t.minutes as u32, t.seconds as f64).or(self.time);

        if rmc.mode == Mode::NotValid {
            log::debug!("RMC status void, position ignored");
            return;
        }
        self.latitude = Some(rmc.latitude.as_f64());
        self.longitude = Some(rmc.longitude.as_f64());
        self.speed_knots = Some(rmc.speed.as_knots());
        if let Some(course) = &rmc.course {
            self.course_deg = Some(course.degrees);
        }
        self.location_at = Some(now);
    }

    fn update_from_vtg(&mut self, vtg: &nmea0183::VTG) {
        if vtg.mode == Mode::NotValid {
            return;
        }
        self.speed_knots = Some(vtg.speed.as_knots());
        if let Some(course) = &vtg.course {
            self.course_deg = Some(course.degrees);
        }
    }

    fn utc(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.date?, self.time?))
    }
}

fn time_of_day_secs(hours: u32, minutes: u32, seconds: f64) -> f64 {
    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds
}

fn naive_time(hours: u32, minutes: u32, seconds: f64) -> Option<NaiveTime> {
    let whole = seconds.trunc();
    let millis = ((seconds - whole) * 1000.0) as u32;
    NaiveTime::from_hms_milli_opt(hours, minutes, whole as u32, millis)
}

// Two-digit years are 20xx
fn naive_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let year = if year < 100 { year + 2000 } else { year };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Incremental NMEA decoder with a fix clock
///
/// # Example
/// ```
/// use std::time::Duration;
/// use aprs_tracker::config::ClockMode;
/// use aprs_tracker::gps::NmeaDecoder;
///
/// let mut decoder = NmeaDecoder::new(ClockMode::Gps);
/// decoder.feed_line(
///     "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
///     Duration::ZERO,
/// );
///
/// let reading = decoder.reading().unwrap();
/// assert!((reading.latitude - 48.1173).abs() < 0.001);
/// assert_eq!(reading.satellites, 8);
/// ```
pub struct NmeaDecoder {
    parser: Parser,
    clock_mode: ClockMode,
    gps_clock: GpsClock,
    state: GpsState,
    now: Duration,
    new_data: bool,
}

impl NmeaDecoder {
    pub fn new(clock_mode: ClockMode) -> Self {
        Self {
            parser: Parser::new(),
            clock_mode,
            gps_clock: GpsClock::new(),
            state: GpsState::default(),
            now: Duration::ZERO,
            new_data: false,
        }
    }

    /// Feed one sentence line (with or without line terminator)
    ///
    /// `received_at` is the host monotonic time of arrival; it drives the
    /// clock in [`ClockMode::System`] and is ignored in [`ClockMode::Gps`].
    /// Returns the number of sentences decoded.
    pub fn feed_line(&mut self, line: &str, received_at: Duration) -> usize {
        let line = line.trim_end();
        log::trace!("{}", line);

        // The parser would keep buffering into the next sentence
        if line.starts_with('$') && !line.contains('*') {
            log::debug!("Truncated NMEA sentence: {}", line);
            return 0;
        }

        let mut decoded = 0;
        for &byte in line.as_bytes().iter().chain(b"\r\n") {
            if let Some(result) = self.parser.parse_from_byte(byte) {
                match result {
                    Ok(sentence) => {
                        self.apply(sentence, received_at);
                        decoded += 1;
                    }
                    Err(e) => log::debug!("Rejected NMEA sentence: {}", e),
                }
            }
        }
        decoded
    }

    fn apply(&mut self, sentence: ParseResult, received_at: Duration) {
        match sentence {
            ParseResult::GGA(Some(gga)) => {
                let t = &gga.time;
                let secs = time_of_day_secs(t.hours as u32, t.minutes as u32, t.seconds as f64);
                self.stamp(Some(secs), received_at);
                self.state.update_from_gga(&gga, self.now);
            }
            ParseResult::RMC(Some(rmc)) => {
                let t = &rmc.datetime.time;
                let secs = time_of_day_secs(t.hours as u32, t.minutes as u32, t.seconds as f64);
                self.stamp(Some(secs), received_at);
                self.state.update_from_rmc(&rmc, self.now);
            }
            ParseResult::VTG(Some(vtg)) => {
                self.stamp(None, received_at);
                self.state.update_from_vtg(&vtg);
            }
            // Valid sentence without usable data (no lock) or unused type
            _ => self.stamp(None, received_at),
        }
        self.new_data = true;
    }

    fn stamp(&mut self, time_of_day: Option<f64>, received_at: Duration) {
        match self.clock_mode {
            ClockMode::System => self.now = self.now.max(received_at),
            ClockMode::Gps => {
                if let Some(secs) = time_of_day {
                    self.now = self.gps_clock.advance(secs);
                }
            }
        }
    }

    /// Current reading, `None` until a position has been received
    pub fn reading(&self) -> Option<GpsReading> {
        let location_at = self.state.location_at?;
        Some(GpsReading {
            latitude: self.state.latitude?,
            longitude: self.state.longitude?,
            altitude_m: self.state.altitude_m.unwrap_or(0.0),
            speed_knots: self.state.speed_knots.unwrap_or(0.0),
            course_deg: self.state.course_deg.unwrap_or(0.0),
            satellites: self.state.satellites.unwrap_or(0),
            utc: self.state.utc(),
            location_age: self.now.checked_sub(location_at).unwrap_or(Duration::ZERO),
            timestamp: self.now,
        })
    }

    /// Whether any sentence decoded since the last call, clearing the flag
    pub fn take_new_data(&mut self) -> bool {
        std::mem::take(&mut self.new_data)
    }

    /// Decoder clock (latest sentence time)
    pub fn now(&self) -> Duration {
        self.now
    }
}
