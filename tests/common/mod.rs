//! Shared helpers: NMEA sentence generation and a recording modem.

#![allow(dead_code)]

use std::time::Duration;

use aprs_tracker::aprs::PositionReport;
use aprs_tracker::beacon::BeaconReason;
use aprs_tracker::config::StationConfig;
use aprs_tracker::modem::AprsModem;
use aprs_tracker::{Result, Tracker, TrackerError, WindowOutcome};

/// Wrap a sentence body with `$` and its checksum
pub fn sentence(body: &str) -> String {
    let checksum = body.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("${}*{:02X}", body, checksum)
}

fn hhmmss(secs_of_day: u32) -> String {
    let secs = secs_of_day % 86_400;
    format!("{:02}{:02}{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

fn nmea_coordinate(degrees: f64, is_latitude: bool) -> String {
    let abs = degrees.abs();
    let whole = abs.trunc();
    let minutes = (abs - whole) * 60.0;
    let hemisphere = match (is_latitude, degrees < 0.0) {
        (true, false) => 'N',
        (true, true) => 'S',
        (false, false) => 'E',
        (false, true) => 'W',
    };
    if is_latitude {
        format!("{:02}{:07.4},{}", whole as u32, minutes, hemisphere)
    } else {
        format!("{:03}{:07.4},{}", whole as u32, minutes, hemisphere)
    }
}

pub fn gga(secs_of_day: u32, lat: f64, lon: f64, altitude_m: f32) -> String {
    sentence(&format!(
        "GPGGA,{},{},{},1,08,0.9,{:.1},M,46.9,M,,",
        hhmmss(secs_of_day),
        nmea_coordinate(lat, true),
        nmea_coordinate(lon, false),
        altitude_m
    ))
}

pub fn rmc(secs_of_day: u32, lat: f64, lon: f64, speed_knots: f32, course: f32) -> String {
    sentence(&format!(
        "GPRMC,{},A,{},{},{:05.1},{:05.1},130998,003.1,W",
        hhmmss(secs_of_day),
        nmea_coordinate(lat, true),
        nmea_coordinate(lon, false),
        speed_knots,
        course
    ))
}

/// One second of receiver output: GGA followed by RMC
pub fn epoch(secs_of_day: u32, speed_knots: f32, course: f32) -> [String; 2] {
    let (lat, lon) = (45.1234, 7.5);
    [
        gga(secs_of_day, lat, lon, 250.0),
        rmc(secs_of_day, lat, lon, speed_knots, course),
    ]
}

/// Receiver output for `seconds` consecutive epochs starting at `start`
pub fn track(start: u32, seconds: u32, speed_knots: f32, course: f32) -> Vec<String> {
    (start..start + seconds)
        .flat_map(|t| epoch(t, speed_knots, course))
        .collect()
}

/// Modem that keeps every report it is given
#[derive(Default)]
pub struct RecordingModem {
    pub station: Option<StationConfig>,
    pub reports: Vec<PositionReport>,
    pub fail: bool,
}

impl RecordingModem {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

impl AprsModem for RecordingModem {
    fn configure_station(&mut self, station: &StationConfig) -> Result<()> {
        self.station = Some(station.clone());
        Ok(())
    }

    fn send_location(&mut self, report: &PositionReport) -> Result<()> {
        if self.fail {
            return Err(TrackerError::Modem("transmitter offline".into()));
        }
        self.reports.push(report.clone());
        Ok(())
    }

    fn is_keyed(&self) -> bool {
        false
    }
}

/// Feed lines through the tracker the way `Tracker::run` does and collect
/// the beacons with their fix times
pub fn replay<M: AprsModem>(
    tracker: &mut Tracker<M>,
    lines: &[String],
) -> Vec<(Duration, BeaconReason)> {
    let mut beacons = Vec::new();
    let mut collect = |outcome: WindowOutcome| {
        if let WindowOutcome::Evaluated { fix, beacons: sent } = outcome {
            beacons.extend(sent.into_iter().map(|reason| (fix.timestamp, reason)));
        }
    };

    for line in lines {
        if tracker.feed_line(line, Duration::ZERO) {
            collect(tracker.close_window(false));
        }
    }
    collect(tracker.close_window(false));

    beacons
}
