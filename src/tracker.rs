use std::thread;
use std::time::{Duration, Instant};

use crate::aprs::{Axis, PositionReport, encode_coordinate};
use crate::beacon::{BeaconReason, BeaconScheduler, Decision};
use crate::config::TrackerConfig;
use crate::constants::KEYING_POLL_MS;
use crate::error::Result;
use crate::fix::GeoFix;
use crate::gps::{FixSource, GpsReading, NmeaDecoder};
use crate::modem::AprsModem;
use crate::trigger::ManualTrigger;

/// Result of closing one sampling window
#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutcome {
    /// No sentence decoded during the window
    NoData,
    /// Sentences arrived but the receiver has no position yet
    NoFix,
    /// Location too old and stale fixes are rejected
    StaleSkipped,
    /// The fix was evaluated; lists the beacons sent for it
    Evaluated {
        fix: GeoFix,
        beacons: Vec<BeaconReason>,
    },
}

/// Acquisition, beacon decision and transmission loop
///
/// Sentences are collected for one sampling window, then the latest reading
/// is evaluated once. Transmissions block until the modem releases the
/// transmitter; no sentences are read in the meantime.
pub struct Tracker<M: AprsModem> {
    config: TrackerConfig,
    scheduler: BeaconScheduler,
    decoder: NmeaDecoder,
    modem: M,
    window_start: Option<Duration>,
    beacons_sent: usize,
}

impl<M: AprsModem> Tracker<M> {
    pub fn new(config: TrackerConfig, mut modem: M) -> Result<Self> {
        config.validate()?;
        modem.configure_station(&config.station)?;

        Ok(Self {
            scheduler: BeaconScheduler::new(config.smart_beacon.clone()),
            decoder: NmeaDecoder::new(config.gps.clock),
            config,
            modem,
            window_start: None,
            beacons_sent: 0,
        })
    }

    /// Feed one sentence line
    ///
    /// Returns true once the sampling window has elapsed; the caller should
    /// then call [`close_window`](Self::close_window).
    pub fn feed_line(&mut self, line: &str, received_at: Duration) -> bool {
        self.decoder.feed_line(line, received_at);

        let now = self.decoder.now();
        let start = *self.window_start.get_or_insert(now);
        now.checked_sub(start)
            .is_some_and(|elapsed| elapsed >= self.config.gps.sampling_window())
    }

    /// Evaluate the data gathered in the current window and start a new one
    ///
    /// `manual` forces a beacon ahead of the scheduler decision. A press in a
    /// window without a usable fix is dropped.
    pub fn close_window(&mut self, manual: bool) -> WindowOutcome {
        self.window_start = Some(self.decoder.now());

        if !self.decoder.take_new_data() {
            ignored_press(manual, "no GPS data");
            return WindowOutcome::NoData;
        }

        let Some(reading) = self.decoder.reading() else {
            log::info!("No fix detected");
            ignored_press(manual, "no fix");
            return WindowOutcome::NoFix;
        };

        if reading.is_stale(self.config.gps.stale_after()) {
            log::warn!(
                "Warning: possible stale data! (location age {}ms)",
                reading.location_age.as_millis()
            );
            if self.config.gps.reject_stale {
                ignored_press(manual, "stale fix");
                return WindowOutcome::StaleSkipped;
            }
        } else {
            log::debug!("Data is current.");
        }

        let fix = reading.to_fix();
        log_reading(&reading, &fix);

        let mut beacons = Vec::new();

        if manual {
            log::info!("MANUAL UPDATE");
            self.scheduler.force(fix.timestamp);
            self.transmit(&fix);
            beacons.push(BeaconReason::Manual);
        }

        if let Decision::TransmitNow(reason) = self.scheduler.evaluate(&fix) {
            log::info!("APRS UPDATE ({:?})", reason);
            self.transmit(&fix);
            beacons.push(reason);
        }

        WindowOutcome::Evaluated { fix, beacons }
    }

    /// Consume a source until it ends
    ///
    /// Arrival times come from the host monotonic clock. The last, partial
    /// window is evaluated when the stream ends.
    pub fn run<S: FixSource>(
        &mut self,
        source: &mut S,
        trigger: Option<&ManualTrigger>,
    ) -> Result<()> {
        let started = Instant::now();

        while let Some(line) = source.next_line()? {
            if self.feed_line(&line, started.elapsed()) {
                let manual = trigger.is_some_and(|t| t.poll());
                self.close_window(manual);
            }
        }

        let manual = trigger.is_some_and(|t| t.poll());
        self.close_window(manual);

        log::info!("GPS stream ended after {} beacons", self.beacons_sent);
        Ok(())
    }

    /// Hand one position to the modem and wait until it is off the air
    ///
    /// Failures are logged and not retried; the next periodic beacon
    /// covers a lost one.
    fn transmit(&mut self, fix: &GeoFix) {
        let report = PositionReport::from_fix(fix, &self.config.comment);
        log::debug!("Comment: {}", report.position.comment);

        match self.modem.send_location(&report) {
            Ok(()) => {
                while self.modem.is_keyed() {
                    thread::sleep(Duration::from_millis(KEYING_POLL_MS));
                }
                self.beacons_sent += 1;
            }
            Err(e) => log::error!("Beacon not sent: {}", e),
        }
    }

    pub fn beacons_sent(&self) -> usize {
        self.beacons_sent
    }

    pub fn scheduler(&self) -> &BeaconScheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn modem(&self) -> &M {
        &self.modem
    }

    pub fn into_modem(self) -> M {
        self.modem
    }
}

fn ignored_press(manual: bool, why: &str) {
    if manual {
        log::debug!("Manual beacon ignored: {}", why);
    }
}

fn log_reading(reading: &GpsReading, fix: &GeoFix) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let utc = reading
        .utc
        .map_or("-".to_string(), |t| t.format("%d/%m/%Y %H:%M:%S").to_string());
    log::debug!(
        "{} LAT={} LON={} {}/{} Altitude m/ft: {:.0}/{} sats: {}",
        utc,
        fix.latitude.micro(),
        fix.longitude.micro(),
        encode_coordinate(fix.latitude, Axis::Latitude),
        encode_coordinate(fix.longitude, Axis::Longitude),
        reading.altitude_m,
        fix.altitude_feet,
        reading.satellites
    );
}
