use std::io::Write;
use std::time::{Duration, Instant};

use super::AprsModem;
use crate::aprs::packet::PATH;
use crate::aprs::{PositionReport, source_address};
use crate::config::{ModemConfig, StationConfig, Symbol};
use crate::constants::{AFSK_BAUD, AX25_FRAME_OVERHEAD_BYTES};
use crate::error::{Result, TrackerError};
use crate::output::Formatter;

/// Estimated on-air time for an APRS frame at 1200 baud
///
/// Counts the information field, the AX.25 framing and one address per
/// digipeater hop; bit stuffing is ignored.
pub fn estimate_airtime(info_len: usize, tx_delay: Duration) -> Duration {
    let frame_bytes = info_len + AX25_FRAME_OVERHEAD_BYTES + 7 * PATH.len();
    tx_delay + Duration::from_secs_f32(frame_bytes as f32 * 8.0 / AFSK_BAUD)
}

/// Modem that writes each packet to a text sink instead of the air
///
/// With `simulate_airtime` the keying indicator stays up for the time the
/// frame would take at 1200 baud.
pub struct ConsoleModem<W: Write + Send> {
    writer: W,
    formatter: Box<dyn Formatter>,
    config: ModemConfig,
    station: Option<StationConfig>,
    header_written: bool,
    keyed_until: Option<Instant>,
    sent: usize,
}

impl<W: Write + Send> ConsoleModem<W> {
    pub fn new(writer: W, formatter: Box<dyn Formatter>, config: &ModemConfig) -> Self {
        Self {
            writer,
            formatter,
            config: config.clone(),
            station: None,
            header_written: false,
            keyed_until: None,
            sent: 0,
        }
    }

    /// Number of packets sent so far
    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> AprsModem for ConsoleModem<W> {
    fn configure_station(&mut self, station: &StationConfig) -> Result<()> {
        log::info!(
            "Station {} symbol {}{}",
            source_address(station),
            Symbol::TABLE,
            station.symbol.code()
        );
        self.station = Some(station.clone());
        Ok(())
    }

    fn send_location(&mut self, report: &PositionReport) -> Result<()> {
        let station = self
            .station
            .as_ref()
            .ok_or_else(|| TrackerError::Modem("station not configured".into()))?;

        if !self.header_written {
            if let Some(header) = self.formatter.header() {
                writeln!(self.writer, "{}", header)?;
            }
            self.header_written = true;
        }

        writeln!(self.writer, "{}", self.formatter.format(station, report))?;
        self.writer.flush()?;
        self.sent += 1;

        if self.config.simulate_airtime {
            let info_len = report.info_field(station.symbol).len();
            let airtime =
                estimate_airtime(info_len, Duration::from_millis(self.config.tx_delay_ms));
            log::debug!("Keyed for {:.0}ms", airtime.as_secs_f32() * 1000.0);
            self.keyed_until = Some(Instant::now() + airtime);
        }

        Ok(())
    }

    fn is_keyed(&self) -> bool {
        self.keyed_until.is_some_and(|until| Instant::now() < until)
    }
}
