pub mod console;

pub use console::{ConsoleModem, estimate_airtime};

use crate::aprs::PositionReport;
use crate::config::StationConfig;
use crate::error::Result;

/// APRS modem: builds the frame, keys the transmitter and sends it
///
/// The station identity is set once at startup. `send_location` may return
/// before the frame is fully on air; callers poll `is_keyed` until it drops.
pub trait AprsModem {
    fn configure_station(&mut self, station: &StationConfig) -> Result<()>;

    fn send_location(&mut self, report: &PositionReport) -> Result<()>;

    /// Transmitter keying indicator (PTT / TX LED)
    fn is_keyed(&self) -> bool;
}
