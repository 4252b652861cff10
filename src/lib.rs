pub mod aprs;
pub mod beacon;
pub mod config;
pub mod constants;
pub mod error;
pub mod fix;
pub mod gps;
pub mod modem;
pub mod output;
pub mod tracker;
pub mod trigger;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use tracker::{Tracker, WindowOutcome};
