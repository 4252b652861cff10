mod csv;
mod json;
mod tnc2;

use chrono::Utc;

use crate::aprs::PositionReport;
use crate::config::StationConfig;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::tnc2::Tnc2Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Tnc2,
    Json,
    Csv,
}

pub trait Formatter: Send {
    fn format(&self, station: &StationConfig, report: &PositionReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Tnc2 => Box::new(Tnc2Formatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
