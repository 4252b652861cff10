use super::Formatter;
use crate::aprs::PositionReport;
use crate::config::StationConfig;

/// TNC2 monitor format, as printed by most TNCs and accepted by APRS-IS
pub struct Tnc2Formatter;

impl Formatter for Tnc2Formatter {
    fn format(&self, station: &StationConfig, report: &PositionReport) -> String {
        report.tnc2_line(station)
    }
}
