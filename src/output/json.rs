use serde_json::json;

use super::{Formatter, iso8601_timestamp};
use crate::aprs::{PositionReport, source_address};
use crate::config::StationConfig;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, station: &StationConfig, report: &PositionReport) -> String {
        json!({
            "ts": iso8601_timestamp(),
            "source": source_address(station),
            "symbol": station.symbol.code().to_string(),
            "lat": report.position.latitude,
            "lon": report.position.longitude,
            "course": report.course,
            "speed_kt": report.speed_knots,
            "comment": report.position.comment,
        })
        .to_string()
    }
}
