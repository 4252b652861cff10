use super::{Formatter, iso8601_timestamp};
use crate::aprs::{PositionReport, source_address};
use crate::config::StationConfig;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, station: &StationConfig, report: &PositionReport) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            iso8601_timestamp(),
            source_address(station),
            report.position.latitude,
            report.position.longitude,
            report.course,
            report.speed_knots,
            quote(&report.position.comment)
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,source,lat,lon,course,speed_kt,comment")
    }
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("/A=000100"), "/A=000100");
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
