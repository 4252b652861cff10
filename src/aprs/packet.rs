use crate::aprs::position::EncodedPosition;
use crate::config::{StationConfig, Symbol};
use crate::fix::GeoFix;

/// Destination (tocall) placed in the AX.25 header
pub const DESTINATION: &str = "APZMDM";

/// Digipeater path requested for every beacon
pub const PATH: [&str; 2] = ["WIDE1-1", "WIDE2-2"];

const MAX_SPEED_KNOTS: u16 = 999;
const MAX_COURSE: u16 = 360;

/// Everything the modem needs for one position beacon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionReport {
    pub position: EncodedPosition,
    pub speed_knots: u16,
    /// Course in whole degrees, 0 when unknown
    pub course: u16,
}

impl PositionReport {
    pub fn from_fix(fix: &GeoFix, free_text: &str) -> Self {
        Self {
            position: EncodedPosition::from_fix(fix, free_text),
            speed_knots: fix.speed_knots(),
            course: fix.course,
        }
    }

    /// APRS information field: position without timestamp, no messaging
    ///
    /// `!DDMM.hhN/DDDMM.hhE<sym>CCC/SSS<comment>`
    pub fn info_field(&self, symbol: Symbol) -> String {
        format!(
            "!{}{}{}{}{:03}/{:03}{}",
            self.position.latitude,
            Symbol::TABLE,
            self.position.longitude,
            symbol.code(),
            self.course.min(MAX_COURSE),
            self.speed_knots.min(MAX_SPEED_KNOTS),
            self.position.comment
        )
    }

    /// TNC2 monitor format: `CALL-SSID>DEST,PATH:info`
    pub fn tnc2_line(&self, station: &StationConfig) -> String {
        format!(
            "{}>{},{}:{}",
            source_address(station),
            DESTINATION,
            PATH.join(","),
            self.info_field(station.symbol)
        )
    }
}

/// Callsign with SSID suffix, SSID 0 omitted
pub fn source_address(station: &StationConfig) -> String {
    if station.ssid == 0 {
        station.callsign.to_string()
    } else {
        format!("{}-{}", station.callsign, station.ssid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::FixedDegrees;
    use std::time::Duration;

    fn report() -> PositionReport {
        let fix = GeoFix {
            latitude: FixedDegrees::from_micro(45_123_400),
            longitude: FixedDegrees::from_micro(-7_654_321),
            speed_kmh: 100.0,
            course: 87,
            altitude_feet: 1234,
            timestamp: Duration::ZERO,
        };
        PositionReport::from_fix(&fix, " test")
    }

    #[test]
    fn test_info_field() {
        assert_eq!(
            report().info_field(Symbol::Bike),
            "!4507.40N/00739.25Wb087/053/A=001234 test"
        );
    }

    #[test]
    fn test_speed_clamped_to_three_digits() {
        let mut report = report();
        report.speed_knots = 1500;
        assert!(report.info_field(Symbol::Car).contains(">087/999/A="));
    }

    #[test]
    fn test_tnc2_line() {
        let station = StationConfig::default();
        assert_eq!(
            report().tnc2_line(&station),
            "MYCALL-7>APZMDM,WIDE1-1,WIDE2-2:!4507.40N/00739.25Wb087/053/A=001234 test"
        );
    }

    #[test]
    fn test_source_address_without_ssid() {
        let station = StationConfig {
            ssid: 0,
            ..StationConfig::default()
        };
        assert_eq!(source_address(&station), "MYCALL");
    }
}
