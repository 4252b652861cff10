use std::time::Duration;

use crate::beacon::rate::{beacon_interval, course_delta, turn_threshold};
use crate::config::SmartBeaconConfig;
use crate::fix::GeoFix;

/// Why a beacon was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeaconReason {
    /// Heading changed by more than the corner threshold
    Corner,
    /// Beacon interval for the current speed elapsed
    Periodic,
    /// Operator requested a beacon
    Manual,
}

/// Outcome of evaluating one fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Suppress,
    TransmitNow(BeaconReason),
}

impl Decision {
    pub fn is_transmit(&self) -> bool {
        matches!(self, Decision::TransmitNow(_))
    }
}

/// Rate-control state carried between fixes
///
/// Starts as "never transmitted", so the first evaluated fix always beacons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeaconerState {
    last_tx_time: Option<Duration>,
    last_course: u16,
    tx_interval: Duration,
}

impl BeaconerState {
    /// Time of the last beacon, `None` before the first one
    pub fn last_tx_time(&self) -> Option<Duration> {
        self.last_tx_time
    }

    /// Course seen on the previous evaluation
    pub fn last_course(&self) -> u16 {
        self.last_course
    }

    /// Interval computed on the previous evaluation
    pub fn tx_interval(&self) -> Duration {
        self.tx_interval
    }

    /// Time since the last beacon, `None` if nothing was ever sent
    ///
    /// A clock that steps backwards yields zero.
    pub fn elapsed_since_tx(&self, now: Duration) -> Option<Duration> {
        self.last_tx_time
            .map(|last| now.checked_sub(last).unwrap_or(Duration::ZERO))
    }

    fn elapsed_exceeds(&self, now: Duration, limit: Duration) -> bool {
        self.elapsed_since_tx(now).is_none_or(|elapsed| elapsed > limit)
    }
}

/// SmartBeaconing decision engine
///
/// Purely reactive: every call to [`evaluate`](Self::evaluate) looks only at
/// the fix it is given and the stored state, so skipped fixes merely delay
/// the next decision.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use aprs_tracker::beacon::{BeaconReason, BeaconScheduler, Decision};
/// use aprs_tracker::config::SmartBeaconConfig;
/// use aprs_tracker::fix::{FixedDegrees, GeoFix};
///
/// let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
/// let fix = GeoFix {
///     latitude: FixedDegrees::from_micro(45_123_400),
///     longitude: FixedDegrees::from_micro(7_500_000),
///     speed_kmh: 0.0,
///     course: 0,
///     altitude_feet: 800,
///     timestamp: Duration::from_secs(1),
/// };
///
/// assert_eq!(
///     scheduler.evaluate(&fix),
///     Decision::TransmitNow(BeaconReason::Periodic)
/// );
/// assert_eq!(scheduler.evaluate(&fix), Decision::Suppress);
/// ```
#[derive(Debug, Clone)]
pub struct BeaconScheduler {
    config: SmartBeaconConfig,
    state: BeaconerState,
}

impl BeaconScheduler {
    pub fn new(config: SmartBeaconConfig) -> Self {
        Self {
            config,
            state: BeaconerState::default(),
        }
    }

    /// Decide whether this fix warrants a beacon
    ///
    /// A corner beacon fires when the turn since the previous fix exceeds the
    /// speed-dependent threshold and at least the minimum turn time passed
    /// since the last beacon. Otherwise a periodic beacon fires once the
    /// interval for the current speed has elapsed.
    pub fn evaluate(&mut self, fix: &GeoFix) -> Decision {
        let now = fix.timestamp;
        let delta = course_delta(self.state.last_course, fix.course);
        let interval = beacon_interval(&self.config, fix.speed_kmh);
        let threshold = turn_threshold(&self.config, fix.speed_kmh);

        self.state.tx_interval = interval;
        self.state.last_course = fix.course;

        let cornering = threshold.is_some_and(|t| delta as f32 > t)
            && self.state.elapsed_exceeds(now, self.config.min_turn_time());

        let decision = if cornering {
            Decision::TransmitNow(BeaconReason::Corner)
        } else if self.state.elapsed_exceeds(now, interval) {
            Decision::TransmitNow(BeaconReason::Periodic)
        } else {
            Decision::Suppress
        };

        log::trace!(
            "speed {:.1} km/h, turn {}° (threshold {}), interval {:.0}s -> {:?}",
            fix.speed_kmh,
            delta,
            threshold.map_or("-".to_string(), |t| format!("{:.1}°", t)),
            interval.as_secs_f32(),
            decision
        );

        if decision.is_transmit() {
            self.state.last_tx_time = Some(now);
        }

        decision
    }

    /// Record a beacon sent outside the scheduler (manual trigger)
    ///
    /// Restarts the periodic window from `now`.
    pub fn force(&mut self, now: Duration) -> Decision {
        self.state.last_tx_time = Some(now);
        Decision::TransmitNow(BeaconReason::Manual)
    }

    pub fn state(&self) -> &BeaconerState {
        &self.state
    }

    pub fn config(&self) -> &SmartBeaconConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::FixedDegrees;

    fn fix_at(secs: u64, speed_kmh: f32, course: u16) -> GeoFix {
        GeoFix {
            latitude: FixedDegrees::from_micro(45_123_400),
            longitude: FixedDegrees::from_micro(-7_654_321),
            speed_kmh,
            course,
            altitude_feet: 500,
            timestamp: Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_first_fix_transmits_when_stationary() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());

        let decision = scheduler.evaluate(&fix_at(0, 0.0, 0));

        assert_eq!(decision, Decision::TransmitNow(BeaconReason::Periodic));
        assert_eq!(scheduler.state().last_tx_time(), Some(Duration::ZERO));
    }

    #[test]
    fn test_fast_small_turn_suppressed() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
        assert!(scheduler.evaluate(&fix_at(100, 100.0, 90)).is_transmit());

        let decision = scheduler.evaluate(&fix_at(110, 100.0, 95));

        assert_eq!(decision, Decision::Suppress);
        assert_eq!(scheduler.state().tx_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_periodic_at_fast_rate() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
        scheduler.evaluate(&fix_at(100, 100.0, 90));

        assert_eq!(scheduler.evaluate(&fix_at(130, 100.0, 90)), Decision::Suppress);
        assert_eq!(
            scheduler.evaluate(&fix_at(131, 100.0, 90)),
            Decision::TransmitNow(BeaconReason::Periodic)
        );
    }

    #[test]
    fn test_corner_beacon_after_min_turn_time() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
        scheduler.evaluate(&fix_at(100, 50.0, 0));

        // 50 km/h: threshold 34.8°, turn of 90° but only 15s since last beacon
        assert_eq!(scheduler.evaluate(&fix_at(115, 50.0, 90)), Decision::Suppress);

        // Turn measured against the course of the previous fix, not the last beacon
        assert_eq!(
            scheduler.evaluate(&fix_at(125, 50.0, 180)),
            Decision::TransmitNow(BeaconReason::Corner)
        );
        assert_eq!(scheduler.state().last_tx_time(), Some(Duration::from_secs(125)));
    }

    #[test]
    fn test_gentle_turn_below_threshold() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
        scheduler.evaluate(&fix_at(100, 10.0, 0));

        // 10 km/h: threshold 54°
        assert_eq!(scheduler.evaluate(&fix_at(130, 10.0, 54)), Decision::Suppress);
        assert_eq!(
            scheduler.evaluate(&fix_at(160, 10.0, 109)),
            Decision::TransmitNow(BeaconReason::Corner)
        );
    }

    #[test]
    fn test_turn_across_north() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
        scheduler.evaluate(&fix_at(100, 100.0, 350));

        // 20° across north is below the 32.4° threshold
        assert_eq!(scheduler.evaluate(&fix_at(125, 100.0, 10)), Decision::Suppress);
        assert_eq!(scheduler.state().last_course(), 10);
    }

    #[test]
    fn test_stationary_never_corners() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
        scheduler.evaluate(&fix_at(0, 0.0, 0));

        assert_eq!(scheduler.evaluate(&fix_at(60, 0.0, 180)), Decision::Suppress);
        assert_eq!(scheduler.evaluate(&fix_at(300, 0.0, 0)), Decision::Suppress);
        assert_eq!(
            scheduler.evaluate(&fix_at(301, 0.0, 90)),
            Decision::TransmitNow(BeaconReason::Periodic)
        );
    }

    #[test]
    fn test_force_restarts_window() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
        scheduler.evaluate(&fix_at(0, 100.0, 0));

        assert_eq!(
            scheduler.force(Duration::from_secs(25)),
            Decision::TransmitNow(BeaconReason::Manual)
        );

        // Would have fired at 31s without the manual beacon
        assert_eq!(scheduler.evaluate(&fix_at(31, 100.0, 0)), Decision::Suppress);
        assert!(scheduler.evaluate(&fix_at(56, 100.0, 0)).is_transmit());
    }

    #[test]
    fn test_clock_step_backwards() {
        let mut scheduler = BeaconScheduler::new(SmartBeaconConfig::default());
        scheduler.evaluate(&fix_at(500, 100.0, 0));

        assert_eq!(scheduler.evaluate(&fix_at(400, 100.0, 0)), Decision::Suppress);
        assert_eq!(
            scheduler.state().elapsed_since_tx(Duration::from_secs(400)),
            Some(Duration::ZERO)
        );
    }
}
