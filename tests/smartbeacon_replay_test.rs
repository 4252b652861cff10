mod common;

use std::time::Duration;

use aprs_tracker::beacon::BeaconReason::{Corner, Manual, Periodic};
use aprs_tracker::config::{ClockMode, TrackerConfig};
use aprs_tracker::{Tracker, WindowOutcome};

use common::{RecordingModem, replay, track};

const NOON: u32 = 12 * 3600;

fn replay_tracker() -> Tracker<RecordingModem> {
    let mut config = TrackerConfig::default();
    config.gps.clock = ClockMode::Gps;
    Tracker::new(config, RecordingModem::default()).unwrap()
}

fn secs(beacons: &[(Duration, aprs_tracker::beacon::BeaconReason)]) -> Vec<u64> {
    beacons.iter().map(|(t, _)| t.as_secs()).collect()
}

#[test]
fn test_parked_beacons_at_slow_rate() {
    let mut tracker = replay_tracker();

    let beacons = replay(&mut tracker, &track(NOON, 700, 0.0, 0.0));

    assert_eq!(
        beacons,
        vec![
            (Duration::from_secs(1), Periodic),
            (Duration::from_secs(302), Periodic),
            (Duration::from_secs(603), Periodic),
        ]
    );
    assert_eq!(tracker.modem().reports.len(), 3);
    assert_eq!(tracker.beacons_sent(), 3);
}

#[test]
fn test_highway_beacons_at_fast_rate() {
    let mut tracker = replay_tracker();

    // 54 kt = 100 km/h
    let beacons = replay(&mut tracker, &track(NOON, 120, 54.0, 90.0));

    // The first fix turns away from the initial course of 0°
    assert_eq!(beacons[0], (Duration::from_secs(1), Corner));
    assert_eq!(secs(&beacons), vec![1, 32, 63, 94]);
    assert!(beacons[1..].iter().all(|(_, reason)| *reason == Periodic));

    let report = &tracker.modem().reports[1];
    assert_eq!(report.speed_knots, 54);
    assert_eq!(report.course, 90);
    assert_eq!(report.position.latitude, "4507.40N");
    assert_eq!(report.position.longitude, "00730.00E");
    assert_eq!(report.position.comment, "/A=000820Rust APRS Tracker");
}

#[test]
fn test_corner_pegging() {
    let mut tracker = replay_tracker();

    // 27 kt = 50 km/h: turn threshold 34.8°, interval 54 s
    let mut lines = track(NOON, 40, 27.0, 0.0);
    lines.extend(track(NOON + 40, 50, 27.0, 90.0));

    let beacons = replay(&mut tracker, &lines);

    assert_eq!(
        beacons,
        vec![
            (Duration::from_secs(1), Periodic),
            (Duration::from_secs(41), Corner),
        ]
    );
}

#[test]
fn test_weaving_limited_by_min_turn_time() {
    let mut tracker = replay_tracker();

    let lines: Vec<String> = (0..12)
        .flat_map(|k| {
            let course = if k % 2 == 0 { 0.0 } else { 90.0 };
            track(NOON + 5 * k, 5, 27.0, course)
        })
        .collect();

    let beacons = replay(&mut tracker, &lines);

    assert_eq!(
        beacons,
        vec![
            (Duration::from_secs(1), Periodic),
            (Duration::from_secs(26), Corner),
            (Duration::from_secs(51), Corner),
        ]
    );
}

#[test]
fn test_replay_across_midnight() {
    let mut tracker = replay_tracker();

    let beacons = replay(&mut tracker, &track(86_400 - 30, 60, 54.0, 90.0));

    assert_eq!(secs(&beacons), vec![1, 32]);
}

#[test]
fn test_manual_beacon_restarts_interval() {
    let mut tracker = replay_tracker();
    let lines = track(NOON, 80, 54.0, 90.0);

    let mut beacons = Vec::new();
    let mut windows = 0;
    for line in &lines {
        if tracker.feed_line(line, Duration::ZERO) {
            windows += 1;
            if let WindowOutcome::Evaluated { fix, beacons: sent } =
                tracker.close_window(windows == 10)
            {
                beacons.extend(sent.into_iter().map(|r| (fix.timestamp.as_secs(), r)));
            }
        }
    }

    assert_eq!(
        beacons,
        vec![(1, Corner), (10, Manual), (41, Periodic), (72, Periodic)]
    );
    assert_eq!(tracker.modem().reports.len(), 4);
}

#[test]
fn test_configured_rates() {
    let mut config = TrackerConfig::from_toml_str(
        r#"
        [smart_beacon]
        fast_rate_secs = 60

        [gps]
        clock = "gps"
        "#,
    )
    .unwrap();
    config.comment = String::new();
    let mut tracker = Tracker::new(config, RecordingModem::default()).unwrap();

    let beacons = replay(&mut tracker, &track(NOON, 130, 54.0, 90.0));

    assert_eq!(secs(&beacons), vec![1, 62, 123]);
    assert_eq!(tracker.modem().reports[0].position.comment, "/A=000820");
}
