use std::time::Duration;

const SECONDS_PER_DAY: f64 = 86_400.0;
const HALF_DAY: f64 = SECONDS_PER_DAY / 2.0;

/// Monotonic clock derived from the UTC time-of-day in NMEA sentences
///
/// Time starts at zero with the first sentence. A jump backwards by more
/// than half a day is taken as a midnight rollover; smaller backward steps
/// hold the clock instead of rewinding it.
#[derive(Debug, Clone, Default)]
pub struct GpsClock {
    origin: Option<f64>,
    last_time_of_day: Option<f64>,
    day_offset: f64,
    now: Duration,
}

impl GpsClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to a UTC time-of-day in seconds and return the clock reading
    pub fn advance(&mut self, time_of_day_secs: f64) -> Duration {
        if !time_of_day_secs.is_finite() {
            return self.now;
        }

        if self
            .last_time_of_day
            .is_some_and(|previous| time_of_day_secs + HALF_DAY < previous)
        {
            self.day_offset += SECONDS_PER_DAY;
        }
        self.last_time_of_day = Some(time_of_day_secs);

        let origin = *self.origin.get_or_insert(time_of_day_secs);
        let elapsed = (self.day_offset + time_of_day_secs - origin).max(0.0);

        self.now = self.now.max(Duration::from_secs_f64(elapsed));
        self.now
    }

    pub fn now(&self) -> Duration {
        self.now
    }
}
