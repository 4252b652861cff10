pub mod rate;
pub mod scheduler;

pub use rate::{beacon_interval, course_delta, turn_threshold};
pub use scheduler::{BeaconReason, BeaconScheduler, BeaconerState, Decision};
