/// Seconds in one service day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Sentinel used by the backend for a train removed from service
pub const WITHDRAWN_SENTINEL: &str = "WITHDRAWN";

/// Progress ratios never divide by less than one second
pub const MIN_PROGRESS_DENOMINATOR: i64 = 1;

/// Visual heading (degrees) of a train running towards higher station ids
pub const SOUTHBOUND_ROTATION: f64 = 0.0;

/// Visual heading (degrees) of a train running towards lower station ids
pub const NORTHBOUND_ROTATION: f64 = 180.0;

/// Simulated-time speed multipliers offered by the clock controls
pub const SPEED_MULTIPLIERS: &[f64] = &[1.0, 2.0, 5.0, 10.0, 30.0, 60.0];

/// Default skip step for the clock controls, in seconds
pub const SKIP_STEP_SECONDS: i64 = 60;
