use chrono::{DateTime, Utc};
use dashboard_core::WrapProjection;

/// Samples closer together than this (in minutes) do not move the rate.
pub const MIN_SAMPLE_MINUTES: f64 = 0.1;
/// Weight of the newest instantaneous rate in the moving average.
pub const SAMPLE_WEIGHT: f64 = 0.3;
pub const HISTORY_WEIGHT: f64 = 0.7;
/// Rates at or below this many tokens per minute are treated as idle.
pub const VELOCITY_NOISE_FLOOR: f64 = 100.0;
/// Fraction of the context window at which the session is expected to wrap.
pub const WRAP_RATIO: f64 = 0.5;

/// Exponentially smoothed context growth rate, in tokens per minute.
///
/// Every call to [`VelocityEstimator::update_at`] mutates the estimate, so it
/// must be fed exactly once per observed snapshot.
#[derive(Debug, Clone, Default)]
pub struct VelocityEstimator {
    last_usage: Option<u64>,
    last_usage_time: Option<DateTime<Utc>>,
    velocity_per_min: Option<f64>,
}

impl VelocityEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_at(&mut self, now: DateTime<Utc>, current: u64) -> f64 {
        if let (Some(last), Some(last_time)) = (self.last_usage, self.last_usage_time) {
            let elapsed = (now - last_time).num_milliseconds() as f64 / 60_000.0;
            if elapsed >= MIN_SAMPLE_MINUTES {
                let instant = (current as f64 - last as f64) / elapsed;
                self.velocity_per_min = Some(match self.velocity_per_min {
                    Some(smoothed) => smoothed * HISTORY_WEIGHT + instant * SAMPLE_WEIGHT,
                    None => instant,
                });
            }
        }
        self.last_usage = Some(current);
        self.last_usage_time = Some(now);
        self.velocity()
    }

    pub fn velocity(&self) -> f64 {
        self.velocity_per_min.unwrap_or(0.0)
    }

    pub fn last_usage(&self) -> Option<u64> {
        self.last_usage
    }

    pub fn last_usage_time(&self) -> Option<DateTime<Utc>> {
        self.last_usage_time
    }
}

pub fn project_wrap(context_window: u64, used: Option<u64>, velocity: f64) -> WrapProjection {
    let threshold = context_window as f64 * WRAP_RATIO;
    let tokens_to_wrap = used.map(|used| threshold - used as f64);
    let minutes_to_wrap = match tokens_to_wrap {
        Some(remaining) if velocity > VELOCITY_NOISE_FLOOR && remaining > 0.0 => {
            Some((remaining / velocity).round() as i64)
        }
        _ => None,
    };
    WrapProjection {
        threshold,
        tokens_to_wrap,
        minutes_to_wrap,
    }
}
