use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::catalog::CommandFamily;
use crate::metrics::{LatencyPercentiles, SuccessRatio};

/// Timing and accounting for one (command, iteration count) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialReport {
    pub command: &'static str,
    pub family: CommandFamily,
    pub iterations: usize,
    /// Number of repetitions folded into `duration` (1 unless averaging).
    pub trials: u32,
    /// Wall-clock duration of the inner loop; the mean when averaging.
    pub duration: Duration,
    pub min_duration: Duration,
    pub max_duration: Duration,
    /// Successes over all calls of all repetitions.
    pub success_ratio: SuccessRatio,
    pub latency: LatencyPercentiles,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub total_duration: Duration,
    pub trials: Vec<TrialReport>,
}

impl RunReport {
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.trials
            .iter()
            .map(|trial| trial.success_ratio.total())
            .fold(0_u64, u64::saturating_add)
    }
}

/// Completed operations counted over a fixed wall-clock window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThroughputSample {
    pub command: String,
    pub window: Duration,
    pub completed: u64,
}

impl ThroughputSample {
    /// Operations per second scaled by 100.
    #[must_use]
    pub fn ops_per_sec_x100(&self) -> u64 {
        let window_ms = self.window.as_millis().max(1);
        let scaled = u128::from(self.completed)
            .saturating_mul(100_000)
            .checked_div(window_ms)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}
