use std::time::Duration;

use serde::Serialize;

/// Fraction of a trial's calls that succeeded. `total` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuccessRatio {
    successes: u64,
    total: u64,
}

impl SuccessRatio {
    /// Builds a ratio; `None` when `total` is zero or `successes > total`.
    #[must_use]
    pub const fn new(successes: u64, total: u64) -> Option<Self> {
        if total == 0 || successes > total {
            return None;
        }
        Some(Self { successes, total })
    }

    #[must_use]
    pub const fn successes(self) -> u64 {
        self.successes
    }

    #[must_use]
    pub const fn total(self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn failures(self) -> u64 {
        self.total.saturating_sub(self.successes)
    }

    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.successes == self.total
    }

    /// Success percentage scaled by 100 (`9950` is 99.50%).
    #[must_use]
    pub fn percent_x100(self) -> u64 {
        let scaled = u128::from(self.successes)
            .saturating_mul(10_000)
            .checked_div(u128::from(self.total))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "the run log exposes ratios as fractions")]
    pub fn as_f64(self) -> f64 {
        self.successes as f64 / self.total as f64
    }
}

/// Result of one (command, iteration count) execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    pub duration: Duration,
    pub success_ratio: SuccessRatio,
}
