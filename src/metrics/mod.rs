//! Trial outcomes, success-ratio accounting, the run log, and latency
//! histograms.
mod histogram;
mod run_log;
mod types;

#[cfg(test)]
mod tests;

pub use histogram::{LatencyHistogram, LatencyPercentiles};
pub use run_log::RunLog;
pub use types::{SuccessRatio, TrialOutcome};
