//! Benchmark engine: command sweeps over an iteration plan, averaged trials,
//! and the throughput sampler.
mod engine;
mod plan;
mod report;
mod runner;
mod sampler;


pub use engine::BenchEngine;
pub use plan::{IterationPlan, RunOptions};
pub use report::{RunReport, ThroughputSample, TrialReport};
pub use sampler::sample_throughput;
