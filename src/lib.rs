//! Core library for the `kvmark` CLI.
//!
//! The engine drives a Redis-compatible store through a catalog of command
//! strategies, sweeping iteration counts, averaging repeated trials, logging
//! per-trial success ratios, and sampling sustained throughput. The binary is
//! a thin wrapper over [`run`]; the library types are usable directly from
//! tests or other harnesses.
pub mod args;
pub mod bench;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;

mod app;
mod entry;
mod logger;
mod shutdown;

#[cfg(test)]
mod test_support;

pub use entry::run;
