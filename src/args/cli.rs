use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_ADDRESS, DEFAULT_THROUGHPUT_WINDOW};
use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_iteration_plan, parse_positive_u32,
};
use super::types::{OutputFormat, PositiveU32};
use crate::bench::IterationPlan;
use crate::catalog::DEFAULT_KEY_PREFIX;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Micro-benchmark harness for Redis-compatible key-value stores - command sweeps, averaged trials, success-rate accounting, and sustained throughput sampling."
)]
pub struct KvmarkArgs {
    /// Store address as host:port or redis:// URL
    #[arg(long, short = 'a', env = "KVMARK_ADDRESS", default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// Commands to benchmark, comma separated (e.g. hset,zadd,pfmerge)
    #[arg(long, short = 'c', value_delimiter = ',')]
    pub commands: Vec<String>,

    /// Iteration counts swept for every command, comma separated (e.g. 10,100,1000)
    #[arg(long, short = 'i', value_parser = parse_iteration_plan)]
    pub iterations: Option<IterationPlan>,

    /// Repeat every trial N times and report the mean duration. Repetitions
    /// reuse the same members, so commands that only succeed on new data
    /// (hset, pfadd) report failures after the first repetition
    #[arg(long, value_parser = parse_positive_u32)]
    pub average: Option<PositiveU32>,

    /// Stop on the first store error and report it
    #[arg(long = "show-errors")]
    pub show_errors: bool,

    /// Sample sustained throughput of this command after the sweep
    #[arg(long)]
    pub throughput: Option<String>,

    /// Throughput sampling window (supports ms/s/m/h)
    #[arg(
        long = "throughput-duration",
        default_value = DEFAULT_THROUGHPUT_WINDOW,
        value_parser = parse_duration_arg
    )]
    pub throughput_duration: Duration,

    /// Use 10 random uppercase letters as the member of every call
    #[arg(long = "random-keys")]
    pub random_keys: bool,

    /// Seed for the sorted-set rank generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Prefix of every key the benchmark writes
    #[arg(long = "key-prefix", default_value = DEFAULT_KEY_PREFIX)]
    pub key_prefix: String,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Print the supported commands and exit
    #[arg(long = "list-commands")]
    pub list_commands: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by KVMARK_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./kvmark.toml or ./kvmark.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
