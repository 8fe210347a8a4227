use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{KvmarkArgs, PositiveU32};
use crate::bench::IterationPlan;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given on the command
/// line or through the environment win over the file.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut KvmarkArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "address")
        && let Some(address) = config.address.clone()
    {
        args.address = address;
    }

    if !is_explicit(matches, "commands")
        && let Some(commands) = config.commands.clone()
    {
        args.commands = commands;
    }

    if !is_explicit(matches, "iterations")
        && let Some(counts) = config.iterations.as_ref()
    {
        let plan = IterationPlan::from_counts(counts).map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "iterations",
                source: err,
            })
        })?;
        args.iterations = Some(plan);
    }

    if !is_explicit(matches, "average")
        && let Some(average) = config.average
    {
        args.average = Some(ensure_positive_u32(average, "average")?);
    }

    if !is_explicit(matches, "show_errors")
        && let Some(show_errors) = config.show_errors
    {
        args.show_errors = show_errors;
    }

    if !is_explicit(matches, "key_prefix")
        && let Some(prefix) = config.key_prefix.clone()
    {
        args.key_prefix = prefix;
    }

    if !is_explicit(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if let Some(throughput) = config.throughput.as_ref() {
        if !is_explicit(matches, "throughput") {
            let command = throughput
                .command
                .clone()
                .ok_or(AppError::config(ConfigError::ThroughputMissingCommand))?;
            args.throughput = Some(command);
        }
        if !is_explicit(matches, "throughput_duration")
            && let Some(duration) = throughput.duration.as_ref()
        {
            args.throughput_duration = duration.to_duration().map_err(|err| {
                AppError::config(ConfigError::InvalidDuration {
                    field: "throughput.duration",
                    source: err,
                })
            })?;
        }
    }

    if !is_explicit(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_explicit(matches, "random_keys")
        && let Some(random_keys) = config.random_keys
    {
        args.random_keys = random_keys;
    }

    if !is_explicit(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_explicit(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_u32(value: u32, field: &'static str) -> AppResult<PositiveU32> {
    PositiveU32::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive { field, source: err })
    })
}
