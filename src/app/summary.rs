use std::fmt::Write as _;
use std::time::Duration;

use serde::Serialize;

use crate::bench::{RunReport, ThroughputSample, TrialReport};
use crate::catalog::CommandFamily;
use crate::error::ReportError;
use crate::metrics::LatencyPercentiles;

/// Scale of the integer percent/rate values (`x100`).
pub(crate) const PERCENT_DIVISOR: u64 = 100;

#[derive(Debug, Serialize)]
struct JsonReport<'report> {
    started_at: String,
    total_duration_ms: u64,
    total_calls: u64,
    trials: Vec<JsonTrial>,
    run_log: &'report [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    throughput: Option<JsonThroughput<'report>>,
}

#[derive(Debug, Serialize)]
struct JsonTrial {
    command: &'static str,
    family: CommandFamily,
    iterations: usize,
    trials: u32,
    duration_us: u64,
    min_duration_us: u64,
    max_duration_us: u64,
    successes: u64,
    calls: u64,
    success_rate_x100: u64,
    latency_us: LatencyPercentiles,
}

#[derive(Debug, Serialize)]
struct JsonThroughput<'report> {
    command: &'report str,
    window_ms: u64,
    completed: u64,
    ops_per_sec_x100: u64,
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Formats a microsecond count as `12.345ms`.
fn format_micros(value: u64) -> String {
    format!("{}.{:03}ms", value / 1_000, value % 1_000)
}

fn json_trial(trial: &TrialReport) -> JsonTrial {
    JsonTrial {
        command: trial.command,
        family: trial.family,
        iterations: trial.iterations,
        trials: trial.trials,
        duration_us: micros(trial.duration),
        min_duration_us: micros(trial.min_duration),
        max_duration_us: micros(trial.max_duration),
        successes: trial.success_ratio.successes(),
        calls: trial.success_ratio.total(),
        success_rate_x100: trial.success_ratio.percent_x100(),
        latency_us: trial.latency,
    }
}

/// Renders the run as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub(crate) fn report_json(
    report: &RunReport,
    run_log: &[f64],
    throughput: Option<&ThroughputSample>,
) -> Result<String, ReportError> {
    let payload = JsonReport {
        started_at: report.started_at.to_rfc3339(),
        total_duration_ms: millis(report.total_duration),
        total_calls: report.total_calls(),
        trials: report.trials.iter().map(json_trial).collect(),
        run_log,
        throughput: throughput.map(|sample| JsonThroughput {
            command: &sample.command,
            window_ms: millis(sample.window),
            completed: sample.completed,
            ops_per_sec_x100: sample.ops_per_sec_x100(),
        }),
    };
    serde_json::to_string_pretty(&payload)
        .map_err(|err| ReportError::SerializeJson { source: err })
}

/// Renders the run as an aligned text table followed by the throughput line.
///
/// # Errors
///
/// Returns an error when writing to the output buffer fails.
pub(crate) fn report_text(
    report: &RunReport,
    throughput: Option<&ThroughputSample>,
) -> Result<String, ReportError> {
    let mut out = String::new();
    write_text(&mut out, report, throughput).map_err(|err| ReportError::WriteLine { source: err })?;
    Ok(out)
}

fn write_text(
    out: &mut String,
    report: &RunReport,
    throughput: Option<&ThroughputSample>,
) -> std::fmt::Result {
    writeln!(out, "Started: {}", report.started_at.to_rfc3339())?;
    writeln!(out, "Total Duration: {}ms", millis(report.total_duration))?;
    writeln!(out, "Total Calls: {}", report.total_calls())?;

    if !report.trials.is_empty() {
        writeln!(
            out,
            "{:<10} {:>10} {:>7} {:>14} {:>9} {:>12} {:>12} {:>12}",
            "command", "iterations", "trials", "duration", "success", "p50", "p90", "p99"
        )?;
        for trial in &report.trials {
            let rate = trial.success_ratio.percent_x100();
            writeln!(
                out,
                "{:<10} {:>10} {:>7} {:>14} {:>8} {:>12} {:>12} {:>12}",
                trial.command,
                trial.iterations,
                trial.trials,
                format_micros(micros(trial.duration)),
                format!("{}.{:02}%", rate / PERCENT_DIVISOR, rate % PERCENT_DIVISOR),
                format_micros(trial.latency.p50_us),
                format_micros(trial.latency.p90_us),
                format_micros(trial.latency.p99_us),
            )?;
        }
    }

    if let Some(sample) = throughput {
        let rate = sample.ops_per_sec_x100();
        writeln!(
            out,
            "Throughput ({}, {}ms): {} ops ({}.{:02} ops/s)",
            sample.command,
            millis(sample.window),
            sample.completed,
            rate / PERCENT_DIVISOR,
            rate % PERCENT_DIVISOR
        )?;
    }
    Ok(())
}
