use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::catalog::{BenchCommand, ErrorPolicy, draw_rank, invoke};
use crate::error::{AppError, AppResult, MetricsError, ValidationError};
use crate::metrics::{LatencyHistogram, SuccessRatio, TrialOutcome};
use crate::store::StoreClient;

use super::{BenchEngine, IterationPlan, RunOptions, RunReport, TrialReport};

struct Trial {
    outcome: TrialOutcome,
    latency: LatencyHistogram,
}

fn histogram_error(context: &'static str) -> impl FnOnce(String) -> AppError {
    move |message| MetricsError::Histogram { context, message }.into()
}

impl<C> BenchEngine<C>
where
    C: StoreClient,
{
    /// Runs every configured command against every count in `plan`.
    ///
    /// Commands run in configured order, counts in plan order. Each pair
    /// appends one run log entry per executed trial (so `average_over` trials
    /// when averaging is enabled).
    ///
    /// # Errors
    ///
    /// Returns `EmptyCommandList` when no commands are configured and the
    /// first store error when `show_error_details` is set on a non-averaged
    /// run.
    pub async fn start(
        &mut self,
        plan: &IterationPlan,
        options: &RunOptions,
    ) -> AppResult<RunReport> {
        if self.commands.is_empty() {
            return Err(ValidationError::EmptyCommandList.into());
        }

        let started_at = Utc::now();
        let run_started = Instant::now();
        let commands = self.commands.clone();
        let mut trials = Vec::with_capacity(commands.len().saturating_mul(plan.len()));

        for command in &commands {
            let policy = match options.average_over {
                Some(_) => ErrorPolicy::Suppress,
                None => ErrorPolicy::from_show_errors(options.show_error_details),
            };
            self.seed_command(command.as_ref(), policy).await?;

            for iterations in plan.counts() {
                let report = match options.average_over {
                    Some(times) => {
                        self.run_averaged(command.as_ref(), iterations, times.get())
                            .await?
                    }
                    None => self.run_single(command.as_ref(), iterations, policy).await?,
                };
                info!(
                    "{} x{}: {}ms ({}.{:02}% successful)",
                    report.command,
                    report.iterations,
                    report.duration.as_millis(),
                    report.success_ratio.percent_x100() / 100,
                    report.success_ratio.percent_x100() % 100
                );
                trials.push(report);
            }
        }

        Ok(RunReport {
            started_at,
            total_duration: run_started.elapsed(),
            trials,
        })
    }

    /// Issues the untimed seed call for commands that need existing data.
    async fn seed_command(
        &mut self,
        command: &dyn BenchCommand,
        policy: ErrorPolicy,
    ) -> AppResult<()> {
        let Some(seed) = command.seed(&self.keys) else {
            return Ok(());
        };
        debug!("Seeding {} with {}", command.name(), seed.command);
        match self.client.execute(seed.command, &seed.args).await {
            Ok(_) => Ok(()),
            Err(err) if policy == ErrorPolicy::Halt => Err(err.into()),
            Err(err) => {
                debug!("Seed call failed: {}", err);
                Ok(())
            }
        }
    }

    async fn run_single(
        &mut self,
        command: &dyn BenchCommand,
        iterations: usize,
        policy: ErrorPolicy,
    ) -> AppResult<TrialReport> {
        let trial = self.run_trial(command, iterations, policy).await?;
        let duration = trial.outcome.duration;
        Ok(TrialReport {
            command: command.name(),
            family: command.family(),
            iterations,
            trials: 1,
            duration,
            min_duration: duration,
            max_duration: duration,
            success_ratio: trial.outcome.success_ratio,
            latency: trial.latency.percentiles(),
        })
    }

    /// Repeats one trial `times` times with errors suppressed and reports the
    /// mean duration.
    async fn run_averaged(
        &mut self,
        command: &dyn BenchCommand,
        iterations: usize,
        times: u32,
    ) -> AppResult<TrialReport> {
        let mut latency = LatencyHistogram::new().map_err(histogram_error("averaging"))?;
        let mut total = Duration::ZERO;
        let mut min_duration = Duration::MAX;
        let mut max_duration = Duration::ZERO;
        let mut successes = 0_u64;
        let mut calls = 0_u64;

        for _ in 0..times {
            let trial = self
                .run_trial(command, iterations, ErrorPolicy::Suppress)
                .await?;
            let duration = trial.outcome.duration;
            total = total
                .checked_add(duration)
                .ok_or(ValidationError::DurationOverflow)?;
            min_duration = min_duration.min(duration);
            max_duration = max_duration.max(duration);
            successes = successes.saturating_add(trial.outcome.success_ratio.successes());
            calls = calls.saturating_add(trial.outcome.success_ratio.total());
            latency
                .merge(&trial.latency)
                .map_err(histogram_error("averaging"))?;
        }

        let duration = total
            .checked_div(times)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })?;
        let success_ratio =
            SuccessRatio::new(successes, calls).ok_or(ValidationError::ValueTooSmall { min: 1 })?;
        Ok(TrialReport {
            command: command.name(),
            family: command.family(),
            iterations,
            trials: times,
            duration,
            min_duration,
            max_duration,
            success_ratio,
            latency: latency.percentiles(),
        })
    }

    /// Runs `iterations` calls back to back and appends the success ratio to
    /// the run log.
    async fn run_trial(
        &mut self,
        command: &dyn BenchCommand,
        iterations: usize,
        policy: ErrorPolicy,
    ) -> AppResult<Trial> {
        let total = u64::try_from(iterations).unwrap_or(u64::MAX);
        let mut latency = LatencyHistogram::new().map_err(histogram_error("trial setup"))?;
        let mut successes = 0_u64;

        let trial_started = Instant::now();
        for index in 0..iterations {
            let member = self.key_source.member(command.name(), iterations, index);
            let rank = command.draws_rank().then(|| draw_rank(&mut self.rng));
            let call_started = Instant::now();
            let succeeded =
                invoke(&mut self.client, command, &self.keys, &member, rank, policy).await?;
            latency
                .record(call_started.elapsed())
                .map_err(histogram_error("recording call latency"))?;
            if succeeded {
                successes = successes.saturating_add(1);
            }
        }
        let duration = trial_started.elapsed();

        let success_ratio =
            SuccessRatio::new(successes, total).ok_or(ValidationError::ValueTooSmall { min: 1 })?;
        self.run_log.push(success_ratio);
        Ok(Trial {
            outcome: TrialOutcome {
                duration,
                success_ratio,
            },
            latency,
        })
    }
}
