use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use rand::Rng;
use rand::distributions::Uniform;
use tracing::{error, info};

use crate::app::summary::{report_json, report_text};
use crate::args::{KvmarkArgs, OutputFormat, RANDOM_KEY_LEN};
use crate::bench::{BenchEngine, IterationPlan, RunOptions, RunReport, ThroughputSample};
use crate::catalog::command_registry;
use crate::error::{AppError, AppResult, ValidationError};
use crate::shutdown::{ShutdownReceiver, setup_signal_shutdown_handler, shutdown_channel};
use crate::store::StoreClient;

/// What the resolved arguments ask for.
#[derive(Debug)]
struct RunPlan {
    sweep: Option<(Vec<String>, IterationPlan)>,
    options: RunOptions,
    throughput: Option<(String, Duration)>,
}

/// Parses the command line, applies any config file, and runs the requested
/// sweep and throughput sample.
///
/// # Errors
///
/// Returns configuration errors (missing or unknown commands, unreachable
/// store), store errors surfaced under `--show-errors`, and
/// [`AppError::Interrupted`] when a shutdown signal cancels the run.
pub fn run() -> AppResult<()> {
    let matches = KvmarkArgs::command().get_matches();
    let mut args = KvmarkArgs::from_arg_matches(&matches)?;

    if args.list_commands {
        for name in command_registry().names() {
            println!("{}", name);
        }
        return Ok(());
    }

    apply_config(&mut args, &matches)?;
    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run_async(args));
    if let Err(err) = &result
        && err.is_configuration_error()
    {
        error!("{}", err);
    }
    result
}

fn apply_config(args: &mut KvmarkArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}

fn build_plan(args: &KvmarkArgs) -> AppResult<RunPlan> {
    let sweep = if args.commands.is_empty() {
        if args.throughput.is_none() {
            return Err(AppError::validation(ValidationError::MissingCommands));
        }
        None
    } else {
        let plan = args
            .iterations
            .clone()
            .ok_or(AppError::validation(ValidationError::MissingIterations))?;
        Some((args.commands.clone(), plan))
    };

    // A mistyped sampler command must fail before the sweep sends any traffic.
    if let Some(command) = &args.throughput {
        command_registry().lookup(command)?;
    }

    Ok(RunPlan {
        sweep,
        options: RunOptions {
            average_over: args.average,
            show_error_details: args.show_errors,
        },
        throughput: args
            .throughput
            .clone()
            .map(|command| (command, args.throughput_duration)),
    })
}

/// Ten uppercase ASCII letters per call.
fn random_member() -> String {
    let letters = Uniform::new_inclusive(b'A', b'Z');
    rand::thread_rng()
        .sample_iter(letters)
        .take(RANDOM_KEY_LEN)
        .map(char::from)
        .collect()
}

async fn run_async(args: KvmarkArgs) -> AppResult<()> {
    let plan = build_plan(&args)?;

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    info!("Connecting to {}", args.address);
    let mut engine = BenchEngine::connect(&args.address)
        .await?
        .with_key_prefix(&args.key_prefix);
    if let Some(seed) = args.seed {
        engine = engine.with_seed(seed);
    }
    if args.random_keys {
        engine.set_generator(random_member);
    }

    let outcome = execute(&mut engine, plan, shutdown_rx).await;

    drop(shutdown_tx.send(()));
    signal_handle.await?;

    let (report, throughput) = outcome?;
    let rendered = match args.output_format {
        OutputFormat::Text => report_text(&report, throughput.as_ref())?,
        OutputFormat::Json => report_json(&report, &engine.status(), throughput.as_ref())?,
    };
    print!("{}", rendered);
    if args.output_format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

async fn execute<C>(
    engine: &mut BenchEngine<C>,
    plan: RunPlan,
    mut shutdown_rx: ShutdownReceiver,
) -> AppResult<(RunReport, Option<ThroughputSample>)>
where
    C: StoreClient,
{
    let report = match plan.sweep {
        Some((commands, iterations)) => {
            engine.set_commands(&commands)?;
            tokio::select! {
                _ = shutdown_rx.recv() => return Err(AppError::Interrupted),
                report = engine.start(&iterations, &plan.options) => report?,
            }
        }
        None => RunReport {
            started_at: chrono::Utc::now(),
            total_duration: Duration::ZERO,
            trials: Vec::new(),
        },
    };

    let throughput = match plan.throughput {
        Some((command, window)) => {
            let sample = tokio::select! {
                _ = shutdown_rx.recv() => return Err(AppError::Interrupted),
                sample = engine.measure_throughput(&command, window) => sample?,
            };
            Some(sample)
        }
        None => None,
    };

    Ok((report, throughput))
}
