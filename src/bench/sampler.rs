use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval, sleep};
use tracing::{debug, info};

use crate::catalog::Invocation;
use crate::error::{AppResult, ValidationError};
use crate::shutdown::shutdown_channel;
use crate::store::StoreClient;

use super::ThroughputSample;

/// Default interval between mid-window progress snapshots.
pub(crate) const PROGRESS_TICK: Duration = Duration::from_millis(250);

/// Repeats one fixed call from a background task for `window` and returns the
/// number of calls the store answered.
///
/// The background task is cancelled through a shutdown channel once the window
/// elapses and is joined before the counter is read, so no work outlives the
/// call. `observe` receives the running count every `tick`.
///
/// # Errors
///
/// Returns `DurationZero` for an empty window and a join error if the
/// background task panicked.
pub async fn sample_throughput<C, F>(
    mut client: C,
    invocation: Invocation,
    window: Duration,
    tick: Duration,
    mut observe: F,
) -> AppResult<ThroughputSample>
where
    C: StoreClient,
    F: FnMut(u64),
{
    if window.is_zero() {
        return Err(ValidationError::DurationZero.into());
    }

    let completed = Arc::new(AtomicU64::new(0));
    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let Invocation { command, args } = invocation;

    let counter = Arc::clone(&completed);
    let worker = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                result = client.execute(command, &args) => match result {
                    Ok(_) => {
                        counter.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(err) => debug!("Sampler call failed: {}", err),
                },
            }
            tokio::task::yield_now().await;
        }
    });

    let deadline = sleep(window);
    tokio::pin!(deadline);
    let mut ticker = interval(tick.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            () = &mut deadline => break,
            _ = ticker.tick() => observe(completed.load(Ordering::Acquire)),
        }
    }

    drop(shutdown_tx.send(()));
    worker.await?;

    let sample = ThroughputSample {
        command: command.to_owned(),
        window,
        completed: completed.load(Ordering::Acquire),
    };
    let rate = sample.ops_per_sec_x100();
    info!(
        "Throughput {}: {} ops in {}ms ({}.{:02} ops/s)",
        sample.command,
        sample.completed,
        window.as_millis(),
        rate / 100,
        rate % 100
    );
    Ok(sample)
}
