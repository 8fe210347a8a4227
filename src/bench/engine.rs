use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::catalog::{
    BenchCommand, CommandRegistry, Invocation, KeySource, KeySpace, command_registry,
    draw_rank,
};
use crate::error::{AppResult, ValidationError};
use crate::metrics::RunLog;
use crate::store::{RedisStore, StoreClient};

use super::ThroughputSample;
use super::sampler::{PROGRESS_TICK, sample_throughput};

/// Member used by the throughput sampler's fixed key.
const SAMPLER_MEMBER: &str = "sampler";

/// Benchmark engine bound to one store connection.
///
/// Trials run strictly one call at a time on the owned client; only the
/// throughput sampler drives a second (cloned) handle from a background task.
pub struct BenchEngine<C> {
    pub(super) client: C,
    pub(super) registry: Arc<CommandRegistry>,
    pub(super) commands: Vec<Arc<dyn BenchCommand>>,
    pub(super) keys: KeySpace,
    pub(super) key_source: KeySource,
    pub(super) rng: StdRng,
    pub(super) run_log: RunLog,
}

impl<C> std::fmt::Debug for BenchEngine<C>
where
    C: StoreClient,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchEngine")
            .field("commands", &self.command_names())
            .field("keys", &self.keys)
            .field("key_source", &self.key_source)
            .field("run_log", &self.run_log)
            .finish_non_exhaustive()
    }
}

impl BenchEngine<RedisStore> {
    /// Opens the store connection at `address`.
    ///
    /// # Errors
    ///
    /// Returns a store error when the address is invalid or the server is not
    /// reachable within the connect timeout.
    pub async fn connect(address: &str) -> AppResult<Self> {
        let client = RedisStore::connect(address).await?;
        Ok(Self::new(client))
    }
}

impl<C> BenchEngine<C>
where
    C: StoreClient,
{
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            registry: Arc::new(command_registry().clone()),
            commands: Vec::new(),
            keys: KeySpace::default(),
            key_source: KeySource::Deterministic,
            rng: StdRng::from_entropy(),
            run_log: RunLog::new(),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    #[must_use]
    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.keys = KeySpace::new(prefix);
        self
    }

    /// Fixes the rank sequence drawn for sorted-set commands.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replaces the configured command list.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCommandList` for an empty list and `UnknownCommand` for a
    /// name missing from the registry. The previous list is kept on error.
    pub fn set_commands<I, S>(&mut self, names: I) -> AppResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commands = names
            .into_iter()
            .map(|name| self.registry.lookup(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if commands.is_empty() {
            return Err(ValidationError::EmptyCommandList.into());
        }
        self.commands = commands;
        Ok(())
    }

    #[must_use]
    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|command| command.name()).collect()
    }

    /// Installs a member generator used for every iteration of every command.
    pub fn set_generator<F>(&mut self, generator: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.key_source = KeySource::Generator(Arc::new(generator));
    }

    pub fn clear_generator(&mut self) {
        self.key_source = KeySource::Deterministic;
    }

    /// Success ratios of every trial run so far, in execution order.
    #[must_use]
    pub fn status(&self) -> Vec<f64> {
        self.run_log.snapshot()
    }

    #[must_use]
    pub const fn run_log(&self) -> &RunLog {
        &self.run_log
    }

    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    #[must_use]
    pub const fn keys(&self) -> &KeySpace {
        &self.keys
    }

    /// Counts operations of `command` completed within `window`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown command or a zero window.
    pub async fn measure_throughput(
        &mut self,
        command: &str,
        window: Duration,
    ) -> AppResult<ThroughputSample> {
        self.measure_throughput_with_progress(command, window, PROGRESS_TICK, |_| {})
            .await
    }

    /// Like [`BenchEngine::measure_throughput`], reporting the running count
    /// to `observe` every `tick`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown command or a zero window.
    pub async fn measure_throughput_with_progress<F>(
        &mut self,
        command: &str,
        window: Duration,
        tick: Duration,
        observe: F,
    ) -> AppResult<ThroughputSample>
    where
        F: FnMut(u64),
    {
        let command = self.registry.lookup(command)?;
        if window.is_zero() {
            return Err(ValidationError::DurationZero.into());
        }

        // Materialise whatever the fixed call depends on before the window opens.
        let mut setup: Vec<Invocation> = command.seed(&self.keys).into_iter().collect();
        setup.extend(command.prelude(&self.keys, SAMPLER_MEMBER));
        for step in setup {
            if let Err(err) = self.client.execute(step.command, &step.args).await {
                debug!("Sampler setup call failed: {}", err);
            }
        }

        let rank = command.draws_rank().then(|| draw_rank(&mut self.rng));
        let invocation = Invocation::new(
            command.name(),
            command.build_args(&self.keys, SAMPLER_MEMBER, rank),
        );
        sample_throughput(self.client.clone(), invocation, window, tick, observe).await
    }
}
