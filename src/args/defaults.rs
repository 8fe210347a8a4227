/// Store address used when neither the CLI, the environment nor a config
/// file names one.
pub(crate) const DEFAULT_ADDRESS: &str = "127.0.0.1:6379";

pub(crate) const DEFAULT_THROUGHPUT_WINDOW: &str = "2s";

/// Length of the members produced by `--random-keys`.
pub(crate) const RANDOM_KEY_LEN: usize = 10;
