use std::fmt;
use std::sync::Arc;

/// Caller-supplied member generator; overrides the deterministic scheme.
pub type KeyGenerator = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone, Default)]
pub enum KeySource {
    #[default]
    Deterministic,
    Generator(KeyGenerator),
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Deterministic => f.write_str("Deterministic"),
            KeySource::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl KeySource {
    /// Member for one iteration: `<command>:<iterations>:<index>` unless a
    /// generator is installed.
    #[must_use]
    pub fn member(&self, command: &str, iterations: usize, index: usize) -> String {
        match self {
            KeySource::Deterministic => format!("{}:{}:{}", command, iterations, index),
            KeySource::Generator(generate) => generate(),
        }
    }
}

/// Container key names, one per command family, under a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

pub const DEFAULT_KEY_PREFIX: &str = "kvmark";

impl KeySpace {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn string(&self, member: &str) -> String {
        format!("{}:str:{}", self.prefix, member)
    }

    #[must_use]
    pub fn hash(&self) -> String {
        format!("{}:hash", self.prefix)
    }

    #[must_use]
    pub fn list(&self) -> String {
        format!("{}:list", self.prefix)
    }

    #[must_use]
    pub fn sorted_set(&self) -> String {
        format!("{}:zset", self.prefix)
    }

    #[must_use]
    pub fn hll(&self) -> String {
        format!("{}:hll", self.prefix)
    }

    #[must_use]
    pub fn hll_source(&self, slot: u8) -> String {
        format!("{}:hll:src{}", self.prefix, slot)
    }

    #[must_use]
    pub fn hll_merged(&self) -> String {
        format!("{}:hll:dest", self.prefix)
    }
}
