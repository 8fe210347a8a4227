//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::KvmarkArgs;
pub use types::{OutputFormat, PositiveU32, PositiveUsize};

pub(crate) use defaults::RANDOM_KEY_LEN;
