use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: redis::RedisError,
    },
    #[error("Failed to connect to '{address}': {source}")]
    Connect {
        address: String,
        #[source]
        source: redis::RedisError,
    },
    #[error("Timed out connecting to '{address}' after {}s.", timeout.as_secs())]
    ConnectTimeout { address: String, timeout: Duration },
    #[error("Command '{command}' failed: {source}")]
    Command {
        command: String,
        #[source]
        source: redis::RedisError,
    },
    #[error("Command '{command}' returned an error reply: {message}")]
    Server { command: String, message: String },
    #[cfg(test)]
    #[error("Injected failure for '{command}'.")]
    Injected { command: String },
}

impl StoreError {
    #[must_use]
    pub const fn is_connect_failure(&self) -> bool {
        match self {
            StoreError::InvalidAddress { .. }
            | StoreError::Connect { .. }
            | StoreError::ConnectTimeout { .. } => true,
            StoreError::Command { .. } | StoreError::Server { .. } => false,
            #[cfg(test)]
            StoreError::Injected { .. } => false,
        }
    }
}
