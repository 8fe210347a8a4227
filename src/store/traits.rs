use async_trait::async_trait;
use serde::Serialize;

use crate::error::StoreError;

/// Protocol-neutral view of a server reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Reply {
    Nil,
    Integer(i64),
    Status(String),
    Bulk(Vec<u8>),
    Array(Vec<Reply>),
}

impl Reply {
    /// Generic success convention: a positive integer, a status line, or a
    /// non-empty payload. `Nil`, zero and negative integers count as failure.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Reply::Nil => false,
            Reply::Integer(value) => *value > 0,
            Reply::Status(_) => true,
            Reply::Bulk(bytes) => !bytes.is_empty(),
            Reply::Array(items) => !items.is_empty(),
        }
    }
}

/// A single persistent connection to the store under test.
///
/// Implementors are cloned into the throughput sampler's background task, so
/// a clone must be usable independently of the original handle.
#[async_trait]
pub trait StoreClient: Clone + Send + Sync + 'static {
    /// Executes one command and returns the server reply.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Command` on transport failures and
    /// `StoreError::Server` when the server answers with an error reply.
    async fn execute(&mut self, command: &str, args: &[String]) -> Result<Reply, StoreError>;
}
