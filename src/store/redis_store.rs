use std::time::Duration;

use async_trait::async_trait;
use redis::Value;
use redis::aio::MultiplexedConnection;
use tokio::time::timeout;
use tracing::debug;

use crate::error::StoreError;

use super::{Reply, StoreClient};

/// Connect timeout applied when opening the benchmark connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Redis-protocol adapter holding one multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    address: String,
    connection: MultiplexedConnection,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Opens the connection using the default connect timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the address is invalid, the connection is
    /// refused, or it is not established within [`CONNECT_TIMEOUT`].
    pub async fn connect(address: &str) -> Result<Self, StoreError> {
        Self::connect_with_timeout(address, CONNECT_TIMEOUT).await
    }

    /// Opens the connection with an explicit connect timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the address is invalid, the connection is
    /// refused, or the timeout elapses first.
    pub async fn connect_with_timeout(
        address: &str,
        connect_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let url = normalize_address(address);
        let client =
            redis::Client::open(url.as_str()).map_err(|err| StoreError::InvalidAddress {
                address: address.to_owned(),
                source: err,
            })?;

        let connection = match timeout(connect_timeout, client.get_multiplexed_async_connection())
            .await
        {
            Ok(Ok(connection)) => connection,
            Ok(Err(err)) => {
                return Err(StoreError::Connect {
                    address: address.to_owned(),
                    source: err,
                });
            }
            Err(_) => {
                return Err(StoreError::ConnectTimeout {
                    address: address.to_owned(),
                    timeout: connect_timeout,
                });
            }
        };

        debug!("Connected to {}", url);
        Ok(Self {
            address: address.to_owned(),
            connection,
        })
    }
}

#[async_trait]
impl StoreClient for RedisStore {
    async fn execute(&mut self, command: &str, args: &[String]) -> Result<Reply, StoreError> {
        let mut cmd = redis::cmd(command);
        for arg in args {
            cmd.arg(arg);
        }
        let value: Value = cmd
            .query_async(&mut self.connection)
            .await
            .map_err(|err| classify_error(command, err))?;
        Ok(reply_from_value(value))
    }
}

/// Accepts `host:port` shorthand as well as full `redis://` / `rediss://` URLs.
pub(crate) fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("redis://{}/", trimmed)
    }
}

fn classify_error(command: &str, err: redis::RedisError) -> StoreError {
    if err.code().is_some() {
        StoreError::Server {
            command: command.to_owned(),
            message: err.to_string(),
        }
    } else {
        StoreError::Command {
            command: command.to_owned(),
            source: err,
        }
    }
}

fn reply_from_value(value: Value) -> Reply {
    match value {
        Value::Nil => Reply::Nil,
        Value::Int(value) => Reply::Integer(value),
        Value::Okay => Reply::Status("OK".to_owned()),
        Value::SimpleString(status) => Reply::Status(status),
        Value::BulkString(bytes) => Reply::Bulk(bytes),
        Value::Array(items) | Value::Set(items) => {
            Reply::Array(items.into_iter().map(reply_from_value).collect())
        }
        Value::Boolean(flag) => Reply::Integer(i64::from(flag)),
        Value::Double(number) => Reply::Bulk(number.to_string().into_bytes()),
        other => Reply::Bulk(format!("{:?}", other).into_bytes()),
    }
}
