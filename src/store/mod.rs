//! Store client boundary: the one capability the benchmark engine needs from
//! a key-value server is "issue command, get reply or error".
mod redis_store;
mod traits;

#[cfg(test)]
pub(crate) mod memory;

pub use redis_store::{CONNECT_TIMEOUT, RedisStore};
pub use traits::{Reply, StoreClient};
