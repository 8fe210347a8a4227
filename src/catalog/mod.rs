//! Command catalog: maps command names to strategy objects that know how to
//! build arguments for one call and how to classify its reply.
mod builtins;
mod invoke;
mod keys;
mod registry;
mod traits;


pub use invoke::{ErrorPolicy, invoke};
pub use keys::{DEFAULT_KEY_PREFIX, KeyGenerator, KeySource, KeySpace};
pub use registry::{CommandRegistry, command_registry};
pub use traits::{BenchCommand, CommandFamily, Invocation, RANK_UPPER_BOUND, SuccessRule, draw_rank};
