use rand::Rng;
use serde::Serialize;

use crate::store::Reply;

use super::KeySpace;

/// Sorted-set scores are drawn uniformly from `[0, RANK_UPPER_BOUND)`.
pub const RANK_UPPER_BOUND: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandFamily {
    Scalar,
    Hash,
    List,
    SortedSet,
    HyperLogLog,
}

impl CommandFamily {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandFamily::Scalar => "scalar",
            CommandFamily::Hash => "hash",
            CommandFamily::List => "list",
            CommandFamily::SortedSet => "sorted-set",
            CommandFamily::HyperLogLog => "hyperloglog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessRule {
    /// Positive integer, status line, or non-empty payload.
    Truthy,
    /// Any reply counts; only store errors fail the call.
    AnyReply,
}

impl SuccessRule {
    #[must_use]
    pub fn classify(self, reply: &Reply) -> bool {
        match self {
            SuccessRule::Truthy => reply.is_truthy(),
            SuccessRule::AnyReply => true,
        }
    }
}

/// One store call: command name plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: &'static str,
    pub args: Vec<String>,
}

impl Invocation {
    #[must_use]
    pub const fn new(command: &'static str, args: Vec<String>) -> Self {
        Self { command, args }
    }
}

pub trait BenchCommand: Send + Sync {
    fn name(&self) -> &'static str;
    fn family(&self) -> CommandFamily;
    fn success_rule(&self) -> SuccessRule;

    /// Whether each call carries a random rank in `[0, RANK_UPPER_BOUND)`.
    fn draws_rank(&self) -> bool;

    fn build_args(&self, keys: &KeySpace, member: &str, rank: Option<u32>) -> Vec<String>;

    /// Calls issued before the measured command within the same iteration.
    fn prelude(&self, keys: &KeySpace, member: &str) -> Vec<Invocation> {
        let _ = (keys, member);
        Vec::new()
    }

    /// Untimed call issued once before a trial, for commands that only
    /// succeed against existing data.
    fn seed(&self, keys: &KeySpace) -> Option<Invocation> {
        let _ = keys;
        None
    }

    fn classify(&self, reply: &Reply) -> bool {
        self.success_rule().classify(reply)
    }
}

pub fn draw_rank<R>(rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    rng.gen_range(0..RANK_UPPER_BOUND)
}
