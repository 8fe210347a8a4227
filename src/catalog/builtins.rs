use crate::store::Reply;

use super::{BenchCommand, CommandFamily, Invocation, KeySpace, SuccessRule};

/// Payload written by commands that need a value alongside the member.
const FIELD_VALUE: &str = "kvmark";

type ArgsFn = fn(&KeySpace, &str, Option<u32>) -> Vec<String>;
type PreludeFn = fn(&KeySpace, &str) -> Vec<Invocation>;
type SeedFn = fn(&KeySpace) -> Invocation;

#[derive(Clone)]
pub(super) struct StaticCommand {
    name: &'static str,
    family: CommandFamily,
    success_rule: SuccessRule,
    draws_rank: bool,
    build_args: ArgsFn,
    prelude: Option<PreludeFn>,
    seed: Option<SeedFn>,
}

impl StaticCommand {
    const fn new(
        name: &'static str,
        family: CommandFamily,
        success_rule: SuccessRule,
        build_args: ArgsFn,
    ) -> Self {
        Self {
            name,
            family,
            success_rule,
            draws_rank: false,
            build_args,
            prelude: None,
            seed: None,
        }
    }

    const fn truthy(name: &'static str, family: CommandFamily, build_args: ArgsFn) -> Self {
        Self::new(name, family, SuccessRule::Truthy, build_args)
    }

    const fn ranked(mut self) -> Self {
        self.draws_rank = true;
        self
    }

    const fn with_prelude(mut self, prelude: PreludeFn) -> Self {
        self.prelude = Some(prelude);
        self
    }

    const fn with_seed(mut self, seed: SeedFn) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl BenchCommand for StaticCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn family(&self) -> CommandFamily {
        self.family
    }

    fn success_rule(&self) -> SuccessRule {
        self.success_rule
    }

    fn draws_rank(&self) -> bool {
        self.draws_rank
    }

    fn build_args(&self, keys: &KeySpace, member: &str, rank: Option<u32>) -> Vec<String> {
        (self.build_args)(keys, member, rank)
    }

    fn prelude(&self, keys: &KeySpace, member: &str) -> Vec<Invocation> {
        self.prelude
            .map_or_else(Vec::new, |prelude| prelude(keys, member))
    }

    fn seed(&self, keys: &KeySpace) -> Option<Invocation> {
        self.seed.map(|seed| seed(keys))
    }

    fn classify(&self, reply: &Reply) -> bool {
        self.success_rule.classify(reply)
    }
}

pub(super) fn builtins() -> Vec<StaticCommand> {
    use CommandFamily::{Hash, HyperLogLog, List, Scalar, SortedSet};

    vec![
        StaticCommand::truthy("set", Scalar, set_args),
        StaticCommand::truthy("hset", Hash, hset_args),
        StaticCommand::truthy("hget", Hash, hash_member_args),
        StaticCommand::truthy("hdel", Hash, hash_member_args),
        // A zero-length hash is a valid state, not a failed call.
        StaticCommand::new("hlen", Hash, SuccessRule::AnyReply, hash_only_args),
        StaticCommand::truthy("lpush", List, list_args),
        StaticCommand::truthy("rpush", List, list_args),
        StaticCommand::truthy("lpushx", List, list_args).with_seed(seed_list),
        StaticCommand::truthy("rpushx", List, list_args).with_seed(seed_list),
        StaticCommand::truthy("zadd", SortedSet, ranked_args).ranked(),
        StaticCommand::truthy("zincrby", SortedSet, ranked_args).ranked(),
        StaticCommand::truthy("zrem", SortedSet, sorted_set_member_args),
        StaticCommand::truthy("zrank", SortedSet, sorted_set_member_args),
        StaticCommand::truthy("pfadd", HyperLogLog, hll_member_args),
        StaticCommand::truthy("pfcount", HyperLogLog, hll_only_args),
        StaticCommand::truthy("pfmerge", HyperLogLog, pfmerge_args).with_prelude(pfmerge_prelude),
    ]
}

fn set_args(keys: &KeySpace, member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.string(member), member.to_owned()]
}

fn hset_args(keys: &KeySpace, member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.hash(), member.to_owned(), FIELD_VALUE.to_owned()]
}

fn hash_member_args(keys: &KeySpace, member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.hash(), member.to_owned()]
}

fn hash_only_args(keys: &KeySpace, _member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.hash()]
}

fn list_args(keys: &KeySpace, member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.list(), member.to_owned()]
}

fn seed_list(keys: &KeySpace) -> Invocation {
    Invocation::new("lpush", vec![keys.list(), FIELD_VALUE.to_owned()])
}

fn ranked_args(keys: &KeySpace, member: &str, rank: Option<u32>) -> Vec<String> {
    vec![
        keys.sorted_set(),
        rank.unwrap_or_default().to_string(),
        member.to_owned(),
    ]
}

fn sorted_set_member_args(keys: &KeySpace, member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.sorted_set(), member.to_owned()]
}

fn hll_member_args(keys: &KeySpace, member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.hll(), member.to_owned()]
}

fn hll_only_args(keys: &KeySpace, _member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.hll()]
}

fn pfmerge_prelude(keys: &KeySpace, member: &str) -> Vec<Invocation> {
    vec![
        Invocation::new("pfadd", vec![keys.hll_source(1), member.to_owned()]),
        Invocation::new("pfadd", vec![keys.hll_source(2), member.to_owned()]),
    ]
}

fn pfmerge_args(keys: &KeySpace, _member: &str, _rank: Option<u32>) -> Vec<String> {
    vec![keys.hll_merged(), keys.hll_source(1), keys.hll_source(2)]
}
