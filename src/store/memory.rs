//! In-process stand-in for a key-value server, covering the commands the
//! catalog issues. Used by unit tests so the engine can be exercised without a
//! live server.
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::StoreError;

use super::{Reply, StoreClient};

#[derive(Debug, Clone)]
enum Entry {
    Str(String),
    Hash(HashMap<String, String>),
    List(VecDeque<String>),
    SortedSet(HashMap<String, i64>),
    Hll(BTreeSet<String>),
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, Entry>,
    failing: HashSet<String>,
    calls: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every future call of `command` fail with an injected error.
    pub(crate) fn fail_command(&self, command: &str) {
        self.lock().failing.insert(command.to_ascii_lowercase());
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.lock().calls.clone()
    }

    pub(crate) fn call_count(&self, command: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|(name, _)| name == command)
            .count()
    }

    pub(crate) fn key_exists(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn execute(&mut self, command: &str, args: &[String]) -> Result<Reply, StoreError> {
        let name = command.to_ascii_lowercase();
        let mut state = self.lock();
        state.calls.push((name.clone(), args.to_vec()));
        if state.failing.contains(&name) {
            return Err(StoreError::Injected { command: name });
        }
        apply(&mut state.entries, &name, args)
    }
}

fn apply(
    entries: &mut HashMap<String, Entry>,
    command: &str,
    args: &[String],
) -> Result<Reply, StoreError> {
    let arg = |idx: usize| -> Result<&str, StoreError> {
        args.get(idx)
            .map(String::as_str)
            .ok_or_else(|| server_error(command, "wrong number of arguments"))
    };

    match command {
        "set" => {
            entries.insert(arg(0)?.to_owned(), Entry::Str(arg(1)?.to_owned()));
            Ok(Reply::Status("OK".to_owned()))
        }
        "hset" => {
            let field = arg(1)?.to_owned();
            let value = arg(2)?.to_owned();
            let added = hash_mut(entries, command, arg(0)?, true)?
                .is_some_and(|hash| hash.insert(field, value).is_none());
            Ok(Reply::Integer(i64::from(added)))
        }
        "hget" => {
            let field = arg(1)?;
            let hash = hash_mut(entries, command, arg(0)?, false)?;
            let value = hash.and_then(|hash| hash.get(field).cloned());
            Ok(value.map_or(Reply::Nil, |value| Reply::Bulk(value.into_bytes())))
        }
        "hdel" => {
            let field = arg(1)?.to_owned();
            let hash = hash_mut(entries, command, arg(0)?, false)?;
            let removed = hash.is_some_and(|hash| hash.remove(&field).is_some());
            Ok(Reply::Integer(i64::from(removed)))
        }
        "hlen" => {
            let hash = hash_mut(entries, command, arg(0)?, false)?;
            let len = hash.map_or(0, |hash| hash.len());
            Ok(Reply::Integer(to_i64(len)))
        }
        "lpush" | "rpush" | "lpushx" | "rpushx" => {
            let must_exist = command.ends_with('x');
            let value = arg(1)?.to_owned();
            let Some(list) = list_mut(entries, command, arg(0)?, !must_exist)? else {
                return Ok(Reply::Integer(0));
            };
            if command.starts_with('l') {
                list.push_front(value);
            } else {
                list.push_back(value);
            }
            Ok(Reply::Integer(to_i64(list.len())))
        }
        "zadd" | "zincrby" => {
            let score: i64 = arg(1)?
                .parse()
                .map_err(|_parse| server_error(command, "value is not an integer"))?;
            let member = arg(2)?.to_owned();
            let zset = zset_mut(entries, command, arg(0)?, true)?
                .ok_or_else(|| server_error(command, "missing sorted set"))?;
            if command == "zadd" {
                let added = zset.insert(member, score).is_none();
                Ok(Reply::Integer(i64::from(added)))
            } else {
                let entry = zset.entry(member).or_insert(0);
                *entry = entry.saturating_add(score);
                Ok(Reply::Bulk(entry.to_string().into_bytes()))
            }
        }
        "zrem" => {
            let member = arg(1)?.to_owned();
            let zset = zset_mut(entries, command, arg(0)?, false)?;
            let removed = zset.is_some_and(|zset| zset.remove(&member).is_some());
            Ok(Reply::Integer(i64::from(removed)))
        }
        "zrank" => {
            let member = arg(1)?.to_owned();
            let zset = zset_mut(entries, command, arg(0)?, false)?;
            let rank = zset.and_then(|zset| {
                let mut ordered: Vec<(&String, &i64)> = zset.iter().collect();
                ordered.sort_by(|left, right| left.1.cmp(right.1).then(left.0.cmp(right.0)));
                ordered.iter().position(|(name, _)| **name == member)
            });
            Ok(rank.map_or(Reply::Nil, |rank| Reply::Integer(to_i64(rank))))
        }
        "pfadd" => {
            let hll = hll_mut(entries, command, arg(0)?)?;
            let mut changed = false;
            for member in args.iter().skip(1) {
                changed |= hll.insert(member.clone());
            }
            Ok(Reply::Integer(i64::from(changed)))
        }
        "pfcount" => {
            let hll = hll_mut(entries, command, arg(0)?)?;
            Ok(Reply::Integer(to_i64(hll.len())))
        }
        "pfmerge" => {
            let mut merged = BTreeSet::new();
            for source in args.iter().skip(1) {
                merged.extend(hll_mut(entries, command, source)?.iter().cloned());
            }
            hll_mut(entries, command, arg(0)?)?.extend(merged);
            Ok(Reply::Status("OK".to_owned()))
        }
        _ => Err(server_error(command, "unknown command")),
    }
}

fn server_error(command: &str, message: &str) -> StoreError {
    StoreError::Server {
        command: command.to_owned(),
        message: format!("ERR {}", message),
    }
}

fn wrong_type(command: &str) -> StoreError {
    server_error(
        command,
        "WRONGTYPE Operation against a key holding the wrong kind of value",
    )
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn hash_mut<'map>(
    entries: &'map mut HashMap<String, Entry>,
    command: &str,
    key: &str,
    create: bool,
) -> Result<Option<&'map mut HashMap<String, String>>, StoreError> {
    if create && !entries.contains_key(key) {
        entries.insert(key.to_owned(), Entry::Hash(HashMap::new()));
    }
    match entries.get_mut(key) {
        None => Ok(None),
        Some(Entry::Hash(hash)) => Ok(Some(hash)),
        Some(Entry::Str(_) | Entry::List(_) | Entry::SortedSet(_) | Entry::Hll(_)) => {
            Err(wrong_type(command))
        }
    }
}

fn list_mut<'map>(
    entries: &'map mut HashMap<String, Entry>,
    command: &str,
    key: &str,
    create: bool,
) -> Result<Option<&'map mut VecDeque<String>>, StoreError> {
    if create && !entries.contains_key(key) {
        entries.insert(key.to_owned(), Entry::List(VecDeque::new()));
    }
    match entries.get_mut(key) {
        None => Ok(None),
        Some(Entry::List(list)) => Ok(Some(list)),
        Some(Entry::Str(_) | Entry::Hash(_) | Entry::SortedSet(_) | Entry::Hll(_)) => {
            Err(wrong_type(command))
        }
    }
}

fn zset_mut<'map>(
    entries: &'map mut HashMap<String, Entry>,
    command: &str,
    key: &str,
    create: bool,
) -> Result<Option<&'map mut HashMap<String, i64>>, StoreError> {
    if create && !entries.contains_key(key) {
        entries.insert(key.to_owned(), Entry::SortedSet(HashMap::new()));
    }
    match entries.get_mut(key) {
        None => Ok(None),
        Some(Entry::SortedSet(zset)) => Ok(Some(zset)),
        Some(Entry::Str(_) | Entry::Hash(_) | Entry::List(_) | Entry::Hll(_)) => {
            Err(wrong_type(command))
        }
    }
}

fn hll_mut<'map>(
    entries: &'map mut HashMap<String, Entry>,
    command: &str,
    key: &str,
) -> Result<&'map mut BTreeSet<String>, StoreError> {
    let entry = entries
        .entry(key.to_owned())
        .or_insert_with(|| Entry::Hll(BTreeSet::new()));
    match entry {
        Entry::Hll(hll) => Ok(hll),
        Entry::Str(_) | Entry::Hash(_) | Entry::List(_) | Entry::SortedSet(_) => {
            Err(wrong_type(command))
        }
    }
}
