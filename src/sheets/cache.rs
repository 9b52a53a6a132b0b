use std::time::Instant;

use indexmap::IndexMap;

use crate::models::record::Table;

/// Explicit read cache held by the caller, keyed the way reads are issued:
/// one entry per (source, worksheet, ttl).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source: String,
    pub worksheet: u32,
    pub ttl_secs: u64,
}

#[derive(Debug)]
struct CachedTable {
    fetched_at: Instant,
    table: Table,
}

#[derive(Debug, Default)]
pub struct ReadCache {
    entries: IndexMap<CacheKey, CachedTable>,
}

impl ReadCache {
    pub fn new() -> Self {
        ReadCache { entries: IndexMap::new() }
    }

    /// A ttl of 0 means "always refresh" and never hits the cache.
    pub fn get(&mut self, key: &CacheKey) -> Option<Table> {
        if key.ttl_secs == 0 {
            return None;
        }

        match self.entries.get(key) {
            Some(cached) if cached.fetched_at.elapsed().as_secs() < key.ttl_secs => {
                Some(cached.table.clone())
            }
            Some(_) => {
                self.entries.shift_remove(key);
                None
            }
            None => None,
        }
    }

    pub fn store(&mut self, key: CacheKey, table: Table) {
        if key.ttl_secs == 0 {
            return; // Nothing would ever read it back
        }
        self.entries.insert(key, CachedTable { fetched_at: Instant::now(), table });
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
