//! Read cache of item requests.
//!
//! One store is created per page and handed to the lifecycle client; there is
//! no global instance. Every successful mutation invalidates all entries, and
//! the next read of an invalidated key goes back to the server.

use contracts::domain::a003_item_request::{ItemRequest, RequisitionView};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Which read an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    All,
    ById(i64),
    ByOffice(i64),
    View(RequisitionView),
}

#[derive(Debug, Clone)]
enum Cached {
    List(Vec<ItemRequest>),
    One(ItemRequest),
}

#[derive(Debug, Clone)]
struct Entry {
    data: Cached,
    stale: bool,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<QueryKey, Entry>,
    generation: u64,
}

/// Shared handle; clones point at the same store.
#[derive(Debug, Clone, Default)]
pub struct RequisitionCache {
    inner: Arc<Mutex<CacheState>>,
}

impl RequisitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        // single-threaded in the browser; a poisoned lock still holds valid data
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Bumped by every invalidation. A fetch started under an older
    /// generation must not be stored as fresh.
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    pub fn is_fresh(&self, key: QueryKey) -> bool {
        self.state()
            .entries
            .get(&key)
            .map(|e| !e.stale)
            .unwrap_or(false)
    }

    pub fn fresh_list(&self, key: QueryKey) -> Option<Vec<ItemRequest>> {
        match self.state().entries.get(&key) {
            Some(Entry {
                data: Cached::List(items),
                stale: false,
            }) => Some(items.clone()),
            _ => None,
        }
    }

    pub fn fresh_one(&self, id: i64) -> Option<ItemRequest> {
        match self.state().entries.get(&QueryKey::ById(id)) {
            Some(Entry {
                data: Cached::One(item),
                stale: false,
            }) => Some(item.clone()),
            _ => None,
        }
    }

    /// Stores a list fetched while `generation` was current.
    pub fn store_list(&self, key: QueryKey, items: Vec<ItemRequest>, generation: u64) {
        self.store(key, Cached::List(items), generation);
    }

    pub fn store_one(&self, item: ItemRequest, generation: u64) {
        self.store(QueryKey::ById(item.id), Cached::One(item), generation);
    }

    fn store(&self, key: QueryKey, data: Cached, generation: u64) {
        let mut state = self.state();
        let stale = generation != state.generation;
        state.entries.insert(key, Entry { data, stale });
    }

    /// Marks every item-request entry stale.
    pub fn invalidate_all(&self) {
        let mut state = self.state();
        state.generation += 1;
        for entry in state.entries.values_mut() {
            entry.stale = true;
        }
    }
}
