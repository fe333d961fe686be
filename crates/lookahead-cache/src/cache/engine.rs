//! The single-threaded priority cache state machine.
//!
//! This is the unsynchronized backend wrapped by [`crate::LookAheadCache`] —
//! grounded directly on
//! `original_source/concurrent/cache/priority_cache_details.hpp`. It is not
//! thread-safe and is not meant to be used directly from multiple threads;
//! callers needing concurrent access go through `LookAheadCache`.

use crate::weight::Weight;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Outcome of [`PriorityCacheEngine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The cache is already full; `update` returned before touching the
    /// pending/discardable lists at all, so `id` was not recorded anywhere.
    Full,
    /// The id is neither cached nor already pending/discardable elsewhere —
    /// the caller should `put` it.
    Needed,
    /// The id is already cached, or was already pending/discardable and has
    /// simply been re-prioritized.
    NotNeeded,
}

struct WeightedValue<W, V> {
    weight: W,
    value: V,
}

/// Thread-unsafe priority cache backend.
///
/// `K` is the id type, `W` the weight/metric type (see [`Weight`]), `V` the
/// stored value. Two FIFO-ish deques (`pending`, `discardable`) track
/// priority order; `store` holds the cached weight/value pairs.
pub struct PriorityCacheEngine<K, W, V> {
    max_weight: W,
    discardable: VecDeque<K>,
    pending: VecDeque<K>,
    store: HashMap<K, WeightedValue<W, V>>,
}

impl<K, W, V> PriorityCacheEngine<K, W, V>
where
    K: Clone + Eq + Hash,
    W: Weight,
{
    /// Creates an empty cache with the given weight budget.
    pub fn new(max_weight: W) -> Self {
        Self {
            max_weight,
            discardable: VecDeque::new(),
            pending: VecDeque::new(),
            store: HashMap::new(),
        }
    }

    /// Copies every cached id into a freshly allocated vector. Order is
    /// unspecified.
    pub fn dump_keys(&self) -> Vec<K> {
        self.store.keys().cloned().collect()
    }

    /// `true` if the budget is zero, or the contiguous run of pending ids
    /// already in the cache already exceeds it.
    pub fn full(&self) -> bool {
        self.max_weight == W::zero() || self.contiguous_weight() > self.max_weight
    }

    /// `true` if `id` is currently cached.
    pub fn contains(&self, id: &K) -> bool {
        self.store.contains_key(id)
    }

    /// `true` if `id` is in the pending (requested-but-not-yet-cached) list.
    pub fn pending(&self, id: &K) -> bool {
        self.pending.contains(id)
    }

    /// Sum of the weights of every currently cached entry.
    pub fn weight(&self) -> W {
        self.current_weight()
    }

    /// Looks up a cached value without affecting pending/discardable state.
    pub fn get(&self, id: &K) -> Option<&V> {
        self.store.get(id).map(|wd| &wd.value)
    }

    /// Moves every pending id to the front of the discardable list,
    /// preserving their relative order, and clears the pending list.
    pub fn discard_pending(&mut self) {
        let moved: VecDeque<K> = self.pending.drain(..).collect();
        let mut rebuilt = moved;
        rebuilt.append(&mut self.discardable);
        self.discardable = rebuilt;
    }

    /// Records a fresh priority signal for `id`. Must be called before `put`
    /// for any id the caller intends to cache.
    pub fn update(&mut self, id: K) -> UpdateStatus {
        if self.full() {
            return UpdateStatus::Full;
        }
        let was_requested = self.remove(&id);
        let already_cached = self.contains(&id);
        self.pending.push_back(id);
        if was_requested || already_cached {
            UpdateStatus::NotNeeded
        } else {
            UpdateStatus::Needed
        }
    }

    /// Inserts `id` with the given `weight` and `value`, evicting lower
    /// priority entries if needed to make room. Returns `true` iff `id` ended
    /// up cached.
    ///
    /// # Panics
    /// Panics if `weight` is zero, or if `id` is already cached — both are
    /// caller bugs, not recoverable runtime conditions.
    pub fn put(&mut self, id: K, weight: W, value: V) -> bool {
        assert!(weight != W::zero(), "can't put an id with no weight");
        assert!(!self.contains(&id), "id is already present in cache");

        if self.full() {
            self.remove(&id);
            return false;
        }
        if !self.can_fit(weight) {
            self.make_room_for(&id, weight);
        }
        if self.full() {
            return false;
        }
        self.add_to_cache(id, weight, value);
        true
    }

    /// Changes the weight budget. Does not evict; the next `update`/`put`
    /// will observe the new limit.
    pub fn set_max_weight(&mut self, max_weight: W) {
        self.max_weight = max_weight;
    }

    fn remove_from(container: &mut VecDeque<K>, id: &K) -> bool {
        if let Some(pos) = container.iter().position(|existing| existing == id) {
            container.remove(pos);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, id: &K) -> bool {
        Self::remove_from(&mut self.pending, id) || Self::remove_from(&mut self.discardable, id)
    }

    fn contiguous_weight(&self) -> W {
        let mut sum = W::zero();
        for id in &self.pending {
            match self.store.get(id) {
                Some(wd) => sum = sum + wd.weight,
                None => return sum,
            }
        }
        sum
    }

    fn current_weight(&self) -> W {
        self.store.values().fold(W::zero(), |acc, wd| acc + wd.weight)
    }

    fn can_fit(&self, weight: W) -> bool {
        if weight > self.max_weight {
            return false;
        }
        let headroom = self.max_weight - weight;
        self.current_weight() <= headroom
    }

    fn make_room_for(&mut self, _current_id: &K, weight: W) {
        let first_missing = self
            .pending
            .iter()
            .position(|id| !self.store.contains_key(id))
            .unwrap_or(self.pending.len());

        let mut discardables: Vec<K> = self.pending.iter().skip(first_missing).cloned().collect();
        discardables.extend(self.discardable.iter().cloned());

        // `weight` can exceed `max_weight` for a single incoming entry (the
        // budget only bites once something is actually cached); floor at
        // zero instead of underflowing.
        let target = self.max_weight.saturating_sub(weight);
        discardables.reverse();
        for id in discardables {
            self.evict(&id);
            if self.current_weight() <= target {
                break;
            }
        }
    }

    fn evict(&mut self, id: &K) {
        if self.store.remove(id).is_some() {
            self.remove(id);
        }
    }

    fn add_to_cache(&mut self, id: K, weight: W, value: V) {
        if !(self.pending.contains(&id) || self.discardable.contains(&id)) {
            self.discardable.push_back(id.clone());
        }
        self.store.insert(id, WeightedValue { weight, value });
    }
}
