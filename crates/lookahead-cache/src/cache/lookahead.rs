//! The synchronized look-ahead orchestrator workers interact with.
//!
//! Grounded on `original_source/concurrent/cache/lookahead_cache.hpp`. Two
//! mutexes guard disjoint state: `worker_mutex` wraps the shared job cursor
//! (only one worker advances it at a time — `pop` holds this lock for its
//! entire body, exactly as the original's `lock_guard<mutex> lock(m_WorkerMutex)`
//! spans the whole `do`/`while` loop), and `cache_mutex` wraps the
//! [`PriorityCacheEngine`] itself. `worker_mutex` is always acquired first;
//! `cache_mutex` is taken and released per call inside that section, never
//! the reverse order.

use crate::cache::engine::{PriorityCacheEngine, UpdateStatus};
use crate::error::Terminated;
use crate::job::Job;
use crate::slot::Slot;
use crate::weight::Weight;
use std::hash::Hash;
use std::sync::Mutex;

/// A speculative, priority-ordered cache fed by worker threads pulling keys
/// from a caller-submitted [`Job`].
pub struct LookAheadCache<K, W, V, J: Job<Key = K>> {
    worker_mutex: Mutex<J>,
    cache_mutex: Mutex<PriorityCacheEngine<K, W, V>>,
    pending_job: Slot<J>,
}

impl<K, W, V, J> LookAheadCache<K, W, V, J>
where
    K: Clone + Eq + Hash,
    W: Weight,
    J: Job<Key = K>,
{
    /// Creates an empty cache with the given weight budget and no submitted
    /// job; the first `pop` call will block until [`LookAheadCache::submit_job`]
    /// or [`LookAheadCache::terminate`] is called.
    pub fn new(max_weight: W) -> Self {
        Self {
            worker_mutex: Mutex::new(J::default()),
            cache_mutex: Mutex::new(PriorityCacheEngine::new(max_weight)),
            pending_job: Slot::new(),
        }
    }

    /// Looks up a cached value, cloning it out from under the lock.
    pub fn get(&self, id: &K) -> Option<V>
    where
        V: Clone,
    {
        self.lock_cache().get(id).cloned()
    }

    /// Snapshots every cached key plus the cache's current total weight.
    pub fn dump_keys(&self) -> (Vec<K>, W) {
        let cache = self.lock_cache();
        (cache.dump_keys(), cache.weight())
    }

    /// Changes the weight budget under the cache lock.
    pub fn set_max_weight(&self, max_weight: W) {
        self.lock_cache().set_max_weight(max_weight);
    }

    /// Hands a new job to whichever worker next reaches the bottom of its
    /// `pop` loop. Overwrites any job submitted but not yet picked up.
    pub fn submit_job(&self, job: J) {
        self.pending_job.set(job);
    }

    /// Wakes every thread blocked in `pop`, causing them to return
    /// `Err(Terminated)`. Pass `false` to resume normal operation.
    pub fn terminate(&self, value: bool) {
        self.pending_job.terminate(value);
    }

    /// Inserts a produced value into the cache under its priority weight.
    /// Returns `true` iff it ended up cached (see [`PriorityCacheEngine::put`]
    /// for the panics this forwards on caller misuse).
    pub fn push(&self, id: K, weight: W, value: V) -> bool {
        self.lock_cache().put(id, weight, value)
    }

    /// Blocks until a key the cache actually needs is found, or the cache is
    /// terminated.
    ///
    /// Serializes with every other `pop` caller: only one worker advances the
    /// shared job cursor at a time.
    pub fn pop(&self) -> Result<K, Terminated> {
        let mut current_job = self.worker_mutex.lock().expect("LookAheadCache worker mutex poisoned");
        loop {
            let id = self.next_work_unit(&mut current_job)?;
            let status = self.lock_cache().update(id.clone());
            match status {
                UpdateStatus::Full => current_job.clear(),
                UpdateStatus::NotNeeded => {}
                UpdateStatus::Needed => return Ok(id),
            }
        }
    }

    fn next_work_unit(&self, current_job: &mut J) -> Result<K, Terminated> {
        if self.update_job(current_job)? {
            self.lock_cache().discard_pending();
        }
        Ok(current_job.next())
    }

    fn update_job(&self, current_job: &mut J) -> Result<bool, Terminated> {
        let mut updated = self.pending_job.try_get(current_job)?;
        while current_job.is_empty() {
            self.pending_job.wait_get(current_job)?;
            updated = true;
        }
        Ok(updated)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, PriorityCacheEngine<K, W, V>> {
        self.cache_mutex.lock().expect("LookAheadCache cache mutex poisoned")
    }
}
