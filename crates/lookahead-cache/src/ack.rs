//! A one-shot acknowledge latch, built from [`Slot<bool>`].
//!
//! Enables rendezvous patterns such as "main thread waits for a worker to
//! process its first item" — see `original_source/src/concurrent/Response.hpp`
//! and its use as `workerStarted` in `examples/LookAheadCache.cpp`.

use crate::slot::Slot;

/// A single-use, one-way notification: one side calls [`Ack::ack`], the other
/// calls [`Ack::wait`].
#[derive(Default)]
pub struct Ack {
    slot: Slot<bool>,
}

impl Ack {
    /// Creates a fresh, un-acknowledged latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals the latch. Never blocks.
    pub fn ack(&self) {
        self.slot.set(true);
    }

    /// Blocks until [`Ack::ack`] is called.
    pub fn wait(&self) {
        let mut unused = false;
        // An ack latch is never terminated; the slot only yields Err when
        // someone calls `terminate`, which nothing does for an `Ack`.
        let _ = self.slot.wait_get(&mut unused);
    }
}
