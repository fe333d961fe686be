//! A fixed-capacity, thread-safe LIFO queue.
//!
//! Same operation surface as [`crate::Queue`] plus blocking when the queue is
//! full. Two condition variables (`not_empty`, `not_full`) sit over one
//! mutex, as in `original_source/concurrent/bounded_queue.h`. Capacity is
//! tracked as an explicit `unread` count separate from the backing buffer's
//! length, and fullness is always checked against that fixed capacity rather
//! than the buffer's live size.
//!
//! Push inserts at logical index `u`, pop reads back `buffer[u-1]` — i.e. the
//! buffer is used as a stack. `try_push` inserts and returns `true` iff space
//! existed; it never re-pops what it just inserted.

use std::sync::{Condvar, Mutex};

struct Inner<T> {
    buffer: Vec<Option<T>>,
    unread: usize,
}

/// Fixed-capacity multi-producer multi-consumer LIFO queue.
pub struct BoundedQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue able to hold up to `capacity` unread values.
    pub fn new(capacity: usize) -> Self {
        let mut buffer = Vec::with_capacity(capacity);
        buffer.resize_with(capacity, || None);
        Self {
            inner: Mutex::new(Inner { buffer, unread: 0 }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// The fixed capacity this queue was constructed with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Blocks while the queue is full, then stores `value` and wakes one
    /// `not_empty` waiter.
    pub fn push(&self, value: T) {
        let mut inner = self.inner.lock().expect("BoundedQueue mutex poisoned");
        while inner.unread == self.capacity {
            inner = self.not_full.wait(inner).expect("BoundedQueue condvar poisoned");
        }
        inner.buffer[inner.unread] = Some(value);
        inner.unread += 1;
        drop(inner);
        self.not_empty.notify_one();
    }

    /// Non-blocking push. Returns `false` if the queue was full.
    pub fn try_push(&self, value: T) -> bool {
        let mut inner = self.inner.lock().expect("BoundedQueue mutex poisoned");
        if inner.unread == self.capacity {
            return false;
        }
        let unread = inner.unread;
        inner.buffer[unread] = Some(value);
        inner.unread += 1;
        drop(inner);
        self.not_empty.notify_one();
        true
    }

    /// Blocks until the queue is non-empty, then pops the most recently
    /// pushed value (LIFO).
    pub fn wait_pop(&self) -> T {
        let mut inner = self.inner.lock().expect("BoundedQueue mutex poisoned");
        while inner.unread == 0 {
            inner = self.not_empty.wait(inner).expect("BoundedQueue condvar poisoned");
        }
        inner.unread -= 1;
        let unread = inner.unread;
        let value = inner.buffer[unread].take().expect("unread slot holds a value");
        drop(inner);
        self.not_full.notify_one();
        value
    }

    /// Non-blocking pop. Returns `None` if the queue was empty.
    pub fn try_pop(&self) -> Option<T> {
        let mut inner = self.inner.lock().expect("BoundedQueue mutex poisoned");
        if inner.unread == 0 {
            return None;
        }
        inner.unread -= 1;
        let unread = inner.unread;
        let value = inner.buffer[unread].take();
        drop(inner);
        self.not_full.notify_one();
        value
    }

    /// Empties the queue, waking any `not_full` waiters.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("BoundedQueue mutex poisoned");
        if inner.unread == 0 {
            return;
        }
        for slot in inner.buffer[..inner.unread].iter_mut() {
            *slot = None;
        }
        inner.unread = 0;
        drop(inner);
        self.not_full.notify_all();
    }

    /// The number of unread values currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("BoundedQueue mutex poisoned").unread
    }

    /// Returns `true` if the queue holds no unread values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves as many elements of `src` into the queue as fit without
    /// blocking, in a single critical section. Returns the number of
    /// elements actually moved; any remainder stays in `src` (the iterator is
    /// simply not drained further).
    pub fn drain_from<I: IntoIterator<Item = T>>(&self, src: I) -> usize {
        let mut inner = self.inner.lock().expect("BoundedQueue mutex poisoned");
        let mut moved = 0;
        for value in src {
            if inner.unread == self.capacity {
                break;
            }
            let unread = inner.unread;
            inner.buffer[unread] = Some(value);
            inner.unread += 1;
            moved += 1;
        }
        drop(inner);
        if moved > 0 {
            self.not_empty.notify_one();
        }
        moved
    }

    /// Appends every held value into `dst`, emptying the queue. Returns
    /// `true` iff anything was moved.
    pub fn drain_to<E: Extend<T>>(&self, dst: &mut E) -> bool {
        let mut inner = self.inner.lock().expect("BoundedQueue mutex poisoned");
        if inner.unread == 0 {
            return false;
        }
        let unread = inner.unread;
        let drained = inner.buffer[..unread].iter_mut().map(|slot| slot.take().expect("unread slot holds a value"));
        dst.extend(drained);
        inner.unread = 0;
        drop(inner);
        self.not_full.notify_all();
        true
    }
}
