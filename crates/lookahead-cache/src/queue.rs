//! An unbounded, thread-safe FIFO queue.
//!
//! One `Mutex<VecDeque<T>>` guards the container; one `Condvar` wakes waiters
//! on `push`. `push`/`wait_pop` never block the producer and preserve FIFO
//! order for any single producer/consumer pair (ordering across multiple
//! producers is unspecified, as in the original
//! `original_source/concurrent/queue.hpp`).

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// Unbounded multi-producer multi-consumer FIFO queue.
pub struct Queue<T> {
    inner: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    /// Enqueues `value` at the tail and wakes one waiter. Never blocks.
    pub fn push(&self, value: T) {
        let mut inner = self.inner.lock().expect("Queue mutex poisoned");
        inner.push_back(value);
        drop(inner);
        self.not_empty.notify_one();
    }

    /// Blocks until the queue is non-empty, then dequeues the head.
    pub fn wait_pop(&self) -> T {
        let mut inner = self.inner.lock().expect("Queue mutex poisoned");
        while inner.is_empty() {
            inner = self.not_empty.wait(inner).expect("Queue condvar poisoned");
        }
        inner.pop_front().expect("queue just confirmed non-empty")
    }

    /// Non-blocking dequeue. Returns `Some(value)` if the queue was
    /// non-empty; each element is delivered to exactly one caller when
    /// multiple threads race on `try_pop`.
    pub fn try_pop(&self) -> Option<T> {
        let mut inner = self.inner.lock().expect("Queue mutex poisoned");
        inner.pop_front()
    }

    /// Empties the queue.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("Queue mutex poisoned");
        inner.clear();
    }

    /// Returns the number of elements currently queued.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("Queue mutex poisoned").len()
    }

    /// Returns `true` if the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves every element of `src` to the tail of the queue in a single
    /// critical section, then wakes one waiter. `src` is consumed.
    pub fn drain_from<I: IntoIterator<Item = T>>(&self, src: I) {
        let mut iter = src.into_iter().peekable();
        if iter.peek().is_none() {
            return;
        }
        let mut inner = self.inner.lock().expect("Queue mutex poisoned");
        inner.extend(iter);
        drop(inner);
        self.not_empty.notify_one();
    }

    /// Appends every queued element into `dst`, emptying the queue. Returns
    /// `true` iff anything was moved.
    pub fn drain_to<E: Extend<T>>(&self, dst: &mut E) -> bool {
        let mut inner = self.inner.lock().expect("Queue mutex poisoned");
        if inner.is_empty() {
            return false;
        }
        dst.extend(inner.drain(..));
        true
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn push_then_pop_returns_value() {
        let q = Queue::new();
        q.push(5);
        assert_eq!(q.try_pop(), Some(5));
    }

    #[test]
    fn clear_empties_queue() {
        let q = Queue::new();
        q.push(5);
        q.clear();
        assert_eq!(q.try_pop(), None);
    }

    #[test]
    fn fifo_order_single_producer_consumer() {
        let q = Queue::new();
        for i in 0..10 {
            q.push(i);
        }
        for i in 0..10 {
            assert_eq!(q.try_pop(), Some(i));
        }
    }

    #[test]
    fn drain_to_compatible_collects_in_order_and_empties_queue() {
        let initial = vec![5, 2, 3, -1, 6, 9, 10, 55];
        let q: Queue<i32> = Queue::new();
        for &v in &initial {
            q.push(v);
        }

        let mut result: Vec<i32> = Vec::new();
        assert!(q.drain_to(&mut result));
        assert_eq!(result, initial);
        assert_eq!(q.try_pop(), None);
    }

    #[test]
    fn drain_from_moves_all_elements_preserving_order() {
        let initial = vec![5, 2, 3, -1, 6, 9, 10, 55];
        let q: Queue<i32> = Queue::new();
        q.drain_from(initial.clone());

        let mut result: Vec<i32> = Vec::new();
        assert!(q.drain_to(&mut result));
        assert_eq!(result, initial);
        assert_eq!(q.try_pop(), None);
    }

    #[test]
    fn drain_to_on_empty_queue_returns_false() {
        let q: Queue<i32> = Queue::new();
        let mut result = Vec::new();
        assert!(!q.drain_to(&mut result));
        assert!(result.is_empty());
    }

    #[test]
    fn wait_pop_blocks_until_pushed() {
        let q: Arc<Queue<i32>> = Arc::new(Queue::new());
        let producer = Arc::clone(&q);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.push(7);
        });

        assert_eq!(q.wait_pop(), 7);
        handle.join().unwrap();
    }

    #[test]
    fn try_pop_delivers_each_element_to_exactly_one_thread() {
        let q = Arc::new(Queue::new());
        for i in 0..200 {
            q.push(i);
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    let mut popped = Vec::new();
                    while let Some(v) = q.try_pop() {
                        popped.push(v);
                    }
                    popped
                })
            })
            .collect();

        let mut all: Vec<i32> = Vec::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }
        all.sort_unstable();
        assert_eq!(all, (0..200).collect::<Vec<_>>());
    }
}
