// tests/lookahead_cache_correctness.rs
// End-to-end worker-pool scenarios for LookAheadCache, BoundedQueue and Queue.

use lookahead_cache::{BoundedQueue, Job, LookAheadCache, Queue, RangeJob, Terminated};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

/// Four workers pop/push against a shared cache fed a single range job; every
/// key in the range ends up cached exactly once and no worker observes a
/// duplicate `NEEDED` signal for the same key.
#[test]
fn multiple_workers_drain_a_job_without_duplicating_work() {
    const TOTAL: usize = 200;
    let cache: Arc<LookAheadCache<usize, usize, usize, RangeJob>> = Arc::new(LookAheadCache::new(1000));
    cache.submit_job(RangeJob::new(0, TOTAL));

    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut produced = Vec::new();
                loop {
                    match cache.pop() {
                        Ok(id) => {
                            let pushed = cache.push(id, 1, id * 10);
                            assert!(pushed, "budget of 1000 easily fits 200 unit-weight entries");
                            produced.push(id);
                        }
                        Err(Terminated) => break,
                    }
                }
                produced
            })
        })
        .collect();

    // The job is finite: once every id has been popped, the cursor empties
    // and subsequent pop calls block forever unless terminated.
    thread::sleep(Duration::from_millis(100));
    cache.terminate(true);

    let mut all: Vec<usize> = Vec::new();
    for handle in handles {
        all.extend(handle.join().expect("worker thread panicked"));
    }
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), TOTAL, "every key popped exactly once across all workers");

    let (keys, weight) = cache.dump_keys();
    assert_eq!(weight, TOTAL);
    assert_eq!(keys.len(), TOTAL);
}

/// A cache with a small budget evicts earlier low-priority entries once a
/// higher-priority one needs the room, across real worker threads.
#[test]
fn small_budget_cache_discards_under_pressure_from_workers() {
    let cache: Arc<LookAheadCache<usize, usize, i32, RangeJob>> = Arc::new(LookAheadCache::new(2));
    cache.submit_job(RangeJob::new(0, 3));

    let first = cache.pop().unwrap();
    assert!(cache.push(first, 2, 0));
    assert!(cache.get(&first).is_some());

    let second = cache.pop().unwrap();
    assert!(cache.push(second, 2, 0));
    assert!(cache.get(&second).is_some());
    assert!(cache.get(&first).is_none(), "first entry should have been evicted for the second");
}

/// BoundedQueue used as the hand-off between a dispatcher and a fixed pool of
/// workers: every item is received by exactly one worker, and the queue
/// never exceeds its configured capacity.
#[test]
fn bounded_queue_distributes_work_across_worker_pool() {
    let queue = Arc::new(BoundedQueue::new(16));
    let barrier = Arc::new(Barrier::new(9));

    let dispatcher_queue = Arc::clone(&queue);
    let dispatcher_barrier = Arc::clone(&barrier);
    let dispatcher = thread::spawn(move || {
        dispatcher_barrier.wait();
        for i in 0..800 {
            dispatcher_queue.push(i);
        }
    });

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut received = Vec::new();
                while received.len() < 100 {
                    received.push(queue.wait_pop());
                }
                received
            })
        })
        .collect();

    dispatcher.join().unwrap();
    let mut all: Vec<usize> = Vec::new();
    for worker in workers {
        all.extend(worker.join().unwrap());
    }
    all.sort_unstable();
    assert_eq!(all, (0..800).collect::<Vec<_>>());
}

/// An unbounded Queue used as a fan-in result channel: many producers, one
/// consumer, nothing lost or duplicated.
#[test]
fn queue_fans_in_results_from_many_producers() {
    let queue = Arc::new(Queue::new());
    let barrier = Arc::new(Barrier::new(6));

    let producers: Vec<_> = (0..5)
        .map(|p| {
            let queue = Arc::clone(&queue);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..40 {
                    queue.push(p * 40 + i);
                }
            })
        })
        .collect();
    barrier.wait();

    for producer in producers {
        producer.join().unwrap();
    }

    let mut collected = Vec::new();
    assert!(queue.drain_to(&mut collected));
    collected.sort_unstable();
    assert_eq!(collected, (0..200).collect::<Vec<_>>());
}

#[derive(Default)]
struct NeverEmptyJob {
    remaining: usize,
}

impl Job for NeverEmptyJob {
    type Key = usize;

    fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    fn next(&mut self) -> Self::Key {
        self.remaining -= 1;
        self.remaining
    }

    fn clear(&mut self) {
        self.remaining = 0;
    }
}

/// Terminating the cache while a worker is blocked mid-loop unblocks it
/// promptly rather than leaving it parked forever.
#[test]
fn terminate_unblocks_a_worker_parked_waiting_for_a_job() {
    let cache: Arc<LookAheadCache<usize, usize, i32, NeverEmptyJob>> = Arc::new(LookAheadCache::new(10));
    let worker_cache = Arc::clone(&cache);
    let worker = thread::spawn(move || worker_cache.pop());

    thread::sleep(Duration::from_millis(20));
    cache.terminate(true);

    let result = worker.join().expect("worker thread panicked");
    assert_eq!(result, Err(Terminated));
}
