use clap::Parser;
use lookahead_cache::{Ack, LookAheadCache, RangeJob};
use std::sync::Arc;
use std::thread;

/// Drive a LookAheadCache with a pool of worker threads processing a
/// range of ids, then report what ended up cached.
#[derive(Parser, Debug)]
#[command(name = "lookahead-cache-demo", about = "Speculative look-ahead cache worker-pool demo")]
struct Args {
    /// Number of worker threads processing jobs concurrently
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// First id of the job range
    #[arg(long, default_value_t = 0)]
    from: usize,

    /// Number of ids in the job range
    #[arg(long, default_value_t = 1000)]
    count: usize,

    /// Cache weight budget; each processed id costs one unit of weight
    #[arg(long, default_value_t = 100)]
    max_weight: usize,
}

fn main() {
    let args = Args::parse();

    let cache: Arc<LookAheadCache<usize, usize, String, RangeJob>> =
        Arc::new(LookAheadCache::new(args.max_weight));

    let worker_started = Arc::new(Ack::new());
    let handles: Vec<_> = (0..args.workers)
        .map(|worker_id| {
            let cache = Arc::clone(&cache);
            let worker_started = Arc::clone(&worker_started);
            thread::spawn(move || worker(worker_id, &cache, &worker_started))
        })
        .collect();

    cache.submit_job(RangeJob::new(args.from, args.count));
    worker_started.wait();

    eprintln!(
        "main: {} workers draining [{}, {})  against a budget of {}",
        args.workers,
        args.from,
        args.from + args.count,
        args.max_weight
    );

    eprintln!("main: sending termination");
    cache.terminate(true);

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let (keys, weight) = cache.dump_keys();
    eprintln!("main: {} elements cached, total weight {}", keys.len(), weight);
}

fn worker(worker_id: usize, cache: &LookAheadCache<usize, usize, String, RangeJob>, worker_started: &Ack) {
    loop {
        let id = match cache.pop() {
            Ok(id) => id,
            Err(_terminated) => {
                eprintln!("worker {worker_id}: terminates");
                return;
            }
        };
        let value = format!("data with value {id}");
        cache.push(id, 1, value);
        worker_started.ack();
    }
}
