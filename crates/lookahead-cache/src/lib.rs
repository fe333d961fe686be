// lookahead-cache: blocking concurrency primitives and a speculative
// priority cache for pipelined worker pools.

pub mod ack;
pub mod bounded_queue;
pub mod cache;
pub mod error;
pub mod job;
pub mod queue;
pub mod slot;
pub mod weight;

pub use ack::Ack;
pub use bounded_queue::BoundedQueue;
pub use cache::{LookAheadCache, PriorityCacheEngine, UpdateStatus};
pub use error::Terminated;
pub use job::{Job, RangeJob};
pub use queue::Queue;
pub use slot::Slot;
pub use weight::Weight;
