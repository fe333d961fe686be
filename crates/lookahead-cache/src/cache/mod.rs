//! The priority cache: an unsynchronized engine plus a synchronized
//! look-ahead orchestrator built on top of it.

pub mod engine;
pub mod lookahead;

pub use engine::{PriorityCacheEngine, UpdateStatus};
pub use lookahead::LookAheadCache;
