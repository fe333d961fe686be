//! The single error type the library exposes.
//!
//! Everything else that can "go wrong" is encoded as a boolean or an enum
//! return value (see [`crate::cache::engine::UpdateStatus`]); termination is
//! the one condition a caller must be able to catch and recover from, so it
//! gets a real `Result` instead of a sentinel.

use std::fmt;

/// Raised by [`crate::Slot::try_get`]/[`crate::Slot::wait_get`] — and
/// transitively by [`crate::LookAheadCache::pop`] — once the slot has been
/// terminated. Workers treat this as a clean shutdown signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminated;

impl fmt::Display for Terminated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot has been terminated")
    }
}

impl std::error::Error for Terminated {}
