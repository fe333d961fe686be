//! The numeric bound for the cache's weight/metric type.
//!
//! The original C++ template parameterizes on `METRIC_TYPE` with a single
//! `static_assert(std::is_unsigned<metric_type>::value, ...)`. Rust has no
//! direct equivalent of "any unsigned integer", so this trait captures the
//! operations the engine actually needs (comparison, zero, addition,
//! subtraction) and is blanket-implemented for the unsigned primitives via
//! `num_traits::Unsigned`.

use num_traits::Unsigned;
use std::ops::{Add, Sub};

/// A per-entry weight and the cache's total-weight budget share this bound.
pub trait Weight: Copy + Default + Ord + Add<Output = Self> + Sub<Output = Self> {
    /// The additive identity, used as the starting point for running totals.
    fn zero() -> Self {
        Self::default()
    }

    /// Subtraction that floors at zero instead of underflowing when `other`
    /// exceeds `self` (an entry's weight can exceed the total budget).
    fn saturating_sub(self, other: Self) -> Self {
        if self >= other {
            self - other
        } else {
            Self::zero()
        }
    }
}

impl<T> Weight for T where T: Copy + Default + Ord + Add<Output = T> + Sub<Output = T> + Unsigned {}
