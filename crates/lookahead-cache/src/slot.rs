//! A scoped single-value channel for one-to-one thread hand-off.
//!
//! [`Slot<T>`] is the termination primitive the rest of the library is built
//! on: [`crate::LookAheadCache`] uses a `Slot<Job>` to hand a newly submitted
//! job to whichever worker asks for it next, and [`crate::Ack`] is a
//! `Slot<bool>` used purely for its termination-free rendezvous behavior.
//!
//! ## Thread safety
//!
//! One `Mutex` + one `Condvar` guard the whole state machine
//! (`{Empty, Set(T), Terminated}`). Waiters re-check the terminated flag
//! under the lock on every wake, which is the standard defense against
//! spurious wakeups.

use crate::error::Terminated;
use std::sync::{Condvar, Mutex};

struct Inner<T> {
    value: Option<T>,
    terminated: bool,
}

/// Single-value blocking handoff with an explicit terminated state.
pub struct Slot<T> {
    inner: Mutex<Inner<T>>,
    condvar: Condvar,
}

impl<T> Slot<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                value: None,
                terminated: false,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Creates a slot already holding `value`.
    pub fn new_with(value: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                value: Some(value),
                terminated: false,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Installs `value`, overwriting any previous unread value, and wakes one
    /// waiter. Never blocks and never fails — setting a value on a
    /// terminated slot is allowed; it simply won't be observed until
    /// termination is lifted.
    pub fn set(&self, value: T) {
        let mut inner = self.inner.lock().expect("Slot mutex poisoned");
        inner.value = Some(value);
        drop(inner);
        self.condvar.notify_one();
    }

    /// Non-blocking read. `Ok(true)` if a value was taken into `out`,
    /// `Ok(false)` if the slot was empty, `Err(Terminated)` if the slot has
    /// been terminated (checked before the emptiness check).
    pub fn try_get(&self, out: &mut T) -> Result<bool, Terminated> {
        let mut inner = self.inner.lock().expect("Slot mutex poisoned");
        if inner.terminated {
            return Err(Terminated);
        }
        match inner.value.take() {
            Some(value) => {
                *out = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Blocks until a value is available or the slot is terminated.
    pub fn wait_get(&self, out: &mut T) -> Result<(), Terminated> {
        let mut inner = self.inner.lock().expect("Slot mutex poisoned");
        if inner.terminated {
            return Err(Terminated);
        }
        while inner.value.is_none() {
            inner = self.condvar.wait(inner).expect("Slot condvar poisoned");
            if inner.terminated {
                return Err(Terminated);
            }
        }
        *out = inner.value.take().expect("value just confirmed present");
        Ok(())
    }

    /// Sets or clears the terminated flag and wakes every waiter.
    pub fn terminate(&self, value: bool) {
        let mut inner = self.inner.lock().expect("Slot mutex poisoned");
        inner.terminated = value;
        drop(inner);
        self.condvar.notify_all();
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}
