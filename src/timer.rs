//! One-shot timers keyed by a generation counter.
//!
//! Arming a timer bumps its generation and replaces whatever was pending, so
//! a newer schedule always supersedes an older one. Nothing runs on its own:
//! the owner polls with the current time and receives the payload once the
//! deadline has passed.

use std::time::{Duration, Instant};

/// Identifies one arming of a [`Timer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
}

impl TimerHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A fired timer: the deadline it was scheduled for and its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    pub deadline: Instant,
    pub payload: T,
}

#[derive(Debug)]
struct Pending<T> {
    generation: u64,
    deadline: Instant,
    payload: T,
}

/// Single-slot cancellable timer. At most one instance is live.
#[derive(Debug)]
pub struct Timer<T> {
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Default for Timer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timer<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }

    /// Schedule `payload` for `now + delay`, invalidating any pending instance.
    pub fn arm(&mut self, now: Instant, delay: Duration, payload: T) -> TimerHandle {
        self.generation += 1;
        self.pending = Some(Pending {
            generation: self.generation,
            deadline: now + delay,
            payload,
        });
        TimerHandle {
            generation: self.generation,
        }
    }

    /// Drop the pending instance, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Fire the pending instance if its deadline is at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Fired<T>> {
        let due = self.pending.as_ref().is_some_and(|p| p.deadline <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|p| Fired {
            handle: TimerHandle {
                generation: p.generation,
            },
            deadline: p.deadline,
            payload: p.payload,
        })
    }
}
