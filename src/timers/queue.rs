//! Deterministic timer queue.
//!
//! Time only moves when the owner calls `pop_due`/`settle`, so tests drive
//! the clock by hand and the presentation drives it with real frame deltas.
//! Timers fire in deadline order; equal deadlines fire in schedule order.

use std::collections::BTreeMap;
use std::time::Duration;

use rustc_hash::FxHashMap;

/// Handle to a scheduled timer. Cancelling it is always safe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// A timer that has come due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    pub deadline: Duration,
    pub payload: T,
}

/// Pending timers keyed by `(deadline, sequence)`.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), T>,
    deadlines: FxHashMap<u64, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
            deadlines: FxHashMap::default(),
        }
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `after` from now.
    pub fn schedule(&mut self, after: Duration, payload: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;

        let deadline = self.now + after;
        self.pending.insert((deadline, seq), payload);
        self.deadlines.insert(seq, deadline);
        TimerHandle(seq)
    }

    /// Cancel a timer. Returns whether it was still pending.
    ///
    /// Cancelling a fired or already cancelled timer is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.pending.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    ///
    /// Call in a loop: a handler may schedule follow-up timers that also fall
    /// before `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<T>> {
        let (&(deadline, seq), _) = self.pending.iter().next()?;
        if deadline > until {
            return None;
        }
        let payload = self.pending.remove(&(deadline, seq))?;
        self.deadlines.remove(&seq);
        self.now = self.now.max(deadline);
        Some(Fired {
            handle: TimerHandle(seq),
            deadline,
            payload,
        })
    }

    /// Move the clock forward to `until` once every due timer was popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance by `elapsed` and return everything that fired, in order.
    ///
    /// Only for callers that never reschedule from a handler.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Fired<T>> {
        let until = self.now + elapsed;
        let mut fired = Vec::new();
        while let Some(f) = self.pop_due(until) {
            fired.push(f);
        }
        self.settle(until);
        fired
    }
}
