//! Repeating tick scheduling.

use std::time::{Duration, Instant};

/// Returned by a tick callback to keep or drop its registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

pub type TickCallback = Box<dyn FnMut(Instant) -> TickControl>;

/// Handle to a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

pub trait Scheduler {
    /// Fire `callback` every `period` until it returns [`TickControl::Stop`]
    /// or is cancelled. The first tick fires on the next run.
    fn schedule_repeating(&mut self, period: Duration, callback: TickCallback) -> TickHandle;

    /// Returns `false` if the handle was not (or no longer) scheduled.
    fn cancel(&mut self, handle: TickHandle) -> bool;

    fn is_scheduled(&self, handle: TickHandle) -> bool;
}

struct Entry {
    handle: TickHandle,
    period: Duration,
    next_due: Option<Instant>,
    callback: TickCallback,
}

/// Single-threaded scheduler driven by the host loop through [`run_due`].
///
/// Missed ticks are not replayed: after a late run the next tick is one
/// period after that run.
///
/// [`run_due`]: IntervalScheduler::run_due
#[derive(Default)]
pub struct IntervalScheduler {
    next_id: u64,
    entries: Vec<Entry>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every callback due at `now`. Returns the number fired.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        self.entries.retain_mut(|entry| {
            if entry.next_due.is_some_and(|due| due > now) {
                return true;
            }
            fired += 1;
            match (entry.callback)(now) {
                TickControl::Continue => {
                    entry.next_due = Some(now + entry.period);
                    true
                }
                TickControl::Stop => {
                    tracing::trace!(handle = entry.handle.0, "tick callback finished");
                    false
                }
            }
        });
        fired
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Earliest pending deadline. `None` with no entries; entries that have
    /// never fired are due immediately and report `now`.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.entries.iter().map(|e| e.next_due.unwrap_or(now)).min()
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule_repeating(&mut self, period: Duration, callback: TickCallback) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            period,
            next_due: None,
            callback,
        });
        handle
    }

    fn cancel(&mut self, handle: TickHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        before != self.entries.len()
    }

    fn is_scheduled(&self, handle: TickHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }
}
