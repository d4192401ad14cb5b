//! Scheduler module - one-shot descent timers with cancellable handles
//!
//! The session arms one timer at a time with [`Scheduler::schedule`] and
//! re-arms it only after the previous tick has been processed, so descent is
//! paced by "interval after completion" rather than a fixed-rate clock.
//!
//! Two implementations are provided:
//!
//! - [`ManualScheduler`]: a virtual millisecond clock that only moves when
//!   [`ManualScheduler::advance`] is called. Used by tests and headless drivers.
//! - [`InstantScheduler`]: wall-clock timers for interactive front-ends.

use std::time::{Duration, Instant};

/// Identity of one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of one-shot timers.
pub trait Scheduler {
    /// Arm a timer that comes due after `delay_ms` milliseconds.
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle;

    /// Disarm a timer. It will never be returned by [`Scheduler::poll_due`].
    /// Cancelling an unknown or already-fired handle does nothing.
    fn cancel(&mut self, handle: TimerHandle);

    /// Remove and return the earliest timer that is due, if any.
    fn poll_due(&mut self) -> Option<TimerHandle>;
}

/// Deterministic scheduler driven by an explicit virtual clock
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<(u64, TimerHandle)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the virtual clock forward.
    pub fn advance(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Virtual time at which the earliest armed timer comes due.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|&(due, _)| due).min()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push((self.now_ms + u64::from(delay_ms), handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|&(_, h)| h != handle);
    }

    fn poll_due(&mut self) -> Option<TimerHandle> {
        take_earliest_due(&mut self.pending, self.now_ms)
    }
}

/// Wall-clock scheduler for interactive play
#[derive(Debug, Clone, Default)]
pub struct InstantScheduler {
    next_id: u64,
    pending: Vec<(Instant, TimerHandle)>,
}

impl InstantScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left until the earliest armed timer is due (zero if overdue).
    ///
    /// Front-ends use this as the input poll timeout.
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = Instant::now();
        self.pending
            .iter()
            .map(|&(due, _)| due.saturating_duration_since(now))
            .min()
    }
}

impl Scheduler for InstantScheduler {
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let due = Instant::now() + Duration::from_millis(u64::from(delay_ms));
        self.pending.push((due, handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|&(_, h)| h != handle);
    }

    fn poll_due(&mut self) -> Option<TimerHandle> {
        take_earliest_due(&mut self.pending, Instant::now())
    }
}

fn take_earliest_due<T: Ord + Copy>(
    pending: &mut Vec<(T, TimerHandle)>,
    now: T,
) -> Option<TimerHandle> {
    let idx = pending
        .iter()
        .enumerate()
        .filter(|&(_, &(due, _))| due <= now)
        .min_by_key(|&(_, &(due, _))| due)
        .map(|(i, _)| i)?;
    Some(pending.remove(idx).1)
}
