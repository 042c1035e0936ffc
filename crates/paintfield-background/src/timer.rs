//! Millisecond timer queue for delayed and repeating spawns.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Work a timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    /// Ambient spawn at a random position.
    IdleSpawn,
    /// Follow-up drop of a click burst around the click point. The jitter is
    /// drawn when the timer fires.
    BurstSpawn { x: f32, y: f32 },
    /// One of the drops seeded on mount.
    SeedSpawn,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub task: Task,
    /// Epoch captured when the timer was scheduled.
    pub epoch: u64,
    pub due_ms: u64,
}

#[derive(Debug, Clone)]
struct Timer {
    due_ms: u64,
    seq: u64,
    period_ms: Option<u64>,
    task: Task,
    epoch: u64,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Timers ordered by due time, ties broken by scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Timer>>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once at `now_ms + delay_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, task: Task, epoch: u64) {
        self.push(now_ms.saturating_add(delay_ms), None, task, epoch);
    }

    /// Run `task` every `period_ms`, first at `now_ms + period_ms`.
    pub fn schedule_repeating(&mut self, now_ms: u64, period_ms: u64, task: Task, epoch: u64) {
        let period_ms = period_ms.max(1);
        self.push(now_ms.saturating_add(period_ms), Some(period_ms), task, epoch);
    }

    fn push(&mut self, due_ms: u64, period_ms: Option<u64>, task: Task, epoch: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Timer {
            due_ms,
            seq,
            period_ms,
            task,
            epoch,
        }));
    }

    /// Pop the earliest timer due at or before `now_ms`.
    ///
    /// Repeating timers are re-armed on the next period boundary after
    /// `now_ms`, so a long gap fires them once rather than catching up.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        if self.heap.peek().is_none_or(|Reverse(t)| t.due_ms > now_ms) {
            return None;
        }
        let Reverse(timer) = self.heap.pop()?;

        if let Some(period) = timer.period_ms {
            let missed = (now_ms - timer.due_ms) / period;
            let next_due = timer.due_ms + (missed + 1) * period;
            self.push(next_due, Some(period), timer.task, timer.epoch);
        }

        Some(Fired {
            task: timer.task,
            epoch: timer.epoch,
            due_ms: timer.due_ms,
        })
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(t)| t.due_ms)
    }

    /// Cancel everything. Safe to call on an empty queue.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
