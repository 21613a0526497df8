//! Cooperative timer queue on a virtual clock
//!
//! Everything that happens "later" in a session (the next step, the end of
//! the run, the ghost relaxing its face) is a [`Timer`] queued here. The
//! host advances the clock; due timers come out one at a time in due order,
//! ties broken by scheduling order, so a dispatch always runs to completion
//! before the next one starts.
//!
//! Each timer is stamped with the session generation it was scheduled in.
//! [`Scheduler::reset`] bumps the generation and drops the queue, and any
//! timer from an older generation that still surfaces is discarded.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Deferred actions the game loop knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Advance the board one step
    Tick,
    /// End the run after a collision
    Finish,
    /// Return the ghost's face to neutral
    ExpressionRevert,
    /// Let the ghost pull another face
    ExpressionRelease,
}

/// Handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Entry {
    due: f64,
    seq: u64,
    generation: u64,
    timer: Timer,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap yields the earliest timer first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual-time timer queue
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    /// Seconds since the scheduler was created
    now: f64,
    generation: u64,
    next_seq: u64,
    queue: BinaryHeap<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Session generation new timers are stamped with
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Queue a timer `delay` seconds from now
    pub fn schedule(&mut self, delay: f64, timer: Timer) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due: self.now + delay.max(0.0),
            seq,
            generation: self.generation,
            timer,
        });
        TimerHandle(seq)
    }

    /// Drop a pending timer; false if it already fired or was cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|e| e.seq != handle.0);
        self.queue.len() != before
    }

    /// Start a new generation, invalidating everything queued so far
    pub fn reset(&mut self) {
        self.generation += 1;
        self.queue.clear();
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of live timers of one kind
    pub fn pending_of(&self, timer: Timer) -> usize {
        self.queue.iter().filter(|e| e.timer == timer).count()
    }

    /// Seconds until the next timer fires
    pub fn next_due_in(&self) -> Option<f64> {
        self.queue.peek().map(|e| (e.due - self.now).max(0.0))
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time
    pub fn pop_due(&mut self, until: f64) -> Option<Timer> {
        while let Some(entry) = self.queue.peek() {
            if entry.due > until {
                return None;
            }
            let Some(entry) = self.queue.pop() else {
                return None;
            };
            if entry.generation != self.generation {
                log::trace!(
                    "Discarding stale {:?} from generation {}",
                    entry.timer,
                    entry.generation
                );
                continue;
            }
            self.now = self.now.max(entry.due);
            return Some(entry.timer);
        }
        None
    }

    /// Move the clock to `until` once nothing more is due
    pub fn settle(&mut self, until: f64) {
        self.now = self.now.max(until);
    }
}
