//! UI task queue
//!
//! Every state change of the editor happens on the UI thread. Timers do not
//! call back into the editor; they post a [`UiMessage`] that the main loop
//! applies when it drains the queue.

use std::time::{Duration, Instant};

/// Messages delivered to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    /// A suggestion cooldown timer fired; carries the timer generation
    CooldownElapsed(u64),
}

#[derive(Debug)]
struct Delayed {
    due: Instant,
    message: UiMessage,
}

/// Serialized message queue with one-shot delayed delivery
#[derive(Debug, Default)]
pub struct TaskQueue {
    delayed: Vec<Delayed>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a message that becomes deliverable `delay` after `now`
    pub fn post_after(&mut self, now: Instant, delay: Duration, message: UiMessage) {
        self.delayed.push(Delayed {
            due: now + delay,
            message,
        });
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.delayed.iter().map(|d| d.due).min()
    }

    /// Number of delayed messages not yet delivered
    pub fn pending_delayed(&self) -> usize {
        self.delayed.len()
    }

    /// Take every message deliverable at `now`, in deadline order
    pub fn drain(&mut self, now: Instant) -> Vec<UiMessage> {
        let (mut due, pending): (Vec<Delayed>, Vec<Delayed>) =
            self.delayed.drain(..).partition(|d| d.due <= now);
        self.delayed = pending;
        due.sort_by_key(|d| d.due);
        due.into_iter().map(|d| d.message).collect()
    }
}
