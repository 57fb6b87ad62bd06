//! Popup visibility state machine
//!
//! `Hidden -> Shown -> CoolingDown -> Hidden`. Hiding a shown popup arms a
//! one-shot cooldown timer on the [`TaskQueue`]; until that timer's message
//! comes back the controller ignores edits, so the keystroke that dismissed
//! the popup cannot immediately reopen it.
//!
//! Every arm bumps a generation number. A timer message from an older
//! generation is ignored, which makes re-arming cancel-and-replace.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::core::geometry::Point;
use crate::core::task_queue::{TaskQueue, UiMessage};

/// Dismissal cooldown used by the editor
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visibility {
    Hidden,
    Shown { anchor: Point },
    CoolingDown { generation: u64 },
}

#[derive(Debug)]
pub struct VisibilityGate {
    state: Visibility,
    cooldown: Duration,
    generation: u64,
}

impl VisibilityGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            state: Visibility::Hidden,
            cooldown,
            generation: 0,
        }
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, Visibility::Shown { .. })
    }

    pub fn is_cooling_down(&self) -> bool {
        matches!(self.state, Visibility::CoolingDown { .. })
    }

    pub fn anchor(&self) -> Option<Point> {
        match self.state {
            Visibility::Shown { anchor } => Some(anchor),
            _ => None,
        }
    }

    /// Show (or move) the popup. Refused while cooling down.
    pub fn show(&mut self, anchor: Point) -> bool {
        if self.is_cooling_down() {
            return false;
        }
        self.state = Visibility::Shown { anchor };
        true
    }

    /// Hide a shown popup and arm the cooldown. No-op in any other state.
    pub fn hide(&mut self, queue: &mut TaskQueue, now: Instant) -> bool {
        if !self.is_shown() {
            return false;
        }
        self.generation += 1;
        self.state = Visibility::CoolingDown {
            generation: self.generation,
        };
        queue.post_after(now, self.cooldown, UiMessage::CooldownElapsed(self.generation));
        trace!(generation = self.generation, "suggestion cooldown armed");
        true
    }

    /// Timer completion. Only the timer of the current generation unblocks.
    pub fn on_cooldown_elapsed(&mut self, generation: u64) -> bool {
        match self.state {
            Visibility::CoolingDown { generation: current } if current == generation => {
                self.state = Visibility::Hidden;
                true
            }
            _ => false,
        }
    }

    /// Drop straight to `Hidden`, invalidating any pending timer
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = Visibility::Hidden;
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Point {
        Point::new(3.0, 4.0)
    }

    #[test]
    fn test_initial_hidden() {
        let gate = VisibilityGate::default();
        assert_eq!(gate.state(), Visibility::Hidden);
        assert_eq!(gate.anchor(), None);
    }

    #[test]
    fn test_hide_arms_timer() {
        let mut gate = VisibilityGate::default();
        let mut queue = TaskQueue::new();
        let t0 = Instant::now();

        assert!(gate.show(anchor()));
        assert!(gate.hide(&mut queue, t0));
        assert!(gate.is_cooling_down());
        assert_eq!(queue.pending_delayed(), 1);

        assert!(queue.drain(t0 + Duration::from_millis(299)).is_empty());
        let messages = queue.drain(t0 + DEFAULT_COOLDOWN);
        assert_eq!(messages, vec![UiMessage::CooldownElapsed(1)]);
        assert!(gate.on_cooldown_elapsed(1));
        assert_eq!(gate.state(), Visibility::Hidden);
    }

    #[test]
    fn test_hide_is_idempotent() {
        let mut gate = VisibilityGate::default();
        let mut queue = TaskQueue::new();
        let now = Instant::now();

        assert!(!gate.hide(&mut queue, now));
        assert_eq!(gate.state(), Visibility::Hidden);

        gate.show(anchor());
        gate.hide(&mut queue, now);
        let state = gate.state();
        assert!(!gate.hide(&mut queue, now));
        assert_eq!(gate.state(), state);
        assert_eq!(queue.pending_delayed(), 1);
    }

    #[test]
    fn test_show_refused_while_cooling_down() {
        let mut gate = VisibilityGate::default();
        let mut queue = TaskQueue::new();
        gate.show(anchor());
        gate.hide(&mut queue, Instant::now());
        assert!(!gate.show(anchor()));
        assert!(gate.is_cooling_down());
    }

    #[test]
    fn test_stale_timer_ignored() {
        let mut gate = VisibilityGate::default();
        let mut queue = TaskQueue::new();
        let now = Instant::now();

        gate.show(anchor());
        gate.hide(&mut queue, now); // generation 1
        gate.reset();
        gate.show(anchor());
        gate.hide(&mut queue, now); // generation 3

        assert!(!gate.on_cooldown_elapsed(1));
        assert!(gate.is_cooling_down());
        assert!(gate.on_cooldown_elapsed(3));
        assert_eq!(gate.state(), Visibility::Hidden);
    }
}
