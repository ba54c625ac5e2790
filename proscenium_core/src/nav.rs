// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation state machine.
//!
//! [`Navigator`] owns the current slide index and the single-in-flight
//! transition lock. It is a two-state machine:
//!
//! ```text
//!          advance() -> Some(step)
//!   Idle ──────────────────────────► Transitioning
//!    ▲                                    │
//!    └────────────── settle() ────────────┘
//! ```
//!
//! While `Transitioning`, further [`advance`](Navigator::advance) calls are
//! dropped, never queued. That is the whole backpressure policy: the system
//! carries no buffer of navigation intent.
//! The lock is cooperative and advisory; everything runs on one logical
//! event queue, and the unlock is driven exclusively by the settlement
//! event the driver delivers after a program's
//! [`settled_after`](crate::choreography::TransitionProgram::settled_after)
//! window elapses.

use crate::direction::Direction;

/// The navigator's lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No transition in flight; navigation intents are accepted.
    Idle,
    /// A transition is in flight; navigation intents are dropped.
    Transitioning,
}

/// One accepted navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Index navigated away from.
    pub from: usize,
    /// Index navigated to.
    pub to: usize,
    /// Travel direction.
    pub direction: Direction,
}

/// Owns the current index and the transition lock.
///
/// The navigator holds only ordinals (never view handles), so it can never
/// observe a stale handle across view reflows.
#[derive(Debug)]
pub struct Navigator {
    current: usize,
    len: usize,
    phase: Phase,
}

impl Navigator {
    /// Creates a navigator over `len` slides, starting at index 0, idle.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        assert!(len > 0, "navigator requires at least one slide");
        Self {
            current: 0,
            len,
            phase: Phase::Idle,
        }
    }

    /// Attempts one navigation step.
    ///
    /// Returns `None` without touching any state while a transition is in
    /// flight (the busy-rejection no-op). Otherwise acquires the lock,
    /// moves the index with wrap-around, and returns the step for the
    /// choreographer.
    pub fn advance(&mut self, direction: Direction) -> Option<Step> {
        if self.phase == Phase::Transitioning {
            return None;
        }
        self.phase = Phase::Transitioning;
        let from = self.current;
        let to = direction.advance(from, self.len);
        self.current = to;
        Some(Step {
            from,
            to,
            direction,
        })
    }

    /// Convenience for [`advance`](Self::advance)`(Direction::Forward)`.
    pub fn next(&mut self) -> Option<Step> {
        self.advance(Direction::Forward)
    }

    /// Convenience for [`advance`](Self::advance)`(Direction::Backward)`.
    pub fn previous(&mut self) -> Option<Step> {
        self.advance(Direction::Backward)
    }

    /// Releases the transition lock.
    ///
    /// Idempotent: settling an idle navigator is a no-op. Besides the
    /// normal settlement callback, this is the recovery path when the
    /// external animator fails mid-program: the driver calls it from the
    /// failure branch (or a watchdog timeout) so the carousel never wedges.
    pub fn settle(&mut self) {
        self.phase = Phase::Idle;
    }

    /// The current slide index.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// The number of slides.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: construction rejects zero slides.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_at_zero() {
        let nav = Navigator::new(5);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.phase(), Phase::Idle);
    }

    #[test]
    fn advance_acquires_lock_and_moves_index() {
        let mut nav = Navigator::new(5);
        let step = nav.next().unwrap();
        assert_eq!(
            step,
            Step {
                from: 0,
                to: 1,
                direction: Direction::Forward
            }
        );
        assert!(nav.is_transitioning());
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn busy_rejection_changes_nothing() {
        let mut nav = Navigator::new(5);
        let _ = nav.next().unwrap();
        // Any number of intents while transitioning is dropped.
        for _ in 0..4 {
            assert!(nav.next().is_none());
            assert!(nav.previous().is_none());
        }
        assert_eq!(nav.current(), 1);
        assert!(nav.is_transitioning());
    }

    #[test]
    fn settle_releases_lock() {
        let mut nav = Navigator::new(5);
        let _ = nav.next().unwrap();
        nav.settle();
        assert_eq!(nav.phase(), Phase::Idle);
        assert!(nav.next().is_some());
    }

    #[test]
    fn settle_is_idempotent() {
        let mut nav = Navigator::new(2);
        nav.settle();
        nav.settle();
        assert_eq!(nav.phase(), Phase::Idle);
    }

    #[test]
    fn three_forward_then_one_backward() {
        let mut nav = Navigator::new(5);
        for _ in 0..3 {
            let _ = nav.next().unwrap();
            nav.settle();
        }
        assert_eq!(nav.current(), 3);
        let _ = nav.previous().unwrap();
        nav.settle();
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn forward_then_backward_returns_to_origin() {
        let mut nav = Navigator::new(4);
        let _ = nav.next().unwrap();
        nav.settle();
        let _ = nav.previous().unwrap();
        nav.settle();
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn single_slide_self_steps() {
        let mut nav = Navigator::new(1);
        let step = nav.next().unwrap();
        assert_eq!(step.from, 0);
        assert_eq!(step.to, 0);
        assert!(nav.is_transitioning());
        nav.settle();
        assert!(nav.next().is_some(), "lock must release for n = 1");
    }
}
