// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The deck: a fixed, ordered slide collection with current-mark tracking.
//!
//! The deck owns the one piece of shared view state the core mutates: which
//! slides carry the "current" styling mark. Mark mutations go through a
//! dirty channel (via [`understory_dirty`]; one channel, local-only, no
//! propagation) and are drained by [`Deck::evaluate`] into a
//! [`StageChanges`] set that a [`Stage`](crate::backend::Stage) backend
//! applies incrementally to the real view.
//!
//! During a transition both the outgoing and incoming slides are marked
//! current (the overlap window that makes a cross-fade possible instead of a
//! hard cut); at rest exactly one slide is marked.

use alloc::vec::Vec;
use core::fmt;

use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::slide::SlideId;

/// A slide's current-mark changed.
const CURRENT: Channel = Channel::new(0);

/// Construction failure for [`Deck`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckError {
    /// The deck would contain no slides. Index arithmetic is undefined for
    /// an empty deck, so construction refuses it outright.
    Empty,
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "a deck requires at least one slide"),
        }
    }
}

impl core::error::Error for DeckError {}

/// The set of mark changes produced by a single [`Deck::evaluate`] call.
///
/// Slot indices of slides whose current-mark flipped since the last
/// evaluate. Backends use these to toggle styling hooks without rescanning
/// the whole deck.
#[derive(Clone, Debug, Default)]
pub struct StageChanges {
    /// Slides newly marked current.
    pub marked: Vec<u32>,
    /// Slides no longer marked current.
    pub unmarked: Vec<u32>,
}

impl StageChanges {
    /// Clears both change lists.
    pub fn clear(&mut self) {
        self.marked.clear();
        self.unmarked.clear();
    }

    /// Whether no marks changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty() && self.unmarked.is_empty()
    }
}

/// Fixed ordered collection of slides with current-mark state.
#[derive(Debug)]
pub struct Deck {
    // Authoritative mark state, mutated by setters.
    current: Vec<bool>,
    // Mark state as of the last evaluate, used to report transitions.
    applied: Vec<bool>,
    dirty: DirtyTracker<u32>,
}

impl Deck {
    /// Creates a deck of `len` slides, none of them marked current.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if `len` is zero.
    pub fn new(len: usize) -> Result<Self, DeckError> {
        if len == 0 {
            return Err(DeckError::Empty);
        }
        let mut current = Vec::new();
        current.resize(len, false);
        let mut applied = Vec::new();
        applied.resize(len, false);
        Ok(Self {
            current,
            applied,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        })
    }

    /// Returns the number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Always `false`: construction rejects empty decks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Returns the handle for the slide at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "deck sizes are small; indices always fit in u32"
    )]
    pub fn slide(&self, index: usize) -> SlideId {
        assert!(index < self.len(), "slide index out of range");
        SlideId(index as u32)
    }

    /// Sets or clears the current-mark on a slide.
    ///
    /// Redundant writes (setting a mark that is already in the requested
    /// state) are accepted and produce no change at the next evaluate.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn set_current(&mut self, id: SlideId, current: bool) {
        let idx = id.index();
        assert!(idx < self.len(), "slide id out of range");
        if self.current[idx] != current {
            self.current[idx] = current;
            self.dirty.mark(id.0, CURRENT);
        }
    }

    /// Whether the slide is marked current right now (pending marks
    /// included, whether or not they have been evaluated yet).
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn is_current(&self, id: SlideId) -> bool {
        self.current[id.index()]
    }

    /// Number of slides currently marked.
    #[must_use]
    pub fn current_count(&self) -> usize {
        self.current.iter().filter(|&&c| c).count()
    }

    /// Drains pending mark changes and returns them.
    pub fn evaluate(&mut self) -> StageChanges {
        let mut changes = StageChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided
    /// buffer to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut StageChanges) {
        changes.clear();
        let dirty_marks: Vec<u32> = self.dirty.drain(CURRENT).deterministic().run().collect();
        for idx in dirty_marks {
            let new = self.current[idx as usize];
            if new != self.applied[idx as usize] {
                if new {
                    changes.marked.push(idx);
                } else {
                    changes.unmarked.push(idx);
                }
                self.applied[idx as usize] = new;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_deck_is_rejected() {
        assert_eq!(Deck::new(0).unwrap_err(), DeckError::Empty);
    }

    #[test]
    fn marks_drain_into_changes() {
        let mut deck = Deck::new(3).unwrap();
        deck.set_current(deck.slide(0), true);
        let changes = deck.evaluate();
        assert_eq!(changes.marked, &[0]);
        assert!(changes.unmarked.is_empty());
        assert_eq!(deck.current_count(), 1);
    }

    #[test]
    fn evaluate_is_incremental() {
        let mut deck = Deck::new(3).unwrap();
        deck.set_current(deck.slide(0), true);
        let _ = deck.evaluate();

        // Overlap window: both old and new marked, then old unmarked.
        deck.set_current(deck.slide(1), true);
        let changes = deck.evaluate();
        assert_eq!(changes.marked, &[1]);
        assert!(changes.unmarked.is_empty());
        assert_eq!(deck.current_count(), 2);

        deck.set_current(deck.slide(0), false);
        let changes = deck.evaluate();
        assert_eq!(changes.unmarked, &[0]);
        assert_eq!(deck.current_count(), 1);
    }

    #[test]
    fn redundant_writes_produce_no_changes() {
        let mut deck = Deck::new(2).unwrap();
        deck.set_current(deck.slide(0), true);
        let _ = deck.evaluate();

        deck.set_current(deck.slide(0), true);
        let changes = deck.evaluate();
        assert!(changes.is_empty(), "redundant mark must not re-report");
    }

    #[test]
    fn toggle_within_one_evaluate_cancels_out() {
        let mut deck = Deck::new(2).unwrap();
        deck.set_current(deck.slide(1), true);
        deck.set_current(deck.slide(1), false);
        let changes = deck.evaluate();
        assert!(changes.is_empty(), "mark and unmark before evaluate cancel");
    }
}
