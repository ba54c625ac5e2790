// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Travel direction and wrap-around index arithmetic.

use core::fmt;

/// The direction of one navigation step.
///
/// A direction is purely a control parameter: it selects the sign of the
/// index step and the sign of every travel-proportional motion value in the
/// choreography (exit translation, exit rotation, entrance offset). It is
/// never persisted.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Step `+1` through the deck.
    Forward,
    /// Step `-1` through the deck.
    Backward,
}

impl Direction {
    /// Returns the signed index step (`+1` or `-1`).
    #[inline]
    #[must_use]
    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// Returns the sign as a motion multiplier (`+1.0` or `-1.0`).
    #[inline]
    #[must_use]
    pub const fn signum(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Computes the index reached by one step from `index` in a deck of
    /// `len` slides, wrapping at both ends.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or `index >= len`.
    #[must_use]
    pub const fn advance(self, index: usize, len: usize) -> usize {
        assert!(len > 0, "deck must contain at least one slide");
        assert!(index < len, "index out of range");
        match self {
            Self::Forward => (index + 1) % len,
            Self::Backward => (index + len - 1) % len,
        }
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "Forward"),
            Self::Backward => write!(f, "Backward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_wraps_at_end() {
        assert_eq!(Direction::Forward.advance(0, 5), 1);
        assert_eq!(Direction::Forward.advance(4, 5), 0);
    }

    #[test]
    fn backward_wraps_at_start() {
        assert_eq!(Direction::Backward.advance(4, 5), 3);
        assert_eq!(Direction::Backward.advance(0, 5), 4);
    }

    #[test]
    fn single_slide_steps_to_itself() {
        assert_eq!(Direction::Forward.advance(0, 1), 0);
        assert_eq!(Direction::Backward.advance(0, 1), 0);
    }

    #[test]
    fn repeated_forward_steps_are_modular() {
        // k forward steps from i land on (i + k) mod n.
        let n = 7;
        let mut index = 3;
        for _ in 0..10 {
            index = Direction::Forward.advance(index, n);
        }
        assert_eq!(index, (3 + 10) % n);
    }

    #[test]
    fn opposite_round_trips() {
        let i = Direction::Forward.advance(2, 5);
        assert_eq!(Direction::Backward.advance(i, 5), 2);
        assert_eq!(Direction::Forward.opposite().opposite(), Direction::Forward);
    }
}
