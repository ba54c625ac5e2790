// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide identity and reveal-group model.

use core::fmt;

/// A handle to a slide in a [`Deck`](crate::deck::Deck).
///
/// Slides are created once at construction and never added, removed, or
/// reordered, so the handle is a plain ordinal with no generation counter.
/// Everything above the deck (the navigator in particular) holds ordinals
/// rather than view handles; the backing visual surfaces live entirely on
/// the [`Stage`](crate::backend::Stage) side of the seam.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideId(pub u32);

impl SlideId {
    /// Returns the ordinal position as a usize index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlideId({})", self.0)
    }
}

/// A named cluster of text elements inside a slide, animated together
/// during entrance.
///
/// Each group has a resting vertical displacement (in em units) that the
/// reveal sub-program animates back to zero. [`Tags`](Self::Tags) is the one
/// group that reveals through opacity instead of position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealGroup {
    /// The slide heading.
    Heading,
    /// The primary link.
    Link,
    /// The secondary link.
    LinkAlt,
    /// The numeric label.
    Number,
    /// The descriptive paragraph.
    Paragraph,
    /// The tag collection.
    Tags,
}

impl RevealGroup {
    /// Every reveal group, in reveal order.
    pub const ALL: [Self; 6] = [
        Self::Heading,
        Self::Link,
        Self::LinkAlt,
        Self::Number,
        Self::Paragraph,
        Self::Tags,
    ];

    /// The group's resting vertical displacement in em units.
    ///
    /// Zero for [`Tags`](Self::Tags), which does not move.
    #[must_use]
    pub const fn rest_offset_em(self) -> f32 {
        match self {
            Self::Heading | Self::Link | Self::LinkAlt => 1.0,
            Self::Number => 1.2,
            Self::Paragraph => 2.5,
            Self::Tags => 0.0,
        }
    }

    /// Whether this group reveals via opacity rather than position.
    #[must_use]
    pub const fn reveals_by_opacity(self) -> bool {
        matches!(self, Self::Tags)
    }
}
