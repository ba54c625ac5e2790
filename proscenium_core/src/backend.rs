// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for view and animation integrations.
//!
//! The core treats everything visual as two opaque collaborators behind
//! traits:
//!
//! - **[`Stage`]** — owns the real view handles (panel elements, styling
//!   classes) and applies incremental current-mark changes. The core never
//!   holds a view handle; it hands the stage a [`StageChanges`] set and the
//!   deck to read from.
//!
//! - **[`Animator`]** — interpolates [`TransitionProgram`]s and
//!   [`IntroProgram`]s over real time. The core is purely a scheduler of
//!   descriptors; rendering, easing math, and layout belong to the
//!   animator.
//!
//! # Driver loop pseudocode
//!
//! A typical event-queue driver wires the pieces together like this:
//!
//! ```rust,ignore
//! fn on_intent(direction: Direction) {
//!     match show.navigate(direction, &mut tracer)? {
//!         NavOutcome::Started { settles_after } => {
//!             // Cooperative unlock: deliver the settlement callback
//!             // after the program's window elapses.
//!             event_queue.schedule(settles_after, || show.settle(&mut tracer));
//!         }
//!         NavOutcome::Rejected => {} // busy; intent dropped by design
//!     }
//! }
//! ```
//!
//! # Failure semantics
//!
//! [`Animator::play`] failures (a missing target handle, a dead surface)
//! are surfaced to the caller untouched; the core retries nothing. The
//! driver's failure branch should still call
//! [`Slideshow::settle`](crate::show::Slideshow::settle) (settlement is
//! idempotent) so a failed program cannot leave the lock held forever.

use crate::choreography::TransitionProgram;
use crate::deck::{Deck, StageChanges};
use crate::intro::IntroProgram;

/// Applies current-mark changes to the backing view.
pub trait Stage {
    /// Applies the given [`StageChanges`], reading any further state it
    /// needs from `deck`.
    fn apply(&mut self, deck: &Deck, changes: &StageChanges);
}

/// Executes choreography programs against the backing view.
pub trait Animator {
    /// The animator's failure type.
    type Error;

    /// Schedules and runs one transition program.
    ///
    /// # Errors
    ///
    /// Implementation-defined; surfaced untouched to the driver.
    fn play(&mut self, program: &TransitionProgram) -> Result<(), Self::Error>;

    /// Schedules and runs the one-shot intro reveal.
    ///
    /// # Errors
    ///
    /// Implementation-defined; surfaced untouched to the driver.
    fn play_intro(&mut self, intro: &IntroProgram) -> Result<(), Self::Error>;
}
