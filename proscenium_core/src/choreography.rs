// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition choreography: descriptor programs for one navigation step.
//!
//! The choreographer is a scheduler of descriptors, not an animation engine.
//! For one navigation step it produces a [`TransitionProgram`]: a
//! deterministic, time-ordered list of [`Track`]s against the outgoing
//! slide, the incoming slide, the incoming slide's inner content, and the
//! incoming slide's reveal groups. An external
//! [`Animator`](crate::backend::Animator) interpolates them; the core only
//! decides *what* moves, *where* to, and *when*.
//!
//! # Program shape
//!
//! Offsets are measured from a shared zero point `t0`:
//!
//! ```text
//! t0                      exit: outgoing shrinks, translates against
//!                         travel, rotates with travel, fades out
//! t0 + entrance stagger   entrance: incoming rises from its off-position;
//!                         inner content settles from an enlarged scale
//! t0 + reveal offset      text reveal: two staggered position cascades
//!                         plus the tag opacity fade
//! primary timeline end    exit/entrance/inner all complete
//! settlement              per [`SettlePolicy`]; the navigation lock
//!                         releases here
//! ```
//!
//! The reveal cascades may still be in motion at settlement under
//! [`SettlePolicy::TimelineEnd`]; that matches the simplest upstream
//! behavior and is why [`SettlePolicy::Cooldown`] is the default.

use alloc::vec::Vec;

use crate::direction::Direction;
use crate::slide::{RevealGroup, SlideId};
use crate::time::Duration;

/// Declarative easing curve names.
///
/// The core never evaluates these; they are part of the contract handed to
/// the external animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Gentle deceleration.
    Power1Out,
    /// Symmetric ease-in-out, the base transition curve.
    Power2InOut,
    /// Strong deceleration used by the text reveal cascades.
    QuartOut,
}

/// A sparse set of animatable properties.
///
/// `None` channels are untouched by the track. Translation is expressed in
/// percent of the slide's own extent (`y_percent`) for slide motion and in
/// em units (`y_em`) for text reveal motion; `auto_alpha` combines opacity
/// with a visibility toggle at zero, while `opacity` fades alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    /// Uniform scale factor.
    pub scale: Option<f32>,
    /// Vertical translation in percent of the target's extent.
    pub y_percent: Option<f32>,
    /// Rotation in degrees.
    pub rotation: Option<f32>,
    /// Opacity with visibility toggling at zero.
    pub auto_alpha: Option<f32>,
    /// Vertical translation in em units.
    pub y_em: Option<f32>,
    /// Plain opacity.
    pub opacity: Option<f32>,
}

impl Motion {
    /// A motion that touches no channels.
    pub const NONE: Self = Self {
        scale: None,
        y_percent: None,
        rotation: None,
        auto_alpha: None,
        y_em: None,
        opacity: None,
    };
}

/// What a track animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackTarget {
    /// The slide's primary visual surface.
    Slide(SlideId),
    /// The slide's inner content surface.
    Inner(SlideId),
    /// One reveal group within the slide.
    Group(SlideId, RevealGroup),
}

impl TrackTarget {
    /// The slide this target belongs to.
    #[must_use]
    pub const fn slide(self) -> SlideId {
        match self {
            Self::Slide(id) | Self::Inner(id) | Self::Group(id, _) => id,
        }
    }
}

/// One scheduled sub-animation.
///
/// Target, property sets, duration, delay, easing, and start offset
/// together are the full contract the core emits to the animator. `from`
/// carries the initial placement when the track needs one (the animator
/// snaps the target there before interpolating); `None` means "animate from
/// wherever the target currently rests".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// What to animate.
    pub target: TrackTarget,
    /// Initial placement, if the track sets one.
    pub from: Option<Motion>,
    /// Final property values.
    pub to: Motion,
    /// Offset of the track from the program's zero point.
    pub start: Duration,
    /// Additional delay after `start` before interpolation begins.
    pub delay: Duration,
    /// Interpolation duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl Track {
    /// The offset at which this track finishes, from the program's zero
    /// point.
    #[must_use]
    pub const fn end(&self) -> Duration {
        self.start
            .saturating_add(self.delay)
            .saturating_add(self.duration)
    }
}

/// Timing profile for one reveal cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTiming {
    /// Delay after the reveal sub-program's start.
    pub delay: Duration,
    /// Interpolation duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

/// When the navigation lock releases relative to the primary timeline.
///
/// The two observed upstream revisions disagree here, so the policy is
/// explicit configuration rather than a hardcoded choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlePolicy {
    /// Release the lock a fixed window after the primary timeline
    /// completes. The cooldown is a perceptual debounce on top of the hard
    /// mutual-exclusion lock: it keeps a rapid double-intent from starting
    /// a new transition the instant visuals finish.
    Cooldown(Duration),
    /// Release the lock exactly when the primary timeline completes.
    TimelineEnd,
}

/// Every constant the choreographer needs to build a program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSpec {
    /// Nominal duration of the exit/entrance/inner tracks.
    pub base_duration: Duration,
    /// Easing for the exit/entrance/inner tracks.
    pub base_easing: Easing,
    /// Stagger between exit start and entrance start.
    pub entrance_stagger: Duration,
    /// Offset of the text-reveal sub-program from the program start.
    pub reveal_offset: Duration,
    /// Startup delay before the one-shot intro reveal begins.
    pub intro_delay: Duration,
    /// Lock release policy.
    pub settle_policy: SettlePolicy,
    /// Final scale of the outgoing slide.
    pub exit_scale: f32,
    /// Outgoing translation magnitude, in percent, applied against travel.
    pub exit_y_percent: f32,
    /// Outgoing rotation magnitude in degrees, applied with travel.
    pub exit_rotation: f32,
    /// Initial scale of the incoming slide.
    pub entrance_scale: f32,
    /// Incoming off-position magnitude in percent, applied with travel.
    pub entrance_y_percent: f32,
    /// Initial scale of the incoming inner content (the parallax settle).
    pub inner_scale: f32,
    /// Timing for the first cascade (links and numeric label).
    pub cascade_links: RevealTiming,
    /// Timing for the second cascade (heading and paragraph).
    pub cascade_heading: RevealTiming,
    /// Timing for the tag opacity fade.
    pub tag_fade: RevealTiming,
}

impl TransitionSpec {
    /// The classic profile: the full-feature choreography with a cooldown
    /// unlock.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            base_duration: Duration(1100),
            base_easing: Easing::Power2InOut,
            entrance_stagger: Duration(100),
            reveal_offset: Duration(600),
            intro_delay: Duration(2750),
            settle_policy: SettlePolicy::Cooldown(Duration(1500)),
            exit_scale: 0.6,
            exit_y_percent: 90.0,
            exit_rotation: 20.0,
            entrance_scale: 0.8,
            entrance_y_percent: 100.0,
            inner_scale: 1.1,
            cascade_links: RevealTiming {
                delay: Duration(1500),
                duration: Duration(1200),
                easing: Easing::QuartOut,
            },
            cascade_heading: RevealTiming {
                delay: Duration(1700),
                duration: Duration(1000),
                easing: Easing::QuartOut,
            },
            tag_fade: RevealTiming {
                delay: Duration(1500),
                duration: Duration(1200),
                easing: Easing::Power1Out,
            },
        }
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::classic()
    }
}

/// The ordered visual program for one navigation step.
///
/// The driver marks `incoming` current at the program's zero point and
/// unmarks `outgoing` at settlement; in between both slides carry the mark
/// (the cross-fade overlap window).
#[derive(Clone, Debug)]
pub struct TransitionProgram {
    /// The slide being navigated away from.
    pub outgoing: SlideId,
    /// The slide being navigated to.
    pub incoming: SlideId,
    /// Travel direction.
    pub direction: Direction,
    /// Scheduled sub-animations, in start order.
    pub tracks: Vec<Track>,
    /// Offset from the program's zero point at which the navigation lock
    /// may release.
    pub settled_after: Duration,
}

impl TransitionProgram {
    /// Whether this is a self-transition that moves nothing.
    ///
    /// Produced when a single-slide deck navigates to itself; the lock
    /// still cycles, with immediate settlement.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.tracks.is_empty()
    }

    /// End offset of the primary timeline: the latest-finishing slide or
    /// inner track. Reveal-group tracks are excluded; the upstream unlock
    /// was always anchored to the slide motion, not the text cascade.
    #[must_use]
    pub fn primary_end(&self) -> Duration {
        self.tracks
            .iter()
            .filter(|t| !matches!(t.target, TrackTarget::Group(..)))
            .map(Track::end)
            .fold(Duration::ZERO, Duration::max)
    }

    /// End offset of the last-finishing track of any kind.
    #[must_use]
    pub fn last_end(&self) -> Duration {
        self.tracks
            .iter()
            .map(Track::end)
            .fold(Duration::ZERO, Duration::max)
    }
}

/// Builds the program for one navigation step.
///
/// `outgoing == incoming` (a single-slide deck stepping to itself) yields
/// the empty no-op program with zero settlement.
#[must_use]
pub fn transition(
    spec: &TransitionSpec,
    direction: Direction,
    outgoing: SlideId,
    incoming: SlideId,
) -> TransitionProgram {
    if outgoing == incoming {
        return TransitionProgram {
            outgoing,
            incoming,
            direction,
            tracks: Vec::new(),
            settled_after: Duration::ZERO,
        };
    }

    let sign = direction.signum();
    let mut tracks = Vec::with_capacity(3 + RevealGroup::ALL.len());

    // Exit: shrink, translate against travel, rotate with travel, fade out.
    tracks.push(Track {
        target: TrackTarget::Slide(outgoing),
        from: None,
        to: Motion {
            scale: Some(spec.exit_scale),
            y_percent: Some(-sign * spec.exit_y_percent),
            rotation: Some(sign * spec.exit_rotation),
            auto_alpha: Some(0.0),
            ..Motion::NONE
        },
        start: Duration::ZERO,
        delay: Duration::ZERO,
        duration: spec.base_duration,
        easing: spec.base_easing,
    });

    // Entrance: rise from the off-position to rest.
    tracks.push(Track {
        target: TrackTarget::Slide(incoming),
        from: Some(Motion {
            scale: Some(spec.entrance_scale),
            y_percent: Some(sign * spec.entrance_y_percent),
            rotation: Some(0.0),
            auto_alpha: Some(1.0),
            ..Motion::NONE
        }),
        to: Motion {
            scale: Some(1.0),
            y_percent: Some(0.0),
            ..Motion::NONE
        },
        start: spec.entrance_stagger,
        delay: Duration::ZERO,
        duration: spec.base_duration,
        easing: spec.base_easing,
    });

    // Inner parallax settle, concurrent with the entrance.
    tracks.push(Track {
        target: TrackTarget::Inner(incoming),
        from: Some(Motion {
            scale: Some(spec.inner_scale),
            ..Motion::NONE
        }),
        to: Motion {
            scale: Some(1.0),
            ..Motion::NONE
        },
        start: spec.entrance_stagger,
        delay: Duration::ZERO,
        duration: spec.base_duration,
        easing: spec.base_easing,
    });

    tracks.extend(reveal_tracks(spec, incoming, spec.reveal_offset));

    let mut program = TransitionProgram {
        outgoing,
        incoming,
        direction,
        tracks,
        settled_after: Duration::ZERO,
    };
    program.settled_after = match spec.settle_policy {
        SettlePolicy::Cooldown(cooldown) => program.primary_end().saturating_add(cooldown),
        SettlePolicy::TimelineEnd => program.primary_end(),
    };
    program
}

/// Builds the staggered text-reveal sub-program for one slide's reveal
/// groups, offset by `start` from the surrounding program's zero point.
///
/// Position groups snap to their resting displacement and cascade back to
/// zero in two waves; tags fade in from transparent on the first wave's
/// timing.
#[must_use]
pub fn reveal_tracks(spec: &TransitionSpec, slide: SlideId, start: Duration) -> Vec<Track> {
    RevealGroup::ALL
        .iter()
        .map(|&group| {
            let timing = match group {
                RevealGroup::Link | RevealGroup::LinkAlt | RevealGroup::Number => {
                    spec.cascade_links
                }
                RevealGroup::Heading | RevealGroup::Paragraph => spec.cascade_heading,
                RevealGroup::Tags => spec.tag_fade,
            };
            let (from, to) = if group.reveals_by_opacity() {
                (
                    Motion {
                        opacity: Some(0.0),
                        ..Motion::NONE
                    },
                    Motion {
                        opacity: Some(1.0),
                        ..Motion::NONE
                    },
                )
            } else {
                (
                    Motion {
                        y_em: Some(group.rest_offset_em()),
                        ..Motion::NONE
                    },
                    Motion {
                        y_em: Some(0.0),
                        ..Motion::NONE
                    },
                )
            };
            Track {
                target: TrackTarget::Group(slide, group),
                from: Some(from),
                to,
                start,
                delay: timing.delay,
                duration: timing.duration,
                easing: timing.easing,
            }
        })
        .collect()
}
