// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input routing: external navigation intents to directions.
//!
//! Button presses map straight to a [`Direction`]. Wheel and pointer
//! gestures go through [`GestureRouter`], a small stateful recognizer: it
//! scales wheel deltas, ignores displacement below a tolerance, and fires
//! at most one direction per pointer gesture. Tolerance and wheel scaling
//! are pass-through configuration, not logic the core owns.
//!
//! Sign convention: downward motion (positive `y`) navigates backward, as
//! dragging the content down pulls the previous slide in, and upward
//! motion navigates forward. The default negative wheel speed inverts raw
//! wheel deltas so that a natural scroll-down also navigates forward.

use kurbo::{Point, Vec2};

use crate::direction::Direction;

/// A discrete navigation button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavButton {
    /// The "previous" control.
    Prev,
    /// The "next" control.
    Next,
}

impl NavButton {
    /// The direction this button requests.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Prev => Direction::Backward,
            Self::Next => Direction::Forward,
        }
    }
}

/// Gesture sensitivity configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverConfig {
    /// Minimum displacement (after scaling) before a gesture fires.
    pub tolerance: f64,
    /// Scale factor applied to raw wheel deltas. Negative values invert
    /// the wheel so scroll-down navigates forward.
    pub wheel_speed: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            tolerance: 10.0,
            wheel_speed: -1.0,
        }
    }
}

/// Maps wheel and pointer gestures to at most one direction each.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureRouter {
    config: ObserverConfig,
    origin: Option<Point>,
    fired: bool,
}

impl GestureRouter {
    /// Creates a router with the given sensitivity configuration.
    #[must_use]
    pub const fn new(config: ObserverConfig) -> Self {
        Self {
            config,
            origin: None,
            fired: false,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> ObserverConfig {
        self.config
    }

    /// Routes one wheel event. Returns a direction when the scaled
    /// vertical delta clears the tolerance.
    pub fn on_wheel(&mut self, delta: Vec2) -> Option<Direction> {
        let scaled = delta.y * self.config.wheel_speed;
        if scaled.abs() < self.config.tolerance {
            return None;
        }
        Some(if scaled > 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        })
    }

    /// Begins tracking a pointer gesture at `pos`.
    pub fn on_pointer_down(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.fired = false;
    }

    /// Routes one pointer move. Fires at most once per gesture, when the
    /// total vertical displacement from the press origin clears the
    /// tolerance.
    pub fn on_pointer_move(&mut self, pos: Point) -> Option<Direction> {
        let origin = self.origin?;
        if self.fired {
            return None;
        }
        let dy = (pos - origin).y;
        if dy.abs() < self.config.tolerance {
            return None;
        }
        self.fired = true;
        Some(if dy > 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        })
    }

    /// Ends the active pointer gesture.
    pub fn on_pointer_up(&mut self) {
        self.origin = None;
        self.fired = false;
    }

    /// Whether a pointer gesture is being tracked.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_directions() {
        assert_eq!(NavButton::Prev.direction(), Direction::Backward);
        assert_eq!(NavButton::Next.direction(), Direction::Forward);
    }

    #[test]
    fn wheel_below_tolerance_is_ignored() {
        let mut router = GestureRouter::new(ObserverConfig::default());
        assert_eq!(router.on_wheel(Vec2::new(0.0, 5.0)), None);
        assert_eq!(router.on_wheel(Vec2::new(0.0, -9.9)), None);
    }

    #[test]
    fn inverted_wheel_maps_scroll_down_to_forward() {
        // Default wheel_speed is -1: natural scroll-down (positive delta)
        // navigates forward.
        let mut router = GestureRouter::new(ObserverConfig::default());
        assert_eq!(
            router.on_wheel(Vec2::new(0.0, 40.0)),
            Some(Direction::Forward)
        );
        assert_eq!(
            router.on_wheel(Vec2::new(0.0, -40.0)),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn positive_wheel_speed_keeps_natural_mapping() {
        let mut router = GestureRouter::new(ObserverConfig {
            tolerance: 10.0,
            wheel_speed: 1.0,
        });
        assert_eq!(
            router.on_wheel(Vec2::new(0.0, 40.0)),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn pointer_gesture_fires_once_past_tolerance() {
        let mut router = GestureRouter::new(ObserverConfig::default());
        router.on_pointer_down(Point::new(100.0, 100.0));

        // Within tolerance: nothing.
        assert_eq!(router.on_pointer_move(Point::new(100.0, 105.0)), None);
        // Downward swipe past tolerance: backward, once.
        assert_eq!(
            router.on_pointer_move(Point::new(100.0, 140.0)),
            Some(Direction::Backward)
        );
        assert_eq!(router.on_pointer_move(Point::new(100.0, 200.0)), None);

        router.on_pointer_up();
        assert!(!router.is_tracking());
    }

    #[test]
    fn upward_swipe_navigates_forward() {
        let mut router = GestureRouter::new(ObserverConfig::default());
        router.on_pointer_down(Point::new(50.0, 300.0));
        assert_eq!(
            router.on_pointer_move(Point::new(50.0, 250.0)),
            Some(Direction::Forward)
        );
    }

    #[test]
    fn moves_without_a_press_are_ignored() {
        let mut router = GestureRouter::new(ObserverConfig::default());
        assert_eq!(router.on_pointer_move(Point::new(0.0, 500.0)), None);
    }
}
