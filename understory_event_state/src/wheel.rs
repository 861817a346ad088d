// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel input: raw delta formats and their normalization into unit steps.
//!
//! Platforms disagree on wheel units and on sign. Rather than branching on
//! quirks at every call site, hosts tag the raw value with the format it came
//! in, and [`WheelDelta::step`] folds every format into a signed unit step.
//!
//! ```
//! use understory_event_state::wheel::WheelDelta;
//!
//! // DOM `deltaY` is positive when scrolling down (zoom out).
//! assert_eq!(WheelDelta::Pixels(53.0).step(), -1);
//! // Legacy `wheelDelta` is positive when scrolling up (zoom in).
//! assert_eq!(WheelDelta::LegacyWheelDelta(120.0).step(), 1);
//! ```

use kurbo::Point;

/// Vertical wheel delta tagged with its source format.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WheelDelta {
    /// DOM `deltaY` with `deltaMode == DOM_DELTA_PIXEL`; positive scrolls down.
    Pixels(f64),
    /// DOM `deltaY` with `deltaMode == DOM_DELTA_LINE`; positive scrolls down.
    Lines(f64),
    /// DOM `deltaY` with `deltaMode == DOM_DELTA_PAGE`; positive scrolls down.
    Pages(f64),
    /// Legacy `mousewheel` `wheelDelta` (multiples of 120); positive scrolls up.
    LegacyWheelDelta(f64),
    /// Legacy `DOMMouseScroll` `detail` (lines); positive scrolls down.
    LegacyDetail(f64),
}

impl WheelDelta {
    /// Normalizes the delta into a unit step: `1` towards the user (scroll up,
    /// zoom in), `-1` away (scroll down, zoom out), `0` for no movement.
    ///
    /// Magnitude is discarded on purpose; fast wheels and precise trackpads
    /// both advance one step per event.
    #[must_use]
    pub fn step(self) -> i8 {
        let upward = match self {
            Self::Pixels(dy) | Self::Lines(dy) | Self::Pages(dy) | Self::LegacyDetail(dy) => -dy,
            Self::LegacyWheelDelta(delta) => delta,
        };
        if upward > 0.0 {
            1
        } else if upward < 0.0 {
            -1
        } else {
            // Zero and NaN.
            0
        }
    }
}

/// A wheel event as seen by a recognizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelEvent {
    /// Cursor position in viewport (client) coordinates.
    pub position: Point,
    /// Raw vertical delta.
    pub delta: WheelDelta,
}

impl WheelEvent {
    /// Creates a wheel event at `position`.
    #[must_use]
    pub fn new(position: impl Into<Point>, delta: WheelDelta) -> Self {
        Self {
            position: position.into(),
            delta,
        }
    }
}
