// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::Vec2;

use crate::error::GestureError;

/// Minimum travel, in pixels, before a contact is treated as a deliberate gesture.
pub const DEFAULT_THRESHOLD: f64 = 8.0;

/// Silence after the last wheel event before the wheel gesture is considered over.
pub const DEFAULT_WHEEL_END_DELAY: Duration = Duration::from_millis(200);

/// Scale change applied per normalized wheel step.
pub const WHEEL_ZOOM_STEP: f64 = 1.0 / 15.0;

bitflags::bitflags! {
    /// Which components of the transform gestures may change.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        /// One-pointer drags (and two-pointer drift) move the element.
        const TRANSLATE = 0b0000_0001;
        /// Pinches and the wheel change the scale.
        const SCALE     = 0b0000_0010;
        /// Two-pointer twists change the rotation.
        const ROTATE    = 0b0000_0100;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::TRANSLATE | Self::SCALE
    }
}

/// Direction a single-pointer gesture may start in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Mostly horizontal travel.
    X,
    /// Mostly vertical travel.
    Y,
}

impl Axis {
    /// Dominant direction of `offset`; ties count as horizontal.
    #[must_use]
    pub fn dominant(offset: Vec2) -> Self {
        if offset.y.abs() > offset.x.abs() {
            Self::Y
        } else {
            Self::X
        }
    }
}

/// Gesture configuration.
///
/// A [`GestureTransformer`](crate::GestureTransformer) snapshots its
/// configuration when a pointer gesture opens, so reconfiguring mid-gesture
/// only affects the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Enabled transform components.
    pub capabilities: Capabilities,
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Disambiguation threshold in pixels.
    pub threshold: f64,
    /// If set, a gesture whose first deliberate travel runs along the other
    /// axis is left to competing recognizers (a scroller, say).
    pub axis: Option<Axis>,
    /// Debounce delay that closes a burst of wheel events.
    pub wheel_end_delay: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureConfig {
    /// Translation and scaling enabled, scale limited to `[1, 4]`, 8px threshold.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capabilities: Capabilities::TRANSLATE.union(Capabilities::SCALE),
            min_scale: 1.0,
            max_scale: 4.0,
            threshold: DEFAULT_THRESHOLD,
            axis: None,
            wheel_end_delay: DEFAULT_WHEEL_END_DELAY,
        }
    }

    /// Replaces the enabled transform components.
    #[must_use]
    pub const fn with_capabilities(self, capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..self
        }
    }

    /// Replaces the scale limits.
    #[must_use]
    pub const fn with_scale_limits(self, min_scale: f64, max_scale: f64) -> Self {
        Self {
            min_scale,
            max_scale,
            ..self
        }
    }

    /// Replaces the disambiguation threshold.
    #[must_use]
    pub const fn with_threshold(self, threshold: f64) -> Self {
        Self { threshold, ..self }
    }

    /// Restricts which direction a gesture may start in.
    #[must_use]
    pub const fn with_axis(self, axis: Option<Axis>) -> Self {
        Self { axis, ..self }
    }

    /// Replaces the wheel debounce delay.
    #[must_use]
    pub const fn with_wheel_end_delay(self, wheel_end_delay: Duration) -> Self {
        Self {
            wheel_end_delay,
            ..self
        }
    }

    /// Checks the configuration, normalizing swapped scale limits.
    ///
    /// # Errors
    ///
    /// - [`GestureError::InvalidScaleLimits`] if either limit is not a finite,
    ///   positive number.
    /// - [`GestureError::InvalidThreshold`] if the threshold is negative or
    ///   not finite.
    pub fn validate(self) -> Result<Self, GestureError> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0) {
            return Err(GestureError::InvalidScaleLimits { min, max });
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(GestureError::InvalidThreshold(self.threshold));
        }
        let (min_scale, max_scale) = if min <= max { (min, max) } else { (max, min) };
        Ok(self.with_scale_limits(min_scale, max_scale))
    }

    /// Returns `true` if gestures may translate.
    #[must_use]
    pub fn translates(&self) -> bool {
        self.capabilities.contains(Capabilities::TRANSLATE)
    }

    /// Returns `true` if gestures may scale.
    #[must_use]
    pub fn scales(&self) -> bool {
        self.capabilities.contains(Capabilities::SCALE)
    }

    /// Returns `true` if gestures may rotate.
    #[must_use]
    pub fn rotates(&self) -> bool {
        self.capabilities.contains(Capabilities::ROTATE)
    }

    /// Returns `true` if a second pointer has anything to do.
    #[must_use]
    pub fn uses_second_pointer(&self) -> bool {
        self.capabilities
            .intersects(Capabilities::SCALE | Capabilities::ROTATE)
    }

    /// Returns `true` if a gesture whose travel so far is `offset` may claim its pointer.
    #[must_use]
    pub fn allows_start(&self, offset: Vec2) -> bool {
        self.axis.is_none_or(|axis| axis == Axis::dominant(offset))
    }

    /// Clamps `scale` into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}
