// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform state and the pure math gestures apply to it.
//!
//! Everything here is a free function of its inputs so it can be checked
//! without a host: one-pointer panning, two-pointer pinch/rotate, zooming
//! about an anchor, and clamping.

use kurbo::{Affine, Point, Rect, Vec2};

use crate::config::GestureConfig;

/// Translation, uniform scale and rotation applied to the target element.
///
/// The element's local origin maps to `(x, y)` in the coordinate space of its
/// untransformed layout box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in radians.
    pub rotate: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No offset, unit scale, no rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 1.0, 0.0);

    /// Creates a transform from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, scale: f64, rotate: f64) -> Self {
        Self {
            x,
            y,
            scale,
            rotate,
        }
    }

    /// The offset as a vector.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the same transform with a different offset.
    #[must_use]
    pub fn with_translation(self, offset: Vec2) -> Self {
        Self {
            x: offset.x,
            y: offset.y,
            ..self
        }
    }

    /// Equivalent affine map: scale, then rotate, then translate.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation()) * Affine::rotate(self.rotate) * Affine::scale(self.scale)
    }
}

/// Clamps scale to the configured limits and the offset to `bounds`.
///
/// Rotation is forced to zero when rotating is disabled. Inverted or empty
/// bounds collapse to a single point instead of being rejected. The result
/// is a fixed point: clamping it again changes nothing.
#[must_use]
pub fn clamp(transform: Transform, config: &GestureConfig, bounds: Option<Rect>) -> Transform {
    let mut out = transform;
    out.scale = config.clamp_scale(transform.scale);
    if !config.rotates() {
        out.rotate = 0.0;
    }
    if let Some(b) = bounds {
        out.x = clamp_axis(transform.x, b.x0, b.x1);
        out.y = clamp_axis(transform.y, b.y0, b.y1);
    }
    out
}

/// `max` then `min`, so `lo > hi` yields `hi` rather than panicking like `f64::clamp`.
fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// One-pointer drag: shift the baseline by the pointer's travel.
#[must_use]
pub fn pan(baseline: Transform, travel: Vec2, config: &GestureConfig) -> Transform {
    if !config.translates() {
        return baseline;
    }
    baseline.with_translation(baseline.translation() + travel)
}

/// Two-pointer pinch/rotate from the primary-to-secondary vectors at the start
/// (`v0`) and now (`v1`).
///
/// - Scale multiplies the baseline by the ratio of *squared* lengths,
///   `|v1|² / |v0|²`. A zero-length `v0` leaves the scale alone.
/// - Rotation adds `atan2(v0.x, v0.y) - atan2(v1.x, v1.y)`.
/// - Translation adds `v1 - v0`, the change of the span vector itself.
#[must_use]
pub fn pinch(baseline: Transform, v0: Vec2, v1: Vec2, config: &GestureConfig) -> Transform {
    let mut out = baseline;
    if config.scales() {
        let start = v0.hypot2();
        if start > 0.0 {
            out.scale = baseline.scale * v1.hypot2() / start;
        }
    }
    if config.rotates() {
        out.rotate = baseline.rotate + (span_angle(v0) - span_angle(v1));
    }
    if config.translates() {
        out = out.with_translation(baseline.translation() + (v1 - v0));
    }
    out
}

/// `atan2(v.x, v.y)`: angle measured from the +y axis towards +x.
fn span_angle(v: Vec2) -> f64 {
    Vec2::new(v.y, v.x).atan2()
}

/// Rescales to `new_scale` keeping the content under `anchor` in place.
///
/// `anchor` is in the same space as the offset (the element's layout box).
/// A non-positive current scale cannot be inverted; only the scale changes then.
#[must_use]
pub fn zoom_about(transform: Transform, anchor: Point, new_scale: f64) -> Transform {
    let mut out = transform;
    out.scale = new_scale;
    if transform.scale <= 0.0 {
        return out;
    }
    let anchor = anchor.to_vec2();
    let local = (anchor - transform.translation()) / transform.scale;
    out.with_translation(anchor - local * new_scale)
}
