// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic pointer input: identifiers, device kinds, button masks, and events.
//!
//! These types carry just enough information for gesture recognizers to
//! disambiguate contacts. Hosts convert their native events (DOM pointer
//! events, `winit` touches, `ui-events`, ...) into [`PointerEvent`] before
//! handing them over.

use kurbo::Point;

/// Identifier of a physical contact, stable from press to release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u64);

/// Category of device that produced a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    /// A mouse or trackpad cursor.
    #[default]
    Mouse,
    /// A finger on a touch surface.
    Touch,
    /// A stylus.
    Pen,
}

bitflags::bitflags! {
    /// Buttons held while a pointer event was produced.
    ///
    /// Bit positions follow the DOM `buttons` convention so hosts can pass
    /// the raw mask through [`PointerButtons::from_bits_truncate`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PointerButtons: u8 {
        /// Primary button (usually left).
        const PRIMARY   = 0b0000_0001;
        /// Secondary button (usually right).
        const SECONDARY = 0b0000_0010;
        /// Auxiliary button (usually the wheel button).
        const AUXILIARY = 0b0000_0100;
        /// Back button.
        const BACK      = 0b0000_1000;
        /// Forward button.
        const FORWARD   = 0b0001_0000;
    }
}

/// A pointer event as seen by a recognizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Contact identifier.
    pub pointer_id: PointerId,
    /// Position in viewport (client) coordinates.
    pub position: Point,
    /// Device category.
    pub kind: PointerKind,
    /// Buttons held; only meaningful for [`PointerKind::Mouse`].
    pub buttons: PointerButtons,
}

impl PointerEvent {
    /// Creates a touch event for `pointer_id` at `position`.
    #[must_use]
    pub fn touch(pointer_id: u64, position: impl Into<Point>) -> Self {
        Self {
            pointer_id: PointerId(pointer_id),
            position: position.into(),
            kind: PointerKind::Touch,
            buttons: PointerButtons::empty(),
        }
    }

    /// Creates a mouse event holding `buttons`.
    #[must_use]
    pub fn mouse(pointer_id: u64, position: impl Into<Point>, buttons: PointerButtons) -> Self {
        Self {
            pointer_id: PointerId(pointer_id),
            position: position.into(),
            kind: PointerKind::Mouse,
            buttons,
        }
    }

    /// Returns the same event moved to `position`.
    #[must_use]
    pub fn at(self, position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            ..self
        }
    }

    /// Returns `true` if this is a mouse event with the primary button held.
    ///
    /// Touch and pen contacts always count as primary presses.
    #[must_use]
    pub fn is_primary_press(&self) -> bool {
        match self.kind {
            PointerKind::Mouse => self.buttons.contains(PointerButtons::PRIMARY),
            PointerKind::Touch | PointerKind::Pen => true,
        }
    }
}
