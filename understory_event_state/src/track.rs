// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking: per-contact start/current positions for up to two contacts.
//!
//! ## Usage
//!
//! 1) On a qualifying press, call [`PointerTracks::begin`] with the contact id and position.
//! 2) On each move, call [`PointerTracks::update`]; events for untracked contacts return `None`.
//! 3) Query [`PointerTrack::distance`] to apply a slop threshold before treating movement
//!    as intentional.
//! 4) On release, call [`PointerTracks::end`]. Releasing the primary while a secondary
//!    exists promotes the secondary instead of emptying the tracker.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_event_state::pointer::PointerId;
//! use understory_event_state::track::{PointerTracks, Release, Slot};
//!
//! let mut tracks = PointerTracks::new();
//! assert_eq!(tracks.begin(PointerId(1), Point::new(0.0, 0.0)), Some(Slot::Primary));
//! assert_eq!(tracks.begin(PointerId(2), Point::new(100.0, 0.0)), Some(Slot::Secondary));
//!
//! tracks.update(PointerId(2), Point::new(200.0, 0.0));
//! let (v0, v1) = tracks.span().unwrap();
//! assert_eq!(v0, Vec2::new(100.0, 0.0));
//! assert_eq!(v1, Vec2::new(200.0, 0.0));
//!
//! // The primary lifts; the secondary carries on as primary.
//! assert_eq!(tracks.end(PointerId(1)), Some(Release::Promoted));
//! assert_eq!(tracks.primary().unwrap().pointer_id, PointerId(2));
//! ```

use kurbo::{Point, Vec2};

use crate::pointer::PointerId;

/// Start and latest position of one contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerTrack {
    /// Contact identifier.
    pub pointer_id: PointerId,
    /// Position where the current measurement started.
    pub start: Point,
    /// Latest known position.
    pub current: Point,
}

impl PointerTrack {
    /// Starts tracking `pointer_id` at `position`.
    #[must_use]
    pub fn new(pointer_id: PointerId, position: Point) -> Self {
        Self {
            pointer_id,
            start: position,
            current: position,
        }
    }

    /// Records a new position, returning the movement since the last one.
    pub fn update(&mut self, position: Point) -> Vec2 {
        let delta = position - self.current;
        self.current = position;
        delta
    }

    /// Offset from the start position to the current one.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.current - self.start
    }

    /// Euclidean distance travelled from the start position.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.total_offset().hypot()
    }

    /// Returns `true` once the contact has travelled at least `threshold`.
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.distance() >= threshold
    }

    /// Restarts measurement from the current position.
    pub fn rebase(&mut self) {
        self.start = self.current;
    }
}

/// Which of the two tracking slots a contact occupies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The contact that opened the interaction.
    Primary,
    /// A second contact joining an interaction in progress.
    Secondary,
}

/// What happened to the tracker when a contact was released.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Release {
    /// The only remaining contact was released; the tracker is empty.
    Last,
    /// The secondary was released; the primary remains.
    Secondary,
    /// The primary was released and the secondary took its place.
    Promoted,
}

/// Two-slot contact tracker with primary promotion.
#[derive(Clone, Debug, Default)]
pub struct PointerTracks {
    primary: Option<PointerTrack>,
    secondary: Option<PointerTrack>,
}

impl PointerTracks {
    /// Creates an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            primary: None,
            secondary: None,
        }
    }

    /// Returns `true` when no contact is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    /// Number of tracked contacts (0, 1 or 2).
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.primary.is_some()) + usize::from(self.secondary.is_some())
    }

    /// The primary contact, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&PointerTrack> {
        self.primary.as_ref()
    }

    /// The secondary contact, if any.
    #[must_use]
    pub fn secondary(&self) -> Option<&PointerTrack> {
        self.secondary.as_ref()
    }

    /// The contact in `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&PointerTrack> {
        match slot {
            Slot::Primary => self.primary.as_ref(),
            Slot::Secondary => self.secondary.as_ref(),
        }
    }

    /// The slot occupied by `pointer_id`, if it is tracked.
    #[must_use]
    pub fn slot_of(&self, pointer_id: PointerId) -> Option<Slot> {
        if self.primary.is_some_and(|t| t.pointer_id == pointer_id) {
            Some(Slot::Primary)
        } else if self.secondary.is_some_and(|t| t.pointer_id == pointer_id) {
            Some(Slot::Secondary)
        } else {
            None
        }
    }

    /// Starts tracking a contact in the first free slot.
    ///
    /// Returns `None` if `pointer_id` is already tracked or both slots are taken.
    pub fn begin(&mut self, pointer_id: PointerId, position: Point) -> Option<Slot> {
        if self.slot_of(pointer_id).is_some() {
            return None;
        }
        let track = Some(PointerTrack::new(pointer_id, position));
        if self.primary.is_none() {
            self.primary = track;
            Some(Slot::Primary)
        } else if self.secondary.is_none() {
            self.secondary = track;
            Some(Slot::Secondary)
        } else {
            None
        }
    }

    /// Records a new position for `pointer_id`, returning its slot.
    ///
    /// Untracked contacts are ignored and yield `None`.
    pub fn update(&mut self, pointer_id: PointerId, position: Point) -> Option<Slot> {
        let slot = self.slot_of(pointer_id)?;
        let track = match slot {
            Slot::Primary => self.primary.as_mut(),
            Slot::Secondary => self.secondary.as_mut(),
        };
        if let Some(t) = track {
            t.update(position);
        }
        Some(slot)
    }

    /// Stops tracking `pointer_id`, promoting the secondary if the primary leaves.
    pub fn end(&mut self, pointer_id: PointerId) -> Option<Release> {
        match self.slot_of(pointer_id)? {
            Slot::Secondary => {
                self.secondary = None;
                Some(Release::Secondary)
            }
            Slot::Primary => match self.secondary.take() {
                Some(promoted) => {
                    self.primary = Some(promoted);
                    Some(Release::Promoted)
                }
                None => {
                    self.primary = None;
                    Some(Release::Last)
                }
            },
        }
    }

    /// Restarts measurement for every tracked contact.
    pub fn rebase(&mut self) {
        if let Some(t) = self.primary.as_mut() {
            t.rebase();
        }
        if let Some(t) = self.secondary.as_mut() {
            t.rebase();
        }
    }

    /// Restarts measurement for the primary contact only.
    pub fn rebase_primary(&mut self) {
        if let Some(t) = self.primary.as_mut() {
            t.rebase();
        }
    }

    /// Primary-to-secondary vectors at the start and now, `(V0, V1)`.
    ///
    /// Returns `None` unless two contacts are tracked.
    #[must_use]
    pub fn span(&self) -> Option<(Vec2, Vec2)> {
        let (p, s) = (self.primary?, self.secondary?);
        Some((s.start - p.start, s.current - p.current))
    }
}
