// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors reported by configuration and lifecycle calls.
///
/// Input handling never fails: stale events are ignored and denied locks
/// abort the gesture silently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureError {
    /// [`attach`](crate::GestureTransformer::attach) was called while already attached.
    AlreadyAttached,
    /// Scale limits must be finite and positive.
    InvalidScaleLimits {
        /// Requested lower limit.
        min: f64,
        /// Requested upper limit.
        max: f64,
    },
    /// The disambiguation threshold must be finite and non-negative.
    InvalidThreshold(f64),
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAttached => write!(f, "gesture transformer is already attached"),
            Self::InvalidScaleLimits { min, max } => {
                write!(f, "invalid scale limits [{min}, {max}]")
            }
            Self::InvalidThreshold(threshold) => {
                write!(f, "invalid disambiguation threshold {threshold}")
            }
        }
    }
}

impl core::error::Error for GestureError {}
