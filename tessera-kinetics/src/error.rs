//! Error types for scroll kinetics.
//!
//! Motion itself never fails. Errors only surface when a scroller is
//! configured with values the fling model cannot work with, or when the axis
//! state machine is asked to take a transition it does not allow.

use thiserror::Error;

use crate::axis::Phase;

/// Errors produced while configuring a scroller.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KineticsError {
    /// Screen density must be a positive, finite number.
    #[error("screen density must be positive and finite, got {0}")]
    InvalidDensity(f32),
    /// Friction must be a positive, finite number.
    #[error("fling friction must be positive and finite, got {0}")]
    InvalidFriction(f32),
    /// Scripted scroll durations must be positive.
    #[error("scroll duration must be positive, got {0}ms")]
    InvalidDuration(i32),
}

/// Rejected axis phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhaseError {
    /// The requested phase cannot follow the current one.
    #[error("illegal axis phase transition from {from:?} to {to:?}")]
    IllegalTransition {
        /// Phase the axis was in.
        from: Phase,
        /// Phase that was requested.
        to: Phase,
    },
}
