//! Scroll kinetics for tessera.
//!
//! This crate turns the release velocity of a drag gesture into a time-based
//! trajectory: a fling that decelerates along a precomputed spline, an
//! optional overscroll past the content edge, and a spring-back into bounds.
//! It does no drawing and receives no input. A scroll container calls into a
//! scroller once per frame and applies the returned offsets.
//!
//! # Scrollers
//!
//! - [`OverScroller`] runs each axis through its own phase chain (fling,
//!   bounce, spring-back) and supports scripted scrolls and flywheel
//!   continuation.
//! - [`Scroller`] is the reduced variant: one timeline for both axes, flings
//!   stop dead at the bounds.
//!
//! ```
//! use tessera_kinetics::{OverScroller, ScrollConfig, clock::ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut scroller = OverScroller::with_config(ScrollConfig::default(), clock.clone()).unwrap();
//!
//! // Content was dragged 40px above its top edge and released.
//! assert!(scroller.spring_back(0, -40, 0, 0, 0, 1_000));
//! while scroller.compute_scroll_offset() {
//!     clock.advance(16);
//! }
//! assert_eq!(scroller.curr_y(), 0);
//! ```
//!
//! # Time
//!
//! Every phase is keyed to elapsed milliseconds read from a [`Clock`], so a
//! late frame lands further along the curve instead of slowing the motion
//! down. [`SystemClock`] is the default; [`ManualClock`] makes motion fully
//! deterministic.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod axis;
pub mod clock;
pub mod config;
pub mod error;
pub mod fling;
pub mod interpolator;
pub mod over_scroller;
pub mod scroller;
pub mod spline;

pub use crate::{
    axis::{Axis, AxisScroller, Phase},
    clock::{Clock, ManualClock, SystemClock},
    config::{
        DEFAULT_OVERFLING_DISTANCE, DEFAULT_SCROLL_FRICTION, ScrollConfig, screen_density,
        set_screen_density,
    },
    error::{KineticsError, PhaseError},
    fling::FlingModel,
    interpolator::{Decelerate, EaseInOutCubic, Interpolator, Linear, ViscousFluid},
    over_scroller::{OverScroller, ScrollMode},
    scroller::Scroller,
    spline::SplineTable,
};
