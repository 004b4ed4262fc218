//! Two-axis scroller with overscroll, bounce and spring-back.
//!
//! ## Usage
//!
//! Start a motion with [`OverScroller::fling`], [`OverScroller::start_scroll`]
//! or [`OverScroller::spring_back`], then call
//! [`OverScroller::compute_scroll_offset`] once per frame and apply
//! [`curr_x`](OverScroller::curr_x) / [`curr_y`](OverScroller::curr_y) to the
//! content.
//!
//! ```
//! use tessera_kinetics::{OverScroller, ScrollConfig, clock::ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut scroller = OverScroller::with_config(ScrollConfig::default(), clock.clone()).unwrap();
//! scroller.fling(0, 0, 0.0, 2_400.0, 0, 0, 0, 5_000);
//! while scroller.compute_scroll_offset() {
//!     clock.advance(16);
//! }
//! assert!(scroller.curr_y() > 0);
//! ```

use std::fmt;

use tracing::debug;

use crate::{
    axis::{Axis, AxisScroller, Phase},
    clock::{Clock, SystemClock},
    config::{ScrollConfig, validate_friction},
    error::KineticsError,
    fling::{flywheel_velocity, signum},
    interpolator::{Interpolator, ViscousFluid},
};

/// Top-level mode of a two-axis scroller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollMode {
    /// Both axes follow one eased timeline.
    #[default]
    Scripted,
    /// Each axis runs its own fling simulation.
    Fling,
}

/// Scroller that can overshoot content bounds and spring back.
pub struct OverScroller<C: Clock = SystemClock> {
    mode: ScrollMode,
    x: AxisScroller,
    y: AxisScroller,
    interpolator: Box<dyn Interpolator>,
    flywheel: bool,
    default_duration: i32,
    clock: C,
}

impl<C: Clock> fmt::Debug for OverScroller<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverScroller")
            .field("mode", &self.mode)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("flywheel", &self.flywheel)
            .field("default_duration", &self.default_duration)
            .finish_non_exhaustive()
    }
}

impl OverScroller<SystemClock> {
    /// Creates a scroller with the default configuration on the system clock.
    pub fn new() -> Self {
        Self::from_parts(ScrollConfig::default(), SystemClock::new())
    }
}

impl Default for OverScroller<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> OverScroller<C> {
    /// Creates a scroller from a configuration and a clock.
    pub fn with_config(config: ScrollConfig, clock: C) -> Result<Self, KineticsError> {
        config.validate()?;
        Ok(Self::from_parts(config, clock))
    }

    fn from_parts(config: ScrollConfig, clock: C) -> Self {
        let model = config.fling_model();
        Self {
            mode: ScrollMode::default(),
            x: AxisScroller::new(model),
            y: AxisScroller::new(model),
            interpolator: Box::new(ViscousFluid::new()),
            flywheel: config.flywheel,
            default_duration: config.scroll_duration_ms,
            clock,
        }
    }

    /// Replaces the easing curve of scripted scrolls.
    pub fn with_interpolator(mut self, interpolator: impl Interpolator + 'static) -> Self {
        self.set_interpolator(interpolator);
        self
    }

    /// Replaces the easing curve of scripted scrolls.
    pub fn set_interpolator(&mut self, interpolator: impl Interpolator + 'static) {
        self.interpolator = Box::new(interpolator);
    }

    /// Sets the fling friction of both axes.
    pub fn set_friction(&mut self, friction: f32) -> Result<(), KineticsError> {
        validate_friction(friction)?;
        self.x.set_friction(friction);
        self.y.set_friction(friction);
        Ok(())
    }

    /// Active mode.
    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// Motion state of one axis.
    pub fn axis(&self, axis: Axis) -> &AxisScroller {
        match axis {
            Axis::Horizontal => &self.x,
            Axis::Vertical => &self.y,
        }
    }

    /// Whether both axes have stopped.
    pub fn is_finished(&self) -> bool {
        self.x.is_finished() && self.y.is_finished()
    }

    /// Stops (or revives) both axes without moving them.
    pub fn force_finished(&mut self, finished: bool) {
        self.x.force_finished(finished);
        self.y.force_finished(finished);
    }

    /// Current x offset.
    pub fn curr_x(&self) -> i32 {
        self.x.current()
    }

    /// Current y offset.
    pub fn curr_y(&self) -> i32 {
        self.y.current()
    }

    /// Magnitude of the current velocity, in px/s.
    pub fn curr_velocity(&self) -> f32 {
        self.x.current_velocity().hypot(self.y.current_velocity())
    }

    /// Current x velocity, in px/s.
    pub fn current_velocity_x(&self) -> f32 {
        self.x.current_velocity()
    }

    /// Current y velocity, in px/s.
    pub fn current_velocity_y(&self) -> f32 {
        self.y.current_velocity()
    }

    /// Start x offset.
    pub fn start_x(&self) -> i32 {
        self.x.start()
    }

    /// Start y offset.
    pub fn start_y(&self) -> i32 {
        self.y.start()
    }

    /// Where the x axis will stop. Only meaningful for flings.
    pub fn final_x(&self) -> i32 {
        self.x.final_position()
    }

    /// Where the y axis will stop. Only meaningful for flings.
    pub fn final_y(&self) -> i32 {
        self.y.final_position()
    }

    /// Duration of the longer axis, in milliseconds.
    pub fn duration(&self) -> i32 {
        self.x.duration().max(self.y.duration())
    }

    /// Lets the running motion continue for `extend` more milliseconds.
    pub fn extend_duration(&mut self, extend: i32) {
        let now = self.clock.now_millis();
        self.x.extend_duration(extend, now);
        self.y.extend_duration(extend, now);
    }

    /// Moves the x target of the running motion.
    pub fn set_final_x(&mut self, new_x: i32) {
        self.x.set_final_position(new_x);
    }

    /// Moves the y target of the running motion.
    pub fn set_final_y(&mut self, new_y: i32) {
        self.y.set_final_position(new_y);
    }

    /// Advances the motion to the current clock time.
    ///
    /// Returns `true` while the motion is still running, `false` once it has
    /// finished (including when nothing was ever started).
    pub fn compute_scroll_offset(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let now = self.clock.now_millis();
        match self.mode {
            ScrollMode::Scripted => {
                // Both axes were started together; x carries the timeline.
                let elapsed = now - self.x.start_time();
                let duration = self.x.duration();
                if elapsed < i64::from(duration) {
                    let q = self.interpolator.interpolate(elapsed as f32 / duration as f32);
                    self.x.update_scroll(q);
                    self.y.update_scroll(q);
                } else {
                    self.abort_animation();
                }
            }
            ScrollMode::Fling => {
                advance_fling_axis(&mut self.x, now);
                advance_fling_axis(&mut self.y, now);
            }
        }

        true
    }

    /// Scripted scroll by `(dx, dy)` over the default duration.
    pub fn start_scroll(&mut self, start_x: i32, start_y: i32, dx: i32, dy: i32) {
        self.start_scroll_with_duration(start_x, start_y, dx, dy, self.default_duration);
    }

    /// Scripted scroll by `(dx, dy)` over `duration` milliseconds.
    pub fn start_scroll_with_duration(
        &mut self,
        start_x: i32,
        start_y: i32,
        dx: i32,
        dy: i32,
        duration: i32,
    ) {
        let now = self.clock.now_millis();
        self.mode = ScrollMode::Scripted;
        self.x.start_scroll(start_x, dx, duration, now);
        self.y.start_scroll(start_y, dy, duration, now);
    }

    /// Springs back into `[min, max]` on each axis where the start lies
    /// outside it.
    ///
    /// Returns `true` if either axis needed to spring back.
    pub fn spring_back(
        &mut self,
        start_x: i32,
        start_y: i32,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    ) -> bool {
        let now = self.clock.now_millis();
        self.mode = ScrollMode::Fling;

        // Both axes must be evaluated.
        let spring_back_x = self.x.spring_back(start_x, min_x, max_x, now);
        let spring_back_y = self.y.spring_back(start_y, min_y, max_y, now);
        spring_back_x || spring_back_y
    }

    /// Flings within the given bounds without overscroll.
    #[allow(clippy::too_many_arguments)]
    pub fn fling(
        &mut self,
        start_x: i32,
        start_y: i32,
        velocity_x: f32,
        velocity_y: f32,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    ) {
        self.fling_with_overscroll(
            start_x, start_y, velocity_x, velocity_y, min_x, max_x, min_y, max_y, 0, 0,
        );
    }

    /// Flings within the given bounds, allowing `over_x` / `over_y` pixels of
    /// overscroll past them.
    ///
    /// With flywheel enabled, a fling issued while the previous one is still
    /// running adds the remaining velocity on each axis that keeps its
    /// direction.
    #[allow(clippy::too_many_arguments)]
    pub fn fling_with_overscroll(
        &mut self,
        start_x: i32,
        start_y: i32,
        velocity_x: f32,
        velocity_y: f32,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
        over_x: i32,
        over_y: i32,
    ) {
        let (velocity_x, velocity_y) = if self.flywheel && !self.is_finished() {
            (
                flywheel_velocity(velocity_x, self.x.current_velocity()),
                flywheel_velocity(velocity_y, self.y.current_velocity()),
            )
        } else {
            (velocity_x, velocity_y)
        };

        debug!(start_x, start_y, velocity_x, velocity_y, "fling");

        let now = self.clock.now_millis();
        self.mode = ScrollMode::Fling;
        self.x.fling(start_x, velocity_x, min_x, max_x, over_x, now);
        self.y.fling(start_y, velocity_y, min_y, max_y, over_y, now);
    }

    /// Tells one axis it has reached a content edge mid-fling.
    ///
    /// Ignored unless that axis is still in its initial fling phase.
    pub fn notify_edge_reached(&mut self, axis: Axis, start: i32, end: i32, over: i32) {
        let now = self.clock.now_millis();
        match axis {
            Axis::Horizontal => self.x.notify_edge_reached(start, end, over, now),
            Axis::Vertical => self.y.notify_edge_reached(start, end, over, now),
        }
    }

    /// See [`notify_edge_reached`](Self::notify_edge_reached).
    pub fn notify_horizontal_edge_reached(&mut self, start_x: i32, final_x: i32, over_x: i32) {
        self.notify_edge_reached(Axis::Horizontal, start_x, final_x, over_x);
    }

    /// See [`notify_edge_reached`](Self::notify_edge_reached).
    pub fn notify_vertical_edge_reached(&mut self, start_y: i32, final_y: i32, over_y: i32) {
        self.notify_edge_reached(Axis::Vertical, start_y, final_y, over_y);
    }

    /// Whether a running axis is past its bounds (bouncing or springing
    /// back).
    pub fn is_over_scrolled(&self) -> bool {
        [&self.x, &self.y]
            .iter()
            .any(|axis| !axis.is_finished() && axis.phase() != Phase::Spline)
    }

    /// Stops both axes at their final positions.
    pub fn abort_animation(&mut self) {
        self.x.finish();
        self.y.finish();
    }

    /// Milliseconds since the earlier of the two axes started.
    pub fn time_passed(&self) -> i64 {
        let start_time = self.x.start_time().min(self.y.start_time());
        self.clock.now_millis() - start_time
    }

    /// Whether a running motion heads the same way as `(x_velocity,
    /// y_velocity)` on both axes.
    pub fn is_scrolling_in_direction(&self, x_velocity: f32, y_velocity: f32) -> bool {
        let dx = (self.x.final_position() - self.x.start()) as f32;
        let dy = (self.y.final_position() - self.y.start()) as f32;
        !self.is_finished()
            && signum(x_velocity) == signum(dx)
            && signum(y_velocity) == signum(dy)
    }
}

fn advance_fling_axis(axis: &mut AxisScroller, now: i64) {
    if !axis.is_finished() && !axis.update(now) && !axis.continue_when_finished(now) {
        axis.finish();
    }
}
