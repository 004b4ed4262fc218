//! Two-axis scroller without overscroll.
//!
//! [`Scroller`] runs both axes on a single timeline. A fling travels along
//! the release direction and stops dead at the content bounds; there is no
//! bounce and no spring-back. Use [`OverScroller`](crate::OverScroller) when
//! content should be allowed past its edges.

use std::fmt;

use tracing::{debug, warn};

use crate::{
    clock::{Clock, SystemClock},
    config::{ScrollConfig, validate_friction},
    error::KineticsError,
    fling::{FlingModel, compute_deceleration, flywheel_velocity, signum},
    interpolator::{Interpolator, ViscousFluid},
    over_scroller::ScrollMode,
    spline::SplineTable,
};

/// Scroller that clamps flings to their bounds.
pub struct Scroller<C: Clock = SystemClock> {
    mode: ScrollMode,
    start_x: i32,
    start_y: i32,
    final_x: i32,
    final_y: i32,
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
    curr_x: i32,
    curr_y: i32,
    start_time: i64,
    duration: i32,
    delta_x: f32,
    delta_y: f32,
    finished: bool,
    flywheel: bool,
    velocity: f32,
    curr_velocity: f32,
    distance: i32,
    deceleration: f32,
    density: f32,
    default_duration: i32,
    model: FlingModel,
    interpolator: Box<dyn Interpolator>,
    clock: C,
}

impl<C: Clock> fmt::Debug for Scroller<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scroller")
            .field("mode", &self.mode)
            .field("start", &(self.start_x, self.start_y))
            .field("current", &(self.curr_x, self.curr_y))
            .field("final", &(self.final_x, self.final_y))
            .field("duration", &self.duration)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Scroller<SystemClock> {
    /// Creates a scroller with the default configuration on the system clock.
    pub fn new() -> Self {
        Self::from_parts(ScrollConfig::default(), SystemClock::new())
    }
}

impl Default for Scroller<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Scroller<C> {
    /// Creates a scroller from a configuration and a clock.
    pub fn with_config(config: ScrollConfig, clock: C) -> Result<Self, KineticsError> {
        config.validate()?;
        Ok(Self::from_parts(config, clock))
    }

    fn from_parts(config: ScrollConfig, clock: C) -> Self {
        Self {
            mode: ScrollMode::default(),
            start_x: 0,
            start_y: 0,
            final_x: 0,
            final_y: 0,
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
            curr_x: 0,
            curr_y: 0,
            start_time: 0,
            duration: 0,
            delta_x: 0.0,
            delta_y: 0.0,
            finished: true,
            flywheel: config.flywheel,
            velocity: 0.0,
            curr_velocity: 0.0,
            distance: 0,
            deceleration: compute_deceleration(config.friction, config.density),
            density: config.density,
            default_duration: config.scroll_duration_ms,
            model: config.fling_model(),
            interpolator: Box::new(ViscousFluid::new()),
            clock,
        }
    }

    /// Replaces the easing curve of scripted scrolls.
    pub fn with_interpolator(mut self, interpolator: impl Interpolator + 'static) -> Self {
        self.interpolator = Box::new(interpolator);
        self
    }

    /// Sets the fling friction.
    pub fn set_friction(&mut self, friction: f32) -> Result<(), KineticsError> {
        validate_friction(friction)?;
        self.deceleration = compute_deceleration(friction, self.density);
        self.model.set_friction(friction);
        Ok(())
    }

    /// Active mode.
    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// Whether the scroller has stopped.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stops (or revives) the scroller without moving it.
    pub fn force_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    /// Duration of the current motion, in milliseconds.
    pub fn duration(&self) -> i32 {
        self.duration
    }

    /// Current x offset.
    pub fn curr_x(&self) -> i32 {
        self.curr_x
    }

    /// Current y offset.
    pub fn curr_y(&self) -> i32 {
        self.curr_y
    }

    /// Current speed, in px/s.
    ///
    /// Scripted scrolls have no simulated velocity, so this returns a
    /// constant-deceleration estimate for them.
    pub fn curr_velocity(&self) -> f32 {
        match self.mode {
            ScrollMode::Fling => self.curr_velocity,
            ScrollMode::Scripted => {
                self.velocity - self.deceleration * self.time_passed() as f32 / 2000.0
            }
        }
    }

    /// Start x offset.
    pub fn start_x(&self) -> i32 {
        self.start_x
    }

    /// Start y offset.
    pub fn start_y(&self) -> i32 {
        self.start_y
    }

    /// Where the x axis will stop.
    pub fn final_x(&self) -> i32 {
        self.final_x
    }

    /// Where the y axis will stop.
    pub fn final_y(&self) -> i32 {
        self.final_y
    }

    /// Advances the motion to the current clock time.
    ///
    /// Returns `true` while the motion is still running.
    pub fn compute_scroll_offset(&mut self) -> bool {
        if self.finished {
            return false;
        }

        let elapsed = self.time_passed();
        if elapsed >= i64::from(self.duration) {
            self.curr_x = self.final_x;
            self.curr_y = self.final_y;
            self.finished = true;
            return true;
        }

        let t = elapsed as f32 / self.duration as f32;
        match self.mode {
            ScrollMode::Scripted => {
                let q = self.interpolator.interpolate(t);
                self.curr_x = self.start_x.saturating_add((q * self.delta_x).round() as i32);
                self.curr_y = self.start_y.saturating_add((q * self.delta_y).round() as i32);
            }
            ScrollMode::Fling => {
                let sample = SplineTable::get().sample(t);
                self.curr_velocity =
                    sample.velocity * self.distance as f32 / self.duration as f32 * 1000.0;

                let dx = span(self.start_x, self.final_x);
                let dy = span(self.start_y, self.final_y);
                let x = self.start_x.saturating_add((sample.distance * dx).round() as i32);
                let y = self.start_y.saturating_add((sample.distance * dy).round() as i32);
                self.curr_x = bound(x, self.min_x, self.max_x);
                self.curr_y = bound(y, self.min_y, self.max_y);

                if self.curr_x == self.final_x && self.curr_y == self.final_y {
                    self.finished = true;
                }
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
        self.mode = ScrollMode::Scripted;
        self.finished = false;
        self.duration = duration;
        self.start_time = self.clock.now_millis();
        self.start_x = start_x;
        self.start_y = start_y;
        self.final_x = start_x.saturating_add(dx);
        self.final_y = start_y.saturating_add(dy);
        self.delta_x = span(start_x, self.final_x);
        self.delta_y = span(start_y, self.final_y);
    }

    /// Flings from `(start_x, start_y)` and stops at the given bounds.
    ///
    /// With flywheel enabled, a fling issued while the previous motion is
    /// still running adds the remaining velocity, split along the direction
    /// of travel, on each axis that keeps its direction.
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
        let (velocity_x, velocity_y) = if self.flywheel && !self.finished {
            let (residual_x, residual_y) = self.residual_velocity();
            (
                flywheel_velocity(velocity_x, residual_x),
                flywheel_velocity(velocity_y, residual_y),
            )
        } else {
            (velocity_x, velocity_y)
        };

        if min_x > max_x || min_y > max_y {
            warn!(min_x, max_x, min_y, max_y, "fling bounds are inverted");
        }

        self.mode = ScrollMode::Fling;
        self.finished = false;
        self.start_time = self.clock.now_millis();
        self.start_x = start_x;
        self.start_y = start_y;
        self.curr_x = start_x;
        self.curr_y = start_y;
        self.min_x = min_x;
        self.max_x = max_x;
        self.min_y = min_y;
        self.max_y = max_y;

        let velocity = velocity_x.hypot(velocity_y);
        self.velocity = velocity;
        self.curr_velocity = velocity;

        if velocity == 0.0 {
            self.duration = 0;
            self.distance = 0;
            self.final_x = start_x;
            self.final_y = start_y;
            self.finished = true;
            return;
        }

        self.duration = self.model.duration_millis(velocity);
        let total_distance = self.model.distance(velocity);
        self.distance = total_distance as i32;

        let coeff_x = f64::from(velocity_x / velocity);
        let coeff_y = f64::from(velocity_y / velocity);
        let travel_x = (total_distance * coeff_x).round() as i32;
        let travel_y = (total_distance * coeff_y).round() as i32;
        self.final_x = bound(start_x.saturating_add(travel_x), min_x, max_x);
        self.final_y = bound(start_y.saturating_add(travel_y), min_y, max_y);

        debug!(
            velocity,
            duration = self.duration,
            final_x = self.final_x,
            final_y = self.final_y,
            "fling"
        );
    }

    fn residual_velocity(&self) -> (f32, f32) {
        let speed = self.curr_velocity();
        let dx = span(self.start_x, self.final_x);
        let dy = span(self.start_y, self.final_y);
        let travel = dx.hypot(dy);
        if travel == 0.0 {
            return (0.0, 0.0);
        }
        (dx / travel * speed, dy / travel * speed)
    }

    /// Stops at the final position.
    pub fn abort_animation(&mut self) {
        self.curr_x = self.final_x;
        self.curr_y = self.final_y;
        self.finished = true;
    }

    /// Lets the running motion continue for `extend` more milliseconds.
    pub fn extend_duration(&mut self, extend: i32) {
        let passed = i32::try_from(self.time_passed()).unwrap_or(i32::MAX);
        self.duration = passed.saturating_add(extend);
        self.finished = false;
    }

    /// Milliseconds since the motion started.
    pub fn time_passed(&self) -> i64 {
        self.clock.now_millis() - self.start_time
    }

    /// Moves the x target of the running motion.
    pub fn set_final_x(&mut self, new_x: i32) {
        self.final_x = new_x;
        self.delta_x = span(self.start_x, self.final_x);
        self.finished = false;
    }

    /// Moves the y target of the running motion.
    pub fn set_final_y(&mut self, new_y: i32) {
        self.final_y = new_y;
        self.delta_y = span(self.start_y, self.final_y);
        self.finished = false;
    }

    /// Whether a running motion heads the same way as `(x_velocity,
    /// y_velocity)` on both axes.
    pub fn is_scrolling_in_direction(&self, x_velocity: f32, y_velocity: f32) -> bool {
        !self.finished
            && signum(x_velocity) == signum(span(self.start_x, self.final_x))
            && signum(y_velocity) == signum(span(self.start_y, self.final_y))
    }
}

/// Signed distance from `from` to `to`, without overflowing `i32`.
fn span(from: i32, to: i32) -> f32 {
    (i64::from(to) - i64::from(from)) as f32
}

/// Like `clamp`, but inverted bounds resolve to `min` instead of panicking.
fn bound(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}
