//! # Single-axis motion
//!
//! [`AxisScroller`] simulates one axis of a scroll gesture. A fling moves
//! through up to three phases:
//!
//! 1. [`Phase::Spline`]: the fling itself, following the precomputed
//!    [`SplineTable`](crate::spline::SplineTable).
//! 2. [`Phase::Ballistic`]: when the fling runs into a content edge, the
//!    content keeps going past it under constant deceleration, up to the
//!    allowed overscroll distance.
//! 3. [`Phase::Cubic`]: an eased spring-back from the overscrolled position
//!    to the edge. Terminal.
//!
//! All methods that depend on time take the current animation time `now` in
//! milliseconds; [`OverScroller`](crate::OverScroller) feeds them from its
//! clock.
//!
//! An axis starts out finished. Advancing a finished axis, including one that
//! was never started, does nothing and reports that there is nothing left to
//! do.

use tracing::{debug, error, trace, warn};

use crate::{
    error::PhaseError,
    fling::{FlingModel, signum},
    spline::SplineTable,
};

/// Constant deceleration used past an edge, in px/s².
pub const GRAVITY: f32 = 2000.0;

/// Motion phase of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Regular fling along the spline.
    Spline,
    /// Travel past an edge under constant deceleration.
    Ballistic,
    /// Eased return to an edge.
    Cubic,
}

impl Phase {
    /// Validates moving from `self` to `next` during a single gesture.
    ///
    /// A spline fling may restart, bounce, or spring back; a bounce may only
    /// spring back; a spring-back never leads anywhere.
    pub fn transition(self, next: Phase) -> Result<Phase, PhaseError> {
        match (self, next) {
            (Phase::Spline, _) | (Phase::Ballistic, Phase::Cubic) => Ok(next),
            (from, to) => Err(PhaseError::IllegalTransition { from, to }),
        }
    }

    /// Whether no transition can leave this phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Cubic)
    }
}

/// Selects one of the two scroll axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

fn deceleration_toward(value: f32) -> f32 {
    if value > 0.0 { -GRAVITY } else { GRAVITY }
}

/// Motion state of one scroll axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScroller {
    start: i32,
    current: i32,
    final_position: i32,
    velocity: f32,
    current_velocity: f32,
    deceleration: f32,
    start_time: i64,
    duration: i32,
    spline_duration: i32,
    spline_distance: i32,
    over: i32,
    phase: Phase,
    finished: bool,
    model: FlingModel,
}

impl AxisScroller {
    /// Creates a finished axis using `model` for flings.
    pub fn new(model: FlingModel) -> Self {
        Self {
            start: 0,
            current: 0,
            final_position: 0,
            velocity: 0.0,
            current_velocity: 0.0,
            deceleration: 0.0,
            start_time: 0,
            duration: 0,
            spline_duration: 0,
            spline_distance: 0,
            over: 0,
            phase: Phase::Spline,
            finished: true,
            model,
        }
    }

    /// Position the current motion started from.
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Current position.
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Position the current phase ends at.
    pub fn final_position(&self) -> i32 {
        self.final_position
    }

    /// Instantaneous velocity in px/s, as of the last update. Zero once the
    /// axis has stopped.
    ///
    /// Every phase reports px/s. During a spring-back this is the time
    /// derivative of the eased curve, `sign * over * 6 (t - t²)` scaled by
    /// `1000 / duration` since `t` is normalized.
    pub fn current_velocity(&self) -> f32 {
        self.current_velocity
    }

    /// Start time of the current phase, in milliseconds.
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// Duration of the current phase, in milliseconds.
    pub fn duration(&self) -> i32 {
        self.duration
    }

    /// Unclamped duration of the spline fling, in milliseconds.
    pub fn spline_duration(&self) -> i32 {
        self.spline_duration
    }

    /// Allowed (or, once bouncing, actual) overscroll distance.
    pub fn over(&self) -> i32 {
        self.over
    }

    /// Current motion phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the axis has stopped.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fling model in use.
    pub fn model(&self) -> &FlingModel {
        &self.model
    }

    /// Sets the fling friction used by the next fling.
    pub(crate) fn set_friction(&mut self, friction: f32) {
        self.model.set_friction(friction);
    }

    /// Stops (or revives) the axis without moving it.
    pub fn force_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    /// Places the axis at `q` of the way between start and final.
    pub fn update_scroll(&mut self, q: f32) {
        let delta = (i64::from(self.final_position) - i64::from(self.start)) as f32;
        self.current = self.start.saturating_add((q * delta).round() as i32);
    }

    /// Starts a scripted move of `distance` over `duration` milliseconds.
    pub fn start_scroll(&mut self, start: i32, distance: i32, duration: i32, now: i64) {
        self.finished = false;
        self.phase = Phase::Spline;

        self.start = start;
        self.current = start;
        self.final_position = start.saturating_add(distance);

        self.start_time = now;
        self.duration = duration;

        // Scripted moves don't use these.
        self.deceleration = 0.0;
        self.velocity = 0.0;
        self.current_velocity = 0.0;
    }

    /// Jumps to the final position and stops.
    pub fn finish(&mut self) {
        self.current = self.final_position;
        self.current_velocity = 0.0;
        self.finished = true;
    }

    /// Moves the target of the running motion.
    pub fn set_final_position(&mut self, position: i32) {
        self.final_position = position;
        self.spline_distance = self.final_position.saturating_sub(self.start);
        self.finished = false;
    }

    /// Lets the running motion continue for `extend` more milliseconds.
    pub fn extend_duration(&mut self, extend: i32, now: i64) {
        let elapsed = i32::try_from(now - self.start_time).unwrap_or(i32::MAX);
        self.duration = elapsed.saturating_add(extend);
        self.spline_duration = self.duration;
        self.finished = false;
    }

    /// Starts a spring-back if `start` lies outside `[min, max]`.
    ///
    /// Returns `true` when a spring-back was started. An in-range start
    /// leaves the axis finished at `start`.
    pub fn spring_back(&mut self, start: i32, min: i32, max: i32, now: i64) -> bool {
        self.finished = true;
        self.phase = Phase::Spline;

        self.start = start;
        self.current = start;
        self.final_position = start;
        self.velocity = 0.0;
        self.current_velocity = 0.0;

        self.start_time = now;
        self.duration = 0;

        if start < min {
            self.start_spring_back(start, min);
        } else if start > max {
            self.start_spring_back(start, max);
        }

        !self.finished
    }

    fn start_spring_back(&mut self, start: i32, end: i32) {
        if !self.advance(Phase::Cubic) {
            return;
        }
        // start_time has been set by the caller.
        self.finished = false;
        self.start = start;
        self.current = start;
        self.final_position = end;
        let delta = start - end;
        self.deceleration = deceleration_toward(delta as f32);
        // Only the sign matters here.
        self.velocity = -(delta as f32);
        self.over = delta.abs();
        self.duration =
            (1000.0 * (-2.0 * f64::from(delta) / f64::from(self.deceleration)).sqrt()) as i32;
        trace!(start, end, duration = self.duration, "axis spring-back");
    }

    /// Starts a fling from `start` at `velocity` px/s within `[min, max]`,
    /// allowing `over` pixels of overscroll.
    pub fn fling(&mut self, start: i32, velocity: f32, min: i32, max: i32, over: i32, now: i64) {
        self.over = over;
        self.finished = false;
        self.phase = Phase::Spline;
        self.velocity = velocity;
        self.current_velocity = velocity;
        self.duration = 0;
        self.spline_duration = 0;
        self.start_time = now;
        self.start = start;
        self.current = start;

        if start > max || start < min {
            self.start_after_edge(start, min, max, velocity, now);
            return;
        }

        if velocity == 0.0 {
            self.spline_distance = 0;
            self.final_position = start;
            self.finished = true;
            return;
        }

        self.duration = self.model.duration_millis(velocity);
        self.spline_duration = self.duration;
        let total_distance = self.model.distance(velocity);

        self.spline_distance = (total_distance * f64::from(signum(velocity))) as i32;
        self.final_position = start.saturating_add(self.spline_distance);

        if self.final_position < min {
            self.adjust_duration(self.start, self.final_position, min);
            self.final_position = min;
        }
        if self.final_position > max {
            self.adjust_duration(self.start, self.final_position, max);
            self.final_position = max;
        }

        debug!(
            start,
            velocity,
            final_position = self.final_position,
            duration = self.duration,
            spline_duration = self.spline_duration,
            "axis fling"
        );
    }

    // Shortens the fling so it stops where the clamped distance is reached on
    // the same curve.
    fn adjust_duration(&mut self, start: i32, old_final: i32, new_final: i32) {
        let old_distance = old_final - start;
        if old_distance == 0 {
            return;
        }
        let new_distance = new_final - start;
        let x = (new_distance as f32 / old_distance as f32).abs();
        let time_coef = SplineTable::get().time_coef_for_distance(x);
        self.duration = (self.duration as f32 * time_coef) as i32;
    }

    fn start_after_edge(&mut self, start: i32, min: i32, max: i32, velocity: f32, now: i64) {
        if start > min && start < max {
            warn!(start, min, max, "start_after_edge called from a valid position");
            self.finished = true;
            return;
        }

        let positive = start > max;
        let edge = if positive { max } else { min };
        let over_distance = start - edge;
        let keep_increasing = over_distance as f32 * velocity >= 0.0;
        if keep_increasing {
            // Bounces or just reaches the edge, depending on velocity.
            self.start_bounce_after_edge(start, edge, velocity);
        } else if self.model.distance(velocity) > f64::from(over_distance.abs()) {
            let (min, max) = if positive { (min, start) } else { (start, max) };
            self.fling(start, velocity, min, max, self.over, now);
        } else {
            self.start_spring_back(start, edge);
        }
    }

    fn start_bounce_after_edge(&mut self, start: i32, end: i32, velocity: f32) {
        self.deceleration = deceleration_toward(if velocity == 0.0 {
            (start - end) as f32
        } else {
            velocity
        });
        self.fit_on_bounce_curve(start, end, velocity);
        self.on_edge_reached();
    }

    // Moves the start back in time so the motion looks like it began at the
    // edge with enough speed to be here now.
    fn fit_on_bounce_curve(&mut self, start: i32, end: i32, velocity: f32) {
        let deceleration = f64::from(self.deceleration);
        let velocity = f64::from(velocity);
        let duration_to_apex = -velocity / deceleration;
        let distance_to_apex = velocity * velocity / 2.0 / deceleration.abs();
        let distance_to_edge = f64::from(end - start).abs();
        let total_duration =
            (2.0 * (distance_to_apex + distance_to_edge) / deceleration.abs()).sqrt();

        self.start_time -= (1000.0 * (total_duration - duration_to_apex)) as i64;
        self.start = end;
        self.current = end;
        self.velocity = (-deceleration * total_duration) as f32;
    }

    // start, velocity and start_time hold their values at the edge.
    fn on_edge_reached(&mut self) {
        if !self.advance(Phase::Ballistic) {
            return;
        }

        let velocity_squared = self.velocity * self.velocity;
        let mut distance = velocity_squared / (2.0 * self.deceleration.abs());
        let sign = signum(self.velocity);

        if self.over <= 0 {
            // Nowhere to go past the edge.
            self.over = 0;
            self.final_position = self.start;
            self.duration = 0;
            self.current_velocity = 0.0;
            trace!(start = self.start, "axis reached edge without overscroll");
            return;
        }

        if distance > self.over as f32 {
            // Default deceleration can't stop us within the allowance.
            self.deceleration = -sign * velocity_squared / (2.0 * self.over as f32);
            distance = self.over as f32;
        }

        self.over = distance as i32;
        let travel = if self.velocity > 0.0 { distance } else { -distance };
        self.final_position = self.start.saturating_add(travel as i32);
        self.duration = -(1000.0 * self.velocity / self.deceleration) as i32;
        trace!(
            start = self.start,
            final_position = self.final_position,
            duration = self.duration,
            "axis bouncing past edge"
        );
    }

    /// Tells the axis it has reached a content edge mid-fling.
    ///
    /// Only a fling still in [`Phase::Spline`] reacts; repeated or late
    /// notifications are ignored.
    pub fn notify_edge_reached(&mut self, start: i32, end: i32, over: i32, now: i64) {
        if self.finished || self.phase != Phase::Spline {
            trace!(phase = ?self.phase, finished = self.finished, "ignoring edge notification");
            return;
        }
        self.over = over;
        self.start_time = now;
        // Current velocity increases the distance to the edge, so this can't
        // restart a fling.
        let velocity = self.current_velocity;
        self.start_after_edge(start, end, end, velocity, now);
    }

    /// Chains the next phase once the current one has run out.
    ///
    /// Returns `false` when the motion is complete.
    pub fn continue_when_finished(&mut self, now: i64) -> bool {
        match self.phase {
            Phase::Spline => {
                if self.duration < self.spline_duration {
                    // The fling was clamped: the edge has been reached.
                    self.start = self.final_position;
                    self.current = self.final_position;
                    self.velocity = self.current_velocity;
                    self.deceleration = deceleration_toward(self.velocity);
                    self.start_time += i64::from(self.duration);
                    self.on_edge_reached();
                } else {
                    return false;
                }
            }
            Phase::Ballistic => {
                self.start_time += i64::from(self.duration);
                self.start_spring_back(self.final_position, self.start);
            }
            Phase::Cubic => return false,
        }

        self.update(now);
        true
    }

    /// Advances the axis to `now`.
    ///
    /// Returns `false` when the current phase has run its course (or the
    /// axis is finished) and `true` while it is still moving.
    pub fn update(&mut self, now: i64) -> bool {
        if self.finished {
            return false;
        }

        let current_time = (now - self.start_time).max(0);
        if current_time == 0 {
            // Nothing elapsed; still going if there is anywhere to go.
            return self.duration > 0;
        }
        if current_time > i64::from(self.duration) {
            return false;
        }

        let distance = match self.phase {
            Phase::Spline => {
                if self.spline_duration <= 0 {
                    self.current_velocity = 0.0;
                    self.spline_distance as f32
                } else {
                    let t = current_time as f32 / self.spline_duration as f32;
                    let sample = SplineTable::get().sample(t);
                    self.current_velocity = sample.velocity * self.spline_distance as f32
                        / self.spline_duration as f32
                        * 1000.0;
                    sample.distance * self.spline_distance as f32
                }
            }
            Phase::Ballistic => {
                let t = current_time as f32 / 1000.0;
                self.current_velocity = self.velocity + self.deceleration * t;
                self.velocity * t + self.deceleration * t * t / 2.0
            }
            Phase::Cubic => {
                let t = current_time as f32 / self.duration as f32;
                let t2 = t * t;
                let sign = signum(self.velocity);
                let over = self.over as f32;
                self.current_velocity =
                    sign * over * 6.0 * (t - t2) * 1000.0 / self.duration as f32;
                sign * over * (3.0 * t2 - 2.0 * t * t2)
            }
        };

        self.current = self.start.saturating_add(distance.round() as i32);
        true
    }

    fn advance(&mut self, next: Phase) -> bool {
        match self.phase.transition(next) {
            Ok(phase) => {
                trace!(from = ?self.phase, to = ?phase, "axis phase transition");
                self.phase = phase;
                true
            }
            Err(err) => {
                error!("{err}");
                self.finished = true;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCROLL_FRICTION;

    const FRAME: i64 = 16;

    fn axis() -> AxisScroller {
        AxisScroller::new(FlingModel::new(DEFAULT_SCROLL_FRICTION, 1.0))
    }

    // Drives the axis the way OverScroller does in fling mode.
    fn run_to_end(axis: &mut AxisScroller, mut now: i64) -> Vec<(i64, i32, Phase)> {
        let mut frames = Vec::new();
        for _ in 0..10_000 {
            if axis.is_finished() {
                break;
            }
            now += FRAME;
            if !axis.update(now) && !axis.continue_when_finished(now) {
                axis.finish();
            }
            frames.push((now, axis.current(), axis.phase()));
        }
        assert!(axis.is_finished(), "axis never settled");
        frames
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(Phase::Spline.transition(Phase::Spline), Ok(Phase::Spline));
        assert_eq!(Phase::Spline.transition(Phase::Ballistic), Ok(Phase::Ballistic));
        assert_eq!(Phase::Spline.transition(Phase::Cubic), Ok(Phase::Cubic));
        assert_eq!(Phase::Ballistic.transition(Phase::Cubic), Ok(Phase::Cubic));
        assert_eq!(
            Phase::Cubic.transition(Phase::Spline),
            Err(PhaseError::IllegalTransition {
                from: Phase::Cubic,
                to: Phase::Spline
            })
        );
        assert!(Phase::Cubic.transition(Phase::Ballistic).is_err());
        assert!(Phase::Ballistic.transition(Phase::Spline).is_err());
        assert!(Phase::Cubic.is_terminal());
        assert!(!Phase::Spline.is_terminal());
    }

    #[test]
    fn test_unstarted_axis_does_nothing() {
        let mut axis = axis();
        assert!(axis.is_finished());
        assert!(!axis.update(1_000));
        assert!(!axis.continue_when_finished(1_000));
        assert_eq!(axis.current(), 0);
    }

    #[test]
    fn test_zero_velocity_finishes_immediately() {
        let mut axis = axis();
        axis.fling(40, 0.0, 0, 100, 0, 0);
        assert!(axis.is_finished());
        assert_eq!(axis.current(), 40);
        assert_eq!(axis.final_position(), 40);
        assert_eq!(axis.duration(), 0);
    }

    #[test]
    fn test_free_fling_settles_on_final() {
        let mut axis = axis();
        axis.fling(0, 2_000.0, 0, 100_000, 0, 0);
        assert!(!axis.is_finished());
        let target = axis.final_position();
        assert!(target > 0);
        assert_eq!(axis.duration(), axis.spline_duration());

        let frames = run_to_end(&mut axis, 0);
        let mut previous = 0;
        for &(_, position, phase) in &frames {
            assert_eq!(phase, Phase::Spline);
            assert!(position >= previous);
            assert!(position <= target);
            previous = position;
        }
        assert_eq!(axis.current(), target);
    }

    #[test]
    fn test_negative_fling_moves_backwards() {
        let mut axis = axis();
        axis.fling(5_000, -1_500.0, 0, 10_000, 0, 0);
        assert!(axis.final_position() < 5_000);
        run_to_end(&mut axis, 0);
        assert_eq!(axis.current(), axis.final_position());
    }

    #[test]
    fn test_clamped_fling_shortens_duration() {
        let mut axis = axis();
        axis.fling(0, 4_000.0, 0, 100, 0, 0);
        assert_eq!(axis.final_position(), 100);
        assert!(axis.duration() < axis.spline_duration());
        assert!(axis.duration() > 0);
    }

    #[test]
    fn test_clamped_fling_bounces_and_springs_back() {
        let mut axis = axis();
        axis.fling(0, 4_000.0, 0, 100, 50, 0);
        let frames = run_to_end(&mut axis, 0);

        assert!(frames.iter().any(|&(_, _, phase)| phase == Phase::Ballistic));
        assert!(frames.iter().any(|&(_, _, phase)| phase == Phase::Cubic));
        let furthest = frames.iter().map(|&(_, position, _)| position).max();
        assert!(furthest.is_some_and(|position| position > 100 && position <= 150));
        assert_eq!(axis.current(), 100);
    }

    #[test]
    fn test_clamped_fling_without_allowance_stops_at_edge() {
        let mut axis = axis();
        axis.fling(0, 4_000.0, 0, 100, 0, 0);
        let frames = run_to_end(&mut axis, 0);
        assert!(frames.iter().all(|&(_, position, _)| position <= 100));
        assert_eq!(axis.current(), 100);
    }

    #[test]
    fn test_spring_back_in_range_is_noop() {
        let mut axis = axis();
        assert!(!axis.spring_back(5, 0, 10, 0));
        assert!(axis.is_finished());
        assert_eq!(axis.current(), 5);
    }

    #[test]
    fn test_spring_back_from_below() {
        let mut axis = axis();
        assert!(axis.spring_back(-5, 0, 10, 0));
        assert!(!axis.is_finished());
        assert_eq!(axis.phase(), Phase::Cubic);

        let frames = run_to_end(&mut axis, 0);
        let mut previous = -5;
        for &(_, position, _) in &frames {
            assert!(position >= previous);
            assert!(position <= 0);
            previous = position;
        }
        assert_eq!(axis.current(), 0);
    }

    #[test]
    fn test_spring_back_from_above() {
        let mut axis = axis();
        assert!(axis.spring_back(260, 0, 200, 0));
        run_to_end(&mut axis, 0);
        assert_eq!(axis.current(), 200);
    }

    #[test]
    fn test_edge_notification_is_idempotent() {
        let mut axis = axis();
        axis.fling(0, 3_000.0, 0, 100_000, 0, 0);
        assert!(axis.update(48));
        let edge = axis.current();

        axis.notify_edge_reached(edge, edge, 40, 48);
        assert_eq!(axis.phase(), Phase::Ballistic);
        let after_first = axis.clone();

        axis.notify_edge_reached(edge, edge, 40, 64);
        assert_eq!(axis, after_first);

        run_to_end(&mut axis, 48);
        assert_eq!(axis.current(), edge);
    }

    #[test]
    fn test_edge_notification_after_finish_is_ignored() {
        let mut axis = axis();
        axis.fling(0, 500.0, 0, 100_000, 0, 0);
        run_to_end(&mut axis, 0);
        let settled = axis.clone();
        axis.notify_edge_reached(settled.current(), settled.current(), 40, 10_000);
        assert_eq!(axis, settled);
    }

    #[test]
    fn test_fling_from_beyond_edge_moving_away_bounces() {
        let mut axis = axis();
        axis.fling(120, 500.0, 0, 100, 30, 0);
        assert_eq!(axis.phase(), Phase::Ballistic);
        assert!(axis.final_position() >= 120);
        run_to_end(&mut axis, 0);
        assert_eq!(axis.current(), 100);
    }

    #[test]
    fn test_slow_fling_from_beyond_edge_springs_back() {
        let mut axis = axis();
        axis.fling(120, -10.0, 0, 100, 30, 0);
        assert_eq!(axis.phase(), Phase::Cubic);
        run_to_end(&mut axis, 0);
        assert_eq!(axis.current(), 100);
    }

    #[test]
    fn test_fast_fling_from_beyond_edge_flings_back() {
        let mut axis = axis();
        axis.fling(120, -3_000.0, 0, 100, 30, 0);
        assert_eq!(axis.phase(), Phase::Spline);
        assert!(axis.final_position() < 120);
        assert!(axis.final_position() >= 0);
    }

    #[test]
    fn test_extend_and_retarget_scripted_move() {
        let mut axis = axis();
        axis.start_scroll(0, 100, 200, 0);
        axis.update_scroll(0.5);
        assert_eq!(axis.current(), 50);

        axis.set_final_position(300);
        axis.update_scroll(0.5);
        assert_eq!(axis.current(), 150);

        axis.extend_duration(500, 100);
        assert_eq!(axis.duration(), 600);
        assert!(!axis.is_finished());

        axis.finish();
        assert_eq!(axis.current(), 300);
        assert!(axis.is_finished());
    }

    #[test]
    fn test_stopped_axis_reports_no_velocity() {
        let mut axis = axis();
        axis.fling(0, 4_000.0, 0, 100, 0, 0);
        let mut now = 0;
        while axis.phase() == Phase::Spline && !axis.is_finished() {
            now += FRAME;
            if !axis.update(now) && !axis.continue_when_finished(now) {
                axis.finish();
            }
        }
        // Pinned to the wall with no overscroll allowance.
        assert_eq!(axis.current(), 100);
        assert_eq!(axis.current_velocity(), 0.0);

        run_to_end(&mut axis, now);
        assert_eq!(axis.current_velocity(), 0.0);
    }

    #[test]
    fn test_restarts_clear_velocity() {
        let mut axis = axis();
        axis.fling(0, 3_000.0, 0, 100_000, 0, 0);
        assert!(axis.update(32));
        assert!(axis.current_velocity() > 0.0);

        axis.spring_back(-20, 0, 100, 32);
        assert_eq!(axis.current_velocity(), 0.0);

        axis.fling(0, 3_000.0, 0, 100_000, 0, 64);
        axis.start_scroll(0, 50, 100, 64);
        assert_eq!(axis.current_velocity(), 0.0);
    }

    #[test]
    fn test_spring_back_velocity_is_in_px_per_second() {
        let mut axis = axis();
        assert!(axis.spring_back(-100, 0, 10, 0));
        let duration = axis.duration();
        assert!(duration > 0);

        // The eased curve is steepest halfway, at 1.5 * over per unit of t.
        let half = i64::from(duration / 2);
        assert!(axis.update(half));
        let t = half as f32 / duration as f32;
        let expected = 100.0 * 6.0 * (t - t * t) * 1000.0 / duration as f32;
        assert!((axis.current_velocity() - expected).abs() < 1e-2);
        assert!(axis.current_velocity() > 100.0);
    }
}
