//! Exponential fling model shared by every scroller.
//!
//! Given a release velocity, the model predicts how long a fling lasts and
//! how far it travels. Both scrollers go through [`FlingModel`] so their
//! flings can never drift apart.

use crate::spline::INFLEXION;

/// Standard gravity, in m/s².
pub const GRAVITY_EARTH: f32 = 9.806_65;

/// Look-and-feel tuning applied to the physical coefficient.
const PHYSICAL_TUNING: f32 = 0.84;

const INCHES_PER_METER: f32 = 39.37;

/// Pixels per inch at a density of `1.0`.
const BASELINE_PPI: f32 = 160.0;

/// Empirical deceleration rate, `ln(0.78) / ln(0.9)`.
pub fn deceleration_rate() -> f64 {
    0.78_f64.ln() / 0.9_f64.ln()
}

/// Sign of `value`, with `0.0` for zero (and for NaN).
pub fn signum(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Deceleration in px/s² produced by `friction` on a screen of `density`.
pub fn compute_deceleration(friction: f32, density: f32) -> f32 {
    GRAVITY_EARTH * INCHES_PER_METER * density * BASELINE_PPI * friction
}

/// Combines a newly requested velocity with what is left of the previous
/// motion.
///
/// Velocities add up when both point the same way, so repeated flings in one
/// direction speed up. Otherwise the request is used as is.
pub fn flywheel_velocity(requested: f32, residual: f32) -> f32 {
    let sign = signum(requested);
    if sign != 0.0 && sign == signum(residual) {
        requested + residual
    } else {
        requested
    }
}

/// Fling duration and distance derived from a release velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingModel {
    friction: f32,
    physical_coeff: f32,
}

impl FlingModel {
    /// Builds the model for a friction coefficient and screen density.
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coeff: compute_deceleration(PHYSICAL_TUNING, density),
        }
    }

    /// Friction coefficient in use.
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Density-derived physical coefficient.
    pub fn physical_coeff(&self) -> f32 {
        self.physical_coeff
    }

    pub(crate) fn set_friction(&mut self, friction: f32) {
        self.friction = friction;
    }

    /// Log-scaled deceleration term of the model.
    ///
    /// Undefined for a zero velocity; callers go through
    /// [`duration_millis`](Self::duration_millis) and
    /// [`distance`](Self::distance), which guard it.
    pub fn spline_deceleration(&self, velocity: f32) -> f64 {
        (f64::from(INFLEXION) * f64::from(velocity.abs())
            / (f64::from(self.friction) * f64::from(self.physical_coeff)))
        .ln()
    }

    /// How long a fling at `velocity` px/s lasts, in milliseconds.
    pub fn duration_millis(&self, velocity: f32) -> i32 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.spline_deceleration(velocity);
        let decel_minus_one = deceleration_rate() - 1.0;
        (1000.0 * (l / decel_minus_one).exp()) as i32
    }

    /// How far a fling at `velocity` px/s travels, in pixels (unsigned).
    pub fn distance(&self, velocity: f32) -> f64 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        let rate = deceleration_rate();
        let decel_minus_one = rate - 1.0;
        f64::from(self.friction)
            * f64::from(self.physical_coeff)
            * (rate / decel_minus_one * l).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCROLL_FRICTION;

    fn model() -> FlingModel {
        FlingModel::new(DEFAULT_SCROLL_FRICTION, 1.0)
    }

    #[test]
    fn test_zero_velocity_is_inert() {
        let model = model();
        assert_eq!(model.duration_millis(0.0), 0);
        assert_eq!(model.distance(0.0), 0.0);
    }

    #[test]
    fn test_duration_and_distance_grow_with_velocity() {
        let model = model();
        let mut last_duration = 0;
        let mut last_distance = 0.0;
        for velocity in [100.0, 500.0, 1_000.0, 2_500.0, 5_000.0, 8_000.0] {
            let duration = model.duration_millis(velocity);
            let distance = model.distance(velocity);
            assert!(duration > 0, "duration for {velocity}");
            assert!(distance > 0.0, "distance for {velocity}");
            assert!(duration > last_duration);
            assert!(distance > last_distance);
            last_duration = duration;
            last_distance = distance;
        }
    }

    #[test]
    fn test_direction_does_not_change_magnitude() {
        let model = model();
        assert_eq!(model.duration_millis(-1_200.0), model.duration_millis(1_200.0));
        assert_eq!(model.distance(-1_200.0), model.distance(1_200.0));
    }

    #[test]
    fn test_higher_friction_shortens_fling() {
        let slippery = FlingModel::new(0.01, 1.0);
        let sticky = FlingModel::new(0.05, 1.0);
        assert!(sticky.distance(3_000.0) < slippery.distance(3_000.0));
    }

    #[test]
    fn test_physical_coefficient_scales_with_density() {
        let low = FlingModel::new(DEFAULT_SCROLL_FRICTION, 1.0);
        let high = FlingModel::new(DEFAULT_SCROLL_FRICTION, 2.0);
        assert!((high.physical_coeff() / low.physical_coeff() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_flywheel_velocity() {
        assert_eq!(flywheel_velocity(1_000.0, 400.0), 1_400.0);
        assert_eq!(flywheel_velocity(-1_000.0, -400.0), -1_400.0);
        assert_eq!(flywheel_velocity(1_000.0, -400.0), 1_000.0);
        assert_eq!(flywheel_velocity(1_000.0, 0.0), 1_000.0);
        assert_eq!(flywheel_velocity(0.0, 400.0), 0.0);
    }

    #[test]
    fn test_signum_treats_zero_as_zero() {
        assert_eq!(signum(0.0), 0.0);
        assert_eq!(signum(-0.0), 0.0);
        assert_eq!(signum(3.0), 1.0);
        assert_eq!(signum(-3.0), -1.0);
    }
}
