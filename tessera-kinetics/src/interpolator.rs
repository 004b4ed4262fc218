//! Easing curves for scripted scrolls.
//!
//! A scripted scroll maps elapsed-time fraction to progress fraction through
//! an [`Interpolator`]. The default is [`ViscousFluid`]; any
//! `Fn(f32) -> f32 + Send + Sync` closure works as well.

/// Maps linear progress in `[0.0, 1.0]` to eased progress.
pub trait Interpolator: Send + Sync {
    /// Eased progress for `input`. `0.0` should map to `0.0` and `1.0` to
    /// `1.0`.
    fn interpolate(&self, input: f32) -> f32;
}

impl<F> Interpolator for F
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    fn interpolate(&self, input: f32) -> f32 {
        self(input)
    }
}

/// Identity mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl Interpolator for Linear {
    fn interpolate(&self, input: f32) -> f32 {
        input
    }
}

/// Cubic ease-in-out.
#[derive(Debug, Clone, Copy, Default)]
pub struct EaseInOutCubic;

impl Interpolator for EaseInOutCubic {
    fn interpolate(&self, input: f32) -> f32 {
        let t = input.clamp(0.0, 1.0);
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        }
    }
}

/// Starts fast and slows down; `factor` controls how strongly.
#[derive(Debug, Clone, Copy)]
pub struct Decelerate {
    /// `1.0` gives a quadratic curve, larger values decelerate harder.
    pub factor: f32,
}

impl Default for Decelerate {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl Interpolator for Decelerate {
    fn interpolate(&self, input: f32) -> f32 {
        if self.factor == 1.0 {
            1.0 - (1.0 - input) * (1.0 - input)
        } else {
            1.0 - (1.0 - input).powf(2.0 * self.factor)
        }
    }
}

/// Controls how much of the viscous effect is applied.
const VISCOUS_FLUID_SCALE: f32 = 8.0;

/// Rapid start that settles like a body moving through a viscous fluid.
///
/// The curve is normalized so that `interpolate(1.0) == 1.0`.
#[derive(Debug, Clone, Copy)]
pub struct ViscousFluid {
    normalize: f32,
    offset: f32,
}

impl ViscousFluid {
    /// Builds the normalized curve.
    pub fn new() -> Self {
        let normalize = 1.0 / viscous_fluid(1.0);
        // absorbs float error so that 1.0 maps exactly to 1.0
        let offset = 1.0 - normalize * viscous_fluid(1.0);
        Self { normalize, offset }
    }
}

impl Default for ViscousFluid {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpolator for ViscousFluid {
    fn interpolate(&self, input: f32) -> f32 {
        let interpolated = self.normalize * viscous_fluid(input);
        if interpolated > 0.0 {
            interpolated + self.offset
        } else {
            interpolated
        }
    }
}

fn viscous_fluid(x: f32) -> f32 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // exp(-1)
        let start = 0.367_879_44_f32;
        let x = 1.0 - (1.0 - x).exp();
        start + x * (1.0 - start)
    }
}
