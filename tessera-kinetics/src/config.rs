//! # Scroll configuration
//!
//! [`ScrollConfig`] gathers the host-provided values the kinetics engine
//! needs: screen density, fling friction, whether flywheel continuation is
//! enabled, and the default duration of scripted scrolls.
//!
//! ## Screen density
//!
//! Density is expressed the same way the rest of the toolkit expresses it: a
//! scale factor where `1.0` means one density-independent pixel per physical
//! pixel (160 dpi). The process-wide default lives in [`SCREEN_DENSITY`] and
//! is read by [`ScrollConfig::default`]. Hosts usually set it once at startup
//! from the window's scale factor.
//!
//! ```
//! use tessera_kinetics::config::{ScrollConfig, set_screen_density};
//!
//! set_screen_density(2.0).unwrap();
//! let config = ScrollConfig::default().friction(0.02).flywheel(false);
//! assert!(config.validate().is_ok());
//! # set_screen_density(1.0).unwrap();
//! ```

use std::sync::OnceLock;

use derive_setters::Setters;
use parking_lot::RwLock;

use crate::{error::KineticsError, fling::FlingModel};

/// Coefficient of friction applied to flings by default.
pub const DEFAULT_SCROLL_FRICTION: f32 = 0.015;

/// Duration of a scripted scroll when none is given, in milliseconds.
pub const DEFAULT_SCROLL_DURATION_MS: i32 = 250;

/// Maximum overfling distance for edge effects, in density-independent pixels.
pub const DEFAULT_OVERFLING_DISTANCE: f32 = 6.0;

/// Process-wide default screen density.
///
/// Uninitialized reads behave as a density of `1.0`. Use
/// [`set_screen_density`] to change it so the value stays validated.
pub static SCREEN_DENSITY: OnceLock<RwLock<f32>> = OnceLock::new();

/// Sets the process-wide default screen density.
pub fn set_screen_density(density: f32) -> Result<(), KineticsError> {
    validate_density(density)?;
    let lock = SCREEN_DENSITY.get_or_init(|| RwLock::new(1.0));
    *lock.write() = density;
    Ok(())
}

/// Returns the process-wide default screen density.
pub fn screen_density() -> f32 {
    SCREEN_DENSITY.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

fn validate_density(density: f32) -> Result<(), KineticsError> {
    if density.is_finite() && density > 0.0 {
        Ok(())
    } else {
        Err(KineticsError::InvalidDensity(density))
    }
}

pub(crate) fn validate_friction(friction: f32) -> Result<(), KineticsError> {
    if friction.is_finite() && friction > 0.0 {
        Ok(())
    } else {
        Err(KineticsError::InvalidFriction(friction))
    }
}

/// Host-provided parameters of a scroller.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollConfig {
    /// Screen density scale factor (1.0 = 160 dpi).
    pub density: f32,
    /// Fling friction coefficient.
    pub friction: f32,
    /// Whether successive same-direction flings accumulate velocity.
    pub flywheel: bool,
    /// Default duration of scripted scrolls, in milliseconds.
    pub scroll_duration_ms: i32,
    /// Maximum overfling distance, in density-independent pixels.
    pub overfling_distance: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            density: screen_density(),
            friction: DEFAULT_SCROLL_FRICTION,
            flywheel: true,
            scroll_duration_ms: DEFAULT_SCROLL_DURATION_MS,
            overfling_distance: DEFAULT_OVERFLING_DISTANCE,
        }
    }
}

impl ScrollConfig {
    /// Checks that every value is usable by the fling model.
    pub fn validate(&self) -> Result<(), KineticsError> {
        validate_density(self.density)?;
        validate_friction(self.friction)?;
        if self.scroll_duration_ms <= 0 {
            return Err(KineticsError::InvalidDuration(self.scroll_duration_ms));
        }
        Ok(())
    }

    /// Fling model derived from this configuration.
    pub fn fling_model(&self) -> FlingModel {
        FlingModel::new(self.friction, self.density)
    }

    /// Overfling distance converted to physical pixels, rounded.
    pub fn overfling_px(&self) -> i32 {
        (self.overfling_distance * self.density + 0.5) as i32
    }
}
