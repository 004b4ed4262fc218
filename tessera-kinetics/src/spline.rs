//! # Fling spline table
//!
//! A fling decelerates along a cubic tension curve. Evaluating that curve
//! against time requires inverting it, which is done once by bisection and
//! stored in [`SplineTable`]:
//!
//! - `position[i]` is the distance fraction reached at time fraction `i / N`.
//! - `time[i]` is the time fraction at which distance fraction `i / N` is
//!   reached.
//!
//! Both arrays run from `0.0` to `1.0` and never decrease. The table is built
//! lazily on first use and is read-only afterwards, so it can be shared
//! freely between threads. Call [`warm_up`] to build it ahead of the first
//! fling.

use std::sync::LazyLock;

/// Number of intervals in the table. Arrays hold `NB_SAMPLES + 1` entries.
pub const NB_SAMPLES: usize = 100;

/// Tension lines cross at `(INFLEXION, 1)`.
pub(crate) const INFLEXION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLEXION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLEXION);

const BISECTION_TOLERANCE: f32 = 1e-5;
const MAX_BISECTIONS: usize = 64;

static SPLINE_TABLE: LazyLock<SplineTable> = LazyLock::new(SplineTable::build);

/// Builds the shared table now instead of on the first fling.
pub fn warm_up() {
    LazyLock::force(&SPLINE_TABLE);
}

/// Result of sampling the spline at a time fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    /// Distance fraction covered, in `[0.0, 1.0]`.
    pub distance: f32,
    /// Local slope of distance over time fraction.
    pub velocity: f32,
}

/// Precomputed samples of the fling curve and its inverse.
#[derive(Debug)]
pub struct SplineTable {
    position: [f32; NB_SAMPLES + 1],
    time: [f32; NB_SAMPLES + 1],
}

impl SplineTable {
    /// Shared table instance.
    pub fn get() -> &'static SplineTable {
        &SPLINE_TABLE
    }

    fn build() -> Self {
        let mut position = [0.0; NB_SAMPLES + 1];
        let mut time = [0.0; NB_SAMPLES + 1];

        // Targets increase, so each search can start above the previous root.
        let mut x_min = 0.0;
        let mut y_min = 0.0;
        for i in 0..NB_SAMPLES {
            let alpha = i as f32 / NB_SAMPLES as f32;

            let x = bisect(&mut x_min, alpha, |x| tension_curve(x, P1, P2));
            position[i] = tension_curve(x, START_TENSION, END_TENSION);

            let y = bisect(&mut y_min, alpha, |y| tension_curve(y, START_TENSION, END_TENSION));
            time[i] = tension_curve(y, P1, P2);
        }
        position[NB_SAMPLES] = 1.0;
        time[NB_SAMPLES] = 1.0;

        Self { position, time }
    }

    /// Distance fraction at time fraction `index / NB_SAMPLES`.
    pub fn position(&self, index: usize) -> f32 {
        self.position[index]
    }

    /// Time fraction at distance fraction `index / NB_SAMPLES`.
    pub fn time(&self, index: usize) -> f32 {
        self.time[index]
    }

    /// All position samples.
    pub fn positions(&self) -> &[f32] {
        &self.position
    }

    /// All time samples.
    pub fn times(&self) -> &[f32] {
        &self.time
    }

    /// Samples distance and velocity at time fraction `t`.
    ///
    /// At or past the end of the curve this reports full distance and zero
    /// velocity.
    pub fn sample(&self, t: f32) -> SplineSample {
        let t = t.max(0.0);
        let index = (NB_SAMPLES as f32 * t) as usize;
        if index >= NB_SAMPLES {
            return SplineSample {
                distance: 1.0,
                velocity: 0.0,
            };
        }

        let t_inf = index as f32 / NB_SAMPLES as f32;
        let t_sup = (index + 1) as f32 / NB_SAMPLES as f32;
        let d_inf = self.position[index];
        let d_sup = self.position[index + 1];
        let velocity = (d_sup - d_inf) / (t_sup - t_inf);
        SplineSample {
            distance: d_inf + (t - t_inf) * velocity,
            velocity,
        }
    }

    /// Time fraction at which distance fraction `x` is reached.
    pub fn time_coef_for_distance(&self, x: f32) -> f32 {
        let x = x.max(0.0);
        let index = (NB_SAMPLES as f32 * x) as usize;
        if index >= NB_SAMPLES {
            return 1.0;
        }

        let x_inf = index as f32 / NB_SAMPLES as f32;
        let x_sup = (index + 1) as f32 / NB_SAMPLES as f32;
        let t_inf = self.time[index];
        let t_sup = self.time[index + 1];
        t_inf + (x - x_inf) / (x_sup - x_inf) * (t_sup - t_inf)
    }
}

fn tension_curve(x: f32, a: f32, b: f32) -> f32 {
    let coef = 3.0 * x * (1.0 - x);
    coef * ((1.0 - x) * a + x * b) + x * x * x
}

fn bisect(lower: &mut f32, target: f32, curve: impl Fn(f32) -> f32) -> f32 {
    let mut upper = 1.0;
    let mut x = *lower + (upper - *lower) / 2.0;
    for _ in 0..MAX_BISECTIONS {
        x = *lower + (upper - *lower) / 2.0;
        let value = curve(x);
        if (value - target).abs() < BISECTION_TOLERANCE {
            break;
        }
        if value > target {
            upper = x;
        } else {
            *lower = x;
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let table = SplineTable::get();
        assert_eq!(table.position(0), 0.0);
        assert_eq!(table.time(0), 0.0);
        assert_eq!(table.position(NB_SAMPLES), 1.0);
        assert_eq!(table.time(NB_SAMPLES), 1.0);
        assert_eq!(table.positions().len(), NB_SAMPLES + 1);
        assert_eq!(table.times().len(), NB_SAMPLES + 1);
    }

    #[test]
    fn test_tables_are_non_decreasing() {
        let table = SplineTable::get();
        for window in table.positions().windows(2) {
            assert!(window[1] >= window[0], "position decreased: {window:?}");
        }
        for window in table.times().windows(2) {
            assert!(window[1] >= window[0], "time decreased: {window:?}");
        }
    }

    #[test]
    fn test_fling_covers_distance_early() {
        // A fling travels most of its distance in the first half of its time.
        let table = SplineTable::get();
        assert!(table.position(NB_SAMPLES / 2) > 0.5);
        assert!(table.time(NB_SAMPLES / 2) < 0.5);
    }

    #[test]
    fn test_sample_interpolates_between_entries() {
        let table = SplineTable::get();
        let sample = table.sample(0.105);
        assert!(sample.distance > table.position(10));
        assert!(sample.distance < table.position(11));
        assert!(sample.velocity > 0.0);

        let end = table.sample(1.0);
        assert_eq!(end.distance, 1.0);
        assert_eq!(end.velocity, 0.0);

        let start = table.sample(0.0);
        assert_eq!(start.distance, 0.0);
    }

    #[test]
    fn test_inverse_lookup_bounds_and_monotonic() {
        let table = SplineTable::get();
        assert_eq!(table.time_coef_for_distance(0.0), 0.0);
        assert_eq!(table.time_coef_for_distance(1.0), 1.0);
        let mut previous = 0.0;
        for i in 1..=50 {
            let coef = table.time_coef_for_distance(i as f32 / 50.0);
            assert!(coef >= previous);
            previous = coef;
        }
    }

    #[test]
    fn test_warm_up_returns_same_table() {
        warm_up();
        let a = SplineTable::get() as *const SplineTable;
        warm_up();
        let b = SplineTable::get() as *const SplineTable;
        assert_eq!(a, b);
    }
}
