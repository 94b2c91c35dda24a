//! Easing functions for viewpoint travel.
//!
//! Every curve maps normalized travel time in [0, 1] to normalized travelled
//! distance in [0, 1]. The travel engine defaults to [`SineInOut`], which has
//! zero velocity at both endpoints.
//!
//! [`SineInOut`]: EasingFunction::SineInOut

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for travel curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Square root ease-out (fast start, gradual slow).
    SqrtOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f64,
        /// Second control point.
        c2: f64,
    },
    /// Cosine ease-in/ease-out: (cos(π(t-1)) + 1) / 2.
    SineInOut,
}

impl EasingFunction {
    /// Default easing function: cosine ease-in/ease-out.
    pub const DEFAULT: EasingFunction = EasingFunction::SineInOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::SqrtOut => t.sqrt(),
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
            EasingFunction::SineInOut => {
                ((std::f64::consts::PI * (t - 1.0)).cos() + 1.0) / 2.0
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_sine_in_out_endpoints_and_midpoint() {
        let sine = EasingFunction::SineInOut;
        assert!(sine.evaluate(0.0).abs() < 1e-12);
        assert!((sine.evaluate(0.5) - 0.5).abs() < 1e-12);
        assert!((sine.evaluate(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sine_in_out_flat_at_endpoints() {
        // Slope at the endpoints vanishes: a tiny step moves almost nothing.
        let sine = EasingFunction::SineInOut;
        let h = 1e-4;
        assert!(sine.evaluate(h) / h < 1e-3);
        assert!((1.0 - sine.evaluate(1.0 - h)) / h < 1e-3);
    }

    #[test]
    fn test_cubic_hermite_endpoints() {
        let hermite = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        assert_eq!(hermite.evaluate(0.0), 0.0);
        assert!((hermite.evaluate(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let sine = EasingFunction::SineInOut;
        assert!(sine.evaluate(-0.5).abs() < 1e-12);
        assert!((sine.evaluate(1.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quadratic_curves() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
        assert!((EasingFunction::SqrtOut.evaluate(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_default_is_sine_in_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::SineInOut);
    }
}
