//! Discretized universe of discourse
//!
//! A [`Universe`] is an ordered, evenly spaced sampling of a bounded numeric
//! range. Membership curves are sampled over it once at construction, and the
//! interpolating evaluator works against those samples rather than the
//! analytic shape.

use serde::{Deserialize, Serialize};

use crate::aero_ensure;
use crate::error::{AeroResult, AerofuzzError};

/// An ordered, evenly spaced discretization of `[min, max]` with fixed step.
///
/// Immutable after creation and a pure function of its parameters. The point
/// count is `(max - min) / step + 1`; `max` itself is only included when the
/// range is an exact multiple of the step, matching half-open range sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
    points: Vec<f64>,
}

impl Universe {
    /// Build a universe from bounds and step.
    ///
    /// Fails with [`crate::error::ErrorCode::InvalidRange`] if `min > max` or
    /// a bound is non-finite, and with
    /// [`crate::error::ErrorCode::InvalidStep`] if `step <= 0` or non-finite.
    pub fn build(min: f64, max: f64, step: f64) -> AeroResult<Universe> {
        aero_ensure!(
            min.is_finite() && max.is_finite() && min <= max,
            AerofuzzError::invalid_range(min, max)
        );
        aero_ensure!(
            step.is_finite() && step > 0.0,
            AerofuzzError::invalid_step(step)
        );

        let count = ((max - min) / step).floor() as usize + 1;
        let points: Vec<f64> = (0..count).map(|i| min + i as f64 * step).collect();

        Ok(Universe {
            min,
            max,
            step,
            points,
        })
    }

    /// Lower bound of the range
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the range
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Spacing between consecutive sample points
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of sample points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the universe has no points (never true for a built universe)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sample points in ascending order
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// First sample point
    pub fn first(&self) -> f64 {
        self.points[0]
    }

    /// Last sample point
    pub fn last(&self) -> f64 {
        *self.points.last().expect("universe is never empty")
    }

    /// Iterate over the sample points in ascending order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied()
    }
}
