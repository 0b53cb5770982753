//! Trapezoidal membership functions and sampled curves
//!
//! A [`Trapezoid`] is the analytic four-point shape; a [`MembershipCurve`] is
//! that shape evaluated at every point of a [`Universe`] and frozen. Queries
//! go through [`MembershipCurve::membership_at`], which interpolates between
//! the stored samples instead of re-evaluating the trapezoid, so results
//! track the discretized curve exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aero_ensure;
use crate::error::{AeroResult, AerofuzzError};
use crate::universe::Universe;

/// A fuzzy truth value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FuzzyValue(f64);

impl FuzzyValue {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Fuzzy AND (t-norm) - minimum
    pub fn and(&self, other: &Self) -> Self {
        Self::new(self.0.min(other.0))
    }

    /// Fuzzy OR (t-conorm) - maximum
    pub fn or(&self, other: &Self) -> Self {
        Self::new(self.0.max(other.0))
    }

    /// Algebraic product t-norm
    pub fn product(&self, other: &Self) -> Self {
        Self::new(self.0 * other.0)
    }

    /// Łukasiewicz t-norm
    pub fn lukasiewicz_and(&self, other: &Self) -> Self {
        Self::new((self.0 + other.0 - 1.0).max(0.0))
    }
}

impl Default for FuzzyValue {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<f64> for FuzzyValue {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl fmt::Display for FuzzyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// A trapezoidal membership shape defined by four control points
/// `a <= b <= c <= d`.
///
/// Membership rises linearly from 0 at `a` to 1 at `b`, holds 1 on `[b, c]`,
/// and falls linearly to 0 at `d`. Degenerate `a = b` or `c = d` collapse a
/// flank into a step, yielding triangular or shoulder shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trapezoid {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Trapezoid {
    /// Create a trapezoid, validating the control-point ordering.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> AeroResult<Trapezoid> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite();
        aero_ensure!(
            finite && a <= b && b <= c && c <= d,
            AerofuzzError::invalid_shape(a, b, c, d)
        );
        Ok(Trapezoid { a, b, c, d })
    }

    /// Create a trapezoid from a `[a, b, c, d]` array (config form)
    pub fn from_points(points: [f64; 4]) -> AeroResult<Trapezoid> {
        Self::new(points[0], points[1], points[2], points[3])
    }

    /// The control points as an array
    pub fn points(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Analytic membership degree at `x`.
    ///
    /// On a degenerate flank (`a = b` or `c = d`) the plateau edge itself
    /// has degree 1.
    pub fn degree_at(&self, x: f64) -> FuzzyValue {
        let degree = if x < self.a {
            0.0
        } else if x < self.b {
            (x - self.a) / (self.b - self.a)
        } else if x <= self.c {
            1.0
        } else if x < self.d {
            (self.d - x) / (self.d - self.c)
        } else {
            0.0
        };
        FuzzyValue::new(degree)
    }

    /// Evaluate the trapezoid at every point of `universe`, producing a
    /// frozen sampled curve.
    pub fn sample(&self, universe: &Universe) -> MembershipCurve {
        let samples = universe
            .iter()
            .map(|x| (x, self.degree_at(x)))
            .collect();
        MembershipCurve {
            shape: *self,
            samples,
        }
    }
}

/// A trapezoid evaluated at every point of its owning universe.
///
/// Stored as ordered `(x, degree)` pairs aligned with the universe; computed
/// once at construction and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipCurve {
    shape: Trapezoid,
    samples: Vec<(f64, FuzzyValue)>,
}

impl MembershipCurve {
    /// The trapezoid this curve was sampled from
    pub fn shape(&self) -> &Trapezoid {
        &self.shape
    }

    /// The sampled `(x, degree)` pairs in ascending x order
    pub fn samples(&self) -> &[(f64, FuzzyValue)] {
        &self.samples
    }

    /// Interpolated degree of membership at `query`.
    ///
    /// Finds the two samples bracketing `query` and interpolates linearly
    /// between their stored degrees. Queries outside the sampled range clamp
    /// to the nearest boundary sample (constant extrapolation), never an
    /// error.
    pub fn membership_at(&self, query: f64) -> FuzzyValue {
        let first = self.samples[0];
        let last = self.samples[self.samples.len() - 1];

        if query <= first.0 {
            return first.1;
        }
        if query >= last.0 {
            return last.1;
        }

        // partition_point gives the first sample strictly above the query;
        // its predecessor is the lower bracket.
        let hi = self.samples.partition_point(|(x, _)| *x <= query);
        let (x0, y0) = self.samples[hi - 1];
        let (x1, y1) = self.samples[hi];

        if x1 == x0 {
            return y0;
        }
        let t = (query - x0) / (x1 - x0);
        FuzzyValue::new(y0.value() + t * (y1.value() - y0.value()))
    }
}
