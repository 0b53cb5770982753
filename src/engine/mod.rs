//! Intersection engine and best-match selection
//!
//! A [`Classifier`] holds the two linguistic variables and a [`TNorm`]. Each
//! query fuzzifies both inputs (3 interpolations per side) and combines every
//! (altitude-term, speed-term) pair through the t-norm into a fixed 3x3
//! [`IntersectionGrid`], from which the best-matching combinations are read
//! off by exact maximum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aero_ensure;
use crate::error::{AeroResult, AerofuzzError};
use crate::membership::FuzzyValue;
use crate::variable::{
    builtin_altitude, builtin_speed, AltitudeTerm, LinguisticTerm, LinguisticVariable, SpeedTerm,
};

/// T-norm used to combine the two per-side membership degrees.
///
/// The classifier is fixed to [`TNorm::Min`] unless configured otherwise;
/// this enum is the single point where the combination operation lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TNorm {
    #[default]
    Min,
    Product,
    Lukasiewicz,
}

impl TNorm {
    pub fn apply(&self, a: FuzzyValue, b: FuzzyValue) -> FuzzyValue {
        match self {
            TNorm::Min => a.and(&b),
            TNorm::Product => a.product(&b),
            TNorm::Lukasiewicz => a.lukasiewicz_and(&b),
        }
    }
}

impl fmt::Display for TNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TNorm::Min => "min",
            TNorm::Product => "product",
            TNorm::Lukasiewicz => "lukasiewicz",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TNorm {
    type Err = AerofuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(TNorm::Min),
            "product" => Ok(TNorm::Product),
            "lukasiewicz" => Ok(TNorm::Lukasiewicz),
            _ => Err(AerofuzzError::config(format!("unknown t-norm '{}'", s))
                .with_hint("Available t-norms: min, product, lukasiewicz")),
        }
    }
}

/// Degrees for every (altitude-term, speed-term) combination of one query.
///
/// A fixed 3x3 table indexed by the term enums; iteration is altitude-major
/// in canonical term order. Recomputed fresh per query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionGrid {
    values: [[FuzzyValue; 3]; 3],
}

impl IntersectionGrid {
    fn alt_index(term: AltitudeTerm) -> usize {
        match term {
            AltitudeTerm::Low => 0,
            AltitudeTerm::Medium => 1,
            AltitudeTerm::High => 2,
        }
    }

    fn speed_index(term: SpeedTerm) -> usize {
        match term {
            SpeedTerm::Slow => 0,
            SpeedTerm::Normal => 1,
            SpeedTerm::Fast => 2,
        }
    }

    /// Degree for one combination
    pub fn get(&self, alt: AltitudeTerm, speed: SpeedTerm) -> FuzzyValue {
        self.values[Self::alt_index(alt)][Self::speed_index(speed)]
    }

    /// All 9 entries, altitude-major, in canonical term order
    pub fn iter(&self) -> impl Iterator<Item = (AltitudeTerm, SpeedTerm, FuzzyValue)> + '_ {
        AltitudeTerm::all().iter().flat_map(move |&alt| {
            SpeedTerm::all()
                .iter()
                .map(move |&speed| (alt, speed, self.get(alt, speed)))
        })
    }

    /// Maximum degree across all 9 combinations
    pub fn max(&self) -> FuzzyValue {
        let mut best = FuzzyValue::new(0.0);
        for (_, _, v) in self.iter() {
            best = best.or(&v);
        }
        best
    }

    /// Every combination whose degree equals the maximum, by exact IEEE
    /// equality. Symmetric and boundary inputs routinely produce ties and
    /// all of them are reported; the result is never empty and follows
    /// canonical order.
    pub fn best_matches(&self) -> Vec<(AltitudeTerm, SpeedTerm)> {
        let max = self.max().value();
        self.iter()
            .filter(|(_, _, v)| v.value() == max)
            .map(|(alt, speed, _)| (alt, speed))
            .collect()
    }
}

/// The classifier: two read-only linguistic variables plus a t-norm.
///
/// Built once at startup; every query is a pure function of the two numeric
/// inputs and this immutable state, so a shared reference can serve
/// concurrent queries without synchronization.
#[derive(Debug, Clone)]
pub struct Classifier {
    altitude: LinguisticVariable<AltitudeTerm>,
    speed: LinguisticVariable<SpeedTerm>,
    t_norm: TNorm,
}

impl Classifier {
    /// Build the classifier from the built-in variable definitions.
    pub fn builtin() -> AeroResult<Classifier> {
        Ok(Classifier {
            altitude: builtin_altitude()?,
            speed: builtin_speed()?,
            t_norm: TNorm::Min,
        })
    }

    /// Build from explicit variables (the config path).
    pub fn new(
        altitude: LinguisticVariable<AltitudeTerm>,
        speed: LinguisticVariable<SpeedTerm>,
        t_norm: TNorm,
    ) -> Classifier {
        Classifier {
            altitude,
            speed,
            t_norm,
        }
    }

    /// The altitude variable
    pub fn altitude(&self) -> &LinguisticVariable<AltitudeTerm> {
        &self.altitude
    }

    /// The speed variable
    pub fn speed(&self) -> &LinguisticVariable<SpeedTerm> {
        &self.speed
    }

    /// The configured t-norm
    pub fn t_norm(&self) -> TNorm {
        self.t_norm
    }

    /// Compute the intersection degree for every term combination.
    ///
    /// Rejects NaN/infinite inputs; finite out-of-range values degrade
    /// gracefully through boundary clamping in the evaluator.
    pub fn classify(&self, altitude: f64, speed: f64) -> AeroResult<IntersectionGrid> {
        aero_ensure!(
            altitude.is_finite(),
            AerofuzzError::non_finite("altitude", altitude)
        );
        aero_ensure!(speed.is_finite(), AerofuzzError::non_finite("speed", speed));

        let alt_degrees = self.altitude.fuzzify(altitude);
        let speed_degrees = self.speed.fuzzify(speed);

        let mut values = [[FuzzyValue::default(); 3]; 3];
        for (i, &alt) in AltitudeTerm::all().iter().enumerate() {
            for (j, &spd) in SpeedTerm::all().iter().enumerate() {
                values[i][j] = self.t_norm.apply(alt_degrees[&alt], speed_degrees[&spd]);
            }
        }

        Ok(IntersectionGrid { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_t_norms() {
        let a = FuzzyValue::new(0.6);
        let b = FuzzyValue::new(0.4);

        assert!(close(TNorm::Min.apply(a, b).value(), 0.4));
        assert!(close(TNorm::Product.apply(a, b).value(), 0.24));
        assert!(close(TNorm::Lukasiewicz.apply(a, b).value(), 0.0));
    }

    #[test]
    fn test_t_norm_from_str() {
        assert_eq!("min".parse::<TNorm>().unwrap(), TNorm::Min);
        assert_eq!("product".parse::<TNorm>().unwrap(), TNorm::Product);
        assert!("max".parse::<TNorm>().is_err());
    }

    #[test]
    fn test_grid_has_nine_entries_in_canonical_order() {
        let classifier = Classifier::builtin().unwrap();
        let grid = classifier.classify(5000.0, 600.0).unwrap();

        let entries: Vec<(AltitudeTerm, SpeedTerm)> =
            grid.iter().map(|(a, s, _)| (a, s)).collect();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0], (AltitudeTerm::Low, SpeedTerm::Slow));
        assert_eq!(entries[4], (AltitudeTerm::Medium, SpeedTerm::Normal));
        assert_eq!(entries[8], (AltitudeTerm::High, SpeedTerm::Fast));
    }

    #[test]
    fn test_grid_entries_equal_min_of_sides() {
        let classifier = Classifier::builtin().unwrap();
        let (h, s) = (3500.0, 450.0);
        let grid = classifier.classify(h, s).unwrap();

        for (alt, spd, degree) in grid.iter() {
            let expected = classifier
                .altitude()
                .membership_at(alt, h)
                .and(&classifier.speed().membership_at(spd, s));
            assert_eq!(degree.value(), expected.value());
        }
    }

    #[test]
    fn test_scenario_ground_idle() {
        // altitude 0, speed 0: (low, slow) alone at 1.0
        let classifier = Classifier::builtin().unwrap();
        let grid = classifier.classify(0.0, 0.0).unwrap();

        assert!(close(grid.get(AltitudeTerm::Low, SpeedTerm::Slow).value(), 1.0));
        assert!(close(grid.get(AltitudeTerm::Medium, SpeedTerm::Slow).value(), 0.0));
        assert!(close(grid.get(AltitudeTerm::Low, SpeedTerm::Normal).value(), 0.0));

        assert_eq!(
            grid.best_matches(),
            vec![(AltitudeTerm::Low, SpeedTerm::Slow)]
        );
        assert!(close(grid.max().value(), 1.0));
    }

    #[test]
    fn test_scenario_double_overlap_four_way_tie() {
        // altitude 3000 sits in the low/medium overlap, speed 400 in the
        // slow/normal overlap; all four cross combinations tie at 0.5 exactly
        let classifier = Classifier::builtin().unwrap();
        let grid = classifier.classify(3000.0, 400.0).unwrap();

        let best = grid.best_matches();
        assert_eq!(
            best,
            vec![
                (AltitudeTerm::Low, SpeedTerm::Slow),
                (AltitudeTerm::Low, SpeedTerm::Normal),
                (AltitudeTerm::Medium, SpeedTerm::Slow),
                (AltitudeTerm::Medium, SpeedTerm::Normal),
            ]
        );
        for (alt, spd) in best {
            assert!(close(grid.get(alt, spd).value(), 0.5));
        }
    }

    #[test]
    fn test_scenario_high_fast() {
        let classifier = Classifier::builtin().unwrap();
        let grid = classifier.classify(10000.0, 1200.0).unwrap();

        assert!(close(grid.get(AltitudeTerm::High, SpeedTerm::Fast).value(), 1.0));
        assert_eq!(
            grid.best_matches(),
            vec![(AltitudeTerm::High, SpeedTerm::Fast)]
        );
    }

    #[test]
    fn test_scenario_below_universe_clamps() {
        // altitude -500 clamps to the degrees at altitude 0; must not fail
        let classifier = Classifier::builtin().unwrap();
        let grid = classifier.classify(-500.0, 0.0).unwrap();

        assert!(close(grid.get(AltitudeTerm::Low, SpeedTerm::Slow).value(), 1.0));
        assert!(close(grid.get(AltitudeTerm::Medium, SpeedTerm::Slow).value(), 0.0));
        assert!(close(grid.get(AltitudeTerm::High, SpeedTerm::Slow).value(), 0.0));
    }

    #[test]
    fn test_best_matches_never_empty_and_exact() {
        let classifier = Classifier::builtin().unwrap();
        for (h, s) in [(0.0, 0.0), (3000.0, 400.0), (7000.0, 800.0), (20000.0, -10.0)] {
            let grid = classifier.classify(h, s).unwrap();
            let best = grid.best_matches();
            assert!(!best.is_empty());
            let max = grid.max().value();
            for (alt, spd) in &best {
                assert_eq!(grid.get(*alt, *spd).value(), max);
            }
            // nothing outside the tie set reaches the max
            for (alt, spd, v) in grid.iter() {
                if !best.contains(&(alt, spd)) {
                    assert!(v.value() < max);
                }
            }
        }
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let classifier = Classifier::builtin().unwrap();

        let err = classifier.classify(f64::NAN, 0.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::NonFiniteInput);

        let err = classifier.classify(0.0, f64::INFINITY).unwrap_err();
        assert_eq!(err.code, ErrorCode::NonFiniteInput);
    }

    #[test]
    fn test_product_t_norm_changes_degrees_not_structure() {
        let classifier = Classifier::new(
            crate::variable::builtin_altitude().unwrap(),
            crate::variable::builtin_speed().unwrap(),
            TNorm::Product,
        );
        let grid = classifier.classify(3000.0, 400.0).unwrap();
        assert!(close(grid.get(AltitudeTerm::Low, SpeedTerm::Slow).value(), 0.25));
        assert_eq!(grid.best_matches().len(), 4);
    }

    #[test]
    fn test_classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
    }
}
