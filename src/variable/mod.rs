//! Linguistic variables and their terms
//!
//! The two variables of the classifier are statically known: altitude with
//! terms {low, medium, high} and speed with terms {slow, normal, fast}. The
//! terms are enums rather than string keys, so the 3x3 combination space is
//! exhaustive at compile time and needs no key parsing.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AeroResult, AerofuzzError};
use crate::membership::{FuzzyValue, MembershipCurve, Trapezoid};
use crate::universe::Universe;

/// A term of a linguistic variable: a fixed, canonically ordered enumeration
/// with a stable name.
pub trait LinguisticTerm: Copy + Eq + std::hash::Hash + fmt::Display + 'static {
    /// All terms in canonical order
    fn all() -> &'static [Self];

    /// Stable lowercase name of the term
    fn name(&self) -> &'static str;
}

/// Altitude bands, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltitudeTerm {
    Low,
    Medium,
    High,
}

impl LinguisticTerm for AltitudeTerm {
    fn all() -> &'static [Self] {
        &[AltitudeTerm::Low, AltitudeTerm::Medium, AltitudeTerm::High]
    }

    fn name(&self) -> &'static str {
        match self {
            AltitudeTerm::Low => "low",
            AltitudeTerm::Medium => "medium",
            AltitudeTerm::High => "high",
        }
    }
}

impl fmt::Display for AltitudeTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AltitudeTerm {
    type Err = AerofuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AltitudeTerm::Low),
            "medium" => Ok(AltitudeTerm::Medium),
            "high" => Ok(AltitudeTerm::High),
            _ => Err(AerofuzzError::unknown_term("altitude", s)),
        }
    }
}

/// Speed bands, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTerm {
    Slow,
    Normal,
    Fast,
}

impl LinguisticTerm for SpeedTerm {
    fn all() -> &'static [Self] {
        &[SpeedTerm::Slow, SpeedTerm::Normal, SpeedTerm::Fast]
    }

    fn name(&self) -> &'static str {
        match self {
            SpeedTerm::Slow => "slow",
            SpeedTerm::Normal => "normal",
            SpeedTerm::Fast => "fast",
        }
    }
}

impl fmt::Display for SpeedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SpeedTerm {
    type Err = AerofuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(SpeedTerm::Slow),
            "normal" => Ok(SpeedTerm::Normal),
            "fast" => Ok(SpeedTerm::Fast),
            _ => Err(AerofuzzError::unknown_term("speed", s)),
        }
    }
}

/// A named universe plus a curve per term, built once and read-only after.
///
/// Term iteration follows the canonical term order, so every downstream
/// consumer (fuzzification, the intersection grid, rendering) is
/// reproducible for a fixed input.
#[derive(Debug, Clone)]
pub struct LinguisticVariable<T: LinguisticTerm> {
    name: String,
    universe: Universe,
    terms: IndexMap<T, MembershipCurve>,
}

impl<T: LinguisticTerm> LinguisticVariable<T> {
    /// Build a variable from a universe and one trapezoid per term.
    ///
    /// `shapes` must supply every term exactly once; the curves are sampled
    /// over the universe here and never touched again.
    pub fn build(
        name: impl Into<String>,
        universe: Universe,
        shapes: impl Fn(T) -> Trapezoid,
    ) -> Self {
        let terms = T::all()
            .iter()
            .map(|&term| (term, shapes(term).sample(&universe)))
            .collect();
        Self {
            name: name.into(),
            universe,
            terms,
        }
    }

    /// Variable name ("altitude", "speed")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning universe
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The sampled curve for a term
    pub fn curve(&self, term: T) -> &MembershipCurve {
        &self.terms[&term]
    }

    /// Interpolated membership degree of `value` in `term`
    pub fn membership_at(&self, term: T, value: f64) -> FuzzyValue {
        self.curve(term).membership_at(value)
    }

    /// Degrees for all terms at `value`, in canonical term order
    pub fn fuzzify(&self, value: f64) -> IndexMap<T, FuzzyValue> {
        self.terms
            .iter()
            .map(|(&term, curve)| (term, curve.membership_at(value)))
            .collect()
    }

    /// Iterate terms and curves in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (T, &MembershipCurve)> {
        self.terms.iter().map(|(&t, c)| (t, c))
    }
}

/// The built-in altitude variable: 0-15000 m sampled every 100 m.
pub fn builtin_altitude() -> AeroResult<LinguisticVariable<AltitudeTerm>> {
    let universe = Universe::build(0.0, 15000.0, 100.0)?;
    let low = Trapezoid::new(0.0, 0.0, 2000.0, 4000.0)?;
    let medium = Trapezoid::new(2000.0, 4000.0, 6000.0, 8000.0)?;
    let high = Trapezoid::new(6000.0, 8000.0, 15000.0, 15000.0)?;

    Ok(LinguisticVariable::build("altitude", universe, move |t| {
        match t {
            AltitudeTerm::Low => low,
            AltitudeTerm::Medium => medium,
            AltitudeTerm::High => high,
        }
    }))
}

/// The built-in speed variable: 0-1200 km/h sampled every 10 km/h.
pub fn builtin_speed() -> AeroResult<LinguisticVariable<SpeedTerm>> {
    let universe = Universe::build(0.0, 1200.0, 10.0)?;
    let slow = Trapezoid::new(0.0, 0.0, 300.0, 500.0)?;
    let normal = Trapezoid::new(300.0, 500.0, 700.0, 900.0)?;
    let fast = Trapezoid::new(700.0, 900.0, 1200.0, 1200.0)?;

    Ok(LinguisticVariable::build("speed", universe, move |t| {
        match t {
            SpeedTerm::Slow => slow,
            SpeedTerm::Normal => normal,
            SpeedTerm::Fast => fast,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_term_canonical_order() {
        let alt: Vec<&str> = AltitudeTerm::all().iter().map(|t| t.name()).collect();
        assert_eq!(alt, vec!["low", "medium", "high"]);

        let spd: Vec<&str> = SpeedTerm::all().iter().map(|t| t.name()).collect();
        assert_eq!(spd, vec!["slow", "normal", "fast"]);
    }

    #[test]
    fn test_term_from_str() {
        assert_eq!("medium".parse::<AltitudeTerm>().unwrap(), AltitudeTerm::Medium);
        assert_eq!("fast".parse::<SpeedTerm>().unwrap(), SpeedTerm::Fast);
        assert!("warp".parse::<SpeedTerm>().is_err());
    }

    #[test]
    fn test_term_serde_roundtrip() {
        let json = serde_json::to_string(&AltitudeTerm::High).unwrap();
        assert_eq!(json, "\"high\"");
        let back: AltitudeTerm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AltitudeTerm::High);
    }

    #[test]
    fn test_builtin_altitude() {
        let alt = builtin_altitude().unwrap();
        assert_eq!(alt.name(), "altitude");
        assert_eq!(alt.universe().len(), 151);

        assert!(close(alt.membership_at(AltitudeTerm::Low, 0.0).value(), 1.0));
        assert!(close(alt.membership_at(AltitudeTerm::Low, 3000.0).value(), 0.5));
        assert!(close(alt.membership_at(AltitudeTerm::Medium, 3000.0).value(), 0.5));
        assert!(close(alt.membership_at(AltitudeTerm::Medium, 5000.0).value(), 1.0));
        assert!(close(alt.membership_at(AltitudeTerm::High, 15000.0).value(), 1.0));
        assert!(close(alt.membership_at(AltitudeTerm::High, 3000.0).value(), 0.0));
    }

    #[test]
    fn test_builtin_speed() {
        let spd = builtin_speed().unwrap();
        assert_eq!(spd.universe().len(), 121);

        assert!(close(spd.membership_at(SpeedTerm::Slow, 0.0).value(), 1.0));
        assert!(close(spd.membership_at(SpeedTerm::Slow, 400.0).value(), 0.5));
        assert!(close(spd.membership_at(SpeedTerm::Normal, 400.0).value(), 0.5));
        assert!(close(spd.membership_at(SpeedTerm::Fast, 1200.0).value(), 1.0));
    }

    #[test]
    fn test_fuzzify_order_and_values() {
        let alt = builtin_altitude().unwrap();
        let degrees = alt.fuzzify(3000.0);

        let keys: Vec<AltitudeTerm> = degrees.keys().copied().collect();
        assert_eq!(keys, vec![AltitudeTerm::Low, AltitudeTerm::Medium, AltitudeTerm::High]);
        assert!(close(degrees[&AltitudeTerm::Low].value(), 0.5));
        assert!(close(degrees[&AltitudeTerm::Medium].value(), 0.5));
        assert!(close(degrees[&AltitudeTerm::High].value(), 0.0));
    }

    #[test]
    fn test_fuzzify_below_universe_clamps() {
        let alt = builtin_altitude().unwrap();
        let degrees = alt.fuzzify(-500.0);

        assert!(close(degrees[&AltitudeTerm::Low].value(), 1.0));
        assert!(close(degrees[&AltitudeTerm::Medium].value(), 0.0));
        assert!(close(degrees[&AltitudeTerm::High].value(), 0.0));
    }
}
