//! aerofuzz - Fuzzy altitude/speed band classifier
//!
//! Classifies an (altitude, speed) pair into nine linguistic categories
//! (three altitude bands x three speed bands) using fuzzy-set membership and
//! a min-based intersection, reporting the degree for every category and the
//! best-matching subset.
//!
//! # Architecture
//!
//! The crate is layered leaf-first:
//!
//! - [`universe::Universe`] - evenly spaced discretization of a bounded range
//! - [`membership::Trapezoid`] / [`membership::MembershipCurve`] - the
//!   analytic shape and its frozen sampling over a universe
//! - [`variable::LinguisticVariable`] - a universe plus one curve per term,
//!   keyed by the [`variable::AltitudeTerm`] / [`variable::SpeedTerm`] enums
//! - [`engine::Classifier`] - the two variables plus a [`engine::TNorm`],
//!   producing a 3x3 [`engine::IntersectionGrid`] per query
//! - [`render`] - degree table, JSON report, ASCII membership plots
//! - [`config`] - TOML definitions with environment overrides
//!
//! The classifier is built once at startup and is read-only afterwards; each
//! query is a pure function of its two inputs and that immutable state.
//!
//! # Example
//!
//! ```rust,ignore
//! use aerofuzz::{Classifier, AltitudeTerm, SpeedTerm};
//!
//! let classifier = Classifier::builtin()?;
//! let grid = classifier.classify(3000.0, 400.0)?;
//!
//! for (alt, speed, degree) in grid.iter() {
//!     println!("{} & {}: {}", alt, speed, degree);
//! }
//! for (alt, speed) in grid.best_matches() {
//!     println!("best: {} & {}", alt, speed);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod membership;
pub mod render;
pub mod universe;
pub mod variable;

// Re-export core types
pub use engine::{Classifier, IntersectionGrid, TNorm};
pub use membership::{FuzzyValue, MembershipCurve, Trapezoid};
pub use universe::Universe;
pub use variable::{
    builtin_altitude, builtin_speed, AltitudeTerm, LinguisticTerm, LinguisticVariable, SpeedTerm,
};

// Re-export rendering types
pub use render::{format_table, plot_variable, ClassificationReport, Combination};

// Re-export configuration types
pub use config::{AerofuzzConfig, GeneralConfig, OutputFormat, VariableConfig};

// Re-export error types
pub use error::{AeroResult, AerofuzzError, ErrorCode, ErrorContext};
