//! Configuration System for aerofuzz
//!
//! Provides a TOML-backed configuration with environment overrides. The
//! built-in variable definitions are the defaults; a config file can reshape
//! the universes and trapezoids, which is the only way construction-time
//! errors can occur in practice.
//!
//! # Configuration File Locations
//!
//! Searched in order (first found wins):
//! 1. `./aerofuzz.toml` - Project-local configuration
//! 2. `~/.config/aerofuzz/config.toml` - User configuration (XDG)
//! 3. `~/.aerofuzz.toml` - User configuration (legacy)
//!
//! # Environment Variables
//!
//! - `AEROFUZZ_FORMAT` - Output format (text, json)
//! - `AEROFUZZ_TNORM` - T-norm (min, product, lukasiewicz)
//! - `AEROFUZZ_PLOT` - Render membership plots (true/false)
//!
//! # Example Configuration
//!
//! ```toml
//! # aerofuzz.toml
//!
//! [general]
//! format = "text"
//! tnorm = "min"
//! plot = false
//!
//! [altitude]
//! min = 0.0
//! max = 15000.0
//! step = 100.0
//!
//! [altitude.terms]
//! low = [0.0, 0.0, 2000.0, 4000.0]
//! medium = [2000.0, 4000.0, 6000.0, 8000.0]
//! high = [6000.0, 8000.0, 15000.0, 15000.0]
//!
//! [speed]
//! min = 0.0
//! max = 1200.0
//! step = 10.0
//!
//! [speed.terms]
//! slow = [0.0, 0.0, 300.0, 500.0]
//! normal = [300.0, 500.0, 700.0, 900.0]
//! fast = [700.0, 900.0, 1200.0, 1200.0]
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::aero_ensure;
use crate::engine::{Classifier, TNorm};
use crate::error::{AeroResult, AerofuzzError, ErrorCode};
use crate::membership::Trapezoid;
use crate::universe::Universe;
use crate::variable::{AltitudeTerm, LinguisticTerm, LinguisticVariable, SpeedTerm};

// ============================================================================
// Configuration Schema
// ============================================================================

/// Main configuration structure
///
/// A variable section, when present, must be complete; omitted sections fall
/// back to the built-in definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AerofuzzConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Altitude variable definition
    #[serde(default = "VariableConfig::default_altitude")]
    pub altitude: VariableConfig,
    /// Speed variable definition
    #[serde(default = "VariableConfig::default_speed")]
    pub speed: VariableConfig,
}

impl Default for AerofuzzConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format
    pub format: OutputFormat,
    /// T-norm for the intersection
    pub tnorm: TNorm,
    /// Render membership plots after each classification
    pub plot: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            tnorm: TNorm::Min,
            plot: false,
        }
    }
}

/// Universe bounds plus one trapezoid per term
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// term name -> [a, b, c, d]
    pub terms: IndexMap<String, [f64; 4]>,
}

impl VariableConfig {
    fn default_altitude() -> Self {
        let mut terms = IndexMap::new();
        terms.insert("low".to_string(), [0.0, 0.0, 2000.0, 4000.0]);
        terms.insert("medium".to_string(), [2000.0, 4000.0, 6000.0, 8000.0]);
        terms.insert("high".to_string(), [6000.0, 8000.0, 15000.0, 15000.0]);
        Self {
            min: 0.0,
            max: 15000.0,
            step: 100.0,
            terms,
        }
    }

    fn default_speed() -> Self {
        let mut terms = IndexMap::new();
        terms.insert("slow".to_string(), [0.0, 0.0, 300.0, 500.0]);
        terms.insert("normal".to_string(), [300.0, 500.0, 700.0, 900.0]);
        terms.insert("fast".to_string(), [700.0, 900.0, 1200.0, 1200.0]);
        Self {
            min: 0.0,
            max: 1200.0,
            step: 10.0,
            terms,
        }
    }

    /// Resolve the configured trapezoids against a term enumeration.
    ///
    /// Every configured name must be a known term and every term must be
    /// configured.
    fn trapezoids<T>(&self, variable: &str) -> AeroResult<IndexMap<T, Trapezoid>>
    where
        T: LinguisticTerm + FromStr<Err = AerofuzzError>,
    {
        let mut shapes: IndexMap<T, Trapezoid> = IndexMap::new();
        for (name, points) in &self.terms {
            let term: T = name.parse()?;
            let shape = Trapezoid::from_points(*points)
                .map_err(|e| e.with_context("variable", variable).with_context("term", name))?;
            shapes.insert(term, shape);
        }
        for &term in T::all() {
            aero_ensure!(
                shapes.contains_key(&term),
                AerofuzzError::new(
                    ErrorCode::InvalidConfigValue,
                    format!("variable '{}' is missing term '{}'", variable, term),
                )
            );
        }
        Ok(shapes)
    }

    /// Build the linguistic variable this config describes.
    pub fn build_variable<T>(&self, name: &str) -> AeroResult<LinguisticVariable<T>>
    where
        T: LinguisticTerm + FromStr<Err = AerofuzzError>,
    {
        let universe = Universe::build(self.min, self.max, self.step)
            .map_err(|e| e.with_context("variable", name))?;
        let shapes = self.trapezoids::<T>(name)?;
        Ok(LinguisticVariable::build(name, universe, move |t| shapes[&t]))
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = AerofuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(AerofuzzError::new(
                ErrorCode::InvalidConfigValue,
                format!("unknown output format '{}'", s),
            )
            .with_hint("Available formats: text, json")),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl AerofuzzConfig {
    /// The default configuration: built-in definitions, text output, min.
    pub fn builtin() -> Self {
        Self {
            general: GeneralConfig::default(),
            altitude: VariableConfig::default_altitude(),
            speed: VariableConfig::default_speed(),
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> AeroResult<Self> {
        let config: AerofuzzConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from an explicit path.
    pub fn from_file(path: &Path) -> AeroResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AerofuzzError::from(e).with_context("path", path.display().to_string())
        })?;
        Self::from_toml(&content)
    }

    /// Candidate config file locations, in priority order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("aerofuzz.toml")];
        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(&home).join(".config/aerofuzz/config.toml"));
            paths.push(PathBuf::from(&home).join(".aerofuzz.toml"));
        }
        paths
    }

    /// Load configuration: explicit path if given, otherwise the first file
    /// found on the search path, otherwise built-in defaults. Environment
    /// overrides apply last.
    pub fn load(explicit: Option<&Path>) -> AeroResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let found = Self::search_paths().into_iter().find(|p| p.exists());
                match found {
                    Some(path) => Self::from_file(&path)?,
                    None => Self::builtin(),
                }
            }
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) -> AeroResult<()> {
        if let Ok(format) = env::var("AEROFUZZ_FORMAT") {
            self.general.format = format.parse()?;
        }
        if let Ok(tnorm) = env::var("AEROFUZZ_TNORM") {
            self.general.tnorm = tnorm.parse()?;
        }
        if let Ok(plot) = env::var("AEROFUZZ_PLOT") {
            self.general.plot = matches!(plot.as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Construct the classifier this configuration describes.
    ///
    /// Any malformed universe or trapezoid surfaces its construction error
    /// here; callers treat that as fatal at startup.
    pub fn build_classifier(&self) -> AeroResult<Classifier> {
        let altitude = self.altitude.build_variable::<AltitudeTerm>("altitude")?;
        let speed = self.speed.build_variable::<SpeedTerm>("speed")?;
        Ok(Classifier::new(altitude, speed, self.general.tnorm))
    }
}
