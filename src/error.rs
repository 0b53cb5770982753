//! Structured Error Handling for aerofuzz
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Structured error values (JSON-friendly)
//! - Context preservation through error chains
//!
//! # Error Categories
//!
//! - Construction errors - malformed universe or trapezoid parameters
//! - Input errors - query values that cannot be used
//! - Config errors - configuration file issues
//!
//! Construction and config errors are fatal and abort startup; input errors
//! are caught at the prompt and the user may retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use aerofuzz::error::{AerofuzzError, ErrorCode};
//!
//! fn check_step(step: f64) -> Result<(), AerofuzzError> {
//!     if step <= 0.0 {
//!         return Err(AerofuzzError::invalid_step(step)
//!             .with_context("variable", "altitude"));
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Construction errors (1xxx)
    /// Universe bounds are inverted or non-finite
    InvalidRange = 1000,
    /// Universe step is zero, negative, or non-finite
    InvalidStep = 1001,
    /// Trapezoid control points violate a <= b <= c <= d
    InvalidShape = 1002,

    // Input errors (2xxx)
    /// Input could not be parsed as a number
    NonNumericInput = 2000,
    /// Input parsed but is NaN or infinite
    NonFiniteInput = 2001,
    /// Empty input
    EmptyInput = 2002,

    // Config errors (3xxx)
    /// Generic config error
    ConfigError = 3000,
    /// Config file not found
    ConfigNotFound = 3001,
    /// Invalid config syntax
    InvalidConfigSyntax = 3002,
    /// Invalid config value
    InvalidConfigValue = 3003,
    /// Unknown linguistic term name
    UnknownTerm = 3004,

    // Internal errors (9xxx)
    /// Internal error
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRange => "Invalid universe range",
            ErrorCode::InvalidStep => "Invalid universe step",
            ErrorCode::InvalidShape => "Invalid trapezoid shape",
            ErrorCode::NonNumericInput => "Non-numeric input",
            ErrorCode::NonFiniteInput => "Non-finite input",
            ErrorCode::EmptyInput => "Empty input",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ConfigNotFound => "Configuration file not found",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
            ErrorCode::InvalidConfigValue => "Invalid configuration value",
            ErrorCode::UnknownTerm => "Unknown linguistic term",
            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Whether the user can retry after this error (input errors) or the
    /// process should abort (everything else)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NonNumericInput | ErrorCode::NonFiniteInput | ErrorCode::EmptyInput
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Additional context information for an error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Key-value pairs of context information
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
    /// Stack of error causes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to the context
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a cause to the error chain
    pub fn cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for aerofuzz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AerofuzzError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl AerofuzzError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for common error types
    // ========================================================================

    /// Create an invalid-range error
    pub fn invalid_range(min: f64, max: f64) -> Self {
        Self::new(
            ErrorCode::InvalidRange,
            format!("Universe range [{}, {}] is not a valid interval", min, max),
        )
    }

    /// Create an invalid-step error
    pub fn invalid_step(step: f64) -> Self {
        Self::new(
            ErrorCode::InvalidStep,
            format!("Universe step {} must be finite and positive", step),
        )
    }

    /// Create an invalid-shape error
    pub fn invalid_shape(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(
            ErrorCode::InvalidShape,
            format!(
                "Trapezoid [{}, {}, {}, {}] must satisfy a <= b <= c <= d with finite points",
                a, b, c, d
            ),
        )
    }

    /// Create a non-numeric input error
    pub fn non_numeric(input: &str) -> Self {
        Self::new(
            ErrorCode::NonNumericInput,
            format!("'{}' is not a valid number", input.trim()),
        )
        .with_hint("Enter a plain decimal value, e.g. 3000 or 450.5")
    }

    /// Create a non-finite input error
    pub fn non_finite(field: &str, value: f64) -> Self {
        Self::new(
            ErrorCode::NonFiniteInput,
            format!("{} must be a finite number, got {}", field, value),
        )
    }

    /// Create an empty input error
    pub fn empty_input(field: &str) -> Self {
        Self::new(ErrorCode::EmptyInput, format!("{} cannot be empty", field))
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Create an unknown-term error
    pub fn unknown_term(variable: &str, term: &str) -> Self {
        Self::new(
            ErrorCode::UnknownTerm,
            format!("Unknown term '{}' for variable '{}'", term, variable),
        )
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.fields.insert(key.into(), value.into());
        self
    }

    /// Add a cause to the error chain
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.causes.push(cause.into());
        self
    }

    /// Add a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Whether the user can retry after this error
    pub fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":"INTERNAL_ERROR","message":"{}"}}"#, self.message)
        })
    }
}

impl fmt::Display for AerofuzzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if let Some(ref ctx) = self.context {
            for (key, value) in &ctx.fields {
                write!(f, " ({}={})", key, value)?;
            }
            if !ctx.causes.is_empty() {
                write!(f, "\nCaused by:")?;
                for cause in &ctx.causes {
                    write!(f, "\n  - {}", cause)?;
                }
            }
        }

        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for AerofuzzError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<std::io::Error> for AerofuzzError {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::ConfigNotFound,
            _ => ErrorCode::InternalError,
        };
        AerofuzzError::new(code, err.to_string())
    }
}

impl From<toml::de::Error> for AerofuzzError {
    fn from(err: toml::de::Error) -> Self {
        AerofuzzError::config(err.to_string()).with_code(ErrorCode::InvalidConfigSyntax)
    }
}

impl From<std::num::ParseFloatError> for AerofuzzError {
    fn from(err: std::num::ParseFloatError) -> Self {
        AerofuzzError::new(ErrorCode::NonNumericInput, err.to_string())
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// A Result type using AerofuzzError
pub type AeroResult<T> = Result<T, AerofuzzError>;

// ============================================================================
// Macros for convenient error creation
// ============================================================================

/// Bail out early with an error
#[macro_export]
macro_rules! aero_bail {
    ($err:expr) => {
        return Err($err)
    };
}

/// Ensure a condition holds, or return an error
#[macro_export]
macro_rules! aero_ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            $crate::aero_bail!($err);
        }
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AerofuzzError::invalid_step(-1.0);
        assert_eq!(err.code, ErrorCode::InvalidStep);
        assert!(err.message.contains("-1"));
    }

    #[test]
    fn test_error_with_context() {
        let err = AerofuzzError::invalid_shape(4.0, 3.0, 2.0, 1.0)
            .with_context("variable", "altitude")
            .with_context("term", "low");

        let ctx = err.context.as_ref().unwrap();
        assert_eq!(ctx.fields.get("variable"), Some(&"altitude".to_string()));
        assert_eq!(ctx.fields.get("term"), Some(&"low".to_string()));
    }

    #[test]
    fn test_error_with_cause() {
        let err = AerofuzzError::config("failed to load")
            .with_cause("file unreadable")
            .with_cause("permission denied");

        let ctx = err.context.as_ref().unwrap();
        assert_eq!(ctx.causes.len(), 2);
    }

    #[test]
    fn test_error_recoverable() {
        assert!(AerofuzzError::non_numeric("abc").is_recoverable());
        assert!(AerofuzzError::empty_input("altitude").is_recoverable());
        assert!(!AerofuzzError::invalid_step(0.0).is_recoverable());
        assert!(!AerofuzzError::config("bad").is_recoverable());
    }

    #[test]
    fn test_error_to_json() {
        let err = AerofuzzError::non_numeric("abc");
        let json = err.to_json();
        assert!(json.contains("NON_NUMERIC_INPUT"));
        assert!(json.contains("abc"));
    }

    #[test]
    fn test_error_display() {
        let err = AerofuzzError::invalid_range(10.0, 0.0)
            .with_cause("config override")
            .with_hint("min must not exceed max");

        let display = err.to_string();
        assert!(display.contains("[1000]"));
        assert!(display.contains("Caused by"));
        assert!(display.contains("min must not exceed max"));
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::InvalidShape.description(), "Invalid trapezoid shape");
        assert_eq!(ErrorCode::NonNumericInput.description(), "Non-numeric input");
    }

    #[test]
    fn test_from_parse_float_error() {
        let parse_err = "xyz".parse::<f64>().unwrap_err();
        let err: AerofuzzError = parse_err.into();
        assert_eq!(err.code, ErrorCode::NonNumericInput);
    }
}
