//! Error types for physdemo.
//!
//! Infrastructure failures (configuration, control wiring, animation threads)
//! are reported through [`DemoError`]. Domain-invalid physics input is not an
//! error at this level: models surface it as
//! [`Outcome::Invalid`](crate::demos::Outcome) from `calculate()`, and the pure
//! formulas in [`crate::domains`] return [`PhysicsError`].

use thiserror::Error;

/// Result type alias for physdemo operations.
pub type DemoResult<T> = Result<T, DemoError>;

/// Unified error type for the reactive framework, configuration and CLI.
#[derive(Debug, Error)]
pub enum DemoError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Control Errors =====
    /// No changeable with the given name exists in the model.
    #[error("Unknown control '{name}'")]
    UnknownControl {
        /// Name that was looked up.
        name: String,
    },

    /// A control received an input of the wrong kind.
    #[error("Control '{name}' expects {expected}, got {got}")]
    ControlMismatch {
        /// Control name.
        name: String,
        /// Input kind the control accepts.
        expected: &'static str,
        /// Input kind that was supplied.
        got: &'static str,
    },

    /// A selector received an option it does not offer.
    #[error("Control '{name}' has no option '{option}'")]
    UnknownOption {
        /// Control name.
        name: String,
        /// Rejected option.
        option: String,
    },

    /// Arithmetic between variables with different units.
    #[error("Unit mismatch: [{left}] vs [{right}]")]
    UnitMismatch {
        /// Unit of the left operand.
        left: String,
        /// Unit of the right operand.
        right: String,
    },

    // ===== Runtime Errors =====
    /// Animation task could not be started.
    #[error("Animation error: {0}")]
    Animation(String),

    /// Unknown demo name.
    #[error("Unknown demo '{0}'")]
    UnknownDemo(String),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown-control error.
    #[must_use]
    pub fn unknown_control(name: impl Into<String>) -> Self {
        Self::UnknownControl { name: name.into() }
    }

    /// Create an animation error.
    #[must_use]
    pub fn animation(message: impl Into<String>) -> Self {
        Self::Animation(message.into())
    }

    /// Check if this error stems from user-provided configuration.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::YamlParse(_) | Self::Validation(_)
        )
    }
}

/// Errors raised by the closed-form physics formulas.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A quantity that must be strictly positive was not.
    #[error("{quantity} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// Supplied value.
        value: f64,
    },

    /// A formula produced NaN or infinity.
    #[error("non-finite result in {0}")]
    NonFinite(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DemoError::config("step must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: step must be positive"
        );

        let err = DemoError::ControlMismatch {
            name: "d1".to_string(),
            expected: "float",
            got: "select",
        };
        assert_eq!(err.to_string(), "Control 'd1' expects float, got select");

        let err = DemoError::UnitMismatch {
            left: "m".to_string(),
            right: "s".to_string(),
        };
        assert!(err.to_string().contains("[m] vs [s]"));
    }

    #[test]
    fn test_is_config_error() {
        assert!(DemoError::config("x").is_config_error());
        assert!(!DemoError::unknown_control("u1").is_config_error());
        assert!(!DemoError::animation("spawn").is_config_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DemoError = io.into();
        assert!(matches!(err, DemoError::Io(_)));
    }

    #[test]
    fn test_physics_error_display() {
        let err = PhysicsError::NonPositive {
            quantity: "hole diameter",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "hole diameter must be positive, got 0");
    }
}
