//! Configuration error types.
//!
//! The simulation itself never fails; every numerical hazard is handled
//! locally and the next state is always valid. Loading and validating
//! [`Settings`](crate::Settings) is the only fallible surface.

use std::fmt;

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io(std::io::Error),

    /// The settings JSON was malformed or had the wrong shape.
    Parse(serde_json::Error),

    /// A quantity that must be strictly positive was zero or negative.
    NonPositive {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
    },

    /// A coefficient fell outside its allowed range.
    OutOfRange {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the allowed range.
        allowed: &'static str,
    },

    /// A lower bound exceeded its upper bound.
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {e}"),
            SettingsError::NonPositive { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            SettingsError::OutOfRange {
                name,
                value,
                allowed,
            } => write!(f, "{name} = {value} is outside {allowed}"),
            SettingsError::InvertedRange { name, min, max } => {
                write!(f, "{name} range is inverted ({min} > {max})")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
