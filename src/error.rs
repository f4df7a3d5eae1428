//! Error types for tree-morph.
//!
//! Generation and interpolation are pure numeric code and cannot fail. The
//! only fallible step is validating a [`TreeConfig`](crate::TreeConfig)
//! before any buffer is generated.

use std::fmt;

/// Errors reported by [`TreeConfig::validate`](crate::TreeConfig::validate).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero or negative.
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A value was NaN or infinite.
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A value that must be zero or greater was negative.
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A scatter shell whose radii are out of order or negative.
    InvalidShell {
        /// Group the shell belongs to.
        group: &'static str,
        /// Inner radius.
        inner: f32,
        /// Outer radius.
        outer: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "`{}` must be greater than zero, got {}", field, value)
            }
            ConfigError::NotFinite { field } => write!(f, "`{}` must be a finite number", field),
            ConfigError::Negative { field, value } => {
                write!(f, "`{}` must not be negative, got {}", field, value)
            }
            ConfigError::InvalidShell { group, inner, outer } => write!(
                f,
                "{} scatter shell needs 0 <= inner <= outer, got inner {} and outer {}",
                group, inner, outer
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = ConfigError::NonPositive { field: "height", value: 0.0 };
        assert!(err.to_string().contains("height"));

        let err = ConfigError::InvalidShell { group: "ribbon", inner: 5.0, outer: 2.0 };
        let msg = err.to_string();
        assert!(msg.starts_with("ribbon"));
        assert!(msg.contains("inner 5"));
    }
}
