//! Error types for rebar.

use thiserror::Error;

/// Result type alias for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregationError>;

/// Errors raised while configuring an aggregator or validating its input.
///
/// Every variant is produced before any output bar is emitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    /// A constructor argument is missing, non-finite or out of range.
    #[error("Invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Bars are not uniformly spaced or not contiguous.
    #[error("Inconsistent input at bar {index}: {reason}")]
    InconsistentInput {
        /// Position of the first bar breaking the requirement.
        index: usize,
        /// Description of the mismatch.
        reason: String,
    },

    /// A bar lacks a value the strategy needs.
    #[error("Malformed bar at index {index}: {reason}")]
    MalformedBar {
        /// Position of the bar in the input.
        index: usize,
        /// Which value is missing.
        reason: String,
    },
}

impl AggregationError {
    /// Builds an [`AggregationError::InvalidParameter`].
    pub fn invalid_parameter(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// Builds an [`AggregationError::InconsistentInput`].
    pub fn inconsistent_input(index: usize, reason: impl Into<String>) -> Self {
        Self::InconsistentInput {
            index,
            reason: reason.into(),
        }
    }

    /// Builds an [`AggregationError::MalformedBar`].
    pub fn malformed_bar(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedBar {
            index,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AggregationError::invalid_parameter("threshold", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `threshold`: must be positive"
        );

        let err = AggregationError::inconsistent_input(3, "gap of 60s");
        assert_eq!(err.to_string(), "Inconsistent input at bar 3: gap of 60s");

        let err = AggregationError::malformed_bar(0, "missing close");
        assert_eq!(err.to_string(), "Malformed bar at index 0: missing close");
    }
}
