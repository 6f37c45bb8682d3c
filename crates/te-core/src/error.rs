//! Error types for taueval

use thiserror::Error;

/// taueval error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error (bad inputs, mismatched shapes)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A distribution carries no total weight, so efficiencies cannot be
    /// normalised. The totals are reported for diagnostics.
    #[error(
        "empty input: total signal weight {total_signal}, total background weight {total_background}"
    )]
    EmptyInput {
        /// Sum of all signal bin weights, under/overflow included.
        total_signal: f64,
        /// Sum of all background bin weights, under/overflow included.
        total_background: f64,
    },

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias for taueval operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_reports_totals() {
        let err = Error::EmptyInput {
            total_signal: 0.0,
            total_background: 12.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("0"));
        assert!(msg.contains("12.5"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
