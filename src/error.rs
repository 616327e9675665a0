//! Error types for trueno-map operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a map document.
///
/// Adding primitives to a plotter never fails; errors only arise from grid
/// configuration, geocoding, document configuration, and the output sink.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Grid specification that cannot be expanded into lines.
    #[error("invalid grid on {axis} axis: {message}")]
    InvalidGrid {
        /// Axis that failed validation ("latitude" or "longitude").
        axis: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// Geocode lookup produced no usable location.
    #[error("geocode lookup failed: {0}")]
    Lookup(String),

    /// Document configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Document configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_grid_display() {
        let err = Error::InvalidGrid {
            axis: "latitude",
            message: "step must be non-zero".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("latitude"));
        assert!(msg.contains("non-zero"));
    }

    #[test]
    fn test_lookup_display() {
        let err = Error::Lookup("no results for 'Atlantis'".to_string());
        assert!(err.to_string().starts_with("geocode lookup failed"));
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_config_parse_display() {
        let err = Error::ConfigParse {
            line: 3,
            message: "bad value".to_string(),
        };
        assert_eq!(err.to_string(), "configuration error at line 3: bad value");
    }
}
