//! Error types for the proforma generator.

use thiserror::Error;

/// Errors produced while generating or serializing a proforma machine.
///
/// None of these are recoverable inside the library: every component
/// propagates them unchanged, and the caller is expected to report the
/// failure and abandon the generation run. Entropy and sink failures are
/// not retried; the user re-invokes the tool instead.
#[derive(Debug, Error)]
pub enum ProformaError {
    /// The underlying randomness source failed to produce bytes.
    #[error("entropy source failed: {0}")]
    Entropy(String),
    /// A builder was driven outside its contract, such as a non-positive
    /// bound or an exhausted candidate pool.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The keyed random source was requested without a secret.
    #[error("a secret is required to seed the keyed random source")]
    MissingSecret,
    /// The output sink could not be written.
    #[error("output sink error: {0}")]
    Sink(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_entropy() {
        let err = ProformaError::Entropy("os entropy pool unavailable".into());
        assert_eq!(
            format!("{}", err),
            "entropy source failed: os entropy pool unavailable"
        );
    }

    #[test]
    fn test_display_invalid_argument() {
        let err = ProformaError::InvalidArgument("bound must be positive".into());
        assert_eq!(format!("{}", err), "invalid argument: bound must be positive");
    }

    #[test]
    fn test_display_missing_secret() {
        let err = ProformaError::MissingSecret;
        assert_eq!(
            format!("{}", err),
            "a secret is required to seed the keyed random source"
        );
    }

    #[test]
    fn test_sink_wraps_io_error() {
        let io_err = std::io::Error::other("disk full");
        let err = ProformaError::from(io_err);
        assert!(matches!(err, ProformaError::Sink(_)));
        assert_eq!(format!("{}", err), "output sink error: disk full");
    }

    #[test]
    fn test_sink_has_source() {
        use std::error::Error;

        let io_err = std::io::Error::other("disk full");
        let err = ProformaError::from(io_err);
        assert!(err.source().is_some());
        assert!(ProformaError::MissingSecret.source().is_none());
    }
}
