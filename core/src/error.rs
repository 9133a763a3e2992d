use std::fmt;
use thiserror::Error;

/// The error type for s3presign operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input could not be resolved into a bucket and key
    ReferenceInvalid,

    /// Verb token is not one of the presignable methods
    MethodUnsupported,

    /// Expiry is zero or outside what the signer accepts
    ExpiryInvalid,

    /// Signer configuration error (bad endpoint, unparsable profile, etc.)
    ConfigInvalid,

    /// The signing collaborator failed (credentials, network, rejected input)
    SigningFailed,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error was raised before anything was delegated to the signer.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ReferenceInvalid | ErrorKind::MethodUnsupported | ErrorKind::ExpiryInvalid
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a reference invalid error, echoing the offending input.
    pub fn reference_invalid(input: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::ReferenceInvalid,
            format!("invalid object-store reference: {input}"),
        )
    }

    /// Create a method unsupported error, echoing the offending token.
    pub fn method_unsupported(token: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::MethodUnsupported,
            format!("unsupported method: {token}"),
        )
    }

    /// Create an expiry invalid error
    pub fn expiry_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExpiryInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a signing failed error
    pub fn signing_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SigningFailed, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ReferenceInvalid => write!(f, "invalid reference"),
            ErrorKind::MethodUnsupported => write!(f, "unsupported method"),
            ErrorKind::ExpiryInvalid => write!(f, "invalid expiry"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::SigningFailed => write!(f, "signing failed"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::signing_failed(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_reference_invalid_echoes_input() {
        let err = Error::reference_invalid("ftp://example.com/a");
        assert_eq!(err.kind(), ErrorKind::ReferenceInvalid);
        assert_eq!(
            err.to_string(),
            "invalid object-store reference: ftp://example.com/a"
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_signing_failed_keeps_source() {
        let err = Error::signing_failed("no valid credential found")
            .with_source(anyhow::anyhow!("imds unreachable"));
        assert_eq!(err.kind(), ErrorKind::SigningFailed);
        assert!(!err.is_input_error());
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some("imds unreachable".to_string())
        );
    }
}
