//! Shared error type across solaris-exporter crates.

use thiserror::Error;

/// Stable error codes, each tied to the HTTP status the server answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Caller is not the allowed origin.
    Forbidden,
    /// An OS sampling call failed.
    CollectionFailed,
    /// Configuration could not be parsed or validated.
    InvalidConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::CollectionFailed => "COLLECTION_FAILED",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status code for this class of failure.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::Forbidden => 403,
            ErrorCode::CollectionFailed | ErrorCode::Internal => 500,
            // Startup-only errors; never reach a response in practice.
            ErrorCode::InvalidConfig | ErrorCode::UnsupportedVersion => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("access denied for {0}")]
    AccessDenied(String),
    #[error("collection failed: {0}")]
    Collection(String),
    #[error("duplicate metric family in one scrape: {0}")]
    DuplicateFamily(String),
    #[error("invalid metric or label name: {0}")]
    InvalidName(String),
    #[error("label mismatch in {family}: expected {expected} values, got {got}")]
    LabelMismatch {
        family: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    /// Map internal error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExporterError::AccessDenied(_) => ErrorCode::Forbidden,
            ExporterError::Collection(_) => ErrorCode::CollectionFailed,
            ExporterError::DuplicateFamily(_)
            | ExporterError::InvalidName(_)
            | ExporterError::LabelMismatch { .. }
            | ExporterError::Internal(_) => ErrorCode::Internal,
            ExporterError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            ExporterError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
        }
    }
}
