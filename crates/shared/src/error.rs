//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure the posting pipeline can surface to a caller maps onto one
/// of these variants; nothing is persisted for any of the 4xx variants.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// A compliance advisory blocks the posting.
    #[error("Posting blocked by advisory: {0}")]
    ComplianceBlocked(String),

    /// Supervisor approval is required but no token was supplied.
    #[error("Supervisor approval is required for this amount")]
    ApprovalRequired,

    /// Supervisor approval token failed verification.
    #[error("Approval token rejected: {0}")]
    ApprovalInvalid(String),

    /// A posting with this request id has already been submitted.
    #[error("Request {0} was already submitted; query it by request_id instead of retrying")]
    DuplicateRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::ComplianceBlocked(_) | Self::ApprovalRequired | Self::ApprovalInvalid(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::DuplicateRequest(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::ComplianceBlocked(_) => "COMPLIANCE_BLOCKED",
            Self::ApprovalRequired => "APPROVAL_REQUIRED",
            Self::ApprovalInvalid(_) => "APPROVAL_INVALID",
            Self::DuplicateRequest(_) => "DUPLICATE_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
