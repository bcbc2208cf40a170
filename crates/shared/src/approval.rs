//! Supervisor approval token generation and verification.
//!
//! An approval token is a tamper-evident signed payload binding a posting
//! `request_id` to the supervisor who approved it. Verification fails closed:
//! a bad signature, an expired token, or a token minted for a different
//! request all reject the posting.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Approval token configuration.
#[derive(Debug, Clone)]
pub struct ApprovalTokenConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration in minutes.
    pub token_expires_minutes: i64,
}

impl Default for ApprovalTokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            token_expires_minutes: 15,
        }
    }
}

/// Claims embedded in an approval token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalClaims {
    /// Subject (supervisor user ID).
    pub sub: Uuid,
    /// The posting request this approval is bound to.
    pub rid: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl ApprovalClaims {
    /// Creates claims binding a supervisor to a posting request.
    #[must_use]
    pub fn new(supervisor_user_id: Uuid, request_id: &str, expires_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: supervisor_user_id,
            rid: request_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expires_minutes)).timestamp(),
        }
    }
}

/// Errors that can occur during approval token operations.
#[derive(Debug, Error)]
pub enum ApprovalTokenError {
    /// Token encoding failed.
    #[error("failed to encode approval token: {0}")]
    EncodingError(String),

    /// Token has expired.
    #[error("approval token has expired")]
    Expired,

    /// Token is malformed or the signature does not verify.
    #[error("invalid approval token")]
    Invalid,

    /// Token was minted for a different request.
    #[error("approval token was issued for request {token_request_id}, not {request_id}")]
    RequestMismatch {
        /// The request id embedded in the token.
        token_request_id: String,
        /// The request id of the current posting.
        request_id: String,
    },
}

/// Approval token service for signing and verification.
#[derive(Clone)]
pub struct ApprovalTokenService {
    config: ApprovalTokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for ApprovalTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalTokenService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl ApprovalTokenService {
    /// Creates a new approval token service with the given configuration.
    #[must_use]
    pub fn new(config: ApprovalTokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues an approval token for a specific posting request.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalTokenError::EncodingError` if token generation fails.
    pub fn issue(
        &self,
        supervisor_user_id: Uuid,
        request_id: &str,
    ) -> Result<String, ApprovalTokenError> {
        let claims = ApprovalClaims::new(
            supervisor_user_id,
            request_id,
            self.config.token_expires_minutes,
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApprovalTokenError::EncodingError(e.to_string()))
    }

    /// Verifies a token against the current posting request.
    ///
    /// Returns the supervisor user id on success.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalTokenError::Expired` if the token has expired.
    /// Returns `ApprovalTokenError::Invalid` if the token is malformed or the
    /// signature does not verify.
    /// Returns `ApprovalTokenError::RequestMismatch` if the embedded request
    /// id differs from `request_id`.
    pub fn verify(&self, token: &str, request_id: &str) -> Result<Uuid, ApprovalTokenError> {
        let validation = Validation::default();

        let claims = decode::<ApprovalClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApprovalTokenError::Expired,
                _ => ApprovalTokenError::Invalid,
            })?;

        if claims.rid != request_id {
            return Err(ApprovalTokenError::RequestMismatch {
                token_request_id: claims.rid,
                request_id: request_id.to_string(),
            });
        }

        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> ApprovalTokenService {
        ApprovalTokenService::new(ApprovalTokenConfig {
            secret: "test-secret-key-for-testing".to_string(),
            token_expires_minutes: 15,
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_test_service();
        let supervisor = Uuid::new_v4();

        let token = service.issue(supervisor, "req-1").unwrap();
        let verified = service.verify(&token, "req-1").unwrap();
        assert_eq!(verified, supervisor);
    }

    #[test]
    fn test_request_mismatch_rejected() {
        let service = create_test_service();
        let token = service.issue(Uuid::new_v4(), "req-1").unwrap();

        let result = service.verify(&token, "req-2");
        assert!(matches!(
            result,
            Err(ApprovalTokenError::RequestMismatch { .. })
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = create_test_service();
        let result = service.verify("not.a.token", "req-1");
        assert!(matches!(result, Err(ApprovalTokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = ApprovalTokenService::new(ApprovalTokenConfig {
            secret: "another-secret".to_string(),
            token_expires_minutes: 15,
        });

        let token = other.issue(Uuid::new_v4(), "req-1").unwrap();
        assert!(matches!(
            service.verify(&token, "req-1"),
            Err(ApprovalTokenError::Invalid)
        ));
    }
}
