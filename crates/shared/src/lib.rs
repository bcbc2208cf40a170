//! Shared types, errors, and configuration for Tellerpoint.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types with HTTP mappings
//! - Supervisor approval token service (signed, request-bound)
//! - Teller context threaded explicitly through the posting engine
//! - Configuration management

pub mod approval;
pub mod config;
pub mod error;
pub mod types;

pub use approval::{ApprovalClaims, ApprovalTokenConfig, ApprovalTokenError, ApprovalTokenService};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::TellerContext;
