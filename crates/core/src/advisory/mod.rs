//! Compliance advisory gate.
//!
//! Advisories are compliance annotations on a party or account. Before a
//! posting touches the ledger, every active advisory attached to the
//! affected scopes is evaluated in severity order:
//!
//! - `restriction` blocks unconditionally (fails closed)
//! - `requires_acknowledgment` blocks unless acknowledged in-request or a
//!   prior acknowledgment by the same user is newer than the advisory's
//!   last edit
//! - lower severities never block
//!
//! # Modules
//!
//! - `types` - Advisory and acknowledgment domain types
//! - `gate` - The evaluation logic

pub mod gate;
pub mod types;

pub use gate::{AdvisoryDecision, BlockReason, evaluate, is_active};
pub use types::{Acknowledgment, Advisory, AdvisorySeverity};
