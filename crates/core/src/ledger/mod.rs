//! Posting legs and the double-entry balance invariant.
//!
//! This module implements the core ledger representation:
//! - Ledger legs (debits and credits against opaque account references)
//! - Balance validation (every committed batch must balance exactly)

pub mod leg;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use leg::{LegInput, LegSide};
pub use validation::{LedgerViolation, leg_totals, validate_legs};
