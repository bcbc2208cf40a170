//! Ledger leg domain types.

use serde::{Deserialize, Serialize};

/// Side of a ledger leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegSide {
    /// Debit leg (cash taken in, settlement claims, tendered value).
    Debit,
    /// Credit leg (customer balances, cash paid out, income/liability buckets).
    Credit,
}

impl LegSide {
    /// Returns the string representation of the side.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Returns the opposite side.
    #[must_use]
    pub const fn flipped(&self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl std::fmt::Display for LegSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger leg of a posting batch.
///
/// Legs address ledger buckets by opaque reference; resolution to a real
/// customer account is attribution only and never changes the leg itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegInput {
    /// Whether this is a debit or credit.
    pub side: LegSide,
    /// Opaque account reference (`cash:…`, `check:…`, account number, bucket).
    pub account_reference: String,
    /// Amount in cents (must be strictly positive).
    pub amount_cents: i64,
}

impl LegInput {
    /// Creates a new leg.
    #[must_use]
    pub fn new(side: LegSide, account_reference: impl Into<String>, amount_cents: i64) -> Self {
        Self {
            side,
            account_reference: account_reference.into(),
            amount_cents,
        }
    }

    /// Convenience constructor for a debit leg.
    #[must_use]
    pub fn debit(account_reference: impl Into<String>, amount_cents: i64) -> Self {
        Self::new(LegSide::Debit, account_reference, amount_cents)
    }

    /// Convenience constructor for a credit leg.
    #[must_use]
    pub fn credit(account_reference: impl Into<String>, amount_cents: i64) -> Self {
        Self::new(LegSide::Credit, account_reference, amount_cents)
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub const fn signed_cents(&self) -> i64 {
        match self.side {
            LegSide::Debit => self.amount_cents,
            LegSide::Credit => -self.amount_cents,
        }
    }
}
