//! The normalized teller posting request.
//!
//! A `PostingRequest` is an in-memory value, never persisted. The engine
//! normalizes it (filling the teller's drawer reference from context), runs
//! it through validation and the gates, and hands it to the matching recipe.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::LegInput;

/// The type of a teller transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Cash/check deposit to a customer account.
    Deposit,
    /// Cash withdrawal from a customer account.
    Withdrawal,
    /// Account-to-account transfer, optionally with a fee.
    Transfer,
    /// Cashing an on-us or settlement check for cash.
    CheckCashing,
    /// Issuing a bank draft / official check.
    Draft,
    /// Moving physical cash between drawer and vault.
    VaultTransfer,
    /// Miscellaneous receipt credited to an income account.
    MiscReceipt,
    /// Mirror posting that reverses an earlier transaction.
    Reversal,
    /// Over/short adjustment posted when a teller session closes.
    SessionCloseVariance,
}

impl TransactionType {
    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Transfer => "transfer",
            Self::CheckCashing => "check_cashing",
            Self::Draft => "draft",
            Self::VaultTransfer => "vault_transfer",
            Self::MiscReceipt => "misc_receipt",
            Self::Reversal => "reversal",
            Self::SessionCloseVariance => "session_close_variance",
        }
    }

    /// Parses a type from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "deposit" => Some(Self::Deposit),
            "withdrawal" => Some(Self::Withdrawal),
            "transfer" => Some(Self::Transfer),
            "check_cashing" => Some(Self::CheckCashing),
            "draft" => Some(Self::Draft),
            "vault_transfer" => Some(Self::VaultTransfer),
            "misc_receipt" => Some(Self::MiscReceipt),
            "reversal" => Some(Self::Reversal),
            "session_close_variance" => Some(Self::SessionCloseVariance),
            _ => None,
        }
    }

    /// Returns true if tellers may submit this type directly.
    ///
    /// Reversals and session-close variances are posted by the engine itself.
    #[must_use]
    pub const fn is_submittable(&self) -> bool {
        !matches!(self, Self::Reversal | Self::SessionCloseVariance)
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A check tendered as part of a deposit or draft purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckItem {
    /// Pending-item bucket reference (`check:<id>`).
    pub reference: String,
    /// Check amount in cents.
    pub amount_cents: i64,
}

/// Direction of a vault transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaultDirection {
    /// From the teller's own drawer into a vault.
    DrawerToVault,
    /// From a vault into the teller's own drawer.
    VaultToDrawer,
    /// Between two vaults.
    VaultToVault,
}

impl VaultDirection {
    /// Returns the string representation of the direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DrawerToVault => "drawer_to_vault",
            Self::VaultToDrawer => "vault_to_drawer",
            Self::VaultToVault => "vault_to_vault",
        }
    }
}

/// A teller's posting request.
///
/// `amount_cents` is the canonical amount for the transaction; the
/// type-specific fields below it feed the matching recipe. `entries` is an
/// explicit caller override that recipes sanitize rather than trust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingRequest {
    /// Idempotency key, unique across the system.
    pub request_id: String,
    /// The transaction type selecting the recipe.
    pub transaction_type: TransactionType,
    /// Canonical amount in cents (> 0).
    pub amount_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// The customer account this posting primarily affects.
    #[serde(default)]
    pub primary_account_reference: Option<String>,
    /// The receiving account of a transfer.
    #[serde(default)]
    pub counterparty_account_reference: Option<String>,
    /// The cash drawer to move physical cash through. Defaults to the
    /// teller's own drawer from context when absent.
    #[serde(default)]
    pub cash_account_reference: Option<String>,
    /// Fee charged on top of / out of the amount, per type.
    #[serde(default)]
    pub fee_cents: i64,
    /// Cash handed back to the customer out of a deposit.
    #[serde(default)]
    pub cash_back_cents: i64,
    /// Checks tendered (deposit, draft, misc receipt).
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
    /// Face amount of the check being cashed.
    #[serde(default)]
    pub check_amount_cents: i64,
    /// Settlement account debited when cashing a check.
    #[serde(default)]
    pub settlement_account_reference: Option<String>,
    /// Payee printed on a draft.
    #[serde(default)]
    pub draft_payee: Option<String>,
    /// Instrument number of a draft.
    #[serde(default)]
    pub draft_instrument_number: Option<String>,
    /// Liability bucket credited for the draft amount.
    #[serde(default)]
    pub draft_liability_reference: Option<String>,
    /// Direction of a vault transfer.
    #[serde(default)]
    pub vault_transfer_direction: Option<VaultDirection>,
    /// The vault involved in a vault transfer.
    #[serde(default)]
    pub vault_reference: Option<String>,
    /// The destination vault of a vault-to-vault transfer.
    #[serde(default)]
    pub vault_secondary_reference: Option<String>,
    /// Income bucket credited by a misc receipt.
    #[serde(default)]
    pub misc_receipt_income_reference: Option<String>,
    /// Free-form description of a misc receipt.
    #[serde(default)]
    pub misc_receipt_description: Option<String>,
    /// Explicit caller-supplied legs (sanitized, never trusted).
    #[serde(default)]
    pub entries: Vec<LegInput>,
    /// Supervisor approval token, required above the threshold.
    #[serde(default)]
    pub approval_token: Option<String>,
    /// Advisory ids the teller acknowledged with this submission.
    #[serde(default)]
    pub acknowledged_advisory_ids: Vec<Uuid>,
    /// Explicit compliance party, in addition to the account's owner.
    #[serde(default)]
    pub party_id: Option<Uuid>,
}

impl PostingRequest {
    /// The effective cash reference, empty when none was supplied.
    #[must_use]
    pub fn cash_reference(&self) -> &str {
        self.cash_account_reference.as_deref().unwrap_or("")
    }

    /// The primary account reference, empty when none was supplied.
    #[must_use]
    pub fn primary_reference(&self) -> &str {
        self.primary_account_reference.as_deref().unwrap_or("")
    }

    /// Fills the cash reference from the teller's own drawer when absent.
    #[must_use]
    pub fn with_drawer(mut self, drawer_reference: &str) -> Self {
        if self
            .cash_account_reference
            .as_deref()
            .is_none_or(str::is_empty)
        {
            self.cash_account_reference = Some(drawer_reference.to_string());
        }
        self
    }

    /// Total cents of all tendered check items.
    #[must_use]
    pub fn check_total_cents(&self) -> i64 {
        self.check_items.iter().map(|c| c.amount_cents).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit_request(amount_cents: i64) -> PostingRequest {
        crate::testutil::base_request(TransactionType::Deposit, amount_cents)
    }

    #[test]
    fn test_transaction_type_round_trip() {
        for ty in [
            TransactionType::Deposit,
            TransactionType::Withdrawal,
            TransactionType::Transfer,
            TransactionType::CheckCashing,
            TransactionType::Draft,
            TransactionType::VaultTransfer,
            TransactionType::MiscReceipt,
            TransactionType::Reversal,
            TransactionType::SessionCloseVariance,
        ] {
            assert_eq!(TransactionType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(TransactionType::parse("unknown"), None);
    }

    #[test]
    fn test_submittable_types() {
        assert!(TransactionType::Deposit.is_submittable());
        assert!(TransactionType::VaultTransfer.is_submittable());
        assert!(!TransactionType::Reversal.is_submittable());
        assert!(!TransactionType::SessionCloseVariance.is_submittable());
    }

    #[test]
    fn test_with_drawer_fills_missing_cash_reference() {
        let mut request = deposit_request(10_000);
        request.cash_account_reference = None;
        let request = request.with_drawer("cash:DR-07");
        assert_eq!(request.cash_reference(), "cash:DR-07");
    }

    #[test]
    fn test_with_drawer_keeps_explicit_cash_reference() {
        let request = deposit_request(10_000).with_drawer("cash:DR-07");
        assert_eq!(request.cash_reference(), "cash:DR-01");
    }

    #[test]
    fn test_check_total() {
        let mut request = deposit_request(10_000);
        request.check_items = vec![
            CheckItem {
                reference: "check:1".to_string(),
                amount_cents: 2_500,
            },
            CheckItem {
                reference: "check:2".to_string(),
                amount_cents: 1_500,
            },
        ];
        assert_eq!(request.check_total_cents(), 4_000);
    }
}
