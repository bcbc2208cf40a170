//! `SeaORM` active enums mirroring the database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Teller transaction type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "teller_transaction_type")]
#[serde(rename_all = "snake_case")]
pub enum TellerTransactionType {
    /// Cash/check deposit.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Cash withdrawal.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
    /// Account-to-account transfer.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Check cashing.
    #[sea_orm(string_value = "check_cashing")]
    CheckCashing,
    /// Bank draft issuance.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Drawer/vault cash movement.
    #[sea_orm(string_value = "vault_transfer")]
    VaultTransfer,
    /// Miscellaneous receipt.
    #[sea_orm(string_value = "misc_receipt")]
    MiscReceipt,
    /// Mirror posting reversing an earlier transaction.
    #[sea_orm(string_value = "reversal")]
    Reversal,
    /// Over/short adjustment posted at session close.
    #[sea_orm(string_value = "session_close_variance")]
    SessionCloseVariance,
}

/// Teller transaction status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "teller_transaction_status")]
#[serde(rename_all = "lowercase")]
pub enum TellerTransactionStatus {
    /// Committed to the ledger.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Recorded as failed (never carries a batch).
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// Posting batch status. Terminal; there are no partial states.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "posting_batch_status")]
#[serde(rename_all = "lowercase")]
pub enum PostingBatchStatus {
    /// Batch committed atomically with its transaction.
    #[sea_orm(string_value = "committed")]
    Committed,
}

/// Side of a posting leg.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leg_side")]
#[serde(rename_all = "lowercase")]
pub enum LegSide {
    /// Debit leg.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Credit leg.
    #[sea_orm(string_value = "credit")]
    Credit,
}

/// Direction of a physical cash movement.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cash_direction")]
#[serde(rename_all = "lowercase")]
pub enum CashDirection {
    /// Cash taken in.
    #[sea_orm(string_value = "in")]
    In,
    /// Cash paid out.
    #[sea_orm(string_value = "out")]
    Out,
}

/// Advisory severity.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "advisory_severity")]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySeverity {
    /// Informational note.
    #[sea_orm(string_value = "info")]
    Info,
    /// A notice tellers should see.
    #[sea_orm(string_value = "notice")]
    Notice,
    /// Blocks until acknowledged.
    #[sea_orm(string_value = "requires_acknowledgment")]
    RequiresAcknowledgment,
    /// Blocks unconditionally.
    #[sea_orm(string_value = "restriction")]
    Restriction,
}

/// Scope an advisory attaches to.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "advisory_scope_kind")]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryScopeKind {
    /// A customer/party.
    #[sea_orm(string_value = "party")]
    Party,
    /// A customer account.
    #[sea_orm(string_value = "account")]
    Account,
}

/// Customer account status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Open and usable.
    #[sea_orm(string_value = "active")]
    Active,
    /// Frozen by compliance or the customer.
    #[sea_orm(string_value = "frozen")]
    Frozen,
    /// Closed.
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// Kind of cash location.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cash_location_kind")]
#[serde(rename_all = "lowercase")]
pub enum CashLocationKind {
    /// A teller drawer.
    #[sea_orm(string_value = "drawer")]
    Drawer,
    /// A branch vault.
    #[sea_orm(string_value = "vault")]
    Vault,
}
