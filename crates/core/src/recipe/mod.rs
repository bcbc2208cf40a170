//! Per-transaction-type leg derivation.
//!
//! A recipe turns a validated request into the normalized, ordered leg list
//! and the type-specific metadata blob of its posting batch. All seven
//! variants share one interface; the registry maps the transaction type tag
//! to its implementation.
//!
//! Shared rules:
//! - Caller-supplied `entries` are sanitized, never trusted: tendered debit
//!   legs may only reference pending-check buckets (and, for drafts and misc
//!   receipts, the primary account); everything else is rewritten to the
//!   teller's own cash account.
//! - Every recipe enforces its own payment-sums-to-total check; on failure
//!   it returns an empty leg list, which the engine treats as a validation
//!   failure. No batch is ever committed with an empty or unbalanced set.

pub mod check_cashing;
pub mod deposit;
pub mod draft;
pub mod misc_receipt;
pub mod transfer;
pub mod vault_transfer;
pub mod withdrawal;

#[cfg(test)]
mod balance_props;

pub use check_cashing::CheckCashingRecipe;
pub use deposit::DepositRecipe;
pub use draft::DraftRecipe;
pub use misc_receipt::MiscReceiptRecipe;
pub use transfer::TransferRecipe;
pub use vault_transfer::VaultTransferRecipe;
pub use withdrawal::WithdrawalRecipe;

use crate::ledger::{LegInput, LegSide};
use crate::reference;
use crate::request::{PostingRequest, TransactionType};

/// The common recipe interface.
pub trait Recipe {
    /// The normalized, ordered leg list; empty when the request does not
    /// reconcile.
    fn normalized_entries(&self) -> Vec<LegInput>;

    /// Type-specific detail persisted on the posting batch.
    fn posting_metadata(&self) -> serde_json::Value;
}

/// Registry dispatching a transaction type to its recipe.
#[derive(Debug)]
pub enum RecipeKind<'a> {
    /// Cash/check deposit.
    Deposit(DepositRecipe<'a>),
    /// Cash withdrawal.
    Withdrawal(WithdrawalRecipe<'a>),
    /// Account-to-account transfer.
    Transfer(TransferRecipe<'a>),
    /// Check cashing.
    CheckCashing(CheckCashingRecipe<'a>),
    /// Bank draft issuance.
    Draft(DraftRecipe<'a>),
    /// Drawer/vault cash movement.
    VaultTransfer(VaultTransferRecipe<'a>),
    /// Miscellaneous receipt.
    MiscReceipt(MiscReceiptRecipe<'a>),
}

impl<'a> RecipeKind<'a> {
    /// Looks up the recipe for a request's transaction type.
    ///
    /// Returns `None` for types the engine posts itself (reversal,
    /// session-close variance); those never pass through a recipe.
    #[must_use]
    pub fn for_request(request: &'a PostingRequest) -> Option<Self> {
        match request.transaction_type {
            TransactionType::Deposit => Some(Self::Deposit(DepositRecipe::new(request))),
            TransactionType::Withdrawal => Some(Self::Withdrawal(WithdrawalRecipe::new(request))),
            TransactionType::Transfer => Some(Self::Transfer(TransferRecipe::new(request))),
            TransactionType::CheckCashing => {
                Some(Self::CheckCashing(CheckCashingRecipe::new(request)))
            }
            TransactionType::Draft => Some(Self::Draft(DraftRecipe::new(request))),
            TransactionType::VaultTransfer => {
                Some(Self::VaultTransfer(VaultTransferRecipe::new(request)))
            }
            TransactionType::MiscReceipt => Some(Self::MiscReceipt(MiscReceiptRecipe::new(request))),
            TransactionType::Reversal | TransactionType::SessionCloseVariance => None,
        }
    }
}

impl Recipe for RecipeKind<'_> {
    fn normalized_entries(&self) -> Vec<LegInput> {
        match self {
            Self::Deposit(recipe) => recipe.normalized_entries(),
            Self::Withdrawal(recipe) => recipe.normalized_entries(),
            Self::Transfer(recipe) => recipe.normalized_entries(),
            Self::CheckCashing(recipe) => recipe.normalized_entries(),
            Self::Draft(recipe) => recipe.normalized_entries(),
            Self::VaultTransfer(recipe) => recipe.normalized_entries(),
            Self::MiscReceipt(recipe) => recipe.normalized_entries(),
        }
    }

    fn posting_metadata(&self) -> serde_json::Value {
        match self {
            Self::Deposit(recipe) => recipe.posting_metadata(),
            Self::Withdrawal(recipe) => recipe.posting_metadata(),
            Self::Transfer(recipe) => recipe.posting_metadata(),
            Self::CheckCashing(recipe) => recipe.posting_metadata(),
            Self::Draft(recipe) => recipe.posting_metadata(),
            Self::VaultTransfer(recipe) => recipe.posting_metadata(),
            Self::MiscReceipt(recipe) => recipe.posting_metadata(),
        }
    }
}

/// Sanitizes caller-supplied tender legs.
///
/// Keeps debit legs only. A debit may reference a pending-check bucket, or
/// the primary account when `allowed_account` permits it; any other debit is
/// rewritten to the teller's own cash account.
pub(crate) fn sanitize_tendered_debits(
    entries: &[LegInput],
    cash_reference: &str,
    allowed_account: Option<&str>,
) -> Vec<LegInput> {
    entries
        .iter()
        .filter(|entry| entry.side == LegSide::Debit)
        .map(|entry| {
            let keep = reference::is_check(&entry.account_reference)
                || allowed_account
                    .is_some_and(|account| !account.is_empty() && entry.account_reference == account);
            if keep {
                entry.clone()
            } else {
                LegInput::debit(cash_reference, entry.amount_cents)
            }
        })
        .collect()
}
