//! Reversibility rules and mirrored leg creation.
//!
//! Reversing a posted transaction posts a new `reversal` transaction whose
//! batch flips every original leg's side. The mirror batch is subject to the
//! same atomicity and balance invariant as any other posting.

use thiserror::Error;
use uuid::Uuid;

use crate::ledger::LegInput;
use crate::request::TransactionType;

/// Why a transaction cannot be reversed.
#[derive(Debug, Error)]
pub enum ReversalError {
    /// The transaction type itself is not reversible.
    #[error("transactions of type {0} cannot be reversed")]
    NotReversibleType(TransactionType),

    /// The transaction has already been reversed.
    #[error("transaction was already reversed by {0}")]
    AlreadyReversed(Uuid),
}

/// Checks that a transaction may be reversed.
///
/// A transaction is reversible iff its type is not itself `reversal` or
/// `session_close_variance`, and it has not already been reversed.
///
/// # Errors
///
/// Returns the reason when the transaction cannot be reversed.
pub fn ensure_reversible(
    transaction_type: TransactionType,
    reversed_by_teller_transaction_id: Option<Uuid>,
) -> Result<(), ReversalError> {
    if matches!(
        transaction_type,
        TransactionType::Reversal | TransactionType::SessionCloseVariance
    ) {
        return Err(ReversalError::NotReversibleType(transaction_type));
    }

    if let Some(reversal_id) = reversed_by_teller_transaction_id {
        return Err(ReversalError::AlreadyReversed(reversal_id));
    }

    Ok(())
}

/// Creates the mirror legs of a batch: every side flipped, references,
/// amounts, and order preserved.
#[must_use]
pub fn reversing_legs(original: &[LegInput]) -> Vec<LegInput> {
    original
        .iter()
        .map(|leg| LegInput::new(leg.side.flipped(), leg.account_reference.clone(), leg.amount_cents))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LegSide, validate_legs};

    #[test]
    fn test_posted_deposit_is_reversible() {
        assert!(ensure_reversible(TransactionType::Deposit, None).is_ok());
    }

    #[test]
    fn test_reversal_is_not_reversible() {
        assert!(matches!(
            ensure_reversible(TransactionType::Reversal, None),
            Err(ReversalError::NotReversibleType(TransactionType::Reversal))
        ));
    }

    #[test]
    fn test_session_close_variance_is_not_reversible() {
        assert!(matches!(
            ensure_reversible(TransactionType::SessionCloseVariance, None),
            Err(ReversalError::NotReversibleType(_))
        ));
    }

    #[test]
    fn test_already_reversed_is_rejected() {
        let reversal_id = Uuid::new_v4();
        assert!(matches!(
            ensure_reversible(TransactionType::Deposit, Some(reversal_id)),
            Err(ReversalError::AlreadyReversed(id)) if id == reversal_id
        ));
    }

    #[test]
    fn test_reversing_legs_flips_sides_and_preserves_order() {
        let original = vec![
            LegInput::debit("cash:DR-01", 10_000),
            LegInput::credit("ACC1", 10_000),
        ];

        let reversed = reversing_legs(&original);
        assert_eq!(reversed.len(), 2);
        assert_eq!(reversed[0].side, LegSide::Credit);
        assert_eq!(reversed[0].account_reference, "cash:DR-01");
        assert_eq!(reversed[0].amount_cents, 10_000);
        assert_eq!(reversed[1].side, LegSide::Debit);
        assert_eq!(reversed[1].account_reference, "ACC1");

        assert!(validate_legs(&reversed).is_ok());
    }

    #[test]
    fn test_reversing_twice_is_identity() {
        let original = vec![
            LegInput::debit("X", 20_000),
            LegInput::credit("cash:DR-01", 19_500),
            LegInput::credit("income:fees", 500),
        ];

        assert_eq!(reversing_legs(&reversing_legs(&original)), original);
    }
}
