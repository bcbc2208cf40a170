//! Balance validation for posting batches.

use thiserror::Error;

use super::leg::{LegInput, LegSide};

/// Violations of the double-entry invariant.
///
/// These are programming invariants, not user-facing validation: every recipe
/// must emit a balanced, strictly-positive leg set or nothing at all.
#[derive(Debug, Error)]
pub enum LedgerViolation {
    /// Batch has no legs.
    #[error("Posting batch must have at least one leg")]
    NoLegs,

    /// A leg amount is zero or negative.
    #[error("Leg amount must be strictly positive")]
    NonPositiveAmount,

    /// Batch does not balance.
    #[error("Posting batch is unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced {
        /// Total debit cents.
        debits: i64,
        /// Total credit cents.
        credits: i64,
    },
}

/// Returns the (debit, credit) totals of a leg set.
#[must_use]
pub fn leg_totals(legs: &[LegInput]) -> (i64, i64) {
    let mut debits = 0;
    let mut credits = 0;
    for leg in legs {
        match leg.side {
            LegSide::Debit => debits += leg.amount_cents,
            LegSide::Credit => credits += leg.amount_cents,
        }
    }
    (debits, credits)
}

/// Validates that a set of legs satisfies the double-entry invariant.
///
/// # Errors
///
/// Returns an error if the set is empty, contains a non-positive amount, or
/// does not balance.
pub fn validate_legs(legs: &[LegInput]) -> Result<(), LedgerViolation> {
    if legs.is_empty() {
        return Err(LedgerViolation::NoLegs);
    }

    if legs.iter().any(|leg| leg.amount_cents <= 0) {
        return Err(LedgerViolation::NonPositiveAmount);
    }

    let (debits, credits) = leg_totals(legs);
    if debits != credits {
        return Err(LedgerViolation::Unbalanced { debits, credits });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_legs() {
        let legs = vec![
            LegInput::debit("cash:DR-01", 10_000),
            LegInput::credit("ACC1", 10_000),
        ];
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_unbalanced_legs() {
        let legs = vec![
            LegInput::debit("cash:DR-01", 10_000),
            LegInput::credit("ACC1", 5_000),
        ];
        assert!(matches!(
            validate_legs(&legs),
            Err(LedgerViolation::Unbalanced {
                debits: 10_000,
                credits: 5_000
            })
        ));
    }

    #[test]
    fn test_no_legs() {
        let legs: Vec<LegInput> = vec![];
        assert!(matches!(validate_legs(&legs), Err(LedgerViolation::NoLegs)));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let legs = vec![
            LegInput::debit("cash:DR-01", 0),
            LegInput::credit("ACC1", 0),
        ];
        assert!(matches!(
            validate_legs(&legs),
            Err(LedgerViolation::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let legs = vec![
            LegInput::debit("cash:DR-01", -100),
            LegInput::credit("ACC1", -100),
        ];
        assert!(matches!(
            validate_legs(&legs),
            Err(LedgerViolation::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_multi_leg_totals() {
        let legs = vec![
            LegInput::debit("X", 20_000),
            LegInput::credit("cash:DR-01", 19_500),
            LegInput::credit("income:fees", 500),
        ];
        assert_eq!(leg_totals(&legs), (20_000, 20_000));
        assert!(validate_legs(&legs).is_ok());
    }
}
