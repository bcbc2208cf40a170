//! Property tests for the balance invariant.

use proptest::prelude::*;

use super::leg::{LegInput, LegSide};
use super::validation::{LedgerViolation, leg_totals, validate_legs};

/// Strategy for a positive cent amount.
fn amount_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for an arbitrary leg with a positive amount.
fn leg_strategy() -> impl Strategy<Value = LegInput> {
    (
        prop_oneof![Just(LegSide::Debit), Just(LegSide::Credit)],
        "[A-Z]{3}[0-9]{1,4}",
        amount_strategy(),
    )
        .prop_map(|(side, reference, amount)| LegInput::new(side, reference, amount))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A debit/credit pair of equal amounts always validates.
    #[test]
    fn prop_mirrored_pair_is_balanced(amount in amount_strategy()) {
        let legs = vec![
            LegInput::debit("cash:DR-01", amount),
            LegInput::credit("ACC1", amount),
        ];
        prop_assert!(validate_legs(&legs).is_ok());
    }

    /// Flipping every leg side preserves balance.
    #[test]
    fn prop_flipping_preserves_balance(legs in proptest::collection::vec(leg_strategy(), 1..8)) {
        let (debits, credits) = leg_totals(&legs);
        let flipped: Vec<LegInput> = legs
            .iter()
            .map(|leg| LegInput::new(leg.side.flipped(), leg.account_reference.clone(), leg.amount_cents))
            .collect();
        let (flipped_debits, flipped_credits) = leg_totals(&flipped);

        prop_assert_eq!(debits, flipped_credits);
        prop_assert_eq!(credits, flipped_debits);
    }

    /// Any single-sided, non-empty leg set fails validation.
    #[test]
    fn prop_single_sided_never_balances(amounts in proptest::collection::vec(amount_strategy(), 1..8)) {
        let legs: Vec<LegInput> = amounts
            .iter()
            .map(|&amount| LegInput::debit("cash:DR-01", amount))
            .collect();
        prop_assert!(matches!(
            validate_legs(&legs),
            Err(LedgerViolation::Unbalanced { .. })
        ));
    }
}
