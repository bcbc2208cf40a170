//! Property tests over all recipes: non-empty output is always balanced.

use proptest::prelude::*;

use super::{Recipe, RecipeKind};
use crate::ledger::validate_legs;
use crate::request::{CheckItem, PostingRequest, TransactionType, VaultDirection};
use crate::testutil::base_request;

fn amount_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

fn fee_strategy() -> impl Strategy<Value = i64> {
    0i64..10_000i64
}

fn request_strategy() -> impl Strategy<Value = PostingRequest> {
    (
        prop_oneof![
            Just(TransactionType::Deposit),
            Just(TransactionType::Withdrawal),
            Just(TransactionType::Transfer),
            Just(TransactionType::CheckCashing),
            Just(TransactionType::Draft),
            Just(TransactionType::VaultTransfer),
            Just(TransactionType::MiscReceipt),
        ],
        amount_strategy(),
        fee_strategy(),
        0i64..50_000i64,
        proptest::collection::vec(1i64..50_000i64, 0..3),
    )
        .prop_map(|(transaction_type, amount, fee, cash_back, checks)| {
            let mut request = base_request(transaction_type, amount);
            request.fee_cents = fee;
            request.cash_back_cents = cash_back;
            request.check_items = checks
                .into_iter()
                .enumerate()
                .map(|(index, amount_cents)| CheckItem {
                    reference: format!("check:{index}"),
                    amount_cents,
                })
                .collect();
            request.counterparty_account_reference = Some("ACC2".to_string());
            request.check_amount_cents = amount + fee;
            request.settlement_account_reference = Some("settle:house".to_string());
            request.draft_payee = Some("Payee".to_string());
            request.draft_instrument_number = Some("OC-1".to_string());
            request.draft_liability_reference =
                Some(crate::reference::OFFICIAL_CHECK_OUTSTANDING.to_string());
            request.vault_transfer_direction = Some(VaultDirection::DrawerToVault);
            request.vault_reference = Some("cash:VAULT".to_string());
            request.misc_receipt_income_reference = Some("income:misc".to_string());
            request
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Whatever the inputs, a recipe either refuses (empty legs) or emits a
    /// balanced set of strictly positive legs.
    #[test]
    fn prop_recipe_output_is_empty_or_balanced(request in request_strategy()) {
        let recipe = RecipeKind::for_request(&request).expect("submittable type");
        let legs = recipe.normalized_entries();

        if !legs.is_empty() {
            prop_assert!(validate_legs(&legs).is_ok(), "unbalanced legs: {legs:?}");
        }
    }

    /// Recipe output never contains a zero-amount leg.
    #[test]
    fn prop_no_zero_amount_legs(request in request_strategy()) {
        let recipe = RecipeKind::for_request(&request).expect("submittable type");
        for leg in recipe.normalized_entries() {
            prop_assert!(leg.amount_cents > 0);
        }
    }
}
