//! Check cashing recipe.
//!
//! Debit the settlement account for the full check amount, credit cash for
//! the net payout (check amount minus fee), and route a positive fee to the
//! fee-income bucket. The canonical amount must equal the net payout
//! exactly.

use serde_json::json;

use super::Recipe;
use crate::ledger::LegInput;
use crate::reference::FEE_INCOME;
use crate::request::PostingRequest;

/// Recipe for cashing checks.
#[derive(Debug)]
pub struct CheckCashingRecipe<'a> {
    request: &'a PostingRequest,
}

impl<'a> CheckCashingRecipe<'a> {
    /// Creates the recipe for a check-cashing request.
    #[must_use]
    pub const fn new(request: &'a PostingRequest) -> Self {
        Self { request }
    }
}

impl Recipe for CheckCashingRecipe<'_> {
    fn normalized_entries(&self) -> Vec<LegInput> {
        let request = self.request;
        let net_payout = request.check_amount_cents - request.fee_cents;

        if request.check_amount_cents <= 0 || request.fee_cents < 0 || net_payout <= 0 {
            return vec![];
        }
        if request.amount_cents != net_payout {
            return vec![];
        }

        let settlement = match request.settlement_account_reference.as_deref() {
            Some(reference) if !reference.trim().is_empty() => reference,
            _ => return vec![],
        };

        let mut legs = vec![
            LegInput::debit(settlement, request.check_amount_cents),
            LegInput::credit(request.cash_reference(), net_payout),
        ];
        if request.fee_cents > 0 {
            legs.push(LegInput::credit(FEE_INCOME, request.fee_cents));
        }
        legs
    }

    fn posting_metadata(&self) -> serde_json::Value {
        json!({
            "check_amount_cents": self.request.check_amount_cents,
            "fee_cents": self.request.fee_cents,
            "settlement_account_reference": self.request.settlement_account_reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::validate_legs;
    use crate::request::TransactionType;
    use crate::testutil::base_request;

    fn check_cashing(check_amount: i64, fee: i64, amount: i64) -> PostingRequest {
        let mut request = base_request(TransactionType::CheckCashing, amount);
        request.check_amount_cents = check_amount;
        request.fee_cents = fee;
        request.settlement_account_reference = Some("X".to_string());
        request
    }

    #[test]
    fn test_three_leg_payout_with_fee() {
        let request = check_cashing(20_000, 500, 19_500);
        let legs = CheckCashingRecipe::new(&request).normalized_entries();

        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0], LegInput::debit("X", 20_000));
        assert_eq!(legs[1], LegInput::credit("cash:DR-01", 19_500));
        assert_eq!(legs[2], LegInput::credit(FEE_INCOME, 500));
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_no_fee_two_legs() {
        let request = check_cashing(20_000, 0, 20_000);
        let legs = CheckCashingRecipe::new(&request).normalized_entries();
        assert_eq!(legs.len(), 2);
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_amount_not_matching_net_payout_rejected() {
        let request = check_cashing(20_000, 500, 20_000);
        assert!(CheckCashingRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_fee_swallowing_check_rejected() {
        let request = check_cashing(500, 500, 0);
        assert!(CheckCashingRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_missing_settlement_reference_rejected() {
        let mut request = check_cashing(20_000, 500, 19_500);
        request.settlement_account_reference = None;
        assert!(CheckCashingRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_zero_check_amount_rejected() {
        let request = check_cashing(0, 0, 0);
        assert!(CheckCashingRecipe::new(&request).normalized_entries().is_empty());
    }
}
