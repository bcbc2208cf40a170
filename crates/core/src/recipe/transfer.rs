//! Transfer recipe.
//!
//! Debit the sending account for the full amount, credit the counterparty
//! net of the fee, and route a positive fee to the fee-income bucket.

use serde_json::json;

use super::Recipe;
use crate::ledger::LegInput;
use crate::reference::FEE_INCOME;
use crate::request::PostingRequest;

/// Recipe for account-to-account transfers.
#[derive(Debug)]
pub struct TransferRecipe<'a> {
    request: &'a PostingRequest,
}

impl<'a> TransferRecipe<'a> {
    /// Creates the recipe for a transfer request.
    #[must_use]
    pub const fn new(request: &'a PostingRequest) -> Self {
        Self { request }
    }
}

impl Recipe for TransferRecipe<'_> {
    fn normalized_entries(&self) -> Vec<LegInput> {
        let request = self.request;
        let net = request.amount_cents - request.fee_cents;

        // The fee comes out of the transferred amount; a fee consuming the
        // whole amount leaves the counterparty with nothing to receive.
        if request.amount_cents <= 0 || request.fee_cents < 0 || net <= 0 {
            return vec![];
        }

        let counterparty = match request.counterparty_account_reference.as_deref() {
            Some(reference) if !reference.trim().is_empty() => reference,
            _ => return vec![],
        };

        let mut legs = vec![
            LegInput::debit(request.primary_reference(), request.amount_cents),
            LegInput::credit(counterparty, net),
        ];
        if request.fee_cents > 0 {
            legs.push(LegInput::credit(FEE_INCOME, request.fee_cents));
        }
        legs
    }

    fn posting_metadata(&self) -> serde_json::Value {
        json!({ "fee_cents": self.request.fee_cents })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::validate_legs;
    use crate::request::TransactionType;
    use crate::testutil::base_request;

    fn transfer(amount_cents: i64, fee_cents: i64) -> PostingRequest {
        let mut request = base_request(TransactionType::Transfer, amount_cents);
        request.counterparty_account_reference = Some("ACC2".to_string());
        request.fee_cents = fee_cents;
        request
    }

    #[test]
    fn test_transfer_without_fee() {
        let request = transfer(5_000, 0);
        let legs = TransferRecipe::new(&request).normalized_entries();

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0], LegInput::debit("ACC1", 5_000));
        assert_eq!(legs[1], LegInput::credit("ACC2", 5_000));
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_transfer_with_fee_routes_fee_income() {
        let request = transfer(5_000, 250);
        let legs = TransferRecipe::new(&request).normalized_entries();

        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0], LegInput::debit("ACC1", 5_000));
        assert_eq!(legs[1], LegInput::credit("ACC2", 4_750));
        assert_eq!(legs[2], LegInput::credit(FEE_INCOME, 250));
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_fee_consuming_amount_rejected() {
        let request = transfer(5_000, 5_000);
        assert!(TransferRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_missing_counterparty_rejected() {
        let mut request = transfer(5_000, 0);
        request.counterparty_account_reference = None;
        assert!(TransferRecipe::new(&request).normalized_entries().is_empty());
    }
}
