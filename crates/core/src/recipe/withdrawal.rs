//! Withdrawal recipe.
//!
//! Debit the customer account, credit the teller's cash drawer. The amount
//! is the canonical field; there is no alternate entries path.

use serde_json::json;

use super::Recipe;
use crate::ledger::LegInput;
use crate::request::PostingRequest;

/// Recipe for cash withdrawals.
#[derive(Debug)]
pub struct WithdrawalRecipe<'a> {
    request: &'a PostingRequest,
}

impl<'a> WithdrawalRecipe<'a> {
    /// Creates the recipe for a withdrawal request.
    #[must_use]
    pub const fn new(request: &'a PostingRequest) -> Self {
        Self { request }
    }
}

impl Recipe for WithdrawalRecipe<'_> {
    fn normalized_entries(&self) -> Vec<LegInput> {
        if self.request.amount_cents <= 0 {
            return vec![];
        }

        vec![
            LegInput::debit(self.request.primary_reference(), self.request.amount_cents),
            LegInput::credit(self.request.cash_reference(), self.request.amount_cents),
        ]
    }

    fn posting_metadata(&self) -> serde_json::Value {
        json!({})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::validate_legs;
    use crate::request::TransactionType;
    use crate::testutil::base_request;

    #[test]
    fn test_withdrawal_two_legs() {
        let request = base_request(TransactionType::Withdrawal, 7_550);
        let legs = WithdrawalRecipe::new(&request).normalized_entries();

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0], LegInput::debit("ACC1", 7_550));
        assert_eq!(legs[1], LegInput::credit("cash:DR-01", 7_550));
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_caller_entries_are_ignored() {
        let mut request = base_request(TransactionType::Withdrawal, 7_550);
        request.entries = vec![
            LegInput::debit("ACC99", 7_550),
            LegInput::credit("ACC98", 7_550),
        ];

        let legs = WithdrawalRecipe::new(&request).normalized_entries();
        assert_eq!(legs[0].account_reference, "ACC1");
        assert_eq!(legs[1].account_reference, "cash:DR-01");
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let request = base_request(TransactionType::Withdrawal, 0);
        assert!(WithdrawalRecipe::new(&request).normalized_entries().is_empty());
    }
}
