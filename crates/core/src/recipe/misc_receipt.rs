//! Miscellaneous receipt recipe.
//!
//! Mirrors the draft's tender-reconciliation pattern, but the receipt amount
//! is credited to a configurable income account instead of a liability.

use serde_json::json;

use super::{Recipe, sanitize_tendered_debits};
use crate::ledger::LegInput;
use crate::reference::FEE_INCOME;
use crate::request::PostingRequest;

/// Recipe for miscellaneous receipts.
#[derive(Debug)]
pub struct MiscReceiptRecipe<'a> {
    request: &'a PostingRequest,
}

impl<'a> MiscReceiptRecipe<'a> {
    /// Creates the recipe for a misc-receipt request.
    #[must_use]
    pub const fn new(request: &'a PostingRequest) -> Self {
        Self { request }
    }

    fn tendered_debits(&self) -> Vec<LegInput> {
        let request = self.request;
        if request.entries.is_empty() {
            vec![LegInput::debit(
                request.cash_reference(),
                request.amount_cents + request.fee_cents,
            )]
        } else {
            sanitize_tendered_debits(
                &request.entries,
                request.cash_reference(),
                request.primary_account_reference.as_deref(),
            )
        }
    }
}

impl Recipe for MiscReceiptRecipe<'_> {
    fn normalized_entries(&self) -> Vec<LegInput> {
        let request = self.request;
        if request.amount_cents <= 0 || request.fee_cents < 0 {
            return vec![];
        }

        let income = match request.misc_receipt_income_reference.as_deref() {
            Some(reference) if !reference.trim().is_empty() => reference,
            _ => return vec![],
        };

        let tendered = self.tendered_debits();
        let tendered_total: i64 = tendered.iter().map(|leg| leg.amount_cents).sum();
        if tendered_total != request.amount_cents + request.fee_cents {
            return vec![];
        }
        if tendered.iter().any(|leg| leg.amount_cents <= 0) {
            return vec![];
        }

        let mut legs = tendered;
        legs.push(LegInput::credit(income, request.amount_cents));
        if request.fee_cents > 0 {
            legs.push(LegInput::credit(FEE_INCOME, request.fee_cents));
        }
        legs
    }

    fn posting_metadata(&self) -> serde_json::Value {
        json!({
            "income_reference": self.request.misc_receipt_income_reference,
            "description": self.request.misc_receipt_description,
            "fee_cents": self.request.fee_cents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::validate_legs;
    use crate::request::TransactionType;
    use crate::testutil::base_request;

    fn misc_receipt(amount: i64, fee: i64) -> PostingRequest {
        let mut request = base_request(TransactionType::MiscReceipt, amount);
        request.fee_cents = fee;
        request.misc_receipt_income_reference = Some("income:safe_deposit_rent".to_string());
        request.misc_receipt_description = Some("Box 114 annual rent".to_string());
        request
    }

    #[test]
    fn test_cash_receipt() {
        let request = misc_receipt(4_500, 0);
        let legs = MiscReceiptRecipe::new(&request).normalized_entries();

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0], LegInput::debit("cash:DR-01", 4_500));
        assert_eq!(legs[1], LegInput::credit("income:safe_deposit_rent", 4_500));
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_receipt_with_fee() {
        let request = misc_receipt(4_500, 100);
        let legs = MiscReceiptRecipe::new(&request).normalized_entries();

        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0], LegInput::debit("cash:DR-01", 4_600));
        assert_eq!(legs[2], LegInput::credit(FEE_INCOME, 100));
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_tender_mismatch_rejected() {
        let mut request = misc_receipt(4_500, 0);
        request.entries = vec![LegInput::debit("cash:DR-01", 4_000)];

        assert!(MiscReceiptRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_missing_income_reference_rejected() {
        let mut request = misc_receipt(4_500, 0);
        request.misc_receipt_income_reference = None;

        assert!(MiscReceiptRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_account_tender_kept() {
        let mut request = misc_receipt(4_500, 0);
        request.entries = vec![LegInput::debit("ACC1", 4_500)];

        let legs = MiscReceiptRecipe::new(&request).normalized_entries();
        assert_eq!(legs[0], LegInput::debit("ACC1", 4_500));
        assert!(validate_legs(&legs).is_ok());
    }
}
