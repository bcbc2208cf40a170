//! Bank draft recipe.
//!
//! The customer tenders cash, checks, and/or their own account for the draft
//! amount plus fee; the draft amount is credited to the official-check
//! liability bucket and a positive fee to fee income. The total tendered
//! must equal amount + fee exactly.

use serde_json::json;

use super::{Recipe, sanitize_tendered_debits};
use crate::ledger::LegInput;
use crate::reference::FEE_INCOME;
use crate::request::PostingRequest;

/// Recipe for issuing bank drafts.
#[derive(Debug)]
pub struct DraftRecipe<'a> {
    request: &'a PostingRequest,
}

impl<'a> DraftRecipe<'a> {
    /// Creates the recipe for a draft request.
    #[must_use]
    pub const fn new(request: &'a PostingRequest) -> Self {
        Self { request }
    }

    /// Tendered debit legs: sanitized caller entries, or a single cash debit
    /// for amount + fee when none were supplied.
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

impl Recipe for DraftRecipe<'_> {
    fn normalized_entries(&self) -> Vec<LegInput> {
        let request = self.request;
        if request.amount_cents <= 0 || request.fee_cents < 0 {
            return vec![];
        }

        let liability = match request.draft_liability_reference.as_deref() {
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
        legs.push(LegInput::credit(liability, request.amount_cents));
        if request.fee_cents > 0 {
            legs.push(LegInput::credit(FEE_INCOME, request.fee_cents));
        }
        legs
    }

    fn posting_metadata(&self) -> serde_json::Value {
        json!({
            "payee": self.request.draft_payee,
            "instrument_number": self.request.draft_instrument_number,
            "fee_cents": self.request.fee_cents,
            "liability_reference": self.request.draft_liability_reference,
        })
    }
}
