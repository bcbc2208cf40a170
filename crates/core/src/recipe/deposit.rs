//! Deposit recipe.
//!
//! Debits are the tendered value (cash and/or pending-check buckets), the
//! credit is the customer account. `amount_cents` is the gross tender
//! (cash + checks); explicit cash-back is paid from a separate credit-side
//! cash leg bounded by the total deposit.

use serde_json::json;

use super::Recipe;
use crate::ledger::{LegInput, LegSide, leg_totals};
use crate::reference;
use crate::request::PostingRequest;

/// Recipe for cash/check deposits.
#[derive(Debug)]
pub struct DepositRecipe<'a> {
    request: &'a PostingRequest,
}

impl<'a> DepositRecipe<'a> {
    /// Creates the recipe for a deposit request.
    #[must_use]
    pub const fn new(request: &'a PostingRequest) -> Self {
        Self { request }
    }

    /// Sanitizes caller-supplied entries: debits may only reference pending
    /// checks or the teller's cash account; credits may only reference the
    /// teller's cash account (cash-back) or the customer account.
    fn sanitized_entries(&self) -> Vec<LegInput> {
        let cash = self.request.cash_reference();
        let primary = self.request.primary_reference();

        self.request
            .entries
            .iter()
            .map(|entry| match entry.side {
                LegSide::Debit => {
                    if reference::is_check(&entry.account_reference) {
                        entry.clone()
                    } else {
                        LegInput::debit(cash, entry.amount_cents)
                    }
                }
                LegSide::Credit => {
                    if entry.account_reference == cash {
                        entry.clone()
                    } else {
                        LegInput::credit(primary, entry.amount_cents)
                    }
                }
            })
            .collect()
    }

    /// Generates legs from the typed fields.
    fn generated_entries(&self) -> Vec<LegInput> {
        let request = self.request;
        let cash = request.cash_reference();
        let checks_total = request.check_total_cents();
        let cash_portion = request.amount_cents - checks_total;

        if cash_portion < 0 {
            return vec![];
        }

        let mut legs = Vec::new();
        if cash_portion > 0 {
            legs.push(LegInput::debit(cash, cash_portion));
        }
        for item in &request.check_items {
            legs.push(LegInput::debit(item.reference.clone(), item.amount_cents));
        }

        let to_account = request.amount_cents - request.cash_back_cents;
        if to_account > 0 {
            legs.push(LegInput::credit(request.primary_reference(), to_account));
        }
        if request.cash_back_cents > 0 {
            legs.push(LegInput::credit(cash, request.cash_back_cents));
        }

        legs
    }

    /// The payment-sums check: both sides must total the gross tender and
    /// cash-back must stay within it.
    fn reconciles(&self, legs: &[LegInput]) -> bool {
        let (debits, credits) = leg_totals(legs);
        let cash = self.request.cash_reference();
        let cash_back: i64 = legs
            .iter()
            .filter(|leg| leg.side == LegSide::Credit && leg.account_reference == cash)
            .map(|leg| leg.amount_cents)
            .sum();

        debits == self.request.amount_cents
            && credits == self.request.amount_cents
            && cash_back <= self.request.amount_cents
            && legs.iter().all(|leg| leg.amount_cents > 0)
    }
}

impl Recipe for DepositRecipe<'_> {
    fn normalized_entries(&self) -> Vec<LegInput> {
        if self.request.cash_back_cents < 0 || self.request.cash_back_cents > self.request.amount_cents
        {
            return vec![];
        }

        let legs = if self.request.entries.is_empty() {
            self.generated_entries()
        } else {
            self.sanitized_entries()
        };

        if self.reconciles(&legs) { legs } else { vec![] }
    }

    fn posting_metadata(&self) -> serde_json::Value {
        json!({
            "check_items": self.request.check_items,
            "cash_back_cents": self.request.cash_back_cents,
        })
    }
}
