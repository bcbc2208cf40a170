//! Request fixtures shared across unit tests.

use crate::request::{PostingRequest, TransactionType};

/// A minimal request of the given type, posting from drawer `cash:DR-01`
/// against account `ACC1`.
pub(crate) fn base_request(transaction_type: TransactionType, amount_cents: i64) -> PostingRequest {
    PostingRequest {
        request_id: "req-1".to_string(),
        transaction_type,
        amount_cents,
        currency: "USD".to_string(),
        primary_account_reference: Some("ACC1".to_string()),
        counterparty_account_reference: None,
        cash_account_reference: Some("cash:DR-01".to_string()),
        fee_cents: 0,
        cash_back_cents: 0,
        check_items: vec![],
        check_amount_cents: 0,
        settlement_account_reference: None,
        draft_payee: None,
        draft_instrument_number: None,
        draft_liability_reference: None,
        vault_transfer_direction: None,
        vault_reference: None,
        vault_secondary_reference: None,
        misc_receipt_income_reference: None,
        misc_receipt_description: None,
        entries: vec![],
        approval_token: None,
        acknowledged_advisory_ids: vec![],
        party_id: None,
    }
}
