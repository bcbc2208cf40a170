//! Request shape validation.
//!
//! Runs first in the pipeline, before any ledger or compliance logic:
//! required-field presence per transaction type plus coarse numeric sanity.
//! Pure and stateless; a non-empty result aborts the posting.

use crate::request::{PostingRequest, TransactionType, VaultDirection};

/// How the request entered the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// A teller submission; the caller must supply the request id.
    Create,
    /// An engine-generated posting (e.g. a reversal); the request id is
    /// minted by the server after validation.
    Derived,
}

/// Returns the validation errors for a request, empty when it is well-formed.
#[must_use]
pub fn errors(request: &PostingRequest, mode: ValidationMode) -> Vec<String> {
    let mut errors = Vec::new();

    if mode == ValidationMode::Create && request.request_id.trim().is_empty() {
        errors.push("request_id is required".to_string());
    }

    if !request.transaction_type.is_submittable() && mode == ValidationMode::Create {
        errors.push(format!(
            "transaction type {} cannot be submitted directly",
            request.transaction_type
        ));
    }

    if request.currency.trim().is_empty() {
        errors.push("currency is required".to_string());
    }

    if request.amount_cents <= 0 {
        errors.push("amount_cents must be positive".to_string());
    }

    if request.fee_cents < 0 {
        errors.push("fee_cents must not be negative".to_string());
    }

    if request.cash_back_cents < 0 {
        errors.push("cash_back_cents must not be negative".to_string());
    }

    if request.check_amount_cents < 0 {
        errors.push("check_amount_cents must not be negative".to_string());
    }

    for (index, item) in request.check_items.iter().enumerate() {
        if item.reference.trim().is_empty() {
            errors.push(format!("check_items[{index}].reference is required"));
        }
        if item.amount_cents <= 0 {
            errors.push(format!("check_items[{index}].amount_cents must be positive"));
        }
    }

    for (index, entry) in request.entries.iter().enumerate() {
        if entry.account_reference.trim().is_empty() {
            errors.push(format!("entries[{index}].account_reference is required"));
        }
        if entry.amount_cents <= 0 {
            errors.push(format!("entries[{index}].amount_cents must be positive"));
        }
    }

    type_errors(request, &mut errors);

    errors
}

/// Per-type required-field checks.
fn type_errors(request: &PostingRequest, errors: &mut Vec<String>) {
    let require = |errors: &mut Vec<String>, present: bool, field: &str| {
        if !present {
            errors.push(format!("{field} is required for {}", request.transaction_type));
        }
    };

    let has = |value: &Option<String>| value.as_deref().is_some_and(|s| !s.trim().is_empty());

    match request.transaction_type {
        TransactionType::Deposit | TransactionType::Withdrawal => {
            require(errors, has(&request.primary_account_reference), "primary_account_reference");
            require(errors, has(&request.cash_account_reference), "cash_account_reference");
        }
        TransactionType::Transfer => {
            require(errors, has(&request.primary_account_reference), "primary_account_reference");
            require(
                errors,
                has(&request.counterparty_account_reference),
                "counterparty_account_reference",
            );
        }
        TransactionType::CheckCashing => {
            require(
                errors,
                has(&request.settlement_account_reference),
                "settlement_account_reference",
            );
            require(errors, has(&request.cash_account_reference), "cash_account_reference");
        }
        TransactionType::Draft => {
            require(errors, has(&request.draft_payee), "draft_payee");
            require(
                errors,
                has(&request.draft_instrument_number),
                "draft_instrument_number",
            );
            require(
                errors,
                has(&request.draft_liability_reference),
                "draft_liability_reference",
            );
            require(errors, has(&request.cash_account_reference), "cash_account_reference");
        }
        TransactionType::VaultTransfer => {
            require(
                errors,
                request.vault_transfer_direction.is_some(),
                "vault_transfer_direction",
            );
            require(errors, has(&request.vault_reference), "vault_reference");
            match request.vault_transfer_direction {
                Some(VaultDirection::VaultToVault) => {
                    require(
                        errors,
                        has(&request.vault_secondary_reference),
                        "vault_secondary_reference",
                    );
                }
                Some(_) => {
                    require(errors, has(&request.cash_account_reference), "cash_account_reference");
                }
                None => {}
            }
        }
        TransactionType::MiscReceipt => {
            require(
                errors,
                has(&request.misc_receipt_income_reference),
                "misc_receipt_income_reference",
            );
            require(errors, has(&request.cash_account_reference), "cash_account_reference");
        }
        TransactionType::Reversal | TransactionType::SessionCloseVariance => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::CheckItem;
    use crate::testutil::base_request;

    #[test]
    fn test_valid_deposit_has_no_errors() {
        let request = base_request(TransactionType::Deposit, 10_000);
        assert!(errors(&request, ValidationMode::Create).is_empty());
    }

    #[test]
    fn test_missing_request_id() {
        let mut request = base_request(TransactionType::Deposit, 10_000);
        request.request_id = String::new();

        let errs = errors(&request, ValidationMode::Create);
        assert!(errs.iter().any(|e| e.contains("request_id")));

        // The derived mode mints its own request id.
        assert!(errors(&request, ValidationMode::Derived).is_empty());
    }

    #[test]
    fn test_non_positive_amount() {
        let request = base_request(TransactionType::Deposit, 0);
        let errs = errors(&request, ValidationMode::Create);
        assert!(errs.iter().any(|e| e.contains("amount_cents")));
    }

    #[test]
    fn test_transfer_requires_counterparty() {
        let request = base_request(TransactionType::Transfer, 10_000);
        let errs = errors(&request, ValidationMode::Create);
        assert!(
            errs.iter()
                .any(|e| e.contains("counterparty_account_reference"))
        );
    }

    #[test]
    fn test_draft_requires_payee_instrument_liability() {
        let request = base_request(TransactionType::Draft, 10_000);
        let errs = errors(&request, ValidationMode::Create);
        assert!(errs.iter().any(|e| e.contains("draft_payee")));
        assert!(errs.iter().any(|e| e.contains("draft_instrument_number")));
        assert!(errs.iter().any(|e| e.contains("draft_liability_reference")));
    }

    #[test]
    fn test_check_cashing_requires_settlement() {
        let request = base_request(TransactionType::CheckCashing, 19_500);
        let errs = errors(&request, ValidationMode::Create);
        assert!(
            errs.iter()
                .any(|e| e.contains("settlement_account_reference"))
        );
    }

    #[test]
    fn test_vault_to_vault_requires_secondary() {
        let mut request = base_request(TransactionType::VaultTransfer, 50_000);
        request.vault_transfer_direction = Some(VaultDirection::VaultToVault);
        request.vault_reference = Some("cash:VAULT-A".to_string());

        let errs = errors(&request, ValidationMode::Create);
        assert!(errs.iter().any(|e| e.contains("vault_secondary_reference")));
    }

    #[test]
    fn test_negative_fee_rejected() {
        let mut request = base_request(TransactionType::Transfer, 10_000);
        request.counterparty_account_reference = Some("ACC2".to_string());
        request.fee_cents = -1;

        let errs = errors(&request, ValidationMode::Create);
        assert!(errs.iter().any(|e| e.contains("fee_cents")));
    }

    #[test]
    fn test_check_item_sanity() {
        let mut request = base_request(TransactionType::Deposit, 10_000);
        request.check_items = vec![CheckItem {
            reference: String::new(),
            amount_cents: 0,
        }];

        let errs = errors(&request, ValidationMode::Create);
        assert!(errs.iter().any(|e| e.contains("check_items[0].reference")));
        assert!(errs.iter().any(|e| e.contains("check_items[0].amount_cents")));
    }

    #[test]
    fn test_reversal_not_directly_submittable() {
        let request = base_request(TransactionType::Reversal, 10_000);
        let errs = errors(&request, ValidationMode::Create);
        assert!(errs.iter().any(|e| e.contains("cannot be submitted")));
    }

    #[test]
    fn test_misc_receipt_requires_income_reference() {
        let request = base_request(TransactionType::MiscReceipt, 2_500);
        let errs = errors(&request, ValidationMode::Create);
        assert!(
            errs.iter()
                .any(|e| e.contains("misc_receipt_income_reference"))
        );
    }
}
