//! Physical drawer cash effect derivation.
//!
//! The cash movement is the physical-drawer side effect of a posting,
//! separate from the ledger legs: at most one per teller transaction,
//! aggregated across its cash-referenced legs. A transaction with no cash
//! leg (e.g. a pure transfer) has none.

use serde::{Deserialize, Serialize};

use crate::ledger::LegInput;
use crate::reference;
use crate::request::TransactionType;

/// Direction of physical cash relative to the drawer/vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashDirection {
    /// Cash taken in.
    In,
    /// Cash paid out.
    Out,
}

impl CashDirection {
    /// Returns the string representation of the direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// The derived cash movement of a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashMovementInput {
    /// Whether cash moved in or out.
    pub direction: CashDirection,
    /// Net amount moved, in cents (> 0).
    pub amount_cents: i64,
    /// Drawer/vault code the movement applies to.
    pub cash_location_code: String,
}

/// Derives the cash movement of a batch, if any.
///
/// The net is summed over cash-referenced legs (debits in, credits out). For
/// vault transfers only the teller's own drawer counts, so a vault-to-vault
/// move produces no drawer movement and the direction of the other two
/// follows whether the drawer was debited or credited.
#[must_use]
pub fn derive(
    transaction_type: TransactionType,
    legs: &[LegInput],
    drawer_reference: &str,
) -> Option<CashMovementInput> {
    let counts = |leg: &LegInput| -> bool {
        if transaction_type == TransactionType::VaultTransfer {
            leg.account_reference == drawer_reference
        } else {
            reference::is_cash(&leg.account_reference)
        }
    };

    let mut net: i64 = 0;
    let mut location: Option<String> = None;

    for leg in legs.iter().filter(|leg| counts(leg)) {
        net += leg.signed_cents();
        if location.is_none() {
            location = reference::cash_code(&leg.account_reference).map(ToString::to_string);
        }
    }

    let cash_location_code = location?;

    match net {
        0 => None,
        n if n > 0 => Some(CashMovementInput {
            direction: CashDirection::In,
            amount_cents: n,
            cash_location_code,
        }),
        n => Some(CashMovementInput {
            direction: CashDirection::Out,
            amount_cents: -n,
            cash_location_code,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAWER: &str = "cash:DR-01";

    #[test]
    fn test_deposit_cash_in() {
        let legs = vec![
            LegInput::debit(DRAWER, 10_000),
            LegInput::credit("ACC1", 10_000),
        ];

        let movement = derive(TransactionType::Deposit, &legs, DRAWER).unwrap();
        assert_eq!(movement.direction, CashDirection::In);
        assert_eq!(movement.amount_cents, 10_000);
        assert_eq!(movement.cash_location_code, "DR-01");
    }

    #[test]
    fn test_withdrawal_cash_out() {
        let legs = vec![
            LegInput::debit("ACC1", 7_550),
            LegInput::credit(DRAWER, 7_550),
        ];

        let movement = derive(TransactionType::Withdrawal, &legs, DRAWER).unwrap();
        assert_eq!(movement.direction, CashDirection::Out);
        assert_eq!(movement.amount_cents, 7_550);
    }

    #[test]
    fn test_pure_transfer_has_no_movement() {
        let legs = vec![
            LegInput::debit("ACC1", 5_000),
            LegInput::credit("ACC2", 5_000),
        ];

        assert_eq!(derive(TransactionType::Transfer, &legs, DRAWER), None);
    }

    #[test]
    fn test_deposit_with_cash_back_nets() {
        let legs = vec![
            LegInput::debit(DRAWER, 10_000),
            LegInput::credit("ACC1", 8_000),
            LegInput::credit(DRAWER, 2_000),
        ];

        let movement = derive(TransactionType::Deposit, &legs, DRAWER).unwrap();
        assert_eq!(movement.direction, CashDirection::In);
        assert_eq!(movement.amount_cents, 8_000);
    }

    #[test]
    fn test_check_deposit_with_cash_back_nets_out() {
        // All-check deposit with cash back: drawer pays out.
        let legs = vec![
            LegInput::debit("check:1", 10_000),
            LegInput::credit("ACC1", 8_000),
            LegInput::credit(DRAWER, 2_000),
        ];

        let movement = derive(TransactionType::Deposit, &legs, DRAWER).unwrap();
        assert_eq!(movement.direction, CashDirection::Out);
        assert_eq!(movement.amount_cents, 2_000);
    }

    #[test]
    fn test_vault_transfer_drawer_to_vault() {
        let legs = vec![
            LegInput::debit("cash:VAULT", 50_000),
            LegInput::credit(DRAWER, 50_000),
        ];

        let movement = derive(TransactionType::VaultTransfer, &legs, DRAWER).unwrap();
        assert_eq!(movement.direction, CashDirection::Out);
        assert_eq!(movement.amount_cents, 50_000);
        assert_eq!(movement.cash_location_code, "DR-01");
    }

    #[test]
    fn test_vault_transfer_vault_to_drawer() {
        let legs = vec![
            LegInput::debit(DRAWER, 50_000),
            LegInput::credit("cash:VAULT", 50_000),
        ];

        let movement = derive(TransactionType::VaultTransfer, &legs, DRAWER).unwrap();
        assert_eq!(movement.direction, CashDirection::In);
    }

    #[test]
    fn test_vault_to_vault_has_no_drawer_movement() {
        let legs = vec![
            LegInput::debit("cash:VAULT-B", 50_000),
            LegInput::credit("cash:VAULT-A", 50_000),
        ];

        assert_eq!(derive(TransactionType::VaultTransfer, &legs, DRAWER), None);
    }

    #[test]
    fn test_reversed_deposit_moves_cash_out() {
        let legs = vec![
            LegInput::credit(DRAWER, 10_000),
            LegInput::debit("ACC1", 10_000),
        ];

        let movement = derive(TransactionType::Deposit, &legs, DRAWER).unwrap();
        assert_eq!(movement.direction, CashDirection::Out);
        assert_eq!(movement.amount_cents, 10_000);
    }
}
