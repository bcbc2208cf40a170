//! Account reference classification.
//!
//! A reference is an opaque string addressing a ledger bucket: a real
//! customer account by number, a cash drawer/vault by code, a pending-check
//! holding area, or an internal income/liability bucket. Classification is
//! pure; resolution against the account table happens in the db layer and is
//! used for attribution only.

use serde::{Deserialize, Serialize};

/// Prefix addressing a cash drawer or vault by code.
pub const CASH_PREFIX: &str = "cash:";

/// Prefix addressing a pending check-item bucket.
pub const CHECK_PREFIX: &str = "check:";

/// Internal bucket collecting transaction fees.
pub const FEE_INCOME: &str = "income:fees";

/// Internal liability bucket for outstanding official checks / drafts.
pub const OFFICIAL_CHECK_OUTSTANDING: &str = "official_check:outstanding";

/// The kind of bucket a reference addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// A cash drawer or vault (`cash:<code>`).
    Cash,
    /// A pending check-item bucket (`check:<id>`).
    Check,
    /// A customer-account candidate (resolved against the account table).
    Account,
    /// An internal income/liability bucket (`income:…`, `official_check:…`).
    Internal,
}

/// Classifies a reference by its prefix.
///
/// Total: every string maps to exactly one kind. An `Account` result is a
/// candidate only - a reference that matches no persisted account number
/// resolves to `Internal` at attribution time.
#[must_use]
pub fn classify(reference: &str) -> ReferenceKind {
    if reference.starts_with(CASH_PREFIX) {
        ReferenceKind::Cash
    } else if reference.starts_with(CHECK_PREFIX) {
        ReferenceKind::Check
    } else if reference.contains(':') {
        ReferenceKind::Internal
    } else {
        ReferenceKind::Account
    }
}

/// Returns the drawer/vault code of a cash reference, if it is one.
#[must_use]
pub fn cash_code(reference: &str) -> Option<&str> {
    reference.strip_prefix(CASH_PREFIX)
}

/// Returns true if the reference addresses a cash drawer or vault.
#[must_use]
pub fn is_cash(reference: &str) -> bool {
    reference.starts_with(CASH_PREFIX)
}

/// Returns true if the reference addresses a pending check-item bucket.
#[must_use]
pub fn is_check(reference: &str) -> bool {
    reference.starts_with(CHECK_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cash:DR-01", ReferenceKind::Cash)]
    #[case("cash:VAULT", ReferenceKind::Cash)]
    #[case("check:77123", ReferenceKind::Check)]
    #[case("income:fees", ReferenceKind::Internal)]
    #[case("official_check:outstanding", ReferenceKind::Internal)]
    #[case("ACC1", ReferenceKind::Account)]
    #[case("10044-7", ReferenceKind::Account)]
    #[case("", ReferenceKind::Account)]
    fn test_classify(#[case] reference: &str, #[case] expected: ReferenceKind) {
        assert_eq!(classify(reference), expected);
    }

    #[test]
    fn test_cash_code() {
        assert_eq!(cash_code("cash:DR-01"), Some("DR-01"));
        assert_eq!(cash_code("ACC1"), None);
    }

    #[test]
    fn test_is_cash_is_check() {
        assert!(is_cash("cash:VAULT"));
        assert!(!is_cash("check:1"));
        assert!(is_check("check:1"));
        assert!(!is_check("income:fees"));
    }
}
