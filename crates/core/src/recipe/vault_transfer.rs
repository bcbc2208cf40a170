//! Vault transfer recipe.
//!
//! Moves physical cash between the teller's drawer and a vault, or between
//! two vaults. The leg pair always debits the destination cash reference
//! and credits the source, both resolved from the direction.

use serde_json::json;

use super::Recipe;
use crate::ledger::LegInput;
use crate::request::{PostingRequest, VaultDirection};

/// Recipe for drawer/vault cash movements.
#[derive(Debug)]
pub struct VaultTransferRecipe<'a> {
    request: &'a PostingRequest,
}

impl<'a> VaultTransferRecipe<'a> {
    /// Creates the recipe for a vault-transfer request.
    #[must_use]
    pub const fn new(request: &'a PostingRequest) -> Self {
        Self { request }
    }

    /// Resolves (source, destination) from the direction and the teller's
    /// own drawer.
    fn endpoints(&self) -> Option<(String, String)> {
        let request = self.request;
        let drawer = request.cash_reference().to_string();
        let vault = request.vault_reference.clone().unwrap_or_default();

        let (source, destination) = match request.vault_transfer_direction? {
            VaultDirection::DrawerToVault => (drawer, vault),
            VaultDirection::VaultToDrawer => (vault, drawer),
            VaultDirection::VaultToVault => {
                let secondary = request.vault_secondary_reference.clone().unwrap_or_default();
                (vault, secondary)
            }
        };

        if source.trim().is_empty() || destination.trim().is_empty() || source == destination {
            return None;
        }
        Some((source, destination))
    }
}

impl Recipe for VaultTransferRecipe<'_> {
    fn normalized_entries(&self) -> Vec<LegInput> {
        if self.request.amount_cents <= 0 {
            return vec![];
        }

        let Some((source, destination)) = self.endpoints() else {
            return vec![];
        };

        vec![
            LegInput::debit(destination, self.request.amount_cents),
            LegInput::credit(source, self.request.amount_cents),
        ]
    }

    fn posting_metadata(&self) -> serde_json::Value {
        let endpoints = self.endpoints();
        json!({
            "direction": self.request.vault_transfer_direction.map(|d| d.as_str()),
            "source": endpoints.as_ref().map(|(source, _)| source.clone()),
            "destination": endpoints.as_ref().map(|(_, destination)| destination.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::validate_legs;
    use crate::request::TransactionType;
    use crate::testutil::base_request;

    fn vault_transfer(direction: VaultDirection, amount: i64) -> PostingRequest {
        let mut request = base_request(TransactionType::VaultTransfer, amount);
        request.primary_account_reference = None;
        request.vault_transfer_direction = Some(direction);
        request.vault_reference = Some("cash:VAULT".to_string());
        request
    }

    #[test]
    fn test_drawer_to_vault() {
        let request = vault_transfer(VaultDirection::DrawerToVault, 50_000);
        let legs = VaultTransferRecipe::new(&request).normalized_entries();

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0], LegInput::debit("cash:VAULT", 50_000));
        assert_eq!(legs[1], LegInput::credit("cash:DR-01", 50_000));
        assert!(validate_legs(&legs).is_ok());
    }

    #[test]
    fn test_vault_to_drawer() {
        let request = vault_transfer(VaultDirection::VaultToDrawer, 50_000);
        let legs = VaultTransferRecipe::new(&request).normalized_entries();

        assert_eq!(legs[0], LegInput::debit("cash:DR-01", 50_000));
        assert_eq!(legs[1], LegInput::credit("cash:VAULT", 50_000));
    }

    #[test]
    fn test_vault_to_vault() {
        let mut request = vault_transfer(VaultDirection::VaultToVault, 75_000);
        request.vault_secondary_reference = Some("cash:VAULT-B".to_string());

        let legs = VaultTransferRecipe::new(&request).normalized_entries();
        assert_eq!(legs[0], LegInput::debit("cash:VAULT-B", 75_000));
        assert_eq!(legs[1], LegInput::credit("cash:VAULT", 75_000));
    }

    #[test]
    fn test_same_source_and_destination_rejected() {
        let mut request = vault_transfer(VaultDirection::VaultToVault, 75_000);
        request.vault_secondary_reference = Some("cash:VAULT".to_string());

        assert!(VaultTransferRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_blank_endpoint_rejected() {
        let mut request = vault_transfer(VaultDirection::DrawerToVault, 75_000);
        request.vault_reference = Some(String::new());

        assert!(VaultTransferRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_missing_direction_rejected() {
        let mut request = vault_transfer(VaultDirection::DrawerToVault, 75_000);
        request.vault_transfer_direction = None;

        assert!(VaultTransferRecipe::new(&request).normalized_entries().is_empty());
    }

    #[test]
    fn test_metadata_carries_resolved_endpoints() {
        let request = vault_transfer(VaultDirection::DrawerToVault, 50_000);
        let metadata = VaultTransferRecipe::new(&request).posting_metadata();

        assert_eq!(metadata["direction"], "drawer_to_vault");
        assert_eq!(metadata["source"], "cash:DR-01");
        assert_eq!(metadata["destination"], "cash:VAULT");
    }
}
