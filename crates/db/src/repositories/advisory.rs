//! Advisory repository: loads the compliance scopes affected by a posting
//! and evaluates the advisory gate.
//!
//! The gate itself is pure (`tellerpoint_core::advisory`); this repository
//! only collects the active scopes - the primary account, its holder party,
//! and an explicitly supplied party - and their advisories/acknowledgments.

use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use tellerpoint_core::advisory::{self, Acknowledgment, Advisory, AdvisoryDecision};

use crate::entities::{
    advisories, advisory_acknowledgments,
    sea_orm_active_enums::{AdvisoryScopeKind, AdvisorySeverity},
};
use crate::repositories::account::{ResolvedReference, resolve_on};

/// Advisory repository.
#[derive(Debug, Clone)]
pub struct AdvisoryRepository {
    db: DatabaseConnection,
}

impl AdvisoryRepository {
    /// Creates a new advisory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Evaluates the advisory gate for a posting.
    ///
    /// Resolves the affected account and its primary owner (plus an explicit
    /// party, if supplied) into compliance scopes and evaluates every active
    /// advisory attached to them, severity descending. Fails closed: any
    /// lookup error aborts the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if any lookup fails.
    pub async fn check_posting_allowed(
        &self,
        primary_account_reference: Option<&str>,
        party_id: Option<Uuid>,
        acknowledged_advisory_ids: &[Uuid],
        user_id: Uuid,
    ) -> Result<AdvisoryDecision, DbErr> {
        let mut scopes: Vec<(AdvisoryScopeKind, Uuid)> = Vec::new();

        if let Some(reference) = primary_account_reference
            && let ResolvedReference::Account(account) = resolve_on(&self.db, reference).await?
        {
            scopes.push((AdvisoryScopeKind::Account, account.id));
            scopes.push((AdvisoryScopeKind::Party, account.holder_party_id));
        }

        if let Some(party) = party_id
            && !scopes
                .iter()
                .any(|(kind, id)| *kind == AdvisoryScopeKind::Party && *id == party)
        {
            scopes.push((AdvisoryScopeKind::Party, party));
        }

        if scopes.is_empty() {
            return Ok(AdvisoryDecision::Allowed);
        }

        let mut scope_condition = Condition::any();
        for (kind, id) in &scopes {
            scope_condition = scope_condition.add(
                Condition::all()
                    .add(advisories::Column::ScopeKind.eq(kind.clone()))
                    .add(advisories::Column::ScopeId.eq(*id)),
            );
        }

        let advisory_models = advisories::Entity::find()
            .filter(scope_condition)
            .order_by_desc(advisories::Column::Severity)
            .all(&self.db)
            .await?;

        let advisory_ids: Vec<Uuid> = advisory_models.iter().map(|a| a.id).collect();
        let acknowledgment_models = if advisory_ids.is_empty() {
            vec![]
        } else {
            advisory_acknowledgments::Entity::find()
                .filter(advisory_acknowledgments::Column::AdvisoryId.is_in(advisory_ids))
                .filter(advisory_acknowledgments::Column::UserId.eq(user_id))
                .all(&self.db)
                .await?
        };

        let advisories: Vec<Advisory> = advisory_models.into_iter().map(to_core_advisory).collect();
        let acknowledgments: Vec<Acknowledgment> = acknowledgment_models
            .into_iter()
            .map(|ack| Acknowledgment {
                advisory_id: ack.advisory_id,
                user_id: ack.user_id,
                acknowledged_at: ack.acknowledged_at.to_utc(),
            })
            .collect();

        Ok(advisory::evaluate(
            &advisories,
            &acknowledgments,
            acknowledged_advisory_ids,
            user_id,
            Utc::now(),
        ))
    }
}

/// Converts a db advisory row into the core gate type.
fn to_core_advisory(model: advisories::Model) -> Advisory {
    Advisory {
        id: model.id,
        severity: to_core_severity(&model.severity),
        title: model.title,
        effective_start_at: model.effective_start_at.map(|t| t.to_utc()),
        effective_end_at: model.effective_end_at.map(|t| t.to_utc()),
        updated_at: model.updated_at.to_utc(),
    }
}

/// Converts a db severity into the core severity.
fn to_core_severity(severity: &AdvisorySeverity) -> advisory::AdvisorySeverity {
    match severity {
        AdvisorySeverity::Info => advisory::AdvisorySeverity::Info,
        AdvisorySeverity::Notice => advisory::AdvisorySeverity::Notice,
        AdvisorySeverity::RequiresAcknowledgment => {
            advisory::AdvisorySeverity::RequiresAcknowledgment
        }
        AdvisorySeverity::Restriction => advisory::AdvisorySeverity::Restriction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping_is_order_preserving() {
        let mapped = [
            to_core_severity(&AdvisorySeverity::Info),
            to_core_severity(&AdvisorySeverity::Notice),
            to_core_severity(&AdvisorySeverity::RequiresAcknowledgment),
            to_core_severity(&AdvisorySeverity::Restriction),
        ];
        for pair in mapped.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
