//! Posting engine: runs the pipeline end-to-end and performs the atomic
//! commit.
//!
//! Sequence: validate -> advisory gate -> approval gate -> recipe -> balance
//! invariant -> one database transaction inserting the teller transaction,
//! its posting batch, the legs in position order, one account transaction
//! per leg that resolves to a real account, and at most one cash movement.
//! Any failure before the transaction opens persists nothing; any failure
//! inside it rolls everything back.
//!
//! External gate work (advisory lookup, token verification) always completes
//! before the database transaction begins and fails the pipeline closed.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use tellerpoint_core::advisory::AdvisoryDecision;
use tellerpoint_core::approval::ApprovalPolicy;
use tellerpoint_core::cash_movement;
use tellerpoint_core::ledger::{LegInput, LegSide, validate_legs};
use tellerpoint_core::recipe::{Recipe, RecipeKind};
use tellerpoint_core::request::{PostingRequest, TransactionType};
use tellerpoint_core::reversal;
use tellerpoint_core::validation::{self, ValidationMode};
use tellerpoint_shared::{AppError, ApprovalTokenError, ApprovalTokenService, TellerContext};

use crate::entities::{
    account_transactions, cash_movements, posting_batches, posting_legs,
    sea_orm_active_enums::{
        CashDirection, LegSide as DbLegSide, PostingBatchStatus, TellerTransactionStatus,
        TellerTransactionType,
    },
    teller_transactions,
};
use crate::repositories::account::{ResolvedReference, resolve_on};
use crate::repositories::advisory::AdvisoryRepository;

/// Error types for posting operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Request shape or recipe reconciliation failure.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An advisory blocks the posting.
    #[error("Posting blocked by advisory: {title}")]
    ComplianceBlocked {
        /// Title of the blocking advisory.
        title: String,
    },

    /// Supervisor approval required but no token supplied.
    #[error("Supervisor approval is required for this amount")]
    ApprovalRequired,

    /// Supervisor approval token failed verification.
    #[error("Approval token rejected: {0}")]
    ApprovalInvalid(#[from] ApprovalTokenError),

    /// A posting with this request id already exists.
    #[error("Request {0} was already submitted")]
    DuplicateRequest(String),

    /// The transaction cannot be reversed.
    #[error("Cannot reverse transaction: {0}")]
    NotReversible(String),

    /// Teller transaction not found.
    #[error("Teller transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// A recipe emitted an unbalanced batch (programming invariant).
    #[error("Posting batch violates the balance invariant: {0}")]
    UnbalancedBatch(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl PostingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::NotReversible(_) => 400,
            Self::ComplianceBlocked { .. } | Self::ApprovalRequired | Self::ApprovalInvalid(_) => {
                403
            }
            Self::TransactionNotFound(_) => 404,
            Self::DuplicateRequest(_) => 409,
            Self::UnbalancedBatch(_) | Self::Database(_) => 500,
        }
    }
}

impl From<PostingError> for AppError {
    fn from(err: PostingError) -> Self {
        match err {
            PostingError::Validation(message) => Self::Validation(message),
            PostingError::ComplianceBlocked { title } => Self::ComplianceBlocked(title),
            PostingError::ApprovalRequired => Self::ApprovalRequired,
            PostingError::ApprovalInvalid(inner) => Self::ApprovalInvalid(inner.to_string()),
            PostingError::DuplicateRequest(request_id) => Self::DuplicateRequest(request_id),
            PostingError::NotReversible(message) => Self::BusinessRule(message),
            PostingError::TransactionNotFound(id) => Self::NotFound(id.to_string()),
            PostingError::UnbalancedBatch(message) => Self::Internal(message),
            PostingError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// A committed teller transaction with its posting batch.
#[derive(Debug, Clone)]
pub struct PostedBatch {
    /// The committed teller transaction.
    pub teller_transaction: teller_transactions::Model,
    /// Its posting batch.
    pub posting_batch: posting_batches::Model,
}

/// Result of reversing a posted transaction.
#[derive(Debug, Clone)]
pub struct ReversalResult {
    /// The original transaction with its reversal link set.
    pub original_transaction: teller_transactions::Model,
    /// The newly posted mirror transaction and batch.
    pub reversal: PostedBatch,
}

/// Posting repository: the engine's commit boundary.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
    approval_tokens: ApprovalTokenService,
    approval_policy: ApprovalPolicy,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub const fn new(
        db: DatabaseConnection,
        approval_tokens: ApprovalTokenService,
        approval_policy: ApprovalPolicy,
    ) -> Self {
        Self {
            db,
            approval_tokens,
            approval_policy,
        }
    }

    /// Posts a teller request as one balanced, atomic ledger commit.
    ///
    /// # Errors
    ///
    /// Returns a gate error (validation/compliance/approval), a
    /// `DuplicateRequest` conflict when the request id was already used, or
    /// a database error - in which case the whole commit rolled back.
    pub async fn post(
        &self,
        request: PostingRequest,
        ctx: &TellerContext,
    ) -> Result<PostedBatch, PostingError> {
        let request = request.with_drawer(&ctx.drawer_reference);

        // 1. Shape validation, before any money logic.
        let errors = validation::errors(&request, ValidationMode::Create);
        if !errors.is_empty() {
            return Err(PostingError::Validation(errors.join("; ")));
        }

        // 2. Advisory gate, fails closed.
        let decision = AdvisoryRepository::new(self.db.clone())
            .check_posting_allowed(
                request.primary_account_reference.as_deref(),
                request.party_id,
                &request.acknowledged_advisory_ids,
                ctx.user_id,
            )
            .await?;
        if let AdvisoryDecision::Blocked { advisory, .. } = decision {
            return Err(PostingError::ComplianceBlocked {
                title: advisory.title,
            });
        }

        // 3. Approval gate: verify the token against this request id.
        let approved_by = if self.approval_policy.required(request.amount_cents) {
            let token = request
                .approval_token
                .as_deref()
                .ok_or(PostingError::ApprovalRequired)?;
            Some(self.approval_tokens.verify(token, &request.request_id)?)
        } else {
            None
        };

        // 4. Recipe: derive the normalized leg list and metadata.
        let recipe = RecipeKind::for_request(&request).ok_or_else(|| {
            PostingError::Validation(format!(
                "transaction type {} has no posting recipe",
                request.transaction_type
            ))
        })?;
        let legs = recipe.normalized_entries();
        if legs.is_empty() {
            return Err(PostingError::Validation(
                "posting entries do not reconcile with the request amounts".to_string(),
            ));
        }
        let metadata = recipe.posting_metadata();

        // 5. Balance invariant, asserted before the transaction opens.
        validate_legs(&legs).map_err(|violation| {
            PostingError::UnbalancedBatch(violation.to_string())
        })?;

        // 6. Atomic commit.
        let txn = self.db.begin().await?;
        let result = self
            .commit_batch(
                &txn,
                &request.request_id,
                request.transaction_type,
                request.amount_cents,
                &request.currency,
                approved_by,
                None,
                None,
                &legs,
                metadata,
                ctx,
            )
            .await;

        match result {
            Ok(posted) => {
                txn.commit().await?;
                info!(
                    request_id = %posted.teller_transaction.request_id,
                    teller_transaction_id = %posted.teller_transaction.id,
                    transaction_type = %request.transaction_type,
                    amount_cents = request.amount_cents,
                    "posting committed"
                );
                Ok(posted)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// Reverses a posted teller transaction.
    ///
    /// Posts a new `reversal` transaction whose batch flips every original
    /// leg's side, links both directions, and stamps the original row - all
    /// inside one database transaction.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound`, `NotReversible` when the type forbids
    /// it or it was already reversed, or a database error.
    pub async fn reverse(
        &self,
        teller_transaction_id: Uuid,
        ctx: &TellerContext,
    ) -> Result<ReversalResult, PostingError> {
        let original = teller_transactions::Entity::find_by_id(teller_transaction_id)
            .one(&self.db)
            .await?
            .ok_or(PostingError::TransactionNotFound(teller_transaction_id))?;

        let original_type = db_type_to_core(&original.transaction_type);
        reversal::ensure_reversible(original_type, original.reversed_by_teller_transaction_id)
            .map_err(|err| PostingError::NotReversible(err.to_string()))?;

        let original_batch = posting_batches::Entity::find()
            .filter(posting_batches::Column::TellerTransactionId.eq(teller_transaction_id))
            .one(&self.db)
            .await?
            .ok_or(PostingError::TransactionNotFound(teller_transaction_id))?;

        let original_legs = self.batch_legs(original_batch.id).await?;
        let mirror_legs = reversal::reversing_legs(&original_legs);
        validate_legs(&mirror_legs)
            .map_err(|violation| PostingError::UnbalancedBatch(violation.to_string()))?;

        // Deterministic: at most one reversal per transaction, so the mirror
        // request id races safely on its uniqueness constraint.
        let mirror_request_id = format!("rev-{}", original.request_id);
        let metadata = serde_json::json!({
            "reversal_of_request_id": original.request_id.clone(),
            "reversal_of_teller_transaction_id": original.id,
        });

        let txn = self.db.begin().await?;
        let result = self
            .commit_reversal(
                &txn,
                &original,
                &original_batch,
                original_type,
                &mirror_request_id,
                &mirror_legs,
                metadata,
                ctx,
            )
            .await;

        match result {
            Ok(reversal_result) => {
                txn.commit().await?;
                info!(
                    original_id = %reversal_result.original_transaction.id,
                    reversal_id = %reversal_result.reversal.teller_transaction.id,
                    "reversal committed"
                );
                Ok(reversal_result)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// Looks up a committed posting by its request id (the resolve path for
    /// `DuplicateRequest` callers).
    ///
    /// # Errors
    ///
    /// Returns a database error if the lookup fails.
    pub async fn find_by_request_id(
        &self,
        request_id: &str,
    ) -> Result<Option<PostedBatch>, PostingError> {
        let Some(transaction) = teller_transactions::Entity::find()
            .filter(teller_transactions::Column::RequestId.eq(request_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let batch = posting_batches::Entity::find()
            .filter(posting_batches::Column::TellerTransactionId.eq(transaction.id))
            .one(&self.db)
            .await?
            .ok_or(PostingError::TransactionNotFound(transaction.id))?;

        Ok(Some(PostedBatch {
            teller_transaction: transaction,
            posting_batch: batch,
        }))
    }

    /// Loads a batch's legs in position order.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn batch_legs(&self, posting_batch_id: Uuid) -> Result<Vec<LegInput>, PostingError> {
        let rows = posting_legs::Entity::find()
            .filter(posting_legs::Column::PostingBatchId.eq(posting_batch_id))
            .order_by_asc(posting_legs::Column::Position)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| LegInput::new(db_side_to_core(&row.side), row.account_reference, row.amount_cents))
            .collect())
    }

    /// Inserts the full batch inside an open transaction.
    #[allow(clippy::too_many_arguments)]
    async fn commit_batch(
        &self,
        txn: &DatabaseTransaction,
        request_id: &str,
        transaction_type: TransactionType,
        amount_cents: i64,
        currency: &str,
        approved_by: Option<Uuid>,
        reversal_of_teller_transaction_id: Option<Uuid>,
        reversal_of_posting_batch_id: Option<Uuid>,
        legs: &[LegInput],
        metadata: serde_json::Value,
        ctx: &TellerContext,
    ) -> Result<PostedBatch, PostingError> {
        let now = Utc::now().into();
        let transaction_id = Uuid::new_v4();
        let batch_id = Uuid::new_v4();

        let transaction = teller_transactions::ActiveModel {
            id: Set(transaction_id),
            request_id: Set(request_id.to_string()),
            transaction_type: Set(core_type_to_db(transaction_type)),
            amount_cents: Set(amount_cents),
            currency: Set(currency.to_string()),
            status: Set(TellerTransactionStatus::Posted),
            posted_at: Set(now),
            posted_by_user_id: Set(ctx.user_id),
            approved_by_user_id: Set(approved_by),
            branch_code: Set(ctx.branch_code.clone()),
            workstation_code: Set(ctx.workstation_code.clone()),
            teller_session_id: Set(ctx.teller_session_id),
            reversal_of_teller_transaction_id: Set(reversal_of_teller_transaction_id),
            reversed_by_teller_transaction_id: Set(None),
            reversed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let transaction = transaction
            .insert(txn)
            .await
            .map_err(|err| map_unique_violation(err, request_id))?;

        let batch = posting_batches::ActiveModel {
            id: Set(batch_id),
            teller_transaction_id: Set(transaction_id),
            request_id: Set(request_id.to_string()),
            currency: Set(currency.to_string()),
            status: Set(PostingBatchStatus::Committed),
            committed_at: Set(now),
            metadata: Set(metadata),
            reversal_of_posting_batch_id: Set(reversal_of_posting_batch_id),
            created_at: Set(now),
        };
        let batch = batch
            .insert(txn)
            .await
            .map_err(|err| map_unique_violation(err, request_id))?;

        for (position, leg) in legs.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let leg_row = posting_legs::ActiveModel {
                id: Set(Uuid::new_v4()),
                posting_batch_id: Set(batch_id),
                side: Set(core_side_to_db(leg.side)),
                account_reference: Set(leg.account_reference.clone()),
                amount_cents: Set(leg.amount_cents),
                position: Set(position as i32),
                created_at: Set(now),
            };
            leg_row.insert(txn).await?;
        }

        self.insert_account_transactions(txn, batch_id, transaction_type, legs, now)
            .await?;

        if let Some(movement) = cash_movement::derive(transaction_type, legs, &ctx.drawer_reference)
        {
            let movement_row = cash_movements::ActiveModel {
                id: Set(Uuid::new_v4()),
                teller_transaction_id: Set(transaction_id),
                direction: Set(core_cash_direction_to_db(movement.direction)),
                amount_cents: Set(movement.amount_cents),
                teller_session_id: Set(ctx.teller_session_id),
                cash_location_code: Set(movement.cash_location_code),
                created_at: Set(now),
            };
            movement_row.insert(txn).await?;
        }

        Ok(PostedBatch {
            teller_transaction: transaction,
            posting_batch: batch,
        })
    }

    /// Materializes one account transaction per leg that resolves to a real
    /// account, with a running balance snapshot.
    async fn insert_account_transactions(
        &self,
        txn: &DatabaseTransaction,
        batch_id: Uuid,
        transaction_type: TransactionType,
        legs: &[LegInput],
        now: chrono::DateTime<chrono::FixedOffset>,
    ) -> Result<(), PostingError> {
        // Track per-account (sequence, balance) across legs of this batch.
        let mut balances: HashMap<Uuid, (i64, i64)> = HashMap::new();

        for leg in legs {
            let ResolvedReference::Account(account) = resolve_on(txn, &leg.account_reference).await?
            else {
                continue;
            };

            let (sequence, prior_balance) = if let Some(&(seq, bal)) = balances.get(&account.id) {
                (seq + 1, bal)
            } else {
                let latest = account_transactions::Entity::find()
                    .filter(account_transactions::Column::AccountId.eq(account.id))
                    .order_by_desc(account_transactions::Column::AccountSequence)
                    .limit(1)
                    .one(txn)
                    .await?;
                match latest {
                    Some(row) => (row.account_sequence + 1, row.running_balance_cents),
                    None => (1, 0),
                }
            };

            // Customer balance = sum(credits) - sum(debits).
            let running_balance = match leg.side {
                LegSide::Credit => prior_balance + leg.amount_cents,
                LegSide::Debit => prior_balance - leg.amount_cents,
            };
            balances.insert(account.id, (sequence, running_balance));

            let row = account_transactions::ActiveModel {
                id: Set(Uuid::new_v4()),
                posting_batch_id: Set(batch_id),
                account_id: Set(Some(account.id)),
                account_reference: Set(leg.account_reference.clone()),
                direction: Set(core_side_to_db(leg.side)),
                amount_cents: Set(leg.amount_cents),
                running_balance_cents: Set(running_balance),
                account_sequence: Set(sequence),
                description: Set(transaction_type.as_str().to_string()),
                created_at: Set(now),
            };
            row.insert(txn).await?;
        }

        Ok(())
    }

    /// Inserts the mirror batch and stamps the original row.
    #[allow(clippy::too_many_arguments)]
    async fn commit_reversal(
        &self,
        txn: &DatabaseTransaction,
        original: &teller_transactions::Model,
        original_batch: &posting_batches::Model,
        original_type: TransactionType,
        mirror_request_id: &str,
        mirror_legs: &[LegInput],
        metadata: serde_json::Value,
        ctx: &TellerContext,
    ) -> Result<ReversalResult, PostingError> {
        let reversal = self
            .commit_batch(
                txn,
                mirror_request_id,
                TransactionType::Reversal,
                original.amount_cents,
                &original.currency,
                None,
                Some(original.id),
                Some(original_batch.id),
                mirror_legs,
                metadata,
                ctx,
            )
            .await?;

        // Vault reversals take the drawer-relative rule; the `Reversal`
        // derivation in commit_batch nets their cash legs to zero.
        if original_type == TransactionType::VaultTransfer
            && let Some(movement) =
                cash_movement::derive(original_type, mirror_legs, &ctx.drawer_reference)
        {
            let movement_row = cash_movements::ActiveModel {
                id: Set(Uuid::new_v4()),
                teller_transaction_id: Set(reversal.teller_transaction.id),
                direction: Set(core_cash_direction_to_db(movement.direction)),
                amount_cents: Set(movement.amount_cents),
                teller_session_id: Set(ctx.teller_session_id),
                cash_location_code: Set(movement.cash_location_code),
                created_at: Set(Utc::now().into()),
            };
            movement_row.insert(txn).await?;
        }

        let now = Utc::now().into();
        let mut original_active: teller_transactions::ActiveModel = original.clone().into();
        original_active.reversed_by_teller_transaction_id =
            Set(Some(reversal.teller_transaction.id));
        original_active.reversed_at = Set(Some(now));
        original_active.updated_at = Set(now);
        let original_transaction = original_active.update(txn).await?;

        Ok(ReversalResult {
            original_transaction,
            reversal,
        })
    }
}

/// Maps a unique-constraint violation on the request id to the conflict
/// error; callers must resolve it by querying, not by retrying with a new id.
fn map_unique_violation(err: DbErr, request_id: &str) -> PostingError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            PostingError::DuplicateRequest(request_id.to_string())
        }
        _ => PostingError::Database(err),
    }
}

// ============================================================================
// Core <-> DB enum mapping
// ============================================================================

/// Converts a core transaction type to the db enum.
#[must_use]
pub fn core_type_to_db(transaction_type: TransactionType) -> TellerTransactionType {
    match transaction_type {
        TransactionType::Deposit => TellerTransactionType::Deposit,
        TransactionType::Withdrawal => TellerTransactionType::Withdrawal,
        TransactionType::Transfer => TellerTransactionType::Transfer,
        TransactionType::CheckCashing => TellerTransactionType::CheckCashing,
        TransactionType::Draft => TellerTransactionType::Draft,
        TransactionType::VaultTransfer => TellerTransactionType::VaultTransfer,
        TransactionType::MiscReceipt => TellerTransactionType::MiscReceipt,
        TransactionType::Reversal => TellerTransactionType::Reversal,
        TransactionType::SessionCloseVariance => TellerTransactionType::SessionCloseVariance,
    }
}

/// Converts a db transaction type to the core enum.
#[must_use]
pub fn db_type_to_core(transaction_type: &TellerTransactionType) -> TransactionType {
    match transaction_type {
        TellerTransactionType::Deposit => TransactionType::Deposit,
        TellerTransactionType::Withdrawal => TransactionType::Withdrawal,
        TellerTransactionType::Transfer => TransactionType::Transfer,
        TellerTransactionType::CheckCashing => TransactionType::CheckCashing,
        TellerTransactionType::Draft => TransactionType::Draft,
        TellerTransactionType::VaultTransfer => TransactionType::VaultTransfer,
        TellerTransactionType::MiscReceipt => TransactionType::MiscReceipt,
        TellerTransactionType::Reversal => TransactionType::Reversal,
        TellerTransactionType::SessionCloseVariance => TransactionType::SessionCloseVariance,
    }
}

/// Converts a core leg side to the db enum.
#[must_use]
pub const fn core_side_to_db(side: LegSide) -> DbLegSide {
    match side {
        LegSide::Debit => DbLegSide::Debit,
        LegSide::Credit => DbLegSide::Credit,
    }
}

/// Converts a db leg side to the core enum.
#[must_use]
pub const fn db_side_to_core(side: &DbLegSide) -> LegSide {
    match side {
        DbLegSide::Debit => LegSide::Debit,
        DbLegSide::Credit => LegSide::Credit,
    }
}

/// Converts a core cash direction to the db enum.
#[must_use]
pub const fn core_cash_direction_to_db(direction: cash_movement::CashDirection) -> CashDirection {
    match direction {
        cash_movement::CashDirection::In => CashDirection::In,
        cash_movement::CashDirection::Out => CashDirection::Out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mapping_round_trips() {
        for ty in [
            TransactionType::Deposit,
            TransactionType::Withdrawal,
            TransactionType::Transfer,
            TransactionType::CheckCashing,
            TransactionType::Draft,
            TransactionType::VaultTransfer,
            TransactionType::MiscReceipt,
            TransactionType::Reversal,
            TransactionType::SessionCloseVariance,
        ] {
            assert_eq!(db_type_to_core(&core_type_to_db(ty)), ty);
        }
    }

    #[test]
    fn test_side_mapping_round_trips() {
        for side in [LegSide::Debit, LegSide::Credit] {
            assert_eq!(db_side_to_core(&core_side_to_db(side)), side);
        }
    }
}
