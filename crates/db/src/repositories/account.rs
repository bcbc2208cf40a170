//! Account repository and reference resolution.
//!
//! Resolution maps an opaque account reference to either a real customer
//! account or an internal bucket. It is a pure lookup used for attribution
//! (AccountTransaction rows) and cash-direction inference; it never changes
//! the control flow of a recipe.

use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use tellerpoint_core::reference::{self, ReferenceKind};

use crate::entities::accounts;

/// A resolved account reference.
#[derive(Debug, Clone)]
pub enum ResolvedReference {
    /// A cash drawer or vault, by code.
    Cash {
        /// The drawer/vault code.
        code: String,
    },
    /// A pending check-item bucket.
    Check,
    /// A real customer account.
    Account(accounts::Model),
    /// An internal income/liability bucket (or an unknown account number).
    Internal,
}

impl ResolvedReference {
    /// Returns the resolved account, if the reference addresses one.
    #[must_use]
    pub const fn account(&self) -> Option<&accounts::Model> {
        match self {
            Self::Account(account) => Some(account),
            _ => None,
        }
    }
}

/// Resolves a reference on any connection (pool or open transaction).
///
/// # Errors
///
/// Returns an error if the account lookup fails.
pub async fn resolve_on<C: ConnectionTrait>(
    conn: &C,
    account_reference: &str,
) -> Result<ResolvedReference, DbErr> {
    match reference::classify(account_reference) {
        ReferenceKind::Cash => Ok(ResolvedReference::Cash {
            code: reference::cash_code(account_reference)
                .unwrap_or_default()
                .to_string(),
        }),
        ReferenceKind::Check => Ok(ResolvedReference::Check),
        ReferenceKind::Internal => Ok(ResolvedReference::Internal),
        ReferenceKind::Account => {
            let account = accounts::Entity::find()
                .filter(accounts::Column::AccountNumber.eq(account_reference))
                .one(conn)
                .await?;

            // Unknown account numbers fall back to internal buckets.
            Ok(account.map_or(ResolvedReference::Internal, ResolvedReference::Account))
        }
    }
}

/// Account repository for lookups.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account by its account number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_number(
        &self,
        account_number: &str,
    ) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await
    }

    /// Resolves a reference against the account table.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn resolve(&self, account_reference: &str) -> Result<ResolvedReference, DbErr> {
        resolve_on(&self.db, account_reference).await
    }
}
