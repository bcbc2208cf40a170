//! `SeaORM` Entity for the account_transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::LegSide;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub posting_batch_id: Uuid,
    /// Null when the reference no longer resolves (kept for audit).
    pub account_id: Option<Uuid>,
    pub account_reference: String,
    pub direction: LegSide,
    pub amount_cents: i64,
    /// Point-in-time balance snapshot at creation.
    pub running_balance_cents: i64,
    /// Monotonic per-account insert order.
    pub account_sequence: i64,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::posting_batches::Entity",
        from = "Column::PostingBatchId",
        to = "super::posting_batches::Column::Id"
    )]
    PostingBatches,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::posting_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostingBatches.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
