//! `SeaORM` Entity for the posting_batches table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PostingBatchStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "posting_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub teller_transaction_id: Uuid,
    /// Mirrors the owning transaction's idempotency key.
    #[sea_orm(unique)]
    pub request_id: String,
    pub currency: String,
    pub status: PostingBatchStatus,
    pub committed_at: DateTimeWithTimeZone,
    /// Schemaless type-specific detail from the recipe.
    pub metadata: Json,
    pub reversal_of_posting_batch_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teller_transactions::Entity",
        from = "Column::TellerTransactionId",
        to = "super::teller_transactions::Column::Id"
    )]
    TellerTransactions,
    #[sea_orm(has_many = "super::posting_legs::Entity")]
    PostingLegs,
    #[sea_orm(has_many = "super::account_transactions::Entity")]
    AccountTransactions,
}

impl Related<super::teller_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TellerTransactions.def()
    }
}

impl Related<super::posting_legs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostingLegs.def()
    }
}

impl Related<super::account_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
