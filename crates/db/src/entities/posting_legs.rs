//! `SeaORM` Entity for the posting_legs table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::LegSide;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "posting_legs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub posting_batch_id: Uuid,
    pub side: LegSide,
    pub account_reference: String,
    pub amount_cents: i64,
    /// 0-based display/application order, unique per batch.
    pub position: i32,
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
}

impl Related<super::posting_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostingBatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
