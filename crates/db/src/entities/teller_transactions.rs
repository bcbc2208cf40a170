//! `SeaORM` Entity for the teller_transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{TellerTransactionStatus, TellerTransactionType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "teller_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Idempotency boundary: unique across the system.
    #[sea_orm(unique)]
    pub request_id: String,
    pub transaction_type: TellerTransactionType,
    pub amount_cents: i64,
    pub currency: String,
    pub status: TellerTransactionStatus,
    pub posted_at: DateTimeWithTimeZone,
    pub posted_by_user_id: Uuid,
    pub approved_by_user_id: Option<Uuid>,
    pub branch_code: String,
    pub workstation_code: String,
    pub teller_session_id: Uuid,
    pub reversal_of_teller_transaction_id: Option<Uuid>,
    /// At most one reversal per transaction.
    #[sea_orm(unique)]
    pub reversed_by_teller_transaction_id: Option<Uuid>,
    pub reversed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::posting_batches::Entity")]
    PostingBatches,
    #[sea_orm(has_many = "super::cash_movements::Entity")]
    CashMovements,
}

impl Related<super::posting_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostingBatches.def()
    }
}

impl Related<super::cash_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CashMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
