//! `SeaORM` Entity for the cash_movements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::CashDirection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub teller_transaction_id: Uuid,
    pub direction: CashDirection,
    pub amount_cents: i64,
    pub teller_session_id: Uuid,
    pub cash_location_code: String,
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
}

impl Related<super::teller_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TellerTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
