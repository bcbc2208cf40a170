//! `SeaORM` Entity for the advisory_acknowledgments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "advisory_acknowledgments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub advisory_id: Uuid,
    pub user_id: Uuid,
    pub acknowledged_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::advisories::Entity",
        from = "Column::AdvisoryId",
        to = "super::advisories::Column::Id"
    )]
    Advisories,
}

impl Related<super::advisories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advisories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
