//! `SeaORM` Entity for the advisories table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AdvisoryScopeKind, AdvisorySeverity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "advisories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub scope_kind: AdvisoryScopeKind,
    pub scope_id: Uuid,
    pub severity: AdvisorySeverity,
    pub title: String,
    pub body: Option<String>,
    pub effective_start_at: Option<DateTimeWithTimeZone>,
    pub effective_end_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    /// Any edit bumps this and invalidates older acknowledgments.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::advisory_acknowledgments::Entity")]
    AdvisoryAcknowledgments,
}

impl Related<super::advisory_acknowledgments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvisoryAcknowledgments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
