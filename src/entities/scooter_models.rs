use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use super::ScooterType;

/// 机车型号 (前台展示用)。调车费按型号计价。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "scooter_models")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub scooter_type: ScooterType,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::partner_transfer_fees::Entity")]
    TransferFees,
}

impl Related<super::partner_transfer_fees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransferFees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
