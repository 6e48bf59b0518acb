use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 合作商按机车型号协议的调车费
/// - same_day_fee: 当日往返单价
/// - overnight_fee: 过夜单价 (按晚计)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "partner_transfer_fees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub partner_id: i32,
    pub scooter_model_id: i32,
    pub same_day_fee: i64,
    pub overnight_fee: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::partners::Entity",
        from = "Column::PartnerId",
        to = "super::partners::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Partner,
    #[sea_orm(
        belongs_to = "super::scooter_models::Entity",
        from = "Column::ScooterModelId",
        to = "super::scooter_models::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    ScooterModel,
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl Related<super::scooter_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScooterModel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
