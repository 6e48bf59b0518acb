use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

text_enum! {
    /// 机车状态
    pub enum ScooterStatus {
        Available => "待出租",
        Rented => "出租中",
        Maintenance => "保養中",
    }
}

text_enum! {
    /// 机车类型 (车牌类别)
    pub enum ScooterType {
        WhitePlate => "白牌",
        GreenPlate => "綠牌",
        ElectricAssist => "電輔車",
        Tricycle => "三輪車",
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "scooters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub store_id: i32,
    #[sea_orm(unique)]
    pub plate_number: String,
    /// 型号名称，对应 scooter_models.name
    pub model: String,
    #[sea_orm(column_name = "type")]
    pub scooter_type: ScooterType,
    pub color: Option<String>,
    pub status: ScooterStatus,
    pub remark: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stores::Entity",
        from = "Column::StoreId",
        to = "super::stores::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Store,
    #[sea_orm(has_many = "super::order_scooters::Entity")]
    OrderScooters,
}

impl Related<super::stores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_scooters::Relation::Order.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_scooters::Relation::Scooter.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
