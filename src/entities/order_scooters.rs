use sea_orm::entity::prelude::*;

/// 订单与机车的多对多关联表，仅包含两个外键
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "order_scooters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub scooter_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::scooters::Entity",
        from = "Column::ScooterId",
        to = "super::scooters::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Scooter,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::scooters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scooter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
