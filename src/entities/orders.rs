use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::entity::prelude::*;

use super::ScooterStatus;

text_enum! {
    /// 订单状态
    pub enum OrderStatus {
        Booked => "已預訂",
        InProgress => "進行中",
        AwaitingPickup => "待接送",
        Completed => "已完成",
        AtPartner => "在合作商",
    }
}

impl OrderStatus {
    /// 订单处于该状态时，其关联机车应有的状态。
    /// 已預訂 / 已完成 / 待接送 -> 待出租；進行中 / 在合作商 -> 出租中
    pub fn scooter_status(&self) -> ScooterStatus {
        match self {
            OrderStatus::Booked | OrderStatus::Completed | OrderStatus::AwaitingPickup => {
                ScooterStatus::Available
            }
            OrderStatus::InProgress | OrderStatus::AtPartner => ScooterStatus::Rented,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_number: String,
    pub partner_id: Option<i32>,
    pub tenant: Option<String>,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub expected_return_time: Option<NaiveDateTime>,
    pub phone: Option<String>,
    pub shipping_company: Option<String>,
    pub ship_arrival_time: Option<NaiveDateTime>,
    pub ship_return_time: Option<NaiveDateTime>,
    pub payment_method: Option<String>,
    pub payment_amount: i64,
    pub status: OrderStatus,
    pub remark: Option<String>,
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
        on_delete = "Restrict"
    )]
    Partner,
    #[sea_orm(has_many = "super::order_scooters::Entity")]
    OrderScooters,
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl Related<super::scooters::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_scooters::Relation::Scooter.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_scooters::Relation::Order.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_statuses_release_scooters() {
        for status in [
            OrderStatus::Booked,
            OrderStatus::Completed,
            OrderStatus::AwaitingPickup,
        ] {
            assert_eq!(status.scooter_status(), ScooterStatus::Available);
        }
    }

    #[test]
    fn test_active_statuses_rent_scooters() {
        assert_eq!(
            OrderStatus::InProgress.scooter_status(),
            ScooterStatus::Rented
        );
        assert_eq!(OrderStatus::AtPartner.scooter_status(), ScooterStatus::Rented);
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&OrderStatus::AtPartner).unwrap();
        assert_eq!(json, "\"在合作商\"");
        let parsed: OrderStatus = serde_json::from_str("\"待接送\"").unwrap();
        assert_eq!(parsed, OrderStatus::AwaitingPickup);
    }
}
