use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::entity::prelude::*;

text_enum! {
    /// 预约状态。已轉訂單 只能由转订单流程写入。
    pub enum BookingStatus {
        Pending => "預約中",
        Processing => "執行中",
        Replied => "已經回覆",
        Cancelled => "取消",
        Converted => "已轉訂單",
    }
}

/// 前台提交的预约 (尚未派车)
/// - requested_scooters: JSON 数组 [{"model": "...", "count": 2}]，仅供后台参考
/// - arrival_time / return_time 为空时转订单使用默认 08:00 / 18:00
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub line_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub arrival_time: Option<NaiveTime>,
    pub return_time: Option<NaiveTime>,
    pub shipping_company: Option<String>,
    pub requested_scooters: Json,
    pub remark: Option<String>,
    pub status: BookingStatus,
    pub order_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Order,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
