use crate::entities::{OrderStatus, ScooterStatus, ScooterType, order_entity, scooter_entity};
use crate::models::common::double_option;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

/// 订单所附机车的简要信息
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderScooterResponse {
    pub id: i32,
    pub plate_number: String,
    pub model: String,
    #[serde(rename = "type")]
    pub scooter_type: ScooterType,
    pub status: ScooterStatus,
}

impl From<scooter_entity::Model> for OrderScooterResponse {
    fn from(m: scooter_entity::Model) -> Self {
        Self {
            id: m.id,
            plate_number: m.plate_number,
            model: m.model,
            scooter_type: m.scooter_type,
            status: m.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderPartnerSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub order_number: String,
    pub partner_id: Option<i32>,
    pub partner: Option<OrderPartnerSummary>,
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
    pub scooters: Vec<OrderScooterResponse>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderResponse {
    pub fn new(
        m: order_entity::Model,
        partner: Option<OrderPartnerSummary>,
        scooters: Vec<scooter_entity::Model>,
    ) -> Self {
        Self {
            id: m.id,
            order_number: m.order_number,
            partner_id: m.partner_id,
            partner,
            tenant: m.tenant,
            appointment_date: m.appointment_date,
            start_time: m.start_time,
            end_time: m.end_time,
            expected_return_time: m.expected_return_time,
            phone: m.phone,
            shipping_company: m.shipping_company,
            ship_arrival_time: m.ship_arrival_time,
            ship_return_time: m.ship_return_time,
            payment_method: m.payment_method,
            payment_amount: m.payment_amount,
            status: m.status,
            remark: m.remark,
            scooters: scooters.into_iter().map(Into::into).collect(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    /// 留空则自动产生 ORD-YYYYMM-NNNNN
    #[validate(length(max = 20))]
    pub order_number: Option<String>,
    pub partner_id: Option<i32>,
    #[validate(length(max = 100))]
    pub tenant: Option<String>,
    #[schema(example = "2026-01-01")]
    pub appointment_date: NaiveDate,
    #[schema(example = "2026-01-01T08:00:00")]
    pub start_time: NaiveDateTime,
    #[schema(example = "2026-01-02T18:00:00")]
    pub end_time: NaiveDateTime,
    pub expected_return_time: Option<NaiveDateTime>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub shipping_company: Option<String>,
    pub ship_arrival_time: Option<NaiveDateTime>,
    pub ship_return_time: Option<NaiveDateTime>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    #[validate(range(min = 0, message = "金額不可為負數"))]
    pub payment_amount: i64,
    pub status: OrderStatus,
    pub remark: Option<String>,
    #[validate(length(min = 1, message = "請至少選擇一台機車"))]
    pub scooter_ids: Vec<i32>,
}

/// 所有字段皆可省略；scooter_ids 给出时视为新的完整机车清单
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub partner_id: Option<Option<i32>>,
    #[validate(length(max = 100))]
    pub tenant: Option<String>,
    pub appointment_date: Option<NaiveDate>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub expected_return_time: Option<NaiveDateTime>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub shipping_company: Option<String>,
    pub ship_arrival_time: Option<NaiveDateTime>,
    pub ship_return_time: Option<NaiveDateTime>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    #[validate(range(min = 0, message = "金額不可為負數"))]
    pub payment_amount: Option<i64>,
    pub status: Option<OrderStatus>,
    pub remark: Option<String>,
    #[validate(length(min = 1, message = "請至少選擇一台機車"))]
    pub scooter_ids: Option<Vec<i32>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<OrderStatus>,
    pub partner_id: Option<i32>,
    /// 订单号、承租人或电话关键字
    pub keyword: Option<String>,
    /// 预约日期区间 (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// 调车费试算
#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateFeeRequest {
    pub partner_id: i32,
    #[schema(example = "2026-01-01")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-02")]
    pub end_date: NaiveDate,
    /// 型号名称 -> 台数
    pub scooters: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeeQuoteItem {
    pub model: String,
    pub count: i64,
    pub unit_fee: i64,
    pub subtotal: i64,
    /// 该合作商未设定此型号费用时为 false，小计以 0 计
    pub fee_found: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeeQuoteResponse {
    pub is_same_day: bool,
    pub days: i64,
    pub total_amount: i64,
    pub items: Vec<FeeQuoteItem>,
}
