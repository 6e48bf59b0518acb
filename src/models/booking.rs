use crate::entities::{BookingStatus, booking_entity};
use crate::models::OrderResponse;
use crate::utils::validate_tw_phone;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 客人希望预约的型号与台数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RequestedScooter {
    pub model: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub line_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[schema(value_type = Option<String>, example = "08:00:00")]
    pub arrival_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "18:00:00")]
    pub return_time: Option<NaiveTime>,
    pub shipping_company: Option<String>,
    pub requested_scooters: Vec<RequestedScooter>,
    pub remark: Option<String>,
    pub status: BookingStatus,
    pub order_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<booking_entity::Model> for BookingResponse {
    fn from(m: booking_entity::Model) -> Self {
        let requested_scooters = serde_json::from_value(m.requested_scooters).unwrap_or_else(|e| {
            log::warn!("Booking {} has malformed requested_scooters: {e}", m.id);
            Vec::new()
        });
        Self {
            id: m.id,
            name: m.name,
            phone: m.phone,
            email: m.email,
            line_id: m.line_id,
            start_date: m.start_date,
            end_date: m.end_date,
            arrival_time: m.arrival_time,
            return_time: m.return_time,
            shipping_company: m.shipping_company,
            requested_scooters,
            remark: m.remark,
            status: m.status,
            order_id: m.order_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// 前台预约表单 (需验证码)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "請輸入驗證碼"))]
    pub captcha_id: String,
    #[validate(length(min = 1, message = "請輸入驗證碼"))]
    pub captcha_answer: String,
    #[validate(length(min = 1, max = 100, message = "姓名為必填"))]
    #[schema(example = "王小明")]
    pub name: String,
    #[validate(custom(function = "validate_tw_phone"))]
    #[schema(example = "0912345678")]
    pub phone: String,
    #[validate(email(message = "Email 格式不正確"))]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub line_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[schema(value_type = Option<String>, example = "08:00:00")]
    pub arrival_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "18:00:00")]
    pub return_time: Option<NaiveTime>,
    #[validate(length(max = 100))]
    pub shipping_company: Option<String>,
    #[validate(length(min = 1, message = "請至少選擇一種車型"))]
    pub requested_scooters: Vec<RequestedScooter>,
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<BookingStatus>,
    /// 姓名或电话关键字
    pub keyword: Option<String>,
}

/// 预约转订单：由后台人员选定实际出车的机车
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConvertBookingRequest {
    pub partner_id: Option<i32>,
    #[validate(length(max = 50))]
    #[schema(example = "現金")]
    pub payment_method: Option<String>,
    /// 省略且指定合作商时，依调车费表自动计价
    #[validate(range(min = 0, message = "金額不可為負數"))]
    pub payment_amount: Option<i64>,
    #[validate(length(min = 1, message = "請至少選擇一台機車"))]
    pub scooter_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConvertBookingResponse {
    pub booking: BookingResponse,
    pub order: OrderResponse,
}
