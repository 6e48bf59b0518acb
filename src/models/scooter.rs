use crate::entities::{ScooterStatus, ScooterType, scooter_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScooterResponse {
    pub id: i32,
    pub store_id: i32,
    pub plate_number: String,
    pub model: String,
    #[serde(rename = "type")]
    pub scooter_type: ScooterType,
    pub color: Option<String>,
    pub status: ScooterStatus,
    pub remark: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<scooter_entity::Model> for ScooterResponse {
    fn from(m: scooter_entity::Model) -> Self {
        Self {
            id: m.id,
            store_id: m.store_id,
            plate_number: m.plate_number,
            model: m.model,
            scooter_type: m.scooter_type,
            color: m.color,
            status: m.status,
            remark: m.remark,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScooterRequest {
    pub store_id: i32,
    #[validate(length(min = 1, max = 20, message = "車牌號碼為必填，且不可超過20字"))]
    #[schema(example = "ABC-1234")]
    pub plate_number: String,
    #[validate(length(min = 1, max = 100, message = "型號為必填"))]
    pub model: String,
    #[serde(rename = "type")]
    pub scooter_type: ScooterType,
    #[validate(length(max = 30))]
    pub color: Option<String>,
    /// 省略时为 待出租
    pub status: Option<ScooterStatus>,
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateScooterRequest {
    pub store_id: Option<i32>,
    #[validate(length(min = 1, max = 20, message = "車牌號碼不可為空，且不可超過20字"))]
    pub plate_number: Option<String>,
    #[validate(length(min = 1, max = 100, message = "型號不可為空"))]
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub scooter_type: Option<ScooterType>,
    #[validate(length(max = 30))]
    pub color: Option<String>,
    pub status: Option<ScooterStatus>,
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateScooterStatusRequest {
    pub status: ScooterStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScooterQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<ScooterStatus>,
    pub store_id: Option<i32>,
    #[serde(rename = "type")]
    pub scooter_type: Option<ScooterType>,
    /// 车牌或型号关键字
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailableScooterQuery {
    pub store_id: Option<i32>,
}
