use crate::entities::{ScooterType, scooter_model_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScooterModelResponse {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub scooter_type: ScooterType,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<scooter_model_entity::Model> for ScooterModelResponse {
    fn from(m: scooter_model_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            scooter_type: m.scooter_type,
            image_url: m.image_url,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScooterModelRequest {
    #[validate(length(min = 1, max = 100, message = "型號名稱為必填，且不可超過100字"))]
    #[schema(example = "Many 110")]
    pub name: String,
    #[serde(rename = "type")]
    pub scooter_type: ScooterType,
    #[validate(length(max = 255))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateScooterModelRequest {
    #[validate(length(min = 1, max = 100, message = "型號名稱不可為空，且不可超過100字"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub scooter_type: Option<ScooterType>,
    #[validate(length(max = 255))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScooterModelQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub keyword: Option<String>,
    pub is_active: Option<bool>,
}
