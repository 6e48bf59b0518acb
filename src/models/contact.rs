use crate::entities::contact_message_entity;
use crate::utils::validate_tw_phone;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub is_processed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<contact_message_entity::Model> for ContactResponse {
    fn from(m: contact_message_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            message: m.message,
            is_processed: m.is_processed,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, message = "請輸入驗證碼"))]
    pub captcha_id: String,
    #[validate(length(min = 1, message = "請輸入驗證碼"))]
    pub captcha_answer: String,
    #[validate(length(min = 1, max = 100, message = "姓名為必填"))]
    pub name: String,
    #[validate(email(message = "Email 格式不正確"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_tw_phone"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "請輸入留言內容 (2000字以內)"))]
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub is_processed: Option<bool>,
}
