use crate::entities::{partner_entity, scooter_model_entity, transfer_fee_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PartnerResponse {
    pub id: i32,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub remark: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<partner_entity::Model> for PartnerResponse {
    fn from(m: partner_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            contact_person: m.contact_person,
            phone: m.phone,
            email: m.email,
            address: m.address,
            remark: m.remark,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransferFeeResponse {
    pub id: i32,
    pub scooter_model_id: i32,
    pub scooter_model_name: Option<String>,
    pub same_day_fee: i64,
    pub overnight_fee: i64,
}

impl From<(transfer_fee_entity::Model, Option<scooter_model_entity::Model>)> for TransferFeeResponse {
    fn from((fee, model): (transfer_fee_entity::Model, Option<scooter_model_entity::Model>)) -> Self {
        Self {
            id: fee.id,
            scooter_model_id: fee.scooter_model_id,
            scooter_model_name: model.map(|m| m.name),
            same_day_fee: fee.same_day_fee,
            overnight_fee: fee.overnight_fee,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PartnerDetailResponse {
    #[serde(flatten)]
    pub partner: PartnerResponse,
    pub transfer_fees: Vec<TransferFeeResponse>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePartnerRequest {
    #[validate(length(min = 1, max = 100, message = "合作商名稱為必填，且不可超過100字"))]
    #[schema(example = "太魯閣民宿")]
    pub name: String,
    #[validate(length(max = 100))]
    pub contact_person: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(email(message = "Email 格式不正確"))]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 1, max = 100, message = "合作商名稱不可為空，且不可超過100字"))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub contact_person: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(email(message = "Email 格式不正確"))]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransferFeeInput {
    pub scooter_model_id: i32,
    pub same_day_fee: i64,
    pub overnight_fee: i64,
}

/// 整批替换合作商的调车费表
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceTransferFeesRequest {
    pub fees: Vec<TransferFeeInput>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PartnerQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub keyword: Option<String>,
}
