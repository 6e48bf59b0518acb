use crate::models::*;
use crate::services::PartnerService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/partners",
    tag = "partner",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("per_page" = Option<u64>, Query, description = "每页数量"),
        ("keyword" = Option<String>, Query, description = "名称关键字")
    ),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "合作商列表"))
)]
pub async fn list_partners(
    partner_service: web::Data<PartnerService>,
    query: web::Query<PartnerQuery>,
) -> Result<HttpResponse> {
    match partner_service.list_partners(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/partners/{id}",
    tag = "partner",
    params(("id" = i32, Path, description = "合作商 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "合作商详情 (含调车费)", body = PartnerDetailResponse),
        (status = 404, description = "合作商不存在")
    )
)]
pub async fn get_partner(
    partner_service: web::Data<PartnerService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match partner_service.get_partner(path.into_inner()).await {
        Ok(partner) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": partner
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/partners",
    tag = "partner",
    request_body = CreatePartnerRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "合作商已建立", body = PartnerResponse),
        (status = 422, description = "校验失败")
    )
)]
pub async fn create_partner(
    partner_service: web::Data<PartnerService>,
    request: web::Json<CreatePartnerRequest>,
) -> Result<HttpResponse> {
    match partner_service.create_partner(request.into_inner()).await {
        Ok(partner) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": partner
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/partners/{id}",
    tag = "partner",
    params(("id" = i32, Path, description = "合作商 ID")),
    request_body = UpdatePartnerRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "合作商已更新", body = PartnerResponse),
        (status = 404, description = "合作商不存在")
    )
)]
pub async fn update_partner(
    partner_service: web::Data<PartnerService>,
    path: web::Path<i32>,
    request: web::Json<UpdatePartnerRequest>,
) -> Result<HttpResponse> {
    match partner_service
        .update_partner(path.into_inner(), request.into_inner())
        .await
    {
        Ok(partner) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": partner
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/partners/{id}/transfer-fees",
    tag = "partner",
    params(("id" = i32, Path, description = "合作商 ID")),
    request_body = ReplaceTransferFeesRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "调车费表已替换", body = [TransferFeeResponse]),
        (status = 404, description = "合作商不存在"),
        (status = 422, description = "费用不正确或型号重复")
    )
)]
pub async fn replace_transfer_fees(
    partner_service: web::Data<PartnerService>,
    path: web::Path<i32>,
    request: web::Json<ReplaceTransferFeesRequest>,
) -> Result<HttpResponse> {
    match partner_service
        .replace_transfer_fees(path.into_inner(), request.into_inner())
        .await
    {
        Ok(fees) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": fees
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/partners/{id}",
    tag = "partner",
    params(("id" = i32, Path, description = "合作商 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "合作商已删除"),
        (status = 422, description = "合作商仍有关联订单")
    )
)]
pub async fn delete_partner(
    partner_service: web::Data<PartnerService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match partner_service.delete_partner(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "合作商已刪除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn partner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/partners")
            .route("", web::get().to(list_partners))
            .route("", web::post().to(create_partner))
            .route("/{id}", web::get().to(get_partner))
            .route("/{id}", web::put().to(update_partner))
            .route("/{id}", web::delete().to(delete_partner))
            .route("/{id}/transfer-fees", web::put().to(replace_transfer_fees)),
    );
}
