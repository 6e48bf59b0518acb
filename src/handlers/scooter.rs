use crate::models::*;
use crate::services::ScooterService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/scooters",
    tag = "scooter",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("per_page" = Option<u64>, Query, description = "每页数量"),
        ("status" = Option<String>, Query, description = "机车状态"),
        ("store_id" = Option<i32>, Query, description = "门市"),
        ("type" = Option<String>, Query, description = "机车类型"),
        ("keyword" = Option<String>, Query, description = "车牌 / 型号关键字")
    ),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "机车列表"))
)]
pub async fn list_scooters(
    scooter_service: web::Data<ScooterService>,
    query: web::Query<ScooterQuery>,
) -> Result<HttpResponse> {
    match scooter_service.list_scooters(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/scooters/available",
    tag = "scooter",
    params(("store_id" = Option<i32>, Query, description = "门市")),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "待出租机车", body = [ScooterResponse]))
)]
pub async fn list_available_scooters(
    scooter_service: web::Data<ScooterService>,
    query: web::Query<AvailableScooterQuery>,
) -> Result<HttpResponse> {
    match scooter_service.list_available(query.store_id).await {
        Ok(scooters) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": scooters
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/scooters/{id}",
    tag = "scooter",
    params(("id" = i32, Path, description = "机车 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "机车详情", body = ScooterResponse),
        (status = 404, description = "机车不存在")
    )
)]
pub async fn get_scooter(
    scooter_service: web::Data<ScooterService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match scooter_service.get_scooter(path.into_inner()).await {
        Ok(scooter) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": scooter
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/scooters",
    tag = "scooter",
    request_body = CreateScooterRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "机车已建立", body = ScooterResponse),
        (status = 422, description = "校验失败或车牌重复")
    )
)]
pub async fn create_scooter(
    scooter_service: web::Data<ScooterService>,
    request: web::Json<CreateScooterRequest>,
) -> Result<HttpResponse> {
    match scooter_service.create_scooter(request.into_inner()).await {
        Ok(scooter) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": scooter
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/scooters/{id}",
    tag = "scooter",
    params(("id" = i32, Path, description = "机车 ID")),
    request_body = UpdateScooterRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "机车已更新", body = ScooterResponse),
        (status = 404, description = "机车不存在")
    )
)]
pub async fn update_scooter(
    scooter_service: web::Data<ScooterService>,
    path: web::Path<i32>,
    request: web::Json<UpdateScooterRequest>,
) -> Result<HttpResponse> {
    match scooter_service
        .update_scooter(path.into_inner(), request.into_inner())
        .await
    {
        Ok(scooter) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": scooter
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/api/scooters/{id}/status",
    tag = "scooter",
    params(("id" = i32, Path, description = "机车 ID")),
    request_body = UpdateScooterStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "状态已更新", body = ScooterResponse),
        (status = 404, description = "机车不存在")
    )
)]
pub async fn update_scooter_status(
    scooter_service: web::Data<ScooterService>,
    path: web::Path<i32>,
    request: web::Json<UpdateScooterStatusRequest>,
) -> Result<HttpResponse> {
    match scooter_service
        .update_status(path.into_inner(), request.status)
        .await
    {
        Ok(scooter) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": scooter
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/scooters/{id}",
    tag = "scooter",
    params(("id" = i32, Path, description = "机车 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "机车已删除"),
        (status = 422, description = "机车仍有关联订单")
    )
)]
pub async fn delete_scooter(
    scooter_service: web::Data<ScooterService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match scooter_service.delete_scooter(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "機車已刪除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn scooter_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/scooters")
            .route("", web::get().to(list_scooters))
            .route("", web::post().to(create_scooter))
            .route("/available", web::get().to(list_available_scooters))
            .route("/{id}", web::get().to(get_scooter))
            .route("/{id}", web::put().to(update_scooter))
            .route("/{id}", web::delete().to(delete_scooter))
            .route("/{id}/status", web::patch().to(update_scooter_status)),
    );
}
