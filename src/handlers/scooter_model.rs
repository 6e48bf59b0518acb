use crate::models::*;
use crate::services::ScooterModelService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/scooter-models",
    tag = "scooter_model",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("per_page" = Option<u64>, Query, description = "每页数量"),
        ("keyword" = Option<String>, Query, description = "型号名称关键字"),
        ("is_active" = Option<bool>, Query, description = "是否启用")
    ),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "型号列表"))
)]
pub async fn list_models(
    model_service: web::Data<ScooterModelService>,
    query: web::Query<ScooterModelQuery>,
) -> Result<HttpResponse> {
    match model_service.list_models(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/scooter-models/{id}",
    tag = "scooter_model",
    params(("id" = i32, Path, description = "型号 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "型号详情", body = ScooterModelResponse),
        (status = 404, description = "型号不存在")
    )
)]
pub async fn get_model(
    model_service: web::Data<ScooterModelService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match model_service.get_model(path.into_inner()).await {
        Ok(model) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": model
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/scooter-models",
    tag = "scooter_model",
    request_body = CreateScooterModelRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "型号已建立", body = ScooterModelResponse),
        (status = 422, description = "校验失败或名称重复")
    )
)]
pub async fn create_model(
    model_service: web::Data<ScooterModelService>,
    request: web::Json<CreateScooterModelRequest>,
) -> Result<HttpResponse> {
    match model_service.create_model(request.into_inner()).await {
        Ok(model) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": model
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/scooter-models/{id}",
    tag = "scooter_model",
    params(("id" = i32, Path, description = "型号 ID")),
    request_body = UpdateScooterModelRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "型号已更新", body = ScooterModelResponse),
        (status = 404, description = "型号不存在")
    )
)]
pub async fn update_model(
    model_service: web::Data<ScooterModelService>,
    path: web::Path<i32>,
    request: web::Json<UpdateScooterModelRequest>,
) -> Result<HttpResponse> {
    match model_service
        .update_model(path.into_inner(), request.into_inner())
        .await
    {
        Ok(model) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": model
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/scooter-models/{id}",
    tag = "scooter_model",
    params(("id" = i32, Path, description = "型号 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "型号已删除"),
        (status = 422, description = "型号仍在使用中")
    )
)]
pub async fn delete_model(
    model_service: web::Data<ScooterModelService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match model_service.delete_model(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "機車型號已刪除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn scooter_model_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/scooter-models")
            .route("", web::get().to(list_models))
            .route("", web::post().to(create_model))
            .route("/{id}", web::get().to(get_model))
            .route("/{id}", web::put().to(update_model))
            .route("/{id}", web::delete().to(delete_model)),
    );
}
