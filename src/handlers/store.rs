use crate::models::*;
use crate::services::StoreService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "store",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("per_page" = Option<u64>, Query, description = "每页数量"),
        ("keyword" = Option<String>, Query, description = "门市名称关键字")
    ),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "门市列表"))
)]
pub async fn list_stores(
    store_service: web::Data<StoreService>,
    query: web::Query<StoreQuery>,
) -> Result<HttpResponse> {
    match store_service.list_stores(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/stores/{id}",
    tag = "store",
    params(("id" = i32, Path, description = "门市 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "门市详情", body = StoreResponse),
        (status = 404, description = "门市不存在")
    )
)]
pub async fn get_store(
    store_service: web::Data<StoreService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match store_service.get_store(path.into_inner()).await {
        Ok(store) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": store
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/stores",
    tag = "store",
    request_body = CreateStoreRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "门市已建立", body = StoreResponse),
        (status = 422, description = "校验失败")
    )
)]
pub async fn create_store(
    store_service: web::Data<StoreService>,
    request: web::Json<CreateStoreRequest>,
) -> Result<HttpResponse> {
    match store_service.create_store(request.into_inner()).await {
        Ok(store) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": store
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/stores/{id}",
    tag = "store",
    params(("id" = i32, Path, description = "门市 ID")),
    request_body = UpdateStoreRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "门市已更新", body = StoreResponse),
        (status = 404, description = "门市不存在")
    )
)]
pub async fn update_store(
    store_service: web::Data<StoreService>,
    path: web::Path<i32>,
    request: web::Json<UpdateStoreRequest>,
) -> Result<HttpResponse> {
    match store_service
        .update_store(path.into_inner(), request.into_inner())
        .await
    {
        Ok(store) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": store
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/stores/{id}",
    tag = "store",
    params(("id" = i32, Path, description = "门市 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "门市已删除"),
        (status = 422, description = "门市仍有机车")
    )
)]
pub async fn delete_store(
    store_service: web::Data<StoreService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match store_service.delete_store(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "門市已刪除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn store_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stores")
            .route("", web::get().to(list_stores))
            .route("", web::post().to(create_store))
            .route("/{id}", web::get().to(get_store))
            .route("/{id}", web::put().to(update_store))
            .route("/{id}", web::delete().to(delete_store)),
    );
}
