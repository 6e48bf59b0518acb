use crate::models::*;
use crate::services::ContactService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "contact",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("per_page" = Option<u64>, Query, description = "每页数量"),
        ("is_processed" = Option<bool>, Query, description = "是否已处理")
    ),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "留言列表"))
)]
pub async fn list_contacts(
    contact_service: web::Data<ContactService>,
    query: web::Query<ContactQuery>,
) -> Result<HttpResponse> {
    match contact_service.list_contacts(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/api/contacts/{id}/processed",
    tag = "contact",
    params(("id" = i32, Path, description = "留言 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "已标记处理", body = ContactResponse),
        (status = 404, description = "留言不存在")
    )
)]
pub async fn mark_processed(
    contact_service: web::Data<ContactService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match contact_service.mark_processed(path.into_inner()).await {
        Ok(contact) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": contact
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "contact",
    params(("id" = i32, Path, description = "留言 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "留言已删除"),
        (status = 404, description = "留言不存在")
    )
)]
pub async fn delete_contact(
    contact_service: web::Data<ContactService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match contact_service.delete_contact(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "留言已刪除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn contact_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contacts")
            .route("", web::get().to(list_contacts))
            .route("/{id}", web::delete().to(delete_contact))
            .route("/{id}/processed", web::patch().to(mark_processed)),
    );
}
