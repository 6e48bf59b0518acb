use crate::models::*;
use crate::services::BookingService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "booking",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("per_page" = Option<u64>, Query, description = "每页数量"),
        ("status" = Option<String>, Query, description = "预约状态"),
        ("keyword" = Option<String>, Query, description = "姓名 / 电话")
    ),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "预约列表"))
)]
pub async fn list_bookings(
    booking_service: web::Data<BookingService>,
    query: web::Query<BookingQuery>,
) -> Result<HttpResponse> {
    match booking_service.list_bookings(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "booking",
    params(("id" = i32, Path, description = "预约 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "预约详情", body = BookingResponse),
        (status = 404, description = "预约不存在")
    )
)]
pub async fn get_booking(
    booking_service: web::Data<BookingService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match booking_service.get_booking(path.into_inner()).await {
        Ok(booking) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": booking
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/status",
    tag = "booking",
    params(("id" = i32, Path, description = "预约 ID")),
    request_body = UpdateBookingStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "状态已更新", body = BookingResponse),
        (status = 422, description = "不可手动设为或离开 已轉訂單")
    )
)]
pub async fn update_booking_status(
    booking_service: web::Data<BookingService>,
    path: web::Path<i32>,
    request: web::Json<UpdateBookingStatusRequest>,
) -> Result<HttpResponse> {
    match booking_service
        .update_status(path.into_inner(), request.status)
        .await
    {
        Ok(booking) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": booking
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "booking",
    params(("id" = i32, Path, description = "预约 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "预约已删除"),
        (status = 404, description = "预约不存在")
    )
)]
pub async fn delete_booking(
    booking_service: web::Data<BookingService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match booking_service.delete_booking(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "預約已刪除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/convert-to-order",
    tag = "booking",
    params(("id" = i32, Path, description = "预约 ID")),
    request_body = ConvertBookingRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "已转为订单", body = ConvertBookingResponse),
        (status = 404, description = "预约不存在"),
        (status = 422, description = "预约状态不是 預約中")
    )
)]
pub async fn convert_to_order(
    booking_service: web::Data<BookingService>,
    path: web::Path<i32>,
    request: web::Json<ConvertBookingRequest>,
) -> Result<HttpResponse> {
    match booking_service
        .convert_to_order(path.into_inner(), request.into_inner())
        .await
    {
        Ok(result) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": result,
            "message": "預約已轉為訂單"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn booking_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::get().to(list_bookings))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}", web::delete().to(delete_booking))
            .route("/{id}/status", web::patch().to(update_booking_status))
            .route("/{id}/convert-to-order", web::post().to(convert_to_order)),
    );
}
