use crate::models::*;
use crate::services::{OrderService, PricingService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "order",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("per_page" = Option<u64>, Query, description = "每页数量"),
        ("status" = Option<String>, Query, description = "订单状态"),
        ("partner_id" = Option<i32>, Query, description = "合作商"),
        ("keyword" = Option<String>, Query, description = "订单号 / 承租人 / 电话"),
        ("start_date" = Option<String>, Query, description = "预约日期起 (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "预约日期迄 (YYYY-MM-DD)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "订单列表"),
        (status = 401, description = "未授权")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    match order_service.list_orders(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "订单 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "订单详情", body = OrderResponse),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match order_service.get_order(path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "order",
    request_body = CreateOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "订单已建立", body = OrderResponse),
        (status = 422, description = "校验失败或机车不可出租")
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service.create_order(request.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": order,
            "message": "訂單已建立"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "订单 ID")),
    request_body = UpdateOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "订单已更新", body = OrderResponse),
        (status = 404, description = "订单不存在"),
        (status = 422, description = "校验失败或机车不可出租")
    )
)]
pub async fn update_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service
        .update_order(path.into_inner(), request.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order,
            "message": "訂單已更新"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "order",
    params(("id" = i32, Path, description = "订单 ID")),
    request_body = UpdateOrderStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "状态已更新", body = OrderResponse),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn update_order_status(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
    request: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse> {
    match order_service
        .update_status(path.into_inner(), request.status)
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "订单 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "订单已删除"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match order_service.delete_order(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "訂單已刪除"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/orders/calculate-fee",
    tag = "order",
    request_body = CalculateFeeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "调车费试算结果", body = FeeQuoteResponse),
        (status = 422, description = "日期区间或合作商不正确")
    )
)]
pub async fn calculate_fee(
    pricing_service: web::Data<PricingService>,
    request: web::Json<CalculateFeeRequest>,
) -> Result<HttpResponse> {
    match pricing_service.calculate_fee(&request).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": quote
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("", web::post().to(create_order))
            .route("/calculate-fee", web::post().to(calculate_fee))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::put().to(update_order))
            .route("/{id}", web::delete().to(delete_order))
            .route("/{id}/status", web::patch().to(update_order_status)),
    );
}
