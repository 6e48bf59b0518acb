//! 前台 (免登入) 接口：验证码、预约、联络留言、车型展示

use crate::models::*;
use crate::services::{BookingService, CaptchaService, ContactService, ScooterModelService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/public/captcha",
    tag = "public",
    responses((status = 200, description = "新的验证码", body = CaptchaResponse))
)]
pub async fn get_captcha(captcha_service: web::Data<CaptchaService>) -> Result<HttpResponse> {
    let captcha = captcha_service.issue().await;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": captcha
    })))
}

#[utoipa::path(
    post,
    path = "/api/public/bookings",
    tag = "public",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "预约已送出", body = BookingResponse),
        (status = 422, description = "验证码错误或资料不正确")
    )
)]
pub async fn create_booking(
    captcha_service: web::Data<CaptchaService>,
    booking_service: web::Data<BookingService>,
    request: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    if let Err(e) = captcha_service
        .verify(&request.captcha_id, &request.captcha_answer)
        .await
    {
        return Ok(e.error_response());
    }
    match booking_service.create_booking(request).await {
        Ok(booking) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": booking,
            "message": "預約已送出，我們將儘快與您聯繫"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/public/contacts",
    tag = "public",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "留言已送出", body = ContactResponse),
        (status = 422, description = "验证码错误或资料不正确")
    )
)]
pub async fn create_contact(
    captcha_service: web::Data<CaptchaService>,
    contact_service: web::Data<ContactService>,
    request: web::Json<CreateContactRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    if let Err(e) = captcha_service
        .verify(&request.captcha_id, &request.captcha_answer)
        .await
    {
        return Ok(e.error_response());
    }
    match contact_service.create_contact(request).await {
        Ok(contact) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": contact,
            "message": "留言已送出"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/public/scooter-models",
    tag = "public",
    responses((status = 200, description = "启用中的车型", body = [ScooterModelResponse]))
)]
pub async fn list_scooter_models(
    model_service: web::Data<ScooterModelService>,
) -> Result<HttpResponse> {
    match model_service.list_active_models().await {
        Ok(models) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": models
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn public_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/public")
            .route("/captcha", web::get().to(get_captcha))
            .route("/bookings", web::post().to(create_booking))
            .route("/contacts", web::post().to(create_contact))
            .route("/scooter-models", web::get().to(list_scooter_models)),
    );
}
