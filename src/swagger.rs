use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{BookingStatus, OrderStatus, ScooterStatus, ScooterType};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::me,
        handlers::order::list_orders,
        handlers::order::get_order,
        handlers::order::create_order,
        handlers::order::update_order,
        handlers::order::update_order_status,
        handlers::order::delete_order,
        handlers::order::calculate_fee,
        handlers::booking::list_bookings,
        handlers::booking::get_booking,
        handlers::booking::update_booking_status,
        handlers::booking::delete_booking,
        handlers::booking::convert_to_order,
        handlers::store::list_stores,
        handlers::store::get_store,
        handlers::store::create_store,
        handlers::store::update_store,
        handlers::store::delete_store,
        handlers::scooter_model::list_models,
        handlers::scooter_model::get_model,
        handlers::scooter_model::create_model,
        handlers::scooter_model::update_model,
        handlers::scooter_model::delete_model,
        handlers::scooter::list_scooters,
        handlers::scooter::list_available_scooters,
        handlers::scooter::get_scooter,
        handlers::scooter::create_scooter,
        handlers::scooter::update_scooter,
        handlers::scooter::update_scooter_status,
        handlers::scooter::delete_scooter,
        handlers::partner::list_partners,
        handlers::partner::get_partner,
        handlers::partner::create_partner,
        handlers::partner::update_partner,
        handlers::partner::replace_transfer_fees,
        handlers::partner::delete_partner,
        handlers::contact::list_contacts,
        handlers::contact::mark_processed,
        handlers::contact::delete_contact,
        handlers::public::get_captcha,
        handlers::public::create_booking,
        handlers::public::create_contact,
        handlers::public::list_scooter_models,
    ),
    components(
        schemas(
            ApiError,
            OrderStatus,
            ScooterStatus,
            ScooterType,
            BookingStatus,
            LoginRequest,
            LoginResponse,
            AdminResponse,
            OrderResponse,
            OrderScooterResponse,
            OrderPartnerSummary,
            CreateOrderRequest,
            UpdateOrderRequest,
            UpdateOrderStatusRequest,
            CalculateFeeRequest,
            FeeQuoteItem,
            FeeQuoteResponse,
            RequestedScooter,
            BookingResponse,
            CreateBookingRequest,
            UpdateBookingStatusRequest,
            ConvertBookingRequest,
            ConvertBookingResponse,
            StoreResponse,
            CreateStoreRequest,
            UpdateStoreRequest,
            ScooterModelResponse,
            CreateScooterModelRequest,
            UpdateScooterModelRequest,
            ScooterResponse,
            CreateScooterRequest,
            UpdateScooterRequest,
            UpdateScooterStatusRequest,
            PartnerResponse,
            PartnerDetailResponse,
            TransferFeeResponse,
            CreatePartnerRequest,
            UpdatePartnerRequest,
            TransferFeeInput,
            ReplaceTransferFeesRequest,
            ContactResponse,
            CreateContactRequest,
            CaptchaResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin authentication API"),
        (name = "order", description = "Order management API"),
        (name = "booking", description = "Booking management API"),
        (name = "store", description = "Store management API"),
        (name = "scooter_model", description = "Scooter model API"),
        (name = "scooter", description = "Scooter fleet API"),
        (name = "partner", description = "Partner and transfer fee API"),
        (name = "contact", description = "Contact message API"),
        (name = "public", description = "Storefront API (no login required)"),
    ),
    info(
        title = "Scooter Rental Backend API",
        version = "1.0.0",
        description = "Scooter rental management REST API documentation"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
