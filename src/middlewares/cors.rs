use actix_cors::Cors;
use actix_web::http::header;

/// 未设定 allowed_origins 时放行所有来源 (本地开发)
pub fn create_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allowed_origin_fn(|_, _| true)
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::{BoxBody, EitherBody};
    use actix_web::dev::ServiceResponse;
    use actix_web::test::{TestRequest, call_service, init_service};
    use actix_web::{App, HttpResponse, web};

    async fn preflight(
        allowed: Vec<String>,
        origin: &str,
    ) -> ServiceResponse<EitherBody<BoxBody>> {
        let app = init_service(
            App::new()
                .wrap(create_cors(&allowed))
                .route("/api/orders", web::get().to(HttpResponse::Ok)),
        )
        .await;
        let req = TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/orders")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH"))
            .to_request();
        call_service(&app, req).await
    }

    #[actix_web::test]
    async fn test_any_origin_when_unconfigured() {
        let resp = preflight(vec![], "http://localhost:5173").await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }

    #[actix_web::test]
    async fn test_configured_origins_only() {
        let allowed = vec!["https://admin.example.com".to_string()];
        let resp = preflight(allowed.clone(), "https://admin.example.com").await;
        assert!(resp.status().is_success());

        let resp = preflight(allowed, "https://evil.example.com").await;
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
