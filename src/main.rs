use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use scooter_rental_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    error::{payload_error_handler, set_debug},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");
    set_debug(config.app.debug);

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建JWT服务
    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expires_in);

    // 创建服务
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    auth_service
        .ensure_bootstrap_admin(&config.admin)
        .await
        .expect("Failed to create bootstrap admin");

    let order_service = OrderService::new(pool.clone());
    let pricing_service = PricingService::new(pool.clone());
    let booking_service = BookingService::new(pool.clone());
    let store_service = StoreService::new(pool.clone());
    let scooter_model_service = ScooterModelService::new(pool.clone());
    let scooter_service = ScooterService::new(pool.clone());
    let partner_service = PartnerService::new(pool.clone());
    let contact_service = ContactService::new(pool.clone());
    let captcha_service =
        CaptchaService::new(config.captcha.ttl_seconds, config.captcha.max_entries);

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let allowed_origins = config.server.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&allowed_origins))
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _| payload_error_handler(err)))
            .app_data(web::QueryConfig::default().error_handler(|err, _| payload_error_handler(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _| payload_error_handler(err)))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(pricing_service.clone()))
            .app_data(web::Data::new(booking_service.clone()))
            .app_data(web::Data::new(store_service.clone()))
            .app_data(web::Data::new(scooter_model_service.clone()))
            .app_data(web::Data::new(scooter_service.clone()))
            .app_data(web::Data::new(partner_service.clone()))
            .app_data(web::Data::new(contact_service.clone()))
            .app_data(web::Data::new(captcha_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api")
                    .configure(handlers::auth_config)
                    .configure(handlers::public_config)
                    .configure(handlers::order_config)
                    .configure(handlers::booking_config)
                    .configure(handlers::store_config)
                    .configure(handlers::scooter_model_config)
                    .configure(handlers::scooter_config)
                    .configure(handlers::partner_config)
                    .configure(handlers::contact_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
