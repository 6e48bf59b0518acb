pub mod auth_service;
pub mod booking_service;
pub mod captcha_service;
pub mod contact_service;
pub mod order_service;
pub mod partner_service;
pub mod pricing_service;
pub mod scooter_model_service;
pub mod scooter_service;
pub mod store_service;

pub use auth_service::*;
pub use booking_service::*;
pub use captcha_service::*;
pub use contact_service::*;
pub use order_service::OrderService;
pub use partner_service::*;
pub use pricing_service::{ModelFee, PricingService, calculate_transfer_fee};
pub use scooter_model_service::*;
pub use scooter_service::*;
pub use store_service::*;
