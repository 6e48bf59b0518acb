pub mod auth;
pub mod booking;
pub mod contact;
pub mod order;
pub mod partner;
pub mod public;
pub mod scooter;
pub mod scooter_model;
pub mod store;

pub use auth::auth_config;
pub use booking::booking_config;
pub use contact::contact_config;
pub use order::order_config;
pub use partner::partner_config;
pub use public::public_config;
pub use scooter::scooter_config;
pub use scooter_model::scooter_model_config;
pub use store::store_config;
