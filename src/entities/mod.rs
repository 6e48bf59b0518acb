#[macro_use]
mod text_enum;

pub mod admin_users;
pub mod bookings;
pub mod contact_messages;
pub mod order_scooters;
pub mod orders;
pub mod partner_transfer_fees;
pub mod partners;
pub mod scooter_models;
pub mod scooters;
pub mod stores;

pub use admin_users as admin_user_entity;
pub use bookings as booking_entity;
pub use contact_messages as contact_message_entity;
pub use order_scooters as order_scooter_entity;
pub use orders as order_entity;
pub use partner_transfer_fees as transfer_fee_entity;
pub use partners as partner_entity;
pub use scooter_models as scooter_model_entity;
pub use scooters as scooter_entity;
pub use stores as store_entity;

pub use bookings::BookingStatus;
pub use orders::OrderStatus;
pub use scooters::{ScooterStatus, ScooterType};
