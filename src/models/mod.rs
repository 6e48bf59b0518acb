pub mod auth;
pub mod booking;
pub mod captcha;
pub mod common;
pub mod contact;
pub mod order;
pub mod pagination;
pub mod partner;
pub mod scooter;
pub mod scooter_model;
pub mod store;

pub use auth::*;
pub use booking::*;
pub use captcha::*;
pub use common::*;
pub use contact::*;
pub use order::*;
pub use pagination::*;
pub use partner::*;
pub use scooter::*;
pub use scooter_model::*;
pub use store::*;
