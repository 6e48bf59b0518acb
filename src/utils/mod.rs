pub mod captcha;
pub mod jwt;
pub mod order_number;
pub mod password;
pub mod phone;

pub use captcha::{generate_captcha_code, render_captcha_svg};
pub use jwt::*;
pub use order_number::{is_valid_manual_order_number, next_order_number, order_number_prefix};
pub use password::*;
pub use phone::*;
