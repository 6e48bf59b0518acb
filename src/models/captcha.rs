use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaptchaResponse {
    pub captcha_id: String,
    /// SVG 图片原文
    pub svg: String,
    /// 有效秒数
    pub expires_in: i64,
}
