use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 逐字段的校验错误信息
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// app.debug 开启时 500 响应携带原始错误信息
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

pub fn set_debug(enabled: bool) {
    EXPOSE_INTERNAL_ERRORS.store(enabled, Ordering::Relaxed);
}

fn debug_enabled() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed)
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Validation failed on fields: {0:?}")]
    FieldErrors(FieldErrors),

    /// 业务前置条件不满足 (例如机车不可出租、预约状态不符)
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// 请求体或查询参数无法解析
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// 单字段校验错误
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::FieldErrors(errors)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} 格式不正確 ({})", e.code),
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        AppError::FieldErrors(fields)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::FieldErrors(_) | AppError::Unprocessable(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let (error_code, message, fields) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                ("VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::FieldErrors(errors) => {
                log::warn!("Validation error: {errors:?}");
                let first = errors
                    .values()
                    .flat_map(|v| v.iter())
                    .next()
                    .cloned()
                    .unwrap_or_else(|| "資料驗證失敗".to_string());
                ("VALIDATION_ERROR", first, Some(errors))
            }
            AppError::Unprocessable(msg) => {
                log::warn!("Unprocessable request: {msg}");
                ("UNPROCESSABLE", msg.clone(), None)
            }
            AppError::BadRequest(msg) => {
                log::warn!("Bad request: {msg}");
                ("BAD_REQUEST", msg.clone(), None)
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                ("AUTH_ERROR", msg.clone(), None)
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                ("AUTH_ERROR", "登入已失效，請重新登入".to_string(), None)
            }
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone(), None),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                ("INTERNAL_ERROR", internal_message(self), None)
            }
            _ => {
                log::error!("Internal error: {self}");
                ("INTERNAL_ERROR", internal_message(self), None)
            }
        };

        let mut error = json!({
            "code": error_code,
            "message": message,
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": error
        }))
    }
}

fn internal_message(err: &AppError) -> String {
    if debug_enabled() {
        err.to_string()
    } else {
        "伺服器錯誤".to_string()
    }
}

/// actix 的 Json/Query/Path 提取失败统一转为 400
pub fn payload_error_handler<E: std::fmt::Display>(err: E) -> actix_web::Error {
    AppError::BadRequest(format!("請求格式錯誤: {err}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_unprocessable_maps_to_422() {
        let err = AppError::Unprocessable("只能將「預約中」的預約轉為訂單".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE");
    }

    #[actix_web::test]
    async fn test_field_errors_are_listed() {
        let err = AppError::field("scooter_ids", "請至少選擇一台機車");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "請至少選擇一台機車");
        assert_eq!(body["error"]["fields"]["scooter_ids"][0], "請至少選擇一台機車");
    }

    #[actix_web::test]
    async fn test_payload_error_maps_to_400() {
        let err = payload_error_handler("expected value at line 1 column 1");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_internal_error_hides_message() {
        let err = AppError::InternalError("connection reset".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        // debug 关闭时不暴露细节
        if !debug_enabled() {
            assert_eq!(body["error"]["message"], "伺服器錯誤");
        }
    }
}
