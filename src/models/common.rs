use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// 错误响应中的 error 字段，响应外壳为 {success:false, error}
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// VALIDATION_ERROR / UNPROCESSABLE / BAD_REQUEST / AUTH_ERROR / NOT_FOUND / INTERNAL_ERROR
    pub code: String,
    pub message: String,
    /// 逐字段错误，仅校验失败时出现
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

/// 允许 JSON 中显式传 null 以清空可空字段：缺省 -> None，null -> Some(None)
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        partner_id: Option<Option<i32>>,
    }

    #[test]
    fn test_double_option_distinguishes_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.partner_id, None);
        let null: Patch = serde_json::from_str(r#"{"partner_id": null}"#).unwrap();
        assert_eq!(null.partner_id, Some(None));
        let set: Patch = serde_json::from_str(r#"{"partner_id": 3}"#).unwrap();
        assert_eq!(set.partner_id, Some(Some(3)));
    }
}
