use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

static TW_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+886|0)\d{8,9}$").expect("valid phone regex"));

/// 去掉空白、连字号与括号
pub fn normalize_tw_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// 台湾手机或市话 (09xxxxxxxx / 02-xxxxxxxx / +886...)
pub fn validate_tw_phone(phone: &str) -> Result<(), ValidationError> {
    if TW_PHONE.is_match(&normalize_tw_phone(phone)) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("電話號碼格式不正確".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tw_phone() {
        assert!(validate_tw_phone("0912345678").is_ok());
        assert!(validate_tw_phone("0912-345-678").is_ok());
        assert!(validate_tw_phone("(02) 2345-6789").is_ok());
        assert!(validate_tw_phone("+886912345678").is_ok());
        assert!(validate_tw_phone("12345").is_err());
        assert!(validate_tw_phone("09123abc78").is_err());
    }

    #[test]
    fn test_normalize_tw_phone() {
        assert_eq!(normalize_tw_phone("0912-345 678"), "0912345678");
        assert_eq!(normalize_tw_phone("(02)2345-6789"), "0223456789");
    }
}
