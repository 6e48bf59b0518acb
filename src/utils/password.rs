use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};

// bcrypt 只取前 72 bytes
const MAX_PASSWORD_BYTES: usize = 72;
const MIN_PASSWORD_CHARS: usize = 8;

/// 管理员密码规则: 8 字元以上、不超过 72 bytes、需含字母与数字
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::ConfigError(format!(
            "管理員密碼至少需要 {MIN_PASSWORD_CHARS} 個字元"
        )));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::ConfigError(format!(
            "管理員密碼不可超過 {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(AppError::ConfigError(
            "管理員密碼必須同時包含字母與數字".to_string(),
        ));
    }

    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::InternalError(format!("密碼雜湊失敗: {e}")))
}

/// 雜湊格式損壞時視為比對失敗，而非 500
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(matched) => matched,
        Err(e) => {
            log::error!("Stored password hash is unreadable: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Secret123").is_ok());
        assert!(validate_password("密碼密碼密碼ab12").is_ok());
        assert!(validate_password("Secret").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("abcdefgh").is_err());
        assert!(validate_password(&format!("a1{}", "x".repeat(80))).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("Secret123").unwrap();
        assert!(verify_password("Secret123", &hashed));
        assert!(!verify_password("secret123", &hashed));
    }

    #[test]
    fn test_corrupt_hash_does_not_match() {
        assert!(!verify_password("Secret123", "not-a-bcrypt-hash"));
    }
}
