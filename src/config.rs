use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub captcha: CaptchaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// 开启后 500 响应会带上原始错误信息
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 为空时 CORS 放行任意来源
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64, // seconds
}

/// 首次启动时若 admin_users 为空，则以此建立管理员
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaConfig {
    #[serde(default = "default_captcha_ttl")]
    pub ttl_seconds: i64,
    /// 同时保留的验证码上限，超过时淘汰最早的
    #[serde(default = "default_captcha_max_entries")]
    pub max_entries: usize,
}

fn default_captcha_ttl() -> i64 {
    300
}

fn default_captcha_max_entries() -> usize {
    10_000
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_captcha_ttl(),
            max_entries: default_captcha_max_entries(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml")?;

                Config {
                    app: AppConfig {
                        debug: get_env_parse("APP_DEBUG", false),
                    },
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                        allowed_origins: Vec::new(),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 43_200i64),
                    },
                    admin: AdminConfig {
                        name: get_env("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
                        email: get_env("ADMIN_EMAIL").unwrap_or_default(),
                        password: get_env("ADMIN_PASSWORD").unwrap_or_default(),
                    },
                    captcha: CaptchaConfig {
                        ttl_seconds: get_env_parse("CAPTCHA_TTL_SECONDS", default_captcha_ttl()),
                        max_entries: get_env_parse(
                            "CAPTCHA_MAX_ENTRIES",
                            default_captcha_max_entries(),
                        ),
                    },
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("APP_DEBUG")
            && let Ok(b) = v.parse()
        {
            config.app.debug = b;
        }
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            config.server.allowed_origins = split_origins(&v);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("ADMIN_NAME") {
            config.admin.name = v;
        }
        if let Ok(v) = env::var("ADMIN_EMAIL") {
            config.admin.email = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            config.admin.password = v;
        }
        if let Ok(v) = env::var("CAPTCHA_TTL_SECONDS")
            && let Ok(n) = v.parse()
        {
            config.captcha.ttl_seconds = n;
        }
        if let Ok(v) = env::var("CAPTCHA_MAX_ENTRIES")
            && let Ok(n) = v.parse()
        {
            config.captcha.max_entries = n;
        }

        Ok(config)
    }
}

// 逗号分隔的来源列表
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins(" https://a.example.com, ,https://b.example.com "),
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert!(split_origins("").is_empty());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "postgres://localhost/scooter"
            max_connections = 5

            [jwt]
            secret = "s3cret"
            access_token_expires_in = 3600
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(!config.app.debug);
        assert_eq!(config.captcha.ttl_seconds, 300);
        assert!(config.admin.email.is_empty());
        assert!(config.server.allowed_origins.is_empty());
    }

    #[test]
    fn test_parse_full_toml() {
        let raw = r#"
            [app]
            debug = true

            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://localhost/scooter"
            max_connections = 10

            [jwt]
            secret = "s3cret"
            access_token_expires_in = 7200

            [admin]
            name = "Admin"
            email = "admin@example.com"
            password = "Secret123"

            [captcha]
            ttl_seconds = 120
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert!(config.app.debug);
        assert_eq!(config.admin.email, "admin@example.com");
        assert_eq!(config.captcha.ttl_seconds, 120);
        assert_eq!(config.captcha.max_entries, 10_000);
    }
}
