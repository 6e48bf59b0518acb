use crate::config::AdminConfig;
use crate::entities::admin_user_entity as admins;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use validator::Validate;

const LOGIN_FAILED: &str = "帳號或密碼錯誤";

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let admin = admins::Entity::find()
            .filter(admins::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError(LOGIN_FAILED.to_string()))?;

        if !verify_password(&request.password, &admin.password_hash) {
            log::warn!("Failed login attempt for {email}");
            return Err(AppError::AuthError(LOGIN_FAILED.to_string()));
        }

        let access_token = self
            .jwt_service
            .generate_access_token(admin.id, &admin.email)?;
        log::info!("Admin {} logged in", admin.email);

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
            admin: admin.into(),
        })
    }

    pub async fn me(&self, admin_id: i32) -> AppResult<AdminResponse> {
        let admin = admins::Entity::find_by_id(admin_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("管理員不存在".to_string()))?;
        Ok(admin.into())
    }

    /// 管理员表为空时按配置建立第一个帐号
    pub async fn ensure_bootstrap_admin(&self, config: &AdminConfig) -> AppResult<()> {
        if admins::Entity::find().count(&self.pool).await? > 0 {
            return Ok(());
        }
        if config.email.trim().is_empty() || config.password.is_empty() {
            log::warn!("No admin account exists and [admin] email/password is not configured");
            return Ok(());
        }
        validate_password(&config.password)?;

        let now = Utc::now();
        let admin = admins::ActiveModel {
            name: Set(config.name.clone()),
            email: Set(config.email.trim().to_lowercase()),
            password_hash: Set(hash_password(&config.password)?),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        log::info!("Bootstrap admin {} created", admin.email);
        Ok(())
    }
}
