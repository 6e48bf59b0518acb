use crate::entities::contact_message_entity as contacts;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::normalize_tw_phone;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use validator::Validate;

#[derive(Clone)]
pub struct ContactService {
    pool: DatabaseConnection,
}

impl ContactService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_contact(&self, request: CreateContactRequest) -> AppResult<ContactResponse> {
        request.validate()?;
        let now = Utc::now();
        let contact = contacts::ActiveModel {
            name: Set(request.name.trim().to_string()),
            email: Set(request.email),
            phone: Set(request.phone.as_deref().map(normalize_tw_phone)),
            message: Set(request.message.trim().to_string()),
            is_processed: Set(false),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        log::info!("Contact message {} received", contact.id);
        Ok(contact.into())
    }

    pub async fn list_contacts(
        &self,
        query: &ContactQuery,
    ) -> AppResult<PaginatedResponse<ContactResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base = contacts::Entity::find();
        if let Some(is_processed) = query.is_processed {
            base = base.filter(contacts::Column::IsProcessed.eq(is_processed));
        }

        let total = base.clone().count(&self.pool).await?;
        let rows = base
            .order_by_desc(contacts::Column::CreatedAt)
            .order_by_desc(contacts::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    pub async fn mark_processed(&self, id: i32) -> AppResult<ContactResponse> {
        let mut am = self.find(id).await?.into_active_model();
        am.is_processed = Set(true);
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn delete_contact(&self, id: i32) -> AppResult<()> {
        self.find(id).await?;
        contacts::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(())
    }

    async fn find(&self, id: i32) -> AppResult<contacts::Model> {
        contacts::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("留言不存在".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;

    fn request(message: &str) -> CreateContactRequest {
        CreateContactRequest {
            captcha_id: "id".into(),
            captcha_answer: "ABC234".into(),
            name: "陳先生".into(),
            email: Some("chen@example.com".into()),
            phone: None,
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn test_contact_flow() {
        let db = setup_db().await;
        let service = ContactService::new(db);

        let first = service.create_contact(request("請問有電輔車嗎")).await.unwrap();
        service.create_contact(request("想預約三台")).await.unwrap();
        assert!(!first.is_processed);

        let processed = service.mark_processed(first.id).await.unwrap();
        assert!(processed.is_processed);

        let pending = service
            .list_contacts(&ContactQuery {
                page: None,
                per_page: None,
                is_processed: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(pending.total, 1);

        service.delete_contact(first.id).await.unwrap();
        assert!(matches!(
            service.mark_processed(first.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let db = setup_db().await;
        let service = ContactService::new(db);
        let err = service.create_contact(request("")).await.unwrap_err();
        assert!(matches!(err, AppError::FieldErrors(f) if f.contains_key("message")));
    }
}
