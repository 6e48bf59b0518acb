use crate::entities::{scooter_entity as scooters, store_entity as stores};
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
pub struct StoreService {
    pool: DatabaseConnection,
}

impl StoreService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_stores(
        &self,
        query: &StoreQuery,
    ) -> AppResult<PaginatedResponse<StoreResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base = stores::Entity::find();
        if let Some(keyword) = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            base = base.filter(stores::Column::Name.contains(keyword));
        }

        let total = base.clone().count(&self.pool).await?;
        let rows = base
            .order_by_asc(stores::Column::Id)
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

    pub async fn get_store(&self, id: i32) -> AppResult<StoreResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create_store(&self, request: CreateStoreRequest) -> AppResult<StoreResponse> {
        request.validate()?;
        let now = Utc::now();
        let store = stores::ActiveModel {
            name: Set(request.name.trim().to_string()),
            address: Set(request.address),
            phone: Set(request.phone.as_deref().map(normalize_tw_phone)),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        log::info!("Store {} ({}) created", store.id, store.name);
        Ok(store.into())
    }

    pub async fn update_store(
        &self,
        id: i32,
        request: UpdateStoreRequest,
    ) -> AppResult<StoreResponse> {
        request.validate()?;
        let mut am = self.find(id).await?.into_active_model();
        if let Some(name) = request.name {
            am.name = Set(name.trim().to_string());
        }
        if let Some(address) = request.address {
            am.address = Set(Some(address));
        }
        if let Some(phone) = request.phone {
            am.phone = Set(Some(normalize_tw_phone(&phone)));
        }
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?.into())
    }

    /// 门市仍有机车时不可删除
    pub async fn delete_store(&self, id: i32) -> AppResult<()> {
        let store = self.find(id).await?;
        let scooter_count = scooters::Entity::find()
            .filter(scooters::Column::StoreId.eq(id))
            .count(&self.pool)
            .await?;
        if scooter_count > 0 {
            return Err(AppError::Unprocessable(
                "此門市仍有機車，無法刪除".to_string(),
            ));
        }
        stores::Entity::delete_by_id(id).exec(&self.pool).await?;
        log::info!("Store {} ({}) deleted", store.id, store.name);
        Ok(())
    }

    async fn find(&self, id: i32) -> AppResult<stores::Model> {
        stores::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("門市不存在".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ScooterStatus;
    use crate::test_support::*;

    #[tokio::test]
    async fn test_create_and_update_store() {
        let db = setup_db().await;
        let service = StoreService::new(db);

        let store = service
            .create_store(CreateStoreRequest {
                name: " 花蓮站前店 ".into(),
                address: Some("花蓮市國聯一路".into()),
                phone: Some("03-812-3456".into()),
            })
            .await
            .unwrap();
        assert_eq!(store.name, "花蓮站前店");
        assert_eq!(store.phone.as_deref(), Some("038123456"));

        let updated = service
            .update_store(
                store.id,
                UpdateStoreRequest {
                    name: Some("花蓮總店".into()),
                    address: None,
                    phone: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "花蓮總店");
        assert_eq!(updated.address.as_deref(), Some("花蓮市國聯一路"));
    }

    #[tokio::test]
    async fn test_invalid_phone_is_rejected() {
        let db = setup_db().await;
        let service = StoreService::new(db);
        let err = service
            .create_store(CreateStoreRequest {
                name: "花蓮站前店".into(),
                address: None,
                phone: Some("abc".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FieldErrors(f) if f.contains_key("phone")));
    }

    #[tokio::test]
    async fn test_store_with_scooters_cannot_be_deleted() {
        let db = setup_db().await;
        let store = create_store(&db, "花蓮站前店").await;
        create_scooter(&db, store.id, "AAA-001", "Many 110", ScooterStatus::Available).await;
        let empty = create_store(&db, "七星潭店").await;
        let service = StoreService::new(db);

        let err = service.delete_store(store.id).await.unwrap_err();
        assert!(matches!(err, AppError::Unprocessable(_)));
        service.delete_store(empty.id).await.unwrap();
        assert!(matches!(
            service.get_store(empty.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
