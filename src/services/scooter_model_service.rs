use crate::entities::{
    scooter_entity as scooters, scooter_model_entity as scooter_models,
    transfer_fee_entity as transfer_fees,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use validator::Validate;

#[derive(Clone)]
pub struct ScooterModelService {
    pool: DatabaseConnection,
}

impl ScooterModelService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_models(
        &self,
        query: &ScooterModelQuery,
    ) -> AppResult<PaginatedResponse<ScooterModelResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base = scooter_models::Entity::find();
        if let Some(is_active) = query.is_active {
            base = base.filter(scooter_models::Column::IsActive.eq(is_active));
        }
        if let Some(keyword) = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            base = base.filter(scooter_models::Column::Name.contains(keyword));
        }

        let total = base.clone().count(&self.pool).await?;
        let rows = base
            .order_by_asc(scooter_models::Column::Name)
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

    /// 前台展示：仅启用中的型号，不分页
    pub async fn list_active_models(&self) -> AppResult<Vec<ScooterModelResponse>> {
        let rows = scooter_models::Entity::find()
            .filter(scooter_models::Column::IsActive.eq(true))
            .order_by_asc(scooter_models::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_model(&self, id: i32) -> AppResult<ScooterModelResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create_model(
        &self,
        request: CreateScooterModelRequest,
    ) -> AppResult<ScooterModelResponse> {
        request.validate()?;
        let name = request.name.trim().to_string();
        ensure_unique_name(&self.pool, &name, None).await?;

        let now = Utc::now();
        let model = scooter_models::ActiveModel {
            name: Set(name),
            scooter_type: Set(request.scooter_type),
            image_url: Set(request.image_url),
            is_active: Set(request.is_active.unwrap_or(true)),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(model.into())
    }

    pub async fn update_model(
        &self,
        id: i32,
        request: UpdateScooterModelRequest,
    ) -> AppResult<ScooterModelResponse> {
        request.validate()?;
        let model = self.find(id).await?;
        let mut am = model.into_active_model();
        if let Some(name) = request.name {
            let name = name.trim().to_string();
            ensure_unique_name(&self.pool, &name, Some(id)).await?;
            am.name = Set(name);
        }
        if let Some(scooter_type) = request.scooter_type {
            am.scooter_type = Set(scooter_type);
        }
        if let Some(image_url) = request.image_url {
            am.image_url = Set(Some(image_url));
        }
        if let Some(is_active) = request.is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?.into())
    }

    /// 仍有机车或调车费设定引用时不可删除
    pub async fn delete_model(&self, id: i32) -> AppResult<()> {
        let model = self.find(id).await?;
        let scooter_count = scooters::Entity::find()
            .filter(scooters::Column::Model.eq(model.name.as_str()))
            .count(&self.pool)
            .await?;
        let fee_count = transfer_fees::Entity::find()
            .filter(transfer_fees::Column::ScooterModelId.eq(id))
            .count(&self.pool)
            .await?;
        if scooter_count > 0 || fee_count > 0 {
            return Err(AppError::Unprocessable(
                "此機車型號仍在使用中，無法刪除".to_string(),
            ));
        }
        scooter_models::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        log::info!("Scooter model {} deleted", model.name);
        Ok(())
    }

    async fn find(&self, id: i32) -> AppResult<scooter_models::Model> {
        scooter_models::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("機車型號不存在".to_string()))
    }
}

async fn ensure_unique_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    except_id: Option<i32>,
) -> AppResult<()> {
    let mut query = scooter_models::Entity::find().filter(scooter_models::Column::Name.eq(name));
    if let Some(id) = except_id {
        query = query.filter(scooter_models::Column::Id.ne(id));
    }
    if query.count(conn).await? > 0 {
        return Err(AppError::field("name", "型號名稱已存在"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ScooterStatus, ScooterType};
    use crate::test_support::*;

    fn create_request(name: &str, is_active: Option<bool>) -> CreateScooterModelRequest {
        CreateScooterModelRequest {
            name: name.into(),
            scooter_type: ScooterType::GreenPlate,
            image_url: None,
            is_active,
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let db = setup_db().await;
        let service = ScooterModelService::new(db);
        service
            .create_model(create_request("Gogoro VIVA", None))
            .await
            .unwrap();
        let err = service
            .create_model(create_request("Gogoro VIVA", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FieldErrors(f) if f.contains_key("name")));
    }

    #[tokio::test]
    async fn test_public_listing_hides_inactive() {
        let db = setup_db().await;
        let service = ScooterModelService::new(db);
        service
            .create_model(create_request("Gogoro VIVA", None))
            .await
            .unwrap();
        service
            .create_model(create_request("Ai-1", Some(false)))
            .await
            .unwrap();

        let active = service.list_active_models().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Gogoro VIVA");
        assert_eq!(active[0].scooter_type, ScooterType::GreenPlate);
    }

    #[tokio::test]
    async fn test_model_in_use_cannot_be_deleted() {
        let db = setup_db().await;
        let store = create_store(&db, "花蓮站前店").await;
        let used = create_scooter_model(&db, "Many 110").await;
        create_scooter(&db, store.id, "AAA-001", "Many 110", ScooterStatus::Available).await;
        let priced = create_scooter_model(&db, "Jet").await;
        let partner = create_partner(&db, "海景民宿").await;
        create_transfer_fee(&db, partner.id, priced.id, 100, 200).await;
        let unused = create_scooter_model(&db, "Ai-1").await;
        let service = ScooterModelService::new(db);

        for id in [used.id, priced.id] {
            let err = service.delete_model(id).await.unwrap_err();
            assert!(matches!(err, AppError::Unprocessable(_)));
        }
        service.delete_model(unused.id).await.unwrap();
    }
}
