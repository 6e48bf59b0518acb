use crate::entities::{
    ScooterStatus, order_scooter_entity as order_scooters, scooter_entity as scooters,
    store_entity as stores,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use validator::Validate;

#[derive(Clone)]
pub struct ScooterService {
    pool: DatabaseConnection,
}

impl ScooterService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_scooters(
        &self,
        query: &ScooterQuery,
    ) -> AppResult<PaginatedResponse<ScooterResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut cond = Condition::all();
        if let Some(status) = query.status {
            cond = cond.add(scooters::Column::Status.eq(status));
        }
        if let Some(store_id) = query.store_id {
            cond = cond.add(scooters::Column::StoreId.eq(store_id));
        }
        if let Some(scooter_type) = query.scooter_type {
            cond = cond.add(scooters::Column::ScooterType.eq(scooter_type));
        }
        if let Some(keyword) = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            cond = cond.add(
                Condition::any()
                    .add(scooters::Column::PlateNumber.contains(keyword))
                    .add(scooters::Column::Model.contains(keyword)),
            );
        }

        let base = scooters::Entity::find().filter(cond);
        let total = base.clone().count(&self.pool).await?;
        let rows = base
            .order_by_asc(scooters::Column::PlateNumber)
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

    /// 目前可出租 (待出租) 的机车，供建立订单时挑选
    pub async fn list_available(&self, store_id: Option<i32>) -> AppResult<Vec<ScooterResponse>> {
        let mut query =
            scooters::Entity::find().filter(scooters::Column::Status.eq(ScooterStatus::Available));
        if let Some(store_id) = store_id {
            query = query.filter(scooters::Column::StoreId.eq(store_id));
        }
        let rows = query
            .order_by_asc(scooters::Column::Model)
            .order_by_asc(scooters::Column::PlateNumber)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_scooter(&self, id: i32) -> AppResult<ScooterResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create_scooter(&self, request: CreateScooterRequest) -> AppResult<ScooterResponse> {
        request.validate()?;
        ensure_store_exists(&self.pool, request.store_id).await?;
        let plate_number = normalize_plate(&request.plate_number);
        ensure_unique_plate(&self.pool, &plate_number, None).await?;

        let now = Utc::now();
        let scooter = scooters::ActiveModel {
            store_id: Set(request.store_id),
            plate_number: Set(plate_number),
            model: Set(request.model.trim().to_string()),
            scooter_type: Set(request.scooter_type),
            color: Set(request.color),
            status: Set(request.status.unwrap_or(ScooterStatus::Available)),
            remark: Set(request.remark),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        log::info!("Scooter {} added to store {}", scooter.plate_number, scooter.store_id);
        Ok(scooter.into())
    }

    pub async fn update_scooter(
        &self,
        id: i32,
        request: UpdateScooterRequest,
    ) -> AppResult<ScooterResponse> {
        request.validate()?;
        let scooter = self.find(id).await?;
        let mut am = scooter.into_active_model();
        if let Some(store_id) = request.store_id {
            ensure_store_exists(&self.pool, store_id).await?;
            am.store_id = Set(store_id);
        }
        if let Some(plate_number) = request.plate_number {
            let plate_number = normalize_plate(&plate_number);
            ensure_unique_plate(&self.pool, &plate_number, Some(id)).await?;
            am.plate_number = Set(plate_number);
        }
        if let Some(model) = request.model {
            am.model = Set(model.trim().to_string());
        }
        if let Some(scooter_type) = request.scooter_type {
            am.scooter_type = Set(scooter_type);
        }
        if let Some(color) = request.color {
            am.color = Set(Some(color));
        }
        if let Some(status) = request.status {
            am.status = Set(status);
        }
        if let Some(remark) = request.remark {
            am.remark = Set(Some(remark));
        }
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?.into())
    }

    /// 手动切换状态 (例如送修 保養中)
    pub async fn update_status(&self, id: i32, status: ScooterStatus) -> AppResult<ScooterResponse> {
        let scooter = self.find(id).await?;
        let previous = scooter.status;
        let mut am = scooter.into_active_model();
        am.status = Set(status);
        am.updated_at = Set(Some(Utc::now()));
        let scooter = am.update(&self.pool).await?;
        log::info!(
            "Scooter {} status changed {} -> {}",
            scooter.plate_number,
            previous,
            status
        );
        Ok(scooter.into())
    }

    /// 曾被订单引用的机车不可删除
    pub async fn delete_scooter(&self, id: i32) -> AppResult<()> {
        let scooter = self.find(id).await?;
        let linked = order_scooters::Entity::find()
            .filter(order_scooters::Column::ScooterId.eq(id))
            .count(&self.pool)
            .await?;
        if linked > 0 {
            return Err(AppError::Unprocessable(
                "此機車仍有關聯訂單，無法刪除".to_string(),
            ));
        }
        scooters::Entity::delete_by_id(id).exec(&self.pool).await?;
        log::info!("Scooter {} deleted", scooter.plate_number);
        Ok(())
    }

    async fn find(&self, id: i32) -> AppResult<scooters::Model> {
        scooters::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("機車不存在".to_string()))
    }
}

fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

async fn ensure_store_exists<C: ConnectionTrait>(conn: &C, store_id: i32) -> AppResult<()> {
    if stores::Entity::find_by_id(store_id).one(conn).await?.is_none() {
        return Err(AppError::field("store_id", "門市不存在"));
    }
    Ok(())
}

async fn ensure_unique_plate<C: ConnectionTrait>(
    conn: &C,
    plate_number: &str,
    except_id: Option<i32>,
) -> AppResult<()> {
    let mut query =
        scooters::Entity::find().filter(scooters::Column::PlateNumber.eq(plate_number));
    if let Some(id) = except_id {
        query = query.filter(scooters::Column::Id.ne(id));
    }
    if query.count(conn).await? > 0 {
        return Err(AppError::Unprocessable("車牌號碼已存在".to_string()));
    }
    Ok(())
}
