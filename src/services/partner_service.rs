use crate::entities::{
    order_entity as orders, partner_entity as partners, scooter_model_entity as scooter_models,
    transfer_fee_entity as transfer_fees,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashSet;
use validator::Validate;

#[derive(Clone)]
pub struct PartnerService {
    pool: DatabaseConnection,
}

impl PartnerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_partners(
        &self,
        query: &PartnerQuery,
    ) -> AppResult<PaginatedResponse<PartnerResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base = partners::Entity::find();
        if let Some(keyword) = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            base = base.filter(partners::Column::Name.contains(keyword));
        }

        let total = base.clone().count(&self.pool).await?;
        let rows = base
            .order_by_asc(partners::Column::Id)
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

    /// 合作商详情，含调车费表
    pub async fn get_partner(&self, id: i32) -> AppResult<PartnerDetailResponse> {
        let partner = self.find(id).await?;
        let transfer_fees = load_fee_rows(&self.pool, id).await?;
        Ok(PartnerDetailResponse {
            partner: partner.into(),
            transfer_fees,
        })
    }

    pub async fn create_partner(&self, request: CreatePartnerRequest) -> AppResult<PartnerResponse> {
        request.validate()?;
        let now = Utc::now();
        let partner = partners::ActiveModel {
            name: Set(request.name.trim().to_string()),
            contact_person: Set(request.contact_person),
            phone: Set(request.phone),
            email: Set(request.email),
            address: Set(request.address),
            remark: Set(request.remark),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        log::info!("Partner {} ({}) created", partner.id, partner.name);
        Ok(partner.into())
    }

    pub async fn update_partner(
        &self,
        id: i32,
        request: UpdatePartnerRequest,
    ) -> AppResult<PartnerResponse> {
        request.validate()?;
        let mut am = self.find(id).await?.into_active_model();
        if let Some(v) = request.name {
            am.name = Set(v.trim().to_string());
        }
        if let Some(v) = request.contact_person {
            am.contact_person = Set(Some(v));
        }
        if let Some(v) = request.phone {
            am.phone = Set(Some(v));
        }
        if let Some(v) = request.email {
            am.email = Set(Some(v));
        }
        if let Some(v) = request.address {
            am.address = Set(Some(v));
        }
        if let Some(v) = request.remark {
            am.remark = Set(Some(v));
        }
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?.into())
    }

    /// 有订单引用时不可删除；否则连同调车费一并删除
    pub async fn delete_partner(&self, id: i32) -> AppResult<()> {
        let partner = self.find(id).await?;
        let order_count = orders::Entity::find()
            .filter(orders::Column::PartnerId.eq(id))
            .count(&self.pool)
            .await?;
        if order_count > 0 {
            return Err(AppError::Unprocessable(
                "此合作商仍有關聯訂單，無法刪除".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;
        transfer_fees::Entity::delete_many()
            .filter(transfer_fees::Column::PartnerId.eq(id))
            .exec(&txn)
            .await?;
        partners::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        log::info!("Partner {} ({}) deleted", partner.id, partner.name);
        Ok(())
    }

    /// 整批替换调车费表
    pub async fn replace_transfer_fees(
        &self,
        id: i32,
        request: ReplaceTransferFeesRequest,
    ) -> AppResult<Vec<TransferFeeResponse>> {
        let mut seen = HashSet::new();
        for fee in &request.fees {
            if fee.same_day_fee < 0 || fee.overnight_fee < 0 {
                return Err(AppError::field("fees", "調車費不可為負數"));
            }
            if !seen.insert(fee.scooter_model_id) {
                return Err(AppError::field("fees", "同一機車型號不可重複設定"));
            }
        }

        let txn = self.pool.begin().await?;

        if partners::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(AppError::NotFound("合作商不存在".to_string()));
        }

        if !seen.is_empty() {
            let found = scooter_models::Entity::find()
                .filter(scooter_models::Column::Id.is_in(seen.iter().copied()))
                .count(&txn)
                .await?;
            if found as usize != seen.len() {
                return Err(AppError::field("fees", "機車型號不存在"));
            }
        }

        transfer_fees::Entity::delete_many()
            .filter(transfer_fees::Column::PartnerId.eq(id))
            .exec(&txn)
            .await?;

        let now = Utc::now();
        for fee in &request.fees {
            transfer_fees::ActiveModel {
                partner_id: Set(id),
                scooter_model_id: Set(fee.scooter_model_id),
                same_day_fee: Set(fee.same_day_fee),
                overnight_fee: Set(fee.overnight_fee),
                created_at: Set(Some(now)),
                updated_at: Set(Some(now)),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        let rows = load_fee_rows(&txn, id).await?;
        txn.commit().await?;

        log::info!("Partner {id} transfer fees replaced ({} rows)", rows.len());
        Ok(rows)
    }

    async fn find(&self, id: i32) -> AppResult<partners::Model> {
        partners::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("合作商不存在".to_string()))
    }
}

async fn load_fee_rows<C: ConnectionTrait>(
    conn: &C,
    partner_id: i32,
) -> AppResult<Vec<TransferFeeResponse>> {
    let rows = transfer_fees::Entity::find()
        .filter(transfer_fees::Column::PartnerId.eq(partner_id))
        .find_also_related(scooter_models::Entity)
        .order_by_asc(transfer_fees::Column::ScooterModelId)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn fee(scooter_model_id: i32, same_day_fee: i64, overnight_fee: i64) -> TransferFeeInput {
        TransferFeeInput {
            scooter_model_id,
            same_day_fee,
            overnight_fee,
        }
    }

    #[tokio::test]
    async fn test_replace_transfer_fees() {
        let db = setup_db().await;
        let partner = create_partner(&db, "海景民宿").await;
        let many = create_scooter_model(&db, "Many 110").await;
        let jet = create_scooter_model(&db, "Jet").await;
        create_transfer_fee(&db, partner.id, many.id, 1, 1).await;
        let service = PartnerService::new(db);

        let rows = service
            .replace_transfer_fees(
                partner.id,
                ReplaceTransferFeesRequest {
                    fees: vec![fee(many.id, 300, 500), fee(jet.id, 350, 600)],
                },
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].scooter_model_name.as_deref(), Some("Many 110"));
        assert_eq!(rows[0].same_day_fee, 300);

        let detail = service.get_partner(partner.id).await.unwrap();
        assert_eq!(detail.transfer_fees.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_rejects_duplicates_and_negative_fees() {
        let db = setup_db().await;
        let partner = create_partner(&db, "海景民宿").await;
        let many = create_scooter_model(&db, "Many 110").await;
        let service = PartnerService::new(db);

        let dup = service
            .replace_transfer_fees(
                partner.id,
                ReplaceTransferFeesRequest {
                    fees: vec![fee(many.id, 300, 500), fee(many.id, 1, 1)],
                },
            )
            .await;
        assert!(matches!(dup, Err(AppError::FieldErrors(_))));

        let negative = service
            .replace_transfer_fees(
                partner.id,
                ReplaceTransferFeesRequest {
                    fees: vec![fee(many.id, -1, 500)],
                },
            )
            .await;
        assert!(matches!(negative, Err(AppError::FieldErrors(_))));

        let unknown_model = service
            .replace_transfer_fees(
                partner.id,
                ReplaceTransferFeesRequest {
                    fees: vec![fee(999, 1, 1)],
                },
            )
            .await;
        assert!(matches!(unknown_model, Err(AppError::FieldErrors(_))));
    }

    #[tokio::test]
    async fn test_delete_partner_removes_fees() {
        let db = setup_db().await;
        let partner = create_partner(&db, "海景民宿").await;
        let many = create_scooter_model(&db, "Many 110").await;
        create_transfer_fee(&db, partner.id, many.id, 300, 500).await;
        let service = PartnerService::new(db.clone());

        service.delete_partner(partner.id).await.unwrap();
        assert_eq!(transfer_fees::Entity::find().count(&db).await.unwrap(), 0);
        assert!(matches!(
            service.get_partner(partner.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
