use crate::entities::{partner_entity as partners, scooter_model_entity as scooter_models};
use crate::entities::transfer_fee_entity as transfer_fees;
use crate::error::{AppError, AppResult};
use crate::models::{CalculateFeeRequest, FeeQuoteItem, FeeQuoteResponse};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::{BTreeMap, HashMap};

/// 某型号的两种协议单价
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelFee {
    pub same_day_fee: i64,
    pub overnight_fee: i64,
}

/// 调车费计算
///
/// - 起讫同一天: days = 1，取 same_day_fee
/// - 否则 days = 相差晚数，取 overnight_fee
/// - 台数 <= 0 的型号略过；未设定费用的型号小计为 0 并标记 fee_found = false
pub fn calculate_transfer_fee(
    fees: &HashMap<String, ModelFee>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    counts: &BTreeMap<String, i64>,
) -> AppResult<FeeQuoteResponse> {
    if end_date < start_date {
        return Err(AppError::field("end_date", "結束日期不可早於開始日期"));
    }

    let is_same_day = start_date == end_date;
    let days = if is_same_day {
        1
    } else {
        (end_date - start_date).num_days()
    };

    let mut items = Vec::with_capacity(counts.len());
    let mut total_amount: i64 = 0;
    for (model, &count) in counts {
        if count <= 0 {
            continue;
        }
        let fee = fees.get(model);
        let unit_fee = fee
            .map(|f| if is_same_day { f.same_day_fee } else { f.overnight_fee })
            .unwrap_or(0);
        let subtotal = unit_fee
            .checked_mul(days)
            .and_then(|v| v.checked_mul(count))
            .ok_or_else(amount_overflow)?;
        total_amount = total_amount
            .checked_add(subtotal)
            .ok_or_else(amount_overflow)?;
        items.push(FeeQuoteItem {
            model: model.clone(),
            count,
            unit_fee,
            subtotal,
            fee_found: fee.is_some(),
        });
    }

    Ok(FeeQuoteResponse {
        is_same_day,
        days,
        total_amount,
        items,
    })
}

fn amount_overflow() -> AppError {
    AppError::field("scooters", "台數或天數過大，無法計算金額")
}

/// 读取合作商的费用表 (型号名称 -> 单价)
pub(crate) async fn load_partner_fees<C: ConnectionTrait>(
    conn: &C,
    partner_id: i32,
) -> AppResult<HashMap<String, ModelFee>> {
    let rows = transfer_fees::Entity::find()
        .filter(transfer_fees::Column::PartnerId.eq(partner_id))
        .find_also_related(scooter_models::Entity)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(fee, model)| {
            model.map(|m| {
                (
                    m.name,
                    ModelFee {
                        same_day_fee: fee.same_day_fee,
                        overnight_fee: fee.overnight_fee,
                    },
                )
            })
        })
        .collect())
}

pub(crate) async fn ensure_partner_exists<C: ConnectionTrait>(
    conn: &C,
    partner_id: i32,
) -> AppResult<partners::Model> {
    partners::Entity::find_by_id(partner_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::field("partner_id", "合作商不存在"))
}

pub(crate) async fn quote_transfer_fee<C: ConnectionTrait>(
    conn: &C,
    partner_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    counts: &BTreeMap<String, i64>,
) -> AppResult<FeeQuoteResponse> {
    ensure_partner_exists(conn, partner_id).await?;
    let fees = load_partner_fees(conn, partner_id).await?;
    calculate_transfer_fee(&fees, start_date, end_date, counts)
}

#[derive(Clone)]
pub struct PricingService {
    pool: DatabaseConnection,
}

impl PricingService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn calculate_fee(&self, request: &CalculateFeeRequest) -> AppResult<FeeQuoteResponse> {
        quote_transfer_fee(
            &self.pool,
            request.partner_id,
            request.start_date,
            request.end_date,
            &request.scooters,
        )
        .await
    }
}
