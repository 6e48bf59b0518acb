use crate::entities::{
    OrderStatus, ScooterStatus, booking_entity as bookings, order_entity as orders,
    order_scooter_entity as order_scooters, partner_entity as partners,
    scooter_entity as scooters,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::pricing_service::ensure_partner_exists;
use crate::utils::{is_valid_manual_order_number, next_order_number, order_number_prefix};
use chrono::{Local, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use validator::Validate;

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 订单列表（分页）
    pub async fn list_orders(
        &self,
        query: &OrderQuery,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut cond = Condition::all();
        if let Some(status) = query.status {
            cond = cond.add(orders::Column::Status.eq(status));
        }
        if let Some(partner_id) = query.partner_id {
            cond = cond.add(orders::Column::PartnerId.eq(partner_id));
        }
        if let Some(keyword) = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            cond = cond.add(
                Condition::any()
                    .add(orders::Column::OrderNumber.contains(keyword))
                    .add(orders::Column::Tenant.contains(keyword))
                    .add(orders::Column::Phone.contains(keyword)),
            );
        }
        if let Some(start_date) = query.start_date {
            cond = cond.add(orders::Column::AppointmentDate.gte(start_date));
        }
        if let Some(end_date) = query.end_date {
            cond = cond.add(orders::Column::AppointmentDate.lte(end_date));
        }

        let total = orders::Entity::find()
            .filter(cond.clone())
            .count(&self.pool)
            .await?;

        let rows = orders::Entity::find()
            .filter(cond)
            .find_also_related(partners::Entity)
            .order_by_desc(orders::Column::AppointmentDate)
            .order_by_desc(orders::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let order_ids: Vec<i32> = rows.iter().map(|(o, _)| o.id).collect();
        let mut scooters_by_order = load_scooters_for_orders(&self.pool, &order_ids).await?;

        let items = rows
            .into_iter()
            .map(|(order, partner)| {
                let attached = scooters_by_order.remove(&order.id).unwrap_or_default();
                to_response(order, partner, attached)
            })
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    pub async fn get_order(&self, id: i32) -> AppResult<OrderResponse> {
        find_order_response(&self.pool, id).await
    }

    /// 建立订单
    ///
    /// 1. 所选机车必须存在且皆为 待出租，否则整笔拒绝
    /// 2. 未指定订单号时按月流水产生
    /// 3. 写入订单与关联后，依订单状态同步机车状态
    pub async fn create_order(&self, request: CreateOrderRequest) -> AppResult<OrderResponse> {
        request.validate()?;
        ensure_time_range(&request.start_time, &request.end_time)?;
        let scooter_ids = dedup_ids(&request.scooter_ids);

        let txn = self.pool.begin().await?;

        if let Some(partner_id) = request.partner_id {
            ensure_partner_exists(&txn, partner_id).await?;
        }

        let selected = find_scooters(&txn, &scooter_ids).await?;
        ensure_available(&selected)?;

        let order_number = match request
            .order_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            Some(number) => {
                if !is_valid_manual_order_number(number) {
                    return Err(AppError::field(
                        "order_number",
                        "訂單編號格式錯誤，ORD-年月- 之後須為五位數字",
                    ));
                }
                let exists = orders::Entity::find()
                    .filter(orders::Column::OrderNumber.eq(number))
                    .count(&txn)
                    .await?
                    > 0;
                if exists {
                    return Err(AppError::field("order_number", "訂單編號已存在"));
                }
                number.to_string()
            }
            None => generate_order_number(&txn).await?,
        };

        let now = Utc::now();
        let order = orders::ActiveModel {
            order_number: Set(order_number),
            partner_id: Set(request.partner_id),
            tenant: Set(request.tenant),
            appointment_date: Set(request.appointment_date),
            start_time: Set(request.start_time),
            end_time: Set(request.end_time),
            expected_return_time: Set(request.expected_return_time),
            phone: Set(request.phone),
            shipping_company: Set(request.shipping_company),
            ship_arrival_time: Set(request.ship_arrival_time),
            ship_return_time: Set(request.ship_return_time),
            payment_method: Set(request.payment_method),
            payment_amount: Set(request.payment_amount),
            status: Set(request.status),
            remark: Set(request.remark),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        attach_scooters(&txn, order.id, &scooter_ids).await?;
        sync_scooter_statuses(&txn, &scooter_ids, order.status).await?;

        txn.commit().await?;

        log::info!(
            "Order {} created with {} scooter(s), status {}",
            order.order_number,
            scooter_ids.len(),
            order.status
        );

        self.get_order(order.id).await
    }

    /// 更新订单
    ///
    /// scooter_ids 给出时视为完整清单: 新增的机车需为 待出租，移除的机车恢复 待出租。
    /// 最后以 (可能已更新的) 订单状态同步当前所有关联机车。
    pub async fn update_order(
        &self,
        id: i32,
        request: UpdateOrderRequest,
    ) -> AppResult<OrderResponse> {
        request.validate()?;
        let new_scooter_ids = request.scooter_ids.as_deref().map(dedup_ids);

        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("訂單不存在".to_string()))?;

        ensure_time_range(
            request.start_time.as_ref().unwrap_or(&order.start_time),
            request.end_time.as_ref().unwrap_or(&order.end_time),
        )?;
        if let Some(Some(partner_id)) = request.partner_id {
            ensure_partner_exists(&txn, partner_id).await?;
        }

        let old_ids = attached_scooter_ids(&txn, id).await?;

        let mut am = order.into_active_model();
        if let Some(partner_id) = request.partner_id {
            am.partner_id = Set(partner_id);
        }
        if let Some(v) = request.tenant {
            am.tenant = Set(Some(v));
        }
        if let Some(v) = request.appointment_date {
            am.appointment_date = Set(v);
        }
        if let Some(v) = request.start_time {
            am.start_time = Set(v);
        }
        if let Some(v) = request.end_time {
            am.end_time = Set(v);
        }
        if let Some(v) = request.expected_return_time {
            am.expected_return_time = Set(Some(v));
        }
        if let Some(v) = request.phone {
            am.phone = Set(Some(v));
        }
        if let Some(v) = request.shipping_company {
            am.shipping_company = Set(Some(v));
        }
        if let Some(v) = request.ship_arrival_time {
            am.ship_arrival_time = Set(Some(v));
        }
        if let Some(v) = request.ship_return_time {
            am.ship_return_time = Set(Some(v));
        }
        if let Some(v) = request.payment_method {
            am.payment_method = Set(Some(v));
        }
        if let Some(v) = request.payment_amount {
            am.payment_amount = Set(v);
        }
        if let Some(v) = request.status {
            am.status = Set(v);
        }
        if let Some(v) = request.remark {
            am.remark = Set(Some(v));
        }
        am.updated_at = Set(Some(Utc::now()));
        let order = am.update(&txn).await?;

        let current_ids = match new_scooter_ids {
            Some(new_ids) => {
                let added: Vec<i32> = new_ids
                    .iter()
                    .copied()
                    .filter(|sid| !old_ids.contains(sid))
                    .collect();
                let removed: Vec<i32> = old_ids
                    .iter()
                    .copied()
                    .filter(|sid| !new_ids.contains(sid))
                    .collect();

                let added_scooters = find_scooters(&txn, &added).await?;
                ensure_available(&added_scooters)?;

                order_scooters::Entity::delete_many()
                    .filter(order_scooters::Column::OrderId.eq(id))
                    .exec(&txn)
                    .await?;
                attach_scooters(&txn, id, &new_ids).await?;
                set_scooter_status(&txn, &removed, ScooterStatus::Available).await?;
                new_ids
            }
            None => old_ids,
        };
        sync_scooter_statuses(&txn, &current_ids, order.status).await?;

        txn.commit().await?;

        log::info!("Order {} updated, status {}", order.order_number, order.status);

        self.get_order(id).await
    }

    /// 仅更新状态，关联机车不变
    pub async fn update_status(&self, id: i32, status: OrderStatus) -> AppResult<OrderResponse> {
        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("訂單不存在".to_string()))?;
        let previous = order.status;

        let mut am = order.into_active_model();
        am.status = Set(status);
        am.updated_at = Set(Some(Utc::now()));
        let order = am.update(&txn).await?;

        let ids = attached_scooter_ids(&txn, id).await?;
        sync_scooter_statuses(&txn, &ids, status).await?;

        txn.commit().await?;

        log::info!(
            "Order {} status changed {} -> {}",
            order.order_number,
            previous,
            status
        );

        self.get_order(id).await
    }

    /// 删除订单，关联机车一律恢复 待出租
    pub async fn delete_order(&self, id: i32) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("訂單不存在".to_string()))?;

        let ids = attached_scooter_ids(&txn, id).await?;
        set_scooter_status(&txn, &ids, ScooterStatus::Available).await?;

        order_scooters::Entity::delete_many()
            .filter(order_scooters::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        bookings::Entity::update_many()
            .col_expr(bookings::Column::OrderId, Expr::value(Option::<i32>::None))
            .filter(bookings::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        orders::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Order {} deleted, {} scooter(s) released",
            order.order_number,
            ids.len()
        );
        Ok(())
    }
}

// -----------------------------
// 订单与机车的共用操作 (亦供预约转订单使用)
// -----------------------------

/// 依订单状态同步机车状态
pub(crate) async fn sync_scooter_statuses<C: ConnectionTrait>(
    conn: &C,
    scooter_ids: &[i32],
    status: OrderStatus,
) -> AppResult<()> {
    set_scooter_status(conn, scooter_ids, status.scooter_status()).await
}

pub(crate) async fn set_scooter_status<C: ConnectionTrait>(
    conn: &C,
    scooter_ids: &[i32],
    status: ScooterStatus,
) -> AppResult<()> {
    if scooter_ids.is_empty() {
        return Ok(());
    }
    scooters::Entity::update_many()
        .col_expr(scooters::Column::Status, Expr::value(status))
        .col_expr(scooters::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(scooters::Column::Id.is_in(scooter_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(())
}

pub(crate) async fn attach_scooters<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
    scooter_ids: &[i32],
) -> AppResult<()> {
    if scooter_ids.is_empty() {
        return Ok(());
    }
    let rows = scooter_ids
        .iter()
        .map(|&scooter_id| order_scooters::ActiveModel {
            order_id: Set(order_id),
            scooter_id: Set(scooter_id),
        });
    order_scooters::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub(crate) async fn attached_scooter_ids<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
) -> AppResult<Vec<i32>> {
    let rows = order_scooters::Entity::find()
        .filter(order_scooters::Column::OrderId.eq(order_id))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|r| r.scooter_id).collect())
}

/// 取该月最大数字流水号 +1；并发建立时可能撞号，由 order_number 唯一约束挡下
pub(crate) async fn generate_order_number<C: ConnectionTrait>(conn: &C) -> AppResult<String> {
    let prefix = order_number_prefix(Local::now().date_naive());
    let existing: Vec<String> = orders::Entity::find()
        .select_only()
        .column(orders::Column::OrderNumber)
        .filter(orders::Column::OrderNumber.like(format!("{prefix}%")))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(next_order_number(&prefix, existing.iter().map(String::as_str)))
}

/// 依 id 取机车；任一 id 不存在即失败
pub(crate) async fn find_scooters<C: ConnectionTrait>(
    conn: &C,
    scooter_ids: &[i32],
) -> AppResult<Vec<scooters::Model>> {
    if scooter_ids.is_empty() {
        return Ok(Vec::new());
    }
    let found = scooters::Entity::find()
        .filter(scooters::Column::Id.is_in(scooter_ids.iter().copied()))
        .all(conn)
        .await?;

    let found_ids: HashSet<i32> = found.iter().map(|s| s.id).collect();
    let missing: Vec<String> = scooter_ids
        .iter()
        .filter(|id| !found_ids.contains(id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::field(
            "scooter_ids",
            format!("機車不存在: {}", missing.join(", ")),
        ));
    }
    Ok(found)
}

pub(crate) fn ensure_available(selected: &[scooters::Model]) -> AppResult<()> {
    let unavailable: Vec<&str> = selected
        .iter()
        .filter(|s| s.status != ScooterStatus::Available)
        .map(|s| s.plate_number.as_str())
        .collect();
    if unavailable.is_empty() {
        Ok(())
    } else {
        Err(AppError::Unprocessable(format!(
            "以下機車目前無法出租: {}",
            unavailable.join(", ")
        )))
    }
}

/// 去重并保留原顺序
pub(crate) fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn ensure_time_range(
    start: &chrono::NaiveDateTime,
    end: &chrono::NaiveDateTime,
) -> AppResult<()> {
    if end < start {
        return Err(AppError::field("end_time", "結束時間不可早於開始時間"));
    }
    Ok(())
}

async fn load_scooters_for_orders<C: ConnectionTrait>(
    conn: &C,
    order_ids: &[i32],
) -> AppResult<HashMap<i32, Vec<scooters::Model>>> {
    let mut map: HashMap<i32, Vec<scooters::Model>> = HashMap::new();
    if order_ids.is_empty() {
        return Ok(map);
    }
    let rows = order_scooters::Entity::find()
        .filter(order_scooters::Column::OrderId.is_in(order_ids.iter().copied()))
        .find_also_related(scooters::Entity)
        .all(conn)
        .await?;
    for (link, scooter) in rows {
        if let Some(scooter) = scooter {
            map.entry(link.order_id).or_default().push(scooter);
        }
    }
    for list in map.values_mut() {
        list.sort_by(|a, b| a.plate_number.cmp(&b.plate_number));
    }
    Ok(map)
}

pub(crate) async fn find_order_response<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> AppResult<OrderResponse> {
    let (order, partner) = orders::Entity::find_by_id(id)
        .find_also_related(partners::Entity)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("訂單不存在".to_string()))?;
    let attached = load_scooters_for_orders(conn, &[id])
        .await?
        .remove(&id)
        .unwrap_or_default();
    Ok(to_response(order, partner, attached))
}

fn to_response(
    order: orders::Model,
    partner: Option<partners::Model>,
    attached: Vec<scooters::Model>,
) -> OrderResponse {
    let partner = partner.map(|p| OrderPartnerSummary {
        id: p.id,
        name: p.name,
    });
    OrderResponse::new(order, partner, attached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn order_request(scooter_ids: Vec<i32>, status: OrderStatus) -> CreateOrderRequest {
        CreateOrderRequest {
            order_number: None,
            partner_id: None,
            tenant: Some("王小明".into()),
            appointment_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            start_time: at(1, 8),
            end_time: at(2, 18),
            expected_return_time: None,
            phone: Some("0912345678".into()),
            shipping_company: None,
            ship_arrival_time: None,
            ship_return_time: None,
            payment_method: Some("現金".into()),
            payment_amount: 1200,
            status,
            remark: None,
            scooter_ids,
        }
    }

    struct Fleet {
        db: DatabaseConnection,
        a: i32,
        b: i32,
        c: i32,
    }

    async fn fleet() -> Fleet {
        let db = setup_db().await;
        let store = create_store(&db, "花蓮站前店").await;
        let a = create_scooter(&db, store.id, "AAA-001", "Many 110", ScooterStatus::Available).await;
        let b = create_scooter(&db, store.id, "BBB-002", "Many 110", ScooterStatus::Available).await;
        let c = create_scooter(&db, store.id, "CCC-003", "Jet", ScooterStatus::Available).await;
        Fleet {
            db,
            a: a.id,
            b: b.id,
            c: c.id,
        }
    }

    #[tokio::test]
    async fn test_create_in_progress_rents_scooters() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());

        let order = service
            .create_order(order_request(vec![f.a, f.b], OrderStatus::InProgress))
            .await
            .unwrap();

        assert_eq!(order.scooters.len(), 2);
        assert_eq!(scooter_status(&f.db, f.a).await, ScooterStatus::Rented);
        assert_eq!(scooter_status(&f.db, f.b).await, ScooterStatus::Rented);
        assert_eq!(scooter_status(&f.db, f.c).await, ScooterStatus::Available);
    }

    #[tokio::test]
    async fn test_create_booked_keeps_scooters_available() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());

        service
            .create_order(order_request(vec![f.a], OrderStatus::Booked))
            .await
            .unwrap();

        assert_eq!(scooter_status(&f.db, f.a).await, ScooterStatus::Available);
    }

    #[tokio::test]
    async fn test_create_rejects_unavailable_scooter() {
        let f = fleet().await;
        let store = create_store(&f.db, "七星潭店").await;
        let busy =
            create_scooter(&f.db, store.id, "MNT-999", "Jet", ScooterStatus::Maintenance).await;
        let service = OrderService::new(f.db.clone());

        let err = service
            .create_order(order_request(vec![f.a, busy.id], OrderStatus::InProgress))
            .await
            .unwrap_err();

        match err {
            AppError::Unprocessable(msg) => assert!(msg.contains("MNT-999")),
            other => panic!("unexpected error: {other:?}"),
        }
        // 整笔回滚
        assert_eq!(orders::Entity::find().count(&f.db).await.unwrap(), 0);
        assert_eq!(scooter_status(&f.db, f.a).await, ScooterStatus::Available);
        assert_eq!(scooter_status(&f.db, busy.id).await, ScooterStatus::Maintenance);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_scooter() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());

        let err = service
            .create_order(order_request(vec![f.a, 404], OrderStatus::Booked))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FieldErrors(_)));
    }

    #[tokio::test]
    async fn test_order_numbers_are_sequential() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        let prefix = order_number_prefix(Local::now().date_naive());

        let first = service
            .create_order(order_request(vec![f.a], OrderStatus::Booked))
            .await
            .unwrap();
        let second = service
            .create_order(order_request(vec![f.b], OrderStatus::Booked))
            .await
            .unwrap();

        assert_eq!(first.order_number, format!("{prefix}00001"));
        assert_eq!(second.order_number, format!("{prefix}00002"));
    }

    #[tokio::test]
    async fn test_non_numeric_order_number_does_not_break_sequence() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        let prefix = order_number_prefix(Local::now().date_naive());

        let mut manual = order_request(vec![f.a], OrderStatus::Booked);
        manual.order_number = Some(format!("{prefix}a"));
        let err = service.create_order(manual).await.unwrap_err();
        match err {
            AppError::FieldErrors(fields) => assert!(fields.contains_key("order_number")),
            other => panic!("unexpected error: {other:?}"),
        }

        let first = service
            .create_order(order_request(vec![f.a], OrderStatus::Booked))
            .await
            .unwrap();
        let second = service
            .create_order(order_request(vec![f.b], OrderStatus::Booked))
            .await
            .unwrap();
        // 旧资料里可能已有非数字流水号
        orders::Entity::update_many()
            .col_expr(orders::Column::OrderNumber, Expr::value(format!("{prefix}a")))
            .filter(orders::Column::Id.eq(second.id))
            .exec(&f.db)
            .await
            .unwrap();

        let third = service
            .create_order(order_request(vec![f.c], OrderStatus::Booked))
            .await
            .unwrap();
        assert_eq!(first.order_number, format!("{prefix}00001"));
        assert_eq!(third.order_number, format!("{prefix}00002"));
    }

    #[tokio::test]
    async fn test_update_replaces_scooters_and_releases_removed() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        let order = service
            .create_order(order_request(vec![f.a, f.b], OrderStatus::InProgress))
            .await
            .unwrap();

        let updated = service
            .update_order(
                order.id,
                UpdateOrderRequest {
                    scooter_ids: Some(vec![f.b, f.c]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let plates: Vec<&str> = updated
            .scooters
            .iter()
            .map(|s| s.plate_number.as_str())
            .collect();
        assert_eq!(plates, vec!["BBB-002", "CCC-003"]);
        assert_eq!(scooter_status(&f.db, f.a).await, ScooterStatus::Available);
        assert_eq!(scooter_status(&f.db, f.b).await, ScooterStatus::Rented);
        assert_eq!(scooter_status(&f.db, f.c).await, ScooterStatus::Rented);
    }

    #[tokio::test]
    async fn test_update_rejects_added_rented_scooter() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        service
            .create_order(order_request(vec![f.c], OrderStatus::AtPartner))
            .await
            .unwrap();
        let order = service
            .create_order(order_request(vec![f.a], OrderStatus::Booked))
            .await
            .unwrap();

        let err = service
            .update_order(
                order.id,
                UpdateOrderRequest {
                    scooter_ids: Some(vec![f.a, f.c]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unprocessable(_)));
    }

    #[tokio::test]
    async fn test_update_status_without_scooter_ids_syncs() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        let order = service
            .create_order(order_request(vec![f.a], OrderStatus::Booked))
            .await
            .unwrap();

        service
            .update_order(
                order.id,
                UpdateOrderRequest {
                    status: Some(OrderStatus::AtPartner),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(scooter_status(&f.db, f.a).await, ScooterStatus::Rented);
    }

    #[tokio::test]
    async fn test_update_missing_order() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        let err = service
            .update_order(77, UpdateOrderRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_status_patch_follows_rule() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        let order = service
            .create_order(order_request(vec![f.a, f.b], OrderStatus::InProgress))
            .await
            .unwrap();

        let patched = service
            .update_status(order.id, OrderStatus::AwaitingPickup)
            .await
            .unwrap();
        assert_eq!(patched.status, OrderStatus::AwaitingPickup);
        assert_eq!(scooter_status(&f.db, f.a).await, ScooterStatus::Available);

        service
            .update_status(order.id, OrderStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(scooter_status(&f.db, f.b).await, ScooterStatus::Rented);

        service
            .update_status(order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(scooter_status(&f.db, f.b).await, ScooterStatus::Available);
    }

    #[tokio::test]
    async fn test_delete_releases_scooters() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        let order = service
            .create_order(order_request(vec![f.a, f.c], OrderStatus::InProgress))
            .await
            .unwrap();

        service.delete_order(order.id).await.unwrap();

        assert_eq!(scooter_status(&f.db, f.a).await, ScooterStatus::Available);
        assert_eq!(scooter_status(&f.db, f.c).await, ScooterStatus::Available);
        assert_eq!(order_scooters::Entity::find().count(&f.db).await.unwrap(), 0);
        assert!(matches!(
            service.get_order(order.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_keyword() {
        let f = fleet().await;
        let service = OrderService::new(f.db.clone());
        service
            .create_order(order_request(vec![f.a], OrderStatus::Booked))
            .await
            .unwrap();
        let mut other = order_request(vec![f.b], OrderStatus::InProgress);
        other.tenant = Some("陳大華".into());
        service.create_order(other).await.unwrap();

        let query = OrderQuery {
            page: None,
            per_page: None,
            status: Some(OrderStatus::InProgress),
            partner_id: None,
            keyword: None,
            start_date: None,
            end_date: None,
        };
        let page = service.list_orders(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].scooters[0].plate_number, "BBB-002");

        let query = OrderQuery {
            status: None,
            keyword: Some("王小明".into()),
            ..query
        };
        let page = service.list_orders(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].tenant.as_deref(), Some("王小明"));
    }
}
