use crate::entities::{BookingStatus, OrderStatus, booking_entity as bookings, order_entity as orders};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::order_service::{
    attach_scooters, dedup_ids, find_order_response, find_scooters, generate_order_number,
    sync_scooter_statuses,
};
use crate::services::pricing_service::{ensure_partner_exists, quote_transfer_fee};
use crate::utils::normalize_tw_phone;
use chrono::{NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use validator::Validate;

// 预约未填时间时的取车 / 还车时间
static DEFAULT_ARRIVAL_TIME: LazyLock<NaiveTime> =
    LazyLock::new(|| NaiveTime::from_hms_opt(8, 0, 0).expect("valid arrival time"));
static DEFAULT_RETURN_TIME: LazyLock<NaiveTime> =
    LazyLock::new(|| NaiveTime::from_hms_opt(18, 0, 0).expect("valid return time"));

#[derive(Clone)]
pub struct BookingService {
    pool: DatabaseConnection,
}

impl BookingService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 前台预约 (验证码已于处理器中校验)
    pub async fn create_booking(&self, request: CreateBookingRequest) -> AppResult<BookingResponse> {
        request.validate()?;
        if request.end_date < request.start_date {
            return Err(AppError::field("end_date", "結束日期不可早於開始日期"));
        }
        if request.requested_scooters.iter().any(|r| r.count <= 0 || r.model.trim().is_empty()) {
            return Err(AppError::field("requested_scooters", "車型與數量不正確"));
        }

        let now = Utc::now();
        let booking = bookings::ActiveModel {
            name: Set(request.name.trim().to_string()),
            phone: Set(normalize_tw_phone(&request.phone)),
            email: Set(request.email),
            line_id: Set(request.line_id),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            arrival_time: Set(request.arrival_time),
            return_time: Set(request.return_time),
            shipping_company: Set(request.shipping_company),
            requested_scooters: Set(serde_json::to_value(&request.requested_scooters)?),
            remark: Set(request.remark),
            status: Set(BookingStatus::Pending),
            order_id: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Booking {} received from {}", booking.id, booking.phone);
        Ok(booking.into())
    }

    pub async fn list_bookings(
        &self,
        query: &BookingQuery,
    ) -> AppResult<PaginatedResponse<BookingResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut cond = Condition::all();
        if let Some(status) = query.status {
            cond = cond.add(bookings::Column::Status.eq(status));
        }
        if let Some(keyword) = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            cond = cond.add(
                Condition::any()
                    .add(bookings::Column::Name.contains(keyword))
                    .add(bookings::Column::Phone.contains(keyword)),
            );
        }

        let base = bookings::Entity::find().filter(cond);
        let total = base.clone().count(&self.pool).await?;
        let rows = base
            .order_by_desc(bookings::Column::CreatedAt)
            .order_by_desc(bookings::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let items = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, &params, total))
    }

    pub async fn get_booking(&self, id: i32) -> AppResult<BookingResponse> {
        Ok(self.find(id).await?.into())
    }

    /// 人工变更状态；已轉訂單 只能经由转订单流程进入，也不可再改回
    pub async fn update_status(&self, id: i32, status: BookingStatus) -> AppResult<BookingResponse> {
        let booking = self.find(id).await?;
        if status == BookingStatus::Converted {
            return Err(AppError::Unprocessable(
                "請使用轉訂單功能將預約轉為訂單".to_string(),
            ));
        }
        if booking.status == BookingStatus::Converted {
            return Err(AppError::Unprocessable(
                "已轉訂單的預約不可變更狀態".to_string(),
            ));
        }

        let mut am = booking.into_active_model();
        am.status = Set(status);
        am.updated_at = Set(Some(Utc::now()));
        let booking = am.update(&self.pool).await?;
        Ok(booking.into())
    }

    pub async fn delete_booking(&self, id: i32) -> AppResult<()> {
        let booking = self.find(id).await?;
        bookings::Entity::delete_by_id(booking.id)
            .exec(&self.pool)
            .await?;
        log::info!("Booking {id} deleted");
        Ok(())
    }

    /// 预约转订单
    ///
    /// - 只接受 預約中 的预约
    /// - 起讫时间 = 预约日期 + 抵达/归还时间 (预设 08:00 / 18:00)
    /// - 订单状态 已預訂，机车同步为 待出租
    /// - 未给金额且指定合作商时，按所选机车的型号与台数计算调车费
    pub async fn convert_to_order(
        &self,
        id: i32,
        request: ConvertBookingRequest,
    ) -> AppResult<ConvertBookingResponse> {
        request.validate()?;
        let scooter_ids = dedup_ids(&request.scooter_ids);

        let txn = self.pool.begin().await?;

        let booking = bookings::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("預約不存在".to_string()))?;
        if booking.status != BookingStatus::Pending {
            return Err(AppError::Unprocessable(
                "只能將「預約中」的預約轉為訂單".to_string(),
            ));
        }

        if let Some(partner_id) = request.partner_id {
            ensure_partner_exists(&txn, partner_id).await?;
        }

        let selected = find_scooters(&txn, &scooter_ids).await?;

        let payment_amount = match (request.payment_amount, request.partner_id) {
            (Some(amount), _) => amount,
            (None, Some(partner_id)) => {
                let mut counts: BTreeMap<String, i64> = BTreeMap::new();
                for scooter in &selected {
                    *counts.entry(scooter.model.clone()).or_default() += 1;
                }
                quote_transfer_fee(&txn, partner_id, booking.start_date, booking.end_date, &counts)
                    .await?
                    .total_amount
            }
            (None, None) => 0,
        };

        let start_time = booking
            .start_date
            .and_time(booking.arrival_time.unwrap_or(*DEFAULT_ARRIVAL_TIME));
        let end_time = booking
            .end_date
            .and_time(booking.return_time.unwrap_or(*DEFAULT_RETURN_TIME));

        let order_number = generate_order_number(&txn).await?;
        let now = Utc::now();
        let order = orders::ActiveModel {
            order_number: Set(order_number),
            partner_id: Set(request.partner_id),
            tenant: Set(Some(booking.name.clone())),
            appointment_date: Set(booking.start_date),
            start_time: Set(start_time),
            end_time: Set(end_time),
            expected_return_time: Set(Some(end_time)),
            phone: Set(Some(booking.phone.clone())),
            shipping_company: Set(booking.shipping_company.clone()),
            ship_arrival_time: Set(booking.arrival_time.map(|t| booking.start_date.and_time(t))),
            ship_return_time: Set(booking.return_time.map(|t| booking.end_date.and_time(t))),
            payment_method: Set(request.payment_method),
            payment_amount: Set(payment_amount),
            status: Set(OrderStatus::Booked),
            remark: Set(booking.remark.clone()),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        attach_scooters(&txn, order.id, &scooter_ids).await?;
        sync_scooter_statuses(&txn, &scooter_ids, order.status).await?;

        let mut am = booking.into_active_model();
        am.status = Set(BookingStatus::Converted);
        am.order_id = Set(Some(order.id));
        am.updated_at = Set(Some(now));
        let booking = am.update(&txn).await?;

        let order_response = find_order_response(&txn, order.id).await?;

        txn.commit().await?;

        log::info!(
            "Booking {} converted to order {} (amount {})",
            booking.id,
            order.order_number,
            payment_amount
        );

        Ok(ConvertBookingResponse {
            booking: booking.into(),
            order: order_response,
        })
    }

    async fn find(&self, id: i32) -> AppResult<bookings::Model> {
        bookings::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("預約不存在".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ScooterStatus;
    use crate::test_support::*;
    use chrono::NaiveDate;

    fn booking_request() -> CreateBookingRequest {
        CreateBookingRequest {
            captcha_id: "id".into(),
            captcha_answer: "ABC234".into(),
            name: "林小姐".into(),
            phone: "0912-345-678".into(),
            email: None,
            line_id: Some("lin0912".into()),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            arrival_time: Some(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
            return_time: None,
            shipping_company: Some("台華輪".into()),
            requested_scooters: vec![RequestedScooter {
                model: "Many 110".into(),
                count: 2,
            }],
            remark: None,
        }
    }

    fn convert_request(scooter_ids: Vec<i32>) -> ConvertBookingRequest {
        ConvertBookingRequest {
            partner_id: None,
            payment_method: Some("現金".into()),
            payment_amount: None,
            scooter_ids,
        }
    }

    #[tokio::test]
    async fn test_create_booking_is_pending() {
        let db = setup_db().await;
        let service = BookingService::new(db);

        let booking = service.create_booking(booking_request()).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.phone, "0912345678");
        assert_eq!(booking.requested_scooters[0].count, 2);
    }

    #[tokio::test]
    async fn test_convert_creates_booked_order_with_default_times() {
        let db = setup_db().await;
        let store = create_store(&db, "花蓮站前店").await;
        let scooter =
            create_scooter(&db, store.id, "AAA-001", "Many 110", ScooterStatus::Available).await;
        let service = BookingService::new(db.clone());
        let booking = service.create_booking(booking_request()).await.unwrap();

        let result = service
            .convert_to_order(booking.id, convert_request(vec![scooter.id]))
            .await
            .unwrap();

        assert_eq!(result.booking.status, BookingStatus::Converted);
        assert_eq!(result.booking.order_id, Some(result.order.id));
        assert_eq!(result.order.status, OrderStatus::Booked);
        assert_eq!(result.order.tenant.as_deref(), Some("林小姐"));
        assert_eq!(result.order.start_time.to_string(), "2026-03-01 09:30:00");
        assert_eq!(result.order.end_time.to_string(), "2026-03-03 18:00:00");
        assert_eq!(result.order.payment_amount, 0);
        assert_eq!(scooter_status(&db, scooter.id).await, ScooterStatus::Available);
    }

    #[tokio::test]
    async fn test_convert_requires_pending() {
        let db = setup_db().await;
        let store = create_store(&db, "花蓮站前店").await;
        let scooter =
            create_scooter(&db, store.id, "AAA-001", "Many 110", ScooterStatus::Available).await;
        let service = BookingService::new(db.clone());
        let booking = service.create_booking(booking_request()).await.unwrap();
        service
            .update_status(booking.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        let err = service
            .convert_to_order(booking.id, convert_request(vec![scooter.id]))
            .await
            .unwrap_err();
        match err {
            AppError::Unprocessable(msg) => assert_eq!(msg, "只能將「預約中」的預約轉為訂單"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(orders::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_convert_prices_from_partner_fees() {
        let db = setup_db().await;
        let store = create_store(&db, "花蓮站前店").await;
        let model = create_scooter_model(&db, "Many 110").await;
        let partner = create_partner(&db, "海景民宿").await;
        create_transfer_fee(&db, partner.id, model.id, 200, 350).await;
        let a = create_scooter(&db, store.id, "AAA-001", "Many 110", ScooterStatus::Available).await;
        let b = create_scooter(&db, store.id, "AAA-002", "Many 110", ScooterStatus::Available).await;
        let service = BookingService::new(db.clone());
        let booking = service.create_booking(booking_request()).await.unwrap();

        let mut request = convert_request(vec![a.id, b.id]);
        request.partner_id = Some(partner.id);
        let result = service.convert_to_order(booking.id, request).await.unwrap();

        // 2 晚 x 2 台 x 350
        assert_eq!(result.order.payment_amount, 1400);
        assert_eq!(result.order.partner.as_ref().map(|p| p.id), Some(partner.id));
    }

    #[tokio::test]
    async fn test_convert_with_partner_missing_fee_prices_zero() {
        let db = setup_db().await;
        let store = create_store(&db, "花蓮站前店").await;
        let priced = create_scooter_model(&db, "Many 110").await;
        create_scooter_model(&db, "Jet SL").await;
        let partner = create_partner(&db, "海景民宿").await;
        // 只有 Many 110 有协议价
        create_transfer_fee(&db, partner.id, priced.id, 200, 350).await;
        let a = create_scooter(&db, store.id, "AAA-001", "Jet SL", ScooterStatus::Available).await;
        let service = BookingService::new(db.clone());
        let booking = service.create_booking(booking_request()).await.unwrap();

        let mut request = convert_request(vec![a.id]);
        request.partner_id = Some(partner.id);
        let result = service.convert_to_order(booking.id, request).await.unwrap();

        assert_eq!(result.order.payment_amount, 0);
        assert_eq!(result.booking.status, BookingStatus::Converted);
    }

    #[tokio::test]
    async fn test_convert_releases_rented_scooter() {
        let db = setup_db().await;
        let store = create_store(&db, "花蓮站前店").await;
        let rented =
            create_scooter(&db, store.id, "AAA-001", "Many 110", ScooterStatus::Rented).await;
        let idle =
            create_scooter(&db, store.id, "AAA-002", "Many 110", ScooterStatus::Available).await;
        let service = BookingService::new(db.clone());
        let booking = service.create_booking(booking_request()).await.unwrap();

        let result = service
            .convert_to_order(booking.id, convert_request(vec![rented.id, idle.id]))
            .await
            .unwrap();

        // 转订单不重新检查可租状态，已預訂 会把机车同步回 待出租
        assert_eq!(result.order.scooters.len(), 2);
        assert_eq!(scooter_status(&db, rented.id).await, ScooterStatus::Available);
        assert_eq!(scooter_status(&db, idle.id).await, ScooterStatus::Available);
    }

    #[tokio::test]
    async fn test_converted_status_cannot_be_set_manually() {
        let db = setup_db().await;
        let service = BookingService::new(db);
        let booking = service.create_booking(booking_request()).await.unwrap();

        let err = service
            .update_status(booking.id, BookingStatus::Converted)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unprocessable(_)));

        let replied = service
            .update_status(booking.id, BookingStatus::Replied)
            .await
            .unwrap();
        assert_eq!(replied.status, BookingStatus::Replied);
    }

    #[tokio::test]
    async fn test_list_filters_by_keyword() {
        let db = setup_db().await;
        let service = BookingService::new(db);
        service.create_booking(booking_request()).await.unwrap();
        let mut other = booking_request();
        other.name = "張先生".into();
        other.phone = "0987654321".into();
        service.create_booking(other).await.unwrap();

        let page = service
            .list_bookings(&BookingQuery {
                page: None,
                per_page: None,
                status: Some(BookingStatus::Pending),
                keyword: Some("0987".into()),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].name, "張先生");
    }
}
