//! 服务层测试共用的内存 SQLite 与假资料

use crate::entities::{
    ScooterStatus, ScooterType, admin_users, bookings, contact_messages, order_scooters, orders,
    partner_transfer_fees, partners, scooter_models, scooters, stores,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    EntityTrait, Schema, Set,
};

/// 单连接，保证同一个 :memory: 数据库在整个测试中可见
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    let stmts = vec![
        schema.create_table_from_entity(stores::Entity),
        schema.create_table_from_entity(scooter_models::Entity),
        schema.create_table_from_entity(scooters::Entity),
        schema.create_table_from_entity(partners::Entity),
        schema.create_table_from_entity(partner_transfer_fees::Entity),
        schema.create_table_from_entity(orders::Entity),
        schema.create_table_from_entity(order_scooters::Entity),
        schema.create_table_from_entity(bookings::Entity),
        schema.create_table_from_entity(contact_messages::Entity),
        schema.create_table_from_entity(admin_users::Entity),
    ];
    for stmt in stmts {
        db.execute(db.get_database_backend().build(&stmt))
            .await
            .unwrap();
    }
    db
}

pub async fn create_store(db: &DatabaseConnection, name: &str) -> stores::Model {
    stores::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_scooter_model(db: &DatabaseConnection, name: &str) -> scooter_models::Model {
    scooter_models::ActiveModel {
        name: Set(name.to_string()),
        scooter_type: Set(ScooterType::WhitePlate),
        is_active: Set(true),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_scooter(
    db: &DatabaseConnection,
    store_id: i32,
    plate: &str,
    model: &str,
    status: ScooterStatus,
) -> scooters::Model {
    scooters::ActiveModel {
        store_id: Set(store_id),
        plate_number: Set(plate.to_string()),
        model: Set(model.to_string()),
        scooter_type: Set(ScooterType::WhitePlate),
        status: Set(status),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_partner(db: &DatabaseConnection, name: &str) -> partners::Model {
    partners::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_transfer_fee(
    db: &DatabaseConnection,
    partner_id: i32,
    scooter_model_id: i32,
    same_day_fee: i64,
    overnight_fee: i64,
) -> partner_transfer_fees::Model {
    partner_transfer_fees::ActiveModel {
        partner_id: Set(partner_id),
        scooter_model_id: Set(scooter_model_id),
        same_day_fee: Set(same_day_fee),
        overnight_fee: Set(overnight_fee),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn scooter_status(db: &DatabaseConnection, id: i32) -> ScooterStatus {
    scooters::Entity::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .status
}
