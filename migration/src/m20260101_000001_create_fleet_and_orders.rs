use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
    Name,
    Address,
    Phone,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ScooterModels {
    Table,
    Id,
    Name,
    Type,
    ImageUrl,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Scooters {
    Table,
    Id,
    StoreId,
    PlateNumber,
    Model,
    Type,
    Color,
    Status,
    Remark,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Partners {
    Table,
    Id,
    Name,
    ContactPerson,
    Phone,
    Email,
    Address,
    Remark,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PartnerTransferFees {
    Table,
    Id,
    PartnerId,
    ScooterModelId,
    SameDayFee,
    OvernightFee,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderNumber,
    PartnerId,
    Tenant,
    AppointmentDate,
    StartTime,
    EndTime,
    ExpectedReturnTime,
    Phone,
    ShippingCompany,
    ShipArrivalTime,
    ShipReturnTime,
    PaymentMethod,
    PaymentAmount,
    Status,
    Remark,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrderScooters {
    Table,
    OrderId,
    ScooterId,
}

fn timestamps(table: &mut TableCreateStatement, created: impl IntoIden, updated: impl IntoIden) {
    table
        .col(
            ColumnDef::new(created)
                .timestamp_with_time_zone()
                .default(Expr::current_timestamp())
                .null(),
        )
        .col(
            ColumnDef::new(updated)
                .timestamp_with_time_zone()
                .default(Expr::current_timestamp())
                .null(),
        );
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 门市
        let mut stores = Table::create();
        stores
            .table(Stores::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Stores::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Stores::Name).string_len(100).not_null())
            .col(ColumnDef::new(Stores::Address).string_len(255).null())
            .col(ColumnDef::new(Stores::Phone).string_len(50).null());
        timestamps(&mut stores, Stores::CreatedAt, Stores::UpdatedAt);
        manager.create_table(stores.to_owned()).await?;

        // 机车型号
        let mut models = Table::create();
        models
            .table(ScooterModels::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(ScooterModels::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(ScooterModels::Name)
                    .string_len(100)
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(ScooterModels::Type).string_len(20).not_null())
            .col(ColumnDef::new(ScooterModels::ImageUrl).string_len(255).null())
            .col(
                ColumnDef::new(ScooterModels::IsActive)
                    .boolean()
                    .not_null()
                    .default(true),
            );
        timestamps(&mut models, ScooterModels::CreatedAt, ScooterModels::UpdatedAt);
        manager.create_table(models.to_owned()).await?;

        // 机车
        let mut scooters = Table::create();
        scooters
            .table(Scooters::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Scooters::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Scooters::StoreId).integer().not_null())
            .col(
                ColumnDef::new(Scooters::PlateNumber)
                    .string_len(20)
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Scooters::Model).string_len(100).not_null())
            .col(ColumnDef::new(Scooters::Type).string_len(20).not_null())
            .col(ColumnDef::new(Scooters::Color).string_len(30).null())
            .col(
                ColumnDef::new(Scooters::Status)
                    .string_len(20)
                    .not_null()
                    .default("待出租"),
            )
            .col(ColumnDef::new(Scooters::Remark).text().null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_scooters_store")
                    .from(Scooters::Table, Scooters::StoreId)
                    .to(Stores::Table, Stores::Id)
                    .on_delete(ForeignKeyAction::Restrict),
            );
        timestamps(&mut scooters, Scooters::CreatedAt, Scooters::UpdatedAt);
        manager.create_table(scooters.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scooters_status")
                    .table(Scooters::Table)
                    .col(Scooters::Status)
                    .to_owned(),
            )
            .await?;

        // 合作商
        let mut partners = Table::create();
        partners
            .table(Partners::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Partners::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Partners::Name).string_len(100).not_null())
            .col(ColumnDef::new(Partners::ContactPerson).string_len(100).null())
            .col(ColumnDef::new(Partners::Phone).string_len(50).null())
            .col(ColumnDef::new(Partners::Email).string_len(255).null())
            .col(ColumnDef::new(Partners::Address).string_len(255).null())
            .col(ColumnDef::new(Partners::Remark).text().null());
        timestamps(&mut partners, Partners::CreatedAt, Partners::UpdatedAt);
        manager.create_table(partners.to_owned()).await?;

        // 调车费
        let mut fees = Table::create();
        fees.table(PartnerTransferFees::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(PartnerTransferFees::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(PartnerTransferFees::PartnerId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(PartnerTransferFees::ScooterModelId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(PartnerTransferFees::SameDayFee)
                    .big_integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(PartnerTransferFees::OvernightFee)
                    .big_integer()
                    .not_null()
                    .default(0),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_transfer_fees_partner")
                    .from(PartnerTransferFees::Table, PartnerTransferFees::PartnerId)
                    .to(Partners::Table, Partners::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_transfer_fees_scooter_model")
                    .from(
                        PartnerTransferFees::Table,
                        PartnerTransferFees::ScooterModelId,
                    )
                    .to(ScooterModels::Table, ScooterModels::Id)
                    .on_delete(ForeignKeyAction::Restrict),
            );
        timestamps(
            &mut fees,
            PartnerTransferFees::CreatedAt,
            PartnerTransferFees::UpdatedAt,
        );
        manager.create_table(fees.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transfer_fees_partner_model")
                    .table(PartnerTransferFees::Table)
                    .col(PartnerTransferFees::PartnerId)
                    .col(PartnerTransferFees::ScooterModelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 订单
        let mut orders = Table::create();
        orders
            .table(Orders::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Orders::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(Orders::OrderNumber)
                    .string_len(20)
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Orders::PartnerId).integer().null())
            .col(ColumnDef::new(Orders::Tenant).string_len(100).null())
            .col(ColumnDef::new(Orders::AppointmentDate).date().not_null())
            .col(ColumnDef::new(Orders::StartTime).date_time().not_null())
            .col(ColumnDef::new(Orders::EndTime).date_time().not_null())
            .col(ColumnDef::new(Orders::ExpectedReturnTime).date_time().null())
            .col(ColumnDef::new(Orders::Phone).string_len(50).null())
            .col(ColumnDef::new(Orders::ShippingCompany).string_len(100).null())
            .col(ColumnDef::new(Orders::ShipArrivalTime).date_time().null())
            .col(ColumnDef::new(Orders::ShipReturnTime).date_time().null())
            .col(ColumnDef::new(Orders::PaymentMethod).string_len(50).null())
            .col(
                ColumnDef::new(Orders::PaymentAmount)
                    .big_integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(Orders::Status)
                    .string_len(20)
                    .not_null()
                    .default("已預訂"),
            )
            .col(ColumnDef::new(Orders::Remark).text().null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_orders_partner")
                    .from(Orders::Table, Orders::PartnerId)
                    .to(Partners::Table, Partners::Id)
                    .on_delete(ForeignKeyAction::Restrict),
            );
        timestamps(&mut orders, Orders::CreatedAt, Orders::UpdatedAt);
        manager.create_table(orders.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_appointment_date")
                    .table(Orders::Table)
                    .col(Orders::AppointmentDate)
                    .to_owned(),
            )
            .await?;

        // 订单-机车关联
        manager
            .create_table(
                Table::create()
                    .table(OrderScooters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderScooters::OrderId).integer().not_null())
                    .col(
                        ColumnDef::new(OrderScooters::ScooterId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrderScooters::OrderId)
                            .col(OrderScooters::ScooterId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_scooters_order")
                            .from(OrderScooters::Table, OrderScooters::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_scooters_scooter")
                            .from(OrderScooters::Table, OrderScooters::ScooterId)
                            .to(Scooters::Table, Scooters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(OrderScooters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(PartnerTransferFees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Partners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Scooters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(ScooterModels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Stores::Table).to_owned())
            .await?;
        Ok(())
    }
}
