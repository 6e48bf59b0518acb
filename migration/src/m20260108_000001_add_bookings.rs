use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    Name,
    Phone,
    Email,
    LineId,
    StartDate,
    EndDate,
    ArrivalTime,
    ReturnTime,
    ShippingCompany,
    RequestedScooters,
    Remark,
    Status,
    OrderId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Bookings::Phone).string_len(50).not_null())
                    .col(ColumnDef::new(Bookings::Email).string_len(255).null())
                    .col(ColumnDef::new(Bookings::LineId).string_len(100).null())
                    .col(ColumnDef::new(Bookings::StartDate).date().not_null())
                    .col(ColumnDef::new(Bookings::EndDate).date().not_null())
                    .col(ColumnDef::new(Bookings::ArrivalTime).time().null())
                    .col(ColumnDef::new(Bookings::ReturnTime).time().null())
                    .col(
                        ColumnDef::new(Bookings::ShippingCompany)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(Bookings::RequestedScooters).json().not_null())
                    .col(ColumnDef::new(Bookings::Remark).text().null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string_len(20)
                            .not_null()
                            .default("預約中"),
                    )
                    .col(ColumnDef::new(Bookings::OrderId).integer().null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_order")
                            .from(Bookings::Table, Bookings::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Bookings::Table).to_owned())
            .await?;
        Ok(())
    }
}
