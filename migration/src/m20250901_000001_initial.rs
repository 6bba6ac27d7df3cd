use sea_orm_migration::prelude::*;

/// Customers (hotel CRM customer directory)
#[derive(DeriveIden)]
pub(crate) enum Customers {
    Table,
    Id,
    Name,
    Email,
    Phone,
    BirthDate,
    CreatedAt,
    UpdatedAt,
}

/// Customer Profiles (1:1 extended info)
#[derive(DeriveIden)]
enum CustomerProfiles {
    Table,
    Id,
    CustomerId,
    Address,
    City,
    Country,
    Preferences,
    Notes,
    IsVip,
}

/// Special Dates (birthdays / anniversaries per customer)
#[derive(DeriveIden)]
enum SpecialDates {
    Table,
    Id,
    CustomerId,
    DateType,
    Date,
    Notes,
    CreatedAt,
    UpdatedAt,
}

/// Events (hotel events and activities)
#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Title,
    Description,
    EventType,
    StartDate,
    EndDate,
    Capacity,
    CurrentBookings,
    PriceCents,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Event Bookings
#[derive(DeriveIden)]
enum EventBookings {
    Table,
    Id,
    EventId,
    CustomerId,
    BookingDate,
    NumberOfGuests,
    TotalPriceCents,
    Status,
    Notes,
}

/// Offers (promotions with validity window and usage cap)
#[derive(DeriveIden)]
enum Offers {
    Table,
    Id,
    Title,
    Description,
    OfferType,
    DiscountValue,
    Status,
    ValidFrom,
    ValidTo,
    MaxUsage,
    CurrentUsage,
    CreatedAt,
    UpdatedAt,
}

/// Offer Usages (one redemption per customer per offer)
#[derive(DeriveIden)]
enum OfferUsages {
    Table,
    Id,
    OfferId,
    CustomerId,
    UsedAt,
    DiscountApplied,
    OrderId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 客户表 customers
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Customers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Customers::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Customers::Email).string_len(255).null())
                    .col(ColumnDef::new(Customers::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Customers::BirthDate).date().not_null())
                    .col(
                        ColumnDef::new(Customers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Customers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 手机号唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customers_phone_unique")
                    .table(Customers::Table)
                    .col(Customers::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 客户扩展资料表 customer_profiles (每客户一条)
        manager
            .create_table(
                Table::create()
                    .table(CustomerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomerProfiles::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(CustomerProfiles::Address).text().null())
                    .col(ColumnDef::new(CustomerProfiles::City).string_len(50).null())
                    .col(ColumnDef::new(CustomerProfiles::Country).string_len(50).null())
                    .col(
                        ColumnDef::new(CustomerProfiles::Preferences)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(ColumnDef::new(CustomerProfiles::Notes).text().null())
                    .col(
                        ColumnDef::new(CustomerProfiles::IsVip)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customer_profiles_customer_unique")
                    .table(CustomerProfiles::Table)
                    .col(CustomerProfiles::CustomerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(CustomerProfiles::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_customer_profile_customer")
                            .from_tbl(CustomerProfiles::Table)
                            .from_col(CustomerProfiles::CustomerId)
                            .to_tbl(Customers::Table)
                            .to_col(Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 纪念日表 special_dates
        manager
            .create_table(
                Table::create()
                    .table(SpecialDates::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SpecialDates::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(SpecialDates::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(SpecialDates::DateType).string_len(20).not_null())
                    .col(ColumnDef::new(SpecialDates::Date).date().not_null())
                    .col(ColumnDef::new(SpecialDates::Notes).text().null())
                    .col(
                        ColumnDef::new(SpecialDates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(SpecialDates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_special_dates_customer")
                    .table(SpecialDates::Table)
                    .col(SpecialDates::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(SpecialDates::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_special_date_customer")
                            .from_tbl(SpecialDates::Table)
                            .from_col(SpecialDates::CustomerId)
                            .to_tbl(Customers::Table)
                            .to_col(Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动表 events
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Events::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Events::Description).text().not_null())
                    .col(ColumnDef::new(Events::EventType).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Events::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Events::CurrentBookings)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Events::PriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Events::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动预订表 event_bookings
        manager
            .create_table(
                Table::create()
                    .table(EventBookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventBookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(EventBookings::EventId).uuid().not_null())
                    .col(ColumnDef::new(EventBookings::CustomerId).uuid().not_null())
                    .col(
                        ColumnDef::new(EventBookings::BookingDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(EventBookings::NumberOfGuests)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(EventBookings::TotalPriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(EventBookings::Status)
                            .string_len(20)
                            .not_null()
                            .default("confirmed"),
                    )
                    .col(ColumnDef::new(EventBookings::Notes).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_event_bookings_event")
                    .table(EventBookings::Table)
                    .col(EventBookings::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_event_bookings_customer")
                    .table(EventBookings::Table)
                    .col(EventBookings::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(EventBookings::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_event_booking_event")
                            .from_tbl(EventBookings::Table)
                            .from_col(EventBookings::EventId)
                            .to_tbl(Events::Table)
                            .to_col(Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_event_booking_customer")
                            .from_tbl(EventBookings::Table)
                            .from_col(EventBookings::CustomerId)
                            .to_tbl(Customers::Table)
                            .to_col(Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 优惠活动表 offers
        // discount_value: percentage 类型存百分比, fixed 类型存美分
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Offers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Offers::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Offers::Description).text().not_null())
                    .col(ColumnDef::new(Offers::OfferType).string_len(20).not_null())
                    .col(ColumnDef::new(Offers::DiscountValue).big_integer().not_null())
                    .col(
                        ColumnDef::new(Offers::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Offers::ValidFrom).date().not_null())
                    .col(ColumnDef::new(Offers::ValidTo).date().not_null())
                    .col(ColumnDef::new(Offers::MaxUsage).integer().null())
                    .col(
                        ColumnDef::new(Offers::CurrentUsage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Offers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Offers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 优惠使用记录表 offer_usages
        manager
            .create_table(
                Table::create()
                    .table(OfferUsages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OfferUsages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(OfferUsages::OfferId).uuid().not_null())
                    .col(ColumnDef::new(OfferUsages::CustomerId).uuid().not_null())
                    .col(
                        ColumnDef::new(OfferUsages::UsedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(OfferUsages::DiscountApplied)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OfferUsages::OrderId).string_len(100).null())
                    .to_owned(),
            )
            .await?;

        // 每个客户每个优惠仅可使用一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_offer_usages_offer_customer_unique")
                    .table(OfferUsages::Table)
                    .col(OfferUsages::OfferId)
                    .col(OfferUsages::CustomerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(OfferUsages::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_offer_usage_offer")
                            .from_tbl(OfferUsages::Table)
                            .from_col(OfferUsages::OfferId)
                            .to_tbl(Offers::Table)
                            .to_col(Offers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_offer_usage_customer")
                            .from_tbl(OfferUsages::Table)
                            .from_col(OfferUsages::CustomerId)
                            .to_tbl(Customers::Table)
                            .to_col(Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：从引用方到被引用方
        manager
            .drop_table(Table::drop().if_exists().table(OfferUsages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Offers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(EventBookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(SpecialDates::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(CustomerProfiles::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Customers::Table).to_owned())
            .await?;

        Ok(())
    }
}
