use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

use crate::m20250901_000001_initial::Customers;

/// Prizes (转盘奖品配置表)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    Description,
    Icon,
    Weight,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Game Sessions (客户游戏会话，每客户一条)
#[derive(DeriveIden)]
enum GameSessions {
    Table,
    Id,
    CustomerId,
    HasPlayed,
    FirstPlayAt,
    CreatedAt,
    UpdatedAt,
}

/// Spin Records (每次抽奖一条记录)
#[derive(DeriveIden)]
enum SpinRecords {
    Table,
    Id,
    CustomerId,
    PrizeId,
    PrizeName,
    PrizeIcon,
    PlayedAt,
    Claimed,
    ClaimedAt,
    Notes,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 权重为相对概率质量 (weight / sum(weights))，默认奖品权重合计 100:
/// - Free Drink 30
/// - 10% Discount 25
/// - Free Appetizer 20
/// - Dessert on Us 15
/// - 20% Discount 8
/// - Free Meal 2
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Prizes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Prizes::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Prizes::Description).text().not_null())
                    .col(
                        ColumnDef::new(Prizes::Icon)
                            .string_len(10)
                            .not_null()
                            .default("🎁"),
                    )
                    .col(ColumnDef::new(Prizes::Weight).integer().not_null().default(20))
                    .col(ColumnDef::new(Prizes::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖品名称唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_name_unique")
                    .table(Prizes::Table)
                    .col(Prizes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 游戏会话表
        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameSessions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GameSessions::CustomerId).uuid().not_null())
                    .col(
                        ColumnDef::new(GameSessions::HasPlayed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameSessions::FirstPlayAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(GameSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // customer_id 唯一索引: 1:1 会话约束，并发 get-or-create 依赖它仲裁
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_game_sessions_customer_unique")
                    .table(GameSessions::Table)
                    .col(GameSessions::CustomerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 抽奖记录表
        // prize_id 可为空（空奖品目录时的兜底奖不入库）; 名称/图标冗余存储保证历史可回溯
        manager
            .create_table(
                Table::create()
                    .table(SpinRecords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SpinRecords::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(SpinRecords::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(SpinRecords::PrizeId).uuid().null())
                    .col(ColumnDef::new(SpinRecords::PrizeName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(SpinRecords::PrizeIcon)
                            .string_len(10)
                            .not_null()
                            .default("🎁"),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::PlayedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::Claimed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::ClaimedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(SpinRecords::Notes).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spin_records_customer")
                    .table(SpinRecords::Table)
                    .col(SpinRecords::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spin_records_prize")
                    .table(SpinRecords::Table)
                    .col(SpinRecords::PrizeId)
                    .to_owned(),
            )
            .await?;

        // 外键（不加 ON DELETE CASCADE，奖品下架后历史记录仍然存在）
        manager
            .alter_table(
                Table::alter()
                    .table(SpinRecords::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_spin_record_prize")
                            .from_tbl(SpinRecords::Table)
                            .from_col(SpinRecords::PrizeId)
                            .to_tbl(Prizes::Table)
                            .to_col(Prizes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 客户删除时级联清理游戏数据
        manager
            .alter_table(
                Table::alter()
                    .table(GameSessions::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_game_session_customer")
                            .from_tbl(GameSessions::Table)
                            .from_col(GameSessions::CustomerId)
                            .to_tbl(Customers::Table)
                            .to_col(Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(SpinRecords::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_spin_record_customer")
                            .from_tbl(SpinRecords::Table)
                            .from_col(SpinRecords::CustomerId)
                            .to_tbl(Customers::Table)
                            .to_col(Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 初始化默认奖品
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO prizes (id, name, description, icon, weight, is_active)
VALUES
 (gen_random_uuid(), 'Free Drink', 'Get a free drink of your choice!', '🥤', 30, TRUE),
 (gen_random_uuid(), '10% Discount', 'Enjoy 10% off your next meal!', '💰', 25, TRUE),
 (gen_random_uuid(), 'Free Appetizer', 'Complimentary appetizer with your meal!', '🍤', 20, TRUE),
 (gen_random_uuid(), 'Dessert on Us', 'Free dessert with your order!', '🍰', 15, TRUE),
 (gen_random_uuid(), '20% Discount', 'Get 20% off your entire bill!', '🎯', 8, TRUE),
 (gen_random_uuid(), 'Free Meal', 'Win a completely free meal!', '🎉', 2, TRUE)
ON CONFLICT (name) DO NOTHING;
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：记录 -> 会话 -> 奖品
        manager
            .drop_table(Table::drop().if_exists().table(SpinRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(GameSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        Ok(())
    }
}
