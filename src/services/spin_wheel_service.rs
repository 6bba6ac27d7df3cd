use crate::entities::{
    customer_entity as customers, game_session_entity as sessions, prize_entity as prizes,
    spin_record_entity as records,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ClaimRequest, CreatePrizeRequest, CustomerResponse, GameSessionResponse, PaginatedResponse,
    PaginationParams, PlayResultResponse, PrizeResponse, SpinRecordPageResponse,
    SpinRecordQuery, SpinRecordResponse, SpinStatsResponse, UpdatePrizeRequest, WonPrize,
};
use chrono::Utc;
use rand::Rng;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

/// 兜底奖: 奖品目录为空时发放，仅内存常量，不写入奖品表
pub const FALLBACK_PRIZE_NAME: &str = "Thank You";

fn fallback_prize() -> WonPrize {
    WonPrize {
        id: None,
        name: FALLBACK_PRIZE_NAME.to_string(),
        description: "Thank you for playing!".to_string(),
        icon: "🎉".to_string(),
    }
}

/// 累计权重抽取: 抽中概率 = weight_i / sum(weights)。
/// 调用方保证非空且所有权重 >= 1。
fn weighted_pick(weights: &[i32]) -> usize {
    let total: u64 = weights.iter().map(|w| *w as u64).sum();
    let roll = rand::rng().random_range(0..total);
    pick_by_cumulative(weights, roll)
}

/// 定位第一个累计权重大于 roll 的下标
fn pick_by_cumulative(weights: &[i32], roll: u64) -> usize {
    let mut acc = 0u64;
    for (i, w) in weights.iter().enumerate() {
        acc += *w as u64;
        if roll < acc {
            return i;
        }
    }
    weights.len() - 1
}

#[derive(Clone)]
pub struct SpinWheelService {
    pool: DatabaseConnection,
}

impl SpinWheelService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    // -----------------------------
    // 奖品配置
    // -----------------------------

    /// 获取奖品列表（仅启用的，按权重降序）
    pub async fn list_prizes(&self) -> AppResult<Vec<PrizeResponse>> {
        let list = prizes::Entity::find()
            .filter(prizes::Column::IsActive.eq(true))
            .order_by_desc(prizes::Column::Weight)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn create_prize(&self, request: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        if request.weight < 1 {
            return Err(AppError::ValidationError(
                "Prize weight must be at least 1".to_string(),
            ));
        }

        let model = prizes::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            description: Set(request.description),
            icon: Set(request.icon),
            weight: Set(request.weight),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::ValidationError("A prize with this name already exists".to_string())
            }
            _ => e.into(),
        })?;

        Ok(model.into())
    }

    pub async fn update_prize(
        &self,
        prize_id: Uuid,
        request: UpdatePrizeRequest,
    ) -> AppResult<PrizeResponse> {
        if let Some(weight) = request.weight {
            if weight < 1 {
                return Err(AppError::ValidationError(
                    "Prize weight must be at least 1".to_string(),
                ));
            }
        }

        let mut model = prizes::Entity::find_by_id(prize_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name);
        }
        if let Some(description) = request.description {
            model.description = Set(description);
        }
        if let Some(icon) = request.icon {
            model.icon = Set(icon);
        }
        if let Some(weight) = request.weight {
            model.weight = Set(weight);
        }
        if let Some(is_active) = request.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(Some(Utc::now()));

        Ok(model.update(&self.pool).await?.into())
    }

    pub async fn delete_prize(&self, prize_id: Uuid) -> AppResult<()> {
        let model = prizes::Entity::find_by_id(prize_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?;

        // 已有抽奖记录引用时外键会阻止删除，提示改为下线
        prizes::Entity::delete_by_id(model.id)
            .exec(&self.pool)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::ValidationError(
                    "Prize has been won before; deactivate it instead of deleting".to_string(),
                ),
                _ => e.into(),
            })?;

        Ok(())
    }

    // -----------------------------
    // 抽奖 (Play)
    // -----------------------------

    /// 进行一次抽奖:
    /// 1. 校验客户存在
    /// 2. 读取启用奖品并按权重抽取（空目录发放兜底奖）
    /// 3. 记录游戏会话（每客户一条，首次抽奖打标）
    /// 4. 写入抽奖记录（名称/图标快照）
    ///
    /// 整体在一个事务内执行，失败时不残留半成品会话/记录。
    pub async fn play(&self, customer_id: Uuid) -> AppResult<PlayResultResponse> {
        let txn = self.pool.begin().await?;

        let customer = customers::Entity::find_by_id(customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let prize_list = prizes::Entity::find()
            .filter(prizes::Column::IsActive.eq(true))
            .filter(prizes::Column::Weight.gt(0))
            .order_by_desc(prizes::Column::Weight)
            .all(&txn)
            .await?;

        let won = if prize_list.is_empty() {
            fallback_prize()
        } else {
            let weights: Vec<i32> = prize_list.iter().map(|p| p.weight).collect();
            WonPrize::from(prize_list[weighted_pick(&weights)].clone())
        };

        // 抽奖之后记会话, is_first_play 反映本次抽奖之前的状态
        let (_session, is_first_play) = self.record_play(&txn, customer_id).await?;

        let record = records::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id),
            prize_id: Set(won.id),
            prize_name: Set(won.name.clone()),
            prize_icon: Set(won.icon.clone()),
            played_at: Set(Utc::now()),
            claimed: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(PlayResultResponse {
            record_id: record.id,
            prize: won,
            customer_name: customer.name,
            played_at: record.played_at,
            is_first_play,
        })
    }

    /// 游戏会话 get-or-create。
    /// 并发创建由 customer_id 唯一索引仲裁：插入用 ON CONFLICT DO NOTHING，
    /// 冲突不会把外层抽奖事务打进 aborted 状态，输家降级为更新胜者的会话。
    /// first_play_at 只写一次；is_first_play 仅在创建分支为 true。
    async fn record_play(
        &self,
        txn: &DatabaseTransaction,
        customer_id: Uuid,
    ) -> AppResult<(sessions::Model, bool)> {
        if let Some(existing) = sessions::Entity::find()
            .filter(sessions::Column::CustomerId.eq(customer_id))
            .one(txn)
            .await?
        {
            let model = self.mark_played(txn, existing).await?;
            return Ok((model, false));
        }

        let session_id = Uuid::new_v4();
        let insert = sessions::ActiveModel {
            id: Set(session_id),
            customer_id: Set(customer_id),
            has_played: Set(true),
            first_play_at: Set(Some(Utc::now())),
            ..Default::default()
        };

        let inserted = sessions::Entity::insert(insert)
            .on_conflict(
                OnConflict::column(sessions::Column::CustomerId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;

        let session = sessions::Entity::find()
            .filter(sessions::Column::CustomerId.eq(customer_id))
            .one(txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Game session disappeared after insert".to_string())
            })?;

        if inserted == 1 && session.id == session_id {
            return Ok((session, true));
        }

        // 输掉并发创建竞争, 在胜者写入的会话上打标
        let model = self.mark_played(txn, session).await?;
        Ok((model, false))
    }

    async fn mark_played(
        &self,
        txn: &DatabaseTransaction,
        session: sessions::Model,
    ) -> AppResult<sessions::Model> {
        if session.has_played && session.first_play_at.is_some() {
            return Ok(session);
        }

        let first_play_at = session.first_play_at.or_else(|| Some(Utc::now()));
        let mut model = session.into_active_model();
        model.has_played = Set(true);
        model.first_play_at = Set(first_play_at);
        model.updated_at = Set(Some(Utc::now()));
        Ok(model.update(txn).await?)
    }

    // -----------------------------
    // 兑奖 (Claim)
    // -----------------------------

    /// 兑奖：条件更新抢占 claimed 标志，并发重复兑换只有一个成功。
    /// claimed_at / notes 只在成功的那次写入。
    pub async fn claim(
        &self,
        record_id: Uuid,
        request: ClaimRequest,
    ) -> AppResult<SpinRecordResponse> {
        records::Entity::find_by_id(record_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Spin record not found".to_string()))?;

        let updated = records::Entity::update_many()
            .col_expr(records::Column::Claimed, Expr::value(true))
            .col_expr(records::Column::ClaimedAt, Expr::value(Some(Utc::now())))
            .col_expr(records::Column::Notes, Expr::value(request.notes))
            .filter(records::Column::Id.eq(record_id))
            .filter(records::Column::Claimed.eq(false))
            .exec(&self.pool)
            .await?;

        if updated.rows_affected == 0 {
            return Err(AppError::AlreadyClaimed(
                "Prize has already been claimed".to_string(),
            ));
        }

        let record = records::Entity::find_by_id(record_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Spin record disappeared after claim".to_string())
            })?;
        Ok(record.into())
    }

    // -----------------------------
    // 记录与统计
    // -----------------------------

    /// 抽奖记录（分页，可按客户 / 兑奖状态过滤，倒序）
    pub async fn list_records(&self, query: &SpinRecordQuery) -> AppResult<SpinRecordPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base_query = records::Entity::find();
        if let Some(customer_id) = query.customer_id {
            base_query = base_query.filter(records::Column::CustomerId.eq(customer_id));
        }
        if let Some(claimed) = query.claimed {
            base_query = base_query.filter(records::Column::Claimed.eq(claimed));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(records::Column::PlayedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<SpinRecordResponse> = items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// 转盘统计：总次数 / 已兑奖 / 未兑奖 / 各奖品抽中分布
    pub async fn stats(&self) -> AppResult<SpinStatsResponse> {
        let total_plays = records::Entity::find().count(&self.pool).await? as i64;
        let claimed_prizes = records::Entity::find()
            .filter(records::Column::Claimed.eq(true))
            .count(&self.pool)
            .await? as i64;
        let unclaimed_prizes = records::Entity::find()
            .filter(records::Column::Claimed.eq(false))
            .count(&self.pool)
            .await? as i64;

        let rows: Vec<(String, i64)> = records::Entity::find()
            .select_only()
            .column(records::Column::PrizeName)
            .column_as(Expr::val(1).count(), "count")
            .group_by(records::Column::PrizeName)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let prize_distribution: HashMap<String, i64> = rows.into_iter().collect();

        Ok(SpinStatsResponse {
            total_plays,
            claimed_prizes,
            unclaimed_prizes,
            prize_distribution,
        })
    }

    // -----------------------------
    // 游戏会话
    // -----------------------------

    /// 客户游戏状态 (无会话时视为未玩过)
    pub async fn session_status(&self, customer_id: Uuid) -> AppResult<GameSessionResponse> {
        let session = sessions::Entity::find()
            .filter(sessions::Column::CustomerId.eq(customer_id))
            .one(&self.pool)
            .await?;

        Ok(match session {
            Some(model) => model.into(),
            None => GameSessionResponse {
                customer_id,
                has_played: false,
                first_play_at: None,
            },
        })
    }

    /// 已经玩过的客户
    pub async fn played_customers(&self) -> AppResult<Vec<CustomerResponse>> {
        let played_ids: Vec<Uuid> = sessions::Entity::find()
            .filter(sessions::Column::HasPlayed.eq(true))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|s| s.customer_id)
            .collect();

        if played_ids.is_empty() {
            return Ok(vec![]);
        }

        let list = customers::Entity::find()
            .filter(customers::Column::Id.is_in(played_ids))
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 还没玩过的客户
    pub async fn available_customers(&self) -> AppResult<Vec<CustomerResponse>> {
        let played_ids: Vec<Uuid> = sessions::Entity::find()
            .filter(sessions::Column::HasPlayed.eq(true))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|s| s.customer_id)
            .collect();

        let mut query = customers::Entity::find();
        if !played_ids.is_empty() {
            query = query.filter(customers::Column::Id.is_not_in(played_ids));
        }

        let list = query.all(&self.pool).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_by_cumulative_boundaries() {
        let weights = [70, 30];
        assert_eq!(pick_by_cumulative(&weights, 0), 0);
        assert_eq!(pick_by_cumulative(&weights, 69), 0);
        assert_eq!(pick_by_cumulative(&weights, 70), 1);
        assert_eq!(pick_by_cumulative(&weights, 99), 1);
    }

    #[test]
    fn test_pick_single_prize() {
        let weights = [100];
        for roll in [0u64, 50, 99] {
            assert_eq!(pick_by_cumulative(&weights, roll), 0);
        }
        assert_eq!(weighted_pick(&weights), 0);
    }

    #[test]
    fn test_distribution_converges() {
        // 70/30 权重在大样本下频率收敛到 0.70 ± 1%
        let weights = [70, 30];
        let n = 100_000u32;
        let mut hits = [0u32; 2];
        for _ in 0..n {
            hits[weighted_pick(&weights)] += 1;
        }
        let freq = hits[0] as f64 / n as f64;
        assert!(
            (freq - 0.70).abs() < 0.01,
            "frequency {} outside tolerance",
            freq
        );
    }

    #[test]
    fn test_default_catalog_distribution() {
        // 默认奖品目录权重: 30/25/20/15/8/2 (合计100)
        let weights = [30, 25, 20, 15, 8, 2];
        let n = 200_000u32;
        let mut hits = [0u32; 6];
        for _ in 0..n {
            hits[weighted_pick(&weights)] += 1;
        }
        // 每个奖品都能被抽中，且稀有奖频率接近 2%
        assert!(hits.iter().all(|&h| h > 0));
        let rare = hits[5] as f64 / n as f64;
        assert!((rare - 0.02).abs() < 0.01, "rare frequency {}", rare);
    }

    #[test]
    fn test_fallback_prize_constant() {
        let p = fallback_prize();
        assert_eq!(p.name, FALLBACK_PRIZE_NAME);
        assert!(p.id.is_none());
        assert!(!p.icon.is_empty());
    }
}
