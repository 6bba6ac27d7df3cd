use crate::entities::{
    customer_entity as customers, offer_entity as offers, offer_usage_entity as usages,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateOfferRequest, OfferQuery, OfferResponse, OfferStatsResponse, OfferStatus, OfferType,
    OfferUsageQuery, OfferUsageResponse, UpdateOfferRequest, UseOfferRequest,
};
use chrono::Utc;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct OfferService {
    pool: DatabaseConnection,
}

impl OfferService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 优惠列表（支持状态 / 类型过滤; active_only 额外要求当天在有效期内）
    pub async fn list_offers(&self, query: &OfferQuery) -> AppResult<Vec<OfferResponse>> {
        let mut base_query = offers::Entity::find();
        if let Some(status) = &query.status {
            base_query = base_query.filter(offers::Column::Status.eq(status.clone()));
        }
        if let Some(offer_type) = &query.offer_type {
            base_query = base_query.filter(offers::Column::OfferType.eq(offer_type.clone()));
        }
        if query.active_only.unwrap_or(false) {
            let today = Utc::now().date_naive();
            base_query = base_query
                .filter(offers::Column::Status.eq(OfferStatus::Active))
                .filter(offers::Column::ValidFrom.lte(today))
                .filter(offers::Column::ValidTo.gte(today));
        }

        let list = base_query
            .order_by(offers::Column::ValidTo, Order::Asc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_offer(&self, offer_id: Uuid) -> AppResult<OfferResponse> {
        Ok(self.find_offer(offer_id).await?.into())
    }

    /// 当前可用的优惠 (active 且当天在有效期内)
    pub async fn active_offers(&self) -> AppResult<Vec<OfferResponse>> {
        let today = Utc::now().date_naive();
        let list = offers::Entity::find()
            .filter(offers::Column::Status.eq(OfferStatus::Active))
            .filter(offers::Column::ValidFrom.lte(today))
            .filter(offers::Column::ValidTo.gte(today))
            .order_by(offers::Column::ValidTo, Order::Asc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 已过期的优惠 (有效期已过，或被标记为 expired)
    pub async fn expired_offers(&self) -> AppResult<Vec<OfferResponse>> {
        let today = Utc::now().date_naive();
        let list = offers::Entity::find()
            .filter(
                Condition::any()
                    .add(offers::Column::ValidTo.lt(today))
                    .add(offers::Column::Status.eq(OfferStatus::Expired)),
            )
            .order_by(offers::Column::ValidTo, Order::Desc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn create_offer(&self, request: CreateOfferRequest) -> AppResult<OfferResponse> {
        Self::validate_discount(&request.offer_type, request.discount_value)?;
        if request.valid_to < request.valid_from {
            return Err(AppError::ValidationError(
                "Offer validity window is inverted".to_string(),
            ));
        }
        if matches!(request.max_usage, Some(max) if max < 1) {
            return Err(AppError::ValidationError(
                "max_usage must be at least 1".to_string(),
            ));
        }

        let model = offers::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(request.title),
            description: Set(request.description),
            offer_type: Set(request.offer_type),
            discount_value: Set(request.discount_value),
            status: Set(OfferStatus::Active),
            valid_from: Set(request.valid_from),
            valid_to: Set(request.valid_to),
            max_usage: Set(request.max_usage),
            current_usage: Set(0),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Offer created: {} ({})", model.title, model.id);
        Ok(model.into())
    }

    pub async fn update_offer(
        &self,
        offer_id: Uuid,
        request: UpdateOfferRequest,
    ) -> AppResult<OfferResponse> {
        let offer = self.find_offer(offer_id).await?;

        let offer_type = request.offer_type.clone().unwrap_or(offer.offer_type.clone());
        let discount_value = request.discount_value.unwrap_or(offer.discount_value);
        Self::validate_discount(&offer_type, discount_value)?;

        let mut model = offer.into_active_model();
        if let Some(title) = request.title {
            model.title = Set(title);
        }
        if let Some(description) = request.description {
            model.description = Set(description);
        }
        if request.offer_type.is_some() {
            model.offer_type = Set(offer_type);
        }
        if request.discount_value.is_some() {
            model.discount_value = Set(discount_value);
        }
        if let Some(status) = request.status {
            model.status = Set(status);
        }
        if let Some(valid_from) = request.valid_from {
            model.valid_from = Set(valid_from);
        }
        if let Some(valid_to) = request.valid_to {
            model.valid_to = Set(valid_to);
        }
        if let Some(max_usage) = request.max_usage {
            if max_usage < 1 {
                return Err(AppError::ValidationError(
                    "max_usage must be at least 1".to_string(),
                ));
            }
            model.max_usage = Set(Some(max_usage));
        }
        model.updated_at = Set(Some(Utc::now()));

        Ok(model.update(&self.pool).await?.into())
    }

    pub async fn delete_offer(&self, offer_id: Uuid) -> AppResult<()> {
        let offer = self.find_offer(offer_id).await?;
        offers::Entity::delete_by_id(offer.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    /// 核销优惠。
    /// 约束:
    /// - 优惠必须有效 (active 且当天在有效期内)
    /// - 每个客户每个优惠只能使用一次 ((offer_id, customer_id) 唯一索引仲裁)
    /// - 使用次数上限用条件更新抢占，并发不会超核销
    pub async fn use_offer(
        &self,
        offer_id: Uuid,
        request: UseOfferRequest,
    ) -> AppResult<OfferUsageResponse> {
        let txn = self.pool.begin().await?;

        let offer = offers::Entity::find_by_id(offer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))?;

        customers::Entity::find_by_id(request.customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        if !offer.is_valid() {
            return Err(AppError::ValidationError(
                "Offer is not currently valid".to_string(),
            ));
        }

        // 抢占使用名额: max_usage 为 NULL 时不设上限
        let claimed = offers::Entity::update_many()
            .col_expr(
                offers::Column::CurrentUsage,
                Expr::col(offers::Column::CurrentUsage).add(1),
            )
            .col_expr(offers::Column::UpdatedAt, Expr::value(Some(Utc::now())))
            .filter(offers::Column::Id.eq(offer_id))
            .filter(
                Condition::any()
                    .add(offers::Column::MaxUsage.is_null())
                    .add(
                        Expr::col(offers::Column::MaxUsage)
                            .gt(Expr::col(offers::Column::CurrentUsage)),
                    ),
            )
            .exec(&txn)
            .await?;

        if claimed.rows_affected == 0 {
            return Err(AppError::ValidationError(
                "Offer usage limit reached".to_string(),
            ));
        }

        let usage = usages::ActiveModel {
            id: Set(Uuid::new_v4()),
            offer_id: Set(offer_id),
            customer_id: Set(request.customer_id),
            used_at: Set(Some(Utc::now())),
            discount_applied: Set(offer.discount_value),
            order_id: Set(request.order_id),
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::ValidationError(
                "Customer has already used this offer".to_string(),
            ),
            _ => e.into(),
        })?;

        txn.commit().await?;

        log::info!(
            "Offer used: offer={} customer={}",
            offer_id,
            request.customer_id
        );
        Ok(usage.into())
    }

    /// 使用记录（支持客户 / 优惠过滤，按使用时间倒序）
    pub async fn list_usages(&self, query: &OfferUsageQuery) -> AppResult<Vec<OfferUsageResponse>> {
        let mut base_query = usages::Entity::find();
        if let Some(customer_id) = query.customer_id {
            base_query = base_query.filter(usages::Column::CustomerId.eq(customer_id));
        }
        if let Some(offer_id) = query.offer_id {
            base_query = base_query.filter(usages::Column::OfferId.eq(offer_id));
        }

        let list = base_query
            .order_by(usages::Column::UsedAt, Order::Desc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 优惠统计：总数 / 生效中 / 已过期 / 累计核销次数
    pub async fn stats(&self) -> AppResult<OfferStatsResponse> {
        let today = Utc::now().date_naive();

        let total_offers = offers::Entity::find().count(&self.pool).await? as i64;
        let active_offers = offers::Entity::find()
            .filter(offers::Column::Status.eq(OfferStatus::Active))
            .filter(offers::Column::ValidFrom.lte(today))
            .filter(offers::Column::ValidTo.gte(today))
            .count(&self.pool)
            .await? as i64;
        let expired_offers = offers::Entity::find()
            .filter(
                Condition::any()
                    .add(offers::Column::Status.eq(OfferStatus::Expired))
                    .add(offers::Column::ValidTo.lt(today)),
            )
            .count(&self.pool)
            .await? as i64;
        let total_usage = usages::Entity::find().count(&self.pool).await? as i64;

        Ok(OfferStatsResponse {
            total_offers,
            active_offers,
            expired_offers,
            total_usage,
        })
    }

    async fn find_offer(&self, offer_id: Uuid) -> AppResult<offers::Model> {
        offers::Entity::find_by_id(offer_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))
    }

    fn validate_discount(offer_type: &OfferType, discount_value: i64) -> AppResult<()> {
        match offer_type {
            OfferType::Percentage => {
                if !(1..=100).contains(&discount_value) {
                    return Err(AppError::ValidationError(
                        "Percentage discount must be between 1 and 100".to_string(),
                    ));
                }
            }
            OfferType::Fixed => {
                if discount_value < 1 {
                    return Err(AppError::ValidationError(
                        "Fixed discount must be a positive amount in cents".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}
