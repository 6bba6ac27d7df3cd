use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 优惠使用记录实体
/// (offer_id, customer_id) 唯一: 每个客户每个优惠只能使用一次
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "offer_usages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub offer_id: Uuid,
    pub customer_id: Uuid,
    pub used_at: Option<DateTime<Utc>>,
    /// 实际抵扣值 (快照, 语义同 offers.discount_value)
    pub discount_applied: i64,
    pub order_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
