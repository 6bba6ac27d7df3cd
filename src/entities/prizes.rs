use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 转盘奖品配置实体
/// - weight: 相对概率质量，抽中概率 = weight / sum(weights)，参与抽奖必须 > 0
/// - icon: emoji 图标
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// 奖品名称 (唯一)
    pub name: String,
    pub description: String,
    pub icon: String,
    /// 相对权重 (> 0 才参与抽奖)
    pub weight: i32,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
