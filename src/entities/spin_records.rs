use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽奖记录实体
/// - 每次抽奖产生一条记录，名称/图标冗余存储方便历史查询
///   (奖品配置修改或下线后仍可回溯)
/// - prize_id 为空表示兜底奖 (空奖品目录时发放，不入奖品表)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "spin_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub prize_id: Option<Uuid>,
    /// 奖品名称 (历史快照)
    pub prize_name: String,
    pub prize_icon: String,
    pub played_at: DateTime<Utc>,
    pub claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
