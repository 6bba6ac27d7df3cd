use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 客户扩展资料实体 (与 customers 1:1, customer_id 唯一)
/// preferences 为自由结构 JSON 对象，由前台逐键合并更新
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub preferences: Json,
    pub notes: Option<String>,
    pub is_vip: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
