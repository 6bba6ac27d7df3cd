use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::special_date_entity;

/// 纪念日类型
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum SpecialDateType {
    #[sea_orm(string_value = "birthday")]
    Birthday,
    #[sea_orm(string_value = "wedding_anniversary")]
    WeddingAnniversary,
    #[sea_orm(string_value = "anniversary")]
    Anniversary,
    #[sea_orm(string_value = "other")]
    Other,
}

impl SpecialDateType {
    /// WhatsApp 祝福模板中的展示文案
    pub fn display_name(&self) -> &'static str {
        match self {
            SpecialDateType::Birthday => "Birthday",
            SpecialDateType::WeddingAnniversary => "Wedding Anniversary",
            SpecialDateType::Anniversary => "Anniversary",
            SpecialDateType::Other => "Special Day",
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpecialDateResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub date_type: SpecialDateType,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<special_date_entity::Model> for SpecialDateResponse {
    fn from(m: special_date_entity::Model) -> Self {
        SpecialDateResponse {
            id: m.id,
            customer_id: m.customer_id,
            date_type: m.date_type,
            date: m.date,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSpecialDateRequest {
    pub customer_id: Uuid,
    pub date_type: SpecialDateType,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSpecialDateRequest {
    pub date_type: Option<SpecialDateType>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// 纪念日列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SpecialDateQuery {
    pub customer_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub date_type: Option<SpecialDateType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// 即将到来查询参数 (days 默认 30)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpcomingQuery {
    pub days: Option<i64>,
}

/// 纪念日统计
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpecialDateStatsResponse {
    pub total_dates: i64,
    pub birthday_count: i64,
    pub anniversary_count: i64,
    pub other_count: i64,
}
