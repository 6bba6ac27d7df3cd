use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{offer_entity, offer_usage_entity};

/// 优惠类型: percentage 的 discount_value 为百分比, fixed 为美分金额
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    #[sea_orm(string_value = "percentage")]
    Percentage,
    #[sea_orm(string_value = "fixed")]
    Fixed,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "expired")]
    Expired,
}

/// 优惠响应 (is_valid / is_available 为派生只读字段)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfferResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub offer_type: OfferType,
    pub discount_value: i64,
    pub status: OfferStatus,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub max_usage: Option<i32>,
    pub current_usage: i32,
    pub is_valid: bool,
    pub is_available: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<offer_entity::Model> for OfferResponse {
    fn from(m: offer_entity::Model) -> Self {
        let is_valid = m.is_valid();
        let is_available = m.is_available();
        OfferResponse {
            id: m.id,
            title: m.title,
            description: m.description,
            offer_type: m.offer_type,
            discount_value: m.discount_value,
            status: m.status,
            valid_from: m.valid_from,
            valid_to: m.valid_to,
            max_usage: m.max_usage,
            current_usage: m.current_usage,
            is_valid,
            is_available,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOfferRequest {
    pub title: String,
    pub description: String,
    pub offer_type: OfferType,
    pub discount_value: i64,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub max_usage: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOfferRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub offer_type: Option<OfferType>,
    pub discount_value: Option<i64>,
    pub status: Option<OfferStatus>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub max_usage: Option<i32>,
}

/// 优惠列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OfferQuery {
    pub status: Option<OfferStatus>,
    #[serde(rename = "type")]
    pub offer_type: Option<OfferType>,
    pub active_only: Option<bool>,
}

/// 核销请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UseOfferRequest {
    pub customer_id: Uuid,
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfferUsageResponse {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub customer_id: Uuid,
    pub used_at: Option<DateTime<Utc>>,
    pub discount_applied: i64,
    pub order_id: Option<String>,
}

impl From<offer_usage_entity::Model> for OfferUsageResponse {
    fn from(m: offer_usage_entity::Model) -> Self {
        OfferUsageResponse {
            id: m.id,
            offer_id: m.offer_id,
            customer_id: m.customer_id,
            used_at: m.used_at,
            discount_applied: m.discount_applied,
            order_id: m.order_id,
        }
    }
}

/// 使用记录查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OfferUsageQuery {
    pub customer_id: Option<Uuid>,
    pub offer_id: Option<Uuid>,
}

/// 优惠统计
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfferStatsResponse {
    pub total_offers: i64,
    pub active_offers: i64,
    pub expired_offers: i64,
    pub total_usage: i64,
}
