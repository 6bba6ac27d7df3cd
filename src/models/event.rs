use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{event_booking_entity, event_entity};

/// 活动类型
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[sea_orm(string_value = "restaurant")]
    Restaurant,
    #[sea_orm(string_value = "bar")]
    Bar,
    #[sea_orm(string_value = "conference")]
    Conference,
    #[sea_orm(string_value = "wedding")]
    Wedding,
    #[sea_orm(string_value = "party")]
    Party,
    #[sea_orm(string_value = "other")]
    Other,
}

/// 预订状态
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// 活动响应 (available_spots / is_full 为派生只读字段)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub capacity: i32,
    pub current_bookings: i32,
    pub available_spots: i32,
    pub is_full: bool,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<event_entity::Model> for EventResponse {
    fn from(m: event_entity::Model) -> Self {
        let available_spots = m.available_spots();
        let is_full = m.is_full();
        EventResponse {
            id: m.id,
            title: m.title,
            description: m.description,
            event_type: m.event_type,
            start_date: m.start_date,
            end_date: m.end_date,
            capacity: m.capacity,
            current_bookings: m.current_bookings,
            available_spots,
            is_full,
            price_cents: m.price_cents,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub capacity: i32,
    #[serde(default)]
    pub price_cents: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<EventType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}

/// 活动列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EventQuery {
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub active: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// 活动预订请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookEventRequest {
    pub customer_id: Uuid,
    #[serde(default = "default_guests")]
    pub number_of_guests: i32,
    pub notes: Option<String>,
}

fn default_guests() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventBookingResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub customer_id: Uuid,
    pub booking_date: Option<DateTime<Utc>>,
    pub number_of_guests: i32,
    pub total_price_cents: i64,
    pub status: BookingStatus,
    pub notes: Option<String>,
}

impl From<event_booking_entity::Model> for EventBookingResponse {
    fn from(m: event_booking_entity::Model) -> Self {
        EventBookingResponse {
            id: m.id,
            event_id: m.event_id,
            customer_id: m.customer_id,
            booking_date: m.booking_date,
            number_of_guests: m.number_of_guests,
            total_price_cents: m.total_price_cents,
            status: m.status,
            notes: m.notes,
        }
    }
}

/// 预订列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BookingQuery {
    pub customer_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
}
