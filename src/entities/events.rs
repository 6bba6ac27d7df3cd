use crate::models::EventType;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 酒店活动实体
/// - capacity / current_bookings 控制可预订名额
/// - price_cents: 单人价格(美分)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub capacity: i32,
    pub current_bookings: i32,
    /// 单人价格(美分)
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 剩余可预订名额
    pub fn available_spots(&self) -> i32 {
        self.capacity - self.current_bookings
    }

    pub fn is_full(&self) -> bool {
        self.current_bookings >= self.capacity
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn event(capacity: i32, current: i32) -> Model {
        Model {
            id: Uuid::new_v4(),
            title: "Wine Tasting".to_string(),
            description: "An evening of local wines".to_string(),
            event_type: EventType::Bar,
            start_date: Utc::now(),
            end_date: Utc::now(),
            capacity,
            current_bookings: current,
            price_cents: 2500,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_available_spots() {
        assert_eq!(event(20, 5).available_spots(), 15);
        assert_eq!(event(20, 20).available_spots(), 0);
    }

    #[test]
    fn test_is_full() {
        assert!(!event(20, 19).is_full());
        assert!(event(20, 20).is_full());
    }
}
