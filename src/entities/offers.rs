use crate::models::{OfferStatus, OfferType};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 优惠活动实体
/// - discount_value: percentage 类型为百分比 (0-100)，fixed 类型为金额(美分)
/// - max_usage: NULL = 不限次数
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 当前日期是否落在有效期内且状态为 active
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        self.status == OfferStatus::Active && self.valid_from <= today && today <= self.valid_to
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_on(Utc::now().date_naive())
    }

    /// 有效且未达到使用上限
    pub fn is_available(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        match self.max_usage {
            None => true,
            Some(max) => self.current_usage < max,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn offer(status: OfferStatus, from: &str, to: &str, max: Option<i32>, used: i32) -> Model {
        Model {
            id: Uuid::new_v4(),
            title: "Summer Special".to_string(),
            description: "20% off spa treatments".to_string(),
            offer_type: OfferType::Percentage,
            discount_value: 20,
            status,
            valid_from: from.parse().unwrap(),
            valid_to: to.parse().unwrap(),
            max_usage: max,
            current_usage: used,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_validity_window() {
        let o = offer(OfferStatus::Active, "2026-06-01", "2026-08-31", None, 0);
        assert!(o.is_valid_on("2026-06-01".parse().unwrap()));
        assert!(o.is_valid_on("2026-08-31".parse().unwrap()));
        assert!(!o.is_valid_on("2026-05-31".parse().unwrap()));
        assert!(!o.is_valid_on("2026-09-01".parse().unwrap()));
    }

    #[test]
    fn test_inactive_offer_never_valid() {
        let o = offer(OfferStatus::Inactive, "2026-06-01", "2026-08-31", None, 0);
        assert!(!o.is_valid_on("2026-07-15".parse().unwrap()));
    }

    #[test]
    fn test_usage_cap() {
        // 无上限
        let o = offer(OfferStatus::Active, "2000-01-01", "2999-12-31", None, 1000);
        assert!(o.is_available());
        // 已达上限
        let o = offer(OfferStatus::Active, "2000-01-01", "2999-12-31", Some(10), 10);
        assert!(!o.is_available());
        // 未达上限
        let o = offer(OfferStatus::Active, "2000-01-01", "2999-12-31", Some(10), 9);
        assert!(o.is_available());
    }
}
