use crate::entities::{customer_entity as customers, special_date_entity as special_dates};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateSpecialDateRequest, SpecialDateQuery, SpecialDateResponse, SpecialDateStatsResponse,
    SpecialDateType, UpdateSpecialDateRequest,
};
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// 纪念日每年重复: 以今天为基准计算下一次到来的日期。
/// 2/29 在平年按 3/1 处理。
fn next_occurrence(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    let in_year = |year: i32| {
        NaiveDate::from_ymd_opt(year, date.month(), date.day())
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).unwrap())
    };

    let this_year = in_year(today.year());
    if this_year >= today {
        this_year
    } else {
        in_year(today.year() + 1)
    }
}

#[derive(Clone)]
pub struct SpecialDateService {
    pool: DatabaseConnection,
}

impl SpecialDateService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 纪念日列表（支持客户 / 类型 / 日期区间过滤，按日期升序）
    pub async fn list_special_dates(
        &self,
        query: &SpecialDateQuery,
    ) -> AppResult<Vec<SpecialDateResponse>> {
        let mut base_query = special_dates::Entity::find();
        if let Some(customer_id) = query.customer_id {
            base_query = base_query.filter(special_dates::Column::CustomerId.eq(customer_id));
        }
        if let Some(date_type) = &query.date_type {
            base_query = base_query.filter(special_dates::Column::DateType.eq(date_type.clone()));
        }
        if let Some(start) = query.start_date {
            base_query = base_query.filter(special_dates::Column::Date.gte(start));
        }
        if let Some(end) = query.end_date {
            base_query = base_query.filter(special_dates::Column::Date.lte(end));
        }

        let list = base_query
            .order_by(special_dates::Column::Date, Order::Asc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_special_date(&self, date_id: Uuid) -> AppResult<SpecialDateResponse> {
        let model = self.find_special_date(date_id).await?;
        Ok(model.into())
    }

    pub async fn create_special_date(
        &self,
        request: CreateSpecialDateRequest,
    ) -> AppResult<SpecialDateResponse> {
        customers::Entity::find_by_id(request.customer_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let model = special_dates::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(request.customer_id),
            date_type: Set(request.date_type),
            date: Set(request.date),
            notes: Set(request.notes),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    pub async fn update_special_date(
        &self,
        date_id: Uuid,
        request: UpdateSpecialDateRequest,
    ) -> AppResult<SpecialDateResponse> {
        let model = self.find_special_date(date_id).await?;
        let mut model = model.into_active_model();

        if let Some(date_type) = request.date_type {
            model.date_type = Set(date_type);
        }
        if let Some(date) = request.date {
            model.date = Set(date);
        }
        if let Some(notes) = request.notes {
            model.notes = Set(Some(notes));
        }
        model.updated_at = Set(Some(Utc::now()));

        Ok(model.update(&self.pool).await?.into())
    }

    pub async fn delete_special_date(&self, date_id: Uuid) -> AppResult<()> {
        let model = self.find_special_date(date_id).await?;
        special_dates::Entity::delete_by_id(model.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    /// 未来 days 天内到来的纪念日（按周年重复计算），按到来先后排序
    pub async fn upcoming(&self, days: i64) -> AppResult<Vec<SpecialDateResponse>> {
        let today = Utc::now().date_naive();
        let horizon = today + chrono::Duration::days(days.max(0));

        let all = special_dates::Entity::find().all(&self.pool).await?;

        let mut with_next: Vec<(NaiveDate, special_dates::Model)> = all
            .into_iter()
            .map(|m| (next_occurrence(m.date, today), m))
            .filter(|(next, _)| *next <= horizon)
            .collect();
        with_next.sort_by_key(|(next, _)| *next);

        Ok(with_next.into_iter().map(|(_, m)| m.into()).collect())
    }

    /// 本月份的纪念日（按周年重复，只比较月份）
    pub async fn this_month(&self) -> AppResult<Vec<SpecialDateResponse>> {
        let month = Utc::now().date_naive().month();

        let all = special_dates::Entity::find()
            .order_by(special_dates::Column::Date, Order::Asc)
            .all(&self.pool)
            .await?;

        Ok(all
            .into_iter()
            .filter(|m| m.date.month() == month)
            .map(Into::into)
            .collect())
    }

    /// 纪念日统计：总数 + 按类型计数（两种纪念日合并为 anniversary_count）
    pub async fn stats(&self) -> AppResult<SpecialDateStatsResponse> {
        let total_dates = special_dates::Entity::find().count(&self.pool).await? as i64;
        let birthday_count = special_dates::Entity::find()
            .filter(special_dates::Column::DateType.eq(SpecialDateType::Birthday))
            .count(&self.pool)
            .await? as i64;
        let anniversary_count = special_dates::Entity::find()
            .filter(
                special_dates::Column::DateType
                    .is_in([SpecialDateType::WeddingAnniversary, SpecialDateType::Anniversary]),
            )
            .count(&self.pool)
            .await? as i64;
        let other_count = total_dates - birthday_count - anniversary_count;

        Ok(SpecialDateStatsResponse {
            total_dates,
            birthday_count,
            anniversary_count,
            other_count,
        })
    }

    async fn find_special_date(&self, date_id: Uuid) -> AppResult<special_dates::Model> {
        special_dates::Entity::find_by_id(date_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Special date not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_occurrence_later_this_year() {
        let today = date(2026, 3, 10);
        assert_eq!(next_occurrence(date(1990, 6, 15), today), date(2026, 6, 15));
    }

    #[test]
    fn test_next_occurrence_already_passed() {
        let today = date(2026, 8, 1);
        assert_eq!(next_occurrence(date(1990, 6, 15), today), date(2027, 6, 15));
    }

    #[test]
    fn test_next_occurrence_today_counts() {
        let today = date(2026, 6, 15);
        assert_eq!(next_occurrence(date(1990, 6, 15), today), today);
    }

    #[test]
    fn test_next_occurrence_leap_day() {
        // 平年把 2/29 折算到 3/1
        let today = date(2026, 1, 1);
        assert_eq!(next_occurrence(date(2000, 2, 29), today), date(2026, 3, 1));
    }
}
