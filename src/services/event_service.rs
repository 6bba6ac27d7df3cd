use crate::entities::{
    customer_entity as customers, event_booking_entity as bookings, event_entity as events,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    BookEventRequest, BookingQuery, BookingStatus, CreateEventRequest, EventBookingResponse,
    EventQuery, EventResponse, UpdateEventRequest,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct EventService {
    pool: DatabaseConnection,
}

impl EventService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 活动列表（支持类型 / 启用状态 / 时间区间过滤，按开始时间升序）
    pub async fn list_events(&self, query: &EventQuery) -> AppResult<Vec<EventResponse>> {
        let mut base_query = events::Entity::find();
        if let Some(event_type) = &query.event_type {
            base_query = base_query.filter(events::Column::EventType.eq(event_type.clone()));
        }
        if let Some(active) = query.active {
            base_query = base_query.filter(events::Column::IsActive.eq(active));
        }
        if let Some(start) = query.start_date {
            base_query = base_query.filter(events::Column::StartDate.gte(start));
        }
        if let Some(end) = query.end_date {
            base_query = base_query.filter(events::Column::StartDate.lte(end));
        }

        let list = base_query
            .order_by(events::Column::StartDate, Order::Asc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 即将开始的活动（启用且开始时间在当前之后）
    pub async fn upcoming_events(&self) -> AppResult<Vec<EventResponse>> {
        let list = events::Entity::find()
            .filter(events::Column::IsActive.eq(true))
            .filter(events::Column::StartDate.gte(Utc::now()))
            .order_by(events::Column::StartDate, Order::Asc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_event(&self, event_id: Uuid) -> AppResult<EventResponse> {
        Ok(self.find_event(event_id).await?.into())
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> AppResult<EventResponse> {
        if request.capacity < 1 {
            return Err(AppError::ValidationError(
                "Event capacity must be at least 1".to_string(),
            ));
        }
        if request.end_date < request.start_date {
            return Err(AppError::ValidationError(
                "Event end date cannot be before its start date".to_string(),
            ));
        }
        if request.price_cents < 0 {
            return Err(AppError::ValidationError(
                "Event price cannot be negative".to_string(),
            ));
        }

        let model = events::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(request.title),
            description: Set(request.description),
            event_type: Set(request.event_type),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            capacity: Set(request.capacity),
            current_bookings: Set(0),
            price_cents: Set(request.price_cents),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Event created: {} ({})", model.title, model.id);
        Ok(model.into())
    }

    pub async fn update_event(
        &self,
        event_id: Uuid,
        request: UpdateEventRequest,
    ) -> AppResult<EventResponse> {
        let event = self.find_event(event_id).await?;

        // 容量不能降到已预订人数之下
        if let Some(capacity) = request.capacity {
            if capacity < event.current_bookings {
                return Err(AppError::ValidationError(format!(
                    "Capacity cannot be below current bookings ({})",
                    event.current_bookings
                )));
            }
        }

        let mut model = event.into_active_model();
        if let Some(title) = request.title {
            model.title = Set(title);
        }
        if let Some(description) = request.description {
            model.description = Set(description);
        }
        if let Some(event_type) = request.event_type {
            model.event_type = Set(event_type);
        }
        if let Some(start_date) = request.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = request.end_date {
            model.end_date = Set(end_date);
        }
        if let Some(capacity) = request.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(price_cents) = request.price_cents {
            if price_cents < 0 {
                return Err(AppError::ValidationError(
                    "Event price cannot be negative".to_string(),
                ));
            }
            model.price_cents = Set(price_cents);
        }
        if let Some(is_active) = request.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(Some(Utc::now()));

        Ok(model.update(&self.pool).await?.into())
    }

    pub async fn delete_event(&self, event_id: Uuid) -> AppResult<()> {
        let event = self.find_event(event_id).await?;
        events::Entity::delete_by_id(event.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    // -----------------------------
    // 预订
    // -----------------------------

    /// 预订活动。
    /// 名额抢占用条件更新完成：只有 current_bookings + guests <= capacity
    /// 时增量才会生效，并发超订由数据库行锁串行化拒绝。
    pub async fn book_event(
        &self,
        event_id: Uuid,
        request: BookEventRequest,
    ) -> AppResult<EventBookingResponse> {
        if request.number_of_guests < 1 {
            return Err(AppError::ValidationError(
                "Number of guests must be at least 1".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let event = events::Entity::find_by_id(event_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        customers::Entity::find_by_id(request.customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        if !event.is_active {
            return Err(AppError::ValidationError(
                "Event is not open for booking".to_string(),
            ));
        }

        let guests = request.number_of_guests;
        let claimed = events::Entity::update_many()
            .col_expr(
                events::Column::CurrentBookings,
                Expr::col(events::Column::CurrentBookings).add(guests),
            )
            .col_expr(events::Column::UpdatedAt, Expr::value(Some(Utc::now())))
            .filter(events::Column::Id.eq(event_id))
            .filter(
                Expr::col(events::Column::Capacity)
                    .gte(Expr::col(events::Column::CurrentBookings).add(guests)),
            )
            .exec(&txn)
            .await?;

        if claimed.rows_affected == 0 {
            return Err(AppError::ValidationError(format!(
                "Not enough spots available ({} left)",
                event.available_spots()
            )));
        }

        let booking = bookings::ActiveModel {
            id: Set(Uuid::new_v4()),
            event_id: Set(event_id),
            customer_id: Set(request.customer_id),
            booking_date: Set(Some(Utc::now())),
            number_of_guests: Set(guests),
            total_price_cents: Set(event.price_cents * guests as i64),
            status: Set(BookingStatus::Confirmed),
            notes: Set(request.notes),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Event booked: event={} customer={} guests={}",
            event_id,
            request.customer_id,
            guests
        );
        Ok(booking.into())
    }

    /// 预订列表（支持客户 / 活动 / 状态过滤，按预订时间倒序）
    pub async fn list_bookings(&self, query: &BookingQuery) -> AppResult<Vec<EventBookingResponse>> {
        let mut base_query = bookings::Entity::find();
        if let Some(customer_id) = query.customer_id {
            base_query = base_query.filter(bookings::Column::CustomerId.eq(customer_id));
        }
        if let Some(event_id) = query.event_id {
            base_query = base_query.filter(bookings::Column::EventId.eq(event_id));
        }
        if let Some(status) = &query.status {
            base_query = base_query.filter(bookings::Column::Status.eq(status.clone()));
        }

        let list = base_query
            .order_by(bookings::Column::BookingDate, Order::Desc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 取消预订并释放名额（已取消的预订直接返回，不重复释放）
    pub async fn cancel_booking(&self, booking_id: Uuid) -> AppResult<EventBookingResponse> {
        let txn = self.pool.begin().await?;

        let booking = bookings::Entity::find_by_id(booking_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        // 条件更新抢占状态流转, 并发取消只有一个会释放名额
        let updated = bookings::Entity::update_many()
            .col_expr(
                bookings::Column::Status,
                Expr::value(BookingStatus::Cancelled),
            )
            .filter(bookings::Column::Id.eq(booking_id))
            .filter(bookings::Column::Status.ne(BookingStatus::Cancelled))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            // 已取消, 幂等返回
            return Ok(booking.into());
        }

        let guests = booking.number_of_guests;
        let event_id = booking.event_id;

        events::Entity::update_many()
            .col_expr(
                events::Column::CurrentBookings,
                Expr::col(events::Column::CurrentBookings).sub(guests),
            )
            .col_expr(events::Column::UpdatedAt, Expr::value(Some(Utc::now())))
            .filter(events::Column::Id.eq(event_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        let mut cancelled = booking;
        cancelled.status = BookingStatus::Cancelled;

        log::info!("Booking cancelled: {}", booking_id);
        Ok(cancelled.into())
    }

    async fn find_event(&self, event_id: Uuid) -> AppResult<events::Model> {
        events::Entity::find_by_id(event_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }
}
