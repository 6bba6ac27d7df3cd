use crate::models::*;
use crate::services::EventService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(
        ("type" = Option<EventType>, Query, description = "按类型过滤"),
        ("active" = Option<bool>, Query, description = "按启用状态过滤"),
        ("start_date" = Option<String>, Query, description = "开始时间下限 (RFC 3339)"),
        ("end_date" = Option<String>, Query, description = "开始时间上限 (RFC 3339)")
    ),
    responses(
        (status = 200, description = "获取活动列表成功", body = [EventResponse])
    )
)]
/// 活动列表
pub async fn list_events(
    service: web::Data<EventService>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    match service.list_events(&query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/upcoming",
    tag = "events",
    responses(
        (status = 200, description = "获取即将开始的活动成功", body = [EventResponse])
    )
)]
/// 即将开始的活动（启用且尚未开始）
pub async fn upcoming_events(service: web::Data<EventService>) -> Result<HttpResponse> {
    match service.upcoming_events().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取活动成功", body = EventResponse),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn get_event(
    service: web::Data<EventService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.get_event(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "创建活动成功", body = EventResponse),
        (status = 400, description = "容量 / 时间区间非法")
    )
)]
pub async fn create_event(
    service: web::Data<EventService>,
    body: web::Json<CreateEventRequest>,
) -> Result<HttpResponse> {
    match service.create_event(body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "活动ID")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "更新活动成功", body = EventResponse),
        (status = 400, description = "容量低于已预订人数"),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn update_event(
    service: web::Data<EventService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse> {
    match service.update_event(path.into_inner(), body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "删除活动成功"),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn delete_event(
    service: web::Data<EventService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.delete_event(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": null }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events/{id}/book",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "活动ID")
    ),
    request_body = BookEventRequest,
    responses(
        (status = 200, description = "预订成功", body = EventBookingResponse),
        (status = 400, description = "名额不足或活动未开放"),
        (status = 404, description = "活动或客户不存在")
    )
)]
/// 预订活动（条件更新抢占名额，并发不会超订）
pub async fn book_event(
    service: web::Data<EventService>,
    path: web::Path<Uuid>,
    body: web::Json<BookEventRequest>,
) -> Result<HttpResponse> {
    match service.book_event(path.into_inner(), body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/bookings",
    tag = "events",
    params(
        ("customer_id" = Option<Uuid>, Query, description = "按客户过滤"),
        ("event_id" = Option<Uuid>, Query, description = "按活动过滤"),
        ("status" = Option<BookingStatus>, Query, description = "按状态过滤")
    ),
    responses(
        (status = 200, description = "获取预订列表成功", body = [EventBookingResponse])
    )
)]
/// 预订列表
pub async fn list_bookings(
    service: web::Data<EventService>,
    query: web::Query<BookingQuery>,
) -> Result<HttpResponse> {
    match service.list_bookings(&query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events/bookings/{id}/cancel",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "预订ID")
    ),
    responses(
        (status = 200, description = "取消预订成功", body = EventBookingResponse),
        (status = 404, description = "预订不存在")
    )
)]
/// 取消预订并释放名额（幂等）
pub async fn cancel_booking(
    service: web::Data<EventService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.cancel_booking(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn event_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::get().to(list_events))
            .route("", web::post().to(create_event))
            .route("/upcoming", web::get().to(upcoming_events))
            .route("/bookings", web::get().to(list_bookings))
            .route("/bookings/{id}/cancel", web::post().to(cancel_booking))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}", web::put().to(update_event))
            .route("/{id}", web::delete().to(delete_event))
            .route("/{id}/book", web::post().to(book_event)),
    );
}
