use crate::models::*;
use crate::services::SpecialDateService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/special-dates",
    tag = "special_dates",
    params(
        ("customer_id" = Option<Uuid>, Query, description = "按客户过滤"),
        ("type" = Option<SpecialDateType>, Query, description = "按类型过滤"),
        ("start_date" = Option<String>, Query, description = "日期下限 (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "日期上限 (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "获取纪念日列表成功", body = [SpecialDateResponse])
    )
)]
/// 纪念日列表
pub async fn list_special_dates(
    service: web::Data<SpecialDateService>,
    query: web::Query<SpecialDateQuery>,
) -> Result<HttpResponse> {
    match service.list_special_dates(&query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/special-dates/upcoming",
    tag = "special_dates",
    params(
        ("days" = Option<i64>, Query, description = "未来天数窗口 (默认30)")
    ),
    responses(
        (status = 200, description = "获取即将到来的纪念日成功", body = [SpecialDateResponse])
    )
)]
/// 未来 N 天内到来的纪念日（按周年重复计算）
pub async fn upcoming(
    service: web::Data<SpecialDateService>,
    query: web::Query<UpcomingQuery>,
) -> Result<HttpResponse> {
    let days = query.days.unwrap_or(30);
    match service.upcoming(days).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/special-dates/this-month",
    tag = "special_dates",
    responses(
        (status = 200, description = "获取本月纪念日成功", body = [SpecialDateResponse])
    )
)]
/// 本月份的纪念日
pub async fn this_month(service: web::Data<SpecialDateService>) -> Result<HttpResponse> {
    match service.this_month().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/special-dates/stats",
    tag = "special_dates",
    responses(
        (status = 200, description = "获取纪念日统计成功", body = SpecialDateStatsResponse)
    )
)]
/// 纪念日统计
pub async fn stats(service: web::Data<SpecialDateService>) -> Result<HttpResponse> {
    match service.stats().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/special-dates/{id}",
    tag = "special_dates",
    params(
        ("id" = Uuid, Path, description = "纪念日ID")
    ),
    responses(
        (status = 200, description = "获取纪念日成功", body = SpecialDateResponse),
        (status = 404, description = "纪念日不存在")
    )
)]
pub async fn get_special_date(
    service: web::Data<SpecialDateService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.get_special_date(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/special-dates",
    tag = "special_dates",
    request_body = CreateSpecialDateRequest,
    responses(
        (status = 200, description = "创建纪念日成功", body = SpecialDateResponse),
        (status = 404, description = "客户不存在")
    )
)]
pub async fn create_special_date(
    service: web::Data<SpecialDateService>,
    body: web::Json<CreateSpecialDateRequest>,
) -> Result<HttpResponse> {
    match service.create_special_date(body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/special-dates/{id}",
    tag = "special_dates",
    params(
        ("id" = Uuid, Path, description = "纪念日ID")
    ),
    request_body = UpdateSpecialDateRequest,
    responses(
        (status = 200, description = "更新纪念日成功", body = SpecialDateResponse),
        (status = 404, description = "纪念日不存在")
    )
)]
pub async fn update_special_date(
    service: web::Data<SpecialDateService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateSpecialDateRequest>,
) -> Result<HttpResponse> {
    match service
        .update_special_date(path.into_inner(), body.into_inner())
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/special-dates/{id}",
    tag = "special_dates",
    params(
        ("id" = Uuid, Path, description = "纪念日ID")
    ),
    responses(
        (status = 200, description = "删除纪念日成功"),
        (status = 404, description = "纪念日不存在")
    )
)]
pub async fn delete_special_date(
    service: web::Data<SpecialDateService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.delete_special_date(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": null }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn special_date_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/special-dates")
            .route("", web::get().to(list_special_dates))
            .route("", web::post().to(create_special_date))
            .route("/upcoming", web::get().to(upcoming))
            .route("/this-month", web::get().to(this_month))
            .route("/stats", web::get().to(stats))
            .route("/{id}", web::get().to(get_special_date))
            .route("/{id}", web::put().to(update_special_date))
            .route("/{id}", web::delete().to(delete_special_date)),
    );
}
