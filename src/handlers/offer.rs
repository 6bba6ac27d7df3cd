use crate::models::*;
use crate::services::OfferService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/offers",
    tag = "offers",
    params(
        ("status" = Option<OfferStatus>, Query, description = "按状态过滤"),
        ("type" = Option<OfferType>, Query, description = "按类型过滤"),
        ("active_only" = Option<bool>, Query, description = "只看当前可用的优惠")
    ),
    responses(
        (status = 200, description = "获取优惠列表成功", body = [OfferResponse])
    )
)]
/// 优惠列表
pub async fn list_offers(
    service: web::Data<OfferService>,
    query: web::Query<OfferQuery>,
) -> Result<HttpResponse> {
    match service.list_offers(&query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/offers/active",
    tag = "offers",
    responses(
        (status = 200, description = "获取可用优惠成功", body = [OfferResponse])
    )
)]
/// 当前可用的优惠
pub async fn active_offers(service: web::Data<OfferService>) -> Result<HttpResponse> {
    match service.active_offers().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/offers/expired",
    tag = "offers",
    responses(
        (status = 200, description = "获取过期优惠成功", body = [OfferResponse])
    )
)]
/// 已过期的优惠
pub async fn expired_offers(service: web::Data<OfferService>) -> Result<HttpResponse> {
    match service.expired_offers().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/offers/stats",
    tag = "offers",
    responses(
        (status = 200, description = "获取优惠统计成功", body = OfferStatsResponse)
    )
)]
/// 优惠统计
pub async fn stats(service: web::Data<OfferService>) -> Result<HttpResponse> {
    match service.stats().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/offers/usages",
    tag = "offers",
    params(
        ("customer_id" = Option<Uuid>, Query, description = "按客户过滤"),
        ("offer_id" = Option<Uuid>, Query, description = "按优惠过滤")
    ),
    responses(
        (status = 200, description = "获取使用记录成功", body = [OfferUsageResponse])
    )
)]
/// 核销记录列表
pub async fn list_usages(
    service: web::Data<OfferService>,
    query: web::Query<OfferUsageQuery>,
) -> Result<HttpResponse> {
    match service.list_usages(&query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/offers/{id}",
    tag = "offers",
    params(
        ("id" = Uuid, Path, description = "优惠ID")
    ),
    responses(
        (status = 200, description = "获取优惠成功", body = OfferResponse),
        (status = 404, description = "优惠不存在")
    )
)]
pub async fn get_offer(
    service: web::Data<OfferService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.get_offer(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/offers",
    tag = "offers",
    request_body = CreateOfferRequest,
    responses(
        (status = 200, description = "创建优惠成功", body = OfferResponse),
        (status = 400, description = "折扣值或有效期非法")
    )
)]
pub async fn create_offer(
    service: web::Data<OfferService>,
    body: web::Json<CreateOfferRequest>,
) -> Result<HttpResponse> {
    match service.create_offer(body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/offers/{id}",
    tag = "offers",
    params(
        ("id" = Uuid, Path, description = "优惠ID")
    ),
    request_body = UpdateOfferRequest,
    responses(
        (status = 200, description = "更新优惠成功", body = OfferResponse),
        (status = 404, description = "优惠不存在")
    )
)]
pub async fn update_offer(
    service: web::Data<OfferService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOfferRequest>,
) -> Result<HttpResponse> {
    match service.update_offer(path.into_inner(), body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/offers/{id}",
    tag = "offers",
    params(
        ("id" = Uuid, Path, description = "优惠ID")
    ),
    responses(
        (status = 200, description = "删除优惠成功"),
        (status = 404, description = "优惠不存在")
    )
)]
pub async fn delete_offer(
    service: web::Data<OfferService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.delete_offer(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": null }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/offers/{id}/use",
    tag = "offers",
    params(
        ("id" = Uuid, Path, description = "优惠ID")
    ),
    request_body = UseOfferRequest,
    responses(
        (status = 200, description = "核销成功", body = OfferUsageResponse),
        (status = 400, description = "优惠失效 / 已用过 / 达到上限"),
        (status = 404, description = "优惠或客户不存在")
    )
)]
/// 核销优惠（每客户每优惠一次，用量上限并发安全）
pub async fn use_offer(
    service: web::Data<OfferService>,
    path: web::Path<Uuid>,
    body: web::Json<UseOfferRequest>,
) -> Result<HttpResponse> {
    match service.use_offer(path.into_inner(), body.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn offer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/offers")
            .route("", web::get().to(list_offers))
            .route("", web::post().to(create_offer))
            .route("/active", web::get().to(active_offers))
            .route("/expired", web::get().to(expired_offers))
            .route("/stats", web::get().to(stats))
            .route("/usages", web::get().to(list_usages))
            .route("/{id}", web::get().to(get_offer))
            .route("/{id}", web::put().to(update_offer))
            .route("/{id}", web::delete().to(delete_offer))
            .route("/{id}/use", web::post().to(use_offer)),
    );
}
