use crate::models::*;
use crate::services::SpinWheelService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/spin-wheel/prizes",
    tag = "spin_wheel",
    responses(
        (status = 200, description = "获取奖品列表成功", body = [PrizeResponse])
    )
)]
/// 获取当前启用的奖品配置（按权重降序）
pub async fn get_prizes(service: web::Data<SpinWheelService>) -> Result<HttpResponse> {
    match service.list_prizes().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spin-wheel/prizes",
    tag = "spin_wheel",
    request_body = CreatePrizeRequest,
    responses(
        (status = 200, description = "创建奖品成功", body = PrizeResponse),
        (status = 400, description = "权重非法或名称重复")
    )
)]
/// 新增奖品（权重 >= 1，名称唯一）
pub async fn create_prize(
    service: web::Data<SpinWheelService>,
    body: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create_prize(body.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/spin-wheel/prizes/{id}",
    tag = "spin_wheel",
    params(
        ("id" = Uuid, Path, description = "奖品ID")
    ),
    request_body = UpdatePrizeRequest,
    responses(
        (status = 200, description = "更新奖品成功", body = PrizeResponse),
        (status = 404, description = "奖品不存在")
    )
)]
/// 更新奖品配置（权重调整即时生效，不影响历史记录）
pub async fn update_prize(
    service: web::Data<SpinWheelService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.update_prize(path.into_inner(), body.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/spin-wheel/prizes/{id}",
    tag = "spin_wheel",
    params(
        ("id" = Uuid, Path, description = "奖品ID")
    ),
    responses(
        (status = 200, description = "删除奖品成功"),
        (status = 400, description = "奖品已被抽中过，建议下线"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 删除奖品（被抽奖记录引用时拒绝删除）
pub async fn delete_prize(
    service: web::Data<SpinWheelService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.delete_prize(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": null }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spin-wheel/games/play",
    tag = "spin_wheel",
    request_body = PlayRequest,
    responses(
        (status = 200, description = "抽奖成功", body = PlayResultResponse),
        (status = 404, description = "客户不存在")
    )
)]
/// 进行一次抽奖:
/// 1. 校验客户存在
/// 2. 按权重随机选取奖品（目录为空时发放兜底奖）
/// 3. 记录游戏会话（每客户一条）
/// 4. 写入抽奖记录并返回结果
pub async fn play(
    service: web::Data<SpinWheelService>,
    body: web::Json<PlayRequest>,
) -> Result<HttpResponse> {
    match service.play(body.customer_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spin-wheel/games/{id}/claim",
    tag = "spin_wheel",
    params(
        ("id" = Uuid, Path, description = "抽奖记录ID")
    ),
    request_body = ClaimRequest,
    responses(
        (status = 200, description = "兑奖成功", body = SpinRecordResponse),
        (status = 404, description = "记录不存在"),
        (status = 409, description = "奖品已兑换过")
    )
)]
/// 兑奖 (重复兑换返回 409)
pub async fn claim(
    service: web::Data<SpinWheelService>,
    path: web::Path<Uuid>,
    body: web::Json<ClaimRequest>,
) -> Result<HttpResponse> {
    match service.claim(path.into_inner(), body.into_inner()).await {
        Ok(record) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": record }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spin-wheel/games/stats",
    tag = "spin_wheel",
    responses(
        (status = 200, description = "获取转盘统计成功", body = SpinStatsResponse)
    )
)]
/// 转盘统计：总次数 / 已兑奖 / 未兑奖 / 各奖品分布
pub async fn stats(service: web::Data<SpinWheelService>) -> Result<HttpResponse> {
    match service.stats().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spin-wheel/games",
    tag = "spin_wheel",
    params(
        ("customer_id" = Option<Uuid>, Query, description = "按客户过滤"),
        ("claimed" = Option<bool>, Query, description = "按兑奖状态过滤"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取抽奖记录成功", body = PaginatedResponse<SpinRecordResponse>)
    )
)]
/// 分页获取抽奖记录（倒序）
pub async fn get_records(
    service: web::Data<SpinWheelService>,
    query: web::Query<SpinRecordQuery>,
) -> Result<HttpResponse> {
    match service.list_records(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spin-wheel/sessions/played",
    tag = "spin_wheel",
    responses(
        (status = 200, description = "获取已玩客户成功", body = [CustomerResponse])
    )
)]
/// 已经玩过转盘的客户
pub async fn played_customers(service: web::Data<SpinWheelService>) -> Result<HttpResponse> {
    match service.played_customers().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spin-wheel/sessions/available",
    tag = "spin_wheel",
    responses(
        (status = 200, description = "获取未玩客户成功", body = [CustomerResponse])
    )
)]
/// 还没玩过转盘的客户
pub async fn available_customers(service: web::Data<SpinWheelService>) -> Result<HttpResponse> {
    match service.available_customers().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spin-wheel/sessions/{customer_id}",
    tag = "spin_wheel",
    params(
        ("customer_id" = Uuid, Path, description = "客户ID")
    ),
    responses(
        (status = 200, description = "获取游戏状态成功", body = GameSessionResponse)
    )
)]
/// 客户游戏状态（无会话时 has_played = false）
pub async fn session_status(
    service: web::Data<SpinWheelService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.session_status(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn spin_wheel_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/spin-wheel")
            .route("/prizes", web::get().to(get_prizes))
            .route("/prizes", web::post().to(create_prize))
            .route("/prizes/{id}", web::put().to(update_prize))
            .route("/prizes/{id}", web::delete().to(delete_prize))
            .route("/games/play", web::post().to(play))
            .route("/games/stats", web::get().to(stats))
            .route("/games/{id}/claim", web::post().to(claim))
            .route("/games", web::get().to(get_records))
            .route("/sessions/played", web::get().to(played_customers))
            .route("/sessions/available", web::get().to(available_customers))
            .route("/sessions/{customer_id}", web::get().to(session_status)),
    );
}
