use crate::models::*;
use crate::services::CustomerService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(
        ("name" = Option<String>, Query, description = "姓名子串过滤"),
        ("phone" = Option<String>, Query, description = "手机号子串过滤"),
        ("email" = Option<String>, Query, description = "邮箱子串过滤"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取客户列表成功", body = PaginatedResponse<CustomerResponse>)
    )
)]
/// 分页获取客户列表
pub async fn list_customers(
    service: web::Data<CustomerService>,
    query: web::Query<CustomerQuery>,
) -> Result<HttpResponse> {
    match service.list_customers(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers/search",
    tag = "customers",
    params(
        ("q" = String, Query, description = "关键字，同时匹配姓名/手机号/邮箱")
    ),
    responses(
        (status = 200, description = "搜索客户成功", body = [CustomerResponse])
    )
)]
/// 模糊搜索客户
pub async fn search_customers(
    service: web::Data<CustomerService>,
    query: web::Query<CustomerSearchQuery>,
) -> Result<HttpResponse> {
    match service.search_customers(&query.q).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = Uuid, Path, description = "客户ID")
    ),
    responses(
        (status = 200, description = "获取客户详情成功", body = CustomerDetailResponse),
        (status = 404, description = "客户不存在")
    )
)]
/// 客户详情（附带扩展资料）
pub async fn get_customer(
    service: web::Data<CustomerService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.get_customer(path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": detail }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "创建客户成功", body = CustomerResponse),
        (status = 400, description = "手机号非法或已存在")
    )
)]
/// 创建客户（手机号统一格式化为国际格式后入库）
pub async fn create_customer(
    service: web::Data<CustomerService>,
    body: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse> {
    match service.create_customer(body.into_inner()).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": customer }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = Uuid, Path, description = "客户ID")
    ),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "更新客户成功", body = CustomerResponse),
        (status = 404, description = "客户不存在")
    )
)]
pub async fn update_customer(
    service: web::Data<CustomerService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse> {
    match service
        .update_customer(path.into_inner(), body.into_inner())
        .await
    {
        Ok(customer) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": customer }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = Uuid, Path, description = "客户ID")
    ),
    responses(
        (status = 200, description = "删除客户成功"),
        (status = 404, description = "客户不存在")
    )
)]
/// 删除客户（资料 / 纪念日 / 预订 / 游戏数据级联删除）
pub async fn delete_customer(
    service: web::Data<CustomerService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.delete_customer(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": null }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers/{id}/profile",
    tag = "customers",
    params(
        ("id" = Uuid, Path, description = "客户ID")
    ),
    responses(
        (status = 200, description = "获取扩展资料成功", body = CustomerProfileResponse),
        (status = 404, description = "客户不存在")
    )
)]
/// 获取扩展资料（不存在则自动创建空资料）
pub async fn get_profile(
    service: web::Data<CustomerService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.get_profile(path.into_inner()).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": profile }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/customers/{id}/profile",
    tag = "customers",
    params(
        ("id" = Uuid, Path, description = "客户ID")
    ),
    request_body = UpdateCustomerProfileRequest,
    responses(
        (status = 200, description = "更新扩展资料成功", body = CustomerProfileResponse),
        (status = 404, description = "客户不存在")
    )
)]
pub async fn update_profile(
    service: web::Data<CustomerService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCustomerProfileRequest>,
) -> Result<HttpResponse> {
    match service
        .update_profile(path.into_inner(), body.into_inner())
        .await
    {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": profile }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/customers/{id}/preferences",
    tag = "customers",
    params(
        ("id" = Uuid, Path, description = "客户ID")
    ),
    request_body = UpdatePreferencesRequest,
    responses(
        (status = 200, description = "合并偏好设置成功", body = CustomerProfileResponse),
        (status = 400, description = "preferences 不是 JSON 对象"),
        (status = 404, description = "客户不存在")
    )
)]
/// 按键浅合并偏好设置
pub async fn update_preferences(
    service: web::Data<CustomerService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePreferencesRequest>,
) -> Result<HttpResponse> {
    match service
        .update_preferences(path.into_inner(), body.into_inner())
        .await
    {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": profile }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn customer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::get().to(list_customers))
            .route("", web::post().to(create_customer))
            .route("/search", web::get().to(search_customers))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::put().to(update_customer))
            .route("/{id}", web::delete().to(delete_customer))
            .route("/{id}/profile", web::get().to(get_profile))
            .route("/{id}/profile", web::put().to(update_profile))
            .route("/{id}/preferences", web::patch().to(update_preferences)),
    );
}
