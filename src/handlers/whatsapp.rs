use crate::external::{WhatsAppService, WishMessage};
use crate::models::*;
use crate::utils::{format_phone, validate_phone};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/whatsapp/send-message",
    tag = "whatsapp",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "发送成功", body = WhatsAppSendResponse),
        (status = 400, description = "手机号非法"),
        (status = 502, description = "WhatsApp API 调用失败")
    )
)]
/// 发送自定义 WhatsApp 消息（mock 模式下只记录日志）
pub async fn send_message(
    service: web::Data<WhatsAppService>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    // 先统一成国际格式再校验, 本地格式 (无国家码) 默认 +1
    let phone = format_phone(&request.phone);
    if let Err(e) = validate_phone(&phone) {
        return Ok(e.error_response());
    }
    match service.send_message(&phone, &request.message).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/whatsapp/send-wish",
    tag = "whatsapp",
    request_body = SendWishRequest,
    responses(
        (status = 200, description = "发送成功", body = WhatsAppSendResponse),
        (status = 400, description = "手机号非法"),
        (status = 502, description = "WhatsApp API 调用失败")
    )
)]
/// 发送节日祝福（固定模板 + 可选优惠信息 / 自定义内容）
pub async fn send_wish(
    service: web::Data<WhatsAppService>,
    body: web::Json<SendWishRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    let phone = format_phone(&request.phone);
    if let Err(e) = validate_phone(&phone) {
        return Ok(e.error_response());
    }

    let wish = WishMessage {
        customer_name: request.customer_name,
        phone,
        special_date_type: request.special_date_type,
        custom_message: request.custom_message,
        offer_details: request.offer_details,
    };
    match service.send_wish(&wish).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn whatsapp_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/whatsapp")
            .route("/send-message", web::post().to(send_message))
            .route("/send-wish", web::post().to(send_wish)),
    );
}
