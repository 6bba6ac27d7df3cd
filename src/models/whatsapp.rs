use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SpecialDateType;

/// 自定义消息发送请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub phone: String,
    pub message: String,
}

/// 节日祝福发送请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendWishRequest {
    pub customer_name: String,
    pub phone: String,
    pub special_date_type: SpecialDateType,
    pub custom_message: Option<String>,
    pub offer_details: Option<String>,
}

/// 发送结果响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WhatsAppSendResponse {
    pub message_id: String,
    /// mock 模式下为 true (未真正外呼)
    pub mock: bool,
}
