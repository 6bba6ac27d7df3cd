use crate::config::WhatsAppConfig;
use crate::error::{AppError, AppResult};
use crate::models::{SpecialDateType, WhatsAppSendResponse};
use crate::utils::phone_for_whatsapp;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct GraphMessage {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GraphSendResponse {
    messages: Vec<GraphMessage>,
}

/// 祝福消息参数 (send_wish 模板输入)
#[derive(Debug, Clone, Serialize)]
pub struct WishMessage {
    pub customer_name: String,
    pub phone: String,
    pub special_date_type: SpecialDateType,
    pub custom_message: Option<String>,
    pub offer_details: Option<String>,
}

#[derive(Clone)]
pub struct WhatsAppService {
    client: Client,
    config: WhatsAppConfig,
}

impl WhatsAppService {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// 发送 WhatsApp 文本消息
    /// mock 模式下只记录日志并返回伪造的 message_id
    pub async fn send_message(&self, phone: &str, message: &str) -> AppResult<WhatsAppSendResponse> {
        let clean_phone = phone_for_whatsapp(phone);

        if self.config.mock_mode {
            log::info!("MOCK: WhatsApp message would be sent to {}", clean_phone);
            log::info!("MOCK: Message content: {}", message);
            return Ok(WhatsAppSendResponse {
                message_id: format!("mock_{}_{}", clean_phone, Uuid::new_v4().simple()),
                mock: true,
            });
        }

        if self.config.api_token.is_empty() || self.config.phone_number_id.is_empty() {
            return Err(AppError::ExternalApiError(
                "WhatsApp API credentials not configured".to_string(),
            ));
        }

        let url = format!(
            "https://graph.facebook.com/v17.0/{}/messages",
            self.config.phone_number_id
        );

        let body = json!({
            "messaging_product": "whatsapp",
            "to": clean_phone,
            "type": "text",
            "text": { "body": message }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            let parsed: GraphSendResponse = response.json().await?;
            let message_id = parsed
                .messages
                .into_iter()
                .next()
                .map(|m| m.id)
                .unwrap_or_default();
            log::info!("WhatsApp message sent successfully: {}", clean_phone);
            Ok(WhatsAppSendResponse {
                message_id,
                mock: false,
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!(
                "WhatsApp message failed to send: {}, Error: {}",
                clean_phone,
                error_text
            );
            Err(AppError::ExternalApiError(format!(
                "WhatsApp sending failed: {}",
                error_text
            )))
        }
    }

    /// 发送节日祝福（固定模板 + 可选优惠信息 / 自定义内容）
    pub async fn send_wish(&self, wish: &WishMessage) -> AppResult<WhatsAppSendResponse> {
        let message = render_wish_message(wish);
        self.send_message(&wish.phone, &message).await
    }
}

/// 渲染祝福消息模板
fn render_wish_message(wish: &WishMessage) -> String {
    let mut message = format!("🎉 Happy {}!\n\n", wish.special_date_type.display_name());
    message.push_str(&format!("Dear {},\n\n", wish.customer_name));
    message.push_str(
        "We're thinking of you on your special day and wanted to send our warmest wishes!\n\n",
    );

    if let Some(offer) = wish.offer_details.as_deref().filter(|s| !s.is_empty()) {
        message.push_str(&format!("🎁 {}\n\n", offer));
    }

    if let Some(custom) = wish.custom_message.as_deref().filter(|s| !s.is_empty()) {
        message.push_str(&format!("💝 {}\n\n", custom));
    }

    message.push_str("Best wishes from your friends at the hotel! 🏨\n\n");
    message.push_str("Thank you for being a valued customer! 🙏");
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wish(custom: Option<&str>, offer: Option<&str>) -> WishMessage {
        WishMessage {
            customer_name: "Maria Lopez".to_string(),
            phone: "+12345678901".to_string(),
            special_date_type: SpecialDateType::Birthday,
            custom_message: custom.map(String::from),
            offer_details: offer.map(String::from),
        }
    }

    #[test]
    fn test_wish_message_basic() {
        let msg = render_wish_message(&wish(None, None));
        assert!(msg.starts_with("🎉 Happy Birthday!"));
        assert!(msg.contains("Dear Maria Lopez,"));
        assert!(!msg.contains("🎁"));
        assert!(!msg.contains("💝"));
    }

    #[test]
    fn test_wish_message_with_offer_and_custom() {
        let msg = render_wish_message(&wish(
            Some("Hope you have an amazing day!"),
            Some("Special 20% off offer"),
        ));
        assert!(msg.contains("🎁 Special 20% off offer"));
        assert!(msg.contains("💝 Hope you have an amazing day!"));
    }

    #[test]
    fn test_wish_message_empty_strings_skipped() {
        let msg = render_wish_message(&wish(Some(""), Some("")));
        assert!(!msg.contains("🎁"));
        assert!(!msg.contains("💝"));
    }

    #[test]
    fn test_anniversary_display_name() {
        let mut w = wish(None, None);
        w.special_date_type = SpecialDateType::WeddingAnniversary;
        let msg = render_wish_message(&w);
        assert!(msg.starts_with("🎉 Happy Wedding Anniversary!"));
    }
}
