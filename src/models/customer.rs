use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{customer_entity, customer_profile_entity};

/// 客户列表 / 详情响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<customer_entity::Model> for CustomerResponse {
    fn from(m: customer_entity::Model) -> Self {
        CustomerResponse {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            birth_date: m.birth_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// 客户详情（附带扩展资料）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub profile: Option<CustomerProfileResponse>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    /// 格式 YYYY-MM-DD
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// 客户列表查询参数 (均为子串匹配)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CustomerQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// 模糊搜索参数: q 同时匹配姓名/手机号/邮箱
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CustomerSearchQuery {
    pub q: String,
}

/// 客户扩展资料响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerProfileResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub preferences: serde_json::Value,
    pub notes: Option<String>,
    pub is_vip: bool,
}

impl From<customer_profile_entity::Model> for CustomerProfileResponse {
    fn from(m: customer_profile_entity::Model) -> Self {
        CustomerProfileResponse {
            id: m.id,
            customer_id: m.customer_id,
            address: m.address,
            city: m.city,
            country: m.country,
            preferences: m.preferences,
            notes: m.notes,
            is_vip: m.is_vip,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCustomerProfileRequest {
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub is_vip: Option<bool>,
}

/// 偏好设置合并请求: preferences 必须是 JSON 对象，按键浅合并
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePreferencesRequest {
    pub preferences: serde_json::Value,
}
